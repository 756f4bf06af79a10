/// Core logging implementation with automatic filtering
///
/// Checks whether a line should be displayed based on level and tag,
/// then hands it to the format module for output.
use super::config::{get_logger_config, is_debug_enabled_for_tag, is_verbose_enabled_for_tag, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Filtering rules:
/// 1. Errors are always shown
/// 2. If enabled_tags is non-empty, the tag must be in the set
/// 3. Debug requires --verbose OR --debug-<tag> for that tag
/// 4. Verbose requires --verbose OR --verbose-<tag> for that tag
/// 5. Warning and Info follow the minimum threshold (--quiet lowers it)
pub fn should_log(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    if !config.enabled_tags.is_empty() && !config.enabled_tags.contains(&tag.to_debug_key()) {
        return false;
    }

    match level {
        LogLevel::Debug => {
            config.min_level == LogLevel::Verbose || is_debug_enabled_for_tag(config, tag)
        }
        LogLevel::Verbose => {
            config.min_level == LogLevel::Verbose || is_verbose_enabled_for_tag(config, tag)
        }
        _ => level <= config.min_level,
    }
}

/// Filter, then format and write
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    let config = get_logger_config();
    if !should_log(&config, &tag, level) {
        return;
    }

    super::format::format_and_log(&tag, level, message);
}
