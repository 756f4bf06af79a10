/// Logger configuration and filter state
///
/// The filter is process-wide: it is built once from command-line flags by
/// `init_from_args()` and read on every log call.
use std::collections::HashSet;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Highest level that may be displayed
    pub min_level: LogLevel,

    /// Tags with --debug-<tag> enabled
    pub debug_tags: HashSet<String>,

    /// Tags with --verbose-<tag> enabled
    pub verbose_tags: HashSet<String>,

    /// If non-empty, only these tags are shown (errors always pass)
    pub enabled_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

/// Build the logger configuration from command-line flags
pub fn init_from_args() {
    set_logger_config(config_from_args(&arguments::get_cmd_args()));
}

pub(super) fn config_from_args(args: &[String]) -> LoggerConfig {
    let has = |flag: &str| args.iter().any(|a| a == flag);
    let mut config = LoggerConfig::default();

    if has("--quiet") {
        config.min_level = LogLevel::Warning;
    }
    if has("--verbose") {
        config.min_level = LogLevel::Verbose;
    }

    for tag in LogTag::BUILTIN.iter() {
        let key = tag.to_debug_key();
        // Per-tag flags open that tag only; the global threshold is untouched
        if has(&format!("--debug-{}", key)) {
            config.debug_tags.insert(key.clone());
        }
        if has(&format!("--verbose-{}", key)) {
            config.verbose_tags.insert(key);
        }
    }

    if let Some(position) = args.iter().position(|a| a == "--log-tags") {
        if let Some(list) = args.get(position + 1) {
            config.enabled_tags = list
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    config
}

pub(super) fn is_debug_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    let key = tag.to_debug_key();
    config.debug_tags.contains(&key) || config.verbose_tags.contains(&key)
}

pub(super) fn is_verbose_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.verbose_tags.contains(&tag.to_debug_key())
}
