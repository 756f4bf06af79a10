//! Structured logging system for sysmonitor
//!
//! This module provides a small, ergonomic logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-component debug control via --debug-<tag> flags
//! - Colored console output with an optional plain-text file mirror
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sysmonitor::logger::{self, LogTag};
//!
//! logger::error(LogTag::Webserver, "Failed to bind listener");
//! logger::warning(LogTag::Sampler, "CPU section unavailable");
//! logger::info(LogTag::Hub, "Subscriber evicted");
//! logger::debug(LogTag::Session, "Payload written"); // Only if --debug-session
//! logger::verbose(LogTag::Hub, "Publish scan details"); // Only if --verbose
//! ```
//!
//! Call `logger::init()` once at startup, before any logging occurs.

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Scans command-line arguments for --debug-<tag>, --verbose and --quiet
/// and installs the resulting filter. File output is enabled separately
/// with [`enable_file_logging`] once the configuration is known.
pub fn init() {
    config::init_from_args();
}

/// Mirror every displayed log line into `path` (appending)
pub fn enable_file_logging(path: &str) -> std::io::Result<()> {
    file::init_file_logging(path)
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
///
/// Warnings are shown by default (including with --quiet).
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (detailed diagnostics)
///
/// Debug logs are ONLY shown when the --debug-<tag> flag for that tag is present,
/// e.g. `--debug-hub` for [`LogTag::Hub`].
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (very detailed tracing)
///
/// Only shown with --verbose or --verbose-<tag>.
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush pending file log writes
///
/// Call this during shutdown so the last lines reach the disk.
pub fn flush() {
    file::flush_file_logging();
}
