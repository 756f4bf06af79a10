/// Centralized argument handling for sysmonitor
///
/// Stores the process arguments once and exposes small lookup helpers
/// plus typed accessors for the flags the binary understands:
/// - `--listen <host:port>`: listen address (overrides config)
/// - `--config <path>`: TOML configuration file
/// - `--debug-<tag>` / `--verbose[-<tag>]` / `--quiet` / `--log-tags a,b`: logger filters
/// - `--help`
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::env;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "data/config.toml";

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Override the stored arguments (used by tests and embedders)
pub fn set_cmd_args(args: Vec<String>) {
    *CMD_ARGS.lock() = args;
}

/// Copy of the current arguments (does not hold the lock)
pub fn get_cmd_args() -> Vec<String> {
    CMD_ARGS.lock().clone()
}

/// Checks if a specific argument is present
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Value following `flag`, if both are present
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .filter(|value| !value.starts_with("--"))
        .cloned()
}

pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Listen address override from `--listen`
pub fn get_listen_override() -> Option<String> {
    get_arg_value("--listen")
}

/// Configuration path from `--config`, or the default
pub fn get_config_path() -> String {
    get_arg_value("--config").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

pub fn print_help() {
    println!(
        "sysmonitor - live host metrics over WebSocket\n\
         \n\
         USAGE:\n\
         \x20   sysmonitor [OPTIONS]\n\
         \n\
         OPTIONS:\n\
         \x20   --listen <host:port>   Listen address (default from config, 127.0.0.1:8080)\n\
         \x20   --config <path>        Configuration file (default: {})\n\
         \x20   --debug-<tag>          Debug logs for one component\n\
         \x20                          (system, config, hub, session, sampler, webserver)\n\
         \x20   --verbose              Show everything\n\
         \x20   --quiet                Warnings and errors only\n\
         \x20   --log-tags <a,b>       Only show these tags\n\
         \x20   -h, --help             Print this help",
        DEFAULT_CONFIG_PATH
    );
}
