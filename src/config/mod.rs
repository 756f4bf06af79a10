/// Configuration system for sysmonitor
///
/// - `macros`: `config_struct!` for structs with embedded defaults
/// - `schemas`: every configuration section, defined once
/// - `utils`: loading from TOML and validation
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{Config, HubConfig, LoggingConfig, SamplerConfig, ServerConfig};
pub use utils::{load_config_from_path, parse_config};
