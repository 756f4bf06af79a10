/// Configuration schemas - all config structures defined once with defaults
///
/// Every struct is declared with `config_struct!`, so a partial TOML file
/// only needs the keys it changes.
use std::time::Duration;

use crate::config_struct;
use crate::errors::ConfigError;

// ============================================================================
// SERVER CONFIGURATION
// ============================================================================

config_struct! {
    /// HTTP listener and static assets
    pub struct ServerConfig {
        host: String = "127.0.0.1".to_string(),
        port: u16 = 8080,
        /// Directory served for every path that is not /ws or /api
        static_dir: String = "./static".to_string(),
    }
}

// ============================================================================
// HUB CONFIGURATION
// ============================================================================

config_struct! {
    /// Broadcast hub delivery policy (evict-on-full)
    pub struct HubConfig {
        /// Per-subscriber queue depth; a publish that finds it full evicts the subscriber
        subscriber_buffer: usize = 10,
        /// Upper bound for writing one payload to a viewer
        write_timeout_ms: u64 = 1000,
    }
}

// ============================================================================
// SAMPLER CONFIGURATION
// ============================================================================

config_struct! {
    /// Periodic metrics sampling
    pub struct SamplerConfig {
        interval_secs: u64 = 3,
        /// Filesystem reported in the disk section
        disk_mount_point: String = "/".to_string(),
    }
}

// ============================================================================
// LOGGING CONFIGURATION
// ============================================================================

config_struct! {
    pub struct LoggingConfig {
        /// Mirror log lines to this file; empty disables the file sink
        file_path: String = String::new(),
    }
}

// ============================================================================
// ROOT
// ============================================================================

config_struct! {
    /// Root configuration
    pub struct Config {
        server: ServerConfig = ServerConfig::default(),
        hub: HubConfig = HubConfig::default(),
        sampler: SamplerConfig = SamplerConfig::default(),
        logging: LoggingConfig = LoggingConfig::default(),
    }
}

impl Config {
    /// `host:port` the listener binds to
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.hub.write_timeout_ms)
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs(self.sampler.interval_secs)
    }

    /// Reject values that would make the service misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".into()));
        }
        if self.hub.subscriber_buffer == 0 {
            return Err(ConfigError::Invalid(
                "hub.subscriber_buffer must be at least 1".into(),
            ));
        }
        if self.hub.write_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "hub.write_timeout_ms must be at least 1".into(),
            ));
        }
        if self.sampler.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "sampler.interval_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
