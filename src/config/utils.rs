/// Configuration loading
///
/// A missing file is not an error: the service starts with defaults, which
/// matches running the binary from a fresh checkout.
use std::path::Path;

use super::schemas::Config;
use crate::errors::ConfigError;
use crate::logger::{self, LogTag};

/// Load and validate configuration from a TOML file
pub fn load_config_from_path(path: &str) -> Result<Config, ConfigError> {
    let config = if Path::new(path).exists() {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let config = parse_config(path, &contents)?;
        logger::info(LogTag::Config, &format!("Loaded configuration from {}", path));
        config
    } else {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path),
        );
        Config::default()
    };

    config.validate()?;
    Ok(config)
}

/// Parse TOML text; `origin` is only used in error messages
pub fn parse_config(origin: &str, contents: &str) -> Result<Config, ConfigError> {
    toml::from_str::<Config>(contents).map_err(|source| ConfigError::Parse {
        path: origin.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.listen_address(), "127.0.0.1:8080");
        assert_eq!(config.hub.subscriber_buffer, 10);
        assert_eq!(config.write_timeout().as_millis(), 1000);
        assert_eq!(config.sample_interval().as_secs(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            "inline",
            "[hub]\nsubscriber_buffer = 2\n\n[server]\nport = 9090\n",
        )
        .unwrap();
        assert_eq!(config.hub.subscriber_buffer, 2);
        assert_eq!(config.hub.write_timeout_ms, 1000);
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.sampler.disk_mount_point, "/");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sampler]\ninterval_secs = 5").unwrap();

        let config = load_config_from_path(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.sampler.interval_secs, 5);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = load_config_from_path(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[hub]\nsubscriber_buffer = 0").unwrap();

        let err = load_config_from_path(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = parse_config("broken.toml", "[hub\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
