use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub data: DataSettings,
    pub logging: LoggingSettings,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// An IP address to bind, e.g. "0.0.0.0" or "127.0.0.1".
    pub host: String,
    pub port: u16,
}

/// Where the movie list is read from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// A single CSV file, or a directory whose `*.csv` files are all loaded.
    pub csv_path: PathBuf,
}

/// Log verbosity and optional file output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter level when `RUST_LOG` is not set (e.g. "info", "debug").
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    /// File name prefix for the rolling log files.
    pub file_prefix: String,
}

// --- Default Implementations ---
// These allow a user to omit any section (or the whole file) and still get a
// runnable server.

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/movielist.csv"),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "razzie.log".to_string(),
        }
    }
}

impl ServerSettings {
    /// The address to bind the listener to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = IpAddr::from_str(self.host.trim()).map_err(|_| {
            ConfigError::ValidationError(format!("server.host is not an IP address: '{}'", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Settings {
    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }
        self.server.socket_addr()?;
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }
        if self.data.csv_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "data.csv_path must not be empty".to_string(),
            ));
        }
        if LevelFilter::from_str(&self.logging.level).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "logging.level is not a valid level: '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{load_config_from, load_unvalidated_from};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.server.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(settings.data.csv_path, PathBuf::from("data/movielist.csv"));
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn file_overrides_defaults_per_field() {
        let file = write_config(
            r#"
            [server]
            port = 9090

            [data]
            csv_path = "fixtures/movies"

            [logging]
            level = "debug"
            directory = "logs"
            "#,
        );

        let settings = load_config_from(file.path()).unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.data.csv_path, PathBuf::from("fixtures/movies"));
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.directory, Some(PathBuf::from("logs")));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let file = write_config("[server]\nport = 0\n");
        assert!(matches!(
            load_config_from(file.path()),
            Err(ConfigError::ValidationError(msg)) if msg.contains("port")
        ));

        let file = write_config("[server]\nhost = \"not an ip\"\n");
        assert!(matches!(
            load_config_from(file.path()),
            Err(ConfigError::ValidationError(msg)) if msg.contains("host")
        ));

        let file = write_config("[logging]\nlevel = \"chatty\"\n");
        assert!(matches!(
            load_config_from(file.path()),
            Err(ConfigError::ValidationError(msg)) if msg.contains("level")
        ));
    }

    #[test]
    fn unvalidated_load_defers_checks_to_the_caller() {
        let file = write_config("[server]\nport = 0\n");
        let mut settings = load_unvalidated_from(file.path()).unwrap();
        assert_eq!(settings.server.port, 0);
        assert!(settings.validate().is_err());

        settings.server.port = 9000;
        settings.validate().unwrap();
    }

    #[test]
    fn malformed_file_is_a_load_error() {
        let file = write_config("[server\nport = ");
        assert!(matches!(load_config_from(file.path()), Err(ConfigError::LoadError(_))));
    }
}
