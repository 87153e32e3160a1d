use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_tracing;
pub use settings::{DataSettings, LoggingSettings, ServerSettings, Settings};

/// The configuration file read when no other path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Environment variables overriding the file look like `RAZZIE__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "RAZZIE";

/// Loads the application configuration from `config.toml` in the working directory.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Loads and validates the application configuration.
///
/// Built-in defaults are overlaid by the TOML file at `path` (optional, a
/// missing file is not an error) and then by `RAZZIE__*` environment
/// variables.
pub fn load_config_from(path: &Path) -> Result<Settings, ConfigError> {
    let settings = load_unvalidated_from(path)?;
    settings.validate()?;
    Ok(settings)
}

/// Same sources as `load_config_from`, without the final `validate()`.
///
/// For callers that still overlay their own values (e.g. command-line flags)
/// and validate afterwards.
pub fn load_unvalidated_from(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    Ok(builder.try_deserialize::<Settings>()?)
}
