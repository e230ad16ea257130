// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Config, Inputs, Outputs};

/// Loads the application configuration from the `config.toml` file.
///
/// The file is optional: when it is absent, the built-in defaults apply and
/// any remaining gaps are expected to be filled by command-line overrides.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;

    Ok(config)
}
