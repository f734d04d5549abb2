use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DecayTuning, Investment, Valuation, ValuationConfig};

/// Loads the engine configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed
/// `ValuationConfig` struct, validates it, and returns it.
pub fn load_config() -> Result<ValuationConfig, ConfigError> {
    load_config_from("config.toml")
}

/// Loads the engine configuration from an explicit path.
pub fn load_config_from<P: AsRef<Path>>(path: P) -> Result<ValuationConfig, ConfigError> {
    let path = path.as_ref();
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        // Optionally, one could add environment variables here as well.
        // .add_source(config::Environment::with_prefix("ENCORE"));
        .build()?;

    // Attempt to deserialize the entire configuration into our struct.
    let config = builder.try_deserialize::<ValuationConfig>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "loaded valuation configuration");
    Ok(config)
}
