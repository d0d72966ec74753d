use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Custom error type for config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to build config: {0}")]
    Build(#[source] config::ConfigError),
    #[error("Failed to deserialize config: {0}")]
    Deserialize(#[source] config::ConfigError),
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from a file (e.g., `server.toml`). If no path is provided,
///    it falls back to an optional `server` file in the current working directory.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with `IREDO__`.
///    Nested structures are accessed using double underscores (e.g., `IREDO__SERVER__PORT` maps
///    to `server.port`).
///
/// An explicitly supplied path must exist; the default file is optional so the
/// server can boot on struct defaults alone.
///
/// # Errors
/// Returns [`ConfigError`] if an explicitly requested file is missing, the
/// environment overrides are malformed, or deserialization into `T` fails.
///
/// # Example
/// ```rust
/// use iredo_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(None::<&str>).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from("server"), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix("IREDO")
                .separator("__")
                .convert_case(config::Case::Snake), // Env var overrides (e.g., IREDO__SERVER__PORT)
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .map_err(ConfigError::Build)?
        .try_deserialize::<T>()
        .map_err(ConfigError::Deserialize)?;

    Ok(config)
}
