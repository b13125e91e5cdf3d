use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::interpolation::{
    interpolate_toml,
    InterpolationError,
};
use super::schema::{
    LogFormat,
    PipescoutConfig,
};

pub const CONFIG_PATH_ENV: &str = "PIPESCOUT_CONFIG_PATH";

const ENV_PREFIX: &str = "PIPESCOUT_";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] InterpolationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ConfigLoadResult<T> = Result<T, ConfigLoadError>;

/// Loads `PipescoutConfig` from TOML, then layers environment overrides
/// named `PIPESCOUT_<SECTION>_<KEY>` on top.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn discover_config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            tracing::debug!("Using config path from {CONFIG_PATH_ENV}: {path}");
            return PathBuf::from(path);
        }

        let path = dirs::config_dir()
            .map(|dir| dir.join("pipescout").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("pipescout.toml"));
        tracing::debug!("Using config path: {}", path.display());
        path
    }

    pub fn load(path: &Path) -> ConfigLoadResult<PipescoutConfig> {
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Like [`ConfigLoader::load`], but a missing file means defaults
    pub fn load_or_default(path: &Path) -> ConfigLoadResult<PipescoutConfig> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Self::finish(PipescoutConfig::default(), &env_lookup)
        }
    }

    pub fn parse(content: &str) -> ConfigLoadResult<PipescoutConfig> {
        Self::parse_with_env(content, &env_lookup)
    }

    /// Parses with `lookup` standing in for the process environment
    pub fn parse_with_env(
        content: &str, lookup: &dyn Fn(&str) -> Option<String>,
    ) -> ConfigLoadResult<PipescoutConfig> {
        let mut value: toml::Value = toml::from_str(content)?;

        interpolate_toml(&mut value, lookup)?;

        let config: PipescoutConfig = value.try_into().map_err(|e| {
            ConfigLoadError::InvalidConfig(format!("Failed to deserialize config: {e}"))
        })?;

        Self::finish(config, lookup)
    }

    fn finish(
        mut config: PipescoutConfig, lookup: &dyn Fn(&str) -> Option<String>,
    ) -> ConfigLoadResult<PipescoutConfig> {
        apply_env_overrides(&mut config, lookup)?;

        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigLoadError::InvalidConfig(errors.join(", ")));
        }

        tracing::debug!(
            bind_addr = %config.bind_addr(),
            workerpool_size = config.service.workerpool_size,
            "Loaded config"
        );

        Ok(config)
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> ConfigLoadResult<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| {
        ConfigLoadError::InvalidConfig(format!("{ENV_PREFIX}{key}={raw:?}: {e}"))
    })
}

fn apply_env_overrides(
    config: &mut PipescoutConfig, lookup: &dyn Fn(&str) -> Option<String>,
) -> ConfigLoadResult<()> {
    let get = |key: &str| lookup(&format!("{ENV_PREFIX}{key}"));

    if let Some(v) = get("SERVER_ADDRESS") {
        config.server.address = v;
    }
    if let Some(v) = get("SERVER_PORT") {
        config.server.port = parse_override("SERVER_PORT", &v)?;
    }
    if let Some(v) = get("SERVICE_WORKERPOOL_SIZE") {
        config.service.workerpool_size = parse_override("SERVICE_WORKERPOOL_SIZE", &v)?;
    }
    if let Some(v) = get("SERVICE_HEARTBEAT_SECS") {
        config.service.heartbeat_secs = parse_override("SERVICE_HEARTBEAT_SECS", &v)?;
    }
    if let Some(v) = get("TRANSPORT_MAX_REQUEST_BYTES") {
        config.transport.max_request_bytes = parse_override("TRANSPORT_MAX_REQUEST_BYTES", &v)?;
    }
    if let Some(v) = get("LOG_LEVEL") {
        config.log.level = v;
    }
    if let Some(v) = get("LOG_FORMAT") {
        config.log.format = parse_override::<LogFormat>("LOG_FORMAT", &v)?;
    }
    if let Some(v) = get("DEMO_ACCOUNT_FILTER") {
        config.demo.account_filter = v;
    }
    if let Some(v) = get("DEMO_ASSET_FILTER") {
        config.demo.asset_filter = v;
    }

    Ok(())
}
