use serde::{
    Deserialize,
    Serialize,
};

pub(super) const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1";

pub(super) const DEFAULT_SERVER_PORT: u16 = 5017;

pub(super) const DEFAULT_WORKERPOOL_SIZE: usize = 3;

pub(super) const DEFAULT_HEARTBEAT_SECS: u64 = 45;

// 1 GiB
pub(super) const DEFAULT_MAX_REQUEST_BYTES: usize = 1024 * 1024 * 1024;

pub(super) const DEFAULT_LOG_LEVEL: &str = "debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown log format: {s}. Valid options: text, json")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PipescoutConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub transport: TransportConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub demo: DemoConfig,
}

impl PipescoutConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.address, self.server.port)
    }

    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.server.address.trim().is_empty() {
            errors.push("server.address must not be empty".to_string());
        }
        if self.server.port == 0 {
            errors.push("server.port must be non-zero".to_string());
        }
        if self.service.workerpool_size == 0 {
            errors.push("service.workerpool_size must be at least 1".to_string());
        }
        if self.transport.max_request_bytes == 0 {
            errors.push("transport.max_request_bytes must be non-zero".to_string());
        }

        errors
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_address")]
    pub address: String,

    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_server_address(),
            port: default_server_port(),
        }
    }
}

fn default_server_address() -> String {
    DEFAULT_SERVER_ADDRESS.to_string()
}

fn default_server_port() -> u16 {
    DEFAULT_SERVER_PORT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Maximum number of execute calls served at once
    #[serde(default = "default_workerpool_size")]
    pub workerpool_size: usize,

    #[serde(default = "default_heartbeat_secs")]
    pub heartbeat_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            workerpool_size: default_workerpool_size(),
            heartbeat_secs: default_heartbeat_secs(),
        }
    }
}

fn default_workerpool_size() -> usize {
    DEFAULT_WORKERPOOL_SIZE
}

fn default_heartbeat_secs() -> u64 {
    DEFAULT_HEARTBEAT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

fn default_max_request_bytes() -> usize {
    DEFAULT_MAX_REQUEST_BYTES
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            with_target: false,
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Fixed asset list served to one account, for demos
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DemoConfig {
    #[serde(default)]
    pub account_filter: String,

    /// Asset identifiers separated by `,,,`
    #[serde(default)]
    pub asset_filter: String,
}
