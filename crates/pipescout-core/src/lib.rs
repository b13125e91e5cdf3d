pub mod config;
pub mod logging;
pub mod plugins;
pub mod service;

pub use config::{
    ConfigLoadError,
    ConfigLoader,
    LogFormat,
    PipescoutConfig,
};
pub use service::ExecutionService;
