use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{
    LogConfig,
    LogFormat,
};

/// Text output; `RUST_LOG` wins over `default_filter` when set
pub fn init_text(default_filter: &str, with_target: bool) {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(fmt::layer().with_target(with_target).with_thread_ids(false))
        .init();
}

pub fn init_json(default_filter: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(fmt::layer().json().with_current_span(true))
        .init();
}

pub fn init_from_config(config: &LogConfig) {
    let filter = default_filter_for_level(&config.level);
    match config.format {
        LogFormat::Json => init_json(&filter),
        LogFormat::Text => init_text(&filter, config.with_target),
    }
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Applies one level to every pipescout crate and the HTTP trace layer
pub fn default_filter_for_level(level: &str) -> String {
    [
        "pipescout",
        "pipescout_core",
        "pipescout_plugin_api",
        "pipescout_plugin_jenkins",
        "pipescout_web",
        "tower_http",
    ]
    .iter()
    .map(|target| format!("{target}={level}"))
    .collect::<Vec<_>>()
    .join(",")
}
