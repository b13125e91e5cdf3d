use axum::{
    extract::State,
    Json,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub plugins: Vec<String>,
    /// Interval at which callers should expect the service to stay reachable
    pub heartbeat_secs: u64,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let plugins = state
        .service
        .manifests()
        .into_iter()
        .map(|manifest| manifest.name)
        .collect();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        plugins,
        heartbeat_secs: state.heartbeat_secs,
    })
}
