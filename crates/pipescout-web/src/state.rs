use std::sync::Arc;

use pipescout_core::ExecutionService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ExecutionService>,
    pub heartbeat_secs: u64,
}

impl AppState {
    pub fn new(service: ExecutionService, heartbeat_secs: u64) -> Self {
        Self {
            service: Arc::new(service),
            heartbeat_secs,
        }
    }
}
