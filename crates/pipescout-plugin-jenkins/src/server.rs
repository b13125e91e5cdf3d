use async_trait::async_trait;
use pipescout_plugin_api::PluginResult;

use crate::types::JobRef;

/// Read access to a Jenkins-compatible job tree
///
/// Implementations are bound to one authenticated session. Discovery calls
/// these one at a time and stops at the first error.
#[async_trait]
pub trait JobServer: Send + Sync {
    /// Base URL the session was opened against
    fn base_url(&self) -> &str;

    async fn list_top_level_jobs(&self) -> PluginResult<Vec<JobRef>>;

    async fn list_child_jobs(&self, folder: &JobRef) -> PluginResult<Vec<JobRef>>;

    async fn fetch_job_by_path(&self, job_id: &str, ancestors: &[String]) -> PluginResult<JobRef>;
}
