use pipescout_plugin_api::PluginResult;

use crate::classify::JobKind;
use crate::server::JobServer;
use crate::types::JobRef;

/// Collects every pipeline at or below `root`.
///
/// Folders are expanded depth-first with an explicit stack; pipelines come
/// out in the order the server lists them. `Other` jobs are dropped without
/// looking at their children. The first failed listing aborts the walk and
/// nothing collected so far is returned.
pub async fn collect_pipelines<S>(server: &S, root: JobRef) -> PluginResult<Vec<JobRef>>
where
    S: JobServer + ?Sized,
{
    let mut pipelines = Vec::new();
    let mut stack = vec![root];

    while let Some(job) = stack.pop() {
        match job.kind() {
            JobKind::Pipeline => pipelines.push(job),
            JobKind::Folder => {
                let children = server.list_child_jobs(&job).await?;
                tracing::trace!("Folder {} has {} jobs", job.name, children.len());
                stack.extend(children.into_iter().rev());
            }
            JobKind::Other => {
                tracing::trace!("Skipping {} ({})", job.name, job.class);
            }
        }
    }

    Ok(pipelines)
}
