use pipescout_plugin_api::{
    MasterAsset,
    PluginError,
    PluginResult,
};
use url::Url;

use crate::mapper;
use crate::resolver;
use crate::server::JobServer;
use crate::types::JobRef;
use crate::walker;

/// What a discovery call should look at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryRequest {
    /// Every job reachable from the top-level listing
    AllJobs,
    /// Only the jobs named by these URLs, in this order
    Specific(Vec<String>),
}

impl DiscoveryRequest {
    pub fn from_identifiers(identifiers: Vec<String>) -> Self {
        if identifiers.is_empty() {
            Self::AllJobs
        } else {
            Self::Specific(identifiers)
        }
    }
}

/// Runs one discovery call and returns the pipeline assets found.
///
/// Fetches are issued one at a time. The first error ends the call and no
/// partial results are returned. Assets keep discovery order and are not
/// deduplicated.
pub async fn discover<S>(server: &S, request: &DiscoveryRequest) -> PluginResult<Vec<MasterAsset>>
where
    S: JobServer + ?Sized,
{
    let roots = match request {
        DiscoveryRequest::AllJobs => {
            let jobs = server.list_top_level_jobs().await?;
            tracing::debug!("Top-level listing passed. {} jobs found", jobs.len());
            jobs
        }
        DiscoveryRequest::Specific(identifiers) => {
            let jobs = selected_jobs(server, identifiers).await?;
            tracing::debug!("Selected jobs fetched. {} jobs found", jobs.len());
            jobs
        }
    };

    let mut assets = Vec::new();
    for root in roots {
        let pipelines = walker::collect_pipelines(server, root).await?;
        assets.extend(pipelines.iter().map(mapper::job_to_asset));
    }

    tracing::debug!("Discovered {} pipeline assets", assets.len());
    Ok(assets)
}

async fn selected_jobs<S>(server: &S, identifiers: &[String]) -> PluginResult<Vec<JobRef>>
where
    S: JobServer + ?Sized,
{
    let base_url = server.base_url();
    Url::parse(base_url).map_err(|e| {
        tracing::error!("Not able to parse base Jenkins URL {base_url}: {e}");
        PluginError::InvalidAssetIdentifier(format!("invalid server URL {base_url}: {e}"))
    })?;

    let mut jobs = Vec::with_capacity(identifiers.len());
    for identifier in identifiers {
        let path = resolver::resolve(base_url, identifier)?;
        let job_id = match path.job_id() {
            Some(id) if !id.is_empty() => id,
            _ => {
                return Err(PluginError::InvalidAssetIdentifier(format!(
                    "no valid Jenkins job name found for asset {identifier}"
                )))
            }
        };

        jobs.push(server.fetch_job_by_path(job_id, path.ancestors()).await?);
    }

    Ok(jobs)
}
