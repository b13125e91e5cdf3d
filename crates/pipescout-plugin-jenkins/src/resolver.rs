//! Decoding of job URLs into job paths

use pipescout_plugin_api::{
    PluginError,
    PluginResult,
};
use url::Url;

use crate::config::FOLDER_NAV_SEGMENT;

/// Location of a job below the server base URL
///
/// The last segment is the job id; the segments before it are the ancestor
/// folder ids, root first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPath {
    segments: Vec<String>,
}

impl JobPath {
    pub fn job_id(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn ancestors(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, ancestors)) => ancestors,
            None => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

/// Decomposes `asset_url` relative to `base_url` into a job path.
///
/// Everything up to the last occurrence of `base_url` is dropped, then the
/// remainder is split on `/`, skipping empty and `job` segments. A remainder
/// with no segments yields an empty path rather than an error; callers decide
/// whether that is acceptable.
pub fn resolve(base_url: &str, asset_url: &str) -> PluginResult<JobPath> {
    if asset_url.is_empty() || !asset_url.contains('/') {
        tracing::error!("Asset identifier is empty or invalid: {asset_url:?}");
        return Err(PluginError::InvalidAssetIdentifier(format!(
            "asset identifier is empty or invalid: {asset_url:?}"
        )));
    }

    if let Err(e) = Url::parse(asset_url) {
        tracing::error!("Unable to parse job URL from asset identifier {asset_url}: {e}");
        return Err(PluginError::InvalidAssetIdentifier(format!(
            "{asset_url} is not an absolute URL: {e}"
        )));
    }

    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    tracing::trace!("Base URL: {base}");
    tracing::trace!("Asset URL: {asset_url}");

    let remainder = match asset_url.rfind(base) {
        Some(pos) => &asset_url[pos + base.len()..],
        None => asset_url,
    };

    let segments: Vec<String> = remainder
        .split('/')
        .filter(|s| !s.is_empty() && *s != FOLDER_NAV_SEGMENT)
        .map(str::to_string)
        .collect();

    let path = JobPath { segments };
    tracing::debug!(
        "Job id = {:?}, parent count = {} for asset {asset_url}",
        path.job_id().unwrap_or_default(),
        path.ancestors().len()
    );

    Ok(path)
}
