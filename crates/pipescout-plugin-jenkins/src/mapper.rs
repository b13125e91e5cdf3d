//! Asset record mapping

use pipescout_plugin_api::{
    MasterAsset,
    MasterResponse,
};

use crate::types::JobRef;

pub(crate) const ASSET_TYPE_PIPELINE: &str = "PIPELINE";
pub(crate) const ASSET_SUB_TYPE: &str = "cbci";

/// Converts a discovered pipeline job into its asset record
pub(crate) fn job_to_asset(job: &JobRef) -> MasterAsset {
    MasterAsset {
        asset_type: ASSET_TYPE_PIPELINE.to_string(),
        sub_type: ASSET_SUB_TYPE.to_string(),
        identifier: job.url.clone(),
    }
}

pub(crate) fn asset_to_master_response(asset: MasterAsset) -> MasterResponse {
    MasterResponse { asset }
}
