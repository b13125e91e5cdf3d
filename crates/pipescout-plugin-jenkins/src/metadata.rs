use pipescout_plugin_api::*;

use crate::mapper::ASSET_TYPE_PIPELINE;
use crate::schema;

pub(crate) const PLUGIN_UUID: &str = "524bf8d1-65bc-497c-8356-34fd63b96afd";
pub(crate) const PLUGIN_NAME: &str = "JenkinsMaster";

pub fn create_manifest() -> PluginManifest {
    PluginManifest {
        uuid: PLUGIN_UUID.to_string(),
        name: PLUGIN_NAME.to_string(),
        version: "0.0.1".to_string(),
        asset_roles: vec![AssetRole {
            asset_type: ASSET_TYPE_PIPELINE.to_string(),
            role: Role::Master,
        }],
        credential_schema: schema::create_credential_schema(),
    }
}
