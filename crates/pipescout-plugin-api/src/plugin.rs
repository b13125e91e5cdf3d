use async_trait::async_trait;
use serde::{
    Deserialize,
    Serialize,
};

use crate::context::RequestContext;
use crate::error::{
    PluginError,
    PluginResult,
};
use crate::schema::{
    AssetDescriptors,
    CredentialSchema,
};
use crate::types::*;

const UNSUPPORTED_ROLE: &str = "Does not support this role";

/// Plugin manifest - describes the plugin to the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Stable plugin identifier
    pub uuid: String,
    /// Plugin name (e.g., "JenkinsMaster")
    pub name: String,
    /// Plugin version
    pub version: String,
    /// Asset types and the role played for each
    pub asset_roles: Vec<AssetRole>,
    /// Expected credential payload
    pub credential_schema: CredentialSchema,
}

impl PluginManifest {
    pub fn supports(&self, role: Role) -> bool {
        self.asset_roles.iter().any(|r| r.role == role)
    }
}

/// Main plugin trait - every CI integration implements this
///
/// Only `execute_master` carries discovery logic. The remaining roles default
/// to `NotSupported` so a plugin implements just the roles it advertises.
#[async_trait]
pub trait Plugin: Send + Sync {
    fn manifest(&self) -> &PluginManifest;

    /// Describe the attributes attached to reported assets
    fn asset_descriptors(&self) -> AssetDescriptors {
        AssetDescriptors::default()
    }

    /// Check that the account's credentials are present and accepted
    async fn validate_authentication(&self, request: &AuthCheckRequest) -> AuthCheckResult;

    /// Discover the assets this plugin is master for
    async fn execute_master(
        &self, ctx: &RequestContext, request: ExecuteRequest,
    ) -> PluginResult<Vec<MasterResponse>>;

    async fn execute_decorator(
        &self, _ctx: &RequestContext, _request: ExecuteRequest,
    ) -> PluginResult<serde_json::Value> {
        Err(PluginError::NotSupported(UNSUPPORTED_ROLE.to_string()))
    }

    async fn execute_analyser(
        &self, _ctx: &RequestContext, _request: ExecuteRequest,
    ) -> PluginResult<serde_json::Value> {
        Err(PluginError::NotSupported(UNSUPPORTED_ROLE.to_string()))
    }

    async fn execute_aggregator(
        &self, _ctx: &RequestContext, _request: ExecuteRequest,
    ) -> PluginResult<serde_json::Value> {
        Err(PluginError::NotSupported(UNSUPPORTED_ROLE.to_string()))
    }

    async fn execute_assessor(
        &self, _ctx: &RequestContext, _request: ExecuteRequest,
    ) -> PluginResult<serde_json::Value> {
        Err(PluginError::NotSupported(UNSUPPORTED_ROLE.to_string()))
    }

    /// Registry key
    fn name(&self) -> &str {
        &self.manifest().name
    }
}
