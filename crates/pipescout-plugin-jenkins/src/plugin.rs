//! Jenkins master plugin implementation

use async_trait::async_trait;
use pipescout_plugin_api::*;
use tracing::Instrument;

use crate::client::JenkinsClient;
use crate::config::{
    DemoFilter,
    JenkinsCredentials,
};
use crate::discovery::{
    self,
    DiscoveryRequest,
};
use crate::{
    mapper,
    metadata,
    schema,
};

/// Jenkins plugin acting as master for pipeline assets
pub struct JenkinsMasterPlugin {
    manifest: PluginManifest,
    demo_filter: DemoFilter,
}

impl Default for JenkinsMasterPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl JenkinsMasterPlugin {
    pub fn new() -> Self {
        Self {
            manifest: metadata::create_manifest(),
            demo_filter: DemoFilter::default(),
        }
    }

    pub fn with_demo_filter(mut self, demo_filter: DemoFilter) -> Self {
        self.demo_filter = demo_filter;
        self
    }

    async fn run_master(&self, mut request: ExecuteRequest) -> PluginResult<Vec<MasterResponse>> {
        if self.demo_filter.apply(&mut request) {
            tracing::debug!(
                "Demo asset filter applied: {} identifiers",
                request.asset_identifiers.len()
            );
        }

        tracing::debug!("Jenkins master execution started");

        let credentials = JenkinsCredentials::from_account(&request.account).inspect_err(|e| {
            tracing::error!("Unable to read account credentials: {e}");
        })?;

        let client = JenkinsClient::connect(&credentials).await.inspect_err(|e| {
            tracing::error!("Unable to initialise Jenkins client: {e}");
        })?;
        tracing::debug!("Jenkins session established with {}", client.server_url());

        let discovery_request = DiscoveryRequest::from_identifiers(request.asset_identifiers);
        let assets = discovery::discover(&client, &discovery_request)
            .await
            .inspect_err(|e| {
                tracing::error!("Unable to get Jenkins jobs: {e}");
            })?;

        let responses: Vec<MasterResponse> = assets
            .into_iter()
            .map(mapper::asset_to_master_response)
            .collect();

        tracing::debug!("Length of master response: {}", responses.len());
        Ok(responses)
    }
}

#[async_trait]
impl Plugin for JenkinsMasterPlugin {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    fn asset_descriptors(&self) -> AssetDescriptors {
        schema::create_asset_descriptors()
    }

    async fn validate_authentication(&self, request: &AuthCheckRequest) -> AuthCheckResult {
        let result = match JenkinsCredentials::from_account(&request.account) {
            Err(e) => {
                tracing::error!("Unable to read account credentials: {e}");
                AuthResult::CredentialsMissing
            }
            Ok(credentials) => match JenkinsClient::connect(&credentials).await {
                Ok(_) => AuthResult::Success,
                Err(PluginError::CredentialDecoding(e)) => {
                    tracing::error!("Unusable credentials: {e}");
                    AuthResult::CredentialsMissing
                }
                Err(e) => {
                    tracing::error!("Authentication failed: {e}");
                    AuthResult::AuthenticationFailure
                }
            },
        };

        AuthCheckResult { result }
    }

    async fn execute_master(
        &self, ctx: &RequestContext, request: ExecuteRequest,
    ) -> PluginResult<Vec<MasterResponse>> {
        self.run_master(request).instrument(ctx.span()).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{
        method,
        path,
    };
    use wiremock::{
        Mock,
        MockServer,
        ResponseTemplate,
    };

    use super::*;

    fn account(server_url: &str) -> Account {
        Account {
            uuid: "acc-1".to_string(),
            account_credential: vec![AccountCredential {
                credential_type: "password".to_string(),
                credentials: serde_json::json!({
                    "url": server_url,
                    "userId": "bot",
                    "token": "t0ken",
                })
                .to_string(),
            }],
        }
    }

    fn execute_request(server_url: &str, ids: Vec<String>) -> ExecuteRequest {
        ExecuteRequest {
            account: account(server_url),
            asset_identifiers: ids,
            tracking_info: Some(serde_json::json!({ "ch-request-id": "req-1" })),
        }
    }

    async fn mount_json(server: &MockServer, at: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_execute_master_all_jobs() {
        let server = MockServer::start().await;
        let base = server.uri();
        mount_json(
            &server,
            "/api/json",
            serde_json::json!({
                "jobs": [
                    {"_class": "com.cloudbees.hudson.plugins.folder.Folder", "name": "team", "url": format!("{base}/job/team/")},
                    {"_class": "hudson.model.FreeStyleProject", "name": "old", "url": format!("{base}/job/old/")},
                    {"_class": "org.jenkinsci.plugins.workflow.job.WorkflowJob", "name": "deploy", "url": format!("{base}/job/deploy/")}
                ]
            }),
        )
        .await;
        mount_json(
            &server,
            "/job/team/api/json",
            serde_json::json!({
                "jobs": [
                    {"_class": "org.jenkinsci.plugins.workflow.job.WorkflowJob", "name": "api", "url": format!("{base}/job/team/job/api/")}
                ]
            }),
        )
        .await;

        let plugin = JenkinsMasterPlugin::new();
        let ctx = RequestContext::from_tracking_info(None);
        let responses = plugin
            .execute_master(&ctx, execute_request(&base, Vec::new()))
            .await
            .unwrap();

        let ids: Vec<&str> = responses
            .iter()
            .map(|r| r.asset.identifier.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![format!("{base}/job/team/job/api/"), format!("{base}/job/deploy/")]
        );
        assert!(responses
            .iter()
            .all(|r| r.asset.asset_type == "PIPELINE" && r.asset.sub_type == "cbci"));
    }

    #[tokio::test]
    async fn test_execute_master_specific_jobs() {
        let server = MockServer::start().await;
        let base = server.uri();
        mount_json(&server, "/api/json", serde_json::json!({ "jobs": [] })).await;
        mount_json(
            &server,
            "/job/team/job/api/api/json",
            serde_json::json!({
                "_class": "org.jenkinsci.plugins.workflow.job.WorkflowJob",
                "name": "api",
                "url": format!("{base}/job/team/job/api/")
            }),
        )
        .await;

        let plugin = JenkinsMasterPlugin::new();
        let ctx = RequestContext::from_tracking_info(None);
        let responses = plugin
            .execute_master(
                &ctx,
                execute_request(&base, vec![format!("{base}/job/team/job/api/")]),
            )
            .await
            .unwrap();

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].asset.identifier, format!("{base}/job/team/job/api/"));
    }

    #[tokio::test]
    async fn test_execute_master_demo_filter() {
        let server = MockServer::start().await;
        let base = server.uri();
        mount_json(&server, "/api/json", serde_json::json!({ "jobs": [] })).await;

        // The demo filter swaps in an identifier that cannot be resolved
        let plugin = JenkinsMasterPlugin::new().with_demo_filter(DemoFilter::new("acc-1", "not-a-url"));
        let ctx = RequestContext::from_tracking_info(None);
        let result = plugin
            .execute_master(&ctx, execute_request(&base, Vec::new()))
            .await;

        assert!(matches!(result, Err(PluginError::InvalidAssetIdentifier(_))));
    }

    #[tokio::test]
    async fn test_execute_master_without_credentials() {
        let plugin = JenkinsMasterPlugin::new();
        let ctx = RequestContext::from_tracking_info(None);
        let request = ExecuteRequest {
            account: Account {
                uuid: "acc-1".to_string(),
                account_credential: Vec::new(),
            },
            asset_identifiers: Vec::new(),
            tracking_info: None,
        };

        let result = plugin.execute_master(&ctx, request).await;
        assert!(matches!(result, Err(PluginError::MissingCredentials(_))));
    }

    #[tokio::test]
    async fn test_execute_master_rejected_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/json"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let plugin = JenkinsMasterPlugin::new();
        let ctx = RequestContext::from_tracking_info(None);
        let result = plugin
            .execute_master(&ctx, execute_request(&server.uri(), Vec::new()))
            .await;

        assert!(matches!(result, Err(PluginError::AuthenticationFailed(_))));
    }

    #[tokio::test]
    async fn test_validate_authentication() {
        let server = MockServer::start().await;
        mount_json(&server, "/api/json", serde_json::json!({})).await;
        let plugin = JenkinsMasterPlugin::new();

        let ok = plugin
            .validate_authentication(&AuthCheckRequest {
                account: account(&server.uri()),
            })
            .await;
        assert_eq!(ok.result, AuthResult::Success);

        let missing = plugin
            .validate_authentication(&AuthCheckRequest {
                account: Account {
                    uuid: "acc-1".to_string(),
                    account_credential: Vec::new(),
                },
            })
            .await;
        assert_eq!(missing.result, AuthResult::CredentialsMissing);

        let garbled = plugin
            .validate_authentication(&AuthCheckRequest {
                account: Account {
                    uuid: "acc-1".to_string(),
                    account_credential: vec![AccountCredential {
                        credential_type: "password".to_string(),
                        credentials: "not json".to_string(),
                    }],
                },
            })
            .await;
        assert_eq!(garbled.result, AuthResult::CredentialsMissing);
    }

    #[tokio::test]
    async fn test_validate_authentication_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/json"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let plugin = JenkinsMasterPlugin::new();
        let result = plugin
            .validate_authentication(&AuthCheckRequest {
                account: account(&server.uri()),
            })
            .await;
        assert_eq!(result.result, AuthResult::AuthenticationFailure);
    }

    #[tokio::test]
    async fn test_unsupported_roles() {
        let plugin = JenkinsMasterPlugin::new();
        let ctx = RequestContext::from_tracking_info(None);
        let result = plugin
            .execute_analyser(&ctx, execute_request("https://ci", Vec::new()))
            .await;
        assert!(matches!(result, Err(PluginError::NotSupported(_))));
    }

    #[test]
    fn test_asset_descriptors_are_empty() {
        let plugin = JenkinsMasterPlugin::default();
        assert!(plugin.asset_descriptors().attributes_descriptors.is_empty());
        assert_eq!(plugin.name(), "JenkinsMaster");
    }
}
