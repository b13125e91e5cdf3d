//! Dispatch of plugin operations with bounded concurrency

use std::sync::Arc;

use pipescout_plugin_api::{
    AssetDescriptors,
    AuthCheckRequest,
    AuthCheckResult,
    ExecuteRequest,
    MasterResponse,
    Plugin,
    PluginError,
    PluginManifest,
    PluginRegistry,
    PluginResult,
    RequestContext,
    Role,
};
use tokio::sync::Semaphore;

use crate::config::PipescoutConfig;
use crate::plugins;

/// Result of an execute call, by role
#[derive(Debug)]
pub enum ExecuteOutcome {
    Master(Vec<MasterResponse>),
    Other(serde_json::Value),
}

/// Routes requests to registered plugins
///
/// Execute calls hold a worker permit for their whole duration, so at most
/// `service.workerpool_size` run at once. Each call gets its own
/// `RequestContext` and its own CI session.
pub struct ExecutionService {
    registry: Arc<PluginRegistry>,
    workers: Arc<Semaphore>,
    workerpool_size: usize,
}

impl ExecutionService {
    pub fn new(registry: PluginRegistry, workerpool_size: usize) -> Self {
        let workerpool_size = workerpool_size.max(1);
        Self {
            registry: Arc::new(registry),
            workers: Arc::new(Semaphore::new(workerpool_size)),
            workerpool_size,
        }
    }

    pub fn from_config(config: &PipescoutConfig) -> Self {
        Self::new(
            plugins::create_plugin_registry(config),
            config.service.workerpool_size,
        )
    }

    pub fn workerpool_size(&self) -> usize {
        self.workerpool_size
    }

    pub fn manifests(&self) -> Vec<PluginManifest> {
        plugins::get_all_plugin_manifests(&self.registry)
    }

    pub fn plugin(&self, name: &str) -> PluginResult<Arc<dyn Plugin>> {
        self.registry
            .get(name)
            .ok_or_else(|| PluginError::NotSupported(format!("Unknown plugin: {name}")))
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.registry.is_registered(name)
    }

    pub fn manifest(&self, name: &str) -> PluginResult<PluginManifest> {
        Ok(self.plugin(name)?.manifest().clone())
    }

    pub fn asset_descriptors(&self, name: &str) -> PluginResult<AssetDescriptors> {
        Ok(self.plugin(name)?.asset_descriptors())
    }

    pub async fn validate_authentication(
        &self, name: &str, request: &AuthCheckRequest,
    ) -> PluginResult<AuthCheckResult> {
        let plugin = self.plugin(name)?;
        tracing::debug!(plugin = name, account = %request.account.uuid, "Validating authentication");
        Ok(plugin.validate_authentication(request).await)
    }

    pub async fn execute(
        &self, name: &str, role: Role, request: ExecuteRequest,
    ) -> PluginResult<ExecuteOutcome> {
        let plugin = self.plugin(name)?;
        let ctx = RequestContext::from_tracking_info(request.tracking_info.as_ref());

        let _permit = self
            .workers
            .acquire()
            .await
            .map_err(|e| PluginError::Internal(format!("Worker pool closed: {e}")))?;

        tracing::info!(
            plugin = name,
            %role,
            request_id = ctx.request_id(),
            "Executing request"
        );

        match role {
            Role::Master => plugin
                .execute_master(&ctx, request)
                .await
                .map(ExecuteOutcome::Master),
            Role::Decorator => plugin
                .execute_decorator(&ctx, request)
                .await
                .map(ExecuteOutcome::Other),
            Role::Analyser => plugin
                .execute_analyser(&ctx, request)
                .await
                .map(ExecuteOutcome::Other),
            Role::Aggregator => plugin
                .execute_aggregator(&ctx, request)
                .await
                .map(ExecuteOutcome::Other),
            Role::Assessor => plugin
                .execute_assessor(&ctx, request)
                .await
                .map(ExecuteOutcome::Other),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{
        AtomicUsize,
        Ordering,
    };
    use std::time::Duration;

    use async_trait::async_trait;
    use pipescout_plugin_api::{
        Account,
        AssetRole,
        AuthResult,
        CredentialSchema,
        MasterAsset,
    };

    use super::*;

    struct SlowPlugin {
        manifest: PluginManifest,
        running: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Plugin for SlowPlugin {
        fn manifest(&self) -> &PluginManifest {
            &self.manifest
        }

        async fn validate_authentication(&self, _request: &AuthCheckRequest) -> AuthCheckResult {
            AuthCheckResult {
                result: AuthResult::Success,
            }
        }

        async fn execute_master(
            &self, ctx: &RequestContext, _request: ExecuteRequest,
        ) -> PluginResult<Vec<MasterResponse>> {
            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.running.fetch_sub(1, Ordering::SeqCst);

            Ok(vec![MasterResponse {
                asset: MasterAsset {
                    asset_type: "PIPELINE".to_string(),
                    sub_type: "test".to_string(),
                    identifier: ctx.request_id().to_string(),
                },
            }])
        }
    }

    fn service(workers: usize) -> (ExecutionService, Arc<AtomicUsize>) {
        let peak = Arc::new(AtomicUsize::new(0));
        let mut registry = PluginRegistry::new();
        registry.register(Box::new(SlowPlugin {
            manifest: PluginManifest {
                uuid: "test".to_string(),
                name: "Slow".to_string(),
                version: "0.0.1".to_string(),
                asset_roles: vec![AssetRole {
                    asset_type: "PIPELINE".to_string(),
                    role: Role::Master,
                }],
                credential_schema: CredentialSchema::new("password"),
            },
            running: Arc::new(AtomicUsize::new(0)),
            peak: peak.clone(),
        }));
        (ExecutionService::new(registry, workers), peak)
    }

    fn request(request_id: &str) -> ExecuteRequest {
        ExecuteRequest {
            account: Account {
                uuid: "acc".to_string(),
                account_credential: Vec::new(),
            },
            asset_identifiers: Vec::new(),
            tracking_info: Some(serde_json::json!({ "ch-request-id": request_id })),
        }
    }

    #[tokio::test]
    async fn test_execute_master_passes_request_context() {
        let (service, _) = service(1);
        let outcome = service
            .execute("Slow", Role::Master, request("req-9"))
            .await
            .unwrap();

        match outcome {
            ExecuteOutcome::Master(responses) => {
                assert_eq!(responses[0].asset.identifier, "req-9");
            }
            ExecuteOutcome::Other(_) => panic!("expected master outcome"),
        }
    }

    #[tokio::test]
    async fn test_worker_pool_bounds_concurrency() {
        let (service, peak) = service(2);
        let service = Arc::new(service);

        let handles: Vec<_> = (0..6)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .execute("Slow", Role::Master, request(&format!("req-{i}")))
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_unknown_plugin_and_unsupported_role() {
        let (service, _) = service(1);

        let err = service
            .execute("Missing", Role::Master, request("r"))
            .await
            .unwrap_err();
        assert!(matches!(err, PluginError::NotSupported(_)));

        let err = service
            .execute("Slow", Role::Assessor, request("r"))
            .await
            .unwrap_err();
        assert!(matches!(err, PluginError::NotSupported(_)));
    }

    #[test]
    fn test_from_config_registers_jenkins() {
        let service = ExecutionService::from_config(&PipescoutConfig::default());
        assert!(service.has_plugin("JenkinsMaster"));
        assert_eq!(service.workerpool_size(), 3);
        assert_eq!(service.manifests().len(), 1);
    }
}
