use pipescout_plugin_api::{
    PluginManifest,
    PluginRegistry,
};
use pipescout_plugin_jenkins::{
    DemoFilter,
    JenkinsMasterPlugin,
};

use crate::config::PipescoutConfig;

pub fn create_plugin_registry(config: &PipescoutConfig) -> PluginRegistry {
    let mut registry = PluginRegistry::new();

    let demo_filter = DemoFilter::new(
        config.demo.account_filter.clone(),
        &config.demo.asset_filter,
    );
    if demo_filter.is_enabled() {
        tracing::info!(
            "Demo asset filter enabled for account {}",
            config.demo.account_filter
        );
        registry.register(Box::new(
            JenkinsMasterPlugin::new().with_demo_filter(demo_filter),
        ));
    } else {
        pipescout_plugin_jenkins::register(&mut registry);
    }

    registry
}

pub fn get_all_plugin_manifests(registry: &PluginRegistry) -> Vec<PluginManifest> {
    registry
        .names()
        .iter()
        .filter_map(|name| registry.get(name))
        .map(|p| p.manifest().clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contains_jenkins_master() {
        let registry = create_plugin_registry(&PipescoutConfig::default());
        assert!(registry.is_registered("JenkinsMaster"));

        let manifests = get_all_plugin_manifests(&registry);
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].uuid, "524bf8d1-65bc-497c-8356-34fd63b96afd");
    }
}
