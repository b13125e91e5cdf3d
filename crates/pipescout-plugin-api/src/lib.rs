pub mod context;
pub mod error;
pub mod plugin;
pub mod registry;
pub mod schema;
pub mod types;

pub use context::RequestContext;
pub use error::{
    PluginError,
    PluginResult,
};
pub use plugin::{
    Plugin,
    PluginManifest,
};
pub use registry::PluginRegistry;
pub use schema::{
    AssetAttributeDescriptor,
    AssetDescriptors,
    CredentialField,
    CredentialFieldType,
    CredentialSchema,
};
pub use types::{
    Account,
    AccountCredential,
    AssetRole,
    AuthCheckRequest,
    AuthCheckResult,
    AuthResult,
    ExecuteRequest,
    MasterAsset,
    MasterResponse,
    Role,
};

#[macro_export]
macro_rules! register_plugin {
    ($plugin_type:ty) => {
        pub fn register(registry: &mut $crate::PluginRegistry) {
            registry.register(Box::new(<$plugin_type>::default()));
        }
    };
}
