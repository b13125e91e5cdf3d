//! Jenkins master plugin for Pipescout
//!
//! Discovers pipeline jobs on a Jenkins server and reports each one as a
//! `PIPELINE` asset:
//! - Enumerate every pipeline reachable from the top-level job listing
//! - Resolve a list of job URLs and report the pipelines they name
//! - Expand folders recursively, never reporting the folders themselves
//!
//! # Architecture
//!
//! The plugin is organized into several modules:
//! - `plugin` - Main plugin implementation
//! - `discovery` - Request handling over a job server
//! - `walker` - Folder expansion
//! - `resolver` - Job URL to job path decoding
//! - `classify` - Job type classification
//! - `server` - Job server capability
//! - `client` - Jenkins REST client implementing the capability
//! - `types` - API response types
//! - `mapper` - Asset record mapping
//! - `config` - Credential parsing and demo filters
//!
//! # Example Usage
//!
//! ```no_run
//! use pipescout_plugin_api::{Plugin, PluginRegistry};
//! use pipescout_plugin_jenkins::JenkinsMasterPlugin;
//!
//! let mut registry = PluginRegistry::new();
//! registry.register(Box::new(JenkinsMasterPlugin::new()));
//! ```

mod classify;
mod client;
mod config;
mod discovery;
mod mapper;
mod metadata;
mod plugin;
mod resolver;
mod schema;
mod server;
#[cfg(test)]
mod testing;
mod types;
mod walker;

pub use classify::JobKind;
pub use client::JenkinsClient;
pub use config::{
    DemoFilter,
    JenkinsCredentials,
};
pub use discovery::{
    discover,
    DiscoveryRequest,
};
pub use plugin::JenkinsMasterPlugin;
pub use resolver::{
    resolve,
    JobPath,
};
pub use server::JobServer;
pub use types::JobRef;
pub use walker::collect_pipelines;

// Register plugin with the registry
pipescout_plugin_api::register_plugin!(JenkinsMasterPlugin);
