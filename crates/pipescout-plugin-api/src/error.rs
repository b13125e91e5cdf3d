use thiserror::Error;

/// Plugin error types
///
/// Every variant is terminal for the call that produced it. The transport
/// layer decides how each kind is surfaced to its own callers.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Credential decoding error: {0}")]
    CredentialDecoding(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid asset identifier: {0}")]
    InvalidAssetIdentifier(String),

    #[error("Job fetch error: {0}")]
    JobFetch(String),

    #[error("Operation not supported: {0}")]
    NotSupported(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PluginResult<T> = Result<T, PluginError>;

// Credential payloads are the only JSON a plugin decodes from its caller
impl From<serde_json::Error> for PluginError {
    fn from(err: serde_json::Error) -> Self {
        PluginError::CredentialDecoding(err.to_string())
    }
}
