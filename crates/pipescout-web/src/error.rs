use axum::{
    http::StatusCode,
    response::{
        IntoResponse,
        Response,
    },
    Json,
};
use pipescout_plugin_api::PluginError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

pub struct AppError {
    pub status: StatusCode,
    pub error: ApiError,
}

impl AppError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ApiError::new(code, message),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PluginError> for AppError {
    fn from(err: PluginError) -> Self {
        let (status, code) = match &err {
            PluginError::MissingCredentials(_) => (StatusCode::BAD_REQUEST, "MISSING_CREDENTIALS"),
            PluginError::CredentialDecoding(_) => {
                (StatusCode::BAD_REQUEST, "CREDENTIAL_DECODING_ERROR")
            }
            PluginError::AuthenticationFailed(_) => {
                (StatusCode::UNAUTHORIZED, "AUTHENTICATION_FAILURE")
            }
            PluginError::InvalidAssetIdentifier(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_ASSET_IDENTIFIER")
            }
            PluginError::JobFetch(_) => (StatusCode::BAD_GATEWAY, "JOB_FETCH_ERROR"),
            PluginError::NotSupported(_) => (StatusCode::NOT_IMPLEMENTED, "NOT_SUPPORTED"),
            PluginError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        Self::new(status, code, err.to_string())
    }
}

pub type ApiResult<T> = Result<T, AppError>;
