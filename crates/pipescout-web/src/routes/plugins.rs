use axum::{
    extract::{
        Path,
        State,
    },
    response::{
        IntoResponse,
        Response,
    },
    routing::{
        get,
        post,
    },
    Json,
    Router,
};
use pipescout_core::service::ExecuteOutcome;
use pipescout_plugin_api::{
    AssetDescriptors,
    AuthCheckRequest,
    AuthCheckResult,
    ExecuteRequest,
    PluginManifest,
    Role,
};

use crate::error::{
    ApiResult,
    AppError,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/plugins", get(list_plugins))
        .route("/plugins/{name}/manifest", get(get_manifest))
        .route("/plugins/{name}/asset-descriptors", get(get_asset_descriptors))
        .route("/plugins/{name}/auth/validate", post(validate_authentication))
        .route("/plugins/{name}/execute/{role}", post(execute))
}

fn ensure_plugin(state: &AppState, name: &str) -> ApiResult<()> {
    if state.service.has_plugin(name) {
        Ok(())
    } else {
        Err(AppError::not_found(format!("Plugin not found: {name}")))
    }
}

async fn list_plugins(State(state): State<AppState>) -> Json<Vec<PluginManifest>> {
    Json(state.service.manifests())
}

async fn get_manifest(
    State(state): State<AppState>, Path(name): Path<String>,
) -> ApiResult<Json<PluginManifest>> {
    ensure_plugin(&state, &name)?;
    Ok(Json(state.service.manifest(&name)?))
}

async fn get_asset_descriptors(
    State(state): State<AppState>, Path(name): Path<String>,
) -> ApiResult<Json<AssetDescriptors>> {
    ensure_plugin(&state, &name)?;
    Ok(Json(state.service.asset_descriptors(&name)?))
}

async fn validate_authentication(
    State(state): State<AppState>, Path(name): Path<String>,
    Json(request): Json<AuthCheckRequest>,
) -> ApiResult<Json<AuthCheckResult>> {
    ensure_plugin(&state, &name)?;
    let result = state
        .service
        .validate_authentication(&name, &request)
        .await?;
    Ok(Json(result))
}

async fn execute(
    State(state): State<AppState>, Path((name, role)): Path<(String, String)>,
    Json(request): Json<ExecuteRequest>,
) -> ApiResult<Response> {
    ensure_plugin(&state, &name)?;
    let role: Role = role.parse().map_err(AppError::bad_request)?;

    let outcome = state.service.execute(&name, role, request).await.map_err(|e| {
        tracing::warn!(plugin = %name, %role, error = %e, "Execute failed");
        AppError::from(e)
    })?;

    Ok(match outcome {
        ExecuteOutcome::Master(assets) => Json(assets).into_response(),
        ExecuteOutcome::Other(value) => Json(value).into_response(),
    })
}
