//! Jenkins API client

use std::time::Duration;

use async_trait::async_trait;
use pipescout_plugin_api::{
    PluginError,
    PluginResult,
};
use reqwest::header::{
    HeaderMap,
    HeaderValue,
    AUTHORIZATION,
};
use reqwest::{
    Client,
    StatusCode,
};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;

use crate::config::{
    self,
    JenkinsCredentials,
};
use crate::server::JobServer;
use crate::types::{
    self,
    JobRef,
};

/// Jenkins REST client bound to one authenticated session
pub struct JenkinsClient {
    client: Client,
    server_url: String,
}

impl JenkinsClient {
    /// Builds an HTTP client with basic auth for the given credentials.
    ///
    /// No request is sent; call [`JenkinsClient::authenticate`] or use
    /// [`JenkinsClient::connect`] to perform the handshake.
    pub fn new(credentials: &JenkinsCredentials) -> PluginResult<Self> {
        // reqwest is built without a bundled crypto provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        let auth_value = format!(
            "{}:{}",
            credentials.user_id,
            credentials.token.expose_secret()
        );
        let auth_header = format!(
            "Basic {}",
            base64::Engine::encode(
                &base64::engine::general_purpose::STANDARD,
                auth_value.as_bytes()
            )
        );

        let mut auth = HeaderValue::from_str(&auth_header)
            .map_err(|e| PluginError::CredentialDecoding(format!("Invalid auth format: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| PluginError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            server_url: credentials.url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds a client and verifies the server accepts the credentials
    pub async fn connect(credentials: &JenkinsCredentials) -> PluginResult<Self> {
        let client = Self::new(credentials)?;
        client.authenticate().await?;
        Ok(client)
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Performs the session handshake against the server root
    pub async fn authenticate(&self) -> PluginResult<()> {
        let url = format!("{}/api/json", self.server_url);
        tracing::debug!("Authenticating against {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PluginError::AuthenticationFailed(format!("Failed to connect: {e}")))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
                PluginError::AuthenticationFailed("Invalid Jenkins credentials".to_string()),
            ),
            status => Err(PluginError::AuthenticationFailed(format!(
                "Unexpected status from {url}: {status}"
            ))),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> PluginResult<T> {
        tracing::debug!("Jenkins request: GET {url}");

        let response = self
            .client
            .get(format!("{url}?tree={}", urlencoding::encode(types::JOB_TREE)))
            .send()
            .await
            .map_err(|e| PluginError::JobFetch(format!("Failed to fetch {url}: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PluginError::JobFetch(format!("Failed to read {url}: {e}")))?;

        tracing::trace!("Jenkins response from {url}: {status} {body}");

        if !status.is_success() {
            return Err(PluginError::JobFetch(format!("HTTP {status} from {url}")));
        }

        serde_json::from_str(&body)
            .map_err(|e| PluginError::JobFetch(format!("Failed to parse {url}: {e}")))
    }

    fn job_url(&self, path: &[String]) -> String {
        format!(
            "{}/{}/api/json",
            self.server_url,
            config::encode_job_path(path)
        )
    }
}

#[async_trait]
impl JobServer for JenkinsClient {
    fn base_url(&self) -> &str {
        &self.server_url
    }

    async fn list_top_level_jobs(&self) -> PluginResult<Vec<JobRef>> {
        let url = format!("{}/api/json", self.server_url);
        let response: types::JobsResponse = self.get_json(&url).await?;

        Ok(response.jobs.into_iter().map(|job| job.under(&[])).collect())
    }

    async fn list_child_jobs(&self, folder: &JobRef) -> PluginResult<Vec<JobRef>> {
        let url = self.job_url(&folder.path);
        let response: types::JobsResponse = self.get_json(&url).await?;

        Ok(response
            .jobs
            .into_iter()
            .map(|job| job.under(&folder.path))
            .collect())
    }

    async fn fetch_job_by_path(&self, job_id: &str, ancestors: &[String]) -> PluginResult<JobRef> {
        // Ids decoded from job URLs arrive percent-encoded
        let path: Vec<String> = ancestors
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(job_id))
            .map(|segment| {
                urlencoding::decode(segment)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| segment.to_string())
            })
            .collect();

        let url = self.job_url(&path);
        let mut job: JobRef = self.get_json(&url).await?;
        job.path = path;

        Ok(job)
    }
}
