use pipescout_plugin_api::{
    Account,
    AccountCredential,
    ExecuteRequest,
    PluginError,
    PluginResult,
};
use secrecy::SecretString;
use serde::Deserialize;

/// Credential record type this plugin reads from an account
pub(crate) const CRED_TYPE_PASSWORD: &str = "password";

/// Path segment Jenkins uses to navigate into a job or folder
pub(crate) const FOLDER_NAV_SEGMENT: &str = "job";

/// Separator between asset identifiers in a demo filter
const DEMO_ASSET_SEPARATOR: &str = ",,,";

#[derive(Deserialize)]
struct RawCredentials {
    url: String,
    #[serde(rename = "userId")]
    user_id: String,
    token: String,
}

/// Decoded Jenkins credentials
#[derive(Debug)]
pub struct JenkinsCredentials {
    pub url: String,
    pub user_id: String,
    pub token: SecretString,
}

impl JenkinsCredentials {
    /// Decodes the JSON payload of a password credential record
    pub fn from_payload(payload: &str) -> PluginResult<Self> {
        let raw: RawCredentials = serde_json::from_str(payload)?;
        Ok(Self {
            url: raw.url,
            user_id: raw.user_id,
            token: SecretString::from(raw.token),
        })
    }

    /// Finds the account's password credential and decodes it
    pub fn from_account(account: &Account) -> PluginResult<Self> {
        let record = find_password_credential(account)?;
        Self::from_payload(&record.credentials)
    }
}

pub(crate) fn find_password_credential(account: &Account) -> PluginResult<&AccountCredential> {
    account
        .account_credential
        .iter()
        .find(|c| c.credential_type == CRED_TYPE_PASSWORD)
        .ok_or_else(|| {
            PluginError::MissingCredentials(format!(
                "no usable credentials found for account {}",
                account.uuid
            ))
        })
}

/// Replaces the requested assets of one account with a fixed list
#[derive(Debug, Clone, Default)]
pub struct DemoFilter {
    account_uuid: String,
    asset_identifiers: Vec<String>,
}

impl DemoFilter {
    /// `assets` holds identifiers separated by `,,,`
    pub fn new(account_uuid: impl Into<String>, assets: &str) -> Self {
        Self {
            account_uuid: account_uuid.into(),
            asset_identifiers: assets
                .split(DEMO_ASSET_SEPARATOR)
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.account_uuid.is_empty()
    }

    /// Returns true when the request's identifiers were replaced
    pub fn apply(&self, request: &mut ExecuteRequest) -> bool {
        if !self.is_enabled() || self.account_uuid != request.account.uuid {
            return false;
        }
        request.asset_identifiers = self.asset_identifiers.clone();
        true
    }
}

/// Builds the `job/a/job/b` server path for a chain of job names
pub(crate) fn encode_job_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| format!("{FOLDER_NAV_SEGMENT}/{}", urlencoding::encode(s.as_ref())))
        .collect::<Vec<_>>()
        .join("/")
}
