use serde::{
    Deserialize,
    Serialize,
};

/// Role a plugin can play for an asset type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Master,
    Decorator,
    Analyser,
    Aggregator,
    Assessor,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Master => write!(f, "master"),
            Self::Decorator => write!(f, "decorator"),
            Self::Analyser => write!(f, "analyser"),
            Self::Aggregator => write!(f, "aggregator"),
            Self::Assessor => write!(f, "assessor"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "master" => Ok(Self::Master),
            "decorator" => Ok(Self::Decorator),
            "analyser" | "analyzer" => Ok(Self::Analyser),
            "aggregator" => Ok(Self::Aggregator),
            "assessor" => Ok(Self::Assessor),
            _ => Err(format!(
                "Unknown role: {s}. Valid options: master, decorator, analyser, aggregator, assessor"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRole {
    pub asset_type: String,
    pub role: Role,
}

/// One stored credential record of an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCredential {
    #[serde(rename = "type")]
    pub credential_type: String,
    /// Raw credential payload, decoded by the plugin
    pub credentials: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub uuid: String,
    #[serde(default)]
    pub account_credential: Vec<AccountCredential>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub account: Account,
    #[serde(default)]
    pub asset_identifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_info: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCheckRequest {
    pub account: Account,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthResult {
    Success,
    CredentialsMissing,
    AuthenticationFailure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCheckResult {
    pub result: AuthResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterAsset {
    #[serde(rename = "type")]
    pub asset_type: String,
    pub sub_type: String,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterResponse {
    pub asset: MasterAsset,
}
