use serde::{
    Deserialize,
    Serialize,
};

/// Credential field type for schema-based account forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialFieldType {
    /// Single-line text input
    Text,
    /// Absolute URL
    Url,
    /// Secret input (hidden)
    Password,
}

/// A single field of a credential payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialField {
    /// Key inside the JSON credential payload
    pub key: String,
    /// Human-readable label
    pub label: String,
    /// Field description/help text
    pub description: Option<String>,
    pub field_type: CredentialFieldType,
    pub required: bool,
}

/// Shape of the credential payload a plugin expects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialSchema {
    /// Credential record type the plugin selects from an account
    pub credential_type: String,
    pub fields: Vec<CredentialField>,
}

impl CredentialSchema {
    pub fn new(credential_type: impl Into<String>) -> Self {
        Self {
            credential_type: credential_type.into(),
            fields: Vec::new(),
        }
    }

    pub fn add_field(mut self, field: CredentialField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.key.as_str())
    }
}

/// Describes one attribute a plugin attaches to the assets it reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetAttributeDescriptor {
    pub key: String,
    pub label: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetDescriptors {
    pub attributes_descriptors: Vec<AssetAttributeDescriptor>,
}
