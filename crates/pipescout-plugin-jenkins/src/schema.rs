use pipescout_plugin_api::*;

use crate::config::CRED_TYPE_PASSWORD;

pub fn create_credential_schema() -> CredentialSchema {
    CredentialSchema::new(CRED_TYPE_PASSWORD)
        .add_field(CredentialField {
            key: "url".to_string(),
            label: "Jenkins Server URL".to_string(),
            description: Some(
                "Your Jenkins server URL (e.g., https://jenkins.example.com)".to_string(),
            ),
            field_type: CredentialFieldType::Url,
            required: true,
        })
        .add_field(CredentialField {
            key: "userId".to_string(),
            label: "Username".to_string(),
            description: Some("Your Jenkins username".to_string()),
            field_type: CredentialFieldType::Text,
            required: true,
        })
        .add_field(CredentialField {
            key: "token".to_string(),
            label: "API Token".to_string(),
            description: Some("Jenkins API token (not your password)".to_string()),
            field_type: CredentialFieldType::Password,
            required: true,
        })
}

// Pipeline assets carry no attributes beyond their identifier
pub fn create_asset_descriptors() -> AssetDescriptors {
    AssetDescriptors {
        attributes_descriptors: Vec::new(),
    }
}
