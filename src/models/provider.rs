//! Resource provider registrations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api_version;
use crate::client::ArmClient;
use crate::endpoint::ResourcePath;
use crate::error::Result;
use crate::traits::List;

/// A resource provider namespace and the API versions it serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub namespace: String,
    #[serde(default)]
    pub registration_state: Option<String>,
    #[serde(default)]
    pub resource_types: Vec<ProviderResourceType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResourceType {
    pub resource_type: String,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub api_versions: Vec<String>,
}

impl Provider {
    pub fn is_registered(&self) -> bool {
        self.registration_state.as_deref() == Some("Registered")
    }

    /// API versions served for `resource_type`, newest first as reported.
    pub fn api_versions(&self, resource_type: &str) -> &[String] {
        self.resource_types
            .iter()
            .find(|t| t.resource_type.eq_ignore_ascii_case(resource_type))
            .map(|t| t.api_versions.as_slice())
            .unwrap_or_default()
    }
}

#[async_trait]
impl List for Provider {
    type Scope = String; // Subscription id

    fn list_url(client: &ArmClient, subscription_id: &String) -> Result<Url> {
        let path = ResourcePath::subscription(subscription_id)?.child("providers");
        client.url(&path, api_version::RESOURCES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_versions_lookup() {
        let provider: Provider = serde_json::from_value(serde_json::json!({
            "id": "/subscriptions/s/providers/Microsoft.Compute",
            "namespace": "Microsoft.Compute",
            "registrationState": "Registered",
            "resourceTypes": [
                {"resourceType": "virtualMachines", "locations": ["West US"], "apiVersions": ["2017-03-30", "2016-08-30"]}
            ]
        }))
        .expect("Failed to deserialize");

        assert!(provider.is_registered());
        assert_eq!(provider.api_versions("virtualmachines"), ["2017-03-30", "2016-08-30"]);
        assert!(provider.api_versions("disks").is_empty());
    }
}
