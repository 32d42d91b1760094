//! Resource group model and trait implementations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Response;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api_version;
use crate::client::ArmClient;
use crate::endpoint::ResourcePath;
use crate::error::Result;
use crate::models::scope::GroupRef;
use crate::traits::{CreateOrUpdate, Delete, Get, List};

/// A resource group.
///
/// Groups are the containers nearly every other resource lives in; deleting
/// a group deletes its contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    pub id: String,
    pub name: String,
    pub location: String,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    #[serde(default)]
    pub properties: Option<ResourceGroupProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupProperties {
    #[serde(default)]
    pub provisioning_state: Option<String>,
}

impl ResourceGroup {
    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
    }
}

/// Desired state of a resource group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceGroupParams {
    pub location: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl ResourceGroupParams {
    pub fn new(location: &str) -> Self {
        Self {
            location: location.to_string(),
            tags: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_string(), value.to_string());
        self
    }
}

/// Any resource, as returned by the group-wide resource listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericResource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Body of the export-template action.
#[derive(Debug, Clone, Serialize)]
struct ExportTemplateRequest {
    resources: Vec<String>,
    options: String,
}

#[async_trait]
impl Get for ResourceGroup {
    type Id = GroupRef;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ArmClient, group: GroupRef) -> Result<Self> {
        let url = client.url(&group.path()?, api_version::RESOURCES)?;
        client.get_resource(url).await
    }
}

#[async_trait]
impl List for ResourceGroup {
    type Scope = String; // Subscription id

    fn list_url(client: &ArmClient, subscription_id: &String) -> Result<Url> {
        let path = ResourcePath::subscription(subscription_id)?.child("resourceGroups");
        client.url(&path, api_version::RESOURCES)
    }
}

#[async_trait]
impl CreateOrUpdate for ResourceGroup {
    type Params = ResourceGroupParams;

    #[tracing::instrument(skip(client))]
    async fn create_or_update(
        client: &ArmClient,
        group: GroupRef,
        params: &ResourceGroupParams,
    ) -> Result<Response> {
        let url = client.url(&group.path()?, api_version::RESOURCES)?;
        client.put(url, params).await
    }
}

#[async_trait]
impl Delete for ResourceGroup {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &ArmClient, group: GroupRef) -> Result<Response> {
        let url = client.url(&group.path()?, api_version::RESOURCES)?;
        client.delete(url).await
    }
}

/// Capture the group's resources as a template.
///
/// Returns the raw response; 200 carries `{"template": ...}`, 202 means the
/// export is still running.
#[tracing::instrument(skip(client))]
pub async fn export_template(client: &ArmClient, group: &GroupRef) -> Result<Response> {
    let path = group.path()?.child("exportTemplate");
    let url = client.url(&path, api_version::RESOURCES)?;
    let body = ExportTemplateRequest {
        resources: vec!["*".to_string()],
        options: "IncludeParameterDefaultValue".to_string(),
    };
    client.post(url, &body).await
}

/// List every resource in a group, whatever its provider.
#[tracing::instrument(skip(client))]
pub async fn list_resources(client: &ArmClient, group: &GroupRef) -> Result<Vec<GenericResource>> {
    let path = group.path()?.child("resources");
    let url = client.url(&path, api_version::RESOURCES)?;
    client.list_resources(url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_group_deserialize() {
        let json = r#"{
            "id": "/subscriptions/sub/resourceGroups/web",
            "name": "web",
            "location": "westeurope",
            "properties": {"provisioningState": "Succeeded"}
        }"#;
        let group: ResourceGroup = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(group.name, "web");
        assert_eq!(group.provisioning_state(), Some("Succeeded"));
        assert!(group.tags.is_empty());
    }

    #[test]
    fn test_params_serialize_skips_empty_tags() {
        let params = ResourceGroupParams::new("westus");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"location": "westus"})
        );

        let params = ResourceGroupParams::new("westus").tag("env", "dev");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"location": "westus", "tags": {"env": "dev"}})
        );
    }

    #[test]
    fn test_generic_resource_type_field() {
        let json = r#"{"id": "/x", "name": "acct", "type": "Microsoft.Storage/storageAccounts", "location": "westus"}"#;
        let res: GenericResource = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(res.resource_type, "Microsoft.Storage/storageAccounts");
    }
}
