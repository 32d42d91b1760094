//! Storage account model and trait implementations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Response;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api_version;
use crate::client::ArmClient;
use crate::endpoint::ResourcePath;
use crate::error::{ArmError, Result};
use crate::models::scope::{GroupRef, ResourceRef};
use crate::traits::{CreateOrUpdate, Delete, Get, List};

const NAMESPACE: &str = "Microsoft.Storage";
const RESOURCE_TYPE: &str = "storageAccounts";

/// A storage account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAccount {
    pub id: String,
    pub name: String,
    pub location: String,

    #[serde(default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub sku: Option<Sku>,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    #[serde(default)]
    pub properties: Option<StorageAccountProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAccountProperties {
    #[serde(default)]
    pub provisioning_state: Option<String>,

    /// Service endpoints keyed by service (`blob`, `queue`, `table`, `file`).
    #[serde(default)]
    pub primary_endpoints: BTreeMap<String, String>,
}

/// Replication tier of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sku {
    /// `Standard_LRS`, `Standard_GRS`, `Premium_LRS`...
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

impl StorageAccount {
    pub fn blob_endpoint(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.primary_endpoints.get("blob"))
            .map(String::as_str)
    }
}

/// Desired state of a new storage account.
#[derive(Debug, Clone, Serialize)]
pub struct StorageAccountParams {
    pub location: String,
    pub sku: Sku,
    pub kind: String,
}

impl StorageAccountParams {
    /// Locally redundant general purpose account.
    pub fn new(location: &str) -> Self {
        Self {
            location: location.to_string(),
            sku: Sku {
                name: "Standard_LRS".to_string(),
                tier: None,
            },
            kind: "Storage".to_string(),
        }
    }

    #[must_use]
    pub fn sku(mut self, name: &str) -> Self {
        self.sku = Sku {
            name: name.to_string(),
            tier: None,
        };
        self
    }
}

/// An access key of a storage account.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAccountKey {
    pub key_name: String,
    pub value: String,
    #[serde(default)]
    pub permissions: Option<String>,
}

impl std::fmt::Debug for StorageAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageAccountKey")
            .field("key_name", &self.key_name)
            .field("permissions", &self.permissions)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ListKeysResponse {
    keys: Vec<StorageAccountKey>,
}

fn account_path(account: &ResourceRef) -> Result<ResourcePath> {
    account.provider_path(NAMESPACE, RESOURCE_TYPE)
}

#[async_trait]
impl Get for StorageAccount {
    type Id = ResourceRef;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ArmClient, account: ResourceRef) -> Result<Self> {
        let url = client.url(&account_path(&account)?, api_version::STORAGE)?;
        client.get_resource(url).await
    }
}

#[async_trait]
impl List for StorageAccount {
    type Scope = GroupRef;

    fn list_url(client: &ArmClient, group: &GroupRef) -> Result<Url> {
        let path = group
            .path()?
            .provider_collection(NAMESPACE, RESOURCE_TYPE)?;
        client.url(&path, api_version::STORAGE)
    }
}

#[async_trait]
impl CreateOrUpdate for StorageAccount {
    type Params = StorageAccountParams;

    #[tracing::instrument(skip(client))]
    async fn create_or_update(
        client: &ArmClient,
        account: ResourceRef,
        params: &StorageAccountParams,
    ) -> Result<Response> {
        let url = client.url(&account_path(&account)?, api_version::STORAGE)?;
        client.put(url, params).await
    }
}

#[async_trait]
impl Delete for StorageAccount {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &ArmClient, account: ResourceRef) -> Result<Response> {
        let url = client.url(&account_path(&account)?, api_version::STORAGE)?;
        client.delete(url).await
    }
}

/// Fetch the access keys of an account.
#[tracing::instrument(skip(client))]
pub async fn list_storage_keys(
    client: &ArmClient,
    account: &ResourceRef,
) -> Result<Vec<StorageAccountKey>> {
    let path = account_path(account)?.child("listKeys");
    let url = client.url(&path, api_version::STORAGE)?;
    let response = client.post_empty(url).await?;

    let status = response.status().as_u16();
    let body: serde_json::Value = response.json().await?;
    if let Some(err) = ArmError::from_error_body(&body, Some(status)) {
        return Err(err);
    }
    let keys: ListKeysResponse = serde_json::from_value(body)?;
    Ok(keys.keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_body() {
        let params = StorageAccountParams::new("westus");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({
                "location": "westus",
                "sku": {"name": "Standard_LRS"},
                "kind": "Storage"
            })
        );
    }

    #[test]
    fn test_account_deserialize() {
        let json = r#"{
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Storage/storageAccounts/acct",
            "name": "acct",
            "location": "westus",
            "kind": "Storage",
            "sku": {"name": "Standard_GRS", "tier": "Standard"},
            "properties": {
                "provisioningState": "Succeeded",
                "primaryEndpoints": {"blob": "https://acct.blob.core.windows.net/"}
            }
        }"#;
        let account: StorageAccount = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(account.blob_endpoint(), Some("https://acct.blob.core.windows.net/"));
        assert_eq!(account.sku.unwrap().tier.as_deref(), Some("Standard"));
    }

    #[test]
    fn test_key_debug_hides_value() {
        let key = StorageAccountKey {
            key_name: "key1".to_string(),
            value: "c2VjcmV0".to_string(),
            permissions: Some("Full".to_string()),
        };
        let debug = format!("{key:?}");
        assert!(debug.contains("key1"));
        assert!(!debug.contains("c2VjcmV0"));
    }
}
