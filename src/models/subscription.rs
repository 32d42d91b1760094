//! Subscription, tenant and location models.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api_version;
use crate::client::ArmClient;
use crate::endpoint::ResourcePath;
use crate::error::Result;
use crate::traits::{Get, List};

/// An Azure subscription visible to the token's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Full resource id (`/subscriptions/<guid>`).
    pub id: String,

    /// The subscription GUID.
    pub subscription_id: String,

    /// Human-readable name.
    pub display_name: String,

    /// `Enabled`, `Disabled`, `Warned`...
    #[serde(default)]
    pub state: Option<String>,

    /// Directory the subscription belongs to.
    #[serde(default)]
    pub tenant_id: Option<String>,

    /// Quota and spending-limit policies.
    #[serde(default)]
    pub subscription_policies: Option<SubscriptionPolicies>,
}

/// Policies attached to a subscription.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPolicies {
    #[serde(default)]
    pub location_placement_id: Option<String>,
    #[serde(default)]
    pub quota_id: Option<String>,
    #[serde(default)]
    pub spending_limit: Option<String>,
}

impl Subscription {
    /// Whether the subscription accepts new resources.
    pub fn is_enabled(&self) -> bool {
        self.state.as_deref() == Some("Enabled")
    }
}

/// An Azure AD tenant the token's identity belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub tenant_id: String,
}

/// A region a subscription can deploy to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    /// Short name used in request bodies (`westeurope`).
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

#[async_trait]
impl Get for Subscription {
    type Id = String; // Subscription GUID

    #[tracing::instrument(skip(client))]
    async fn get(client: &ArmClient, subscription_id: String) -> Result<Self> {
        let path = ResourcePath::subscription(&subscription_id)?;
        let url = client.url(&path, api_version::SUBSCRIPTIONS)?;
        client.get_resource(url).await
    }
}

#[async_trait]
impl List for Subscription {
    type Scope = ();

    fn list_url(client: &ArmClient, _scope: &()) -> Result<Url> {
        client.url(&ResourcePath::subscriptions(), api_version::SUBSCRIPTIONS)
    }
}

/// List the tenants of the token's identity.
#[tracing::instrument(skip(client))]
pub async fn list_tenants(client: &ArmClient) -> Result<Vec<Tenant>> {
    let url = client.url(&ResourcePath::tenants(), api_version::SUBSCRIPTIONS)?;
    client.list_resources(url).await
}

/// List the regions available to a subscription.
#[tracing::instrument(skip(client))]
pub async fn list_locations(client: &ArmClient, subscription_id: &str) -> Result<Vec<Location>> {
    let path = ResourcePath::subscription(subscription_id)?.child("locations");
    let url = client.url(&path, api_version::SUBSCRIPTIONS)?;
    client.list_resources(url).await
}
