//! List trait for fetching collections of resources.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::client::ArmClient;
use crate::error::Result;

/// List every resource of a type within a scope.
///
/// Implementors only describe the collection URL; [`List::list`] follows
/// `nextLink` until the collection is exhausted.
///
/// # Example
///
/// ```ignore
/// use armclient::{ArmClient, List, VirtualMachine, VmScope};
///
/// let client = ArmClient::from_cli().await?;
/// let vms = VirtualMachine::list(&client, &VmScope::Subscription("sub".into())).await?;
/// ```
#[async_trait]
pub trait List: DeserializeOwned + Send {
    /// Where to list (a subscription, a resource group...).
    type Scope: Send + Sync;

    /// First-page URL of the collection.
    fn list_url(client: &ArmClient, scope: &Self::Scope) -> Result<Url>;

    /// Fetch all pages and deserialize their items, in server order.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails or the collection
    /// answers with an error body.
    async fn list(client: &ArmClient, scope: &Self::Scope) -> Result<Vec<Self>> {
        let url = Self::list_url(client, scope)?;
        client.list_resources(url).await
    }
}
