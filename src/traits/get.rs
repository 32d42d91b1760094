//! Get trait for fetching single resources.

use async_trait::async_trait;

use crate::client::ArmClient;
use crate::error::Result;

/// Fetch a single resource by its identifying path parts.
///
/// # Example
///
/// ```ignore
/// use armclient::{ArmClient, Get, ResourceGroup, GroupRef};
///
/// let client = ArmClient::from_cli().await?;
/// let group = ResourceGroup::get(&client, GroupRef::new("sub", "web")).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// What identifies one resource (subscription id, group, name...).
    type Id: Send + Sync;

    /// Fetch the resource.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::Api`](crate::ArmError::Api) when the resource
    /// manager answers with an error body, or a transport error.
    async fn get(client: &ArmClient, id: Self::Id) -> Result<Self>;
}
