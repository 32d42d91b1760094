//! CreateOrUpdate trait for PUT-style desired-state writes.

use async_trait::async_trait;
use reqwest::Response;
use serde::Serialize;

use crate::client::ArmClient;
use crate::error::Result;
use crate::traits::Get;

/// Create a resource or replace its desired state.
///
/// The raw [`Response`] is returned because success is signalled with
/// different codes per provider: 200 for an update, 201 for a creation,
/// 202 when provisioning continues asynchronously.
///
/// # Example
///
/// ```ignore
/// use armclient::{ArmClient, CreateOrUpdate, GroupRef, ResourceGroup, ResourceGroupParams};
///
/// let client = ArmClient::from_cli().await?;
/// let response = ResourceGroup::create_or_update(
///     &client,
///     GroupRef::new("sub", "web"),
///     &ResourceGroupParams::new("westeurope"),
/// ).await?;
/// assert!(response.status().is_success());
/// ```
#[async_trait]
pub trait CreateOrUpdate: Get {
    /// Request body describing the desired state.
    type Params: Serialize + Send + Sync;

    /// PUT the desired state.
    async fn create_or_update(
        client: &ArmClient,
        id: Self::Id,
        params: &Self::Params,
    ) -> Result<Response>;
}
