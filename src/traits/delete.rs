//! Delete trait.

use async_trait::async_trait;
use reqwest::Response;

use crate::client::ArmClient;
use crate::error::Result;
use crate::traits::Get;

/// Delete a resource.
///
/// Returns the raw [`Response`]; deletions are usually accepted with 202
/// and finish in the background, 204 means there was nothing to delete.
#[async_trait]
pub trait Delete: Get {
    async fn delete(client: &ArmClient, id: Self::Id) -> Result<Response>;
}
