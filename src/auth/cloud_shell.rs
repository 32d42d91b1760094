//! Managed identity token from inside a cloud shell.

use std::env;

use crate::client::http_client;
use crate::config::CloudConfig;
use crate::error::Result;

use super::{read_token_response, AccessToken};

const CLOUD_SHELL_VAR: &str = "ACC_CLOUD";
const MSI_ENDPOINT_VAR: &str = "MSI_ENDPOINT";

/// A cloud shell session, detected from its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudShellEnv {
    /// Local identity endpoint that issues tokens.
    pub msi_endpoint: String,
}

impl CloudShellEnv {
    /// Detect a cloud shell: both `ACC_CLOUD` and `MSI_ENDPOINT` must be set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Detect a cloud shell from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(CLOUD_SHELL_VAR)?;
        let msi_endpoint = lookup(MSI_ENDPOINT_VAR)?;
        Some(Self { msi_endpoint })
    }

    /// Ask the identity endpoint for a resource manager token.
    #[tracing::instrument(skip(config))]
    pub async fn acquire_token(&self, config: &CloudConfig) -> Result<AccessToken> {
        let resource = format!("{}/", config.management_endpoint);
        let response = http_client()?
            .post(&self.msi_endpoint)
            .header("Metadata", "true")
            .form(&[("resource", resource.as_str())])
            .send()
            .await?;
        read_token_response(response).await
    }
}
