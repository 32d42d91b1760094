//! OAuth2 client-credentials grant against Azure AD.

use std::env;

use crate::client::http_client;
use crate::config::CloudConfig;
use crate::error::{ArmError, Result};

use super::{read_token_response, AccessToken};

/// A service principal's tenant, application id and secret.
#[derive(Clone)]
pub struct ClientCredentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl ClientCredentials {
    pub fn new(tenant_id: &str, client_id: &str, client_secret: &str) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }

    /// Read `AZURE_TENANT_ID`, `AZURE_CLIENT_ID` and `AZURE_CLIENT_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::ConfigMissing`] naming the first unset variable.
    pub fn from_env() -> Result<Self> {
        let var = |key: &str| {
            env::var(key)
                .map_err(|_| ArmError::ConfigMissing(format!("{key} environment variable not set")))
        };
        Ok(Self {
            tenant_id: var("AZURE_TENANT_ID")?,
            client_id: var("AZURE_CLIENT_ID")?,
            client_secret: var("AZURE_CLIENT_SECRET")?,
        })
    }

    /// Exchange the credentials for a resource manager token.
    ///
    /// Nothing is validated locally; bad credentials come back from the
    /// identity provider as [`ArmError::Authentication`].
    #[tracing::instrument(skip(config))]
    pub async fn acquire_token(&self, config: &CloudConfig) -> Result<AccessToken> {
        let url = config.token_url(&self.tenant_id)?;
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("resource", config.resource_endpoint.as_str()),
        ];

        let response = http_client()?.post(url).form(&form).send().await?;
        read_token_response(response).await
    }
}
