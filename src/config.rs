//! Cloud endpoint configuration.
//!
//! Defaults target the public Azure cloud. National or isolated clouds are
//! reached by overriding the endpoints, either explicitly or through the
//! environment once at startup with [`CloudConfig::from_env`].

use std::env;

use url::Url;

use crate::error::Result;

/// Public-cloud resource manager endpoint.
pub const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";
/// Public-cloud Azure AD authority.
pub const DEFAULT_AUTH_ENDPOINT: &str = "https://login.microsoftonline.com/";
/// Public-cloud token audience for resource manager calls.
pub const DEFAULT_RESOURCE_ENDPOINT: &str = "https://management.core.windows.net/";

const MANAGEMENT_ENDPOINT_VAR: &str = "AZURE_RM_ENDPOINT";
const AUTH_ENDPOINT_VAR: &str = "AZURE_AUTH_ENDPOINT";
const RESOURCE_ENDPOINT_VAR: &str = "AZURE_RESOURCE_ENDPOINT";

/// Endpoints used to reach a particular Azure cloud.
///
/// Built once and handed to [`ArmClient`](crate::ArmClient) and the token
/// sources in [`auth`](crate::auth).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudConfig {
    /// Resource manager base URL, without a trailing slash.
    pub management_endpoint: String,
    /// Azure AD authority; a tenant id is appended to it.
    pub auth_endpoint: String,
    /// Audience requested for client-credentials tokens.
    pub resource_endpoint: String,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            management_endpoint: DEFAULT_MANAGEMENT_ENDPOINT.to_string(),
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            resource_endpoint: DEFAULT_RESOURCE_ENDPOINT.to_string(),
        }
    }
}

impl CloudConfig {
    /// Read endpoint overrides from the environment.
    ///
    /// Uses `AZURE_RM_ENDPOINT`, `AZURE_AUTH_ENDPOINT` and
    /// `AZURE_RESOURCE_ENDPOINT`, falling back to the public cloud.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            management_endpoint: lookup(MANAGEMENT_ENDPOINT_VAR)
                .unwrap_or(defaults.management_endpoint),
            auth_endpoint: lookup(AUTH_ENDPOINT_VAR).unwrap_or(defaults.auth_endpoint),
            resource_endpoint: lookup(RESOURCE_ENDPOINT_VAR).unwrap_or(defaults.resource_endpoint),
        }
        .normalized()
    }

    /// Point the resource manager endpoint somewhere else (tests, proxies).
    #[must_use]
    pub fn with_management_endpoint(mut self, endpoint: &str) -> Self {
        self.management_endpoint = endpoint.to_string();
        self.normalized()
    }

    /// Point the Azure AD authority somewhere else.
    #[must_use]
    pub fn with_auth_endpoint(mut self, endpoint: &str) -> Self {
        self.auth_endpoint = endpoint.to_string();
        self.normalized()
    }

    /// Parsed resource manager base URL.
    pub fn management_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.management_endpoint)?)
    }

    /// Token endpoint of the given tenant.
    pub fn token_url(&self, tenant_id: &str) -> Result<Url> {
        let authority = Url::parse(&self.auth_endpoint)?;
        Ok(authority.join(&format!("{}/oauth2/token", urlencoding::encode(tenant_id)))?)
    }

    // Management endpoint never ends with '/', the authority always does.
    fn normalized(mut self) -> Self {
        while self.management_endpoint.ends_with('/') {
            self.management_endpoint.pop();
        }
        if !self.auth_endpoint.ends_with('/') {
            self.auth_endpoint.push('/');
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_public_cloud() {
        let config = CloudConfig::from_lookup(|_| None);
        assert_eq!(config, CloudConfig::default());
        assert_eq!(config.management_endpoint, "https://management.azure.com");
    }

    #[test]
    fn test_overrides_are_normalized() {
        let config = CloudConfig::from_lookup(|key| match key {
            "AZURE_RM_ENDPOINT" => Some("https://management.chinacloudapi.cn/".to_string()),
            "AZURE_AUTH_ENDPOINT" => Some("https://login.chinacloudapi.cn".to_string()),
            _ => None,
        });
        assert_eq!(config.management_endpoint, "https://management.chinacloudapi.cn");
        assert_eq!(config.auth_endpoint, "https://login.chinacloudapi.cn/");
        assert_eq!(config.resource_endpoint, DEFAULT_RESOURCE_ENDPOINT);
    }

    #[test]
    fn test_token_url() {
        let url = CloudConfig::default().token_url("my-tenant").unwrap();
        assert_eq!(
            url.as_str(),
            "https://login.microsoftonline.com/my-tenant/oauth2/token"
        );
    }
}
