//! Bearer token acquisition.
//!
//! Three sources are supported:
//!
//! - [`ClientCredentials`] - OAuth2 client-credentials grant for a service
//!   principal.
//! - [`CloudShellEnv`] - the managed identity endpoint available inside a
//!   cloud shell.
//! - [`CliCache`] - the token cache written by `az login`.
//!
//! [`token_from_cli`] picks between the last two the way an interactive
//! developer session expects.

mod cli_cache;
mod client_credentials;
mod cloud_shell;

use serde::Deserialize;

pub use cli_cache::{
    parse_expiry, select_token, CachedToken, CliCache, ProfileSubscription, ProfileUser,
};
pub use client_credentials::ClientCredentials;
pub use cloud_shell::CloudShellEnv;

use crate::config::CloudConfig;
use crate::error::{ArmError, Result};

/// An opaque bearer token.
///
/// The value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Reuse the Azure CLI session.
///
/// Inside a cloud shell the managed identity endpoint is asked for a token;
/// everywhere else the `az login` cache is consulted with the current local
/// time.
pub async fn token_from_cli(config: &CloudConfig) -> Result<AccessToken> {
    let result = match CloudShellEnv::from_env() {
        Some(shell) => shell.acquire_token(config).await,
        None => CliCache::from_env()
            .and_then(|cache| cache.access_token(chrono::Local::now().naive_local())),
    };
    if let Err(ref err) = result {
        tracing::warn!("could not get a token from the Azure CLI session: {err}");
    }
    result
}

/// Id of the default subscription, or of the one called `name`, from the
/// Azure CLI profile.
pub fn subscription_from_cli(name: Option<&str>) -> Result<String> {
    let result = CliCache::from_env().and_then(|cache| cache.subscription_id(name));
    if let Err(ref err) = result {
        tracing::warn!("could not resolve a subscription from the Azure CLI profile: {err}");
    }
    result
}

/// Token endpoint response; only the access token is kept.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Decode a token endpoint response, mapping failures to
/// [`ArmError::Authentication`].
async fn read_token_response(response: reqwest::Response) -> Result<AccessToken> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ArmError::Authentication {
            message: extract_error_message(&body),
            status_code: Some(status.as_u16()),
        });
    }

    let token: TokenResponse = serde_json::from_str(&body).map_err(|err| ArmError::Authentication {
        message: format!("unexpected token response: {err}"),
        status_code: Some(status.as_u16()),
    })?;
    Ok(AccessToken(token.access_token))
}

fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = json.get("error_description").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
        if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
            return err.to_string();
        }
    }
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("eyJ0eXAiOiJKV1Qi");
        assert_eq!(format!("{token:?}"), "AccessToken(***)");
        assert_eq!(token.secret(), "eyJ0eXAiOiJKV1Qi");
    }

    #[test]
    fn test_extract_error_message_prefers_description() {
        let body = r#"{"error": "invalid_client", "error_description": "AADSTS7000215: Invalid client secret"}"#;
        assert_eq!(extract_error_message(body), "AADSTS7000215: Invalid client secret");

        let body = r#"{"error": "unauthorized_client"}"#;
        assert_eq!(extract_error_message(body), "unauthorized_client");

        assert_eq!(extract_error_message("Bad Gateway"), "Bad Gateway");
    }
}
