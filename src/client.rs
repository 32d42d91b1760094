//! Azure Resource Manager client.
//!
//! Low-level HTTP client that attaches credentials and performs raw
//! requests. Resource-specific operations are implemented via traits on the
//! model types.

use std::sync::Arc;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::auth::{self, AccessToken};
use crate::config::CloudConfig;
use crate::endpoint::ResourcePath;
use crate::error::{ArmError, Result};
use crate::pagination::{PagedResult, Step, VALUE_FIELD};

const USER_AGENT: &str = concat!("armclient/", env!("CARGO_PKG_VERSION"));

/// Low-level resource manager client.
///
/// Holds one bearer token and the cloud endpoints. GET helpers decode the
/// JSON body without looking at the status code; mutating helpers hand back
/// the raw [`Response`] so callers can branch on 200/201/202/204.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use armclient::{ArmClient, CloudConfig};
///
/// # async fn example() -> armclient::Result<()> {
/// // Reuse an `az login` session
/// let client = ArmClient::from_cli().await?;
///
/// // Or bring your own token
/// let client = ArmClient::new(CloudConfig::default(), "eyJ0eXAi...")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ArmClient {
    http: Client,
    config: Arc<CloudConfig>,
    token: AccessToken,
}

impl std::fmt::Debug for ArmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmClient")
            .field("management_endpoint", &self.config.management_endpoint)
            .finish_non_exhaustive()
    }
}

impl ArmClient {
    /// Create a client for the given cloud with an already acquired token.
    ///
    /// # Errors
    ///
    /// Returns an error if the management endpoint is not a valid URL or the
    /// HTTP client cannot be built.
    pub fn new(config: CloudConfig, token: impl Into<AccessToken>) -> Result<Self> {
        config.management_url()?;
        Ok(Self {
            http: http_client()?,
            config: Arc::new(config),
            token: token.into(),
        })
    }

    /// Create a client from the environment and the Azure CLI session.
    ///
    /// Endpoints come from [`CloudConfig::from_env`]; the token comes from
    /// [`auth::token_from_cli`].
    pub async fn from_cli() -> Result<Self> {
        let config = CloudConfig::from_env();
        let token = auth::token_from_cli(&config).await?;
        Self::new(config, token)
    }

    /// The cloud this client talks to.
    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// Render a resource path against this client's management endpoint.
    pub fn url(&self, path: &ResourcePath, api_version: &str) -> Result<Url> {
        path.to_url(&self.config, api_version)
    }

    /// GET and decode the JSON body, whatever the status code.
    #[tracing::instrument(skip(self, url), fields(url = %url))]
    pub async fn get_json(&self, url: Url) -> Result<Value> {
        let (_, body) = self.get_with_status(url).await?;
        Ok(body)
    }

    /// GET every page of a list endpoint, following `nextLink`.
    ///
    /// Returns `{"value": [...]}` with the items of all pages in server
    /// order. A page without a `value` array is returned unmodified.
    #[tracing::instrument(skip(self, url), fields(url = %url))]
    pub async fn get_paged(&self, url: Url) -> Result<Value> {
        let mut acc = PagedResult::new();
        let mut next = url;

        loop {
            let (_, page) = self.get_with_status(next.clone()).await?;
            match acc.absorb(page) {
                // Links are absolute in practice; relative ones resolve against the current page.
                Step::Next(link) => next = next.join(&link)?,
                Step::Done => break,
                Step::Passthrough(body) => return Ok(body),
            }
        }

        tracing::debug!(pages = acc.pages(), items = acc.items().len(), "collected pages");
        Ok(acc.into_value())
    }

    /// GET a single resource and deserialize it, turning ARM error bodies
    /// into [`ArmError::Api`].
    pub async fn get_resource<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let (status, body) = self.get_with_status(url).await?;
        if let Some(err) = ArmError::from_error_body(&body, Some(status)) {
            return Err(err);
        }
        Ok(serde_json::from_value(body)?)
    }

    /// GET all pages of a collection and deserialize its items.
    pub async fn list_resources<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let mut body = self.get_paged(url).await?;
        if let Some(err) = ArmError::from_error_body(&body, None) {
            return Err(err);
        }
        match body.get_mut(VALUE_FIELD).map(Value::take) {
            Some(items) => Ok(serde_json::from_value(items)?),
            None => Err(ArmError::Api {
                code: None,
                message: format!("list response has no '{VALUE_FIELD}' field: {body}"),
                status_code: None,
            }),
        }
    }

    /// PUT a JSON body.
    #[tracing::instrument(skip(self, url, body), fields(url = %url))]
    pub async fn put<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Response> {
        let request = self.http.put(url).bearer_auth(self.token.secret()).json(body);
        Self::send(request).await
    }

    /// POST a JSON body.
    #[tracing::instrument(skip(self, url, body), fields(url = %url))]
    pub async fn post<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Response> {
        let request = self.http.post(url).bearer_auth(self.token.secret()).json(body);
        Self::send(request).await
    }

    /// POST to an action endpoint that takes no body.
    #[tracing::instrument(skip(self, url), fields(url = %url))]
    pub async fn post_empty(&self, url: Url) -> Result<Response> {
        let request = self
            .http
            .post(url)
            .bearer_auth(self.token.secret())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self::send(request).await
    }

    /// PATCH a JSON body.
    #[tracing::instrument(skip(self, url, body), fields(url = %url))]
    pub async fn patch<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Response> {
        let request = self.http.patch(url).bearer_auth(self.token.secret()).json(body);
        Self::send(request).await
    }

    /// DELETE a resource.
    #[tracing::instrument(skip(self, url), fields(url = %url))]
    pub async fn delete(&self, url: Url) -> Result<Response> {
        let request = self.http.delete(url).bearer_auth(self.token.secret());
        Self::send(request).await
    }

    async fn get_with_status(&self, url: Url) -> Result<(u16, Value)> {
        let response = self
            .http
            .get(url)
            .bearer_auth(self.token.secret())
            .send()
            .await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        Ok((status, serde_json::from_slice(&bytes)?))
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        tracing::debug!(status = response.status().as_u16(), "response received");
        Ok(response)
    }
}

/// HTTP client shared by the resource manager client and the token sources.
pub(crate) fn http_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .brotli(true)
        .gzip(true)
        .deflate(true)
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = ArmClient::new(CloudConfig::default(), "test-token").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("ArmClient"));
        assert!(debug.contains("management.azure.com"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_invalid_management_endpoint() {
        let config = CloudConfig::default().with_management_endpoint("not a url");
        assert!(matches!(
            ArmClient::new(config, "token"),
            Err(ArmError::Url(_))
        ));
    }

    #[test]
    fn test_user_agent_names_crate() {
        assert!(USER_AGENT.starts_with("armclient/"));
    }
}
