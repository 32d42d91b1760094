//! Resource manager endpoint construction.
//!
//! Every ARM URL has the shape
//! `<management>/subscriptions/<sub>/resourceGroups/<rg>/providers/<ns>/<type>/<name>?api-version=<v>`
//! with some prefix of it. [`ResourcePath`] assembles the path one segment at
//! a time, refusing empty segments so a missing argument never turns into a
//! request against the parent collection.

use url::Url;

use crate::config::CloudConfig;
use crate::error::{ArmError, Result};

/// A resource manager path under the management endpoint.
///
/// # Example
///
/// ```
/// use armclient::{CloudConfig, ResourcePath};
///
/// # fn main() -> armclient::Result<()> {
/// let url = ResourcePath::subscription("0000")?
///     .resource_group("web")?
///     .provider("Microsoft.Compute", "virtualMachines", "vm1")?
///     .to_url(&CloudConfig::default(), "2017-03-30")?;
/// assert_eq!(
///     url.as_str(),
///     "https://management.azure.com/subscriptions/0000/resourceGroups/web/providers/Microsoft.Compute/virtualMachines/vm1?api-version=2017-03-30"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourcePath {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl ResourcePath {
    /// The tenant-level `/subscriptions` collection.
    pub fn subscriptions() -> Self {
        Self::default().child("subscriptions")
    }

    /// The tenant-level `/tenants` collection.
    pub fn tenants() -> Self {
        Self::default().child("tenants")
    }

    /// `/subscriptions/<id>`.
    pub fn subscription(subscription_id: &str) -> Result<Self> {
        Self::subscriptions().segment("subscription id", subscription_id)
    }

    /// Parse an absolute ARM path such as a resource `id` field.
    ///
    /// A query string (`?$filter=...`) is kept as query parameters; any
    /// `api-version` in it is dropped in favour of the one given to
    /// [`ResourcePath::to_url`].
    pub fn parse(path: &str) -> Result<Self> {
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        let query: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .filter(|(key, _)| key != "api-version")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if segments.is_empty() {
            return Err(ArmError::InvalidArgument(format!(
                "'{path}' is not a resource manager path"
            )));
        }
        Ok(Self { segments, query })
    }

    /// `.../resourceGroups/<name>`.
    pub fn resource_group(self, name: &str) -> Result<Self> {
        self.child("resourceGroups").segment("resource group", name)
    }

    /// `.../providers/<namespace>/<type>` (a provider collection).
    pub fn provider_collection(self, namespace: &str, resource_type: &str) -> Result<Self> {
        self.child("providers")
            .segment("provider namespace", namespace)?
            .segment("resource type", resource_type)
    }

    /// `.../providers/<namespace>/<type>/<name>`.
    pub fn provider(self, namespace: &str, resource_type: &str, name: &str) -> Result<Self> {
        self.provider_collection(namespace, resource_type)?
            .segment("resource name", name)
    }

    /// Append a fixed segment such as `deployments` or `listKeys`.
    #[must_use]
    pub fn child(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Append a caller-supplied segment, rejecting empty values.
    pub fn segment(mut self, what: &str, value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Err(ArmError::InvalidArgument(format!("{what} must not be empty")));
        }
        self.segments.push(value.to_string());
        Ok(self)
    }

    /// Render the path with its `api-version` against the given cloud.
    pub fn to_url(&self, config: &CloudConfig, api_version: &str) -> Result<Url> {
        let mut url = config.management_url()?;
        url.path_segments_mut()
            .map_err(|()| {
                ArmError::ConfigMissing(format!(
                    "management endpoint '{}' cannot carry a path",
                    config.management_endpoint
                ))
            })?
            .pop_if_empty()
            .extend(&self.segments);
        url.query_pairs_mut()
            .extend_pairs(&self.query)
            .append_pair("api-version", api_version);
        Ok(url)
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
