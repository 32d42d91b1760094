//! Template deployment model and trait implementations.

use async_trait::async_trait;
use reqwest::Response;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::api_version;
use crate::client::ArmClient;
use crate::endpoint::ResourcePath;
use crate::error::Result;
use crate::models::scope::{GroupRef, ResourceRef};
use crate::traits::{CreateOrUpdate, Get, List};

const NAMESPACE: &str = "Microsoft.Resources";
const RESOURCE_TYPE: &str = "deployments";

/// Content version written into template links.
pub const DEFAULT_CONTENT_VERSION: &str = "1.0.0.0";

/// A template deployment into a resource group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub properties: Option<DeploymentProperties>,
}

/// Server-reported state of a deployment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentProperties {
    #[serde(default)]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub mode: Option<DeploymentMode>,
    #[serde(default)]
    pub correlation_id: Option<String>,
    #[serde(default)]
    pub outputs: Option<Value>,
}

impl Deployment {
    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
    }
}

/// How a deployment treats resources absent from the template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentMode {
    /// Leave them alone.
    #[default]
    Incremental,
    /// Delete them.
    Complete,
}

/// A template or parameter file reachable by URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateLink {
    pub uri: String,
    pub content_version: String,
}

impl TemplateLink {
    pub fn new(uri: &str) -> Self {
        Self {
            uri: uri.to_string(),
            content_version: DEFAULT_CONTENT_VERSION.to_string(),
        }
    }
}

/// Body of a deployment PUT.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentParams {
    pub properties: DeploymentSpec,
}

/// What to deploy: exactly one of `template`/`template_link`, and at most
/// one of `parameters`/`parameters_link`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSpec {
    pub mode: DeploymentMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_link: Option<TemplateLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters_link: Option<TemplateLink>,
}

impl DeploymentParams {
    /// Deploy an inline template with inline parameters
    /// (`{"name": {"value": ...}}`).
    pub fn from_template(template: Value, parameters: Value) -> Self {
        Self::with_spec(DeploymentSpec {
            mode: DeploymentMode::Incremental,
            template: Some(template),
            template_link: None,
            parameters: Some(parameters),
            parameters_link: None,
        })
    }

    /// Deploy a template hosted at `uri` with inline parameters.
    pub fn from_template_uri(uri: &str, parameters: Value) -> Self {
        Self::with_spec(DeploymentSpec {
            mode: DeploymentMode::Incremental,
            template: None,
            template_link: Some(TemplateLink::new(uri)),
            parameters: Some(parameters),
            parameters_link: None,
        })
    }

    /// Deploy a template and a parameter file both hosted by URL.
    pub fn from_template_and_parameters_uri(template_uri: &str, parameters_uri: &str) -> Self {
        Self::with_spec(DeploymentSpec {
            mode: DeploymentMode::Incremental,
            template: None,
            template_link: Some(TemplateLink::new(template_uri)),
            parameters: None,
            parameters_link: Some(TemplateLink::new(parameters_uri)),
        })
    }

    #[must_use]
    pub fn mode(mut self, mode: DeploymentMode) -> Self {
        self.properties.mode = mode;
        self
    }

    fn with_spec(properties: DeploymentSpec) -> Self {
        Self { properties }
    }
}

fn deployment_path(deployment: &ResourceRef) -> Result<ResourcePath> {
    deployment.provider_path(NAMESPACE, RESOURCE_TYPE)
}

#[async_trait]
impl Get for Deployment {
    type Id = ResourceRef; // name is the deployment name

    #[tracing::instrument(skip(client))]
    async fn get(client: &ArmClient, deployment: ResourceRef) -> Result<Self> {
        let url = client.url(&deployment_path(&deployment)?, api_version::RESOURCES)?;
        client.get_resource(url).await
    }
}

#[async_trait]
impl List for Deployment {
    type Scope = GroupRef;

    fn list_url(client: &ArmClient, group: &GroupRef) -> Result<Url> {
        let path = group
            .path()?
            .provider_collection(NAMESPACE, RESOURCE_TYPE)?;
        client.url(&path, api_version::RESOURCES)
    }
}

#[async_trait]
impl CreateOrUpdate for Deployment {
    type Params = DeploymentParams;

    #[tracing::instrument(skip(client, params))]
    async fn create_or_update(
        client: &ArmClient,
        deployment: ResourceRef,
        params: &DeploymentParams,
    ) -> Result<Response> {
        let url = client.url(&deployment_path(&deployment)?, api_version::RESOURCES)?;
        client.put(url, params).await
    }
}
