//! Virtual machine model and trait implementations.

use std::collections::BTreeMap;

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
use crate::traits::{Delete, Get, List};

const NAMESPACE: &str = "Microsoft.Compute";
const RESOURCE_TYPE: &str = "virtualMachines";

/// A compute virtual machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachine {
    pub id: String,
    pub name: String,
    pub location: String,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    #[serde(default)]
    pub properties: Option<VirtualMachineProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineProperties {
    #[serde(default)]
    pub vm_id: Option<String>,
    #[serde(default)]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub hardware_profile: Option<HardwareProfile>,

    // Profiles vary too much between images to be worth typing here.
    #[serde(default)]
    pub storage_profile: Option<Value>,
    #[serde(default)]
    pub os_profile: Option<Value>,
    #[serde(default)]
    pub network_profile: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareProfile {
    #[serde(default)]
    pub vm_size: Option<String>,
}

impl VirtualMachine {
    pub fn vm_size(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.hardware_profile.as_ref())
            .and_then(|h| h.vm_size.as_deref())
    }

    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
    }

    /// Resource group parsed from the resource id.
    pub fn resource_group(&self) -> Option<&str> {
        let mut segments = self.id.split('/');
        segments
            .by_ref()
            .find(|s| s.eq_ignore_ascii_case("resourceGroups"))?;
        segments.next()
    }

    /// Start, stop, restart or deallocate.
    #[tracing::instrument(skip(client))]
    pub async fn power_action(
        client: &ArmClient,
        vm: &ResourceRef,
        action: PowerAction,
    ) -> Result<Response> {
        let path = vm_path(vm)?.child(action.as_segment());
        let url = client.url(&path, api_version::COMPUTE)?;
        client.post_empty(url).await
    }

    /// Runtime status: power state, agent status, disks.
    #[tracing::instrument(skip(client))]
    pub async fn instance_view(client: &ArmClient, vm: &ResourceRef) -> Result<Value> {
        let path = vm_path(vm)?.child("instanceView");
        let url = client.url(&path, api_version::COMPUTE)?;
        client.get_json(url).await
    }
}

/// Power operations exposed as POST actions on a VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    Start,
    PowerOff,
    Restart,
    /// Stop and release the compute allocation.
    Deallocate,
}

impl PowerAction {
    pub fn as_segment(self) -> &'static str {
        match self {
            PowerAction::Start => "start",
            PowerAction::PowerOff => "powerOff",
            PowerAction::Restart => "restart",
            PowerAction::Deallocate => "deallocate",
        }
    }
}

/// Where to list virtual machines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmScope {
    /// Every VM of a subscription.
    Subscription(String),
    /// VMs of one resource group.
    ResourceGroup(GroupRef),
}

fn vm_path(vm: &ResourceRef) -> Result<ResourcePath> {
    vm.provider_path(NAMESPACE, RESOURCE_TYPE)
}

#[async_trait]
impl Get for VirtualMachine {
    type Id = ResourceRef;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ArmClient, vm: ResourceRef) -> Result<Self> {
        let url = client.url(&vm_path(&vm)?, api_version::COMPUTE)?;
        client.get_resource(url).await
    }
}

#[async_trait]
impl List for VirtualMachine {
    type Scope = VmScope;

    fn list_url(client: &ArmClient, scope: &VmScope) -> Result<Url> {
        let base = match scope {
            VmScope::Subscription(subscription_id) => ResourcePath::subscription(subscription_id)?,
            VmScope::ResourceGroup(group) => group.path()?,
        };
        let path = base.provider_collection(NAMESPACE, RESOURCE_TYPE)?;
        client.url(&path, api_version::COMPUTE)
    }
}

#[async_trait]
impl Delete for VirtualMachine {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &ArmClient, vm: ResourceRef) -> Result<Response> {
        let url = client.url(&vm_path(&vm)?, api_version::COMPUTE)?;
        client.delete(url).await
    }
}
