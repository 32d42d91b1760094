//! References naming where a resource lives.

use serde::{Deserialize, Serialize};

use crate::endpoint::ResourcePath;
use crate::error::Result;

/// A resource group within a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub subscription_id: String,
    pub resource_group: String,
}

impl GroupRef {
    pub fn new(subscription_id: &str, resource_group: &str) -> Self {
        Self {
            subscription_id: subscription_id.to_string(),
            resource_group: resource_group.to_string(),
        }
    }

    /// `/subscriptions/<sub>/resourceGroups/<rg>`.
    pub fn path(&self) -> Result<ResourcePath> {
        ResourcePath::subscription(&self.subscription_id)?.resource_group(&self.resource_group)
    }

    /// A named resource inside this group.
    pub fn resource(&self, name: &str) -> ResourceRef {
        ResourceRef {
            subscription_id: self.subscription_id.clone(),
            resource_group: self.resource_group.clone(),
            name: name.to_string(),
        }
    }
}

/// A named resource within a resource group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub subscription_id: String,
    pub resource_group: String,
    pub name: String,
}

impl ResourceRef {
    pub fn new(subscription_id: &str, resource_group: &str, name: &str) -> Self {
        GroupRef::new(subscription_id, resource_group).resource(name)
    }

    /// The group holding this resource.
    pub fn group(&self) -> GroupRef {
        GroupRef::new(&self.subscription_id, &self.resource_group)
    }

    /// `.../providers/<namespace>/<type>/<name>` under the group.
    pub fn provider_path(&self, namespace: &str, resource_type: &str) -> Result<ResourcePath> {
        self.group()
            .path()?
            .provider(namespace, resource_type, &self.name)
    }
}
