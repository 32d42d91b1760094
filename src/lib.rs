//! Azure Resource Manager client library.
//!
//! A Rust library for the Azure Resource Manager (ARM) REST API using a
//! trait-based architecture where each operation (Get, List,
//! CreateOrUpdate, Delete) is defined as a trait that resource types
//! implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use armclient::{ArmClient, GroupRef, List, ResourceGroup, VirtualMachine, VmScope};
//!
//! #[tokio::main]
//! async fn main() -> armclient::Result<()> {
//!     // Reuse the `az login` session
//!     let client = ArmClient::from_cli().await?;
//!     let subscription_id = armclient::auth::subscription_from_cli(None)?;
//!
//!     // List resource groups, following nextLink across pages
//!     let groups = ResourceGroup::list(&client, &subscription_id).await?;
//!     println!("Found {} resource groups", groups.len());
//!
//!     // List the VMs of the first group
//!     if let Some(group) = groups.first() {
//!         let scope = VmScope::ResourceGroup(GroupRef::new(&subscription_id, &group.name));
//!         let vms = VirtualMachine::list(&client, &scope).await?;
//!         println!("{} has {} VMs", group.name, vms.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`ArmClient`] - generic verbs. GET helpers return decoded JSON,
//!   mutating helpers return the raw response so callers can branch on the
//!   status code.
//! - [`ResourcePath`] - versioned endpoint construction.
//! - [`Get`], [`List`], [`CreateOrUpdate`], [`Delete`] - typed operations
//!   implemented by the model types.
//! - [`auth`] - bearer tokens from a service principal, a cloud shell or
//!   the Azure CLI cache.
//!
//! # Configuration
//!
//! [`CloudConfig::from_env`] reads optional endpoint overrides:
//!
//! - `AZURE_RM_ENDPOINT` - resource manager (defaults to `https://management.azure.com`)
//! - `AZURE_AUTH_ENDPOINT` - Azure AD authority (defaults to `https://login.microsoftonline.com/`)
//! - `AZURE_RESOURCE_ENDPOINT` - token audience (defaults to `https://management.core.windows.net/`)

pub mod api_version;
pub mod auth;
pub mod cli;
mod client;
mod config;
mod endpoint;
mod error;
mod models;
pub mod output;
pub mod pagination;
mod traits;

// Re-export core types
pub use auth::AccessToken;
pub use client::ArmClient;
pub use config::CloudConfig;
pub use endpoint::ResourcePath;
pub use error::{ArmError, Result};
pub use pagination::PagedResult;

// Re-export traits
pub use traits::{CreateOrUpdate, Delete, Get, List};

// Re-export models
pub use models::{
    // Scopes
    GroupRef,
    ResourceRef,
    // Subscription types
    Location,
    Subscription,
    SubscriptionPolicies,
    Tenant,
    // Resource group types
    GenericResource,
    ResourceGroup,
    ResourceGroupParams,
    ResourceGroupProperties,
    // Deployment types
    Deployment,
    DeploymentMode,
    DeploymentParams,
    DeploymentProperties,
    DeploymentSpec,
    TemplateLink,
    // Compute types
    HardwareProfile,
    PowerAction,
    VirtualMachine,
    VirtualMachineProperties,
    VmScope,
    // Storage types
    Sku,
    StorageAccount,
    StorageAccountKey,
    StorageAccountParams,
    StorageAccountProperties,
    // Provider types
    Provider,
    ProviderResourceType,
};

// Re-export convenience functions
pub use models::{export_template, list_resources, list_storage_keys};
pub use models::{list_locations, list_tenants};
