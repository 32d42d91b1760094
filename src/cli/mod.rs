//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the armclient binary.

use clap::{Parser, Subcommand, ValueEnum};

use crate::PowerAction;

/// Azure Resource Manager command-line interface.
#[derive(Parser, Debug)]
#[command(name = "armclient", about = "Azure Resource Manager CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Subscription id (defaults to the Azure CLI default subscription).
    #[arg(long, short = 's', global = true, env = "AZURE_SUBSCRIPTION_ID")]
    pub subscription: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a bearer token for the resource manager.
    Token {
        /// Use AZURE_TENANT_ID/AZURE_CLIENT_ID/AZURE_CLIENT_SECRET instead of the CLI cache.
        #[arg(long)]
        service_principal: bool,
    },

    /// Print the id of the default subscription, or of the one with this name.
    Subscription {
        /// Subscription display name.
        #[arg(long)]
        name: Option<String>,
    },

    /// Get a single resource by name.
    Get {
        /// The type of resource to get.
        entity: Entity,

        /// The resource name (subscription id for subscriptions).
        name: String,

        /// Resource group holding the resource.
        #[arg(long, short = 'g')]
        resource_group: Option<String>,
    },

    /// List resources, following every page.
    List {
        /// The type of resource to list.
        entity: Entity,

        /// Resource group to list in (required for deployments and storage accounts).
        #[arg(long, short = 'g')]
        resource_group: Option<String>,
    },

    /// Run a power action on a virtual machine.
    Power {
        /// What to do.
        action: PowerCommand,

        /// The virtual machine name.
        name: String,

        /// Resource group holding the virtual machine.
        #[arg(long, short = 'g')]
        resource_group: String,
    },

    /// GET any resource manager path, following nextLink.
    Raw {
        /// Path below the management endpoint, e.g. /subscriptions/<id>/resources?$filter=...
        path: String,

        /// The api-version query parameter.
        #[arg(long)]
        api_version: String,
    },
}

/// Resource types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A subscription.
    #[value(alias = "subscriptions")]
    Subscription,
    /// A resource group.
    #[value(alias = "groups", alias = "resource-groups")]
    Group,
    /// A template deployment.
    #[value(alias = "deployments")]
    Deployment,
    /// A virtual machine.
    #[value(alias = "vms")]
    Vm,
    /// A storage account.
    #[value(alias = "storage-accounts")]
    Storage,
    /// A resource provider.
    #[value(alias = "providers")]
    Provider,
    /// A region.
    #[value(alias = "locations")]
    Location,
}

/// Renders the value name accepted on the command line.
impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => Ok(()),
        }
    }
}

/// Virtual machine power actions.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerCommand {
    Start,
    Stop,
    Restart,
    Deallocate,
}

impl From<PowerCommand> for PowerAction {
    fn from(command: PowerCommand) -> Self {
        match command {
            PowerCommand::Start => PowerAction::Start,
            PowerCommand::Stop => PowerAction::PowerOff,
            PowerCommand::Restart => PowerAction::Restart,
            PowerCommand::Deallocate => PowerAction::Deallocate,
        }
    }
}
