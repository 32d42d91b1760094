//! Azure Resource Manager CLI binary.
//!
//! A command-line interface for the resource manager REST API.

use armclient::auth::{self, ClientCredentials};
use armclient::cli::{Cli, Command, Entity};
use armclient::output::PrettyPrint;
use armclient::{
    AccessToken, ArmClient, ArmError, CloudConfig, Deployment, Get, GroupRef, List, Location,
    Provider, ResourceGroup, ResourcePath, StorageAccount, Subscription, VirtualMachine, VmScope,
};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CloudConfig::from_env();

    match run(config, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(
                e,
                ArmError::TokenExpired { .. }
                    | ArmError::CacheFileMissing(_)
                    | ArmError::NoDefaultSubscription(_)
            ) {
                eprintln!("Hint: Run 'az login' or set AZURE_CLIENT_ID, AZURE_CLIENT_SECRET and AZURE_TENANT_ID");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(config: CloudConfig, cli: Cli) -> armclient::Result<()> {
    match cli.command {
        Command::Token { service_principal } => {
            let token = acquire_token(&config, service_principal).await?;
            println!("{}", token.secret());
            Ok(())
        }
        Command::Subscription { name } => {
            println!("{}", auth::subscription_from_cli(name.as_deref())?);
            Ok(())
        }
        Command::Get {
            entity,
            name,
            resource_group,
        } => {
            let client = connect(config).await?;
            let subscription = resolve_subscription(cli.subscription)?;
            handle_get(&client, entity, &subscription, &name, resource_group.as_deref(), cli.json).await
        }
        Command::List {
            entity,
            resource_group,
        } => {
            let client = connect(config).await?;
            let subscription = resolve_subscription(cli.subscription)?;
            handle_list(&client, entity, &subscription, resource_group.as_deref(), cli.json).await
        }
        Command::Power {
            action,
            name,
            resource_group,
        } => {
            let client = connect(config).await?;
            let vm = GroupRef::new(&resolve_subscription(cli.subscription)?, &resource_group).resource(&name);
            let response = VirtualMachine::power_action(&client, &vm, action.into()).await?;
            println!("{}", response.status());
            Ok(())
        }
        Command::Raw { path, api_version } => {
            let client = connect(config).await?;
            let url = client.url(&ResourcePath::parse(&path)?, &api_version)?;
            let body = client.get_paged(url).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
    }
}

async fn acquire_token(config: &CloudConfig, service_principal: bool) -> armclient::Result<AccessToken> {
    if service_principal {
        ClientCredentials::from_env()?.acquire_token(config).await
    } else {
        auth::token_from_cli(config).await
    }
}

async fn connect(config: CloudConfig) -> armclient::Result<ArmClient> {
    // A configured service principal takes precedence over the CLI session.
    let token = match ClientCredentials::from_env() {
        Ok(credentials) => credentials.acquire_token(&config).await?,
        Err(_) => auth::token_from_cli(&config).await?,
    };
    ArmClient::new(config, token)
}

fn resolve_subscription(explicit: Option<String>) -> armclient::Result<String> {
    match explicit {
        Some(id) => Ok(id),
        None => auth::subscription_from_cli(None),
    }
}

fn require_group(resource_group: Option<&str>, entity: &str) -> armclient::Result<String> {
    resource_group.map(str::to_string).ok_or_else(|| {
        ArmError::InvalidArgument(format!("--resource-group required for {entity}"))
    })
}

async fn handle_get(
    client: &ArmClient,
    entity: Entity,
    subscription: &str,
    name: &str,
    resource_group: Option<&str>,
    json: bool,
) -> armclient::Result<()> {
    match entity {
        Entity::Subscription => {
            let sub = Subscription::get(client, name.to_string()).await?;
            output_single(&sub, json)?;
        }
        Entity::Group => {
            let group = ResourceGroup::get(client, GroupRef::new(subscription, name)).await?;
            output_single(&group, json)?;
        }
        Entity::Deployment => {
            let group = require_group(resource_group, "deployments")?;
            let id = GroupRef::new(subscription, &group).resource(name);
            output_single(&Deployment::get(client, id).await?, json)?;
        }
        Entity::Vm => {
            let group = require_group(resource_group, "virtual machines")?;
            let id = GroupRef::new(subscription, &group).resource(name);
            output_single(&VirtualMachine::get(client, id).await?, json)?;
        }
        Entity::Storage => {
            let group = require_group(resource_group, "storage accounts")?;
            let id = GroupRef::new(subscription, &group).resource(name);
            output_single(&StorageAccount::get(client, id).await?, json)?;
        }
        Entity::Provider | Entity::Location => {
            eprintln!("Hint: Use 'armclient list {entity}' instead");
            return Err(ArmError::InvalidArgument(
                "providers and locations can only be listed".to_string(),
            ));
        }
    }
    Ok(())
}

async fn handle_list(
    client: &ArmClient,
    entity: Entity,
    subscription: &str,
    resource_group: Option<&str>,
    json: bool,
) -> armclient::Result<()> {
    match entity {
        Entity::Subscription => {
            let subs = Subscription::list(client, &()).await?;
            output_list(&subs, json, |x| SubscriptionRow::from(x))?;
        }
        Entity::Group => {
            let groups = ResourceGroup::list(client, &subscription.to_string()).await?;
            output_list(&groups, json, |x| GroupRow::from(x))?;
        }
        Entity::Deployment => {
            let group = GroupRef::new(subscription, &require_group(resource_group, "deployments")?);
            let deployments = Deployment::list(client, &group).await?;
            output_list(&deployments, json, |x| DeploymentRow::from(x))?;
        }
        Entity::Vm => {
            let scope = match resource_group {
                Some(group) => VmScope::ResourceGroup(GroupRef::new(subscription, group)),
                None => VmScope::Subscription(subscription.to_string()),
            };
            let vms = VirtualMachine::list(client, &scope).await?;
            output_list(&vms, json, |x| VmRow::from(x))?;
        }
        Entity::Storage => {
            let group = GroupRef::new(subscription, &require_group(resource_group, "storage accounts")?);
            let accounts = StorageAccount::list(client, &group).await?;
            output_list(&accounts, json, |x| StorageRow::from(x))?;
        }
        Entity::Provider => {
            let providers = Provider::list(client, &subscription.to_string()).await?;
            output_list(&providers, json, |x| ProviderRow::from(x))?;
        }
        Entity::Location => {
            let locations = armclient::list_locations(client, subscription).await?;
            output_list(&locations, json, |x| LocationRow::from(x))?;
        }
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> armclient::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> armclient::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} items", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct SubscriptionRow {
    id: String,
    name: String,
    state: String,
}

impl From<&Subscription> for SubscriptionRow {
    fn from(s: &Subscription) -> Self {
        Self {
            id: s.subscription_id.clone(),
            name: s.display_name.clone(),
            state: s.state.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct GroupRow {
    name: String,
    location: String,
    state: String,
}

impl From<&ResourceGroup> for GroupRow {
    fn from(g: &ResourceGroup) -> Self {
        Self {
            name: g.name.clone(),
            location: g.location.clone(),
            state: g.provisioning_state().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Tabled)]
struct DeploymentRow {
    name: String,
    state: String,
    timestamp: String,
}

impl From<&Deployment> for DeploymentRow {
    fn from(d: &Deployment) -> Self {
        Self {
            name: d.name.clone(),
            state: d.provisioning_state().unwrap_or_default().to_string(),
            timestamp: d
                .properties
                .as_ref()
                .and_then(|p| p.timestamp.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct VmRow {
    name: String,
    #[tabled(rename = "resource group")]
    resource_group: String,
    location: String,
    size: String,
}

impl From<&VirtualMachine> for VmRow {
    fn from(vm: &VirtualMachine) -> Self {
        Self {
            name: vm.name.clone(),
            resource_group: vm.resource_group().unwrap_or_default().to_string(),
            location: vm.location.clone(),
            size: vm.vm_size().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Tabled)]
struct StorageRow {
    name: String,
    location: String,
    sku: String,
    kind: String,
}

impl From<&StorageAccount> for StorageRow {
    fn from(a: &StorageAccount) -> Self {
        Self {
            name: a.name.clone(),
            location: a.location.clone(),
            sku: a.sku.as_ref().map(|s| s.name.clone()).unwrap_or_default(),
            kind: a.kind.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ProviderRow {
    namespace: String,
    state: String,
    types: usize,
}

impl From<&Provider> for ProviderRow {
    fn from(p: &Provider) -> Self {
        Self {
            namespace: p.namespace.clone(),
            state: p.registration_state.clone().unwrap_or_default(),
            types: p.resource_types.len(),
        }
    }
}

#[derive(Tabled)]
struct LocationRow {
    name: String,
    #[tabled(rename = "display name")]
    display_name: String,
}

impl From<&Location> for LocationRow {
    fn from(l: &Location) -> Self {
        Self {
            name: l.name.clone(),
            display_name: l.display_name.clone(),
        }
    }
}
