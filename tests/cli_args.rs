//! CLI argument parsing tests.

use armclient::cli::{Cli, Command, Entity, PowerCommand};
use armclient::PowerAction;
use clap::Parser;

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from(["armclient", "list", "vms", "-g", "web"]);

    assert!(!cli.json);
    match cli.command {
        Command::List {
            entity,
            resource_group,
        } => {
            assert_eq!(entity, Entity::Vm);
            assert_eq!(resource_group.as_deref(), Some("web"));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_get_with_global_flags() {
    let cli = Cli::parse_from([
        "armclient",
        "get",
        "group",
        "web",
        "--json",
        "--subscription",
        "0000",
    ]);

    assert!(cli.json);
    assert_eq!(cli.subscription.as_deref(), Some("0000"));
    match cli.command {
        Command::Get { entity, name, .. } => {
            assert_eq!(entity, Entity::Group);
            assert_eq!(name, "web");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_power_subcommand() {
    let cli = Cli::parse_from(["armclient", "power", "stop", "vm1", "--resource-group", "rg"]);

    match cli.command {
        Command::Power {
            action,
            name,
            resource_group,
        } => {
            assert_eq!(action, PowerCommand::Stop);
            assert_eq!(PowerAction::from(action), PowerAction::PowerOff);
            assert_eq!(name, "vm1");
            assert_eq!(resource_group, "rg");
        }
        _ => panic!("Expected Power command"),
    }
}

#[test]
fn test_cli_parses_raw_subcommand() {
    let cli = Cli::parse_from([
        "armclient",
        "raw",
        "/subscriptions/0000/resourceGroups",
        "--api-version",
        "2017-05-10",
    ]);

    match cli.command {
        Command::Raw { path, api_version } => {
            assert_eq!(path, "/subscriptions/0000/resourceGroups");
            assert_eq!(api_version, "2017-05-10");
        }
        _ => panic!("Expected Raw command"),
    }
}

#[test]
fn test_cli_entity_aliases() {
    for (alias, expected) in [
        ("subscriptions", Entity::Subscription),
        ("resource-groups", Entity::Group),
        ("storage-accounts", Entity::Storage),
        ("providers", Entity::Provider),
        ("locations", Entity::Location),
    ] {
        let cli = Cli::parse_from(["armclient", "list", alias]);
        match cli.command {
            Command::List { entity, .. } => assert_eq!(entity, expected),
            _ => panic!("Expected List command"),
        }
    }
}

#[test]
fn test_cli_power_requires_resource_group() {
    let result = Cli::try_parse_from(["armclient", "power", "start", "vm1"]);
    assert!(result.is_err());
}

#[test]
fn test_entity_display_is_a_valid_value() {
    assert_eq!(Entity::Provider.to_string(), "provider");
    assert_eq!(Entity::Vm.to_string(), "vm");

    for entity in [Entity::Provider, Entity::Location, Entity::Storage] {
        let name = entity.to_string();
        let cli = Cli::parse_from(["armclient", "list", name.as_str()]);
        match cli.command {
            Command::List { entity: parsed, .. } => assert_eq!(parsed, entity),
            _ => panic!("Expected List command"),
        }
    }
}
