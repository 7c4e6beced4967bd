//! CLI argument parsing tests.

use clap::Parser;
use linodeapi::cli::{Cli, Command, Entity};

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["linodeapi", "get", "instance", "123"]);

    assert!(!cli.json);
    assert!(cli.profile.is_none());
    match cli.command {
        Command::Get { entity, id } => {
            assert_eq!(entity, Entity::Instance);
            assert_eq!(id, "123");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_with_pagination_and_filter() {
    let cli = Cli::parse_from([
        "linodeapi",
        "list",
        "volumes",
        "--page",
        "2",
        "--page-size",
        "50",
        "--filter",
        r#"{"region": "us-east"}"#,
    ]);

    match cli.command {
        Command::List {
            entity,
            page,
            page_size,
            filter,
        } => {
            assert_eq!(entity, Entity::Volume);
            assert_eq!(page, Some(2));
            assert_eq!(page_size, Some(50));
            assert_eq!(filter.as_deref(), Some(r#"{"region": "us-east"}"#));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_list_defaults_to_all_pages() {
    let cli = Cli::parse_from(["linodeapi", "list", "regions"]);

    match cli.command {
        Command::List { page, page_size, filter, .. } => {
            assert!(page.is_none());
            assert!(page_size.is_none());
            assert!(filter.is_none());
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_delete_subcommand() {
    let cli = Cli::parse_from(["linodeapi", "delete", "image", "private/15"]);

    match cli.command {
        Command::Delete { entity, id } => {
            assert_eq!(entity, Entity::Image);
            assert_eq!(id, "private/15");
        }
        _ => panic!("Expected Delete command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::parse_from(["linodeapi", "get", "type", "g6-nanode-1", "--json", "--profile", "staging"]);

    assert!(cli.json);
    assert_eq!(cli.profile.as_deref(), Some("staging"));
}

#[test]
fn test_entity_aliases() {
    for (alias, expected) in [
        ("linode", Entity::Instance),
        ("instances", Entity::Instance),
        ("lke", Entity::LkeCluster),
        ("lke-cluster", Entity::LkeCluster),
        ("firewalls", Entity::Firewall),
        ("events", Entity::Event),
        ("types", Entity::Type),
    ] {
        let cli = Cli::parse_from(["linodeapi", "list", alias]);
        match cli.command {
            Command::List { entity, .. } => assert_eq!(entity, expected, "alias {alias}"),
            _ => panic!("Expected List command"),
        }
    }
}

#[test]
fn test_unknown_entity_is_rejected() {
    assert!(Cli::try_parse_from(["linodeapi", "get", "bucket", "x"]).is_err());
}

#[test]
fn test_missing_id_is_rejected() {
    assert!(Cli::try_parse_from(["linodeapi", "get", "instance"]).is_err());
}

#[test]
fn test_entity_capabilities() {
    assert!(Entity::Instance.has_numeric_id());
    assert!(!Entity::Region.has_numeric_id());
    assert!(!Entity::Image.has_numeric_id());

    assert!(Entity::Volume.is_deletable());
    assert!(Entity::Image.is_deletable());
    assert!(!Entity::Event.is_deletable());
    assert!(!Entity::Type.is_deletable());
}
