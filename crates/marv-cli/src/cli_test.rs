use super::*;
use clap::Parser;

#[test]
fn test_global_defaults() {
    let cli = Cli::try_parse_from(["marv", "ls"]).unwrap();
    assert_eq!(cli.global.directory, "migrations");
    assert_eq!(cli.global.database, "marv.duckdb");
    assert_eq!(cli.global.table, "migrations");
}

#[test]
fn test_migrate_flags() {
    let cli = Cli::try_parse_from([
        "marv",
        "migrate",
        "--quiet",
        "--namespace",
        "inventory",
        "--directory",
        "db/migrations",
    ])
    .unwrap();

    assert_eq!(cli.global.directory, "db/migrations");
    match &cli.command {
        Commands::Migrate(args) => {
            assert!(args.quiet);
            assert_eq!(args.namespace.as_deref(), Some("inventory"));
            assert_eq!(args.filter, None);
        }
        other => panic!("expected migrate command, got {:?}", other),
    }
}

#[test]
fn test_global_flags_after_the_subcommand() {
    let cli = Cli::try_parse_from(["marv", "migrate", "--database", ":memory:"]).unwrap();
    assert_eq!(cli.global.database, ":memory:");
}

#[test]
fn test_ls_output_values() {
    let cli = Cli::try_parse_from(["marv", "ls", "--output", "json"]).unwrap();
    match &cli.command {
        Commands::Ls(args) => assert_eq!(args.output, LsOutput::Json),
        other => panic!("expected ls command, got {:?}", other),
    }

    assert!(Cli::try_parse_from(["marv", "ls", "--output", "bogus"]).is_err());
}

#[test]
fn test_drop_defaults_to_unconfirmed() {
    let cli = Cli::try_parse_from(["marv", "drop"]).unwrap();
    match &cli.command {
        Commands::Drop(args) => assert!(!args.yes),
        other => panic!("expected drop command, got {:?}", other),
    }
}
