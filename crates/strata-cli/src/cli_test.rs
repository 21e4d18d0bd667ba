use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_new_is_alias_for_pending() {
    let cli = Cli::try_parse_from(["strata", "new"]).unwrap();
    assert!(matches!(cli.command, Commands::Pending(_)));
}

#[test]
fn test_step_flags() {
    let cli = Cli::try_parse_from(["strata", "up"]).unwrap();
    match cli.command {
        Commands::Up(args) => {
            assert_eq!(args.steps, -1);
            assert!(!args.step);
        }
        other => panic!("unexpected command {other:?}"),
    }

    let cli = Cli::try_parse_from(["strata", "down", "--steps", "2", "--step"]).unwrap();
    match cli.command {
        Commands::Down(args) => {
            assert_eq!(args.steps, 2);
            assert!(args.step);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "strata",
        "history",
        "--db-type",
        "sqlite",
        "--db-name",
        ":memory:",
        "--db-port",
        "5433",
        "-o",
        "json",
    ])
    .unwrap();
    assert_eq!(cli.global.db_type.as_deref(), Some("sqlite"));
    assert_eq!(cli.global.db_port, Some(5433));
    match cli.command {
        Commands::History(args) => assert_eq!(args.output, OutputFormat::Json),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_status_requires_id() {
    assert!(Cli::try_parse_from(["strata", "status"]).is_err());
    let cli = Cli::try_parse_from(["strata", "status", "20240101"]).unwrap();
    match cli.command {
        Commands::Status(args) => assert_eq!(args.id, "20240101"),
        other => panic!("unexpected command {other:?}"),
    }
}
