use std::path::PathBuf;

use clap::Parser;
use need_cla::cli::{Cli, Commands};
use need_cla::domain::models::RepoRef;

#[test]
fn test_parse_check_slug() {
    let cli = Cli::try_parse_from(vec!["need-cla", "check", "google/go-github"]).unwrap();

    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.repo_ref().unwrap(), RepoRef::new("google", "go-github"));
        }
        _ => panic!("Wrong top-level command"),
    }
    assert!(!cli.json);
    assert!(cli.token.is_none());
}

#[test]
fn test_parse_check_global_options() {
    let cli = Cli::try_parse_from(vec![
        "need-cla",
        "--json",
        "--config",
        "/tmp/need-cla.yaml",
        "check",
        "hashicorp",
        "vault",
        "--token",
        "ghp_example",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/need-cla.yaml")));
    assert_eq!(cli.token.as_deref(), Some("ghp_example"));
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.repo_ref().unwrap(), RepoRef::new("hashicorp", "vault"));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_malformed_slug_rejected_at_execution() {
    let cli = Cli::try_parse_from(vec!["need-cla", "check", "no-slash"]).unwrap();
    match cli.command {
        Commands::Check(args) => {
            let err = args.repo_ref().unwrap_err();
            assert!(err.to_string().contains("expected owner/repo"));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_check_requires_target() {
    assert!(Cli::try_parse_from(vec!["need-cla", "check"]).is_err());
}

#[test]
fn test_parse_rate_limit() {
    let cli = Cli::try_parse_from(vec!["need-cla", "rate-limit"]).unwrap();
    assert!(matches!(cli.command, Commands::RateLimit(_)));
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(vec!["need-cla", "sign"]).is_err());
}
