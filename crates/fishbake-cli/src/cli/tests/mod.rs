//! CLI parse tests.

use super::Cli;
use clap::Parser;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_no_args() {
    let cli = parse(&["fishbake"]);
    assert!(cli.path.is_none());
    assert!(!cli.dry_run);
}

#[test]
fn cli_parse_path() {
    let cli = parse(&["fishbake", "js/fish-data.js"]);
    assert_eq!(cli.path, Some(PathBuf::from("js/fish-data.js")));
}

#[test]
fn cli_parse_dry_run() {
    let cli = parse(&["fishbake", "--dry-run", "data.js"]);
    assert!(cli.dry_run);
    assert_eq!(cli.path, Some(PathBuf::from("data.js")));
}

#[test]
fn cli_rejects_unknown_flag() {
    assert!(Cli::try_parse_from(["fishbake", "--concurrency", "8"]).is_err());
}
