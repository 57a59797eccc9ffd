use clap::Parser;
use perm_copy::cli::Args;
use perm_copy::config::types::{Config, LogLevel};
use std::path::PathBuf;
use std::str::FromStr;

#[test]
fn positional_source_and_target() {
    let args = Args::parse_from(["perm_copy", "a.txt", "b.txt"]);
    assert_eq!(args.source, PathBuf::from("a.txt"));
    assert_eq!(args.target, PathBuf::from("b.txt"));
    assert!(!args.dry_run && !args.strict && !args.require_acl);
}

#[test]
fn target_is_required() {
    let err = Args::try_parse_from(["perm_copy", "a.txt"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["perm_copy", "--debug", "--log-level", "quiet", "a", "b"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug)); // --debug wins

    let args = Args::parse_from(["perm_copy", "--log-level", "info", "a", "b"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["perm_copy", "a", "b"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "perm_copy",
        "--log-level",
        "quiet",
        "--log-file",
        "/tmp/pc.log",
        "--json",
        "--dry-run",
        "--strict",
        "--require-acl",
        "a",
        "b",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.log_level, LogLevel::Quiet);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/pc.log")));
    assert!(cfg.json && cfg.dry_run && cfg.strict && cfg.require_acl);
}

#[test]
fn unset_flags_keep_config_values() {
    let args = Args::parse_from(["perm_copy", "a", "b"]);
    let mut cfg = Config {
        log_level: LogLevel::Info,
        strict: true,
        json: true,
        ..Default::default()
    };
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert!(cfg.strict && cfg.json);
}

#[test]
fn log_level_names_are_case_insensitive() {
    assert_eq!(LogLevel::parse("QUIET"), Some(LogLevel::Quiet));
    assert_eq!(LogLevel::parse("error"), Some(LogLevel::Quiet));
    assert_eq!(LogLevel::parse("Verbose"), Some(LogLevel::Info));
    assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
    assert!(LogLevel::from_str("loud").is_err());
    assert_eq!(LogLevel::from_str(&LogLevel::Normal.to_string()), Ok(LogLevel::Normal));
}
