//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Flags override values loaded from config.xml.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Copies file permissions (owner, group, mode) from a source file to a target file.",
    after_help = "Example usage: perm_copy source.txt target.txt\n\nACL copying is not implemented; a warning is logged on every run."
)]
pub struct Args {
    /// The source file whose permissions will be copied.
    #[arg(value_name = "SOURCE", value_hint = ValueHint::AnyPath)]
    pub source: PathBuf,

    /// The target file that will receive the permissions.
    #[arg(value_name = "TARGET", value_hint = ValueHint::AnyPath)]
    pub target: PathBuf,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Append logs to this file as well as stderr.
    #[arg(long, value_hint = ValueHint::FilePath, help = "Also append logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Dry-run: read the source and log what would change, but do not modify the target.
    #[arg(long, help = "Show what would be done, but do not modify the target")]
    pub dry_run: bool,

    /// Exit non-zero when ownership could not be copied.
    #[arg(long, help = "Treat a failed ownership change as an error (exit 6)")]
    pub strict: bool,

    /// Fail when ACLs cannot be copied (always, for now).
    #[arg(long, help = "Fail (exit 8) because ACL copying is not implemented")]
    pub require_acl: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.json {
            cfg.json = true;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.strict {
            cfg.strict = true;
        }
        if self.require_acl {
            cfg.require_acl = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
