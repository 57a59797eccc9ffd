//! Application orchestrator.
//! Loads/merges config, initializes logging, runs the copy and maps the result to an exit code.

use std::process::ExitCode;
use tracing::{debug, error};

use perm_copy::cli::Args;
use perm_copy::config::load_config;
use perm_copy::output as out;
use perm_copy::{
    Config, CopyOptions, CopyReport, EXIT_CONFIG, Outcome, OwnershipStatus, PermCopyError,
    copy_permissions,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> ExitCode {
    // Config comes first so it can decide how logging looks.
    let mut cfg = match load_config() {
        Ok(c) => c,
        Err(e) => {
            out::print_error(&format!("Failed to load config: {e:#}"));
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    args.apply_overrides(&mut cfg);

    let _guard = match init_tracing(&cfg) {
        Ok(g) => g,
        Err(e) => {
            out::print_error(&format!("Failed to initialize logging: {e:#}"));
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    debug!("Starting perm_copy: {:?}", args);

    let opts = CopyOptions {
        dry_run: cfg.dry_run,
    };
    let code = match copy_permissions(&args.source, &args.target, &opts) {
        Ok(report) => finish(&cfg, &report),
        Err(e) => {
            log_failure(&e);
            e.exit_code()
        }
    };
    ExitCode::from(code)
}

fn finish(cfg: &Config, report: &CopyReport) -> u8 {
    if cfg.dry_run {
        out::print_info(&out::dry_run_summary(report));
    }

    if report.outcome() == Outcome::Partial
        && cfg.strict
        && let OwnershipStatus::Failed(e) = &report.ownership
    {
        error!(code = e.exit_code(), kind = e.code(), "{e} (--strict)");
        return e.exit_code();
    }

    if cfg.require_acl
        && let Err(e) = report.require_acl_parity()
    {
        error!(code = e.exit_code(), kind = e.code(), source = %report.source.display(), "{e}; --require-acl cannot be satisfied");
        return e.exit_code();
    }

    debug!(outcome = ?report.outcome(), "Permission copy finished");
    0
}

fn log_failure(e: &PermCopyError) {
    let code = e.exit_code();
    let kind = e.code();
    match e {
        PermCopyError::NotFound { path, .. }
        | PermCopyError::MetadataRead { path, .. }
        | PermCopyError::ModeApply { path, .. } => {
            error!(code, kind, path = %path.display(), "{e}")
        }
        _ => error!(code, kind, "{e}"),
    }
}
