//! User-facing messages printed outside of tracing.
//! Used before logging is up (config errors) and for dry-run summaries.
//! Colors are enabled only when the stream is a TTY.

use owo_colors::OwoColorize;

use crate::copier::CopyReport;

fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// One-line description of what a dry-run would have changed.
pub fn dry_run_summary(report: &CopyReport) -> String {
    format!(
        "Dry-run: would set mode {} and owner {}:{} on '{}' (from '{}')",
        report.metadata.mode_octal(),
        report.metadata.owner_id,
        report.metadata.group_id,
        report.target.display(),
        report.source.display()
    )
}
