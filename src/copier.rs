//! Permission copying.
//! - Validates both paths, reads source mode/owner/group, applies them to the target.
//! - Mode failure aborts; ownership failure is recorded in the report and logged as a warning.
//! - ACL copying is reported as not implemented on every run that gets past the mode step.
//!
//! There is a window between the existence checks and the stat/chmod/chown calls.
//! A path removed inside it surfaces as `MetadataRead` or `ModeApply`, never as a panic.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::{PathRole, PermCopyError};
use crate::metadata::FileMetadata;
use crate::platform;

const SETID_BITS: u32 = 0o6000;

/// Knobs for a single copy.
#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    /// Read and report, but do not modify the target.
    pub dry_run: bool,
}

/// Result of the mode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Applied,
    DryRun,
}

/// Result of the best-effort ownership step.
#[derive(Debug)]
pub enum OwnershipStatus {
    Applied,
    Failed(PermCopyError),
    DryRun,
}

impl OwnershipStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, OwnershipStatus::Failed(_))
    }
}

/// ACL copying is a known capability gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AclStatus {
    /// `source_has_acl` is `None` when the build cannot tell.
    NotImplemented { source_has_acl: Option<bool> },
}

/// Overall classification of a run that did not abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Complete,
    /// Mode applied, ownership not.
    Partial,
}

/// What a non-aborting run did.
#[derive(Debug)]
pub struct CopyReport {
    pub source: PathBuf,
    pub target: PathBuf,
    pub metadata: FileMetadata,
    pub mode: StepStatus,
    pub ownership: OwnershipStatus,
    pub acl: AclStatus,
}

impl CopyReport {
    pub fn outcome(&self) -> Outcome {
        if self.ownership.is_failed() {
            Outcome::Partial
        } else {
            Outcome::Complete
        }
    }

    /// Callers that need ACL fidelity must go through this; it never succeeds today.
    pub fn require_acl_parity(&self) -> Result<(), PermCopyError> {
        match self.acl {
            AclStatus::NotImplemented { .. } => Err(PermCopyError::AclNotImplemented),
        }
    }
}

fn is_unresolvable(e: &io::Error) -> bool {
    if e.kind() == io::ErrorKind::NotADirectory {
        return true;
    }
    #[cfg(unix)]
    if e.raw_os_error() == Some(libc::ELOOP) {
        return true;
    }
    false
}

fn ensure_exists(path: &Path, role: PathRole) -> Result<(), PermCopyError> {
    // Follows symlinks: a dangling link counts as missing.
    match path.try_exists() {
        Ok(true) => Ok(()),
        Ok(false) => Err(PermCopyError::NotFound {
            role,
            path: path.to_path_buf(),
        }),
        // A file used as a directory, or a symlink loop: nothing exists at this path.
        Err(e) if is_unresolvable(&e) => Err(PermCopyError::NotFound {
            role,
            path: path.to_path_buf(),
        }),
        // e.g. EACCES on a parent directory: the path may exist, we just cannot tell.
        Err(e) => Err(PermCopyError::Unexpected(format!(
            "cannot check whether {} '{}' exists: {}",
            role.to_string().to_lowercase(),
            path.display(),
            e
        ))),
    }
}

/// Copy mode bits and ownership from `source` onto `target`.
///
/// Returns `Err` only for aborting failures (missing path, unreadable source,
/// mode not applied). Ownership failure is carried in the returned report.
pub fn copy_permissions(
    source: &Path,
    target: &Path,
    opts: &CopyOptions,
) -> Result<CopyReport, PermCopyError> {
    ensure_exists(source, PathRole::Source)?;
    ensure_exists(target, PathRole::Target)?;

    let metadata = FileMetadata::read(source).map_err(|e| PermCopyError::MetadataRead {
        path: source.to_path_buf(),
        source: e,
    })?;
    debug!(
        source = %source.display(),
        mode = %metadata.mode_octal(),
        uid = metadata.owner_id,
        gid = metadata.group_id,
        "read source metadata"
    );

    let mode = if opts.dry_run {
        info!(
            target_path = %target.display(),
            mode = %metadata.mode_octal(),
            "Dry-run: would set file mode on {}",
            target.display()
        );
        StepStatus::DryRun
    } else {
        let bits = metadata.permission_bits();
        platform::apply_mode(target, bits).map_err(|e| PermCopyError::ModeApply {
            path: target.to_path_buf(),
            mode: bits,
            source: e,
        })?;
        info!(
            source = %source.display(),
            target_path = %target.display(),
            mode = %metadata.mode_octal(),
            "Successfully copied file mode from {} to {}.",
            source.display(),
            target.display()
        );
        StepStatus::Applied
    };

    let ownership = if opts.dry_run {
        info!(
            target_path = %target.display(),
            uid = metadata.owner_id,
            gid = metadata.group_id,
            "Dry-run: would set ownership on {}",
            target.display()
        );
        OwnershipStatus::DryRun
    } else {
        apply_ownership(source, target, &metadata)
    };

    // A successful chown clears setuid/setgid on the target; put them back.
    let bits = metadata.permission_bits();
    if matches!(ownership, OwnershipStatus::Applied) && bits & SETID_BITS != 0 {
        platform::apply_mode(target, bits).map_err(|e| PermCopyError::ModeApply {
            path: target.to_path_buf(),
            mode: bits,
            source: e,
        })?;
        debug!(
            target_path = %target.display(),
            mode = %metadata.mode_octal(),
            "restored setuid/setgid after chown"
        );
    }

    let acl = AclStatus::NotImplemented {
        source_has_acl: platform::source_has_acl(source),
    };
    report_acl_gap(source, &acl);

    Ok(CopyReport {
        source: source.to_path_buf(),
        target: target.to_path_buf(),
        metadata,
        mode,
        ownership,
        acl,
    })
}

fn apply_ownership(source: &Path, target: &Path, metadata: &FileMetadata) -> OwnershipStatus {
    match platform::apply_ownership(target, metadata.owner_id, metadata.group_id) {
        Ok(()) => {
            info!(
                source = %source.display(),
                target_path = %target.display(),
                uid = metadata.owner_id,
                gid = metadata.group_id,
                "Successfully copied ownership from {} to {}.",
                source.display(),
                target.display()
            );
            OwnershipStatus::Applied
        }
        Err(e) => {
            let privileged = platform::is_privileged();
            warn!(
                target_path = %target.display(),
                uid = metadata.owner_id,
                gid = metadata.group_id,
                privileged,
                error = %e,
                "Failed to copy ownership: {}. This may be due to insufficient privileges.",
                e
            );
            OwnershipStatus::Failed(PermCopyError::OwnershipApply {
                path: target.to_path_buf(),
                uid: metadata.owner_id,
                gid: metadata.group_id,
                source: e,
            })
        }
    }
}

fn report_acl_gap(source: &Path, acl: &AclStatus) {
    let AclStatus::NotImplemented { source_has_acl } = *acl;
    match source_has_acl {
        Some(true) => warn!(
            source = %source.display(),
            "ACL copying is not implemented. The source carries an ACL that was NOT copied."
        ),
        _ => warn!(
            "ACL copying is not implemented. Please implement it using platform-specific libraries and methods if needed."
        ),
    }
}
