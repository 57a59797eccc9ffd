//! Typed error definitions for perm_copy.
//! Provides a small set of well-known failure modes for better logs, tests and exit codes.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which side of the copy a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    Source,
    Target,
}

impl fmt::Display for PathRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRole::Source => f.write_str("Source"),
            PathRole::Target => f.write_str("Target"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PermCopyError {
    #[error("{role} file '{}' not found.", .path.display())]
    NotFound { role: PathRole, path: PathBuf },

    #[error("Error reading metadata of '{}': {source}", .path.display())]
    MetadataRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error setting mode {mode:04o} on '{}': {source}", .path.display())]
    ModeApply {
        path: PathBuf,
        mode: u32,
        #[source]
        source: io::Error,
    },

    #[error("Failed to set owner {uid}:{gid} on '{}': {source}", .path.display())]
    OwnershipApply {
        path: PathBuf,
        uid: u32,
        gid: u32,
        #[source]
        source: io::Error,
    },

    #[error("ACL copying is not implemented")]
    AclNotImplemented,

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PermCopyError {
    /// Stable, machine-friendly kind string used as the `kind` log field.
    pub fn code(&self) -> &'static str {
        match self {
            PermCopyError::NotFound { role: PathRole::Source, .. } => "source_not_found",
            PermCopyError::NotFound { role: PathRole::Target, .. } => "target_not_found",
            PermCopyError::MetadataRead { .. } => "metadata_read",
            PermCopyError::ModeApply { .. } => "mode_apply",
            PermCopyError::OwnershipApply { .. } => "ownership_apply",
            PermCopyError::AclNotImplemented => "acl_not_implemented",
            PermCopyError::Unexpected(_) => "unexpected",
        }
    }

    /// Process exit code for this failure kind.
    /// 2 is left to clap for usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            PermCopyError::Unexpected(_) => 1,
            PermCopyError::NotFound { .. } => 3,
            PermCopyError::MetadataRead { .. } => 4,
            PermCopyError::ModeApply { .. } => 5,
            PermCopyError::OwnershipApply { .. } => 6,
            PermCopyError::AclNotImplemented => 8,
        }
    }
}

/// Exit code used when config or logging could not be initialized.
pub const EXIT_CONFIG: u8 = 7;
