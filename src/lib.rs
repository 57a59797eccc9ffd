//! Core library for `perm_copy`.
//!
//! Copies permission bits and ownership from one filesystem entry to another.
//! The binary adds argument parsing, config loading, logging and exit codes on top.

pub mod cli;
pub mod config;
pub mod copier;
pub mod errors;
pub mod metadata;
pub mod output;
pub mod platform;

pub use config::{
    Config, LogLevel, default_config_path, load_config_from_xml_path, path_has_symlink_ancestor,
};
pub use copier::{
    AclStatus, CopyOptions, CopyReport, Outcome, OwnershipStatus, StepStatus, copy_permissions,
};
pub use errors::{EXIT_CONFIG, PathRole, PermCopyError};
pub use metadata::FileMetadata;
