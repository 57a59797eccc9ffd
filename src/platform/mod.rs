//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the copier can remain platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{
    apply_mode, apply_ownership, is_privileged, open_log_file_secure_append, source_has_acl,
};

#[cfg(not(unix))]
pub use windows::{
    apply_mode, apply_ownership, is_privileged, open_log_file_secure_append, source_has_acl,
};
