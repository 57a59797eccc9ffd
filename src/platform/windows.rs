//! Windows implementations of platform helpers (best-effort, no ACL management).
//!
//! Notes:
//! - Windows lacks POSIX mode semantics; only the readonly attribute is mirrored.
//! - Ownership is not representable as uid/gid, so applying it always fails.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Mirror the owner write bit as the readonly attribute.
pub fn apply_mode(path: &Path, mode: u32) -> io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_readonly(mode & 0o200 == 0);
    fs::set_permissions(path, perms)
}

pub fn apply_ownership(_path: &Path, _uid: u32, _gid: u32) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "uid/gid ownership is not supported on this platform",
    ))
}

pub fn is_privileged() -> bool {
    false
}

pub fn source_has_acl(_path: &Path) -> Option<bool> {
    None
}

/// Open log file for appending (best-effort; no symlink defense available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
