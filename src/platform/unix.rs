//! Unix implementations of platform helpers.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

/// chmod `path` to `mode` (permission and special bits; follows symlinks).
pub fn apply_mode(path: &Path, mode: u32) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

/// chown `path` to `uid:gid` (follows symlinks).
pub fn apply_ownership(path: &Path, uid: u32, gid: u32) -> io::Result<()> {
    std::os::unix::fs::chown(path, Some(uid), Some(gid))
}

/// True when running with an effective uid of 0.
/// Only such a process may give files away on most systems.
pub fn is_privileged() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// Whether the source carries a POSIX ACL (access or default).
/// `None` when that cannot be determined on this build.
#[cfg(all(feature = "xattrs", target_os = "linux"))]
pub fn source_has_acl(path: &Path) -> Option<bool> {
    const ACL_XATTRS: [&str; 2] = ["system.posix_acl_access", "system.posix_acl_default"];
    let mut found = false;
    for name in ACL_XATTRS {
        match xattr::get(path, name) {
            Ok(Some(_)) => found = true,
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(path = %path.display(), xattr = name, error = %e, "could not probe ACL xattr");
                return None;
            }
        }
    }
    Some(found)
}

#[cfg(not(all(feature = "xattrs", target_os = "linux")))]
pub fn source_has_acl(_path: &Path) -> Option<bool> {
    None
}

/// Open log file for appending; set 0600 only when creating a new file.
/// If the file already exists, we preserve its existing permissions to avoid
/// clobbering administrator adjustments (e.g. group-readable for log shipping).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let existed = path.exists();
    let f = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600) // applies on create
        .open(path)?;
    if !existed {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::MetadataExt;
    use tempfile::tempdir;

    #[test]
    fn preserve_existing_log_file_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, b"hello").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        let _f = open_log_file_secure_append(&path).unwrap();
        // Mode should remain 0640 (not forced to 0600) because file pre-existed.
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640, "existing permissions should be preserved");
    }

    #[test]
    fn new_log_file_gets_0600() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("new_log.txt");
        let _f = open_log_file_secure_append(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "newly created log file should be 0600");
    }

    #[test]
    fn apply_mode_sets_sticky_on_directory() {
        let dir = tempdir().unwrap();
        let d = dir.path().join("d");
        fs::create_dir(&d).unwrap();
        apply_mode(&d, 0o1750).unwrap();
        let mode = fs::metadata(&d).unwrap().permissions().mode() & 0o7777;
        assert_eq!(mode, 0o1750);
    }

    #[test]
    fn chown_to_current_owner_is_allowed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f");
        fs::write(&path, b"x").unwrap();
        let meta = fs::metadata(&path).unwrap();
        apply_ownership(&path, meta.uid(), meta.gid()).unwrap();
    }

    #[test]
    fn apply_mode_on_missing_path_errors() {
        let dir = tempdir().unwrap();
        let err = apply_mode(&dir.path().join("gone"), 0o644).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
