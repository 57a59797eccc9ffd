#![cfg(unix)]

//! A failed chmod aborts the run: no ownership attempt, no ACL notice.
//! The target is "/" which an unprivileged user cannot chmod. The source carries
//! the same bits "/" already has, so nothing would change even if it succeeded.

use std::fs;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::Path;
use tempfile::tempdir;

use perm_copy::{CopyOptions, PermCopyError, copy_permissions};

#[test]
fn chmod_denied_is_fatal() {
    unsafe {
        if libc::geteuid() == 0 {
            eprintln!("skipping: running as root");
            return;
        }
    }
    let root_meta = fs::metadata("/").unwrap();
    if root_meta.uid() == unsafe { libc::geteuid() } {
        eprintln!("skipping: / is owned by the current user");
        return;
    }

    let td = tempdir().unwrap();
    let src = td.path().join("src");
    fs::write(&src, b"s").unwrap();
    fs::set_permissions(&src, fs::Permissions::from_mode(root_meta.mode() & 0o7777)).unwrap();

    let err = copy_permissions(&src, Path::new("/"), &CopyOptions::default()).unwrap_err();
    match &err {
        PermCopyError::ModeApply { path, mode, source } => {
            assert_eq!(path.as_path(), Path::new("/"));
            assert_eq!(*mode, root_meta.mode() & 0o7777);
            assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected ModeApply, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 5);

    let after = fs::metadata("/").unwrap();
    assert_eq!(after.uid(), root_meta.uid());
    assert_eq!(after.gid(), root_meta.gid());
}
