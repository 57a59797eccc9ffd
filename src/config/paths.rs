//! Default path helpers and symlink checks.
//! Determines the OS-appropriate config path and detects symlinked ancestors for safety.

use dirs::config_dir;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// OS-appropriate default config path.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(mut base) = config_dir() {
        base.push("perm_copy");
        base.push("config.xml");
        Some(base)
    } else {
        std::env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("perm_copy")
                .join("config.xml")
        })
    }
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn detects_symlinked_parent() {
        let td = tempdir().unwrap();
        let base = fs::canonicalize(td.path()).unwrap();
        let real = base.join("real");
        fs::create_dir(&real).unwrap();
        let link = base.join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        assert!(path_has_symlink_ancestor(&link.join("perm_copy.log")).unwrap());
        assert!(!path_has_symlink_ancestor(&real.join("perm_copy.log")).unwrap());
    }

    #[test]
    fn default_config_path_ends_with_crate_dir() {
        if let Some(p) = default_config_path() {
            assert!(p.ends_with("perm_copy/config.xml"));
        }
    }
}
