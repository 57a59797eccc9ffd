//! Source metadata record.
//! Read once from the source path, consumed by the apply steps, then dropped.

use std::fs;
use std::io;
use std::path::Path;

/// Permission, setuid/setgid and sticky bits.
pub const PERMISSION_MASK: u32 = 0o7777;

/// Mode and ownership of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    /// Raw mode as returned by stat (file type bits included).
    pub mode: u32,
    pub owner_id: u32,
    pub group_id: u32,
}

impl FileMetadata {
    /// Stat `path` (following symlinks) and capture mode/uid/gid.
    pub fn read(path: &Path) -> io::Result<Self> {
        let meta = fs::metadata(path)?;
        Ok(Self::from_std(&meta))
    }

    #[cfg(unix)]
    pub fn from_std(meta: &fs::Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self {
            mode: meta.mode(),
            owner_id: meta.uid(),
            group_id: meta.gid(),
        }
    }

    /// Without POSIX modes only the readonly attribute is meaningful; map it onto
    /// the owner write bit so the rest of the pipeline stays uniform.
    #[cfg(not(unix))]
    pub fn from_std(meta: &fs::Metadata) -> Self {
        let mode = if meta.permissions().readonly() { 0o444 } else { 0o644 };
        Self {
            mode,
            owner_id: 0,
            group_id: 0,
        }
    }

    /// Bits applied to the target.
    #[inline]
    pub fn permission_bits(&self) -> u32 {
        self.mode & PERMISSION_MASK
    }

    #[inline]
    pub fn mode_octal(&self) -> String {
        format!("{:04o}", self.permission_bits())
    }
}
