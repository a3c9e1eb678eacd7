//! Metadata snapshots for the three item kinds.
//!
//! These are plain values captured by the comparison pass; the tree stores one
//! per side and swaps them on flip.

use serde::{Deserialize, Serialize};

/// Opaque file identity reported by the file system (e.g. inode/file id).
///
/// Used by move detection to recognize the same file under a new name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FingerPrint(pub u64);

impl FingerPrint {
    /// Create a new fingerprint from its raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

/// Snapshot of a regular file's metadata on one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileAttributes {
    /// Last modification time in seconds since the Unix epoch.
    pub mod_time: i64,
    /// File size in bytes.
    pub file_size: u64,
    /// Optional file identity.
    #[serde(default)]
    pub file_print: Option<FingerPrint>,
    /// Whether the file was reached through a followed symlink.
    #[serde(default)]
    pub is_followed_symlink: bool,
}

impl FileAttributes {
    /// Create a new file attribute snapshot.
    pub fn new(
        mod_time: i64,
        file_size: u64,
        file_print: Option<FingerPrint>,
        is_followed_symlink: bool,
    ) -> Self {
        Self {
            mod_time,
            file_size,
            file_print,
            is_followed_symlink,
        }
    }
}

/// Snapshot of a symbolic link's own metadata (never its target's).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkAttributes {
    /// Modification time of the link in seconds since the Unix epoch.
    pub mod_time: i64,
}

impl LinkAttributes {
    pub fn new(mod_time: i64) -> Self {
        Self { mod_time }
    }
}

/// Snapshot of a folder's metadata on one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FolderAttributes {
    /// Whether the folder was reached through a followed symlink.
    pub is_followed_symlink: bool,
}

impl FolderAttributes {
    pub fn new(is_followed_symlink: bool) -> Self {
        Self { is_followed_symlink }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_attributes_default() {
        let attr = FileAttributes::default();
        assert_eq!(attr.mod_time, 0);
        assert_eq!(attr.file_size, 0);
        assert!(attr.file_print.is_none());
        assert!(!attr.is_followed_symlink);
    }

    #[test]
    fn test_file_attributes_ordering() {
        let older = FileAttributes::new(100, 10, None, false);
        let newer = FileAttributes::new(200, 10, None, false);
        assert!(older < newer);
        assert_eq!(older, FileAttributes::new(100, 10, None, false));
        assert_ne!(older, FileAttributes::new(100, 10, Some(FingerPrint::new(7)), false));
    }

    #[test]
    fn test_file_attributes_serde() {
        let attr = FileAttributes::new(-5, 42, Some(FingerPrint::new(9)), true);
        let json = serde_json::to_string(&attr).unwrap();
        let back: FileAttributes = serde_json::from_str(&json).unwrap();
        assert_eq!(attr, back);
    }
}
