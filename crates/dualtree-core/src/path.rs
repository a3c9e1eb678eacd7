//! Relative path composition.
//!
//! Relative paths are stored as `/`-separated strings without leading or
//! trailing separator; the root of a folder pair has the empty relative path.

use std::path::{Component, Path, PathBuf};

use compact_str::CompactString;

/// Separator between item names inside a relative path.
pub const FILE_NAME_SEPARATOR: char = '/';

/// Append an item name to a relative path.
pub fn append_path(base: &str, item_name: &str) -> CompactString {
    if base.is_empty() {
        return CompactString::from(item_name);
    }
    let mut path = CompactString::with_capacity(base.len() + 1 + item_name.len());
    path.push_str(base);
    path.push(FILE_NAME_SEPARATOR);
    path.push_str(item_name);
    path
}

/// Resolve a relative path against an absolute root path.
pub fn append_rel_path(root: &Path, rel_path: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    path.extend(rel_path.split(FILE_NAME_SEPARATOR).filter(|c| !c.is_empty()));
    path
}

/// Short display name for a pair of root paths.
///
/// Uses the trailing components both paths share, e.g. `/a/docs` and
/// `/b/docs` become `docs`. Falls back to both final names when nothing is
/// shared.
pub fn short_display_name(left: &Path, right: &Path) -> String {
    let names = |path: &Path| {
        path.components()
            .rev()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
    };
    let left_names = names(left);
    let right_names = names(right);

    let common: Vec<&str> = left_names
        .iter()
        .zip(&right_names)
        .take_while(|(l, r)| l == r)
        .map(|(l, _)| l.as_str())
        .collect();

    if !common.is_empty() {
        let sep = FILE_NAME_SEPARATOR.to_string();
        return common.into_iter().rev().collect::<Vec<_>>().join(&sep);
    }

    let last = |names: &[String], path: &Path| {
        names.first().cloned().unwrap_or_else(|| path.display().to_string())
    };
    format!("{} <-> {}", last(&left_names, left), last(&right_names, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_path() {
        assert_eq!(append_path("", "a"), "a");
        assert_eq!(append_path("a", "b"), "a/b");
        assert_eq!(append_path("a/b", "c.txt"), "a/b/c.txt");
    }

    #[test]
    fn test_append_rel_path() {
        assert_eq!(append_rel_path(Path::new("/root"), ""), PathBuf::from("/root"));
        assert_eq!(
            append_rel_path(Path::new("/root"), "sub/file.txt"),
            PathBuf::from("/root/sub/file.txt")
        );
    }

    #[test]
    fn test_short_display_name_common_suffix() {
        assert_eq!(short_display_name(Path::new("/a/docs"), Path::new("/b/docs")), "docs");
        assert_eq!(
            short_display_name(Path::new("/a/x/docs"), Path::new("/b/x/docs")),
            "x/docs"
        );
    }

    #[test]
    fn test_short_display_name_fallback() {
        assert_eq!(
            short_display_name(Path::new("/a/left"), Path::new("/b/right")),
            "left <-> right"
        );
    }
}
