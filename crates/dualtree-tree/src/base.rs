//! The root container of one compared folder pair.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;

use dualtree_core::{CompareConfig, CompareVariant, FilterConfig, Side, SideArray, short_display_name};

use crate::container::ContainerData;
use crate::error::TreeError;
use crate::handle::{ContainerMut, FileMut, FolderMut, ObjectMut, SymlinkMut};
use crate::node::{FsNode, ItemKind};
use crate::registry::{ObjectId, Registry, TreeId};
use crate::view::{ContainerRef, FileRef, FolderRef, ObjectRef, SymlinkRef};

/// State of a folder pair's root directory at comparison time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum BaseFolderStatus {
    Existing,
    NotExisting,
    /// Existence could not be determined.
    Failure,
}

/// Comparison result for one pair of root folders.
///
/// Owns every item below the roots. Items are addressed through
/// [`ObjectId`] handles issued by this pair; a handle keeps resolving until
/// its item is pruned by [`remove_empty`](Self::remove_empty).
pub struct BaseFolderPair {
    pub(crate) nodes: Registry<FsNode>,
    pub(crate) root: ContainerData,
    folder_path: SideArray<PathBuf>,
    folder_status: SideArray<BaseFolderStatus>,
    config: CompareConfig,
}

impl BaseFolderPair {
    /// Create an empty folder pair.
    pub fn new(
        folder_path_left: impl Into<PathBuf>,
        folder_status_left: BaseFolderStatus,
        folder_path_right: impl Into<PathBuf>,
        folder_status_right: BaseFolderStatus,
        config: CompareConfig,
    ) -> Self {
        let pair = Self {
            nodes: Registry::new(),
            root: ContainerData::default(),
            folder_path: SideArray::new(folder_path_left.into(), folder_path_right.into()),
            folder_status: SideArray::new(folder_status_left, folder_status_right),
            config,
        };
        debug!(
            tree = %pair.tree_id(),
            left = %pair.folder_path[Side::Left].display(),
            right = %pair.folder_path[Side::Right].display(),
            "created folder pair"
        );
        pair
    }

    /// Identifier shared by all handles this pair issues.
    pub fn tree_id(&self) -> TreeId {
        self.nodes.tree_id()
    }

    /// Absolute path of the root folder on `side`.
    pub fn folder_path(&self, side: Side) -> &Path {
        &self.folder_path[side]
    }

    /// Root folder status at the time of comparison.
    pub fn folder_status(&self, side: Side) -> BaseFolderStatus {
        self.folder_status[side]
    }

    /// Update the root status, e.g. after the root directory was created.
    pub fn set_folder_status(&mut self, side: Side, status: BaseFolderStatus) {
        debug!(tree = %self.tree_id(), %side, %status, "folder status changed");
        self.folder_status[side] = status;
    }

    /// Settings used while this pair was compared.
    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.config.filter
    }

    pub fn compare_variant(&self) -> CompareVariant {
        self.config.variant
    }

    pub fn file_time_tolerance(&self) -> u32 {
        self.config.file_time_tolerance
    }

    pub fn ignored_time_shift(&self) -> &[u32] {
        &self.config.ignore_time_shift_minutes
    }

    /// Short name for display, based on what both root paths share.
    pub fn short_display_name(&self) -> String {
        short_display_name(&self.folder_path[Side::Left], &self.folder_path[Side::Right])
    }

    /// Number of live items below the roots.
    pub fn item_count(&self) -> usize {
        self.nodes.len()
    }

    /// Read-only view of the root container.
    pub fn root(&self) -> ContainerRef<'_> {
        ContainerRef::new(self, None)
    }

    /// Mutable view of the root container, used to populate the tree.
    pub fn root_mut(&mut self) -> ContainerMut<'_> {
        ContainerMut::new(self, None)
    }

    /// Look up a live item. Returns `None` once the item has been pruned.
    pub fn resolve(&self, id: ObjectId) -> Option<ObjectRef<'_>> {
        self.nodes.contains(id).then(|| ObjectRef::new(self, id))
    }

    pub fn resolve_mut(&mut self, id: ObjectId) -> Option<ObjectMut<'_>> {
        self.nodes.contains(id).then(|| ObjectMut::new(self, id))
    }

    /// Check that `id` is live and of the `expected` kind.
    fn check_kind(&self, id: ObjectId, expected: ItemKind) -> Result<(), TreeError> {
        let found = self.nodes.lookup(id)?.data.kind();
        if found != expected {
            return Err(TreeError::KindMismatch {
                id,
                expected,
                found,
            });
        }
        Ok(())
    }

    pub fn file(&self, id: ObjectId) -> Result<FileRef<'_>, TreeError> {
        self.check_kind(id, ItemKind::File)?;
        Ok(FileRef::new(self, id))
    }

    pub fn symlink(&self, id: ObjectId) -> Result<SymlinkRef<'_>, TreeError> {
        self.check_kind(id, ItemKind::Symlink)?;
        Ok(SymlinkRef::new(self, id))
    }

    pub fn folder(&self, id: ObjectId) -> Result<FolderRef<'_>, TreeError> {
        self.check_kind(id, ItemKind::Folder)?;
        Ok(FolderRef::new(self, id))
    }

    pub fn file_mut(&mut self, id: ObjectId) -> Result<FileMut<'_>, TreeError> {
        self.check_kind(id, ItemKind::File)?;
        Ok(FileMut::new(self, id))
    }

    pub fn symlink_mut(&mut self, id: ObjectId) -> Result<SymlinkMut<'_>, TreeError> {
        self.check_kind(id, ItemKind::Symlink)?;
        Ok(SymlinkMut::new(self, id))
    }

    pub fn folder_mut(&mut self, id: ObjectId) -> Result<FolderMut<'_>, TreeError> {
        self.check_kind(id, ItemKind::Folder)?;
        Ok(FolderMut::new(self, id))
    }

    /// Swap left and right for the whole pair.
    pub fn flip(&mut self) {
        self.flip_container(None);
        self.folder_status.swap();
        self.folder_path.swap();
        debug!(tree = %self.tree_id(), "flipped folder pair");
    }

    /// Physically remove all items that no longer exist on either side.
    ///
    /// Returns the number of removed items. Handles to them stop resolving.
    pub fn remove_empty(&mut self) -> usize {
        let removed = self.remove_empty_rec(None);
        debug!(tree = %self.tree_id(), removed, remaining = self.item_count(), "pruned folder pair");
        removed
    }
}

impl std::fmt::Debug for BaseFolderPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseFolderPair")
            .field("tree", &self.tree_id())
            .field("folder_path", &self.folder_path)
            .field("folder_status", &self.folder_status)
            .field("items", &self.item_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ContainerPath;

    fn pair() -> BaseFolderPair {
        BaseFolderPair::new(
            "/left/docs",
            BaseFolderStatus::Existing,
            "/right/docs",
            BaseFolderStatus::NotExisting,
            CompareConfig::default(),
        )
    }

    #[test]
    fn test_root_accessors() {
        let pair = pair();
        assert_eq!(pair.folder_path(Side::Left), Path::new("/left/docs"));
        assert_eq!(pair.folder_status(Side::Right), BaseFolderStatus::NotExisting);
        assert_eq!(pair.item_count(), 0);
        assert_eq!(pair.short_display_name(), "docs");
        assert_eq!(pair.root().container_path(Side::Left), "");
        assert!(pair.root().is_empty());
    }

    #[test]
    fn test_set_folder_status() {
        let mut pair = pair();
        pair.set_folder_status(Side::Right, BaseFolderStatus::Existing);
        assert_eq!(pair.folder_status(Side::Right), BaseFolderStatus::Existing);
    }

    #[test]
    fn test_flip_swaps_roots() {
        let mut pair = pair();
        pair.flip();
        assert_eq!(pair.folder_path(Side::Left), Path::new("/right/docs"));
        assert_eq!(pair.folder_status(Side::Left), BaseFolderStatus::NotExisting);
        assert_eq!(pair.folder_status(Side::Right), BaseFolderStatus::Existing);
    }
}
