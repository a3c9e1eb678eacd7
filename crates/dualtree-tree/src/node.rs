//! Item nodes and the operations shared by all three item kinds.

use std::cell::Cell;

use compact_str::CompactString;
use strum::Display;
use tracing::trace;

use dualtree_core::{
    CompareResult, FileAttributes, FolderAttributes, LinkAttributes, Side, SideArray,
    SimpleCategory, SyncDirection, SyncOperation,
};

use crate::base::BaseFolderPair;
use crate::container::ContainerData;
use crate::registry::ObjectId;

/// The three concrete item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ItemKind {
    File,
    Symlink,
    Folder,
}

/// State shared by every item kind.
#[derive(Debug)]
pub(crate) struct ItemState {
    /// Empty name: the item does not exist on that side.
    pub(crate) item_name: SideArray<CompactString>,
    pub(crate) category: CompareResult,
    /// Only filled for `Conflict` and `DifferentMetadata`.
    pub(crate) category_descr: CompactString,
    pub(crate) active: bool,
    /// Invariant: `sync_dir_conflict` is empty or `sync_dir` is `None`.
    pub(crate) sync_dir: SyncDirection,
    pub(crate) sync_dir_conflict: CompactString,
}

impl ItemState {
    pub(crate) fn new(item_name: SideArray<CompactString>, category: CompareResult) -> Self {
        Self {
            item_name,
            category,
            category_descr: CompactString::default(),
            active: true,
            sync_dir: SyncDirection::None,
            sync_dir_conflict: CompactString::default(),
        }
    }

    pub(crate) fn is_empty(&self, side: Side) -> bool {
        self.item_name[side].is_empty()
    }

    pub(crate) fn is_pair_empty(&self) -> bool {
        self.is_empty(Side::Left) && self.is_empty(Side::Right)
    }

    /// Name on `side`, or the other side's name if the item is missing there.
    pub(crate) fn item_name(&self, side: Side) -> &str {
        let name = &self.item_name[side];
        if !name.is_empty() {
            return name;
        }
        &self.item_name[side.other()]
    }

    fn set_sync_dir(&mut self, dir: SyncDirection) {
        self.sync_dir = dir;
        self.sync_dir_conflict.clear();
    }

    fn flip(&mut self) {
        self.item_name.swap();
        self.category = self.category.flipped();
    }
}

#[derive(Debug)]
pub(crate) struct FileData {
    pub(crate) attr: SideArray<FileAttributes>,
    pub(crate) move_ref: Option<ObjectId>,
}

#[derive(Debug)]
pub(crate) struct LinkData {
    pub(crate) attr: SideArray<LinkAttributes>,
}

#[derive(Debug)]
pub(crate) struct FolderData {
    pub(crate) attr: SideArray<FolderAttributes>,
    pub(crate) container: ContainerData,
    /// Depends on all children, so it is buffered until the next change.
    pub(crate) sync_op_buffered: Cell<Option<SyncOperation>>,
}

#[derive(Debug)]
pub(crate) enum NodeData {
    File(FileData),
    Symlink(LinkData),
    Folder(FolderData),
}

impl NodeData {
    pub(crate) fn kind(&self) -> ItemKind {
        match self {
            NodeData::File(_) => ItemKind::File,
            NodeData::Symlink(_) => ItemKind::Symlink,
            NodeData::Folder(_) => ItemKind::Folder,
        }
    }

    /// Reset the per-kind payload of one side.
    fn clear_side(&mut self, side: Side) {
        match self {
            NodeData::File(file) => file.attr[side] = FileAttributes::default(),
            NodeData::Symlink(link) => link.attr[side] = LinkAttributes::default(),
            NodeData::Folder(folder) => folder.attr[side] = FolderAttributes::default(),
        }
    }

    fn swap_sides(&mut self) {
        match self {
            NodeData::File(file) => file.attr.swap(),
            NodeData::Symlink(link) => link.attr.swap(),
            NodeData::Folder(folder) => folder.attr.swap(),
        }
    }

    pub(crate) fn as_folder(&self) -> Option<&FolderData> {
        match self {
            NodeData::Folder(folder) => Some(folder),
            _ => None,
        }
    }

    pub(crate) fn as_folder_mut(&mut self) -> Option<&mut FolderData> {
        match self {
            NodeData::Folder(folder) => Some(folder),
            _ => None,
        }
    }
}

/// One item in the arena.
#[derive(Debug)]
pub(crate) struct FsNode {
    /// `None` for direct children of the folder pair's root.
    pub(crate) parent: Option<ObjectId>,
    pub(crate) item: ItemState,
    pub(crate) data: NodeData,
}

impl BaseFolderPair {
    /// Signal a sync-relevant change at `from` and every ancestor of it.
    ///
    /// Clears the buffered sync operation of each folder on the way up.
    pub(crate) fn notify_sync_cfg_changed(&self, from: Option<ObjectId>) {
        let mut current = from;
        while let Some(id) = current {
            let Some(node) = self.nodes.get(id) else {
                return;
            };
            if let Some(folder) = node.data.as_folder() {
                folder.sync_op_buffered.set(None);
            }
            current = node.parent;
        }
    }

    pub(crate) fn set_active(&mut self, id: ObjectId, active: bool) {
        self.nodes[id].item.active = active;
        self.notify_sync_cfg_changed(Some(id));
    }

    pub(crate) fn set_sync_dir(&mut self, id: ObjectId, dir: SyncDirection) {
        self.nodes[id].item.set_sync_dir(dir);
        self.notify_sync_cfg_changed(Some(id));
    }

    pub(crate) fn set_sync_dir_conflict(&mut self, id: ObjectId, description: &str) {
        debug_assert!(!description.is_empty(), "conflict needs a description");
        let item = &mut self.nodes[id].item;
        item.sync_dir = SyncDirection::None;
        item.sync_dir_conflict = CompactString::from(description);
        self.notify_sync_cfg_changed(Some(id));
    }

    pub(crate) fn set_category(&mut self, id: ObjectId, category: SimpleCategory) {
        let item = &mut self.nodes[id].item;
        item.category = category.into();
        item.category_descr.clear();
    }

    pub(crate) fn set_category_with_description(
        &mut self,
        id: ObjectId,
        category: CompareResult,
        description: &str,
    ) {
        debug_assert!(category.has_description());
        debug_assert!(!description.is_empty(), "{category} needs a description");
        let item = &mut self.nodes[id].item;
        item.category = category;
        item.category_descr = CompactString::from(description);
    }

    /// Drop the item from `side` without removing the node.
    ///
    /// Folders take all their children on that side with them.
    pub(crate) fn remove_object(&mut self, id: ObjectId, side: Side) {
        let node = &mut self.nodes[id];
        let old_name = CompactString::from(node.item.item_name(side));

        node.item.category = if node.item.is_empty(side.other()) {
            CompareResult::Equal
        } else {
            CompareResult::side_only(side.other())
        };
        node.item.category_descr.clear();
        node.item.item_name[side].clear();
        node.data.clear_side(side);

        if let NodeData::Folder(folder) = &node.data {
            let children = folder.container.child_ids();
            for child in children {
                self.remove_object(child, side);
            }
        }

        self.set_sync_dir(id, SyncDirection::None);
        self.propagate_changed_item_name(id, side, &old_name);
    }

    /// Record that both sides now hold `item_name` and are equal.
    pub(crate) fn set_synced(&mut self, id: ObjectId, item_name: &str) {
        let node = &mut self.nodes[id];
        debug_assert!(!node.item.is_pair_empty(), "cannot sync an item missing on both sides");
        let old_names = SideArray::from_fn(|side| CompactString::from(node.item.item_name(side)));

        node.item.item_name = SideArray::splat(CompactString::from(item_name));
        node.item.category = CompareResult::Equal;
        node.item.category_descr.clear();
        self.set_sync_dir(id, SyncDirection::None);

        for side in Side::BOTH {
            self.propagate_changed_item_name(id, side, &old_names[side]);
        }
    }

    /// Change the name on one side, e.g. after a rename on disk.
    pub(crate) fn rename(&mut self, id: ObjectId, side: Side, item_name: &str) {
        let node = &mut self.nodes[id];
        debug_assert!(!node.item.is_empty(side), "cannot rename a missing item");
        debug_assert!(!item_name.is_empty());
        let old_name = node.item.item_name[side].clone();

        node.item.item_name[side] = CompactString::from(item_name);
        self.notify_sync_cfg_changed(Some(id));
        self.propagate_changed_item_name(id, side, &old_name);
    }

    /// Swap sides of this item (and, for folders, of everything below it).
    pub(crate) fn flip_object(&mut self, id: ObjectId) {
        if self.nodes[id].data.as_folder().is_some() {
            self.flip_container(Some(id));
        }
        let node = &mut self.nodes[id];
        node.item.flip();
        node.data.swap_sides();
        self.notify_sync_cfg_changed(Some(id));
    }

    /// Refresh cached relative paths below `id` after its name on `side`
    /// changed from `old_name`.
    fn propagate_changed_item_name(&mut self, id: ObjectId, side: Side, old_name: &str) {
        let node = &self.nodes[id];
        // Both sides may just have been removed.
        if node.item.is_pair_empty() {
            return;
        }
        if node.item.item_name(side) != old_name && node.data.as_folder().is_some() {
            trace!(%id, %side, old_name, new_name = node.item.item_name(side), "refreshing relative paths");
            self.update_rel_paths_rec(id, side);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(left: &str, right: &str) -> ItemState {
        ItemState::new(SideArray::new(left.into(), right.into()), CompareResult::Equal)
    }

    #[test]
    fn test_item_name_falls_back_to_other_side() {
        let item = state("a.txt", "");
        assert!(item.is_empty(Side::Right));
        assert!(!item.is_pair_empty());
        assert_eq!(item.item_name(Side::Right), "a.txt");

        let item = state("", "");
        assert!(item.is_pair_empty());
        assert_eq!(item.item_name(Side::Left), "");
    }

    #[test]
    fn test_set_sync_dir_clears_conflict() {
        let mut item = state("a", "a");
        item.sync_dir_conflict = "both changed".into();
        item.set_sync_dir(SyncDirection::Right);
        assert!(item.sync_dir_conflict.is_empty());
        assert_eq!(item.sync_dir, SyncDirection::Right);
    }

    #[test]
    fn test_item_flip() {
        let mut item = ItemState::new(SideArray::new("a".into(), "".into()), CompareResult::LeftOnly);
        item.flip();
        assert_eq!(item.category, CompareResult::RightOnly);
        assert!(item.is_empty(Side::Left));
        assert_eq!(item.item_name[Side::Right], "a");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ItemKind::Symlink.to_string(), "symlink");
    }
}
