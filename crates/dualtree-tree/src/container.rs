//! Child collections, cached relative paths and structural cleanup.

use std::cell::Cell;
use std::collections::HashSet;

use compact_str::CompactString;
use tracing::debug;

use dualtree_core::{
    CompareResult, FileAttributes, FolderAttributes, LinkAttributes, Side, SideArray, append_path,
};

use crate::base::BaseFolderPair;
use crate::node::{FileData, FolderData, FsNode, ItemKind, ItemState, LinkData, NodeData};
use crate::registry::ObjectId;

/// Children of a folder (or of a folder pair's root), in insertion order.
#[derive(Debug, Default)]
pub(crate) struct ContainerData {
    pub(crate) files: Vec<ObjectId>,
    pub(crate) symlinks: Vec<ObjectId>,
    pub(crate) folders: Vec<ObjectId>,
    /// Path relative to the root of the folder pair; empty for the root.
    pub(crate) rel_path: SideArray<CompactString>,
}

impl ContainerData {
    pub(crate) fn child_ids(&self) -> Vec<ObjectId> {
        self.files
            .iter()
            .chain(&self.symlinks)
            .chain(&self.folders)
            .copied()
            .collect()
    }

    pub(crate) fn child_count(&self) -> usize {
        self.files.len() + self.symlinks.len() + self.folders.len()
    }
}

/// Per-kind payload of an item about to be added.
pub(crate) enum NewItem {
    File(SideArray<FileAttributes>),
    Symlink(SideArray<LinkAttributes>),
    Folder(SideArray<FolderAttributes>),
}

impl BaseFolderPair {
    /// The container at `at`: the root for `None`, otherwise a folder.
    pub(crate) fn container(&self, at: Option<ObjectId>) -> &ContainerData {
        match at {
            None => &self.root,
            Some(id) => match self.nodes[id].data.as_folder() {
                Some(folder) => &folder.container,
                None => unreachable!("only folders contain items"),
            },
        }
    }

    fn container_mut(&mut self, at: Option<ObjectId>) -> &mut ContainerData {
        match at {
            None => &mut self.root,
            Some(id) => match self.nodes[id].data.as_folder_mut() {
                Some(folder) => &mut folder.container,
                None => unreachable!("only folders contain items"),
            },
        }
    }

    /// Create a child of the container at `parent`.
    ///
    /// An empty name means the item does not exist on that side.
    pub(crate) fn add_item(
        &mut self,
        parent: Option<ObjectId>,
        name: SideArray<CompactString>,
        category: CompareResult,
        payload: NewItem,
    ) -> ObjectId {
        debug_assert!(
            !name[Side::Left].is_empty() || !name[Side::Right].is_empty(),
            "item must exist on at least one side"
        );
        let item = ItemState::new(name, category);

        let data = match payload {
            NewItem::File(attr) => NodeData::File(FileData {
                attr,
                move_ref: None,
            }),
            NewItem::Symlink(attr) => NodeData::Symlink(LinkData { attr }),
            NewItem::Folder(attr) => {
                let parent_paths = &self.container(parent).rel_path;
                let rel_path =
                    SideArray::from_fn(|side| append_path(&parent_paths[side], item.item_name(side)));
                NodeData::Folder(FolderData {
                    attr,
                    container: ContainerData {
                        rel_path,
                        ..ContainerData::default()
                    },
                    sync_op_buffered: Cell::new(None),
                })
            }
        };

        let kind = data.kind();
        let id = self.nodes.insert(FsNode { parent, item, data });
        let siblings = self.container_mut(parent);
        match kind {
            ItemKind::File => siblings.files.push(id),
            ItemKind::Symlink => siblings.symlinks.push(id),
            ItemKind::Folder => siblings.folders.push(id),
        }
        self.notify_sync_cfg_changed(parent);
        id
    }

    /// Recompute the cached relative path of folder `id` on `side` and of all
    /// folders below it.
    pub(crate) fn update_rel_paths_rec(&mut self, id: ObjectId, side: Side) {
        let node = &self.nodes[id];
        let new_path = append_path(&self.container(node.parent).rel_path[side], node.item.item_name(side));

        let folder = match self.nodes[id].data.as_folder_mut() {
            Some(folder) => folder,
            None => return,
        };
        folder.container.rel_path[side] = new_path;

        let subfolders = folder.container.folders.clone();
        for sub in subfolders {
            self.update_rel_paths_rec(sub, side);
        }
    }

    /// Swap sides of every child below `at` and of the container's own path.
    pub(crate) fn flip_container(&mut self, at: Option<ObjectId>) {
        for child in self.container(at).child_ids() {
            self.flip_object(child);
        }
        self.container_mut(at).rel_path.swap();
    }

    /// Physically remove every item below `at` that is missing on both sides.
    ///
    /// Works bottom-up, so a folder goes only once nothing with content is
    /// left inside it. Returns the number of removed items.
    pub(crate) fn remove_empty_rec(&mut self, at: Option<ObjectId>) -> usize {
        let mut removed = 0;
        for sub in self.container(at).folders.clone() {
            removed += self.remove_empty_rec(Some(sub));
        }

        let nodes = &self.nodes;
        let is_removable = |id: &ObjectId| {
            let node = &nodes[*id];
            node.item.is_pair_empty()
                && node
                    .data
                    .as_folder()
                    .is_none_or(|folder| folder.container.child_count() == 0)
        };

        let container = self.container(at);
        let doomed: HashSet<ObjectId> = container
            .files
            .iter()
            .chain(&container.symlinks)
            .chain(&container.folders)
            .filter(|id| is_removable(id))
            .copied()
            .collect();

        if doomed.is_empty() {
            return removed;
        }

        let container = self.container_mut(at);
        container.files.retain(|id| !doomed.contains(id));
        container.symlinks.retain(|id| !doomed.contains(id));
        container.folders.retain(|id| !doomed.contains(id));

        for &id in &doomed {
            self.nodes.remove(id);
        }
        removed += doomed.len();

        debug!(removed = doomed.len(), container = ?at, "removed empty items");
        self.notify_sync_cfg_changed(at);
        removed
    }
}
