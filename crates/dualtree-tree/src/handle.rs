//! Mutable handles.
//!
//! A handle holds the folder pair mutably together with the id of one item or
//! container. Every setter keeps the derived state consistent: cached
//! relative paths, buffered folder sync operations and conflict texts.

use std::ops::{Deref, DerefMut};

use compact_str::CompactString;
use tracing::trace;

use dualtree_core::{
    CompareDirResult, CompareResult, FileAttributes, FingerPrint, FolderAttributes,
    LinkAttributes, Side, SideArray, SimpleCategory, SyncDirection,
};

use crate::base::BaseFolderPair;
use crate::container::NewItem;
use crate::node::{ItemKind, NodeData};
use crate::registry::ObjectId;
use crate::view::{ContainerRef, FileRef, FolderRef, ObjectRef, SymlinkRef};

/// Mutable handle to any item.
pub struct ObjectMut<'a> {
    pub(crate) pair: &'a mut BaseFolderPair,
    pub(crate) id: ObjectId,
}

impl<'a> ObjectMut<'a> {
    pub(crate) fn new(pair: &'a mut BaseFolderPair, id: ObjectId) -> Self {
        Self { pair, id }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ItemKind {
        self.pair.nodes[self.id].data.kind()
    }

    /// Read-only view of the item.
    pub fn as_ref(&self) -> ObjectRef<'_> {
        ObjectRef::new(self.pair, self.id)
    }

    /// Include or exclude the item from synchronization.
    pub fn set_active(&mut self, active: bool) {
        self.pair.set_active(self.id, active);
    }

    /// Set the direction. Clears any direction conflict.
    pub fn set_sync_dir(&mut self, direction: SyncDirection) {
        self.pair.set_sync_dir(self.id, direction);
    }

    /// Mark that no direction could be chosen, giving the reason.
    pub fn set_sync_dir_conflict(&mut self, description: &str) {
        self.pair.set_sync_dir_conflict(self.id, description);
    }

    /// Set one of the categories that carry no description.
    pub fn set_category(&mut self, category: SimpleCategory) {
        self.pair.set_category(self.id, category);
    }

    pub fn set_category_conflict(&mut self, description: &str) {
        self.pair
            .set_category_with_description(self.id, CompareResult::Conflict, description);
    }

    pub fn set_category_diff_metadata(&mut self, description: &str) {
        self.pair
            .set_category_with_description(self.id, CompareResult::DifferentMetadata, description);
    }

    /// Forget the item on `side`, e.g. after it was deleted there.
    ///
    /// The node stays in the tree until [`BaseFolderPair::remove_empty`].
    pub fn remove_object(&mut self, side: Side) {
        self.pair.remove_object(self.id, side);
    }

    /// Change the item's name on `side`. Paths below a folder follow.
    pub fn rename(&mut self, side: Side, item_name: &str) {
        self.pair.rename(self.id, side, item_name);
    }

    pub fn into_file(self) -> Option<FileMut<'a>> {
        (self.kind() == ItemKind::File).then_some(FileMut(self))
    }

    pub fn into_symlink(self) -> Option<SymlinkMut<'a>> {
        (self.kind() == ItemKind::Symlink).then_some(SymlinkMut(self))
    }

    pub fn into_folder(self) -> Option<FolderMut<'a>> {
        (self.kind() == ItemKind::Folder).then_some(FolderMut(self))
    }
}

/// Mutable handle to a file.
pub struct FileMut<'a>(ObjectMut<'a>);

impl<'a> FileMut<'a> {
    pub(crate) fn new(pair: &'a mut BaseFolderPair, id: ObjectId) -> Self {
        Self(ObjectMut::new(pair, id))
    }

    pub fn file(&self) -> FileRef<'_> {
        FileRef::new(self.0.pair, self.0.id)
    }

    pub fn into_object(self) -> ObjectMut<'a> {
        self.0
    }

    fn data_mut(&mut self) -> &mut crate::node::FileData {
        match &mut self.0.pair.nodes[self.0.id].data {
            NodeData::File(file) => file,
            _ => unreachable!("FileMut always points at a file"),
        }
    }

    /// Link this file to the other end of a detected move.
    ///
    /// Only takes effect when both files reference each other.
    pub fn set_move_ref(&mut self, partner: Option<ObjectId>) {
        let id = self.0.id;
        trace!(%id, partner = ?partner, "set move reference");
        self.data_mut().move_ref = partner;
        self.0.pair.notify_sync_cfg_changed(Some(id));
        if let Some(partner) = partner {
            self.0.pair.notify_sync_cfg_changed(Some(partner));
        }
    }

    /// Drop the fingerprint on `side`, e.g. when the file id became unreliable.
    pub fn clear_file_print(&mut self, side: Side) {
        self.data_mut().attr[side].file_print = None;
    }

    /// Record that the file was copied from the other side to `side_trg`.
    ///
    /// Both sides end up `Equal` with `item_name` and the same size; times,
    /// fingerprints and symlink flags are those reported for each side.
    #[allow(clippy::too_many_arguments)]
    pub fn set_synced_to(
        &mut self,
        side_trg: Side,
        item_name: &str,
        file_size: u64,
        mod_time_trg: i64,
        mod_time_src: i64,
        file_print_trg: Option<FingerPrint>,
        file_print_src: Option<FingerPrint>,
        is_symlink_trg: bool,
        is_symlink_src: bool,
    ) {
        let data = self.data_mut();
        data.attr[side_trg] =
            FileAttributes::new(mod_time_trg, file_size, file_print_trg, is_symlink_trg);
        data.attr[side_trg.other()] =
            FileAttributes::new(mod_time_src, file_size, file_print_src, is_symlink_src);
        data.move_ref = None;
        self.0.pair.set_synced(self.0.id, item_name);
    }
}

impl<'a> Deref for FileMut<'a> {
    type Target = ObjectMut<'a>;

    fn deref(&self) -> &ObjectMut<'a> {
        &self.0
    }
}

impl DerefMut for FileMut<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Mutable handle to a symlink.
pub struct SymlinkMut<'a>(ObjectMut<'a>);

impl<'a> SymlinkMut<'a> {
    pub(crate) fn new(pair: &'a mut BaseFolderPair, id: ObjectId) -> Self {
        Self(ObjectMut::new(pair, id))
    }

    pub fn symlink(&self) -> SymlinkRef<'_> {
        SymlinkRef::new(self.0.pair, self.0.id)
    }

    pub fn into_object(self) -> ObjectMut<'a> {
        self.0
    }

    /// Record that the link was copied from the other side to `side_trg`.
    pub fn set_synced_to(
        &mut self,
        side_trg: Side,
        item_name: &str,
        mod_time_trg: i64,
        mod_time_src: i64,
    ) {
        match &mut self.0.pair.nodes[self.0.id].data {
            NodeData::Symlink(link) => {
                link.attr[side_trg] = LinkAttributes::new(mod_time_trg);
                link.attr[side_trg.other()] = LinkAttributes::new(mod_time_src);
            }
            _ => unreachable!("SymlinkMut always points at a symlink"),
        }
        self.0.pair.set_synced(self.0.id, item_name);
    }
}

impl<'a> Deref for SymlinkMut<'a> {
    type Target = ObjectMut<'a>;

    fn deref(&self) -> &ObjectMut<'a> {
        &self.0
    }
}

impl DerefMut for SymlinkMut<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Mutable handle to a folder.
pub struct FolderMut<'a>(ObjectMut<'a>);

impl<'a> FolderMut<'a> {
    pub(crate) fn new(pair: &'a mut BaseFolderPair, id: ObjectId) -> Self {
        Self(ObjectMut::new(pair, id))
    }

    pub fn folder(&self) -> FolderRef<'_> {
        FolderRef::new(self.0.pair, self.0.id)
    }

    pub fn into_object(self) -> ObjectMut<'a> {
        self.0
    }

    /// Mutable access to the items inside this folder.
    pub fn children_mut(&mut self) -> ContainerMut<'_> {
        ContainerMut::new(self.0.pair, Some(self.0.id))
    }

    pub fn into_children(self) -> ContainerMut<'a> {
        ContainerMut::new(self.0.pair, Some(self.0.id))
    }

    /// Record that the folder was created on `side_trg`.
    pub fn set_synced_to(
        &mut self,
        side_trg: Side,
        item_name: &str,
        is_symlink_trg: bool,
        is_symlink_src: bool,
    ) {
        match &mut self.0.pair.nodes[self.0.id].data {
            NodeData::Folder(folder) => {
                folder.attr[side_trg] = FolderAttributes::new(is_symlink_trg);
                folder.attr[side_trg.other()] = FolderAttributes::new(is_symlink_src);
            }
            _ => unreachable!("FolderMut always points at a folder"),
        }
        self.0.pair.set_synced(self.0.id, item_name);
    }
}

impl<'a> Deref for FolderMut<'a> {
    type Target = ObjectMut<'a>;

    fn deref(&self) -> &ObjectMut<'a> {
        &self.0
    }
}

impl DerefMut for FolderMut<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Mutable access to a folder's children or to a folder pair's root.
///
/// New items are appended in insertion order per kind.
pub struct ContainerMut<'a> {
    pub(crate) pair: &'a mut BaseFolderPair,
    pub(crate) at: Option<ObjectId>,
}

fn one_sided<T: Default>(side: Side, value: T) -> SideArray<T> {
    let mut pair = SideArray::<T>::default();
    pair[side] = value;
    pair
}

fn names(left: &str, right: &str) -> SideArray<CompactString> {
    SideArray::new(CompactString::from(left), CompactString::from(right))
}

impl<'a> ContainerMut<'a> {
    pub(crate) fn new(pair: &'a mut BaseFolderPair, at: Option<ObjectId>) -> Self {
        Self { pair, at }
    }

    pub fn as_ref(&self) -> ContainerRef<'_> {
        ContainerRef::new(self.pair, self.at)
    }

    /// The owning folder; `None` for the root.
    pub fn folder_id(&self) -> Option<ObjectId> {
        self.at
    }

    /// Add a file that exists on both sides.
    pub fn add_file(
        &mut self,
        name_left: &str,
        attr_left: FileAttributes,
        category: CompareResult,
        name_right: &str,
        attr_right: FileAttributes,
    ) -> FileMut<'_> {
        let id = self.pair.add_item(
            self.at,
            names(name_left, name_right),
            category,
            NewItem::File(SideArray::new(attr_left, attr_right)),
        );
        FileMut::new(self.pair, id)
    }

    /// Add a file that exists on `side` only.
    pub fn add_file_on_side(&mut self, side: Side, name: &str, attr: FileAttributes) -> FileMut<'_> {
        let id = self.pair.add_item(
            self.at,
            one_sided(side, CompactString::from(name)),
            CompareResult::side_only(side),
            NewItem::File(one_sided(side, attr)),
        );
        FileMut::new(self.pair, id)
    }

    /// Add a symlink that exists on both sides.
    pub fn add_link(
        &mut self,
        name_left: &str,
        attr_left: LinkAttributes,
        category: CompareResult,
        name_right: &str,
        attr_right: LinkAttributes,
    ) -> SymlinkMut<'_> {
        let id = self.pair.add_item(
            self.at,
            names(name_left, name_right),
            category,
            NewItem::Symlink(SideArray::new(attr_left, attr_right)),
        );
        SymlinkMut::new(self.pair, id)
    }

    pub fn add_link_on_side(
        &mut self,
        side: Side,
        name: &str,
        attr: LinkAttributes,
    ) -> SymlinkMut<'_> {
        let id = self.pair.add_item(
            self.at,
            one_sided(side, CompactString::from(name)),
            CompareResult::side_only(side),
            NewItem::Symlink(one_sided(side, attr)),
        );
        SymlinkMut::new(self.pair, id)
    }

    /// Add a folder that exists on both sides.
    pub fn add_folder(
        &mut self,
        name_left: &str,
        attr_left: FolderAttributes,
        category: CompareDirResult,
        name_right: &str,
        attr_right: FolderAttributes,
    ) -> FolderMut<'_> {
        let id = self.pair.add_item(
            self.at,
            names(name_left, name_right),
            category.into(),
            NewItem::Folder(SideArray::new(attr_left, attr_right)),
        );
        FolderMut::new(self.pair, id)
    }

    pub fn add_folder_on_side(
        &mut self,
        side: Side,
        name: &str,
        attr: FolderAttributes,
    ) -> FolderMut<'_> {
        let id = self.pair.add_item(
            self.at,
            one_sided(side, CompactString::from(name)),
            CompareResult::side_only(side),
            NewItem::Folder(one_sided(side, attr)),
        );
        FolderMut::new(self.pair, id)
    }
}
