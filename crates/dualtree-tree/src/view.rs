//! Read-only views of items and containers.
//!
//! Views borrow the [`BaseFolderPair`] they come from and are cheap to copy.
//! [`ObjectRef`] covers what all items share; [`FileRef`], [`SymlinkRef`] and
//! [`FolderRef`] add the kind-specific parts and dereference to it.

use std::ops::Deref;
use std::path::PathBuf;

use compact_str::CompactString;

use dualtree_core::{
    CompareDirResult, CompareResult, FileAttributes, FingerPrint, FolderAttributes,
    LinkAttributes, Side, SyncDirection, SyncOperation, append_path, append_rel_path,
};

use crate::base::BaseFolderPair;
use crate::container::ContainerData;
use crate::node::{FileData, FolderData, FsNode, ItemKind, LinkData, NodeData};
use crate::registry::ObjectId;
use crate::visit::FsObjectVisitor;

/// Absolute and relative path of an item or container.
pub trait PathInformation {
    /// Path relative to the folder pair's root on `side`, `/`-separated.
    ///
    /// Valid even if the item does not exist on `side`: the name from the
    /// other side is used in that case.
    fn relative_path(&self, side: Side) -> CompactString;

    /// Absolute path on `side`.
    fn abstract_path(&self, side: Side) -> PathBuf;

    /// Relative path without preference for a side.
    fn relative_path_any(&self) -> CompactString {
        self.relative_path(Side::Left)
    }
}

/// Cached relative path of something that holds children.
pub trait ContainerPath {
    fn container_path(&self, side: Side) -> &str;
}

/// View of any item.
#[derive(Clone, Copy)]
pub struct ObjectRef<'a> {
    pair: &'a BaseFolderPair,
    id: ObjectId,
    node: &'a FsNode,
}

/// An item resolved to its concrete kind.
#[derive(Clone, Copy)]
pub enum ItemRef<'a> {
    File(FileRef<'a>),
    Symlink(SymlinkRef<'a>),
    Folder(FolderRef<'a>),
}

impl<'a> ObjectRef<'a> {
    pub(crate) fn new(pair: &'a BaseFolderPair, id: ObjectId) -> Self {
        Self {
            pair,
            id,
            node: &pair.nodes[id],
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ItemKind {
        self.node.data.kind()
    }

    /// The folder pair this item belongs to.
    pub fn base(&self) -> &'a BaseFolderPair {
        self.pair
    }

    /// The folder containing this item, `None` at the top level.
    pub fn parent(&self) -> Option<FolderRef<'a>> {
        self.node.parent.map(|p| FolderRef::new(self.pair, p))
    }

    /// The container holding this item (its parent folder or the root).
    pub fn parent_container(&self) -> ContainerRef<'a> {
        ContainerRef::new(self.pair, self.node.parent)
    }

    pub fn is_empty(&self, side: Side) -> bool {
        self.node.item.is_empty(side)
    }

    /// True if the item exists on neither side.
    pub fn is_pair_empty(&self) -> bool {
        self.node.item.is_pair_empty()
    }

    /// Case-sensitive name on `side`, falling back to the other side's name.
    pub fn item_name(&self, side: Side) -> &'a str {
        self.node.item.item_name(side)
    }

    pub fn item_name_any(&self) -> &'a str {
        self.item_name(Side::Left)
    }

    pub fn category(&self) -> CompareResult {
        self.node.item.category
    }

    /// Extra text for `Conflict` and `DifferentMetadata`; empty otherwise.
    pub fn category_extra_description(&self) -> &'a str {
        debug_assert!(
            self.category().has_description() || self.node.item.category_descr.is_empty()
        );
        &self.node.item.category_descr
    }

    pub fn sync_dir(&self) -> SyncDirection {
        self.node.item.sync_dir
    }

    /// Why no sync direction could be chosen, if that is the case.
    pub fn sync_dir_conflict(&self) -> Option<&'a str> {
        let conflict = &self.node.item.sync_dir_conflict;
        (!conflict.is_empty()).then_some(conflict.as_str())
    }

    pub fn is_active(&self) -> bool {
        self.node.item.active
    }

    /// The operation the sync engine will perform for this item.
    ///
    /// For folders the result is buffered until something below changes.
    pub fn sync_operation(&self) -> SyncOperation {
        self.pair.sync_operation(self.id)
    }

    /// "What if" query: the operation for `direction`, as if the item were
    /// active and unconflicted (folders ignore their children).
    pub fn test_sync_operation(&self, direction: SyncDirection) -> SyncOperation {
        self.pair.test_sync_operation(self.id, direction)
    }

    /// The conflict text when the operation is an unresolved conflict.
    pub fn sync_op_conflict(&self) -> Option<&'a str> {
        if self.sync_operation() != SyncOperation::UnresolvedConflict {
            return None;
        }
        self.sync_dir_conflict()
    }

    /// Category description including the item-specific details.
    pub fn category_description(&self) -> String {
        let generic = self.category().description();
        match self.category_extra_description() {
            "" => generic.to_string(),
            extra => format!("{generic}\n{extra}"),
        }
    }

    /// Operation description including the item-specific details.
    pub fn sync_op_description(&self) -> String {
        let op = self.sync_operation();
        let generic = op.description();
        match op {
            SyncOperation::UnresolvedConflict => match self.sync_dir_conflict() {
                Some(conflict) => conflict.to_string(),
                None => generic.to_string(),
            },
            SyncOperation::MoveLeftFrom
            | SyncOperation::MoveLeftTo
            | SyncOperation::MoveRightFrom
            | SyncOperation::MoveRightTo => {
                let Some(partner) = self.as_file().and_then(|f| f.move_partner()) else {
                    return generic.to_string();
                };
                let side = match op {
                    SyncOperation::MoveLeftFrom | SyncOperation::MoveLeftTo => Side::Left,
                    _ => Side::Right,
                };
                let (from, to) = match op {
                    SyncOperation::MoveLeftFrom | SyncOperation::MoveRightFrom => {
                        (self.relative_path(side), partner.relative_path(side))
                    }
                    _ => (partner.relative_path(side), self.relative_path(side)),
                };
                format!("{generic}\n{from} ->\n{to}")
            }
            _ => generic.to_string(),
        }
    }

    /// Double dispatch: call the visitor method matching this item's kind.
    pub fn accept(&self, visitor: &mut dyn FsObjectVisitor<'a>) {
        match self.downcast() {
            ItemRef::File(file) => visitor.visit_file(file),
            ItemRef::Symlink(symlink) => visitor.visit_symlink(symlink),
            ItemRef::Folder(folder) => visitor.visit_folder(folder),
        }
    }

    /// Resolve to the concrete kind.
    pub fn downcast(&self) -> ItemRef<'a> {
        match &self.node.data {
            NodeData::File(data) => ItemRef::File(FileRef { obj: *self, data }),
            NodeData::Symlink(data) => ItemRef::Symlink(SymlinkRef { obj: *self, data }),
            NodeData::Folder(data) => ItemRef::Folder(FolderRef { obj: *self, data }),
        }
    }

    pub fn as_file(&self) -> Option<FileRef<'a>> {
        match self.downcast() {
            ItemRef::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn as_symlink(&self) -> Option<SymlinkRef<'a>> {
        match self.downcast() {
            ItemRef::Symlink(symlink) => Some(symlink),
            _ => None,
        }
    }

    pub fn as_folder(&self) -> Option<FolderRef<'a>> {
        match self.downcast() {
            ItemRef::Folder(folder) => Some(folder),
            _ => None,
        }
    }
}

impl PathInformation for ObjectRef<'_> {
    fn relative_path(&self, side: Side) -> CompactString {
        match &self.node.data {
            NodeData::Folder(folder) => folder.container.rel_path[side].clone(),
            _ => append_path(
                &self.pair.container(self.node.parent).rel_path[side],
                self.item_name(side),
            ),
        }
    }

    fn abstract_path(&self, side: Side) -> PathBuf {
        append_rel_path(self.pair.folder_path(side), &self.relative_path(side))
    }
}

impl std::fmt::Debug for ObjectRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("item_name", &self.node.item.item_name)
            .field("category", &self.category())
            .finish()
    }
}

/// View of a file item.
#[derive(Clone, Copy)]
pub struct FileRef<'a> {
    obj: ObjectRef<'a>,
    data: &'a FileData,
}

impl<'a> FileRef<'a> {
    pub(crate) fn new(pair: &'a BaseFolderPair, id: ObjectId) -> Self {
        match ObjectRef::new(pair, id).as_file() {
            Some(file) => file,
            None => unreachable!("{id} is not a file"),
        }
    }

    pub fn attributes(&self, side: Side) -> FileAttributes {
        self.data.attr[side]
    }

    pub fn last_write_time(&self, side: Side) -> i64 {
        self.data.attr[side].mod_time
    }

    pub fn file_size(&self, side: Side) -> u64 {
        self.data.attr[side].file_size
    }

    pub fn file_print(&self, side: Side) -> Option<FingerPrint> {
        self.data.attr[side].file_print
    }

    pub fn is_followed_symlink(&self, side: Side) -> bool {
        self.data.attr[side].is_followed_symlink
    }

    /// Handle of the file judged to be the other end of a move, if any.
    pub fn move_ref(&self) -> Option<ObjectId> {
        self.data.move_ref
    }

    /// The move partner, if it is still alive and is a file.
    pub fn move_partner(&self) -> Option<FileRef<'a>> {
        self.data
            .move_ref
            .and_then(|id| self.obj.pair.resolve(id))
            .and_then(|obj| obj.as_file())
    }
}

impl<'a> Deref for FileRef<'a> {
    type Target = ObjectRef<'a>;

    fn deref(&self) -> &ObjectRef<'a> {
        &self.obj
    }
}

/// View of a symlink item. Times are those of the link, not its target.
#[derive(Clone, Copy)]
pub struct SymlinkRef<'a> {
    obj: ObjectRef<'a>,
    data: &'a LinkData,
}

impl<'a> SymlinkRef<'a> {
    pub(crate) fn new(pair: &'a BaseFolderPair, id: ObjectId) -> Self {
        match ObjectRef::new(pair, id).as_symlink() {
            Some(symlink) => symlink,
            None => unreachable!("{id} is not a symlink"),
        }
    }

    pub fn attributes(&self, side: Side) -> LinkAttributes {
        self.data.attr[side]
    }

    pub fn last_write_time(&self, side: Side) -> i64 {
        self.data.attr[side].mod_time
    }
}

impl<'a> Deref for SymlinkRef<'a> {
    type Target = ObjectRef<'a>;

    fn deref(&self) -> &ObjectRef<'a> {
        &self.obj
    }
}

/// View of a folder item, which is also a container.
#[derive(Clone, Copy)]
pub struct FolderRef<'a> {
    obj: ObjectRef<'a>,
    data: &'a FolderData,
}

impl<'a> FolderRef<'a> {
    pub(crate) fn new(pair: &'a BaseFolderPair, id: ObjectId) -> Self {
        match ObjectRef::new(pair, id).as_folder() {
            Some(folder) => folder,
            None => unreachable!("{id} is not a folder"),
        }
    }

    pub fn attributes(&self, side: Side) -> FolderAttributes {
        self.data.attr[side]
    }

    pub fn is_followed_symlink(&self, side: Side) -> bool {
        self.data.attr[side].is_followed_symlink
    }

    /// The category as a folder category, if it is one.
    pub fn dir_category(&self) -> Option<CompareDirResult> {
        CompareDirResult::try_from(self.category()).ok()
    }

    /// The items inside this folder.
    pub fn children(&self) -> ContainerRef<'a> {
        ContainerRef {
            pair: self.obj.pair,
            at: Some(self.obj.id),
            data: &self.data.container,
        }
    }
}

impl<'a> Deref for FolderRef<'a> {
    type Target = ObjectRef<'a>;

    fn deref(&self) -> &ObjectRef<'a> {
        &self.obj
    }
}

impl ContainerPath for FolderRef<'_> {
    fn container_path(&self, side: Side) -> &str {
        &self.data.container.rel_path[side]
    }
}

/// View of the children of a folder or of a folder pair's root.
#[derive(Clone, Copy)]
pub struct ContainerRef<'a> {
    pair: &'a BaseFolderPair,
    at: Option<ObjectId>,
    data: &'a ContainerData,
}

impl<'a> ContainerRef<'a> {
    pub(crate) fn new(pair: &'a BaseFolderPair, at: Option<ObjectId>) -> Self {
        Self {
            pair,
            at,
            data: pair.container(at),
        }
    }

    pub fn base(&self) -> &'a BaseFolderPair {
        self.pair
    }

    /// The folder owning this container; `None` for the root.
    pub fn folder(&self) -> Option<FolderRef<'a>> {
        self.at.map(|id| FolderRef::new(self.pair, id))
    }

    pub fn files(self) -> impl Iterator<Item = FileRef<'a>> + 'a {
        let pair = self.pair;
        self.data.files.iter().map(move |&id| FileRef::new(pair, id))
    }

    pub fn symlinks(self) -> impl Iterator<Item = SymlinkRef<'a>> + 'a {
        let pair = self.pair;
        self.data.symlinks.iter().map(move |&id| SymlinkRef::new(pair, id))
    }

    pub fn folders(self) -> impl Iterator<Item = FolderRef<'a>> + 'a {
        let pair = self.pair;
        self.data.folders.iter().map(move |&id| FolderRef::new(pair, id))
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.data.child_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PathInformation for ContainerRef<'_> {
    fn relative_path(&self, side: Side) -> CompactString {
        self.data.rel_path[side].clone()
    }

    fn abstract_path(&self, side: Side) -> PathBuf {
        append_rel_path(self.pair.folder_path(side), &self.data.rel_path[side])
    }
}

impl ContainerPath for ContainerRef<'_> {
    fn container_path(&self, side: Side) -> &str {
        &self.data.rel_path[side]
    }
}
