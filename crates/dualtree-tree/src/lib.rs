//! Dual-sided comparison tree for dualtree.
//!
//! A [`FolderComparison`] holds one [`BaseFolderPair`] per compared pair of
//! root folders. Each pair owns a tree of files, symlinks and folders, where
//! every item records its name, attributes and state on both sides at once.
//!
//! Items are addressed by [`ObjectId`] handles. Read access goes through
//! views ([`ObjectRef`], [`FileRef`], ...), writes through mutable handles
//! ([`ObjectMut`], [`FileMut`], ...) that keep cached paths and buffered
//! folder sync operations up to date.

mod base;
mod container;
mod error;
mod forest;
mod handle;
mod node;
mod registry;
mod sync;
mod view;
mod visit;

pub use base::{BaseFolderPair, BaseFolderStatus};
pub use error::TreeError;
pub use forest::FolderComparison;
pub use handle::{ContainerMut, FileMut, FolderMut, ObjectMut, SymlinkMut};
pub use node::ItemKind;
pub use registry::{ObjectId, TreeId};
pub use view::{
    ContainerPath, ContainerRef, FileRef, FolderRef, ItemRef, ObjectRef, PathInformation,
    SymlinkRef,
};
pub use visit::{
    FsObjectVisitor, visit_fs_object, visit_fs_object_recursively,
    visit_fs_object_recursively_mut,
};

pub use dualtree_core::{
    CompareConfig, CompareDirResult, CompareResult, CompareVariant, FileAttributes, FingerPrint,
    FilterConfig, FolderAttributes, LinkAttributes, Side, SideArray, SimpleCategory,
    SyncDirection, SyncOperation,
};
