//! Kind dispatch and recursive traversal.
//!
//! Traversal is pre-order: files first, then symlinks, then each folder
//! followed by its contents.

use crate::base::BaseFolderPair;
use crate::handle::{ContainerMut, FileMut, FolderMut, ObjectMut, SymlinkMut};
use crate::node::ItemKind;
use crate::registry::ObjectId;
use crate::view::{ContainerRef, FileRef, FolderRef, ItemRef, ObjectRef, SymlinkRef};

/// Visitor for [`ObjectRef::accept`].
pub trait FsObjectVisitor<'a> {
    fn visit_file(&mut self, file: FileRef<'a>);
    fn visit_symlink(&mut self, symlink: SymlinkRef<'a>);
    fn visit_folder(&mut self, folder: FolderRef<'a>);
}

/// Call the closure matching the kind of `obj` and return its result.
pub fn visit_fs_object<'a, R>(
    obj: ObjectRef<'a>,
    on_folder: impl FnOnce(FolderRef<'a>) -> R,
    on_file: impl FnOnce(FileRef<'a>) -> R,
    on_symlink: impl FnOnce(SymlinkRef<'a>) -> R,
) -> R {
    match obj.downcast() {
        ItemRef::Folder(folder) => on_folder(folder),
        ItemRef::File(file) => on_file(file),
        ItemRef::Symlink(symlink) => on_symlink(symlink),
    }
}

/// Visit `obj` and, if it is a folder, everything below it.
pub fn visit_fs_object_recursively<'a>(
    obj: ObjectRef<'a>,
    mut on_folder: impl FnMut(FolderRef<'a>),
    mut on_file: impl FnMut(FileRef<'a>),
    mut on_symlink: impl FnMut(SymlinkRef<'a>),
) {
    match obj.downcast() {
        ItemRef::File(file) => on_file(file),
        ItemRef::Symlink(symlink) => on_symlink(symlink),
        ItemRef::Folder(folder) => {
            on_folder(folder);
            walk(folder.children(), &mut on_folder, &mut on_file, &mut on_symlink);
        }
    }
}

/// Mutable counterpart of [`visit_fs_object_recursively`].
pub fn visit_fs_object_recursively_mut(
    obj: ObjectMut<'_>,
    mut on_folder: impl FnMut(FolderMut<'_>),
    mut on_file: impl FnMut(FileMut<'_>),
    mut on_symlink: impl FnMut(SymlinkMut<'_>),
) {
    let ObjectMut { pair, id } = obj;
    match pair.nodes[id].data.kind() {
        ItemKind::File => on_file(FileMut::new(pair, id)),
        ItemKind::Symlink => on_symlink(SymlinkMut::new(pair, id)),
        ItemKind::Folder => {
            on_folder(FolderMut::new(pair, id));
            walk_mut(pair, Some(id), &mut on_folder, &mut on_file, &mut on_symlink);
        }
    }
}

fn walk<'a>(
    container: ContainerRef<'a>,
    on_folder: &mut impl FnMut(FolderRef<'a>),
    on_file: &mut impl FnMut(FileRef<'a>),
    on_symlink: &mut impl FnMut(SymlinkRef<'a>),
) {
    for file in container.files() {
        on_file(file);
    }
    for symlink in container.symlinks() {
        on_symlink(symlink);
    }
    for folder in container.folders() {
        on_folder(folder);
        walk(folder.children(), on_folder, on_file, on_symlink);
    }
}

// Child lists are copied before each level, so callbacks may add items.
fn walk_mut(
    pair: &mut BaseFolderPair,
    at: Option<ObjectId>,
    on_folder: &mut impl FnMut(FolderMut<'_>),
    on_file: &mut impl FnMut(FileMut<'_>),
    on_symlink: &mut impl FnMut(SymlinkMut<'_>),
) {
    let container = pair.container(at);
    let files = container.files.clone();
    let symlinks = container.symlinks.clone();
    let folders = container.folders.clone();

    for id in files {
        on_file(FileMut::new(pair, id));
    }
    for id in symlinks {
        on_symlink(SymlinkMut::new(pair, id));
    }
    for id in folders {
        on_folder(FolderMut::new(pair, id));
        walk_mut(pair, Some(id), on_folder, on_file, on_symlink);
    }
}

impl<'a> ContainerRef<'a> {
    /// Visit every item below this container.
    pub fn visit_recursively(
        self,
        mut on_folder: impl FnMut(FolderRef<'a>),
        mut on_file: impl FnMut(FileRef<'a>),
        mut on_symlink: impl FnMut(SymlinkRef<'a>),
    ) {
        walk(self, &mut on_folder, &mut on_file, &mut on_symlink);
    }
}

impl<'a> FolderRef<'a> {
    /// Visit every item below this folder, not the folder itself.
    pub fn visit_recursively(
        self,
        on_folder: impl FnMut(FolderRef<'a>),
        on_file: impl FnMut(FileRef<'a>),
        on_symlink: impl FnMut(SymlinkRef<'a>),
    ) {
        self.children().visit_recursively(on_folder, on_file, on_symlink);
    }
}

impl ContainerMut<'_> {
    /// Visit every item below this container with mutable handles.
    pub fn visit_recursively_mut(
        &mut self,
        mut on_folder: impl FnMut(FolderMut<'_>),
        mut on_file: impl FnMut(FileMut<'_>),
        mut on_symlink: impl FnMut(SymlinkMut<'_>),
    ) {
        walk_mut(self.pair, self.at, &mut on_folder, &mut on_file, &mut on_symlink);
    }
}

impl BaseFolderPair {
    /// Visit every item of the pair with mutable handles.
    pub fn visit_recursively_mut(
        &mut self,
        on_folder: impl FnMut(FolderMut<'_>),
        on_file: impl FnMut(FileMut<'_>),
        on_symlink: impl FnMut(SymlinkMut<'_>),
    ) {
        self.root_mut()
            .visit_recursively_mut(on_folder, on_file, on_symlink);
    }
}

#[cfg(test)]
mod tests {
    use dualtree_core::{
        CompareConfig, CompareDirResult, CompareResult, FileAttributes, FolderAttributes,
        LinkAttributes, Side,
    };

    use super::*;
    use crate::base::BaseFolderStatus;

    fn populated() -> BaseFolderPair {
        let mut pair = BaseFolderPair::new(
            "/l",
            BaseFolderStatus::Existing,
            "/r",
            BaseFolderStatus::Existing,
            CompareConfig::default(),
        );
        let mut root = pair.root_mut();
        let mut sub = root.add_folder(
            "sub",
            FolderAttributes::default(),
            CompareDirResult::Equal,
            "sub",
            FolderAttributes::default(),
        );
        sub.children_mut()
            .add_file_on_side(Side::Left, "inner.txt", FileAttributes::default());
        root.add_link_on_side(Side::Right, "link", LinkAttributes::new(5));
        root.add_file(
            "top.txt",
            FileAttributes::default(),
            CompareResult::Equal,
            "top.txt",
            FileAttributes::default(),
        );
        pair
    }

    #[test]
    fn test_pre_order_files_links_then_folders() {
        let pair = populated();
        let order = std::cell::RefCell::new(Vec::new());
        pair.root().visit_recursively(
            |folder| order.borrow_mut().push(folder.item_name_any().to_string()),
            |file| order.borrow_mut().push(file.item_name_any().to_string()),
            |link| order.borrow_mut().push(link.item_name_any().to_string()),
        );
        assert_eq!(order.into_inner(), ["top.txt", "link", "sub", "inner.txt"]);
    }

    #[test]
    fn test_visit_fs_object_dispatch() {
        let pair = populated();
        let kinds: Vec<&str> = pair
            .root()
            .folders()
            .map(|f| visit_fs_object(*f, |_| "folder", |_| "file", |_| "symlink"))
            .collect();
        assert_eq!(kinds, ["folder"]);
    }

    #[test]
    fn test_accept_visitor() {
        #[derive(Default)]
        struct Counter {
            files: usize,
            symlinks: usize,
            folders: usize,
        }
        impl<'a> FsObjectVisitor<'a> for Counter {
            fn visit_file(&mut self, _: FileRef<'a>) {
                self.files += 1;
            }
            fn visit_symlink(&mut self, _: SymlinkRef<'a>) {
                self.symlinks += 1;
            }
            fn visit_folder(&mut self, _: FolderRef<'a>) {
                self.folders += 1;
            }
        }

        let pair = populated();
        let mut counter = Counter::default();
        let root = pair.root();
        for file in root.files() {
            file.accept(&mut counter);
        }
        for link in root.symlinks() {
            link.accept(&mut counter);
        }
        for folder in root.folders() {
            folder.accept(&mut counter);
        }
        assert_eq!((counter.files, counter.symlinks, counter.folders), (1, 1, 1));
    }

    #[test]
    fn test_mutable_walk_reaches_nested_items() {
        let mut pair = populated();
        pair.visit_recursively_mut(
            |mut folder| folder.set_active(false),
            |mut file| file.set_active(false),
            |mut link| link.set_active(false),
        );
        let mut active = 0;
        pair.root()
            .visit_recursively(|f| active += f.is_active() as usize, |_| {}, |_| {});
        assert_eq!(active, 0);
        assert!(pair.root().files().all(|f| !f.is_active()));
    }
}
