//! Sync operations derived from item state.
//!
//! Files pair up with their move partner, folders look at their direct
//! children; everything else is the isolated per-item decision.

use dualtree_core::{
    Side, SyncDirection, SyncOperation, SyncState, apply_move_optimization,
    isolated_sync_operation, select_for_side,
};

use crate::base::BaseFolderPair;
use crate::node::{FileData, FsNode, NodeData};
use crate::registry::ObjectId;

fn sync_state(node: &FsNode) -> SyncState {
    let item = &node.item;
    SyncState {
        exists_left: !item.is_empty(Side::Left),
        exists_right: !item.is_empty(Side::Right),
        category: item.category,
        active: item.active,
        direction: item.sync_dir,
        has_direction_conflict: !item.sync_dir_conflict.is_empty(),
    }
}

fn create_on(side: Side) -> [SyncOperation; 2] {
    select_for_side(
        side,
        [SyncOperation::CreateNewLeft, SyncOperation::MoveLeftTo],
        [SyncOperation::CreateNewRight, SyncOperation::MoveRightTo],
    )
}

fn delete_on(side: Side) -> [SyncOperation; 2] {
    select_for_side(
        side,
        [SyncOperation::DeleteLeft, SyncOperation::MoveLeftFrom],
        [SyncOperation::DeleteRight, SyncOperation::MoveRightFrom],
    )
}

impl BaseFolderPair {
    pub(crate) fn sync_operation(&self, id: ObjectId) -> SyncOperation {
        let node = &self.nodes[id];
        match &node.data {
            NodeData::File(file) => {
                self.move_optimized(id, file, isolated_sync_operation(sync_state(node)))
            }
            NodeData::Symlink(_) => isolated_sync_operation(sync_state(node)),
            NodeData::Folder(folder) => {
                if let Some(op) = folder.sync_op_buffered.get() {
                    return op;
                }
                let op = self.folder_sync_operation(id, node);
                folder.sync_op_buffered.set(Some(op));
                op
            }
        }
    }

    /// What the operation would be with `direction`, assuming the item is
    /// active and unconflicted. Folder children are not considered.
    pub(crate) fn test_sync_operation(&self, id: ObjectId, direction: SyncDirection) -> SyncOperation {
        let node = &self.nodes[id];
        let op = isolated_sync_operation(sync_state(node).what_if(direction));
        match &node.data {
            NodeData::File(file) => self.move_optimized(id, file, op),
            _ => op,
        }
    }

    /// Turn a create/delete into the matching end of a move, if this file
    /// and its move partner reference each other.
    fn move_optimized(&self, id: ObjectId, file: &FileData, op: SyncOperation) -> SyncOperation {
        let Some(partner) = file.move_ref.and_then(|r| self.nodes.get(r)) else {
            return op;
        };
        match &partner.data {
            NodeData::File(partner_file) if partner_file.move_ref == Some(id) => {
                apply_move_optimization(op, isolated_sync_operation(sync_state(partner)))
            }
            _ => op,
        }
    }

    fn folder_sync_operation(&self, id: ObjectId, node: &FsNode) -> SyncOperation {
        let op = isolated_sync_operation(sync_state(node));
        match op {
            SyncOperation::DeleteLeft
            | SyncOperation::DeleteRight
            | SyncOperation::DoNothing
            | SyncOperation::UnresolvedConflict => {}
            _ => return op,
        }

        let children = self.container(Some(id)).child_ids();

        // A child that gets created needs its parent folder to exist.
        for side in Side::BOTH {
            if node.item.is_empty(side) {
                let creates = create_on(side);
                if children.iter().any(|&c| creates.contains(&self.sync_operation(c))) {
                    return creates[0];
                }
            }
        }

        // Keep the folder if anything inside it on that side survives.
        for side in Side::BOTH {
            let deletes = delete_on(side);
            if op == deletes[0]
                && children.iter().any(|&c| {
                    !self.nodes[c].item.is_empty(side) && !deletes.contains(&self.sync_operation(c))
                })
            {
                return SyncOperation::DoNothing;
            }
        }
        op
    }
}
