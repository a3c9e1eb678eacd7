//! Error types for typed item lookup.

use thiserror::Error;

use crate::node::ItemKind;
use crate::registry::{ObjectId, TreeId};

/// Errors returned when a handle cannot be turned into the requested item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The item was removed from the tree.
    #[error("Object {id} no longer exists")]
    StaleHandle { id: ObjectId },

    /// The handle was issued by a different folder pair.
    #[error("Object {id} does not belong to tree {tree}")]
    ForeignHandle { id: ObjectId, tree: TreeId },

    /// The item exists but is of another kind.
    #[error("Object {id} is a {found}, expected a {expected}")]
    KindMismatch {
        id: ObjectId,
        expected: ItemKind,
        found: ItemKind,
    },
}

impl TreeError {
    /// Check if the referenced item is gone for good.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleHandle { .. })
    }
}
