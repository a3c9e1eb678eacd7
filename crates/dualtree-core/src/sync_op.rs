//! Decision policy mapping an item's state to a sync operation.
//!
//! Only the per-item ("isolated") decision lives here. Adjustments that need
//! to look at other items (move pairs, folder children) are applied by the
//! tree on top of this result.

use crate::category::{CompareResult, SyncDirection, SyncOperation};

/// Inputs of the isolated sync-operation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncState {
    pub exists_left: bool,
    pub exists_right: bool,
    pub category: CompareResult,
    pub active: bool,
    pub direction: SyncDirection,
    pub has_direction_conflict: bool,
}

impl SyncState {
    /// Same state, but as if the item were active, unconflicted and heading
    /// in `direction`.
    pub fn what_if(self, direction: SyncDirection) -> Self {
        Self {
            active: true,
            direction,
            has_direction_conflict: false,
            ..self
        }
    }
}

/// Determine the sync operation for a single item, ignoring its neighbours.
pub fn isolated_sync_operation(state: SyncState) -> SyncOperation {
    debug_assert!(!state.has_direction_conflict || state.direction == SyncDirection::None);

    if !state.active {
        return if state.category == CompareResult::Equal {
            SyncOperation::Equal
        } else {
            SyncOperation::DoNothing
        };
    }

    let undecided = if state.has_direction_conflict {
        SyncOperation::UnresolvedConflict
    } else {
        SyncOperation::DoNothing
    };

    match state.category {
        CompareResult::Equal => SyncOperation::Equal,
        CompareResult::LeftOnly => match state.direction {
            SyncDirection::Left => SyncOperation::DeleteLeft,
            SyncDirection::Right => SyncOperation::CreateNewRight,
            SyncDirection::None => undecided,
        },
        CompareResult::RightOnly => match state.direction {
            SyncDirection::Left => SyncOperation::CreateNewLeft,
            SyncDirection::Right => SyncOperation::DeleteRight,
            SyncDirection::None => undecided,
        },
        CompareResult::LeftNewer | CompareResult::RightNewer | CompareResult::DifferentContent => {
            match state.direction {
                SyncDirection::Left => SyncOperation::OverwriteLeft,
                SyncDirection::Right => SyncOperation::OverwriteRight,
                SyncDirection::None => undecided,
            }
        }
        CompareResult::DifferentMetadata => match state.direction {
            SyncDirection::Left => SyncOperation::CopyMetadataToLeft,
            SyncDirection::Right => SyncOperation::CopyMetadataToRight,
            SyncDirection::None => undecided,
        },
        // The category says nothing about which sides exist, so ask directly.
        CompareResult::Conflict => match state.direction {
            SyncDirection::Left => match (state.exists_left, state.exists_right) {
                (true, true) => SyncOperation::OverwriteLeft,
                (true, false) => SyncOperation::DeleteLeft,
                _ => SyncOperation::CreateNewLeft,
            },
            SyncDirection::Right => match (state.exists_left, state.exists_right) {
                (true, true) => SyncOperation::OverwriteRight,
                (false, true) => SyncOperation::DeleteRight,
                _ => SyncOperation::CreateNewRight,
            },
            SyncDirection::None => undecided,
        },
    }
}

/// Combine the operations of the two ends of a detected move.
///
/// `op` belongs to the item being asked about, `partner_op` to its move
/// partner. A create paired with a delete on the same side becomes a move.
pub fn apply_move_optimization(op: SyncOperation, partner_op: SyncOperation) -> SyncOperation {
    match (op, partner_op) {
        (SyncOperation::CreateNewLeft, SyncOperation::DeleteLeft) => SyncOperation::MoveLeftTo,
        (SyncOperation::DeleteLeft, SyncOperation::CreateNewLeft) => SyncOperation::MoveLeftFrom,
        (SyncOperation::CreateNewRight, SyncOperation::DeleteRight) => SyncOperation::MoveRightTo,
        (SyncOperation::DeleteRight, SyncOperation::CreateNewRight) => SyncOperation::MoveRightFrom,
        _ => op,
    }
}
