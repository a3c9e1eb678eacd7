//! Comparison categories, sync directions and sync operations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

/// Outcome of comparing one item across both sides.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum CompareResult {
    Equal,
    LeftOnly,
    RightOnly,
    LeftNewer,
    RightNewer,
    DifferentContent,
    DifferentMetadata,
    Conflict,
}

impl CompareResult {
    /// The category seen from the other side.
    ///
    /// Applying this twice yields the original value.
    pub fn flipped(self) -> Self {
        match self {
            Self::LeftOnly => Self::RightOnly,
            Self::RightOnly => Self::LeftOnly,
            Self::LeftNewer => Self::RightNewer,
            Self::RightNewer => Self::LeftNewer,
            Self::Equal | Self::DifferentContent | Self::DifferentMetadata | Self::Conflict => self,
        }
    }

    /// The category of an item that exists on `side` only.
    pub fn side_only(side: crate::Side) -> Self {
        crate::select_for_side(side, Self::LeftOnly, Self::RightOnly)
    }

    /// Whether the category carries an extra description.
    pub fn has_description(self) -> bool {
        matches!(self, Self::Conflict | Self::DifferentMetadata)
    }

    /// Generic human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Equal => "Both sides are equal",
            Self::LeftOnly => "Item exists on left side only",
            Self::RightOnly => "Item exists on right side only",
            Self::LeftNewer => "Left side is newer",
            Self::RightNewer => "Right side is newer",
            Self::DifferentContent => "Items have different content",
            Self::DifferentMetadata => "Items have different attributes",
            Self::Conflict => "Conflict/item cannot be categorized",
        }
    }
}

/// Categories that may be assigned without a description.
///
/// `LeftOnly`/`RightOnly` follow from which sides exist, and
/// `Conflict`/`DifferentMetadata` always need a description, so none of them
/// can be set through the generic setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum SimpleCategory {
    Equal,
    LeftNewer,
    RightNewer,
    DifferentContent,
}

impl From<SimpleCategory> for CompareResult {
    fn from(value: SimpleCategory) -> Self {
        match value {
            SimpleCategory::Equal => Self::Equal,
            SimpleCategory::LeftNewer => Self::LeftNewer,
            SimpleCategory::RightNewer => Self::RightNewer,
            SimpleCategory::DifferentContent => Self::DifferentContent,
        }
    }
}

/// The subset of [`CompareResult`] that applies to folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum CompareDirResult {
    Equal,
    LeftOnly,
    RightOnly,
    DifferentMetadata,
    Conflict,
}

impl From<CompareDirResult> for CompareResult {
    fn from(value: CompareDirResult) -> Self {
        match value {
            CompareDirResult::Equal => Self::Equal,
            CompareDirResult::LeftOnly => Self::LeftOnly,
            CompareDirResult::RightOnly => Self::RightOnly,
            CompareDirResult::DifferentMetadata => Self::DifferentMetadata,
            CompareDirResult::Conflict => Self::Conflict,
        }
    }
}

impl TryFrom<CompareResult> for CompareDirResult {
    type Error = CompareResult;

    fn try_from(value: CompareResult) -> Result<Self, Self::Error> {
        match value {
            CompareResult::Equal => Ok(Self::Equal),
            CompareResult::LeftOnly => Ok(Self::LeftOnly),
            CompareResult::RightOnly => Ok(Self::RightOnly),
            CompareResult::DifferentMetadata => Ok(Self::DifferentMetadata),
            CompareResult::Conflict => Ok(Self::Conflict),
            other => Err(other),
        }
    }
}

/// Intended orientation of the sync action for an item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum SyncDirection {
    /// Leave the item alone.
    #[default]
    None,
    /// Make the left side match the right side.
    Left,
    /// Make the right side match the left side.
    Right,
}

impl SyncDirection {
    /// The direction seen from the other side.
    pub fn flipped(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Concrete action the sync engine will take for an item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum SyncOperation {
    CreateNewLeft,
    CreateNewRight,
    DeleteLeft,
    DeleteRight,
    /// Move source on the left side.
    MoveLeftFrom,
    /// Move target on the left side.
    MoveLeftTo,
    MoveRightFrom,
    MoveRightTo,
    OverwriteLeft,
    OverwriteRight,
    CopyMetadataToLeft,
    CopyMetadataToRight,
    DoNothing,
    Equal,
    UnresolvedConflict,
}

impl SyncOperation {
    /// Generic human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Self::CreateNewLeft => "Copy new item to left",
            Self::CreateNewRight => "Copy new item to right",
            Self::DeleteLeft => "Delete left item",
            Self::DeleteRight => "Delete right item",
            Self::MoveLeftFrom | Self::MoveLeftTo => "Move file on left",
            Self::MoveRightFrom | Self::MoveRightTo => "Move file on right",
            Self::OverwriteLeft => "Update left item",
            Self::OverwriteRight => "Update right item",
            Self::CopyMetadataToLeft => "Update attributes on left",
            Self::CopyMetadataToRight => "Update attributes on right",
            Self::DoNothing => "Do nothing",
            Self::Equal => "Both sides are equal",
            Self::UnresolvedConflict => "Conflict/item cannot be categorized",
        }
    }

    /// Whether this is one end of a detected move.
    pub fn is_move(self) -> bool {
        matches!(
            self,
            Self::MoveLeftFrom | Self::MoveLeftTo | Self::MoveRightFrom | Self::MoveRightTo
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_flip_is_involution() {
        for category in CompareResult::iter() {
            assert_eq!(category.flipped().flipped(), category);
        }
    }

    #[test]
    fn test_flip_table() {
        assert_eq!(CompareResult::LeftOnly.flipped(), CompareResult::RightOnly);
        assert_eq!(CompareResult::LeftNewer.flipped(), CompareResult::RightNewer);
        assert_eq!(CompareResult::Conflict.flipped(), CompareResult::Conflict);
        assert_eq!(CompareResult::Equal.flipped(), CompareResult::Equal);
    }

    #[test]
    fn test_simple_category_never_needs_description() {
        for category in SimpleCategory::iter() {
            let full = CompareResult::from(category);
            assert!(!full.has_description());
            assert_ne!(full, CompareResult::LeftOnly);
            assert_ne!(full, CompareResult::RightOnly);
        }
    }

    #[test]
    fn test_dir_result_round_trip() {
        for category in CompareDirResult::iter() {
            assert_eq!(CompareDirResult::try_from(CompareResult::from(category)), Ok(category));
        }
        assert_eq!(
            CompareDirResult::try_from(CompareResult::LeftNewer),
            Err(CompareResult::LeftNewer)
        );
    }

    #[test]
    fn test_descriptions_are_non_empty() {
        assert!(CompareResult::iter().all(|c| !c.description().is_empty()));
        assert!(SyncOperation::iter().all(|op| !op.description().is_empty()));
    }
}
