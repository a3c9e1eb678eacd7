//! Core types for dualtree.
//!
//! This crate provides the value types shared by everything that works with
//! a two-sided comparison tree: side selection, per-item attribute snapshots,
//! comparison categories, sync directions and operations, the isolated
//! sync-operation policy, and the comparison configuration.

mod attributes;
mod category;
mod config;
mod path;
mod side;
pub mod sync_op;

pub use attributes::{FileAttributes, FingerPrint, FolderAttributes, LinkAttributes};
pub use category::{CompareDirResult, CompareResult, SimpleCategory, SyncDirection, SyncOperation};
pub use config::{CompareConfig, CompareConfigBuilder, CompareConfigBuilderError, CompareVariant, FilterConfig};
pub use path::{FILE_NAME_SEPARATOR, append_path, append_rel_path, short_display_name};
pub use side::{Side, SideArray, select_for_side};
pub use sync_op::{SyncState, apply_move_optimization, isolated_sync_operation};
