//! A headless, virtualized data table pipeline.
//!
//! Raw items flow through normalize → filter → sort → group into a single
//! flattened sequence of group headers and data rows; a
//! [`windower::Windower`] then picks the slice of that sequence worth
//! materializing for the current scroll position. Only that slice is ever
//! handed to the render layer, with spacer heights standing in for the rest,
//! so tables stay responsive regardless of row count.
//!
//! The crate is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - raw items, column definitions, and the filter/sort/group configuration
//! - scroll offsets, viewport height, and per-entry measured heights
//!
//! Selection and expansion are identity-keyed stores owned by the table
//! instance: reordering, filtering, or collapsing groups never disturbs
//! them, and measured row heights follow row identity the same way.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod column;
mod expand;
mod filter;
mod group;
mod items;
mod key;
mod options;
mod select;
mod sort;
mod table;
mod value;
mod virtual_table;


pub use column::{Column, FilterFn, SortFn, ValueFn};
pub use group::{FlatEntry, GroupChildren, GroupHeader, GroupId, GroupNode};
pub use items::{KeyFn, Row, RowKey};
pub use options::TableOptions;
pub use select::SelectMode;
pub use sort::{SortItem, SortOrder};
pub use table::DataTable;
pub use value::Value;
pub use virtual_table::{
    BodyState, EntryKey, Frame, HeaderCell, SlotProps, VirtualTable, VisibleEntry,
    VisibleEntryKind,
};
