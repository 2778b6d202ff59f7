use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Column, Value};

/// Stable row identity.
///
/// Derived by the configured key extractor; the default extractor returns
/// the positional index, which is stable only while the item set's order is
/// unchanged across rebuilds.
pub type RowKey = u64;

/// Extracts a row's identity from its normalization index and raw item.
pub type KeyFn<T> = Arc<dyn Fn(usize, &T) -> RowKey + Send + Sync>;

/// A normalized row: stable index, identity, and per-column derived values.
///
/// Built once per raw item during normalization and never mutated; an
/// item-set change produces a fresh row set.
#[derive(Clone, Debug)]
pub struct Row {
    /// Normalization index, unique and 0-based; doubles as the handle the
    /// pipeline stages pass around.
    pub index: usize,
    pub key: RowKey,
    values: Vec<Value>,
}

impl Row {
    /// Cell values, parallel to the table's column set.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value(&self, column_index: usize) -> &Value {
        &self.values[column_index]
    }
}

pub(crate) fn normalize_items<T>(
    items: &[T],
    columns: &[Column<T>],
    key_fn: &KeyFn<T>,
) -> Vec<Row> {
    items
        .iter()
        .enumerate()
        .map(|(index, raw)| Row {
            index,
            key: key_fn(index, raw),
            values: columns.iter().map(|c| c.value_of(raw)).collect(),
        })
        .collect()
}
