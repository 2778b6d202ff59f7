use alloc::vec::Vec;

use crate::{Column, Row};

/// Applies the search string over normalized rows, returning the matching
/// row indices in arrival order.
///
/// A row matches when *any* column matches (custom predicate where declared,
/// default substring match otherwise). An empty search passes every row.
/// Pure: same inputs, same output.
pub(crate) fn filter_rows<T>(rows: &[Row], columns: &[Column<T>], search: &str) -> Vec<usize> {
    let query = search.trim();
    if query.is_empty() {
        return (0..rows.len()).collect();
    }

    rows.iter()
        .filter(|row| {
            columns
                .iter()
                .enumerate()
                .any(|(ci, col)| col.matches(row.value(ci), query))
        })
        .map(|row| row.index)
        .collect()
}
