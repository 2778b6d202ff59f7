use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::{Column, Row};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One (column key, direction) pair; used for both sort-by and group-by
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortItem {
    pub key: String,
    pub order: SortOrder,
}

impl SortItem {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Desc,
        }
    }
}

/// The effective sort key list: group-by keys always precede user sort keys,
/// and a key already covered by grouping is not sorted a second time.
pub(crate) fn sort_keys_with_groups(
    group_by: &[SortItem],
    sort_by: &[SortItem],
) -> Vec<SortItem> {
    let mut keys: Vec<SortItem> = group_by.to_vec();
    for item in sort_by {
        if !keys.iter().any(|k| k.key == item.key) {
            keys.push(item.clone());
        }
    }
    keys
}

/// Stable multi-key sort over the filtered rows.
///
/// Compares by the first key (column comparator where declared), falls
/// through on ties; `Desc` reverses that key's comparison only. Rows tying
/// on every key keep their filtered relative order. A key naming no declared
/// column contributes nothing.
pub(crate) fn sort_rows<T>(
    rows: &[Row],
    filtered: &[usize],
    keys: &[SortItem],
    columns: &[Column<T>],
) -> Vec<usize> {
    let mut out: Vec<usize> = filtered.to_vec();
    if keys.is_empty() {
        return out;
    }

    let resolved: Vec<(usize, SortOrder)> = keys
        .iter()
        .filter_map(|item| {
            let ci = columns.iter().position(|c| c.key == item.key);
            if ci.is_none() {
                twarn!(key = %item.key, "sort key refers to no declared column");
            }
            ci.map(|ci| (ci, item.order))
        })
        .collect();
    if resolved.is_empty() {
        return out;
    }

    out.sort_by(|&a, &b| {
        for &(ci, order) in &resolved {
            let ord = columns[ci].compare(rows[a].value(ci), rows[b].value(ci));
            let ord = match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
    out
}

/// One step of the header-click sort cycle for `key`:
/// none → ascending → descending → removed.
///
/// With `multi_sort` the key is appended to the existing list, otherwise it
/// replaces it; with `must_sort` the removal step wraps back to ascending so
/// the table is never unsorted.
pub(crate) fn toggle_sort_keys(
    sort_by: &mut Vec<SortItem>,
    key: &str,
    multi_sort: bool,
    must_sort: bool,
) {
    match sort_by.iter().position(|item| item.key == key) {
        None => {
            if multi_sort {
                sort_by.push(SortItem::asc(key));
            } else {
                sort_by.clear();
                sort_by.push(SortItem::asc(key));
            }
        }
        Some(i) => match sort_by[i].order {
            SortOrder::Asc => sort_by[i].order = SortOrder::Desc,
            SortOrder::Desc => {
                if must_sort {
                    sort_by[i].order = SortOrder::Asc;
                } else {
                    sort_by.remove(i);
                }
            }
        },
    }
}
