use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::key::KeySet;
use crate::{Column, Row, SortItem, Value};

/// Stable group identity: a path of `column=value` segments, unchanged
/// across re-partitions of the same data (collapse state is keyed by it).
pub type GroupId = String;

/// A bucket in the group hierarchy.
///
/// Depth strictly increases with nesting; children are either all rows or
/// all sub-groups, which [`GroupChildren`] enforces structurally.
#[derive(Clone, Debug)]
pub struct GroupNode {
    pub id: GroupId,
    /// The bucket value shared by every row beneath this node.
    pub key: Value,
    /// The column key this level is grouped by.
    pub grouped_by: String,
    pub depth: usize,
    pub children: GroupChildren,
}

#[derive(Clone, Debug)]
pub enum GroupChildren {
    Rows(Vec<usize>),
    Groups(Vec<GroupNode>),
}

/// The header pseudo-row emitted ahead of a group's contents.
#[derive(Clone, Debug)]
pub struct GroupHeader {
    pub id: GroupId,
    pub key: Value,
    pub grouped_by: String,
    pub depth: usize,
}

/// One entry of the flattened, render-ready sequence.
///
/// A closed sum: every consumer matches exhaustively, so a new entry kind
/// cannot be silently mishandled.
#[derive(Clone, Debug)]
pub enum FlatEntry {
    Header(GroupHeader),
    Row { index: usize },
}

impl FlatEntry {
    pub fn is_header(&self) -> bool {
        matches!(self, FlatEntry::Header(_))
    }

    pub fn as_row(&self) -> Option<usize> {
        match self {
            FlatEntry::Row { index } => Some(*index),
            FlatEntry::Header(_) => None,
        }
    }
}

/// Partitions sorted rows into the group hierarchy.
///
/// At each depth, rows bucket by the current key's value; bucket order is
/// the sorted-order first occurrence of each distinct value. `group_by` keys
/// naming no declared column are skipped by the caller.
pub(crate) fn group_rows<T>(
    rows: &[Row],
    sorted: &[usize],
    group_by: &[SortItem],
    columns: &[Column<T>],
) -> Vec<GroupNode> {
    if group_by.is_empty() {
        return Vec::new();
    }
    build_level(rows, sorted, group_by, columns, 0, "root")
}

fn build_level<T>(
    rows: &[Row],
    slice: &[usize],
    group_by: &[SortItem],
    columns: &[Column<T>],
    depth: usize,
    parent_id: &str,
) -> Vec<GroupNode> {
    let grouped_by = &group_by[depth].key;
    let ci = columns
        .iter()
        .position(|c| &c.key == grouped_by)
        .unwrap_or(usize::MAX);
    debug_assert!(ci != usize::MAX, "group key resolved by caller");

    // Buckets in first-occurrence order, identified by value display.
    let mut buckets: Vec<(String, Value, Vec<usize>)> = Vec::new();
    for &ri in slice {
        let value = rows[ri].value(ci);
        let label = value.to_string();
        match buckets.iter_mut().find(|(l, _, _)| *l == label) {
            Some((_, _, members)) => members.push(ri),
            None => buckets.push((label, value.clone(), alloc::vec![ri])),
        }
    }

    buckets
        .into_iter()
        .map(|(label, value, members)| {
            let id = format!("{parent_id}_{grouped_by}={label}");
            let children = if depth + 1 < group_by.len() {
                GroupChildren::Groups(build_level(
                    rows,
                    &members,
                    group_by,
                    columns,
                    depth + 1,
                    &id,
                ))
            } else {
                GroupChildren::Rows(members)
            };
            GroupNode {
                id,
                key: value,
                grouped_by: grouped_by.clone(),
                depth,
                children,
            }
        })
        .collect()
}

/// Depth-first pre-order flattening: a header entry ahead of each group's
/// contents. A collapsed group keeps its header (so it can be re-opened) and
/// omits its subtree.
pub(crate) fn flatten(nodes: &[GroupNode], collapsed: &KeySet<GroupId>) -> Vec<FlatEntry> {
    let mut out = Vec::new();
    flatten_into(nodes, collapsed, &mut out);
    out
}

fn flatten_into(nodes: &[GroupNode], collapsed: &KeySet<GroupId>, out: &mut Vec<FlatEntry>) {
    for node in nodes {
        out.push(FlatEntry::Header(GroupHeader {
            id: node.id.clone(),
            key: node.key.clone(),
            grouped_by: node.grouped_by.clone(),
            depth: node.depth,
        }));
        if collapsed.contains(&node.id) {
            continue;
        }
        match &node.children {
            GroupChildren::Rows(members) => {
                out.extend(members.iter().map(|&index| FlatEntry::Row { index }));
            }
            GroupChildren::Groups(children) => flatten_into(children, collapsed, out),
        }
    }
}

/// Every row index beneath `nodes`, in display order, diving into collapsed
/// groups too (collapse is presentation state, not membership).
pub(crate) fn extract_row_indices(nodes: &[GroupNode], out: &mut Vec<usize>) {
    for node in nodes {
        match &node.children {
            GroupChildren::Rows(members) => out.extend_from_slice(members),
            GroupChildren::Groups(children) => extract_row_indices(children, out),
        }
    }
}
