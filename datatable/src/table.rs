use alloc::string::String;
use alloc::vec::Vec;

use crate::expand::Expansion;
use crate::filter::filter_rows;
use crate::group::{extract_row_indices, flatten, group_rows};
use crate::items::normalize_items;
use crate::key::KeySet;
use crate::select::Selection;
use crate::sort::{sort_keys_with_groups, sort_rows, toggle_sort_keys};
use crate::{
    Column, FlatEntry, GroupId, GroupNode, Row, RowKey, SelectMode, SortItem, TableOptions,
};

/// The data pipeline behind a groupable, sortable, filterable table.
///
/// Stages are materialized leaf-to-root (normalize → filter → sort → group →
/// flatten) and each mutation recomputes exactly the suffix whose inputs
/// changed; collapsing a group re-flattens without re-partitioning.
/// Selection and expansion are identity-keyed stores owned by the instance,
/// untouched by pipeline rebuilds.
pub struct DataTable<T> {
    options: TableOptions<T>,

    rows: Vec<Row>,
    filtered: Vec<usize>,
    sorted: Vec<usize>,
    groups: Vec<GroupNode>,
    flat: Vec<FlatEntry>,

    collapsed: KeySet<GroupId>,
    selection: Selection,
    expansion: Expansion,
}

impl<T> DataTable<T> {
    pub fn new(options: TableOptions<T>) -> Self {
        let selection = Selection::new(options.select_mode);
        let mut table = Self {
            options,
            rows: Vec::new(),
            filtered: Vec::new(),
            sorted: Vec::new(),
            groups: Vec::new(),
            flat: Vec::new(),
            collapsed: KeySet::new(),
            selection,
            expansion: Expansion::default(),
        };
        table.renormalize();
        table
    }

    pub fn options(&self) -> &TableOptions<T> {
        &self.options
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.options.columns
    }

    pub fn item_count(&self) -> usize {
        self.options.items.len()
    }

    pub fn raw(&self, row_index: usize) -> Option<&T> {
        self.options.items.get(row_index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, row_index: usize) -> Option<&Row> {
        self.rows.get(row_index)
    }

    /// The flattened, render-ready sequence: group headers interleaved with
    /// data rows, collapsed subtrees omitted.
    pub fn flat_entries(&self) -> &[FlatEntry] {
        &self.flat
    }

    pub fn groups(&self) -> &[GroupNode] {
        &self.groups
    }

    pub fn search(&self) -> &str {
        &self.options.search
    }

    pub fn sort_by(&self) -> &[SortItem] {
        &self.options.sort_by
    }

    pub fn group_by(&self) -> &[SortItem] {
        &self.options.group_by
    }

    /// Row indices of the current candidate set (post filter/sort/group, in
    /// display order, diving into collapsed groups).
    pub fn candidate_rows(&self) -> Vec<usize> {
        if self.groups.is_empty() {
            return self.sorted.clone();
        }
        let mut out = Vec::with_capacity(self.sorted.len());
        extract_row_indices(&self.groups, &mut out);
        out
    }

    pub fn candidate_keys(&self) -> Vec<RowKey> {
        self.candidate_rows()
            .into_iter()
            .map(|ri| self.rows[ri].key)
            .collect()
    }

    // --- mutations ---------------------------------------------------------

    /// Replaces the item set and renormalizes. Selection and expansion keep
    /// every identity still present in the new set.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.options.items = items;
        self.renormalize();
    }

    /// Applies an arbitrary options edit, then rebuilds the whole pipeline.
    ///
    /// The targeted setters (`set_search`, `set_sort_by`, ...) recompute less
    /// and should be preferred on hot paths.
    pub fn update_options(&mut self, f: impl FnOnce(&mut TableOptions<T>)) {
        f(&mut self.options);
        self.selection.set_mode(self.options.select_mode);
        self.renormalize();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.options.search == search {
            return;
        }
        self.options.search = search;
        self.refilter();
    }

    pub fn set_sort_by(&mut self, sort_by: Vec<SortItem>) {
        if self.options.sort_by == sort_by {
            return;
        }
        self.options.sort_by = sort_by;
        self.resort();
    }

    pub fn set_group_by(&mut self, group_by: Vec<SortItem>) {
        if self.options.group_by == group_by {
            return;
        }
        self.options.group_by = group_by;
        self.resort();
    }

    /// Header-click sorting: cycles the key through ascending → descending →
    /// removed, honoring `multi_sort` / `must_sort`.
    pub fn toggle_sort(&mut self, key: &str) {
        let mut sort_by = core::mem::take(&mut self.options.sort_by);
        toggle_sort_keys(
            &mut sort_by,
            key,
            self.options.multi_sort,
            self.options.must_sort,
        );
        self.options.sort_by = sort_by;
        self.resort();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.options.loading = loading;
    }

    pub fn set_select_mode(&mut self, mode: SelectMode) {
        self.options.select_mode = mode;
        self.selection.set_mode(mode);
        if mode == SelectMode::Single && self.selection.len() > 1 {
            self.selection.select_all(&[], false);
        }
    }

    // --- group open/collapse ----------------------------------------------

    pub fn is_group_open(&self, id: &str) -> bool {
        !self.collapsed.contains(id)
    }

    /// Toggles a group's collapsed state. Re-flattens only; the partition is
    /// untouched.
    pub fn toggle_group(&mut self, id: &str) {
        if !self.collapsed.remove(id) {
            self.collapsed.insert(String::from(id));
        }
        ttrace!(group = id, open = self.is_group_open(id), "toggle_group");
        self.reflatten();
    }

    // --- selection ---------------------------------------------------------

    pub fn is_selected(&self, key: RowKey) -> bool {
        self.selection.is_selected(key)
    }

    pub fn select(&mut self, key: RowKey, on: bool) {
        self.selection.select(key, on);
    }

    pub fn toggle_select(&mut self, key: RowKey) {
        self.selection.toggle(key);
    }

    /// Selects (or deselects) the full candidate set: post
    /// filter/sort/group, not just the virtualized slice.
    pub fn select_all(&mut self, on: bool) {
        let candidates = self.candidate_keys();
        self.selection.select_all(&candidates, on);
    }

    pub fn some_selected(&self) -> bool {
        self.selection.some_selected(&self.candidate_keys())
    }

    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(&self.candidate_keys())
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    // --- expansion ---------------------------------------------------------

    pub fn is_expanded(&self, key: RowKey) -> bool {
        self.expansion.is_expanded(key)
    }

    pub fn expand(&mut self, key: RowKey, on: bool) {
        self.expansion.expand(key, on);
    }

    pub fn toggle_expand(&mut self, key: RowKey) {
        self.expansion.toggle(key);
    }

    pub fn expanded_count(&self) -> usize {
        self.expansion.len()
    }

    // --- recompute chains --------------------------------------------------

    fn renormalize(&mut self) {
        tdebug!(items = self.options.items.len(), "renormalize");
        self.rows = normalize_items(
            &self.options.items,
            &self.options.columns,
            &self.options.item_key,
        );

        let live: KeySet<RowKey> = self.rows.iter().map(|r| r.key).collect();
        self.selection.retain_live(&live);
        self.expansion.retain_live(&live);

        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_rows(&self.rows, &self.options.columns, &self.options.search);
        tdebug!(
            matched = self.filtered.len(),
            of = self.rows.len(),
            "refilter"
        );
        self.resort();
    }

    fn resort(&mut self) {
        let keys = sort_keys_with_groups(&self.options.group_by, &self.options.sort_by);
        self.sorted = sort_rows(&self.rows, &self.filtered, &keys, &self.options.columns);
        self.regroup();
    }

    fn regroup(&mut self) {
        let group_by = self.effective_group_by();
        self.groups = group_rows(&self.rows, &self.sorted, &group_by, &self.options.columns);
        self.reflatten();
    }

    fn reflatten(&mut self) {
        self.flat = if self.groups.is_empty() {
            self.sorted
                .iter()
                .map(|&index| FlatEntry::Row { index })
                .collect()
        } else {
            flatten(&self.groups, &self.collapsed)
        };
    }

    /// Group-by entries whose key names a declared column; unknown keys
    /// contribute nothing.
    fn effective_group_by(&self) -> Vec<SortItem> {
        self.options
            .group_by
            .iter()
            .filter(|item| {
                let known = self.options.columns.iter().any(|c| c.key == item.key);
                if !known {
                    twarn!(key = %item.key, "group key refers to no declared column");
                }
                known
            })
            .cloned()
            .collect()
    }
}

impl<T> core::fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DataTable")
            .field("options", &self.options)
            .field("rows", &self.rows.len())
            .field("filtered", &self.filtered.len())
            .field("flat", &self.flat.len())
            .field("collapsed", &self.collapsed.len())
            .field("selected", &self.selection.len())
            .field("expanded", &self.expansion.len())
            .finish()
    }
}
