use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use windower::{Align, VirtualWindow, Windower, WindowerOptions};

use crate::{
    DataTable, FlatEntry, GroupHeader, GroupId, RowKey, SortItem, SortOrder, TableOptions,
};

/// Flattened-entry identity: the unit the height table is keyed by, so
/// measured heights follow rows and group headers across filter/sort/group
/// changes instead of sticking to reused indices.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryKey {
    Row(RowKey),
    Group(GroupId),
}

/// One column header cell, carrying its active sort direction if any.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderCell {
    pub key: String,
    pub title: String,
    pub order: Option<SortOrder>,
}

/// A materialized entry of the current window, decorated with the state the
/// render layer needs.
#[derive(Clone, Debug)]
pub struct VisibleEntry {
    /// Index into the flattened sequence; pass it back to
    /// [`VirtualTable::handle_item_resize`] with the measured height.
    pub flat_index: usize,
    pub key: EntryKey,
    pub kind: VisibleEntryKind,
}

#[derive(Clone, Debug)]
pub enum VisibleEntryKind {
    Row {
        row_index: usize,
        selected: bool,
        expanded: bool,
    },
    GroupHeader {
        header: GroupHeader,
        open: bool,
    },
}

/// What the table body shows.
#[derive(Clone, Debug)]
pub enum BodyState {
    Loading { text: String },
    NoData { text: String },
    Entries(Vec<VisibleEntry>),
}

/// One render-ready assembly of the table: header row, the windowed body
/// slice, and the two spacer heights that stand in for everything outside
/// the window. Entries outside the window are not represented at all.
#[derive(Clone, Debug)]
pub struct Frame {
    pub fixed_header: bool,
    pub header: Vec<HeaderCell>,
    pub padding_top: u64,
    pub padding_bottom: u64,
    pub body: BodyState,
}

/// The derived-state object handed to custom top/bottom/header/body
/// extension content.
#[derive(Clone, Debug)]
pub struct SlotProps {
    pub columns: Vec<HeaderCell>,
    pub sort_by: Vec<SortItem>,
    pub group_by: Vec<SortItem>,
    pub some_selected: bool,
    pub all_selected: bool,
    pub selected_count: usize,
    pub item_count: usize,
    /// Length of the flattened sequence (headers + visible-candidate rows).
    pub entry_count: usize,
}

/// A [`DataTable`] wired to a [`Windower`]: the virtualized table.
///
/// Mutations route through this type so the windower is re-fed the flattened
/// entry count and identities whenever the pipeline rebuilds. Scroll and
/// measurement events are O(log n); only pipeline mutations pay O(n).
pub struct VirtualTable<T> {
    table: DataTable<T>,
    windower: Windower<EntryKey>,
}

impl<T> VirtualTable<T> {
    pub fn new(options: TableOptions<T>) -> Self {
        let estimate = options.estimated_row_height.max(1);
        let viewport = options.container_height;
        let table = DataTable::new(options);

        let keys = entry_keys(&table);
        let windower = Windower::new(
            WindowerOptions::new_with_key(keys.len(), move |_| estimate, move |i| keys[i].clone())
                .with_viewport_height(viewport),
        );

        Self { table, windower }
    }

    pub fn table(&self) -> &DataTable<T> {
        &self.table
    }

    pub fn windower(&self) -> &Windower<EntryKey> {
        &self.windower
    }

    /// Re-feeds the windower after a pipeline rebuild: new entry count, new
    /// index → identity mapping. Measured heights survive by identity.
    fn sync_windower(&mut self) {
        let keys = entry_keys(&self.table);
        self.windower.update_options(|opts| {
            opts.count = keys.len();
            opts.entry_key = Arc::new(move |i| keys[i].clone());
        });
    }

    // --- events from the render layer ---------------------------------------

    /// Scroll event: clamped, O(log n), never O(row count).
    pub fn handle_scroll(&mut self, offset_px: u64) {
        self.windower.handle_scroll(offset_px);
    }

    pub fn handle_viewport_resize(&mut self, height_px: u32) {
        self.windower.set_viewport_height(height_px);
    }

    /// Height report for a materialized entry. Idempotent on repeat heights;
    /// corrections above the viewport shift the offset to keep the visual
    /// anchor (returns the applied shift).
    pub fn handle_item_resize(&mut self, flat_index: usize, height_px: u32) -> i64 {
        self.windower.resize(flat_index, height_px)
    }

    pub fn scroll_to_entry(&mut self, flat_index: usize, align: Align) -> u64 {
        self.windower.scroll_to_index(flat_index, align)
    }

    pub fn scroll_offset(&self) -> u64 {
        self.windower.scroll_offset()
    }

    pub fn total_height(&self) -> u64 {
        self.windower.total_height()
    }

    pub fn window(&self) -> VirtualWindow {
        self.windower.window()
    }

    // --- pipeline mutations --------------------------------------------------

    pub fn set_items(&mut self, items: Vec<T>) {
        self.table.set_items(items);
        self.sync_windower();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.table.set_search(search);
        self.sync_windower();
    }

    pub fn set_sort_by(&mut self, sort_by: Vec<SortItem>) {
        self.table.set_sort_by(sort_by);
        self.sync_windower();
    }

    pub fn set_group_by(&mut self, group_by: Vec<SortItem>) {
        self.table.set_group_by(group_by);
        self.sync_windower();
    }

    pub fn toggle_sort(&mut self, key: &str) {
        self.table.toggle_sort(key);
        self.sync_windower();
    }

    pub fn toggle_group(&mut self, id: &str) {
        self.table.toggle_group(id);
        self.sync_windower();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.table.set_loading(loading);
    }

    /// Applies an arbitrary options edit; rebuilds the pipeline and re-feeds
    /// the windower.
    pub fn update_options(&mut self, f: impl FnOnce(&mut TableOptions<T>)) {
        self.table.update_options(f);
        self.sync_windower();
    }

    // --- selection / expansion (no windower impact) --------------------------

    pub fn is_selected(&self, key: RowKey) -> bool {
        self.table.is_selected(key)
    }

    pub fn select(&mut self, key: RowKey, on: bool) {
        self.table.select(key, on);
    }

    pub fn toggle_select(&mut self, key: RowKey) {
        self.table.toggle_select(key);
    }

    pub fn select_all(&mut self, on: bool) {
        self.table.select_all(on);
    }

    pub fn is_expanded(&self, key: RowKey) -> bool {
        self.table.is_expanded(key)
    }

    pub fn expand(&mut self, key: RowKey, on: bool) {
        self.table.expand(key, on);
    }

    pub fn toggle_expand(&mut self, key: RowKey) {
        self.table.toggle_expand(key);
    }

    pub fn is_group_open(&self, id: &str) -> bool {
        self.table.is_group_open(id)
    }

    // --- assembly -------------------------------------------------------------

    pub fn header_cells(&self) -> Vec<HeaderCell> {
        self.table
            .columns()
            .iter()
            .map(|c| HeaderCell {
                key: c.key.clone(),
                title: c.title.clone(),
                order: self
                    .table
                    .sort_by()
                    .iter()
                    .find(|s| s.key == c.key)
                    .map(|s| s.order),
            })
            .collect()
    }

    /// Assembles the current frame: pure, O(window size).
    pub fn frame(&self) -> Frame {
        let options = self.table.options();
        let window = self.windower.window();

        let body = if options.loading {
            BodyState::Loading {
                text: options.loading_text.clone(),
            }
        } else if self.table.flat_entries().is_empty() && !options.hide_no_data {
            BodyState::NoData {
                text: options.no_data_text.clone(),
            }
        } else {
            BodyState::Entries(self.visible_entries(&window))
        };

        Frame {
            fixed_header: options.fixed_header,
            header: self.header_cells(),
            padding_top: window.padding_top,
            padding_bottom: window.padding_bottom,
            body,
        }
    }

    pub fn slot_props(&self) -> SlotProps {
        SlotProps {
            columns: self.header_cells(),
            sort_by: self.table.sort_by().to_vec(),
            group_by: self.table.group_by().to_vec(),
            some_selected: self.table.some_selected(),
            all_selected: self.table.all_selected(),
            selected_count: self.table.selected_count(),
            item_count: self.table.item_count(),
            entry_count: self.table.flat_entries().len(),
        }
    }

    fn visible_entries(&self, window: &VirtualWindow) -> Vec<VisibleEntry> {
        let flat = self.table.flat_entries();
        flat[window.start_index..window.end_index]
            .iter()
            .enumerate()
            .map(|(offset, entry)| {
                let flat_index = window.start_index + offset;
                match entry {
                    FlatEntry::Row { index } => {
                        let key = self.table.rows()[*index].key;
                        VisibleEntry {
                            flat_index,
                            key: EntryKey::Row(key),
                            kind: VisibleEntryKind::Row {
                                row_index: *index,
                                selected: self.table.is_selected(key),
                                expanded: self.table.is_expanded(key),
                            },
                        }
                    }
                    FlatEntry::Header(header) => VisibleEntry {
                        flat_index,
                        key: EntryKey::Group(header.id.clone()),
                        kind: VisibleEntryKind::GroupHeader {
                            header: header.clone(),
                            open: self.table.is_group_open(&header.id),
                        },
                    },
                }
            })
            .collect()
    }
}

impl<T> core::fmt::Debug for VirtualTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualTable")
            .field("table", &self.table)
            .field("windower", &self.windower)
            .finish()
    }
}

fn entry_keys<T>(table: &DataTable<T>) -> Arc<[EntryKey]> {
    table
        .flat_entries()
        .iter()
        .map(|entry| match entry {
            FlatEntry::Row { index } => EntryKey::Row(table.rows()[*index].key),
            FlatEntry::Header(header) => EntryKey::Group(header.id.clone()),
        })
        .collect()
}
