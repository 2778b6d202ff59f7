use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Column, KeyFn, SelectMode, SortItem};

/// The configuration surface of a table instance.
///
/// Closure fields are stored in `Arc`s; builder methods cover the common
/// setup path, and every field stays public for direct updates through
/// [`crate::DataTable::update_options`].
pub struct TableOptions<T> {
    pub items: Vec<T>,
    pub columns: Vec<Column<T>>,

    /// Row identity extractor. The default uses the positional index, which
    /// is stable only while the item set's order is unchanged.
    pub item_key: KeyFn<T>,

    pub search: String,
    pub sort_by: Vec<SortItem>,
    pub group_by: Vec<SortItem>,

    /// Header-click sorting appends keys instead of replacing them.
    pub multi_sort: bool,
    /// Header-click sorting can never leave the table unsorted.
    pub must_sort: bool,

    pub select_mode: SelectMode,

    pub fixed_header: bool,
    pub loading: bool,
    pub loading_text: String,
    /// Suppresses the empty-state body when no rows match.
    pub hide_no_data: bool,
    pub no_data_text: String,

    /// Height assumed for an entry until the render layer measures it.
    pub estimated_row_height: u32,
    /// Scroll container height in pixels.
    pub container_height: u32,
}

impl<T> TableOptions<T> {
    pub fn new(items: Vec<T>, columns: Vec<Column<T>>) -> Self {
        Self {
            items,
            columns,
            item_key: Arc::new(|index, _| index as u64),
            search: String::new(),
            sort_by: Vec::new(),
            group_by: Vec::new(),
            multi_sort: false,
            must_sort: false,
            select_mode: SelectMode::Multi,
            fixed_header: false,
            loading: false,
            loading_text: String::from("Loading items..."),
            hide_no_data: false,
            no_data_text: String::from("No data available"),
            estimated_row_height: 48,
            container_height: 0,
        }
    }

    pub fn with_item_key(
        mut self,
        item_key: impl Fn(usize, &T) -> u64 + Send + Sync + 'static,
    ) -> Self {
        self.item_key = Arc::new(item_key);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_sort_by(mut self, sort_by: Vec<SortItem>) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_group_by(mut self, group_by: Vec<SortItem>) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn with_multi_sort(mut self, multi_sort: bool) -> Self {
        self.multi_sort = multi_sort;
        self
    }

    pub fn with_must_sort(mut self, must_sort: bool) -> Self {
        self.must_sort = must_sort;
        self
    }

    pub fn with_select_mode(mut self, select_mode: SelectMode) -> Self {
        self.select_mode = select_mode;
        self
    }

    pub fn with_fixed_header(mut self, fixed_header: bool) -> Self {
        self.fixed_header = fixed_header;
        self
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn with_loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = text.into();
        self
    }

    pub fn with_hide_no_data(mut self, hide_no_data: bool) -> Self {
        self.hide_no_data = hide_no_data;
        self
    }

    pub fn with_no_data_text(mut self, text: impl Into<String>) -> Self {
        self.no_data_text = text.into();
        self
    }

    pub fn with_estimated_row_height(mut self, px: u32) -> Self {
        self.estimated_row_height = px;
        self
    }

    pub fn with_container_height(mut self, px: u32) -> Self {
        self.container_height = px;
        self
    }
}

impl<T: Clone> Clone for TableOptions<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            columns: self.columns.clone(),
            item_key: Arc::clone(&self.item_key),
            search: self.search.clone(),
            sort_by: self.sort_by.clone(),
            group_by: self.group_by.clone(),
            multi_sort: self.multi_sort,
            must_sort: self.must_sort,
            select_mode: self.select_mode,
            fixed_header: self.fixed_header,
            loading: self.loading,
            loading_text: self.loading_text.clone(),
            hide_no_data: self.hide_no_data,
            no_data_text: self.no_data_text.clone(),
            estimated_row_height: self.estimated_row_height,
            container_height: self.container_height,
        }
    }
}

impl<T> core::fmt::Debug for TableOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TableOptions")
            .field("items", &self.items.len())
            .field("columns", &self.columns)
            .field("search", &self.search)
            .field("sort_by", &self.sort_by)
            .field("group_by", &self.group_by)
            .field("multi_sort", &self.multi_sort)
            .field("must_sort", &self.must_sort)
            .field("select_mode", &self.select_mode)
            .field("fixed_header", &self.fixed_header)
            .field("loading", &self.loading)
            .field("estimated_row_height", &self.estimated_row_height)
            .field("container_height", &self.container_height)
            .finish_non_exhaustive()
    }
}
