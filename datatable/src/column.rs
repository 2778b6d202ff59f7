use alloc::string::String;
use alloc::sync::Arc;
use core::cmp::Ordering;

use crate::Value;

/// Extracts a column's cell value from a raw item.
pub type ValueFn<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// A column-declared comparator, overriding [`Value::default_cmp`].
pub type SortFn = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// A column-declared filter predicate, overriding [`Value::matches`].
///
/// Receives the cell value and the search string; returns whether the cell
/// matches.
pub type FilterFn = Arc<dyn Fn(&Value, &str) -> bool + Send + Sync>;

/// A column definition.
///
/// The column set is fixed per table instance; rows carry one derived
/// [`Value`] per column, in declaration order.
pub struct Column<T> {
    pub key: String,
    pub title: String,
    pub(crate) value: ValueFn<T>,
    pub(crate) sort: Option<SortFn>,
    pub(crate) filter: Option<FilterFn>,
}

impl<T> Column<T> {
    pub fn new(
        key: impl Into<String>,
        value: impl Fn(&T) -> Value + Send + Sync + 'static,
    ) -> Self {
        let key = key.into();
        Self {
            title: key.clone(),
            key,
            value: Arc::new(value),
            sort: None,
            filter: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_sort(
        mut self,
        sort: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.sort = Some(Arc::new(sort));
        self
    }

    pub fn with_filter(
        mut self,
        filter: impl Fn(&Value, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn value_of(&self, raw: &T) -> Value {
        (self.value)(raw)
    }

    /// Compares two cell values with the column comparator, falling back to
    /// the default policy.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match &self.sort {
            Some(f) => f(a, b),
            None => a.default_cmp(b),
        }
    }

    /// Whether a cell value matches the search string, using the column
    /// predicate when declared.
    pub fn matches(&self, value: &Value, query: &str) -> bool {
        match &self.filter {
            Some(f) => f(value, query),
            None => value.matches(query),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            value: Arc::clone(&self.value),
            sort: self.sort.clone(),
            filter: self.filter.clone(),
        }
    }
}

impl<T> core::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("custom_sort", &self.sort.is_some())
            .field("custom_filter", &self.filter.is_some())
            .finish()
    }
}
