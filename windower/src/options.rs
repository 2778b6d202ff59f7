use alloc::sync::Arc;

use crate::windower::Windower;
use crate::EntryKey;

/// A callback fired when the windower's state changes (scroll, viewport,
/// count, or a height that affects layout).
pub type OnChangeCallback<K> = Arc<dyn Fn(&Windower<K>) + Send + Sync>;

/// Configuration for [`crate::Windower`].
///
/// Cheap to clone: closure fields are stored in `Arc`s so callers can tweak a
/// few fields and call `Windower::set_options` without reallocating closures.
pub struct WindowerOptions<K = EntryKey> {
    /// Number of entries in the (flattened) sequence.
    pub count: usize,

    /// Estimated height for an unmeasured entry at a given index.
    pub estimate_height: Arc<dyn Fn(usize) -> u32 + Send + Sync>,

    /// Stable identity for the entry at a given index.
    ///
    /// Measured heights are cached under this identity, so they survive
    /// reorders and rebuilds of the entry sequence.
    pub entry_key: Arc<dyn Fn(usize) -> K + Send + Sync>,

    /// Extra entries materialized on each side of the visible range.
    pub overscan: usize,

    /// Initial viewport height in pixels.
    pub viewport_height: u32,

    /// Initial scroll offset in pixels.
    pub initial_offset: u64,

    /// Optional callback fired when the windower's internal state changes.
    pub on_change: Option<OnChangeCallback<K>>,
}

impl WindowerOptions<EntryKey> {
    /// Creates options for a sequence keyed by index (`EntryKey = u64`).
    ///
    /// `estimate_height(i)` should return the estimated height of entry `i`;
    /// the estimate is used until the entry is actually measured.
    pub fn new(count: usize, estimate_height: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        Self {
            count,
            estimate_height: Arc::new(estimate_height),
            entry_key: Arc::new(|i| i as u64),
            overscan: 1,
            viewport_height: 0,
            initial_offset: 0,
            on_change: None,
        }
    }
}

impl<K> WindowerOptions<K> {
    /// Creates options with a custom identity mapping.
    ///
    /// Use this when measured heights should follow entries across
    /// reordering/replacement: `entry_key(i)` must return a stable identity
    /// for the entry at index `i`.
    pub fn new_with_key(
        count: usize,
        estimate_height: impl Fn(usize) -> u32 + Send + Sync + 'static,
        entry_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            count,
            estimate_height: Arc::new(estimate_height),
            entry_key: Arc::new(entry_key),
            overscan: 1,
            viewport_height: 0,
            initial_offset: 0,
            on_change: None,
        }
    }

    pub fn with_entry_key(mut self, entry_key: impl Fn(usize) -> K + Send + Sync + 'static) -> Self {
        self.entry_key = Arc::new(entry_key);
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_viewport_height(mut self, viewport_height: u32) -> Self {
        self.viewport_height = viewport_height;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: u64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Windower<K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl<K> Clone for WindowerOptions<K> {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            estimate_height: Arc::clone(&self.estimate_height),
            entry_key: Arc::clone(&self.entry_key),
            overscan: self.overscan,
            viewport_height: self.viewport_height,
            initial_offset: self.initial_offset,
            on_change: self.on_change.clone(),
        }
    }
}

impl<K> core::fmt::Debug for WindowerOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowerOptions")
            .field("count", &self.count)
            .field("overscan", &self.overscan)
            .field("viewport_height", &self.viewport_height)
            .field("initial_offset", &self.initial_offset)
            .finish_non_exhaustive()
    }
}
