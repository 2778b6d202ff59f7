use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp;

use crate::key::{EntryIdentity, KeyHeightMap};
use crate::prefix::PrefixSums;
use crate::{Align, EntryKey, VirtualWindow, WindowerOptions};

/// A headless scroll-windowing engine.
///
/// The windower owns a height table: one slot per entry index, filled from
/// the estimate until a measurement arrives. Measurements are additionally
/// cached by entry identity (`entry_key`), so rebuilding or reordering the
/// entry sequence never resurrects a stale height under a reused index.
///
/// All queries are O(log n) or O(window size); only `set_count` /
/// `sync_entry_keys` / `set_options` pay O(n), and only on genuine upstream
/// change.
#[derive(Clone, Debug)]
pub struct Windower<K = EntryKey> {
    options: WindowerOptions<K>,
    viewport_height: u32,
    scroll_offset: u64,

    heights: Vec<u32>, // estimate until measured
    measured: Vec<bool>,
    sums: PrefixSums,
    key_heights: KeyHeightMap<K>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<K: EntryIdentity> Windower<K> {
    pub fn new(options: WindowerOptions<K>) -> Self {
        wdebug!(
            count = options.count,
            overscan = options.overscan,
            "Windower::new"
        );
        let mut w = Self {
            viewport_height: options.viewport_height,
            scroll_offset: options.initial_offset,
            heights: Vec::new(),
            measured: Vec::new(),
            sums: PrefixSums::default(),
            key_heights: KeyHeightMap::<K>::new(),
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        w.rebuild_heights();
        w
    }

    pub fn options(&self) -> &WindowerOptions<K> {
        &self.options
    }

    pub fn set_options(&mut self, options: WindowerOptions<K>) {
        let prev_count = self.options.count;
        let estimate_unchanged =
            Arc::ptr_eq(&self.options.estimate_height, &options.estimate_height);
        let entry_key_unchanged = Arc::ptr_eq(&self.options.entry_key, &options.entry_key);
        self.options = options;

        if self.options.count != prev_count || !estimate_unchanged || !entry_key_unchanged {
            self.rebuild_heights();
        }
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to
    /// `set_options`, which decides what needs rebuilding.
    pub fn update_options(&mut self, f: impl FnOnce(&mut WindowerOptions<K>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Windower<K>) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// On a typical frame an adapter updates viewport height and scroll
    /// offset together; without batching each setter would fire `on_change`.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    /// Sets the entry count, rebuilding per-index heights from the keyed
    /// measurement cache and the estimates.
    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.rebuild_heights();
        self.notify();
    }

    /// Rebuilds per-index heights from the keyed measurement cache.
    ///
    /// Call this after the index → identity mapping changed while `count`
    /// stayed the same (e.g. the backing sequence was re-sorted).
    pub fn sync_entry_keys(&mut self) {
        self.rebuild_heights();
        self.notify();
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        if self.viewport_height == height {
            return;
        }
        self.viewport_height = height;
        self.notify();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        self.scroll_offset = offset;
        self.notify();
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        self.set_scroll_offset(self.clamp_scroll_offset(offset));
    }

    /// Applies a scroll event from the UI layer (wheel/drag/scrollbar).
    ///
    /// The offset is clamped to the scrollable range. O(log n).
    pub fn handle_scroll(&mut self, offset: u64) {
        wtrace!(offset, "handle_scroll");
        self.set_scroll_offset_clamped(offset);
    }

    pub fn set_viewport_and_scroll(&mut self, viewport_height: u32, scroll_offset: u64) {
        self.batch_update(|w| {
            w.set_viewport_height(viewport_height);
            w.set_scroll_offset_clamped(scroll_offset);
        });
    }

    pub fn set_estimate_height(&mut self, f: impl Fn(usize) -> u32 + Send + Sync + 'static) {
        self.options.estimate_height = Arc::new(f);
        self.rebuild_heights();
        self.notify();
    }

    pub fn set_entry_key(&mut self, f: impl Fn(usize) -> K + Send + Sync + 'static) {
        self.options.entry_key = Arc::new(f);
        self.rebuild_heights();
        self.notify();
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
        self.notify();
    }

    /// Records a measured height for the entry at `index`.
    ///
    /// Idempotent: re-reporting the entry's current height is a no-op and
    /// does not fire `on_change`.
    pub fn measure(&mut self, index: usize, height: u32) {
        if index >= self.options.count {
            wwarn!(index, count = self.options.count, "measure: out of range");
            return;
        }
        let key = self.key_for(index);
        self.measure_keyed(index, key, height);
    }

    pub fn measure_keyed(&mut self, index: usize, key: K, height: u32) {
        if index >= self.options.count {
            return;
        }
        wtrace!(index, height, "measure_keyed");
        if self.apply_height_keyed(index, key, height) != 0 {
            self.notify();
        }
    }

    /// Records a measured height and keeps the visual scroll anchor stable.
    ///
    /// When the resized entry starts above the current scroll offset, the
    /// offset is shifted by the height delta so on-screen content does not
    /// jump. Returns the scroll adjustment that was applied (0 when the
    /// entry is inside or below the viewport, or the height was unchanged).
    pub fn resize(&mut self, index: usize, height: u32) -> i64 {
        if index >= self.options.count {
            wwarn!(index, count = self.options.count, "resize: out of range");
            return 0;
        }
        let key = self.key_for(index);
        self.resize_keyed(index, key, height)
    }

    pub fn resize_keyed(&mut self, index: usize, key: K, height: u32) -> i64 {
        if index >= self.options.count {
            return 0;
        }
        let start = self.sums.prefix(index);
        let delta = self.apply_height_keyed(index, key, height);
        if delta == 0 {
            return 0;
        }
        wtrace!(index, height, delta, "resize_keyed");

        if start < self.scroll_offset {
            if delta > 0 {
                self.scroll_offset = self.scroll_offset.saturating_add(delta as u64);
            } else {
                self.scroll_offset = self.scroll_offset.saturating_sub(delta.unsigned_abs());
            }
            self.notify();
            delta
        } else {
            self.notify();
            0
        }
    }

    fn apply_height_keyed(&mut self, index: usize, key: K, height: u32) -> i64 {
        let cur = self.heights[index];
        self.measured[index] = true;
        self.key_heights.insert(key, height);
        if cur == height {
            return 0;
        }
        self.heights[index] = height;
        let delta = height as i64 - cur as i64;
        self.sums.add(index, delta);
        delta
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    /// Total content height: measured heights where known, estimates
    /// otherwise.
    pub fn total_height(&self) -> u64 {
        self.sums.total()
    }

    pub fn key_for(&self, index: usize) -> K {
        (self.options.entry_key)(index)
    }

    pub fn entry_start(&self, index: usize) -> Option<u64> {
        (index < self.options.count).then(|| self.sums.prefix(index))
    }

    pub fn entry_height(&self, index: usize) -> Option<u32> {
        self.heights.get(index).copied()
    }

    pub fn entry_end(&self, index: usize) -> Option<u64> {
        let start = self.entry_start(index)?;
        let height = self.entry_height(index)? as u64;
        Some(start.saturating_add(height))
    }

    /// Index of the entry whose height range covers `offset`.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let count = self.options.count;
        if count == 0 {
            return None;
        }
        Some(self.sums.lower_bound(offset).min(count - 1))
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.sums
            .total()
            .saturating_sub(self.viewport_height as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Computes the window for the current scroll offset and viewport.
    pub fn window(&self) -> VirtualWindow {
        self.window_for(self.scroll_offset, self.viewport_height)
    }

    /// Computes the window for a given scroll offset and viewport height.
    ///
    /// The returned slice covers every entry whose cumulative height range
    /// intersects `[scroll_offset, scroll_offset + viewport_height)`, widened
    /// by `overscan` on both sides; the paddings sum the heights of all
    /// entries outside the slice.
    pub fn window_for(&self, scroll_offset: u64, viewport_height: u32) -> VirtualWindow {
        let count = self.options.count;
        let total = self.sums.total();
        if count == 0 || viewport_height == 0 {
            return VirtualWindow {
                start_index: 0,
                end_index: 0,
                padding_top: 0,
                padding_bottom: total,
            };
        }

        let view = viewport_height as u64;
        let offset = scroll_offset.min(total.saturating_sub(view));
        let last_visible = offset.saturating_add(view).saturating_sub(1).max(offset);

        let mut start = self.sums.lower_bound(offset).min(count - 1);
        let mut end = self.sums.lower_bound(last_visible).min(count - 1) + 1;

        let overscan = self.options.overscan;
        start = start.saturating_sub(overscan);
        end = cmp::min(count, end.saturating_add(overscan));

        VirtualWindow {
            start_index: start,
            end_index: end,
            padding_top: self.sums.prefix(start),
            padding_bottom: total.saturating_sub(self.sums.prefix(end)),
        }
    }

    /// Programmatically scrolls to an entry. Returns the applied (clamped)
    /// offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
        offset
    }

    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        if self.options.count == 0 {
            return 0;
        }
        let index = index.min(self.options.count - 1);
        let start = self.sums.prefix(index);
        let height = self.heights[index] as u64;
        let end = start.saturating_add(height);
        let view = self.viewport_height as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => start
                .saturating_add(height / 2)
                .saturating_sub(view / 2),
            Align::Auto => {
                let cur = self.scroll_offset;
                let cur_end = cur.saturating_add(view);
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_offset(target)
    }

    /// Drops every cached measurement and falls back to estimates.
    pub fn reset_measurements(&mut self) {
        self.key_heights.clear();
        self.rebuild_heights();
        self.notify();
    }

    /// Number of cached measured heights (identity → height).
    pub fn measurement_cache_len(&self) -> usize {
        self.key_heights.len()
    }

    /// Exports the cached measured heights (useful for persistence).
    pub fn export_measurements(&self) -> Vec<(K, u32)>
    where
        K: Clone,
    {
        let mut out = Vec::with_capacity(self.key_heights.len());
        for (k, v) in self.key_heights.iter() {
            out.push((k.clone(), *v));
        }
        out
    }

    /// Replaces the cached measured heights, then rebuilds per-index heights
    /// using the current identity mapping.
    pub fn import_measurements(&mut self, entries: impl IntoIterator<Item = (K, u32)>) {
        self.key_heights.clear();
        for (k, v) in entries {
            self.key_heights.insert(k, v);
        }
        wdebug!(entries = self.key_heights.len(), "import_measurements");
        self.rebuild_heights();
        self.notify();
    }

    fn rebuild_heights(&mut self) {
        let count = self.options.count;
        wdebug!(count, cached = self.key_heights.len(), "rebuild_heights");
        self.heights.clear();
        self.measured.clear();
        self.heights.reserve_exact(count);
        self.measured.reserve_exact(count);

        for i in 0..count {
            let key = self.key_for(i);
            if let Some(&height) = self.key_heights.get(&key) {
                self.heights.push(height);
                self.measured.push(true);
            } else {
                self.heights.push((self.options.estimate_height)(i));
                self.measured.push(false);
            }
        }
        self.sums = PrefixSums::from_heights(&self.heights);
    }
}
