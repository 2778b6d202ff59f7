use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }
}

fn expected_prefix(heights: &[u32], count: usize) -> u64 {
    heights[..count.min(heights.len())]
        .iter()
        .map(|&h| h as u64)
        .sum()
}

fn expected_total(heights: &[u32]) -> u64 {
    expected_prefix(heights, heights.len())
}

/// Straight-line oracle for `window_for` with overscan 0.
fn expected_window(heights: &[u32], scroll_offset: u64, viewport_height: u32) -> VirtualWindow {
    let count = heights.len();
    let total = expected_total(heights);
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
    let viewport_end = offset.saturating_add(view);

    let mut start = count - 1;
    let mut end = count;
    let mut cursor = 0u64;
    let mut start_found = false;
    for (i, &h) in heights.iter().enumerate() {
        let entry_end = cursor + h as u64;
        if !start_found && entry_end > offset {
            start = i;
            start_found = true;
        }
        if cursor >= viewport_end {
            end = i;
            break;
        }
        cursor = entry_end;
    }

    VirtualWindow {
        start_index: start,
        end_index: end,
        padding_top: expected_prefix(heights, start),
        padding_bottom: total - expected_prefix(heights, end),
    }
}

fn windower_with_heights(heights: &[u32], overscan: usize) -> Windower {
    let mut w = Windower::new(
        WindowerOptions::new(heights.len(), |_| 1).with_overscan(overscan),
    );
    for (i, &h) in heights.iter().enumerate() {
        w.measure(i, h);
    }
    w
}

#[test]
fn fixed_height_window_and_total() {
    let mut w = Windower::new(WindowerOptions::new(100, |_| 1));
    w.set_viewport_height(10);
    assert_eq!(w.total_height(), 100);

    let win = w.window();
    assert_eq!(win.start_index, 0);
    // 10 visible + overscan(1) at the end
    assert_eq!(win.end_index, 11);
    assert_eq!(win.padding_top, 0);
    assert_eq!(win.padding_bottom, 89);
}

#[test]
fn initial_window_from_estimates() {
    // Container 500px, estimate 50px, offset 0: ten estimated rows fit.
    let mut w = Windower::new(WindowerOptions::new(1000, |_| 50).with_overscan(0));
    w.set_viewport_height(500);
    let win = w.window();
    assert_eq!((win.start_index, win.end_index), (0, 10));
    assert_eq!(win.padding_top, 0);
    assert_eq!(win.padding_bottom, 990 * 50);

    // A real measurement narrows the same viewport.
    w.measure(0, 450);
    let win = w.window();
    assert_eq!((win.start_index, win.end_index), (0, 2));
}

#[test]
fn empty_and_degenerate_windows() {
    let w = Windower::new(WindowerOptions::new(0, |_| 50));
    assert_eq!(w.window(), VirtualWindow::default());
    assert!(w.window().is_empty());

    // No viewport yet: nothing materialized, everything in bottom padding.
    let w = Windower::new(WindowerOptions::new(10, |_| 50));
    let win = w.window();
    assert!(win.is_empty());
    assert_eq!(win.padding_bottom, 500);
}

#[test]
fn window_matches_oracle_randomized() {
    let mut rng = Lcg::new(0xDA7A);
    for _ in 0..200 {
        let count = rng.gen_range_usize(1, 60);
        let heights: Vec<u32> = (0..count).map(|_| rng.gen_range_u32(1, 120)).collect();
        let w = windower_with_heights(&heights, 0);

        let total = expected_total(&heights);
        let viewport = rng.gen_range_u32(1, 400);
        let offset = rng.gen_range_u64(0, total + 1);

        let got = w.window_for(offset, viewport);
        let want = expected_window(&heights, offset, viewport);
        assert_eq!(got, want, "heights={heights:?} offset={offset} viewport={viewport}");
    }
}

#[test]
fn padding_consistency_with_overscan() {
    let mut rng = Lcg::new(0x5EED);
    for _ in 0..100 {
        let count = rng.gen_range_usize(1, 50);
        let heights: Vec<u32> = (0..count).map(|_| rng.gen_range_u32(1, 90)).collect();
        let overscan = rng.gen_range_usize(0, 5);
        let w = windower_with_heights(&heights, overscan);

        let viewport = rng.gen_range_u32(1, 300);
        let offset = rng.gen_range_u64(0, expected_total(&heights) + 1);
        let win = w.window_for(offset, viewport);

        assert!(win.start_index <= win.end_index);
        assert!(win.end_index <= count);
        assert_eq!(win.padding_top, expected_prefix(&heights, win.start_index));
        assert_eq!(
            win.padding_bottom,
            expected_total(&heights) - expected_prefix(&heights, win.end_index)
        );
        assert_eq!(
            win.padding_top
                + expected_prefix(&heights, win.end_index)
                - expected_prefix(&heights, win.start_index)
                + win.padding_bottom,
            w.total_height()
        );
    }
}

#[test]
fn coverage_invariant() {
    // Every entry whose height range intersects the viewport is materialized.
    let mut rng = Lcg::new(0xC0FFEE);
    let heights: Vec<u32> = (0..40).map(|_| rng.gen_range_u32(1, 100)).collect();
    let w = windower_with_heights(&heights, 0);
    let total = expected_total(&heights);
    let viewport = 150u32;

    for offset in 0..=total.saturating_sub(viewport as u64) {
        let win = w.window_for(offset, viewport);
        let viewport_end = offset + viewport as u64;
        let mut cursor = 0u64;
        for (i, &h) in heights.iter().enumerate() {
            let end = cursor + h as u64;
            let intersects = cursor < viewport_end && end > offset;
            if intersects {
                assert!(
                    win.start_index <= i && i < win.end_index,
                    "offset={offset} entry={i} window={win:?}"
                );
            }
            cursor = end;
        }
    }
}

#[test]
fn measure_is_idempotent_for_notifications() {
    let fired = Arc::new(AtomicUsize::new(0));
    let fired2 = Arc::clone(&fired);
    let mut w = Windower::new(
        WindowerOptions::new(20, |_| 50)
            .with_on_change(Some(move |_: &Windower| {
                fired2.fetch_add(1, Ordering::SeqCst);
            })),
    );

    // Measurement equal to the estimate changes nothing.
    w.measure(3, 50);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(w.is_measured(3));

    w.measure(3, 80);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Same height again: no-op.
    w.measure(3, 80);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(w.entry_height(3), Some(80));
}

#[test]
fn resize_above_viewport_preserves_anchor() {
    let mut w = Windower::new(WindowerOptions::new(100, |_| 50).with_overscan(0));
    w.set_viewport_height(200);
    w.handle_scroll(500); // entry 10 at the top of the viewport

    let anchor = w.index_at_offset(w.scroll_offset()).unwrap();
    assert_eq!(anchor, 10);

    // An off-screen entry above the viewport turns out taller than estimated.
    let delta = w.resize(2, 80);
    assert_eq!(delta, 30);
    assert_eq!(w.scroll_offset(), 530);
    // The same entry is still at the top of the viewport.
    assert_eq!(w.index_at_offset(w.scroll_offset()).unwrap(), 10);
    assert_eq!(w.window().start_index, 10);

    // Shrinking it walks the offset back.
    let delta = w.resize(2, 50);
    assert_eq!(delta, -30);
    assert_eq!(w.scroll_offset(), 500);
}

#[test]
fn resize_inside_viewport_does_not_adjust() {
    let mut w = Windower::new(WindowerOptions::new(100, |_| 50).with_overscan(0));
    w.set_viewport_height(200);
    w.handle_scroll(500);

    let delta = w.resize(11, 90);
    assert_eq!(delta, 0);
    assert_eq!(w.scroll_offset(), 500);
    assert_eq!(w.entry_height(11), Some(90));
}

#[test]
fn keyed_measurements_survive_reorder() {
    // Identity 1000+i, measured heights follow the identity across a reorder.
    let mut w = Windower::new(WindowerOptions::new_with_key(
        10,
        |_| 50,
        |i| 1000u64 + i as u64,
    ));
    w.measure(4, 99);
    assert_eq!(w.entry_height(4), Some(99));

    // Reverse the sequence: identity 1004 now lives at index 5.
    w.set_entry_key(|i| 1000u64 + (9 - i) as u64);
    assert_eq!(w.entry_height(5), Some(99));
    assert!(w.is_measured(5));
    assert!(!w.is_measured(4));
}

#[test]
fn set_count_keeps_keyed_measurements() {
    let mut w = Windower::new(WindowerOptions::new(10, |_| 50));
    w.measure(7, 75);
    w.set_count(1000);
    assert_eq!(w.entry_height(7), Some(75));
    assert_eq!(w.total_height(), 999 * 50 + 75);

    // Shrinking below the measured index drops it from the per-index table
    // but keeps the cache for a later regrowth.
    w.set_count(5);
    assert_eq!(w.measurement_cache_len(), 1);
    w.set_count(10);
    assert_eq!(w.entry_height(7), Some(75));
}

#[test]
fn scroll_clamping() {
    let mut w = Windower::new(WindowerOptions::new(100, |_| 10));
    w.set_viewport_height(100);
    assert_eq!(w.max_scroll_offset(), 900);

    w.handle_scroll(5000);
    assert_eq!(w.scroll_offset(), 900);

    let win = w.window();
    assert_eq!(win.end_index, 100);
    assert_eq!(win.padding_bottom, 0);
}

#[test]
fn scroll_to_index_alignment() {
    let mut w = Windower::new(WindowerOptions::new(100, |_| 10));
    w.set_viewport_height(100);

    assert_eq!(w.scroll_to_index(50, Align::Start), 500);
    assert_eq!(w.scroll_to_index(50, Align::End), 410);
    assert_eq!(w.scroll_to_index(50, Align::Center), 455);

    // Auto: already fully visible, no movement.
    w.set_scroll_offset(500);
    assert_eq!(w.scroll_to_index(55, Align::Auto), 500);
    // Auto: above the viewport, snaps to start.
    assert_eq!(w.scroll_to_index(10, Align::Auto), 100);
}

#[test]
fn export_import_measurements() {
    let mut w = Windower::new(WindowerOptions::new(10, |_| 50));
    w.measure(1, 61);
    w.measure(2, 62);

    let mut snapshot = w.export_measurements();
    snapshot.sort_unstable();
    assert_eq!(snapshot, alloc::vec![(1u64, 61), (2u64, 62)]);

    let mut fresh = Windower::new(WindowerOptions::new(10, |_| 50));
    fresh.import_measurements(snapshot);
    assert_eq!(fresh.entry_height(1), Some(61));
    assert_eq!(fresh.entry_height(2), Some(62));
    assert_eq!(fresh.measurement_cache_len(), 2);
}

#[test]
fn batch_update_coalesces_notifications() {
    let fired = Arc::new(AtomicUsize::new(0));
    let fired2 = Arc::clone(&fired);
    let mut w = Windower::new(
        WindowerOptions::new(100, |_| 10)
            .with_on_change(Some(move |_: &Windower| {
                fired2.fetch_add(1, Ordering::SeqCst);
            })),
    );

    w.batch_update(|w| {
        w.set_viewport_height(100);
        w.set_scroll_offset_clamped(50);
        w.measure(0, 25);
    });
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn out_of_range_reports_are_ignored() {
    let mut w = Windower::new(WindowerOptions::new(5, |_| 10));
    w.measure(5, 99);
    assert_eq!(w.resize(100, 99), 0);
    assert_eq!(w.total_height(), 50);
    assert_eq!(w.measurement_cache_len(), 0);
}
