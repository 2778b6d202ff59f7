// Example: estimates refined by measurements as entries render.
//
// Entries start at an estimated 40px; the "render layer" below reports real
// heights for whatever is in the window, and the windower keeps the scroll
// anchor stable even when off-screen entries are corrected.
use windower::{Windower, WindowerOptions};

fn real_height(index: usize) -> u32 {
    40 + ((index * 13) % 50) as u32
}

fn main() {
    let mut w = Windower::new(WindowerOptions::new(1_000, |_| 40).with_overscan(2));
    w.set_viewport_height(300);

    for frame in 0..5 {
        let win = w.window();
        println!(
            "frame {frame}: window=[{}, {}) total={}",
            win.start_index,
            win.end_index,
            w.total_height()
        );

        // Render layer measures what it materialized.
        for i in win.start_index..win.end_index {
            w.measure(i, real_height(i));
        }

        w.handle_scroll(w.scroll_offset() + 120);
    }

    // Correcting an entry above the viewport shifts the offset, not the view.
    let before = w.index_at_offset(w.scroll_offset());
    w.resize(0, 90);
    let after = w.index_at_offset(w.scroll_offset());
    println!("anchor before={before:?} after={after:?}");
}
