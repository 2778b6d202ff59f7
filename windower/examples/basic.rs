// Example: fixed-estimate windowing over a large sequence.
use windower::{Windower, WindowerOptions};

fn main() {
    let mut w = Windower::new(WindowerOptions::new(100_000, |_| 24).with_overscan(3));
    w.set_viewport_height(600);

    w.handle_scroll(480_000);

    let win = w.window();
    println!("total_height={}", w.total_height());
    println!(
        "window=[{}, {}) padding_top={} padding_bottom={}",
        win.start_index, win.end_index, win.padding_top, win.padding_bottom
    );
}
