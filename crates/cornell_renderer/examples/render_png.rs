//! Render the lit box without a window and save a PNG.
//!
//! cargo run --release --example render_png -- 256

use cornell_renderer::{FrameDriver, PinholeCamera, RenderConfig, Scene};

fn main() {
    let frames: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(64);

    let mut config = RenderConfig::default().with_resolution(400, 400);
    config.max_frames = frames;

    let mut driver = FrameDriver::new(config, PinholeCamera::default(), Scene::cornell_box_lit())
        .expect("Invalid render setup");

    println!("Rendering {} frames...", frames);
    let start = std::time::Instant::now();
    while !driver.is_finished() {
        driver.render_frame();
    }
    println!("Rendered in {:?}", start.elapsed());

    let filename = "cornell_lit.png";
    driver.snapshot().save_png(filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}
