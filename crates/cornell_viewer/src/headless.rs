//! Windowless harness: render a fixed number of frames, then write a PNG.

use std::convert::Infallible;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use cornell_renderer::{FrameDriver, ImageBuffer, LatestImage, Presenter};

/// Keeps the latest frame and reports progress in tenths.
struct Progress {
    latest: LatestImage,
    total: u64,
    step: u64,
    started: Instant,
}

impl Progress {
    fn new(total: u64) -> Self {
        Self {
            latest: LatestImage::new(),
            total,
            step: (total / 10).max(1),
            started: Instant::now(),
        }
    }
}

impl Presenter for Progress {
    type Error = Infallible;

    fn present(&mut self, image: &ImageBuffer) -> Result<(), Self::Error> {
        self.latest.present(image)?;

        let done = self.latest.presented();
        if done % self.step == 0 || done == self.total {
            log::info!(
                "{:>3}% ({} / {} frames, {:?} elapsed)",
                done * 100 / self.total.max(1),
                done,
                self.total,
                self.started.elapsed()
            );
        }
        Ok(())
    }
}

pub fn run(mut driver: FrameDriver, output: &Path) -> Result<()> {
    let total = driver.config().max_frames.saturating_sub(driver.samples());
    let mut progress = Progress::new(total);

    log::info!("Rendering {} frames headless", total);
    driver.run(&mut progress).unwrap_or_else(|never| match never {});

    let image = match progress.latest.into_image() {
        Some(image) => image,
        // Zero frames requested: write the (black) current state
        None => driver.snapshot(),
    };
    image
        .save_png(output)
        .with_context(|| format!("Failed to write {:?}", output))?;

    Ok(())
}
