//! Progressive accumulation and display normalization.
//!
//! The accumulation buffer holds one running RGB sum per pixel for the whole
//! run and counts completed frames. Display images are rebuilt from scratch
//! on every request: divide by the frame count, scale so the mean channel
//! value is 0.24, then take the square root per component.

use std::path::Path;

use cornell_math::Interval;
use rayon::prelude::*;

use crate::{Color, RenderError, RenderResult};

/// Target mean of the exposed image before the square-root curve.
pub const TARGET_MEAN: f32 = 0.24;

/// Row-major RGB image. Row 0 is the bottom of the picture.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at column `x`, row `y` (from the bottom).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[pixel_index(self.width, x, y)]
    }

    /// Set the pixel at column `x`, row `y` (from the bottom).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = pixel_index(self.width, x, y);
        self.pixels[index] = color;
    }

    /// Mean over every channel of every pixel.
    pub fn mean(&self) -> f32 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        let total: f32 = self.pixels.iter().map(|p| p.x + p.y + p.z).sum();
        total / (3 * self.pixels.len()) as f32
    }

    /// Convert to RGBA bytes, top row first, clamping to [0, 1].
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        // An empty image has no rows to flip
        for row in self.pixels.chunks(self.width.max(1) as usize).rev() {
            for color in row {
                bytes.extend_from_slice(&color_to_rgba(*color));
            }
        }
        bytes
    }

    /// Write the image as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let image = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba8())
            .ok_or_else(|| RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            })?;
        image.save(path.as_ref())?;
        log::info!("Saved {}x{} image to {:?}", self.width, self.height, path.as_ref());
        Ok(())
    }
}

/// Row-major index computed in `usize` so large frames cannot wrap.
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Quantize an already tone-mapped color.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b, 255]
}

/// Mean-based exposure followed by a square-root curve, in place.
///
/// An all-black image stays black.
pub fn tone_map(image: &mut ImageBuffer) {
    let mean = image.mean();
    if !(mean > 0.0 && mean.is_finite()) {
        return;
    }

    let scale = TARGET_MEAN / mean;
    for p in &mut image.pixels {
        let exposed = *p * scale;
        *p = Color::new(exposed.x.sqrt(), exposed.y.sqrt(), exposed.z.sqrt());
    }
}

/// Per-pixel running sums plus the number of frames added.
#[derive(Debug, Clone)]
pub struct AccumulationBuffer {
    width: u32,
    height: u32,
    sums: Vec<Color>,
    samples: u64,
}

impl AccumulationBuffer {
    /// Allocate a zeroed buffer.
    ///
    /// Fails on a zero dimension, and instead of aborting when the
    /// allocation cannot be satisfied.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }

        let pixels = width as usize * height as usize;
        let mut sums = Vec::new();
        sums.try_reserve_exact(pixels)
            .map_err(|source| RenderError::Allocation { pixels, source })?;
        sums.resize(pixels, Color::ZERO);

        log::debug!("Allocated {}x{} accumulation buffer", width, height);

        Ok(Self {
            width,
            height,
            sums,
            samples: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frames accumulated so far.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Raw sums, row 0 at the bottom.
    pub fn sums(&self) -> &[Color] {
        &self.sums
    }

    /// Running sum at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.sums[pixel_index(self.width, x, y)]
    }

    /// Add `sample(x, y)` into every pixel and count the frame.
    ///
    /// Rows are filled in parallel; `sample` runs exactly once per pixel and
    /// the frame is counted only after every row is done.
    pub fn accumulate<F>(&mut self, sample: F)
    where
        F: Fn(u32, u32) -> Color + Sync,
    {
        self.sums
            .par_chunks_mut(self.width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, sum) in row.iter_mut().enumerate() {
                    *sum += sample(x as u32, y as u32);
                }
            });
        self.samples += 1;
    }

    /// Add a precomputed frame, one sample per pixel, row 0 at the bottom.
    pub fn add_frame(&mut self, frame: &[Color]) -> RenderResult<()> {
        if frame.len() != self.sums.len() {
            return Err(RenderError::FrameSize {
                expected: self.sums.len(),
                actual: frame.len(),
            });
        }
        let width = self.width;
        self.accumulate(|x, y| frame[pixel_index(width, x, y)]);
        Ok(())
    }

    /// Monte Carlo estimate: sums divided by the frame count.
    ///
    /// Black before the first frame.
    pub fn normalized(&self) -> ImageBuffer {
        let mut image = ImageBuffer::new(self.width, self.height);
        if self.samples > 0 {
            let n = self.samples as f32;
            for (out, sum) in image.pixels.iter_mut().zip(&self.sums) {
                *out = *sum / n;
            }
        }
        image
    }

    /// Display image: the normalized estimate after [`tone_map`].
    pub fn tone_mapped(&self) -> ImageBuffer {
        let mut image = self.normalized();
        tone_map(&mut image);
        image
    }
}
