//! Contract between the frame driver and whatever shows its output.

use std::convert::Infallible;

use crate::ImageBuffer;

/// Receives one tone-mapped image per rendered frame.
///
/// Implementations may block (a window waiting on vsync, a file write).
/// They are only ever called from the thread driving the frames.
pub trait Presenter {
    type Error;

    fn present(&mut self, image: &ImageBuffer) -> Result<(), Self::Error>;
}

/// Keeps the most recent image, for headless runs and tests.
#[derive(Debug, Default)]
pub struct LatestImage {
    image: Option<ImageBuffer>,
    presented: u64,
}

impl LatestImage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last image presented, if any.
    pub fn image(&self) -> Option<&ImageBuffer> {
        self.image.as_ref()
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn into_image(self) -> Option<ImageBuffer> {
        self.image
    }
}

impl Presenter for LatestImage {
    type Error = Infallible;

    fn present(&mut self, image: &ImageBuffer) -> Result<(), Self::Error> {
        self.image = Some(image.clone());
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_latest_image_keeps_last() {
        let mut sink = LatestImage::new();
        assert!(sink.image().is_none());

        let mut first = ImageBuffer::new(2, 2);
        first.set(0, 0, Color::ONE);
        sink.present(&first).unwrap();

        let second = ImageBuffer::new(2, 2);
        sink.present(&second).unwrap();

        assert_eq!(sink.presented(), 2);
        assert_eq!(sink.image(), Some(&second));
    }
}
