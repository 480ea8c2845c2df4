//! Render configuration.

use serde::{Deserialize, Serialize};

use crate::{RenderError, RenderResult};

/// Bounce limit per primary ray.
pub const DEFAULT_MAX_DEPTH: u32 = 10;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Maximum number of diffuse bounces before a path is cut off (black)
    pub max_depth: u32,
    /// Base seed for all per-pixel random streams
    pub seed: u64,
    /// Number of frames the progressive loop renders before idling
    pub max_frames: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            max_depth: DEFAULT_MAX_DEPTH,
            seed: 0,
            max_frames: 50_000,
        }
    }
}

impl RenderConfig {
    /// Set output resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the bounce limit.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of pixels per frame.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reject configurations that would render nothing meaningful.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidMaxDepth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (800, 800));
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.pixel_count(), 640_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let config = RenderConfig::default().with_resolution(0, 100);
        assert!(matches!(
            config.validate(),
            Err(RenderError::InvalidResolution { width: 0, height: 100 })
        ));

        let config = RenderConfig::default().with_max_depth(0);
        assert!(matches!(config.validate(), Err(RenderError::InvalidMaxDepth)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RenderConfig = serde_json::from_str(r#"{ "width": 64, "seed": 3 }"#).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 800);
        assert_eq!(config.seed, 3);
    }
}
