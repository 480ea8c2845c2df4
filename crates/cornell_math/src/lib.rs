// Re-export glam for convenience
pub use glam::*;

// Cornell math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Threshold below which a ray counts as parallel to a plane; also the
/// offset applied to bounce origins to avoid self-intersection.
pub const EPS: f32 = 1e-4;

/// Distance reported for a miss.
pub const INF: f32 = 1e10;
