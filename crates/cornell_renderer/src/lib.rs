//! Cornell - progressive CPU path tracing
//!
//! A Monte Carlo path tracer for a box of diffuse planes. Every frame adds
//! one path per pixel into a persistent accumulation buffer, and the display
//! image is re-derived from the running sums each time it is shown.

mod accumulator;
mod camera;
mod config;
mod error;
mod frame;
mod integrator;
mod material;
mod plane;
mod presenter;
mod sampler;
mod scene;

pub use accumulator::{color_to_rgba, tone_map, AccumulationBuffer, ImageBuffer, TARGET_MEAN};
pub use camera::PinholeCamera;
pub use config::{RenderConfig, DEFAULT_MAX_DEPTH};
pub use error::{RenderError, RenderResult};
pub use frame::FrameDriver;
pub use integrator::{radiance, trace_path, PathOutcome, PathSample};
pub use material::{Color, MaterialKind};
pub use plane::{intersect_plane, Plane};
pub use presenter::{LatestImage, Presenter};
pub use sampler::{random_in_unit_sphere, sample_bounce_direction};
pub use scene::{HitRecord, Scene, GRAY, LEFT_COLOR, LIGHT_COLOR, RIGHT_COLOR};

/// Re-export Vec3 and common math types from cornell_math
pub use cornell_math::{Interval, Ray, Vec3, EPS, INF};
