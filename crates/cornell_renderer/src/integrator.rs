//! Path integrator.
//!
//! Unidirectional bounce sampling against a terminal emitter: a path ends
//! when it escapes, touches a light, or runs out of bounces. There is no
//! light sampling and no Russian roulette, so paths cut off by the depth
//! limit contribute black.

use cornell_math::{Ray, EPS};
use rand::Rng;

use crate::sampler::sample_bounce_direction;
use crate::{Color, MaterialKind, Scene};

/// How a path ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOutcome {
    /// No surface was hit
    Escaped,
    /// A light-tagged surface was hit
    HitLight,
    /// The bounce limit was reached first
    DepthExceeded,
}

/// The single radiance sample carried by one primary ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub color: Color,
    pub outcome: PathOutcome,
    /// Diffuse bounces taken before the path ended
    pub bounces: u32,
}

/// Trace a primary ray through `scene`.
///
/// Throughput starts at one and is multiplied by the albedo of every diffuse
/// surface hit. Hitting a light yields `throughput * light_color`; every
/// other ending yields black.
pub fn trace_path<R: Rng + ?Sized>(
    primary: Ray,
    scene: &Scene,
    max_depth: u32,
    rng: &mut R,
) -> PathSample {
    let mut ray = primary;
    let mut throughput = Color::ONE;
    let mut depth = 0;

    while depth < max_depth {
        let rec = scene.intersect(&ray);

        match rec.material {
            MaterialKind::None => {
                return PathSample {
                    color: Color::ZERO,
                    outcome: PathOutcome::Escaped,
                    bounces: depth,
                };
            }
            MaterialKind::Light => {
                return PathSample {
                    color: throughput * scene.light_color(),
                    outcome: PathOutcome::HitLight,
                    bounces: depth,
                };
            }
            MaterialKind::Lambertian => {
                let hit_point = ray.at(rec.t);
                depth += 1;

                let dir = sample_bounce_direction(rec.normal, rng);
                // Nudge off the surface so the next query skips it
                ray = Ray::new(hit_point + EPS * dir, dir);
                throughput *= rec.color;
            }
        }
    }

    PathSample {
        color: Color::ZERO,
        outcome: PathOutcome::DepthExceeded,
        bounces: depth,
    }
}

/// Radiance estimate for one primary ray.
#[inline]
pub fn radiance<R: Rng + ?Sized>(
    primary: Ray,
    scene: &Scene,
    max_depth: u32,
    rng: &mut R,
) -> Color {
    trace_path(primary, scene, max_depth, rng).color
}
