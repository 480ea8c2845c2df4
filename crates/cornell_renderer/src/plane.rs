//! Infinite plane primitive.

use cornell_math::{Ray, Vec3, EPS, INF};
use serde::{Deserialize, Serialize};

use crate::{Color, MaterialKind};

/// Distance along a ray to the plane through `plane_point` with normal `plane_normal`.
///
/// Returns [`INF`] when the ray runs parallel to the plane. The result may be
/// negative (plane behind the origin); callers decide which distances count.
#[inline]
pub fn intersect_plane(
    ray_origin: Vec3,
    ray_dir: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> f32 {
    let denom = ray_dir.dot(plane_normal);
    if denom.abs() > EPS {
        (plane_point - ray_origin).dot(plane_normal) / denom
    } else {
        INF
    }
}

/// A plane with a surface description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Any point on the plane
    pub point: Vec3,
    /// Outward unit normal
    pub normal: Vec3,
    /// Base color (albedo for diffuse planes)
    pub color: Color,
    pub material: MaterialKind,
}

impl Plane {
    /// Create a new plane.
    pub fn new(point: Vec3, normal: Vec3, color: Color, material: MaterialKind) -> Self {
        Self {
            point,
            normal,
            color,
            material,
        }
    }

    /// Create a Lambertian plane.
    pub fn diffuse(point: Vec3, normal: Vec3, color: Color) -> Self {
        Self::new(point, normal, color, MaterialKind::Lambertian)
    }

    /// Distance along `ray` to this plane, or [`INF`] if parallel.
    #[inline]
    pub fn hit_distance(&self, ray: &Ray) -> f32 {
        intersect_plane(ray.origin, ray.direction, self.point, self.normal)
    }
}
