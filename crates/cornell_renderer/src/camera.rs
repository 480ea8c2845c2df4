//! Pinhole camera for primary ray generation.

use cornell_math::{Ray, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{RenderError, RenderResult};

/// Pinhole camera with a fixed orthonormal frame.
///
/// In camera space a pixel maps to `(dx, dy, -1)` where `-1` runs along
/// `forward`; with the default frame this is world space unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinholeCamera {
    pub position: Vec3,
    /// Viewing direction (unit length)
    pub forward: Vec3,
    /// Approximate up vector, re-orthogonalized against `forward`
    pub up: Vec3,
    /// Half-height of the image plane at unit distance
    pub fov: f32,
}

impl PinholeCamera {
    /// Create a camera at `position` looking along `forward`.
    pub fn new(position: Vec3, forward: Vec3, up: Vec3, fov: f32) -> Self {
        Self {
            position,
            forward,
            up,
            fov,
        }
    }

    /// Check that the camera produces finite rays.
    pub fn validate(&self) -> RenderResult<()> {
        if !self.fov.is_finite() || self.fov <= 0.0 {
            return Err(RenderError::InvalidCamera(format!(
                "fov must be positive, got {}",
                self.fov
            )));
        }
        if !self.position.is_finite() {
            return Err(RenderError::InvalidCamera(format!(
                "position {:?} is not finite",
                self.position
            )));
        }
        if !self.forward.is_normalized() {
            return Err(RenderError::InvalidCamera(format!(
                "forward {:?} is not unit length",
                self.forward
            )));
        }
        if self.forward.cross(self.up).length_squared() < 1e-8 {
            return Err(RenderError::InvalidCamera("up is parallel to forward".to_string()));
        }
        Ok(())
    }

    /// Right/up/back basis. With the default frame this is X, Y, Z.
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let w = -self.forward;
        let u = self.up.cross(w).normalize();
        let v = w.cross(u);
        (u, v, w)
    }

    /// Ray through pixel column `u`, row `v` (counted from the bottom) with
    /// a sub-pixel offset `jitter` in [0, 1) on each axis.
    pub fn ray_through(&self, u: u32, v: u32, width: u32, height: u32, jitter: (f32, f32)) -> Ray {
        let aspect = width as f32 / height as f32;
        let fov = self.fov;
        let h = height as f32;

        let dx = 2.0 * fov * (u as f32 + jitter.0) / h - fov * aspect;
        let dy = 2.0 * fov * (v as f32 + jitter.1) / h - fov;

        let (right, up, back) = self.basis();
        let dir = (dx * right + dy * up - back).normalize();

        Ray::new(self.position, dir)
    }

    /// Jittered primary ray for pixel `(u, v)`.
    pub fn get_ray<R: Rng + ?Sized>(
        &self,
        u: u32,
        v: u32,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Ray {
        let jitter = (rng.gen::<f32>(), rng.gen::<f32>());
        self.ray_through(u, v, width, height, jitter)
    }
}

impl Default for PinholeCamera {
    /// Looking into the box through its open front.
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.6, 3.0), Vec3::NEG_Z, Vec3::Y, 0.8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_basis_is_world_axes() {
        let (u, v, w) = PinholeCamera::default().basis();
        assert!((u - Vec3::X).length() < 1e-6);
        assert!((v - Vec3::Y).length() < 1e-6);
        assert!((w - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_direction_matches_projection_formula() {
        let camera = PinholeCamera::default();
        let (width, height) = (800, 600);
        let (u, v, jitter) = (123, 456, (0.25, 0.75));

        let ray = camera.ray_through(u, v, width, height, jitter);

        let fov = 0.8;
        let aspect = width as f32 / height as f32;
        let dx = 2.0 * fov * (u as f32 + 0.25) / height as f32 - fov * aspect;
        let dy = 2.0 * fov * (v as f32 + 0.75) / height as f32 - fov;
        let expected = Vec3::new(dx, dy, -1.0).normalize();

        assert!((ray.direction - expected).length() < 1e-5);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.6, 3.0));
    }

    #[test]
    fn test_image_center_looks_forward() {
        let camera = PinholeCamera::default();
        // u + jitter = width / 2 on a square image gives dx = 0
        let ray = camera.ray_through(400, 400, 800, 800, (0.0, 0.0));
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_turned_camera_looks_down_positive_z() {
        let camera = PinholeCamera::new(Vec3::ZERO, Vec3::Z, Vec3::Y, 0.8);
        let ray = camera.ray_through(5, 5, 10, 10, (0.0, 0.0));
        assert!((ray.direction - Vec3::Z).length() < 1e-6);

        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let ray = camera.get_ray(0, 9, 10, 10, &mut rng);
            assert!(ray.direction.z > 0.0);
            assert!((ray.direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_validate() {
        assert!(PinholeCamera::default().validate().is_ok());

        let mut camera = PinholeCamera::default();
        camera.fov = 0.0;
        assert!(matches!(camera.validate(), Err(RenderError::InvalidCamera(_))));

        let camera = PinholeCamera::new(Vec3::ZERO, Vec3::Y, Vec3::Y, 0.8);
        assert!(camera.validate().is_err());
    }
}
