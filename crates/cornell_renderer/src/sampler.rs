//! Diffuse bounce sampling.

use cornell_math::Vec3;
use rand::Rng;

/// Uniform point inside the unit ball, by rejection from the [-1, 1] cube.
///
/// About half of the cube lies in the ball, so the loop runs roughly twice
/// per call. There is no iteration cap.
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
        );
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}

/// New direction leaving a diffuse surface with normal `normal`.
///
/// Offsets a point from the unit ball by the normal and normalizes, which
/// leans the result toward the normal's hemisphere.
pub fn sample_bounce_direction<R: Rng + ?Sized>(normal: Vec3, rng: &mut R) -> Vec3 {
    (random_in_unit_sphere(rng) + normal).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_points_inside_unit_ball() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..10_000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() <= 1.0);
        }
    }

    #[test]
    fn test_bounce_direction_is_unit() {
        let mut rng = SmallRng::seed_from_u64(2);
        for normal in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z] {
            for _ in 0..1000 {
                let dir = sample_bounce_direction(normal, &mut rng);
                assert!((dir.length() - 1.0).abs() < 1e-4, "dir={dir:?}");
            }
        }
    }

    #[test]
    fn test_mean_direction_aligns_with_normal() {
        let mut rng = SmallRng::seed_from_u64(3);
        let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        let n = 20_000;

        let mean = (0..n)
            .map(|_| sample_bounce_direction(normal, &mut rng))
            .fold(Vec3::ZERO, |acc, d| acc + d)
            / n as f32;

        assert!(mean.normalize().dot(normal) > 0.99, "mean={mean:?}");
        // Most samples land in the normal's hemisphere
        assert!(mean.dot(normal) > 0.5);
    }

    #[test]
    fn test_same_seed_same_directions() {
        let mut a = SmallRng::seed_from_u64(99);
        let mut b = SmallRng::seed_from_u64(99);
        for _ in 0..100 {
            assert_eq!(
                sample_bounce_direction(Vec3::Y, &mut a),
                sample_bounce_direction(Vec3::Y, &mut b)
            );
        }
    }
}
