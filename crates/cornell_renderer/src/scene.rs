//! The plane set a path is traced against.
//!
//! A scene is an ordered list of planes. Intersection scans the list front to
//! back and keeps the strictly closer hit, so on exact ties the earlier plane
//! wins. The default scene is the five-wall Cornell box.

use std::path::Path;

use cornell_math::{Interval, Ray, Vec3, INF};
use serde::{Deserialize, Serialize};

use crate::{Color, MaterialKind, Plane, RenderError, RenderResult};

/// Red of the left wall.
pub const LEFT_COLOR: Color = Color::new(0.65, 0.05, 0.05);
/// Green of the right wall.
pub const RIGHT_COLOR: Color = Color::new(0.12, 0.45, 0.15);
/// Gray of the floor, ceiling and far wall.
pub const GRAY: Color = Color::new(0.93, 0.93, 0.93);
/// Emission returned by any light-tagged plane.
pub const LIGHT_COLOR: Color = Color::new(0.9, 0.85, 0.7);

/// Result of a scene query. Transient, never stored.
///
/// `normal` and `color` are only meaningful when `material` is not
/// [`MaterialKind::None`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Distance along the ray, [`INF`] on a miss
    pub t: f32,
    pub normal: Vec3,
    pub color: Color,
    pub material: MaterialKind,
}

impl HitRecord {
    /// The record returned when nothing is hit.
    pub const MISS: HitRecord = HitRecord {
        t: INF,
        normal: Vec3::ZERO,
        color: Color::ZERO,
        material: MaterialKind::None,
    };

    /// Whether the ray hit a surface.
    pub fn is_hit(&self) -> bool {
        self.material != MaterialKind::None
    }
}

fn default_light_color() -> Color {
    LIGHT_COLOR
}

/// An ordered set of planes plus the color emitted by light-tagged planes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    planes: Vec<Plane>,
    #[serde(default = "default_light_color")]
    light_color: Color,
}

impl Scene {
    /// Create a scene from planes in scan order.
    pub fn new(planes: Vec<Plane>, light_color: Color) -> Self {
        Self { planes, light_color }
    }

    /// The five-wall box: left, right, bottom, top, far. All walls are
    /// diffuse, so without a light every path renders black.
    pub fn cornell_box() -> Self {
        Self::new(
            vec![
                Plane::diffuse(Vec3::new(-1.1, 0.0, 0.0), Vec3::X, LEFT_COLOR),
                Plane::diffuse(Vec3::new(1.1, 0.0, 0.0), Vec3::NEG_X, RIGHT_COLOR),
                Plane::diffuse(Vec3::ZERO, Vec3::Y, GRAY),
                Plane::diffuse(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, GRAY),
                Plane::diffuse(Vec3::ZERO, Vec3::Z, GRAY),
            ],
            LIGHT_COLOR,
        )
    }

    /// The box with its ceiling tagged as the light.
    pub fn cornell_box_lit() -> Self {
        let mut scene = Self::cornell_box();
        scene.planes[3].material = MaterialKind::Light;
        scene
    }

    /// Parse and validate a scene from JSON.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load and validate a scene file.
    pub fn load<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json(&json)?;
        log::info!("Loaded {} planes from {:?}", scene.planes.len(), path);
        Ok(scene)
    }

    /// Check that the scene can be rendered.
    ///
    /// Planes need a unit normal and colors within [0, 1]. A scene without
    /// any light-tagged plane is valid.
    pub fn validate(&self) -> RenderResult<()> {
        if self.planes.is_empty() {
            return Err(RenderError::EmptyScene);
        }

        for (index, plane) in self.planes.iter().enumerate() {
            if !plane.point.is_finite() {
                return Err(RenderError::InvalidPlane {
                    index,
                    reason: format!("point {:?} is not finite", plane.point),
                });
            }
            if !plane.normal.is_normalized() {
                return Err(RenderError::InvalidPlane {
                    index,
                    reason: format!("normal {:?} is not unit length", plane.normal),
                });
            }
            if !plane.color.to_array().iter().all(|&c| Interval::UNIT.contains(c)) {
                return Err(RenderError::InvalidPlane {
                    index,
                    reason: format!("color {:?} is outside [0, 1]", plane.color),
                });
            }
            if plane.material == MaterialKind::None {
                return Err(RenderError::InvalidPlane {
                    index,
                    reason: "material `none` is reserved for misses".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Find the closest plane with a positive hit distance.
    pub fn intersect(&self, ray: &Ray) -> HitRecord {
        let mut rec = HitRecord::MISS;

        for plane in &self.planes {
            let t = plane.hit_distance(ray);
            if Interval::new(0.0, rec.t).surrounds(t) {
                rec = HitRecord {
                    t,
                    normal: plane.normal,
                    color: plane.color,
                    material: plane.material,
                };
            }
        }

        rec
    }

    /// Planes in scan order.
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Emission of light-tagged planes.
    pub fn light_color(&self) -> Color {
        self.light_color
    }

    /// Whether any plane is a light.
    pub fn has_light(&self) -> bool {
        self.planes.iter().any(|p| p.material == MaterialKind::Light)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::cornell_box()
    }
}
