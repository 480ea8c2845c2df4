//! Surface material tags.

use cornell_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// How a surface interacts with an incoming path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    /// Not a surface: the ray left the scene.
    #[default]
    None,
    /// Ideal diffuse reflector; the path continues with a bounce.
    Lambertian,
    /// Terminal emitter; the path ends with the scene's light color.
    Light,
}

impl MaterialKind {
    /// Whether a path hitting this material stops.
    pub fn terminates_path(self) -> bool {
        !matches!(self, MaterialKind::Lambertian)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminates_path() {
        assert!(MaterialKind::None.terminates_path());
        assert!(MaterialKind::Light.terminates_path());
        assert!(!MaterialKind::Lambertian.terminates_path());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&MaterialKind::Lambertian).unwrap();
        assert_eq!(json, "\"lambertian\"");

        let kind: MaterialKind = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(kind, MaterialKind::Light);
    }
}
