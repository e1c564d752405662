use std::f64::consts::PI;
use std::fmt;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::math::orbit::orbit_position;

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub String);

impl BodyId {
    pub fn new(id: impl Into<String>) -> Self {
        BodyId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BodyId {
    fn from(s: &str) -> Self {
        BodyId::new(s)
    }
}

// All the immutable info about a body. Defined once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalBody {
    pub id: BodyId,
    pub radius: f32,
    // Radius of the (circular) orbit. Zero for the central body.
    pub distance: f64,
    // Radians per time unit. Zero for the central body.
    pub angular_speed: f64,
    // Used when rendering without textures
    pub color: Point3<f32>,
}

impl OrbitalBody {
    pub fn is_central(&self) -> bool {
        self.distance == 0.0
    }

    pub fn period(&self) -> Option<f64> {
        if self.angular_speed > 0.0 {
            Some(2.0 * PI / self.angular_speed)
        } else {
            None
        }
    }

    pub fn position_at(&self, time: f64) -> Point3<f64> {
        if self.is_central() {
            return Point3::origin();
        }
        orbit_position(time, self.angular_speed, self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth() -> OrbitalBody {
        OrbitalBody {
            id: BodyId::new("earth"),
            radius: 1.0,
            distance: 20.0,
            angular_speed: 0.03,
            color: Point3::new(0.2, 0.4, 1.0),
        }
    }

    #[test]
    fn test_period() {
        approx::assert_relative_eq!(earth().period().unwrap(), 2.0 * PI / 0.03);

        let sun = OrbitalBody {
            id: BodyId::new("sun"),
            radius: 5.0,
            distance: 0.0,
            angular_speed: 0.0,
            color: Point3::new(1.0, 0.8, 0.2),
        };
        assert!(sun.is_central());
        assert_eq!(sun.period(), None);
        assert_eq!(sun.position_at(42.0), Point3::origin());
    }

    #[test]
    fn test_position_after_full_period() {
        let earth = earth();
        let period = earth.period().unwrap();
        approx::assert_abs_diff_eq!(
            earth.position_at(period),
            earth.position_at(0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_id_display() {
        assert_eq!(BodyId::from("mars").to_string(), "mars");
    }
}
