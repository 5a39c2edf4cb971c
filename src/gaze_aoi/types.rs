use nalgebra::Vector3;
use serde::Deserialize;
use std::fmt;

/// A single gaze estimate in radians.
///
/// Field names are the only source of truth for pitch/yaw ordering; every
/// producer must fill the struct by name so the two angles cannot be
/// swapped silently at a call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeAngle {
    pub pitch: f64,
    pub yaw: f64,
}

impl GazeAngle {
    pub fn new(pitch: f64, yaw: f64) -> Self {
        Self { pitch, yaw }
    }

    /// Build from degree inputs, converting to radians.
    pub fn from_degrees(pitch_deg: f64, yaw_deg: f64) -> Self {
        Self {
            pitch: pitch_deg.to_radians(),
            yaw: yaw_deg.to_radians(),
        }
    }
}

/// Unit gaze direction in the head-centered frame.
#[derive(Debug, Clone, Copy)]
pub struct GazeRay(pub Vector3<f64>);

impl GazeRay {
    /// Decompose a (pitch, yaw) pair into a 3D direction.
    ///
    /// The result is a unit vector for any finite angle pair:
    /// `x = cos(pitch)*sin(yaw)`, `y = sin(pitch)`, `z = -cos(yaw)*cos(pitch)`.
    pub fn from_angle(angle: GazeAngle) -> Self {
        let (sin_p, cos_p) = angle.pitch.sin_cos();
        let (sin_y, cos_y) = angle.yaw.sin_cos();
        Self(Vector3::new(cos_p * sin_y, sin_p, -cos_y * cos_p))
    }

    pub fn into_inner(self) -> Vector3<f64> {
        self.0
    }
}

/// Gaze intersection with the screen plane, in the screen's own
/// coordinate convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64, depth: f64) -> Self {
        Self { x, y, depth }
    }

    /// The 2D point the AOI table is defined against.
    ///
    /// The region layout is calibrated against the lateral coordinate and
    /// the depth axis, not against (x, y).
    pub fn aoi_point(&self) -> (f64, f64) {
        (self.y, self.depth)
    }
}

/// Axis-aligned rectangular area of interest on the screen plane.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AoiRegion {
    pub center: (f64, f64),
    pub width: f64,
    pub height: f64,
}

impl AoiRegion {
    pub fn new(center: (f64, f64), width: f64, height: f64) -> Self {
        Self { center, width, height }
    }

    /// Containment test with inclusive bounds on all four edges.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let (cx, cy) = self.center;
        x >= cx - half_w && x <= cx + half_w && y >= cy - half_h && y <= cy + half_h
    }
}

/// Classification outcome for one frame.
///
/// Region ids are 1-based, matching the order of the configured AOI table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AoiOutcome {
    Region(usize),
    Elsewhere,
}

impl fmt::Display for AoiOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AoiOutcome::Region(id) => write!(f, "AOI {}", id),
            AoiOutcome::Elsewhere => write!(f, "elsewhere"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gaze_ray_is_unit_length() {
        for pitch_deg in (-80..=80).step_by(10) {
            for yaw_deg in (-170..=170).step_by(10) {
                let angle = GazeAngle::from_degrees(pitch_deg as f64, yaw_deg as f64);
                let ray = GazeRay::from_angle(angle).into_inner();
                assert_relative_eq!(ray.norm(), 1.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn straight_ahead_ray_points_down_negative_z() {
        let ray = GazeRay::from_angle(GazeAngle::new(0.0, 0.0)).into_inner();
        assert_relative_eq!(ray.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(ray.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(ray.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn region_bounds_are_inclusive() {
        let region = AoiRegion::new((0.0, 0.0), 10.0, 4.0);
        assert!(region.contains(5.0, 0.0));
        assert!(region.contains(-5.0, 2.0));
        assert!(region.contains(0.0, -2.0));
        assert!(!region.contains(5.0 + 1e-9, 0.0));
    }

    #[test]
    fn outcome_display_matches_protocol_labels() {
        assert_eq!(AoiOutcome::Region(3).to_string(), "AOI 3");
        assert_eq!(AoiOutcome::Elsewhere.to_string(), "elsewhere");
    }
}
