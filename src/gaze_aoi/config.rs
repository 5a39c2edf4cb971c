use crate::gaze_aoi::error::GazeError;
use crate::gaze_aoi::types::AoiRegion;
use anyhow::Error;
use nalgebra::Vector3;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Subject position code with a mapped eye location.
///
/// The projection is only calibrated for position 2 (subject seated left
/// of the robot at 100 units standoff); any other code is rejected at
/// startup rather than silently falling back to an origin eye position,
/// which would make the basis construction divide by zero.
pub const SUPPORTED_POSITION: u8 = 2;

/// Fixed geometry of the subject/robot/screen arrangement.
///
/// Distances share one unit with the AOI table coordinates; heights are
/// in meters and only their difference enters the projection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub screen_horizontal_distance: f64,
    pub screen_vertical_distance: f64,
    pub eye_height: f64,
    pub camera_height: f64,
    pub lateral_offset: f64,
    pub position: u8,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            screen_horizontal_distance: 0.0,
            screen_vertical_distance: 0.0,
            eye_height: 1.2,
            camera_height: 1.2,
            lateral_offset: 0.0,
            position: SUPPORTED_POSITION,
        }
    }
}

impl GeometryConfig {
    /// Vertical offset between the subject's eyes and the robot camera.
    pub fn eye_camera_offset(&self) -> f64 {
        self.eye_height - self.camera_height
    }

    /// Eye location for the configured position code.
    pub fn eye_position(&self) -> Vector3<f64> {
        Vector3::new(-100.0, -self.lateral_offset, self.eye_camera_offset())
    }

    pub fn validate(&self) -> Result<(), GazeError> {
        if self.position != SUPPORTED_POSITION {
            return Err(GazeError::UnsupportedPosition(self.position));
        }
        Ok(())
    }
}

/// Ordered list of screen-plane regions.
///
/// Classification walks the list front to back and the first hit wins, so
/// the order is part of the contract, not an implementation detail.
#[derive(Debug, Clone, Deserialize)]
pub struct AoiTable {
    pub regions: Vec<AoiRegion>,
}

impl Default for AoiTable {
    fn default() -> Self {
        // Region extents were measured on the robot's tablet; the 2/9.19
        // factor converts tablet pixels to screen-plane units.
        let px = 2.0 / 9.19;
        Self {
            regions: vec![
                AoiRegion::new((0.0, -8.1), 80.0 * px + 2.0, 80.0 * px + 2.0),
                AoiRegion::new((0.0, -28.0), 24.6 + 5.0, 17.5 + 5.0),
                AoiRegion::new((-30.8, -32.0), 150.0 * px, 150.0 * px),
                AoiRegion::new((29.7, -30.8), 150.0 * px, 150.0 * px),
            ],
        }
    }
}

impl AoiTable {
    pub fn new(regions: Vec<AoiRegion>) -> Self {
        Self { regions }
    }

    pub fn validate(&self) -> Result<(), GazeError> {
        if self.regions.is_empty() {
            return Err(GazeError::EmptyAoiTable);
        }
        for (index, region) in self.regions.iter().enumerate() {
            if region.width <= 0.0 || region.height <= 0.0 {
                return Err(GazeError::InvalidAoiRegion {
                    index,
                    width: region.width,
                    height: region.height,
                });
            }
        }
        Ok(())
    }
}

/// Full startup configuration, loadable from a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub geometry: GeometryConfig,
    pub aoi: AoiTable,
}

impl PipelineConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let raw = fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }
}
