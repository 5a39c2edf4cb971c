use crate::gaze_aoi::action::dispatch;
use crate::gaze_aoi::aoi::classify;
use crate::gaze_aoi::config::{AoiTable, GeometryConfig, PipelineConfig};
use crate::gaze_aoi::error::GazeError;
use crate::gaze_aoi::robot::RobotChannel;
use crate::gaze_aoi::transform::{eye_frame_basis, project_gaze};
use crate::gaze_aoi::types::{AoiOutcome, GazeAngle, GazeRay, ScreenPoint};
use anyhow::Error;
use image::RgbImage;
use log::{debug, warn};
use nalgebra::{Matrix3, Vector3};

/// External model contract: a frame in, at most one gaze estimate out.
///
/// `None` means no usable face in the frame, which is a normal outcome,
/// not an error.
pub trait GazeEstimator {
    fn estimate(&mut self, frame: &RgbImage) -> Result<Option<GazeAngle>, Error>;
}

/// Immutable per-session pipeline state.
///
/// The configuration is validated and the eye basis is built once at
/// construction; per-frame work is pure and carries no mutable state, so
/// a pipeline can be shared read-only across threads.
#[derive(Debug, Clone)]
pub struct GazePipeline {
    geometry: GeometryConfig,
    aoi: AoiTable,
    eye_pos: Vector3<f64>,
    basis: Matrix3<f64>,
}

impl GazePipeline {
    /// Validate the configuration and precompute the eye frame.
    ///
    /// Any configuration problem (unsupported position code, malformed
    /// AOI table, degenerate eye geometry) is fatal here rather than
    /// deferred to the frame loop.
    pub fn new(geometry: GeometryConfig, aoi: AoiTable) -> Result<Self, GazeError> {
        geometry.validate()?;
        aoi.validate()?;
        let eye_pos = geometry.eye_position();
        let basis = eye_frame_basis(&eye_pos)?;
        Ok(Self {
            geometry,
            aoi,
            eye_pos,
            basis,
        })
    }

    pub fn from_config(config: PipelineConfig) -> Result<Self, GazeError> {
        Self::new(config.geometry, config.aoi)
    }

    pub fn aoi_table(&self) -> &AoiTable {
        &self.aoi
    }

    /// Project one gaze angle onto the screen plane.
    pub fn project(&self, angle: GazeAngle) -> Result<ScreenPoint, GazeError> {
        let ray = GazeRay::from_angle(angle);
        project_gaze(ray, &self.basis, &self.eye_pos, &self.geometry)
    }

    /// Full per-frame decision: angle in, AOI outcome out.
    pub fn classify(&self, angle: GazeAngle) -> Result<AoiOutcome, GazeError> {
        let point = self.project(angle)?;
        let (x, y) = point.aoi_point();
        Ok(classify(x, y, &self.aoi))
    }
}

/// Drive one frame end to end: estimate, classify, respond.
///
/// Recoverable geometry errors are logged and skipped so a single bad
/// frame never terminates the loop; channel failures propagate because a
/// dead robot connection is not recoverable per frame.
pub fn run_frame<E: GazeEstimator>(
    pipeline: &GazePipeline, estimator: &mut E, frame: &RgbImage, channel: &mut dyn RobotChannel,
) -> Result<Option<AoiOutcome>, Error> {
    let Some(angle) = estimator.estimate(frame)? else {
        debug!("no face in frame, skipping");
        return Ok(None);
    };

    let outcome = match pipeline.classify(angle) {
        Ok(outcome) => outcome,
        Err(err) if err.recoverable() => {
            warn!("skipping frame: {}", err);
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    debug!(
        "pitch {:.3} yaw {:.3} -> {}",
        angle.pitch, angle.yaw, outcome
    );
    dispatch(outcome, channel)?;
    Ok(Some(outcome))
}
