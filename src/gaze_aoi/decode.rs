use crate::gaze_aoi::error::GazeError;
use crate::gaze_aoi::types::GazeAngle;
use ndarray::Array1;

/// Number of discrete angle bins in the model's two output heads.
pub const NUM_BINS: usize = 90;

/// Width of one bin in degrees.
pub const BIN_WIDTH_DEG: f64 = 4.0;

/// Degree value of bin index 0.
pub const ANGLE_OFFSET_DEG: f64 = -180.0;

/// Numerically stable softmax over raw bin scores.
pub fn softmax(scores: &Array1<f64>) -> Array1<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp = scores.mapv(|s| (s - max).exp());
    let sum = exp.sum();
    exp / sum
}

/// Decode raw bin scores into a continuous angle in degrees.
///
/// Takes the expected value of the bin index under the softmax
/// distribution, then maps index space to degrees (4 degrees per bin,
/// centered on -180..+176).
pub fn expected_angle_deg(scores: &Array1<f64>) -> Result<f64, GazeError> {
    if scores.len() != NUM_BINS {
        return Err(GazeError::BadBinCount {
            expected: NUM_BINS,
            got: scores.len(),
        });
    }
    let probs = softmax(scores);
    let expected_index: f64 = probs.iter().enumerate().map(|(i, p)| i as f64 * p).sum();
    Ok(expected_index * BIN_WIDTH_DEG + ANGLE_OFFSET_DEG)
}

/// Turns the model's two binned outputs into a typed angle pair.
///
/// The model emits yaw scores first and pitch scores second; this is the
/// single place that ordering is pinned down, so downstream code only
/// ever sees named `pitch`/`yaw` fields.
#[derive(Debug, Clone, Copy)]
pub struct AngleDecoder {
    /// Additive pitch correction in degrees, calibrated against the
    /// robot-mounted camera's tilt.
    pub pitch_compensation_deg: f64,
}

impl Default for AngleDecoder {
    fn default() -> Self {
        Self {
            pitch_compensation_deg: 7.0,
        }
    }
}

impl AngleDecoder {
    pub fn new(pitch_compensation_deg: f64) -> Self {
        Self { pitch_compensation_deg }
    }

    pub fn decode(&self, yaw_scores: &Array1<f64>, pitch_scores: &Array1<f64>) -> Result<GazeAngle, GazeError> {
        let yaw_deg = expected_angle_deg(yaw_scores)?;
        let pitch_deg = expected_angle_deg(pitch_scores)? + self.pitch_compensation_deg;
        Ok(GazeAngle::from_degrees(pitch_deg, yaw_deg))
    }
}
