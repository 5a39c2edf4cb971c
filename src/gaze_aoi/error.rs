use thiserror::Error;

/// Errors raised by the geometric core and its configuration.
///
/// Geometry variants are recoverable at frame granularity; configuration
/// variants are fatal at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GazeError {
    #[error("degenerate eye direction: zero length or parallel to the up axis")]
    DegenerateBasis,

    #[error("gaze ray is parallel to the screen plane")]
    RayParallelToScreen,

    #[error("unsupported subject position code {0}")]
    UnsupportedPosition(u8),

    #[error("AOI table contains no regions")]
    EmptyAoiTable,

    #[error("AOI region {index} has non-positive extent {width}x{height}")]
    InvalidAoiRegion { index: usize, width: f64, height: f64 },

    #[error("invalid camera mode {0}, expected a value between 1 and 4")]
    InvalidCameraMode(u8),

    #[error("expected {expected} angle bins, got {got}")]
    BadBinCount { expected: usize, got: usize },
}

impl GazeError {
    /// Whether the frame loop may log this error and continue with the
    /// next frame instead of shutting down.
    pub fn recoverable(&self) -> bool {
        matches!(self, GazeError::DegenerateBasis | GazeError::RayParallelToScreen)
    }
}
