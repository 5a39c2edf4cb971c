use crate::gaze_aoi::config::AoiTable;
use crate::gaze_aoi::types::AoiOutcome;

/// Classify a screen-plane point against the ordered AOI table.
///
/// The first region (in table order) whose closed bounding box contains
/// the point wins; overlaps are resolved by that ordering on purpose, so
/// the walk must never be reordered or short-circuited differently.
/// Returns `Elsewhere` when no region matches, which is a defined outcome
/// rather than an error.
pub fn classify(x: f64, y: f64, table: &AoiTable) -> AoiOutcome {
    for (i, region) in table.regions.iter().enumerate() {
        if region.contains(x, y) {
            return AoiOutcome::Region(i + 1);
        }
    }
    AoiOutcome::Elsewhere
}
