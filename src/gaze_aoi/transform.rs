use crate::gaze_aoi::config::GeometryConfig;
use crate::gaze_aoi::error::GazeError;
use crate::gaze_aoi::types::{GazeRay, ScreenPoint};
use nalgebra::{Matrix3, Vector3};
use ndarray::Array2;

/// Fixed world up direction the eye frame is built against.
fn up_vector() -> Vector3<f64> {
    Vector3::new(0.0, 0.0, 1.0)
}

/// Threshold below which a vector is treated as zero-length.
const DEGENERATE_EPS: f64 = 1e-9;

/// Build the orthonormal eye frame for a reference eye direction.
///
/// * `z_axis`: normalized `dir_eyes`
/// * `x_axis`: normalized `up x z_axis`
/// * `y_axis`: `z_axis x x_axis`, unit by construction
///
/// Returns the 3x3 matrix with rows `[x_axis, y_axis, z_axis]`. Fails when
/// `dir_eyes` is zero-length or parallel to the up vector, in which case
/// the cross product collapses and no frame exists.
pub fn eye_frame_basis(dir_eyes: &Vector3<f64>) -> Result<Matrix3<f64>, GazeError> {
    let norm = dir_eyes.norm();
    if norm < DEGENERATE_EPS {
        return Err(GazeError::DegenerateBasis);
    }
    let z_axis = dir_eyes / norm;

    let x_axis = up_vector().cross(&z_axis);
    let x_norm = x_axis.norm();
    if x_norm < DEGENERATE_EPS {
        return Err(GazeError::DegenerateBasis);
    }
    let x_axis = x_axis / x_norm;
    let y_axis = z_axis.cross(&x_axis);

    Ok(Matrix3::from_rows(&[
        x_axis.transpose(),
        y_axis.transpose(),
        z_axis.transpose(),
    ]))
}

/// Project a gaze ray onto the screen plane.
///
/// The ray is rotated into the eye frame, extended from `eye_pos` until it
/// reaches the plane at `screen_horizontal_distance`, and the intersection
/// is remapped into the screen's own convention:
/// `x = d_h - target.x`, `y = -target.y`, `depth = target.z - d_v`.
///
/// Fails when the rotated ray is parallel to the screen plane (local x
/// component is zero), so callers never see a silent NaN/Inf point.
pub fn project_gaze(
    ray: GazeRay, basis: &Matrix3<f64>, eye_pos: &Vector3<f64>, cfg: &GeometryConfig,
) -> Result<ScreenPoint, GazeError> {
    // The basis is orthonormal, so its inverse is its transpose.
    let local = basis.transpose() * ray.into_inner();
    if local.x.abs() < DEGENERATE_EPS {
        return Err(GazeError::RayParallelToScreen);
    }

    let k = (cfg.screen_horizontal_distance - eye_pos.x) / local.x;
    let target = local * k + eye_pos;

    Ok(ScreenPoint::new(
        cfg.screen_horizontal_distance - target.x,
        -target.y,
        target.z - cfg.screen_vertical_distance,
    ))
}

/// Batch projection over a matrix of rays, one ray per row.
///
/// Output points are in input row order; a single degenerate ray fails the
/// whole batch since downstream consumers index results by row.
pub fn project_rays(
    rays: &Array2<f64>, basis: &Matrix3<f64>, eye_pos: &Vector3<f64>, cfg: &GeometryConfig,
) -> Result<Vec<ScreenPoint>, GazeError> {
    rays.rows()
        .into_iter()
        .map(|row| {
            let ray = GazeRay(Vector3::new(row[0], row[1], row[2]));
            project_gaze(ray, basis, eye_pos, cfg)
        })
        .collect()
}
