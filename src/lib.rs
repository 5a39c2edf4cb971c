pub mod gaze_aoi;

#[cfg(test)]
mod tests {
    use crate::gaze_aoi::action::dispatch;
    use crate::gaze_aoi::aoi::classify;
    use crate::gaze_aoi::config::{AoiTable, GeometryConfig};
    use crate::gaze_aoi::decode::AngleDecoder;
    use crate::gaze_aoi::pipeline::GazePipeline;
    use crate::gaze_aoi::robot::{RecordingChannel, RobotChannel, RobotCommand};
    use crate::gaze_aoi::types::{AoiOutcome, AoiRegion, GazeAngle};
    use approx::assert_relative_eq;
    use ndarray::Array1;
    use std::f64::consts::PI;

    #[test]
    fn test_decode_project_classify_respond() {
        // Full chain on the production configuration: binned model output
        // in, robot commands out.
        let pipeline = GazePipeline::new(GeometryConfig::default(), AoiTable::default()).unwrap();
        let decoder = AngleDecoder::new(0.0);

        // Both heads one-hot at bin 45, the 0-degree bin.
        let mut yaw_scores = Array1::zeros(90);
        let mut pitch_scores = Array1::zeros(90);
        yaw_scores[45] = 50.0;
        pitch_scores[45] = 50.0;
        let angle = decoder.decode(&yaw_scores, &pitch_scores).unwrap();
        assert_relative_eq!(angle.pitch, 0.0, epsilon = 1e-9);
        assert_relative_eq!(angle.yaw, 0.0, epsilon = 1e-9);

        // Straight at the robot: yaw of 180 degrees lands on the screen
        // plane origin, inside the first curated region.
        let at_robot = GazeAngle::new(0.0, PI);
        let point = pipeline.project(at_robot).unwrap();
        assert_relative_eq!(point.x, 0.0, epsilon = 1e-9);

        let outcome = pipeline.classify(at_robot).unwrap();
        assert_eq!(outcome, AoiOutcome::Region(1));

        let mut channel = RecordingChannel::new();
        dispatch(outcome, &mut channel).unwrap();
        assert_eq!(channel.sent, vec!["say hello!"]);
    }

    #[test]
    fn test_synthetic_geometry_round_trip() {
        // A single region centered where a slightly downward gaze lands;
        // classification must return that region's id.
        let pipeline = GazePipeline::new(
            GeometryConfig::default(),
            AoiTable::new(vec![AoiRegion::new((0.0, -8.1), 19.4, 19.4)]),
        )
        .unwrap();

        let angle = GazeAngle::new((8.1f64 / 100.0).atan(), PI);
        let point = pipeline.project(angle).unwrap();
        let (x, y) = point.aoi_point();
        assert_relative_eq!(x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(y, -8.1, epsilon = 1e-6);
        assert_eq!(classify(x, y, pipeline.aoi_table()), AoiOutcome::Region(1));
    }

    #[test]
    fn test_session_commands_over_recording_channel() {
        let mut channel = RecordingChannel::new();
        channel.send(&RobotCommand::Track(true)).unwrap();
        dispatch(AoiOutcome::Elsewhere, &mut channel).unwrap();
        channel.send(&RobotCommand::Idle).unwrap();
        assert_eq!(channel.sent, vec!["track True", "idle"]);
    }
}
