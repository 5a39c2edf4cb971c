use anyhow::{Error, Result};
use image::RgbImage;
use log::{info, warn};
use rs_gaze_aoi::gaze_aoi::camera::{grab_frame, CameraMode};
use rs_gaze_aoi::gaze_aoi::config::PipelineConfig;
use rs_gaze_aoi::gaze_aoi::pipeline::{run_frame, GazeEstimator, GazePipeline};
use rs_gaze_aoi::gaze_aoi::robot::{RobotChannel, RobotCommand, TcpRobotChannel};
use rs_gaze_aoi::gaze_aoi::types::GazeAngle;
use std::env;
use std::f64::consts::PI;

/// Stand-in for the external gaze model: sweeps a canned set of gaze
/// angles so the robot responses can be exercised without a GPU.
struct CannedEstimator {
    angles: Vec<GazeAngle>,
    next: usize,
}

impl CannedEstimator {
    fn new() -> Self {
        Self {
            angles: vec![
                GazeAngle::new(0.0, PI),
                GazeAngle::new(0.2, PI),
                GazeAngle::new(0.3, PI - 0.3),
                GazeAngle::new(0.3, PI + 0.3),
                GazeAngle::new(-0.4, PI - 1.0),
            ],
            next: 0,
        }
    }
}

impl GazeEstimator for CannedEstimator {
    fn estimate(&mut self, _frame: &RgbImage) -> Result<Option<GazeAngle>, Error> {
        let angle = self.angles[self.next % self.angles.len()];
        self.next += 1;
        Ok(Some(angle))
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let addr = args.next().unwrap_or_else(|| "127.0.0.1:12345".to_string());
    let camera_code: u8 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(3);
    let config = match args.next() {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    let pipeline = GazePipeline::from_config(config)?;
    let mode = CameraMode::from_code(camera_code)?;

    let mut channel = TcpRobotChannel::connect(&addr)?;
    info!("connected to robot bridge at {}", addr);
    channel.send(&RobotCommand::Track(true))?;

    let mut estimator = CannedEstimator::new();
    loop {
        let frame = grab_frame(channel.stream_mut(), &mode)?;
        match run_frame(&pipeline, &mut estimator, &frame, &mut channel) {
            Ok(Some(outcome)) => info!("frame classified as {}", outcome),
            Ok(None) => {}
            Err(err) => {
                warn!("frame loop stopping: {}", err);
                break;
            }
        }
    }

    channel.send(&RobotCommand::Track(false))?;
    channel.send(&RobotCommand::Idle)?;
    Ok(())
}
