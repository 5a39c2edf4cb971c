use crate::gaze_aoi::robot::{RobotChannel, RobotCommand};
use crate::gaze_aoi::types::AoiOutcome;
use anyhow::Error;
use log::debug;
use std::thread;
use std::time::Duration;

/// One scripted step: a command plus the pause to let the robot finish it
/// before the next command goes out.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedCommand {
    pub cmd: RobotCommand,
    pub wait_after: Duration,
}

impl TimedCommand {
    pub fn new(cmd: RobotCommand, wait_after: Duration) -> Self {
        Self { cmd, wait_after }
    }

    pub fn immediate(cmd: RobotCommand) -> Self {
        Self::new(cmd, Duration::ZERO)
    }
}

/// Scripted response for a classification outcome.
///
/// This is a static table; `Elsewhere` intentionally maps to no commands.
/// The waits pace the physical robot (head moves take time), they are not
/// acknowledgement timeouts.
pub fn response_script(outcome: AoiOutcome) -> Vec<TimedCommand> {
    match outcome {
        AoiOutcome::Region(1) => vec![TimedCommand::immediate(RobotCommand::Say("hello!".to_string()))],
        AoiOutcome::Region(2) => vec![
            TimedCommand::new(RobotCommand::Say("my tablet?".to_string()), Duration::from_secs(1)),
            TimedCommand::new(RobotCommand::AdjustHead { pitch: 0.3, yaw: 0.0 }, Duration::from_secs(2)),
        ],
        AoiOutcome::Region(3) => vec![
            TimedCommand::new(RobotCommand::Say("my left arm?".to_string()), Duration::from_secs(1)),
            TimedCommand::new(RobotCommand::AdjustHead { pitch: -0.3, yaw: -0.6 }, Duration::from_secs(2)),
        ],
        AoiOutcome::Region(4) => vec![
            TimedCommand::new(RobotCommand::Say("my right arm?".to_string()), Duration::from_secs(1)),
            TimedCommand::new(RobotCommand::AdjustHead { pitch: 0.3, yaw: 0.3 }, Duration::from_secs(3)),
        ],
        AoiOutcome::Region(_) | AoiOutcome::Elsewhere => Vec::new(),
    }
}

/// Send a script down the channel, sleeping out each step's pacing delay.
pub fn dispatch_script(script: &[TimedCommand], channel: &mut dyn RobotChannel) -> Result<(), Error> {
    for step in script {
        channel.send(&step.cmd)?;
        if !step.wait_after.is_zero() {
            thread::sleep(step.wait_after);
        }
    }
    Ok(())
}

/// Look up and dispatch the response for one frame's outcome.
pub fn dispatch(outcome: AoiOutcome, channel: &mut dyn RobotChannel) -> Result<(), Error> {
    let script = response_script(outcome);
    if script.is_empty() {
        debug!("no scripted response for {}", outcome);
        return Ok(());
    }
    dispatch_script(&script, channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaze_aoi::robot::RecordingChannel;

    #[test]
    fn tablet_script_says_then_tilts_head() {
        let script = response_script(AoiOutcome::Region(2));
        assert_eq!(script.len(), 2);
        assert_eq!(script[0].cmd, RobotCommand::Say("my tablet?".to_string()));
        assert_eq!(script[0].wait_after, Duration::from_secs(1));
        assert_eq!(script[1].cmd, RobotCommand::AdjustHead { pitch: 0.3, yaw: 0.0 });
        assert_eq!(script[1].wait_after, Duration::from_secs(2));
    }

    #[test]
    fn elsewhere_and_unknown_regions_have_no_script() {
        assert!(response_script(AoiOutcome::Elsewhere).is_empty());
        assert!(response_script(AoiOutcome::Region(9)).is_empty());
    }

    #[test]
    fn dispatch_writes_commands_in_script_order() {
        let script = vec![
            TimedCommand::immediate(RobotCommand::Say("my left arm?".to_string())),
            TimedCommand::immediate(RobotCommand::AdjustHead { pitch: -0.3, yaw: -0.6 }),
        ];
        let mut channel = RecordingChannel::new();
        dispatch_script(&script, &mut channel).unwrap();
        assert_eq!(channel.sent, vec!["say my left arm?", "head -0.300 -0.600"]);
    }

    #[test]
    fn elsewhere_dispatch_sends_nothing() {
        let mut channel = RecordingChannel::new();
        dispatch(AoiOutcome::Elsewhere, &mut channel).unwrap();
        assert!(channel.sent.is_empty());
    }
}
