use anyhow::Error;
use log::debug;
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};

/// One command in the robot's text vocabulary.
///
/// The protocol is fire-and-forget: nothing in the pipeline ever waits for
/// a reply on this channel.
#[derive(Debug, Clone, PartialEq)]
pub enum RobotCommand {
    Say(String),
    AdjustHead { pitch: f64, yaw: f64 },
    Nod,
    Idle,
    Track(bool),
    Look { x: f64, y: f64 },
}

impl RobotCommand {
    /// Wire encoding understood by the robot bridge.
    pub fn encode(&self) -> String {
        match self {
            RobotCommand::Say(text) => format!("say {}", text),
            RobotCommand::AdjustHead { pitch, yaw } => format!("head {:.3} {:.3}", pitch, yaw),
            RobotCommand::Nod => "nod".to_string(),
            RobotCommand::Idle => "idle".to_string(),
            RobotCommand::Track(enabled) => {
                if *enabled {
                    "track True".to_string()
                } else {
                    "track False".to_string()
                }
            }
            RobotCommand::Look { x, y } => format!("look;{:.5};{:.5}", x, y),
        }
    }
}

/// Outgoing command channel to the robot.
///
/// Implementations must not block on robot acknowledgements; the core
/// only depends on commands being written out.
pub trait RobotChannel {
    fn send(&mut self, cmd: &RobotCommand) -> Result<(), Error>;
}

/// Blocking TCP implementation of the robot bridge protocol.
pub struct TcpRobotChannel {
    stream: TcpStream,
}

impl TcpRobotChannel {
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self, Error> {
        let stream = TcpStream::connect(addr)?;
        Ok(Self { stream })
    }

    /// The underlying stream, shared with the camera capture path.
    pub fn stream_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }
}

impl RobotChannel for TcpRobotChannel {
    fn send(&mut self, cmd: &RobotCommand) -> Result<(), Error> {
        let encoded = cmd.encode();
        debug!("robot <- {}", encoded);
        self.stream.write_all(encoded.as_bytes())?;
        Ok(())
    }
}

/// Channel that records encoded commands instead of sending them.
///
/// Used by tests and by dry runs against a synthetic geometry.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    pub sent: Vec<String>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RobotChannel for RecordingChannel {
    fn send(&mut self, cmd: &RobotCommand) -> Result<(), Error> {
        self.sent.push(cmd.encode());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_encode_to_protocol_text() {
        assert_eq!(RobotCommand::Say("hello!".to_string()).encode(), "say hello!");
        assert_eq!(
            RobotCommand::AdjustHead { pitch: 0.3, yaw: -0.6 }.encode(),
            "head 0.300 -0.600"
        );
        assert_eq!(RobotCommand::Nod.encode(), "nod");
        assert_eq!(RobotCommand::Idle.encode(), "idle");
        assert_eq!(RobotCommand::Track(true).encode(), "track True");
        assert_eq!(RobotCommand::Track(false).encode(), "track False");
        assert_eq!(
            RobotCommand::Look { x: 0.5, y: -0.25 }.encode(),
            "look;0.50000;-0.25000"
        );
    }

    #[test]
    fn recording_channel_captures_in_order() {
        let mut channel = RecordingChannel::new();
        channel.send(&RobotCommand::Track(true)).unwrap();
        channel.send(&RobotCommand::Say("my tablet?".to_string())).unwrap();
        assert_eq!(channel.sent, vec!["track True", "say my tablet?"]);
    }
}
