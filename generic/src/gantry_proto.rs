use crate::gantry_error::GantryError;
use defmt::Format;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Serialize, Deserialize, Debug, Format)]
pub enum GantryProto {
    Unknown,
    Ping,
    Pong,
    Ack,
    Status,

    Motion(MotionCommand),
    Clock(StepClockCommand),

    MotionResp(MotionResponse),
    ClockResp(StepClockResponse),

    GantryError(GantryError),
}

#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug, Format)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

#[derive(Copy, Clone, PartialEq, Serialize, Deserialize, Debug, Format)]
pub enum MotionCommand {
    MotionStop,

    // the shared driver-enable line
    MotionPowerOn,
    MotionPowerOff,

    SetFeedRate { sps: u32 },
    Jog { axis: Axis, steps: i32 },
    Line { dx: i32, dy: i32, dz: i32 },
    GetPosition,
}

#[derive(Copy, Clone, PartialEq, Serialize, Deserialize, Debug, Format)]
pub enum MotionResponse {
    Error(GantryError),
    Accepted,
    Done,
    Position { x: i32, y: i32, z: i32 },
}

#[derive(Copy, Clone, PartialEq, Serialize, Deserialize, Debug, Format)]
pub enum StepClockCommand {
    SetFrequency { hz: u32 },
    GetTicks,
}

#[derive(Copy, Clone, PartialEq, Serialize, Deserialize, Debug, Format)]
pub enum StepClockResponse {
    Error(GantryError),
    Done,
    Ticks { ticks: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use postcard::{from_bytes, to_allocvec};

    #[test]
    fn test_motion_command_roundtrip() {
        let msg = GantryProto::Motion(MotionCommand::Line { dx: 120, dy: -35, dz: 0 });
        let data = to_allocvec(&msg).unwrap();
        assert_eq!(from_bytes::<GantryProto>(&data).unwrap(), msg);
    }

    #[test]
    fn test_error_response_roundtrip() {
        let msg = GantryProto::MotionResp(MotionResponse::Error(GantryError::ClockZeroFrequency));
        let data = to_allocvec(&msg).unwrap();
        assert_eq!(from_bytes::<GantryProto>(&data).unwrap(), msg);
    }

    #[test]
    fn test_ticks_response_roundtrip() {
        let msg = GantryProto::ClockResp(StepClockResponse::Ticks { ticks: u64::MAX });
        let data = to_allocvec(&msg).unwrap();
        assert_eq!(from_bytes::<GantryProto>(&data).unwrap(), msg);
    }

    #[test]
    fn test_message_fits_length_prefix() {
        // frames are length-prefixed with a single byte
        let msg = GantryProto::Motion(MotionCommand::Line {
            dx: i32::MIN,
            dy: i32::MAX,
            dz: i32::MIN,
        });
        let data = to_allocvec(&msg).unwrap();
        assert!(data.len() <= u8::MAX as usize);
    }
}
