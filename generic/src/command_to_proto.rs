use crate::gantry_error::GantryError;
use crate::gantry_proto::{Axis, GantryProto, MotionCommand, StepClockCommand};

pub fn parse_protocol(line: &str) -> GantryProto {
    let mut tokens = line.split_whitespace();
    parse_command(&mut tokens)
}

fn parse_command<'a, I>(tokens: &mut I) -> GantryProto
where
    I: Iterator<Item = &'a str>,
{
    match tokens.next() {
        Some("ping") => GantryProto::Ping,
        Some("status") => GantryProto::Status,
        Some("pos") => GantryProto::Motion(MotionCommand::GetPosition),
        Some("stop") => GantryProto::Motion(MotionCommand::MotionStop),

        Some("on") => GantryProto::Motion(MotionCommand::MotionPowerOn),
        Some("off") => GantryProto::Motion(MotionCommand::MotionPowerOff),

        Some("feed") => {
            if let Ok(sps) = parse_int(tokens.next()) {
                GantryProto::Motion(MotionCommand::SetFeedRate { sps: sps as u32 })
            } else {
                GantryProto::Unknown
            }
        }
        Some("jog") => {
            let axis = parse_axis(tokens.next());
            let steps = parse_int(tokens.next());
            match (axis, steps) {
                (Some(axis), Ok(steps)) => GantryProto::Motion(MotionCommand::Jog { axis, steps }),
                _ => GantryProto::Unknown,
            }
        }
        Some("line") => {
            let dx = parse_int(tokens.next());
            let dy = parse_int(tokens.next());
            let dz = parse_int(tokens.next());
            match (dx, dy, dz) {
                (Ok(dx), Ok(dy), Ok(dz)) => GantryProto::Motion(MotionCommand::Line { dx, dy, dz }),
                _ => GantryProto::Unknown,
            }
        }

        Some("freq") => {
            if let Ok(hz) = parse_int(tokens.next()) {
                GantryProto::Clock(StepClockCommand::SetFrequency { hz: hz as u32 })
            } else {
                GantryProto::Unknown
            }
        }
        Some("ticks") => GantryProto::Clock(StepClockCommand::GetTicks),

        _ => GantryProto::Unknown,
    }
}

fn parse_int(token: Option<&str>) -> Result<i32, GantryError> {
    if let Some(str) = token {
        if let Ok(v) = str.parse::<i32>() {
            return Ok(v);
        }
    }
    Err(GantryError::NotIntStr)
}

fn parse_axis(token: Option<&str>) -> Option<Axis> {
    match token {
        Some("x") => Some(Axis::X),
        Some("y") => Some(Axis::Y),
        Some("z") => Some(Axis::Z),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_protocol("ping"), GantryProto::Ping);
        assert_eq!(parse_protocol("stop"), GantryProto::Motion(MotionCommand::MotionStop));
        assert_eq!(parse_protocol("off"), GantryProto::Motion(MotionCommand::MotionPowerOff));
        assert_eq!(parse_protocol("ticks"), GantryProto::Clock(StepClockCommand::GetTicks));
    }

    #[test]
    fn test_parse_jog() {
        assert_eq!(
            parse_protocol("jog y -200"),
            GantryProto::Motion(MotionCommand::Jog { axis: Axis::Y, steps: -200 })
        );
        assert_eq!(parse_protocol("jog w 10"), GantryProto::Unknown);
        assert_eq!(parse_protocol("jog x"), GantryProto::Unknown);
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_protocol("line 100 -40 7"),
            GantryProto::Motion(MotionCommand::Line { dx: 100, dy: -40, dz: 7 })
        );
        assert_eq!(parse_protocol("line 100 -40"), GantryProto::Unknown);
    }

    #[test]
    fn test_parse_feed_and_freq() {
        assert_eq!(
            parse_protocol("feed 500"),
            GantryProto::Motion(MotionCommand::SetFeedRate { sps: 500 })
        );
        assert_eq!(
            parse_protocol("freq 20000"),
            GantryProto::Clock(StepClockCommand::SetFrequency { hz: 20000 })
        );
        assert_eq!(parse_protocol("feed fast"), GantryProto::Unknown);
    }

    #[test]
    fn test_garbage_is_unknown() {
        assert_eq!(parse_protocol(""), GantryProto::Unknown);
        assert_eq!(parse_protocol("make me a sandwich"), GantryProto::Unknown);
    }
}
