use crate::motion_status::MotionStatus;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, defmt::Format, Serialize, Deserialize,
)]
pub enum GantryError {
    IgnoredMsg,
    UnacceptableCommand,

    UartReadError,
    UartReadTimeout,
    UartWriteError,
    UartFlushError,
    UartInvalidData,
    UartInvalidInput,
    UartSetDirError,

    DataConvertError,

    GpioPinError,

    // step clock
    ClockZeroFrequency,
    ClockReloadOutOfRange,
    ClockFeedTooFast,
    ClockNotReady,

    // motion
    MotionUnavailable(MotionStatus),
    MotionZeroFeedRate,
    MotionStopped,

    // host console
    ConsoleIncorrectRequest,
    ConsoleSendError,
    ConsoleRecvError,
    ConsoleParseError,
    ConsoleFlushError,

    // Used by GantryProto parsing
    NotIntStr,

    // Used by state
    StateOverflow,
}
