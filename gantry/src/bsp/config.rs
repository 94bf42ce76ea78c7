macro_rules! config {
    (
        $(
            $key:ident : $value:expr
        ),+ $(,)?
    ) => {
        $(
            pub const $key: bool = $value;
        )+
    };
}

macro_rules! parameters {
    (
        $(
            $key:ident : $type:ty = $value:expr
        ),+ $(,)?
    ) => {
        $(
            pub const $key: $type = $value;
        )+
    };
}

config! {
    // flip when a motor is wired the other way round
    REVERT_X_DIRECTION: false,
    REVERT_Y_DIRECTION: false,
    REVERT_Z_DIRECTION: true,
}

parameters! {
    // step-clock interrupt rate at power-up
    DEFAULT_STEP_CLOCK_HZ: u32 = 10_000,
    // steps / second
    DEFAULT_FEED_RATE_SPS: u32 = 400,
    MAX_FEED_RATE_SPS: u32 = 2_000,
    // step pulse width, cpu cycles (~2us at 125 MHz)
    STEP_PULSE_CYCLES: u32 = 250,
}
