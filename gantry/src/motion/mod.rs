pub mod axis;
pub mod clock;
pub mod motion_processor;

#[cfg(any(feature = "bsp_rev_b", feature = "bsp_rev_c"))]
pub mod alarm_clock;
#[cfg(feature = "bsp_rev_a")]
pub mod pwm_clock;
