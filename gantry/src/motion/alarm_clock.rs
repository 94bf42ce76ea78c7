use fugit::MicrosDurationU32;
use rp2040_hal::timer::{Alarm, Alarm0};

use crate::motion::clock::{on_step_clock_tick, step_clock_reload};
use generic::gantry_error::GantryError;

/// Step-clock backend on the 1 MHz alarm timer. The ISR re-arms the alarm
/// with the microsecond reload on every tick.
pub struct AlarmStepClock {
    alarm: Alarm0,
    reload_us: u32,
}

impl AlarmStepClock {
    pub fn new(alarm: Alarm0, freq_hz: u32) -> Result<Self, GantryError> {
        let reload_us = step_clock_reload(freq_hz)?;
        Ok(AlarmStepClock { alarm, reload_us })
    }

    pub fn start(&mut self) -> Result<(), GantryError> {
        self.alarm.enable_interrupt();
        self.arm()
    }

    pub fn set_frequency(&mut self, freq_hz: u32) -> Result<(), GantryError> {
        self.reload_us = step_clock_reload(freq_hz)?;
        Ok(())
    }

    fn arm(&mut self) -> Result<(), GantryError> {
        self.alarm
            .schedule(MicrosDurationU32::micros(self.reload_us))
            .map_err(|_| GantryError::ClockReloadOutOfRange)
    }

    /// ISR side: acknowledge, re-arm, advance the accumulator.
    pub fn on_interrupt(&mut self) {
        self.alarm.clear_interrupt();
        let _ = self.arm();
        on_step_clock_tick();
    }
}
