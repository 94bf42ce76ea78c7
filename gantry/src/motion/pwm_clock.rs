use crate::bsp::StepClockSliceType;
use crate::motion::clock::{on_step_clock_tick, step_clock_reload};
use generic::gantry_error::GantryError;

const PWM_DIV_INT: u8 = 16;
const PWM_TOP_MAX: u32 = u16::MAX as u32 + 1;

/// Step-clock backend on a free-running PWM slice. The slice counts at
/// sysclk/16 and wraps once per reload, raising PWM_IRQ_WRAP.
pub struct PwmStepClock {
    slice: StepClockSliceType,
}

impl PwmStepClock {
    pub fn new(mut slice: StepClockSliceType, freq_hz: u32) -> Result<Self, GantryError> {
        let top = Self::top_for(freq_hz)?;
        slice.set_div_int(PWM_DIV_INT);
        slice.set_div_frac(0);
        slice.set_top(top);
        slice.set_counter(0);
        Ok(PwmStepClock { slice })
    }

    pub fn start(&mut self) {
        self.slice.enable_interrupt();
        self.slice.enable();
    }

    pub fn set_frequency(&mut self, freq_hz: u32) -> Result<(), GantryError> {
        let top = Self::top_for(freq_hz)?;
        self.slice.set_top(top);
        self.slice.set_counter(0);
        Ok(())
    }

    // wrap period is top + 1, and top is a 16-bit register
    fn top_for(freq_hz: u32) -> Result<u16, GantryError> {
        let reload = step_clock_reload(freq_hz)?;
        if reload > PWM_TOP_MAX {
            return Err(GantryError::ClockReloadOutOfRange);
        }
        Ok((reload - 1) as u16)
    }

    /// ISR side: acknowledge the wrap, advance the accumulator.
    pub fn on_interrupt(&mut self) {
        self.slice.clear_interrupt();
        on_step_clock_tick();
    }
}
