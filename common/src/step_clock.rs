use generic::gantry_error::GantryError;

/// One whole motor step in accumulator phase units (Q16.16).
pub const STEP_PHASE_ONE: u32 = 1 << 16;

const MICRO_IN_SEC: u32 = 1_000_000;
const CPU_CLOCK_PRESCALE: u32 = 16;

/// What the step-clock timer counts. Carriers either feed the timer a fixed
/// 1 MHz tick or run it off the prescaled CPU clock.
#[derive(Debug, Copy, Clone, Eq, PartialEq, defmt::Format)]
pub enum TickSource {
    Microsecond,
    CpuClockDiv16 { cpu_hz: u32 },
}

impl TickSource {
    pub fn tick_hz(&self) -> u32 {
        match self {
            TickSource::Microsecond => MICRO_IN_SEC,
            TickSource::CpuClockDiv16 { cpu_hz } => cpu_hz / CPU_CLOCK_PRESCALE,
        }
    }

    /// Timer reload value for an interrupt rate of `freq_hz`. The divisor is
    /// runtime-controlled and must be guarded.
    pub fn reload(&self, freq_hz: u32) -> Result<u32, GantryError> {
        if freq_hz == 0 {
            return Err(GantryError::ClockZeroFrequency);
        }
        let reload = self.tick_hz() / freq_hz;
        if reload == 0 {
            return Err(GantryError::ClockReloadOutOfRange);
        }
        Ok(reload)
    }
}

/// Phase accumulator advanced by the step-clock ISR. Every tick adds the
/// configured per-tick phase increment; whole steps are drained by the motion
/// task. The optional probe counts raw ticks next to the accumulator.
pub struct StepClock {
    phase_per_tick: u32,
    accumulator: u32,
    ticks: u64,
    probe: bool,
}

impl StepClock {
    pub const fn new(probe: bool) -> Self {
        StepClock { phase_per_tick: 0, accumulator: 0, ticks: 0, probe }
    }

    /// ISR body: one timer tick. Callers hold a critical section; keep this
    /// short and non-blocking.
    pub fn on_tick(&mut self) {
        self.accumulator = self.accumulator.wrapping_add(self.phase_per_tick);
        if self.probe {
            self.ticks = self.ticks.wrapping_add(1);
        }
    }

    /// Phase increment for `sps` steps per second at `clock_hz` ticks per
    /// second. More than one whole step per tick cannot be emitted.
    pub fn set_feed_rate(&mut self, sps: u32, clock_hz: u32) -> Result<(), GantryError> {
        if clock_hz == 0 {
            return Err(GantryError::ClockZeroFrequency);
        }
        if sps > clock_hz {
            return Err(GantryError::ClockFeedTooFast);
        }
        self.phase_per_tick = (((sps as u64) << 16) / clock_hz as u64) as u32;
        Ok(())
    }

    /// Drains whole steps, keeping the fractional phase.
    pub fn take_steps(&mut self) -> u32 {
        let whole = self.accumulator >> 16;
        self.accumulator &= STEP_PHASE_ONE - 1;
        whole
    }

    /// Zeroes the phase increment and any undrained phase.
    pub fn halt(&mut self) {
        self.phase_per_tick = 0;
        self.accumulator = 0;
    }

    pub fn phase_per_tick(&self) -> u32 {
        self.phase_per_tick
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_microsecond_reload() {
        let tick = TickSource::Microsecond;
        assert_eq!(tick.reload(1_000), Ok(1_000));
        assert_eq!(tick.reload(10_000), Ok(100));
        // truncating division, same as the timer registers get
        assert_eq!(tick.reload(3_000), Ok(333));
    }

    #[test]
    fn test_cpu_clock_reload() {
        let tick = TickSource::CpuClockDiv16 { cpu_hz: 80_000_000 };
        assert_eq!(tick.tick_hz(), 5_000_000);
        assert_eq!(tick.reload(1_000), Ok(5_000));
        let tick = TickSource::CpuClockDiv16 { cpu_hz: 125_000_000 };
        assert_eq!(tick.reload(10_000), Ok(781));
    }

    #[test]
    fn test_reload_guards() {
        let tick = TickSource::Microsecond;
        assert_eq!(tick.reload(0), Err(GantryError::ClockZeroFrequency));
        assert_eq!(tick.reload(2_000_000), Err(GantryError::ClockReloadOutOfRange));
    }

    #[test]
    fn test_accumulates_whole_steps() {
        let mut clock = StepClock::new(false);
        // 400 steps/s at 10 kHz -> 2621 phase units per tick
        clock.set_feed_rate(400, 10_000).unwrap();
        assert_eq!(clock.phase_per_tick(), 2621);
        for _ in 0..10_000 {
            clock.on_tick();
        }
        // floor(10_000 * 2621 / 65536)
        assert_eq!(clock.take_steps(), 399);
        // fraction carries over instead of being lost
        assert_eq!(clock.take_steps(), 0);
        for _ in 0..26 {
            clock.on_tick();
        }
        assert_eq!(clock.take_steps(), 1);
    }

    #[test]
    fn test_take_preserves_fraction() {
        let mut clock = StepClock::new(false);
        clock.set_feed_rate(3, 2).unwrap_err();
        clock.set_feed_rate(3, 4).unwrap(); // 0.75 step per tick
        clock.on_tick();
        assert_eq!(clock.take_steps(), 0);
        clock.on_tick();
        assert_eq!(clock.take_steps(), 1); // 1.5 -> 1, fraction 0.5 kept
        clock.on_tick();
        assert_eq!(clock.take_steps(), 1); // 1.25 -> 1
    }

    #[test]
    fn test_full_rate_is_one_step_per_tick() {
        let mut clock = StepClock::new(false);
        clock.set_feed_rate(10_000, 10_000).unwrap();
        assert_eq!(clock.phase_per_tick(), STEP_PHASE_ONE);
        for _ in 0..7 {
            clock.on_tick();
        }
        assert_eq!(clock.take_steps(), 7);
    }

    #[test]
    fn test_probe_counts_ticks() {
        let mut probed = StepClock::new(true);
        let mut plain = StepClock::new(false);
        for _ in 0..5 {
            probed.on_tick();
            plain.on_tick();
        }
        assert_eq!(probed.ticks(), 5);
        assert_eq!(plain.ticks(), 0);
    }

    #[test]
    fn test_halt_clears_pending_phase() {
        let mut clock = StepClock::new(false);
        clock.set_feed_rate(1, 1).unwrap();
        clock.on_tick();
        clock.halt();
        assert_eq!(clock.take_steps(), 0);
        clock.on_tick();
        assert_eq!(clock.take_steps(), 0);
    }
}
