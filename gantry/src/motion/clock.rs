use core::cell::RefCell;
use core::sync::atomic::{AtomicU32, Ordering};

use critical_section::Mutex;

use crate::bsp::config::DEFAULT_STEP_CLOCK_HZ;
use crate::bsp::{STEP_CLOCK_TICK, TICK_PROBE};
use gantry_common::step_clock::StepClock;
use generic::gantry_error::GantryError;

static STEP_CLOCK: Mutex<RefCell<StepClock>> =
    Mutex::new(RefCell::new(StepClock::new(TICK_PROBE)));

static CLOCK_HZ: AtomicU32 = AtomicU32::new(DEFAULT_STEP_CLOCK_HZ);

/// ISR entry: one step-clock timer tick.
pub fn on_step_clock_tick() {
    critical_section::with(|cs| STEP_CLOCK.borrow(cs).borrow_mut().on_tick());
}

pub fn set_feed_rate(sps: u32) -> Result<(), GantryError> {
    let clock_hz = CLOCK_HZ.load(Ordering::Relaxed);
    critical_section::with(|cs| STEP_CLOCK.borrow(cs).borrow_mut().set_feed_rate(sps, clock_hz))
}

/// Whole steps accumulated since the last drain.
pub fn take_steps() -> u32 {
    critical_section::with(|cs| STEP_CLOCK.borrow(cs).borrow_mut().take_steps())
}

pub fn halt() {
    critical_section::with(|cs| STEP_CLOCK.borrow(cs).borrow_mut().halt())
}

pub fn clock_ticks() -> u64 {
    critical_section::with(|cs| STEP_CLOCK.borrow(cs).borrow().ticks())
}

/// Reload for the board's tick source at `freq_hz`, validated before any
/// timer register is touched.
pub fn step_clock_reload(freq_hz: u32) -> Result<u32, GantryError> {
    STEP_CLOCK_TICK.reload(freq_hz)
}

/// Record the new interrupt rate once the timer backend accepted it.
pub fn set_clock_hz(freq_hz: u32) {
    CLOCK_HZ.store(freq_hz, Ordering::Relaxed);
}

pub fn clock_hz() -> u32 {
    CLOCK_HZ.load(Ordering::Relaxed)
}
