//! Dry-runs the step clock and a line segment against the mock gantry, the
//! same way the firmware's alarm ISR and motion task cooperate.
#![no_std]
#![no_main]

extern crate alloc;

use alloc::boxed::Box;

use cortex_m::asm::delay;
use defmt::info;
use defmt_rtt as _;
use panic_probe as _;

use gantry::common::async_initialization;
use gantry::common::rp2040_timer::Rp2040Timer;
use gantry_common::executor::{spawn_task, start_global_executor};
use gantry_common::global_timer::init_global_timer;
use gantry_common::segment::LineSegment;
use gantry_common::step_clock::{StepClock, TickSource};
use integration::mock_axis::{walk_segment, MockGantry};
use rp2040_hal::{clocks::init_clocks_and_plls, entry, pac, watchdog::Watchdog, Timer};
use rp_pico::XOSC_CRYSTAL_FREQ;

#[entry]
fn main() -> ! {
    async_initialization();
    let mut pac = pac::Peripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let clocks = init_clocks_and_plls(
        XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();
    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    init_global_timer(Box::new(Rp2040Timer::new(timer)));

    // one simulated second of ticks at 10 kHz and 400 steps/s
    let tick = TickSource::Microsecond;
    info!("simulated reload: {} us per tick", tick.reload(10_000).unwrap());

    let mut clock = StepClock::new(true);
    clock.set_feed_rate(400, 10_000).unwrap();
    let mut emitted = 0u32;
    for _ in 0..10_000 {
        clock.on_tick();
        emitted += clock.take_steps();
    }
    info!("one simulated second: {} steps, {} raw ticks", emitted, clock.ticks());

    spawn_task(walk_segment(LineSegment::new(120, -45, 30), MockGantry::new(), 25));
    start_global_executor();

    loop {
        info!("in loop");
        delay(120_000_000);
    }
}
