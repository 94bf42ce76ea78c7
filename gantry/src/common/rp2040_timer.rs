use rp2040_hal::Timer;

use gantry_common::global_timer::{GantryInstant, GantryTimer};

pub struct Rp2040Timer(Timer);

impl Rp2040Timer {
    pub fn new(timer: Timer) -> Self {
        Rp2040Timer(timer)
    }
}

impl GantryTimer for Rp2040Timer {
    fn now(&self) -> GantryInstant {
        self.0.get_counter()
    }
}
