use defmt::info;
use fugit::ExtU64;

use gantry_common::global_timer::{now, Delay};
use gantry_common::segment::{LineSegment, StepMask};
use generic::gantry_proto::Axis;

/// Pin-free stand-in for the three axis drivers: applies step masks straight
/// to a position vector so motion logic can run without a carrier attached.
#[derive(Debug, defmt::Format)]
pub struct MockGantry {
    position: [i64; 3],
    steps_applied: u64,
}

impl MockGantry {
    pub fn new() -> Self {
        MockGantry { position: [0; 3], steps_applied: 0 }
    }

    pub fn apply(&mut self, segment: &LineSegment, mask: StepMask) {
        for axis in Axis::ALL {
            if mask.contains(axis) {
                let delta = if segment.direction(axis) { 1 } else { -1 };
                self.position[axis.index()] += delta;
            }
        }
        self.steps_applied += 1;
    }

    pub fn position(&self, axis: Axis) -> i64 {
        self.position[axis.index()]
    }

    pub fn steps_applied(&self) -> u64 {
        self.steps_applied
    }
}

impl Default for MockGantry {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks a whole segment against the mock, a few steps per round, logging
/// progress the way the firmware's motion task drains the step clock.
pub async fn walk_segment(mut segment: LineSegment, mut mock: MockGantry, steps_per_round: u32) {
    info!("walk_segment() start: {} steps to go", segment.remaining());
    loop {
        for _ in 0..steps_per_round {
            match segment.next_step() {
                Some(mask) => mock.apply(&segment, mask),
                None => {
                    info!("walk_segment() done: {:?} | ts: {:?}", mock, now().ticks());
                    return;
                }
            }
        }
        info!("walk_segment() progress: {:?}", mock);
        Delay::new(100.millis()).await;
    }
}
