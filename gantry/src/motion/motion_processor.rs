use defmt::{debug, info};
use fugit::ExtU64;

use gantry_common::global_status::{set_status, FutureStatus, FutureType};
use gantry_common::global_timer::Delay;
use gantry_common::message_queue::{MessageQueueInterface, MessageQueueWrapper};
use gantry_common::once::Once;
use gantry_common::segment::LineSegment;
use gantry_common::state::{MotionPhase, MotionState};
use generic::gantry_error::GantryError;
use generic::gantry_proto::{Axis, MotionCommand, MotionResponse};
use generic::motion_status::MotionStatus;

use crate::bsp::config::MAX_FEED_RATE_SPS;
use crate::common::motor_power::MotorPower;
use crate::motion::axis::AxisDriver;
use crate::motion::clock;

static mut MOTION_INPUT_MQ_ONCE: Once<MessageQueueWrapper<MotionCommand>> = Once::new();
static mut MOTION_OUTPUT_MQ_ONCE: Once<MessageQueueWrapper<MotionResponse>> = Once::new();
pub fn motion_input_mq() -> &'static mut MessageQueueWrapper<MotionCommand> {
    unsafe { MOTION_INPUT_MQ_ONCE.get_mut() }
}
pub fn motion_output_mq() -> &'static mut MessageQueueWrapper<MotionResponse> {
    unsafe { MOTION_OUTPUT_MQ_ONCE.get_mut() }
}

pub struct MotionProcessor {
    axes: [AxisDriver; 3],
    power: MotorPower,
    segment: Option<LineSegment>,
    feed_rate: u32,
    state: MotionState,
}

impl MotionProcessor {
    pub fn new(axes: [AxisDriver; 3], power: MotorPower, feed_rate: u32) -> Self {
        MotionProcessor { axes, power, segment: None, feed_rate, state: MotionState::new() }
    }

    pub fn process_motion_request(
        &mut self,
        msg: MotionCommand,
    ) -> Result<MotionResponse, GantryError> {
        match msg {
            MotionCommand::MotionStop => {
                self.stop();
                Ok(MotionResponse::Done)
            }
            MotionCommand::MotionPowerOn => {
                self.power.on()?;
                Ok(MotionResponse::Done)
            }
            MotionCommand::MotionPowerOff => {
                // dropping the enable line mid-move would lose steps
                self.stop();
                self.power.off()?;
                Ok(MotionResponse::Done)
            }
            MotionCommand::SetFeedRate { sps } => self.set_feed_rate(sps),
            MotionCommand::Jog { axis, steps } => match axis {
                Axis::X => self.begin_line(steps, 0, 0),
                Axis::Y => self.begin_line(0, steps, 0),
                Axis::Z => self.begin_line(0, 0, steps),
            },
            MotionCommand::Line { dx, dy, dz } => self.begin_line(dx, dy, dz),
            MotionCommand::GetPosition => Ok(MotionResponse::Position {
                x: self.axes[Axis::X.index()].position(),
                y: self.axes[Axis::Y.index()].position(),
                z: self.axes[Axis::Z.index()].position(),
            }),
        }
    }

    fn set_feed_rate(&mut self, sps: u32) -> Result<MotionResponse, GantryError> {
        if sps == 0 {
            return Err(GantryError::MotionZeroFeedRate);
        }
        if sps > MAX_FEED_RATE_SPS {
            return Err(GantryError::ClockFeedTooFast);
        }
        self.feed_rate = sps;
        if self.segment.is_some() {
            // take effect on the move in flight
            clock::set_feed_rate(sps)?;
        }
        Ok(MotionResponse::Done)
    }

    fn begin_line(&mut self, dx: i32, dy: i32, dz: i32) -> Result<MotionResponse, GantryError> {
        if !self.state.is_idle() {
            return Err(GantryError::MotionUnavailable(MotionStatus::InMoving));
        }
        let segment = LineSegment::new(dx, dy, dz);
        if segment.is_done() {
            return Ok(MotionResponse::Done);
        }

        self.power.ensure_on()?;
        for axis in Axis::ALL {
            self.axes[axis.index()].set_direction(segment.direction(axis))?;
        }

        // phase collected while idle must not turn into steps
        let _ = clock::take_steps();
        clock::set_feed_rate(self.feed_rate)?;
        if let Err(err) = self.state.push(MotionPhase::MOVING) {
            clock::halt();
            return Err(err);
        }
        set_status(FutureType::Motion, FutureStatus::MotionBusy);
        self.segment = Some(segment);
        debug!("begin_line: dx={}, dy={}, dz={}, feed={}", dx, dy, dz, self.feed_rate);
        Ok(MotionResponse::Accepted)
    }

    /// Feed whole steps drained from the step clock into the active segment.
    /// Returns true when the segment just completed.
    fn pump_steps(&mut self) -> Result<bool, GantryError> {
        if self.segment.is_none() {
            return Ok(false);
        }
        let mut budget = clock::take_steps();
        while budget > 0 {
            let Some(segment) = self.segment.as_mut() else { break };
            match segment.next_step() {
                Some(mask) => {
                    for axis in Axis::ALL {
                        if mask.contains(axis) {
                            self.axes[axis.index()].pulse()?;
                        }
                    }
                    budget -= 1;
                }
                None => break,
            }
        }
        if self.segment.as_ref().is_some_and(|segment| segment.is_done()) {
            self.finish_segment();
            return Ok(true);
        }
        Ok(false)
    }

    fn stop(&mut self) {
        clock::halt();
        if self.segment.take().is_some() {
            self.state.pop();
        }
        set_status(FutureType::Motion, FutureStatus::MotionAvailable);
    }

    fn finish_segment(&mut self) {
        debug!("finish_segment: position = ({}, {}, {})",
            self.axes[0].position(), self.axes[1].position(), self.axes[2].position());
        self.segment = None;
        clock::halt();
        self.state.pop();
        set_status(FutureType::Motion, FutureStatus::MotionAvailable);
    }
}

pub async fn process_motion_message(mut processor: MotionProcessor) {
    info!("process_motion_message() 0");
    let mq_in = motion_input_mq();
    let mq_out = motion_output_mq();
    set_status(FutureType::Motion, FutureStatus::MotionAvailable);
    loop {
        if let Some(msg) = mq_in.dequeue() {
            info!("process_motion_message(): process msg {}", msg);
            let resp = match processor.process_motion_request(msg) {
                Ok(resp) => resp,
                Err(err) => MotionResponse::Error(err),
            };
            mq_out.enqueue(resp);
        }

        match processor.pump_steps() {
            Ok(true) => mq_out.enqueue(MotionResponse::Done),
            Ok(false) => {}
            Err(err) => {
                processor.stop();
                mq_out.enqueue(MotionResponse::Error(err));
            }
        }

        Delay::new(1.millis()).await;
    }
}
