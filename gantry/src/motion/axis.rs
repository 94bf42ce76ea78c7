use cortex_m::asm::delay;
use embedded_hal::digital::OutputPin;

use generic::gantry_error::GantryError;
use generic::gantry_proto::Axis;

use crate::bsp::config::STEP_PULSE_CYCLES;
use crate::bsp::{AxisDirPinType, AxisStepPinType};

/// One step/dir channel of the carrier, with signed position tracking.
pub struct AxisDriver {
    axis: Axis,
    step_pin: AxisStepPinType,
    dir_pin: AxisDirPinType,
    revert_dir: bool,

    forward: bool,
    position: i32,
}

impl AxisDriver {
    pub fn new(
        axis: Axis,
        step_pin: AxisStepPinType,
        dir_pin: AxisDirPinType,
        revert_dir: bool,
    ) -> Self {
        AxisDriver { axis, step_pin, dir_pin, revert_dir, forward: true, position: 0 }
    }

    pub fn set_direction(&mut self, forward: bool) -> Result<(), GantryError> {
        self.forward = forward;
        if forward ^ self.revert_dir {
            self.dir_pin.set_high().map_err(|_| GantryError::GpioPinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| GantryError::GpioPinError)?;
        }
        Ok(())
    }

    /// One step pulse. Direction must be latched beforehand; the driver
    /// needs the line back low for at least the pulse width before the
    /// next edge.
    pub fn pulse(&mut self) -> Result<(), GantryError> {
        self.step_pin.set_high().map_err(|_| GantryError::GpioPinError)?;
        delay(STEP_PULSE_CYCLES);
        self.step_pin.set_low().map_err(|_| GantryError::GpioPinError)?;
        delay(STEP_PULSE_CYCLES);

        self.position += if self.forward { 1 } else { -1 };
        Ok(())
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn position(&self) -> i32 {
        self.position
    }
}
