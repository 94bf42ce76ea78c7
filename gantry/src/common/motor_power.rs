use embedded_hal::digital::{OutputPin, StatefulOutputPin};

use generic::gantry_error::GantryError;

use crate::bsp::MotorOffPinType;

/// The carrier routes a single active-low enable line shared by every axis
/// driver. Driving it high cuts all motors at once.
pub struct MotorPower {
    off_pin: MotorOffPinType,
}

impl MotorPower {
    /// Drivers start disabled; enabling is deferred to the first move.
    pub fn new(mut off_pin: MotorOffPinType) -> Result<Self, GantryError> {
        off_pin.set_high().map_err(|_| GantryError::GpioPinError)?;
        Ok(MotorPower { off_pin })
    }

    pub fn on(&mut self) -> Result<(), GantryError> {
        self.off_pin.set_low().map_err(|_| GantryError::GpioPinError)
    }

    pub fn off(&mut self) -> Result<(), GantryError> {
        self.off_pin.set_high().map_err(|_| GantryError::GpioPinError)
    }

    pub fn is_on(&mut self) -> Result<bool, GantryError> {
        self.off_pin.is_set_low().map_err(|_| GantryError::GpioPinError)
    }

    pub fn ensure_on(&mut self) -> Result<(), GantryError> {
        if !self.is_on()? {
            return self.on();
        }
        Ok(())
    }
}
