use defmt::{debug, Debug2Format, Format};
use embedded_hal::digital::OutputPin;
use embedded_hal_nb::serial::Write;
use serde::Serialize;

use generic::gantry_error::GantryError;

/// Sends length-prefixed postcard frames over a UART, optionally
/// half-duplex with a direction pin. Inbound frames are picked up by the
/// UART interrupt instead.
pub struct UartComm<'a, D: OutputPin, T: Write<u8>> {
    uart: &'a mut T,
    dir_pin: &'a mut Option<D>,
}

impl<'a, D: OutputPin, T: Write<u8>> UartComm<'a, D, T> {
    pub fn new(uart: &'a mut T, dir_pin: &'a mut Option<D>) -> Self {
        if let Some(n_re) = dir_pin {
            n_re.set_low().map_err(|_| GantryError::UartSetDirError).unwrap();
        }
        UartComm { uart, dir_pin }
    }

    fn bwrite_all(&mut self, buffer: &[u8]) -> Result<(), GantryError> {
        for word in buffer {
            nb::block!(self.uart.write(*word)).map_err(|_| GantryError::UartWriteError)?;
        }

        Ok(())
    }

    pub fn send<U: Format + Serialize>(&mut self, message: U) -> Result<(), GantryError> {
        let out = postcard::to_allocvec::<U>(&message).map_err(|_| GantryError::UartInvalidInput)?;

        debug!("Send data: ({}, {}), original = {}", out.len(), Debug2Format(&out), message);

        if let Some(n_re) = self.dir_pin {
            n_re.set_high().map_err(|_| GantryError::UartSetDirError).unwrap();
        }

        // length byte first, then the payload
        let res = (|| {
            self.bwrite_all(&[out.len() as u8])?;
            self.bwrite_all(&out)?;
            nb::block!(self.uart.flush()).map_err(|_| GantryError::UartFlushError)
        })();

        if let Some(n_re) = self.dir_pin {
            n_re.set_low().map_err(|_| GantryError::UartSetDirError).unwrap();
        }
        res
    }
}
