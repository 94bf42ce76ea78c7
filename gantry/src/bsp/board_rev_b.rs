/// BSP version: rev B (bench carrier)
use crate::define_pins;
use gantry_common::step_clock::TickSource;
use rp2040_hal::gpio::bank0::{Gpio0, Gpio1};
use rp2040_hal::gpio::{
    DynPinId, FunctionSio, FunctionSioOutput, FunctionUart, Pin, PullDown, SioOutput,
};
use rp2040_hal::pac::{Interrupt, UART0};
use rp2040_hal::uart::{Enabled, UartPeripheral};

pub type ConsoleUartPins = (Pin<Gpio0, FunctionUart, PullDown>, Pin<Gpio1, FunctionUart, PullDown>);
pub type ConsoleUartType = UartPeripheral<Enabled, UART0, ConsoleUartPins>;
pub type ConsoleDirPinType = Pin<DynPinId, FunctionSioOutput, PullDown>;

pub type AxisStepPinType = Pin<DynPinId, FunctionSio<SioOutput>, PullDown>;
pub type AxisDirPinType = Pin<DynPinId, FunctionSio<SioOutput>, PullDown>;
pub type MotorOffPinType = Pin<DynPinId, FunctionSio<SioOutput>, PullDown>;

/// Step-clock timer tick on this carrier: the 1 MHz alarm timer.
pub const STEP_CLOCK_TICK: TickSource = TickSource::Microsecond;
pub const TICK_PROBE: bool = false;

define_pins! {
    console_uart, UART0
}

pub fn console_uart_irq() -> Interrupt {
    Interrupt::UART0_IRQ
}

define_pins! {
    // console link to the host
    console_tx, gpio0,
    console_rx, gpio1,

    // axis step lines
    x_step, gpio19,
    y_step, gpio18,
    z_step, gpio5,

    // axis direction lines
    x_dir, gpio4,
    y_dir, gpio2,
    z_dir, gpio15,

    // driver enable shared by all axes, active low
    motor_off, gpio21
}
