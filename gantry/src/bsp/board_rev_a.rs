/// BSP version: rev A (compact carrier)
///
/// The alarm timer is routed elsewhere on this carrier, so the step clock
/// runs off a free PWM slice wrapping at sysclk/16.
use crate::define_pins;
use gantry_common::step_clock::TickSource;
use rp2040_hal::gpio::bank0::{Gpio8, Gpio9};
use rp2040_hal::gpio::{
    DynPinId, FunctionSio, FunctionSioOutput, FunctionUart, Pin, PullDown, SioOutput,
};
use rp2040_hal::pac::{Interrupt, UART1};
use rp2040_hal::pwm::{FreeRunning, Pwm0, Slice};
use rp2040_hal::uart::{Enabled, UartPeripheral};

pub type ConsoleUartPins = (Pin<Gpio8, FunctionUart, PullDown>, Pin<Gpio9, FunctionUart, PullDown>);
pub type ConsoleUartType = UartPeripheral<Enabled, UART1, ConsoleUartPins>;
pub type ConsoleDirPinType = Pin<DynPinId, FunctionSioOutput, PullDown>;

pub type AxisStepPinType = Pin<DynPinId, FunctionSio<SioOutput>, PullDown>;
pub type AxisDirPinType = Pin<DynPinId, FunctionSio<SioOutput>, PullDown>;
pub type MotorOffPinType = Pin<DynPinId, FunctionSio<SioOutput>, PullDown>;

pub type StepClockSliceType = Slice<Pwm0, FreeRunning>;

/// Step-clock timer tick on this carrier: sysclk through the /16 divider.
pub const STEP_CLOCK_TICK: TickSource = TickSource::CpuClockDiv16 { cpu_hz: 125_000_000 };
pub const TICK_PROBE: bool = false;

define_pins! {
    console_uart, UART1
}

pub fn console_uart_irq() -> Interrupt {
    Interrupt::UART1_IRQ
}

define_pins! {
    // console link to the host
    console_tx, gpio8,
    console_rx, gpio9,

    // axis step lines
    x_step, gpio4,
    y_step, gpio0,
    z_step, gpio2,

    // axis direction lines
    x_dir, gpio14,
    y_dir, gpio12,
    z_dir, gpio13,

    // driver enable shared by all axes, active low
    motor_off, gpio5
}

// step-clock pwm slice
define_pins! {
    step_clock_pwm, pwm0
}
