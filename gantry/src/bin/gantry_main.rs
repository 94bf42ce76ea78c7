#![no_std]
#![no_main]
#![allow(static_mut_refs)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec;

use cortex_m::asm::delay;
use cortex_m::peripheral::NVIC;
use defmt::{error, info, Debug2Format};
use embedded_hal::digital::StatefulOutputPin;
use fugit::{ExtU64, RateExtU32};
use rp2040_hal::gpio::FunctionUart;
use rp2040_hal::uart::{DataBits, StopBits, UartConfig};
use rp2040_hal::{
    clocks::{init_clocks_and_plls, Clock},
    entry, pac,
    pac::interrupt,
    pac::Interrupt,
    sio::Sio,
    uart::UartPeripheral,
    watchdog::Watchdog,
    Timer,
};

use gantry::bsp::config::{
    DEFAULT_FEED_RATE_SPS, DEFAULT_STEP_CLOCK_HZ, REVERT_X_DIRECTION, REVERT_Y_DIRECTION,
    REVERT_Z_DIRECTION,
};
use gantry::bsp::{console_uart_irq, ConsoleDirPinType, ConsoleUartType, StatusLedPinType};
use gantry::common::async_initialization;
use gantry::common::motor_power::MotorPower;
use gantry::common::rp2040_timer::Rp2040Timer;
use gantry::common::uart_comm::UartComm;
#[cfg(any(feature = "bsp_rev_b", feature = "bsp_rev_c"))]
use gantry::motion::alarm_clock::AlarmStepClock;
use gantry::motion::axis::AxisDriver;
use gantry::motion::clock::{clock_ticks, set_clock_hz};
use gantry::motion::motion_processor::{
    motion_input_mq, motion_output_mq, process_motion_message, MotionProcessor,
};
#[cfg(feature = "bsp_rev_a")]
use gantry::motion::pwm_clock::PwmStepClock;
#[cfg(feature = "bsp_rev_a")]
use gantry::step_clock_pwm;
use gantry::{
    console_rx, console_tx, console_uart, motor_off, status_led, x_dir, x_step, y_dir, y_step,
    z_dir, z_step,
};
use gantry_common::executor::{dump_executor_status, spawn_task, start_global_executor};
use gantry_common::global_status::{get_status, FutureStatus, FutureType};
use gantry_common::global_timer::{init_global_timer, Delay};
use gantry_common::message_queue::{MessageQueueInterface, MessageQueueWrapper};
use gantry_common::once::Once;
use generic::gantry_error::GantryError;
use generic::gantry_proto::{
    Axis, GantryProto, MotionCommand, StepClockCommand, StepClockResponse,
};
use generic::motion_status::MotionStatus;
use rp_pico::XOSC_CRYSTAL_FREQ;

static mut UART: Option<(ConsoleUartType, Option<ConsoleDirPinType>)> = None;

#[cfg(any(feature = "bsp_rev_b", feature = "bsp_rev_c"))]
static mut STEP_CLOCK_TIMER: Option<AlarmStepClock> = None;
#[cfg(feature = "bsp_rev_a")]
static mut STEP_CLOCK_TIMER: Option<PwmStepClock> = None;

static mut MESSAGE_QUEUE_ONCE: Once<MessageQueueWrapper<GantryProto>> = Once::new();
fn get_mq() -> &'static mut MessageQueueWrapper<GantryProto> {
    unsafe { MESSAGE_QUEUE_ONCE.get_mut() }
}

#[entry]
fn main() -> ! {
    async_initialization();
    let mut pac = pac::Peripherals::take().unwrap();
    let sio = Sio::new(pac.SIO);
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
    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    #[cfg(any(feature = "bsp_rev_b", feature = "bsp_rev_c"))]
    let alarm = timer.alarm_0().unwrap();
    init_global_timer(Box::new(Rp2040Timer::new(timer)));

    let pins = rp2040_hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );
    let uart_pins = (
        console_tx!(pins).into_function::<FunctionUart>(),
        console_rx!(pins).into_function::<FunctionUart>(),
    );
    let mut uart = UartPeripheral::new(console_uart!(pac), uart_pins, &mut pac.RESETS)
        .enable(
            UartConfig::new(115200.Hz(), DataBits::Eight, None, StopBits::One),
            clocks.peripheral_clock.freq(),
        )
        .unwrap();
    uart.enable_rx_interrupt();
    unsafe {
        UART = Some((uart, None));
        NVIC::unmask(console_uart_irq());
    }

    #[cfg(any(feature = "bsp_rev_b", feature = "bsp_rev_c"))]
    {
        let mut step_clock = AlarmStepClock::new(alarm, DEFAULT_STEP_CLOCK_HZ).unwrap();
        step_clock.start().unwrap();
        unsafe {
            STEP_CLOCK_TIMER = Some(step_clock);
            NVIC::unmask(Interrupt::TIMER_IRQ_0);
        }
    }
    #[cfg(feature = "bsp_rev_a")]
    {
        let pwm_slices = rp2040_hal::pwm::Slices::new(pac.PWM, &mut pac.RESETS);
        let mut step_clock =
            PwmStepClock::new(step_clock_pwm!(pwm_slices), DEFAULT_STEP_CLOCK_HZ).unwrap();
        step_clock.start();
        unsafe {
            STEP_CLOCK_TIMER = Some(step_clock);
            NVIC::unmask(Interrupt::PWM_IRQ_WRAP);
        }
    }

    info!("gantry up");
    {
        spawn_task(gantry_process_messages());
    }
    {
        let x_axis = AxisDriver::new(
            Axis::X,
            x_step!(pins).into_push_pull_output().into_dyn_pin(),
            x_dir!(pins).into_push_pull_output().into_dyn_pin(),
            REVERT_X_DIRECTION,
        );
        let y_axis = AxisDriver::new(
            Axis::Y,
            y_step!(pins).into_push_pull_output().into_dyn_pin(),
            y_dir!(pins).into_push_pull_output().into_dyn_pin(),
            REVERT_Y_DIRECTION,
        );
        let z_axis = AxisDriver::new(
            Axis::Z,
            z_step!(pins).into_push_pull_output().into_dyn_pin(),
            z_dir!(pins).into_push_pull_output().into_dyn_pin(),
            REVERT_Z_DIRECTION,
        );
        let power =
            MotorPower::new(motor_off!(pins).into_push_pull_output().into_dyn_pin()).unwrap();

        let processor =
            MotionProcessor::new([x_axis, y_axis, z_axis], power, DEFAULT_FEED_RATE_SPS);
        spawn_task(process_motion_message(processor));
    }
    {
        let led = status_led!(pins).into_push_pull_output();
        spawn_task(heartbeat(led));
    }
    spawn_task(dump_executor_status());

    start_global_executor();

    loop {
        info!("in loop");
        delay(120_000_000);
    }
}

async fn heartbeat(mut led: StatusLedPinType) {
    loop {
        let _ = led.toggle();
        Delay::new(500.millis()).await;
    }
}

fn set_step_frequency(hz: u32) -> Result<(), GantryError> {
    if let Some(FutureStatus::MotionBusy) = get_status(FutureType::Motion) {
        return Err(GantryError::MotionUnavailable(MotionStatus::InMoving));
    }
    critical_section::with(|_cs| unsafe {
        let Some(step_clock) = STEP_CLOCK_TIMER.as_mut() else {
            return Err(GantryError::ClockNotReady);
        };
        step_clock.set_frequency(hz)
    })?;
    set_clock_hz(hz);
    Ok(())
}

// gantry main future
async fn gantry_process_messages() {
    info!("[MAIN] gantry_process_messages 0");
    let (uart, uart_dir) = unsafe { UART.as_mut().unwrap() };
    let mut uart_comm = UartComm::new(uart, uart_dir);
    loop {
        if let Some(message) = get_mq().dequeue() {
            info!("[MAIN] process_messages() | dequeued message: {}", message);

            let res = match message {
                GantryProto::Ping => uart_comm.send(GantryProto::Pong),

                GantryProto::Status => {
                    let res = uart_comm.send(GantryProto::Ack);
                    motion_input_mq().enqueue(MotionCommand::GetPosition);
                    res
                }

                GantryProto::Motion(cmd) => {
                    let res = uart_comm.send(GantryProto::Ack);
                    motion_input_mq().enqueue(cmd);
                    res
                }

                GantryProto::Clock(StepClockCommand::SetFrequency { hz }) => {
                    match set_step_frequency(hz) {
                        Ok(()) => uart_comm.send(GantryProto::ClockResp(StepClockResponse::Done)),
                        Err(err) => {
                            uart_comm.send(GantryProto::ClockResp(StepClockResponse::Error(err)))
                        }
                    }
                }

                GantryProto::Clock(StepClockCommand::GetTicks) => uart_comm.send(
                    GantryProto::ClockResp(StepClockResponse::Ticks { ticks: clock_ticks() }),
                ),

                _ => Err(GantryError::IgnoredMsg), // Ignore unrelated messages
            };

            if let Err(err) = res {
                info!("[MAIN] message processing error: {}", err);
                continue;
            }
        }

        if let Some(motion_resp) = motion_output_mq().dequeue() {
            info!("[MAIN] response from motion processor: {}", motion_resp);
            let _ = uart_comm.send(GantryProto::MotionResp(motion_resp));
        }

        Delay::new(1.millis()).await;
    }
}

unsafe fn on_console_irq() {
    if let Some((uart, _uart_dir)) = UART.as_mut() {
        // one length byte, then the frame
        let mut length_buffer = [0; 1];
        if uart.read_full_blocking(&mut length_buffer).is_err() {
            error!("Errors in reading UART");
            return;
        }

        let message_length = length_buffer[0] as usize;
        let mut message_buffer = vec![0; message_length];
        if uart.read_full_blocking(&mut message_buffer).is_err() {
            error!("Errors in reading the whole message with size ({})", message_length);
            return;
        }

        match postcard::from_bytes::<GantryProto>(&message_buffer) {
            Ok(msg) => {
                info!("Received message: {:?}", msg);
                get_mq().enqueue(msg);
            }
            Err(_) => info!("Failed to parse message: {}", Debug2Format(&message_buffer)),
        }
    }
}

#[cfg(any(feature = "bsp_rev_b", feature = "bsp_rev_c"))]
#[interrupt]
unsafe fn UART0_IRQ() {
    on_console_irq();
}

#[cfg(feature = "bsp_rev_a")]
#[interrupt]
unsafe fn UART1_IRQ() {
    on_console_irq();
}

#[cfg(any(feature = "bsp_rev_b", feature = "bsp_rev_c"))]
#[interrupt]
unsafe fn TIMER_IRQ_0() {
    if let Some(step_clock) = STEP_CLOCK_TIMER.as_mut() {
        step_clock.on_interrupt();
    }
}

#[cfg(feature = "bsp_rev_a")]
#[interrupt]
unsafe fn PWM_IRQ_WRAP() {
    if let Some(step_clock) = STEP_CLOCK_TIMER.as_mut() {
        step_clock.on_interrupt();
    }
}
