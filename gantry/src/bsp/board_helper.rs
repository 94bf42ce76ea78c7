use rp2040_hal::gpio::bank0::Gpio25;
use rp2040_hal::gpio::{FunctionSioOutput, Pin, PullDown};

#[macro_export]
macro_rules! define_pins {
    ($($alias:ident, $pin:tt),*) => {
        $(
	    #[macro_export]
            macro_rules! $alias {
                ($pins:expr) => {
                    $pins.$pin
                };
            }
        )*
    };
}

// every carrier revision keeps the pico on-board led as status led
define_pins! {
    status_led, gpio25
}

pub type StatusLedPinType = Pin<Gpio25, FunctionSioOutput, PullDown>;
