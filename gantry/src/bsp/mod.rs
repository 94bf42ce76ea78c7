mod board_helper;

pub use board_helper::StatusLedPinType;

#[cfg(feature = "bsp_rev_a")]
pub mod board_rev_a;
#[cfg(feature = "bsp_rev_a")]
pub use board_rev_a::*;

#[cfg(feature = "bsp_rev_b")]
pub mod board_rev_b;
#[cfg(feature = "bsp_rev_b")]
pub use board_rev_b::*;

#[cfg(feature = "bsp_rev_c")]
pub mod board_rev_c;
#[cfg(feature = "bsp_rev_c")]
pub use board_rev_c::*;

pub mod config;
