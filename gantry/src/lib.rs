#![no_std]
#![allow(static_mut_refs)]

extern crate alloc;

use defmt_rtt as _;
use panic_probe as _;

pub mod bsp;
pub mod common;
pub mod motion;
