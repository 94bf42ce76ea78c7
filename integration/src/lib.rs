#![no_std]

pub mod mock_axis;
