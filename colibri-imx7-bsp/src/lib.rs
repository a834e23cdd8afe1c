//! # Board support for the Toradex Colibri iMX7
//!
//! Contains the board configuration tables (DDR3L setup, pads, clocks) and the SPL bring-up
//! sequence in [spl]. The sequence is generic over the register bus and the platform hooks, so
//! it runs unchanged on the hardware and against the recording register bus of the HAL.
#![no_std]

#[cfg(test)]
extern crate std;

pub mod board;
pub mod clocks;
pub mod ddr_config;
pub mod pads;
pub mod spl;
pub mod storage;

pub use imx7_hal as hal;
