//! # HAL for the early bring-up of the NXP i.MX 7Dual/7Solo SoC family
//!
//! This crate provides the hardware abstraction used before and during DRAM bring-up on top of
//! the [peripheral access crate](imx7). All drivers are generic over the
//! [RegisterBus](imx7::RegisterBus) trait, so every register sequence can be exercised against
//! the recording [sim::TraceBus] on the host as well as against the real hardware through
//! [Mmio](imx7::Mmio).
//!
//! Delays are expressed with the [embedded_hal::delay::DelayNs] trait and the UART driver
//! implements [embedded_io::Write].
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(any(feature = "alloc", test))]
extern crate alloc;

pub mod clocks;
pub mod ddr;
pub mod iomux;
pub mod log;
pub mod soc;
pub mod time;
pub mod timer;
pub mod uart;
pub mod usdhc;

#[cfg(any(feature = "sim", test))]
pub mod sim;

pub use imx7 as pac;
