//! # PAC for the NXP i.MX 7Dual/7Solo SoC family
//!
//! This crate only covers the register blocks which are touched before and during DRAM bring-up:
//! reset and clock control, pad multiplexing, the DDR controller and PHY, the system counter and
//! the boot peripherals (UART console, uSDHC).
//!
//! All register accesses go through the [RegisterBus] trait. The hardware implementation is
//! [Mmio]. Register tables are exposed as named [Register] constants per peripheral module, so
//! higher layers never deal with raw addresses.
#![no_std]

pub mod aipstz;
pub mod anatop;
pub mod ccm;
pub mod csu;
pub mod ddr_phy;
pub mod ddrc;
pub mod iomuxc;
pub mod src;
pub mod sysctr;
pub mod uart;
pub mod usdhc;
pub mod wdog;

mod bus;

pub use bus::{Mmio, Register, RegisterBus};

/// Start of the DRAM address space.
pub const DRAM_BASE_ADDR: usize = 0x8000_0000;
