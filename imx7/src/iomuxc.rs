//! # IOMUX controller and its general purpose registers (GPR)
use arbitrary_int::{u3, u4};

use crate::Register;

pub const IOMUXC_BASE_ADDR: usize = 0x3033_0000;
pub const IOMUXC_GPR_BASE_ADDR: usize = 0x3034_0000;

pub const GPR_COUNT: usize = 23;

/// Register located at `offset` inside the IOMUXC block.
///
/// This is used by the pad tables which specify the mux control, pad control and input select
/// registers by their offset.
#[inline]
pub const fn iomuxc_reg(offset: usize) -> Register {
    Register::new(IOMUXC_BASE_ADDR + offset)
}

/// General purpose register `n`.
///
/// Panics (at build time for constant indexes) if the index is out of range.
#[inline]
pub const fn gpr(n: usize) -> Register {
    assert!(n < GPR_COUNT, "invalid IOMUXC GPR index");
    Register::new(IOMUXC_GPR_BASE_ADDR + n * 4)
}

pub mod regs {
    use super::*;

    #[bitbybit::bitfield(u32, default = 0x0)]
    #[derive(Debug, PartialEq, Eq)]
    pub struct MuxControl {
        /// Software input on. Forces the input path of the pad to be active.
        #[bit(4, rw)]
        sion: bool,
        #[bits(0..=2, rw)]
        mux_mode: u3,
    }

    /// Drive strength, values for 3.3 V operation.
    #[bitbybit::bitenum(u2, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum DriveStrength {
        _196Ohm = 0b00,
        _98Ohm = 0b01,
        _49Ohm = 0b10,
        _32Ohm = 0b11,
    }

    #[bitbybit::bitenum(u1, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum SlewRate {
        Fast = 0,
        Slow = 1,
    }

    #[bitbybit::bitenum(u2, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum PullSelect {
        PullDown100k = 0b00,
        PullUp5k = 0b01,
        PullUp47k = 0b10,
        PullUp100k = 0b11,
    }

    #[bitbybit::bitfield(u32, default = 0x0)]
    #[derive(Debug, PartialEq, Eq)]
    pub struct PadControl {
        #[bits(5..=6, rw)]
        pull_select: PullSelect,
        /// Pull enable.
        #[bit(4, rw)]
        pue: bool,
        /// Hysteresis enable.
        #[bit(3, rw)]
        hys: bool,
        #[bit(2, rw)]
        slew_rate: SlewRate,
        #[bits(0..=1, rw)]
        drive_strength: DriveStrength,
    }

    #[bitbybit::bitfield(u32, default = 0x0)]
    #[derive(Debug, PartialEq, Eq)]
    pub struct Gpr8 {
        #[bit(8, rw)]
        ddr_phy_dfi_reset_n_din: bool,
        #[bits(3..=6, rw)]
        ddr_phy_ctrl_wake_up: u4,
    }
}
