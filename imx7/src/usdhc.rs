//! # Ultra secured digital host controller (uSDHC)
use crate::Register;

pub const USDHC1_BASE_ADDR: usize = 0x30B4_0000;
pub const USDHC2_BASE_ADDR: usize = 0x30B5_0000;
pub const USDHC3_BASE_ADDR: usize = 0x30B6_0000;

pub mod offsets {
    pub const PRES_STATE: usize = 0x24;
    pub const PROT_CTRL: usize = 0x28;
    pub const SYS_CTRL: usize = 0x2C;
}

#[inline]
pub const fn reg(base: usize, offset: usize) -> Register {
    Register::new(base + offset)
}

#[bitbybit::bitenum(u2, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum DataTransferWidth {
    OneBit = 0b00,
    FourBit = 0b01,
    EightBit = 0b10,
    Reserved = 0b11,
}

#[bitbybit::bitfield(u32, debug)]
pub struct ProtocolControl {
    #[bits(1..=2, rw)]
    data_transfer_width: DataTransferWidth,
}

#[bitbybit::bitfield(u32, debug)]
pub struct SystemControl {
    /// Resets the whole host controller. Self-clearing.
    #[bit(24, rw)]
    reset_all: bool,
}

