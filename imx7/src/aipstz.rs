//! # AHB to IP bridges (AIPS-TZ)
//!
//! The bridge configuration registers decide which bus masters may access the peripherals behind
//! each bridge.
use crate::Register;

pub const AIPS1_CONFIG_BASE_ADDR: usize = 0x301F_0000;
pub const AIPS2_CONFIG_BASE_ADDR: usize = 0x305F_0000;
pub const AIPS3_CONFIG_BASE_ADDR: usize = 0x309F_0000;

pub const AIPS_CONFIG_BASES: [usize; 3] = [
    AIPS1_CONFIG_BASE_ADDR,
    AIPS2_CONFIG_BASE_ADDR,
    AIPS3_CONFIG_BASE_ADDR,
];

/// Number of off-platform peripheral access control registers.
pub const OPACR_COUNT: usize = 5;

/// Master privilege register.
#[inline]
pub const fn mpr(base: usize) -> Register {
    Register::new(base)
}

/// Off-platform peripheral access control register `n`.
#[inline]
pub const fn opacr(base: usize, n: usize) -> Register {
    assert!(n < OPACR_COUNT);
    Register::new(base + 0x40 + n * 4)
}

/// Trusted for reads and writes, not forced to user mode, for all eight masters.
pub const MPR_ALL_MASTERS_TRUSTED: u32 = 0x7777_7777;
/// No supervisor protection, no write protection and trusted access for all peripherals.
pub const OPACR_UNRESTRICTED: u32 = 0x0000_0000;
