//! # Central Security Unit (CSU)
use crate::Register;

pub const CSU_BASE_ADDR: usize = 0x303E_0000;

pub const CSL_COUNT: usize = 64;

/// Config security level register `n`. Each register covers two peripheral slaves.
#[inline]
pub const fn csl(n: usize) -> Register {
    assert!(n < CSL_COUNT);
    Register::new(CSU_BASE_ADDR + n * 4)
}

/// Read and write access in every security mode for both slaves of a CSL register.
pub const CSL_ALL_ACCESS: u32 = 0x00FF_00FF;
