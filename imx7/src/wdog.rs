//! # Watchdog timers (WDOG1 to WDOG4)
use crate::Register;

pub const WDOG_BASES: [usize; 4] = [0x3028_0000, 0x3029_0000, 0x302A_0000, 0x302B_0000];

/// Miscellaneous control register.
#[inline]
pub const fn wmcr(base: usize) -> Register {
    Register::new(base + 0x08)
}

#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct MiscControl {
    /// Power-down counter enable. Resets the SoC 16 seconds after reset unless cleared.
    #[bit(0, rw)]
    pde: bool,
}
