//! # Analog block (ANATOP) PLL registers
use arbitrary_int::u7;

use crate::Register;

pub const ANATOP_BASE_ADDR: usize = 0x3036_0000;

pub const PLL_DDR: Register = Register::new(ANATOP_BASE_ADDR + 0x70);
pub const PLL_DDR_SET: Register = Register::new(ANATOP_BASE_ADDR + 0x74);
pub const PLL_DDR_CLR: Register = Register::new(ANATOP_BASE_ADDR + 0x78);
/// Numerator of the fractional DDR PLL multiplier.
pub const PLL_DDR_NUM: Register = Register::new(ANATOP_BASE_ADDR + 0x90);
/// Denominator of the fractional DDR PLL multiplier.
pub const PLL_DDR_DENOM: Register = Register::new(ANATOP_BASE_ADDR + 0xA0);

#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct PllDdr {
    #[bit(31, r)]
    lock: bool,
    #[bit(20, rw)]
    powerdown: bool,
    #[bit(13, rw)]
    enable_clk: bool,
    /// Loop divider. The output frequency is `24 MHz * div_select`.
    #[bits(0..=6, rw)]
    div_select: u7,
}

/// 528 MHz DDR PLL configuration with the output clock enabled.
pub const PLL_DDR_528MHZ: u32 = 0x0060_302C;
