//! # System counter
//!
//! Free-running 56-bit counter which also feeds the generic timers of the Cortex-A7 cores.
use crate::Register;

pub const SYSCTR_CTRL_BASE_ADDR: usize = 0x306C_0000;
pub const SYSCTR_READ_BASE_ADDR: usize = 0x306A_0000;

/// Counter frequency when the counter runs from the 24 MHz oscillator with the fixed /3 divider.
pub const SYSCTR_FREQ_HZ: u32 = 8_000_000;

pub const CNTCR: Register = Register::new(SYSCTR_CTRL_BASE_ADDR);
pub const CNTCV_LO: Register = Register::new(SYSCTR_READ_BASE_ADDR + 0x08);
pub const CNTCV_HI: Register = Register::new(SYSCTR_READ_BASE_ADDR + 0x0C);

#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct CounterControl {
    /// Use the base frequency (frequency table entry 0).
    #[bit(8, rw)]
    fcr0: bool,
    /// Halt the counter on debug entry.
    #[bit(1, rw)]
    hdbg: bool,
    #[bit(0, rw)]
    enable: bool,
}
