//! # System Reset Controller (SRC)
use crate::Register;

pub const SRC_BASE_ADDR: usize = 0x3039_0000;

/// DDR controller reset control register.
pub const DDRC_RCR: Register = Register::new(SRC_BASE_ADDR + 0x1000);

#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug, PartialEq, Eq)]
pub struct DdrcResetControl {
    /// Holds the controller core and the PHY in reset. The APB register interface stays usable.
    #[bit(1, rw)]
    ddrc_core_rst: bool,
    /// APB preset. Register accesses are not possible while this is asserted.
    #[bit(0, rw)]
    ddrc_prst: bool,
}
