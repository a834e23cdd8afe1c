//! # i.MX 7 DDR PHY
use crate::Register;

pub const DDR_PHY_BASE_ADDR: usize = 0x307A_0000;

const fn phy(offset: usize) -> Register {
    Register::new(DDR_PHY_BASE_ADDR + offset)
}

pub const PHY_CON0: Register = phy(0x00);
pub const PHY_CON1: Register = phy(0x04);
pub const PHY_CON4: Register = phy(0x10);
/// Loopback offset control. Called LP_CON0 in the reference manual.
pub const OFFSET_LP_CON0: Register = phy(0x18);
pub const OFFSET_RD_CON0: Register = phy(0x20);
pub const OFFSET_WR_CON0: Register = phy(0x30);
pub const CMD_SDLL_CON0: Register = phy(0x50);
pub const DRVDS_CON0: Register = phy(0x9C);
pub const MDLL_CON0: Register = phy(0xB0);
/// ZQ (output impedance) calibration control. Receives the calibration codes.
pub const ZQ_CON0: Register = phy(0xC0);
/// ZQ calibration status.
pub const ZQ_CON1: Register = phy(0xC4);

pub mod regs {
    #[bitbybit::bitfield(u32)]
    #[derive(Debug)]
    pub struct CmdSdllCon0 {
        /// Re-synchronizes the command slave delay line to the master DLL on a rising edge.
        #[bit(24, rw)]
        ctrl_resync: bool,
    }

    #[bitbybit::bitfield(u32)]
    #[derive(Debug)]
    pub struct ZqCon1 {
        #[bit(0, r)]
        zq_done: bool,
    }
}
