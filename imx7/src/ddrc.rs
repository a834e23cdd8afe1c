//! # DDR controller (Synopsys uMCTL2) and its multi-port block
//!
//! Only the registers which are programmed by the bring-up sequence are listed here.
use crate::Register;

pub const DDRC_BASE_ADDR: usize = 0x307D_0000;
/// The multi-port registers start with PSTAT in the middle of the controller block.
pub const DDRC_MP_BASE_ADDR: usize = DDRC_BASE_ADDR + 0x3FC;

const fn ddrc(offset: usize) -> Register {
    Register::new(DDRC_BASE_ADDR + offset)
}

const fn ddrc_mp(offset: usize) -> Register {
    Register::new(DDRC_MP_BASE_ADDR + offset)
}

pub const MSTR: Register = ddrc(0x000);
pub const STAT: Register = ddrc(0x004);
pub const RFSHTMG: Register = ddrc(0x064);
pub const INIT0: Register = ddrc(0x0D0);
pub const INIT1: Register = ddrc(0x0D4);
pub const INIT3: Register = ddrc(0x0DC);
pub const INIT4: Register = ddrc(0x0E0);
pub const INIT5: Register = ddrc(0x0E4);
pub const RANKCTL: Register = ddrc(0x0F4);
pub const DRAMTMG0: Register = ddrc(0x100);
pub const DRAMTMG1: Register = ddrc(0x104);
pub const DRAMTMG2: Register = ddrc(0x108);
pub const DRAMTMG3: Register = ddrc(0x10C);
pub const DRAMTMG4: Register = ddrc(0x110);
pub const DRAMTMG5: Register = ddrc(0x114);
pub const DRAMTMG8: Register = ddrc(0x120);
pub const ZQCTL0: Register = ddrc(0x180);
pub const ZQCTL1: Register = ddrc(0x184);
pub const DFITMG0: Register = ddrc(0x190);
pub const DFITMG1: Register = ddrc(0x194);
pub const DFIUPD0: Register = ddrc(0x1A0);
pub const DFIUPD1: Register = ddrc(0x1A4);
pub const DFIUPD2: Register = ddrc(0x1A8);
pub const ADDRMAP0: Register = ddrc(0x200);
pub const ADDRMAP1: Register = ddrc(0x204);
pub const ADDRMAP5: Register = ddrc(0x214);
pub const ADDRMAP6: Register = ddrc(0x218);
pub const ODTCFG: Register = ddrc(0x240);
pub const ODTMAP: Register = ddrc(0x244);

/// Port status.
pub const PSTAT: Register = ddrc_mp(0x00);
/// Port 0 control.
pub const PCTRL_0: Register = ddrc_mp(0x94);

static_assertions::const_assert_eq!(PCTRL_0.addr(), 0x307D_0490);

pub mod regs {
    #[bitbybit::bitenum(u2, exhaustive = true)]
    #[derive(Debug, PartialEq, Eq)]
    pub enum OperatingMode {
        Init = 0b00,
        Normal = 0b01,
        PowerDown = 0b10,
        SelfRefresh = 0b11,
    }

    #[bitbybit::bitfield(u32)]
    #[derive(Debug)]
    pub struct Stat {
        #[bits(0..=1, r)]
        operating_mode: OperatingMode,
    }

    #[bitbybit::bitfield(u32, default = 0x0)]
    #[derive(Debug, PartialEq, Eq)]
    pub struct PortControl {
        #[bit(0, rw)]
        port_en: bool,
    }
}
