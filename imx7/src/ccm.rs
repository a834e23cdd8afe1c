//! # Clock Controller Module (CCM)
//!
//! Two register families are relevant here:
//!
//! - The clock gating registers (CCGR) which gate a clock for a peripheral per domain.
//! - The target root registers which select the source and the dividers of a clock root.
//!
//! Both families have SET and CLR aliases at offsets 0x4 and 0x8 of each register.
use arbitrary_int::{u3, u6};

use crate::Register;

pub const CCM_BASE_ADDR: usize = 0x3038_0000;

const CCGR_OFFSET: usize = 0x4000;
const CCGR_STRIDE: usize = 0x10;
const TARGET_ROOT_OFFSET: usize = 0x8000;
const TARGET_ROOT_STRIDE: usize = 0x80;

pub const CCGR_COUNT: usize = 191;
pub const TARGET_ROOT_COUNT: usize = 121;

pub const SET_OFFSET: usize = 0x4;
pub const CLR_OFFSET: usize = 0x8;

/// Index of a clock gate register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GateIndex(usize);

impl GateIndex {
    pub const DDR: Self = Self(19);
    pub const RAWNAND: Self = Self(64);
    pub const USDHC3: Self = Self(120);
    pub const UART1: Self = Self(148);

    pub const fn new(index: usize) -> Option<Self> {
        if index >= CCGR_COUNT {
            return None;
        }
        Some(Self(index))
    }

    #[inline]
    pub const fn value(&self) -> usize {
        self.0
    }
}

/// Index of a clock root.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RootIndex(usize);

impl RootIndex {
    pub const DRAM: Self = Self(49);
    pub const NAND: Self = Self(84);
    pub const USDHC3: Self = Self(88);
    pub const UART1: Self = Self(95);

    pub const fn new(index: usize) -> Option<Self> {
        if index >= TARGET_ROOT_COUNT {
            return None;
        }
        Some(Self(index))
    }

    #[inline]
    pub const fn value(&self) -> usize {
        self.0
    }
}

#[inline]
pub const fn ccgr(gate: GateIndex) -> Register {
    Register::new(CCM_BASE_ADDR + CCGR_OFFSET + gate.0 * CCGR_STRIDE)
}

#[inline]
pub const fn target_root(root: RootIndex) -> Register {
    Register::new(CCM_BASE_ADDR + TARGET_ROOT_OFFSET + root.0 * TARGET_ROOT_STRIDE)
}

static_assertions::const_assert_eq!(ccgr(GateIndex::DDR).addr(), 0x3038_4130);
static_assertions::const_assert_eq!(target_root(RootIndex::DRAM).addr(), 0x3038_9880);

/// Clock need setting of one domain inside a CCGR register.
#[bitbybit::bitenum(u2, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum GateSetting {
    NotNeeded = 0b00,
    RunOnly = 0b01,
    RunAndWait = 0b10,
    Always = 0b11,
}

#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct Gate {
    #[bits(12..=13, rw)]
    domain3: GateSetting,
    #[bits(8..=9, rw)]
    domain2: GateSetting,
    #[bits(4..=5, rw)]
    domain1: GateSetting,
    #[bits(0..=1, rw)]
    domain0: GateSetting,
}

#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct TargetRoot {
    #[bit(28, rw)]
    enable: bool,
    #[bits(24..=26, rw)]
    mux: u3,
    /// Pre-divider minus one.
    #[bits(16..=18, rw)]
    pre_podf: u3,
    /// Post-divider minus one.
    #[bits(0..=5, rw)]
    post_podf: u6,
}
