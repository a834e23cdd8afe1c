//! # Clock roots and clock gates
//!
//! Every clock consumer on the i.MX 7 is fed by a clock root which selects one of up to eight
//! sources and applies a pre- and a post-divider. The consumer itself is additionally gated by a
//! CCGR gate. This module models the roots needed during early bring-up.
//!
//! Root settings are validated when they are constructed. Board tables declared as `const` are
//! therefore rejected at build time if they select a source which is not available for the root
//! or use a divider outside the hardware range.
use arbitrary_int::{u3, u6};
use imx7::{
    RegisterBus,
    anatop::{self, PllDdr},
    ccm::{self, Gate, GateIndex, GateSetting, RootIndex, TargetRoot},
};

use crate::time::Hertz;

/// Upper bound for the number of status reads while waiting for a PLL lock.
pub const PLL_LOCK_MAX_POLLS: u32 = 10_000;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClockSource {
    Osc24M,
    PllSysMain480M,
    PllSysMain240M,
    PllSysPfd0_392M,
    PllDramMain,
    PllEnet40M,
    PllEnet100M,
    PllEnet250M,
    PllEnet500M,
}

impl ClockSource {
    /// Nominal output rate of the source.
    pub const fn rate(&self) -> Hertz {
        Hertz::from_raw(match self {
            ClockSource::Osc24M => 24_000_000,
            ClockSource::PllSysMain480M => 480_000_000,
            ClockSource::PllSysMain240M => 240_000_000,
            ClockSource::PllSysPfd0_392M => 392_000_000,
            ClockSource::PllDramMain => 528_000_000,
            ClockSource::PllEnet40M => 40_000_000,
            ClockSource::PllEnet100M => 100_000_000,
            ClockSource::PllEnet250M => 250_000_000,
            ClockSource::PllEnet500M => 500_000_000,
        })
    }
}

type MuxTable = [Option<ClockSource>; 8];

const DRAM_MUX: MuxTable = [
    Some(ClockSource::PllDramMain),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
];

const UART_MUX: MuxTable = [
    Some(ClockSource::Osc24M),
    Some(ClockSource::PllSysMain240M),
    Some(ClockSource::PllEnet40M),
    Some(ClockSource::PllEnet100M),
    Some(ClockSource::PllSysMain480M),
    None,
    None,
    None,
];

const USDHC_MUX: MuxTable = [
    Some(ClockSource::Osc24M),
    Some(ClockSource::PllSysPfd0_392M),
    Some(ClockSource::PllDramMain),
    Some(ClockSource::PllEnet500M),
    None,
    None,
    None,
    None,
];

const NAND_MUX: MuxTable = [
    Some(ClockSource::Osc24M),
    Some(ClockSource::PllSysMain480M),
    Some(ClockSource::PllDramMain),
    Some(ClockSource::PllSysPfd0_392M),
    None,
    Some(ClockSource::PllEnet500M),
    Some(ClockSource::PllEnet250M),
    None,
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClockRoot {
    Dram,
    Uart1,
    Usdhc3,
    Nand,
}

impl ClockRoot {
    pub const ALL: [ClockRoot; 4] = [
        ClockRoot::Dram,
        ClockRoot::Uart1,
        ClockRoot::Usdhc3,
        ClockRoot::Nand,
    ];

    pub const fn index(&self) -> RootIndex {
        match self {
            ClockRoot::Dram => RootIndex::DRAM,
            ClockRoot::Uart1 => RootIndex::UART1,
            ClockRoot::Usdhc3 => RootIndex::USDHC3,
            ClockRoot::Nand => RootIndex::NAND,
        }
    }

    /// Clock gate of the peripheral fed by this root.
    pub const fn gate(&self) -> GateIndex {
        match self {
            ClockRoot::Dram => GateIndex::DDR,
            ClockRoot::Uart1 => GateIndex::UART1,
            ClockRoot::Usdhc3 => GateIndex::USDHC3,
            ClockRoot::Nand => GateIndex::RAWNAND,
        }
    }

    const fn mux_table(&self) -> &'static MuxTable {
        match self {
            ClockRoot::Dram => &DRAM_MUX,
            ClockRoot::Uart1 => &UART_MUX,
            ClockRoot::Usdhc3 => &USDHC_MUX,
            ClockRoot::Nand => &NAND_MUX,
        }
    }

    /// Mux selector value for the given source, if the source can feed this root.
    pub const fn mux_for(&self, source: ClockSource) -> Option<u3> {
        let table = self.mux_table();
        let mut i = 0;
        while i < table.len() {
            if let Some(candidate) = table[i] {
                if candidate as u8 == source as u8 {
                    return Some(u3::new(i as u8));
                }
            }
            i += 1;
        }
        None
    }

    /// Source selected by a mux value.
    pub const fn source_for(&self, mux: u3) -> Option<ClockSource> {
        self.mux_table()[mux.value() as usize]
    }
}

/// Source and dividers of a clock root.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RootSetting {
    root: ClockRoot,
    source: ClockSource,
    mux: u3,
    pre_div: u8,
    post_div: u8,
}

impl RootSetting {
    pub const MAX_PRE_DIV: u8 = 8;
    pub const MAX_POST_DIV: u8 = 64;

    /// Create a validated root setting.
    ///
    /// Panics if the source can not be selected for the root or if one of the dividers is out of
    /// range. Use it in a `const` context to get a build error instead.
    pub const fn new(root: ClockRoot, source: ClockSource, pre_div: u8, post_div: u8) -> Self {
        let mux = match root.mux_for(source) {
            Some(mux) => mux,
            None => panic!("clock source can not be selected for this clock root"),
        };
        assert!(
            pre_div >= 1 && pre_div <= Self::MAX_PRE_DIV,
            "pre-divider out of range"
        );
        assert!(
            post_div >= 1 && post_div <= Self::MAX_POST_DIV,
            "post-divider out of range"
        );
        Self {
            root,
            source,
            mux,
            pre_div,
            post_div,
        }
    }

    #[inline]
    pub const fn root(&self) -> ClockRoot {
        self.root
    }

    #[inline]
    pub const fn source(&self) -> ClockSource {
        self.source
    }

    /// Output rate of the root.
    pub const fn rate(&self) -> Hertz {
        Hertz::from_raw(self.source.rate().raw() / self.pre_div as u32 / self.post_div as u32)
    }

    pub const fn target_root(&self) -> TargetRoot {
        TargetRoot::builder()
            .with_enable(true)
            .with_mux(self.mux)
            .with_pre_podf(u3::new(self.pre_div - 1))
            .with_post_podf(u6::new(self.post_div - 1))
            .build()
    }
}

/// Bring up the clock of one peripheral and return its rate.
///
/// The peripheral clock gate is closed while the source and the root are reprogrammed and opened
/// again afterwards.
pub fn configure_clock<B: RegisterBus>(bus: &mut B, setting: &RootSetting) -> Hertz {
    let gate = ccm::ccgr(setting.root.gate());
    bus.write(gate, gate_value(GateSetting::NotNeeded).raw_value());
    enable_source(bus, setting.source);
    bus.write(
        ccm::target_root(setting.root.index()),
        setting.target_root().raw_value(),
    );
    bus.write(gate, gate_value(GateSetting::Always).raw_value());
    let rate = setting.rate();
    log::debug!("clock root {:?} set to {} Hz", setting.root, rate.raw());
    rate
}

#[inline]
const fn gate_value(setting: GateSetting) -> Gate {
    Gate::builder()
        .with_domain3(GateSetting::NotNeeded)
        .with_domain2(GateSetting::NotNeeded)
        .with_domain1(GateSetting::NotNeeded)
        .with_domain0(setting)
        .build()
}

fn enable_source<B: RegisterBus>(bus: &mut B, source: ClockSource) {
    // The other sources are running after the boot ROM.
    if source == ClockSource::PllDramMain {
        configure_ddr_pll(bus);
    }
}

/// Power cycle the DDR PLL with the 528 MHz configuration and wait for the lock.
pub fn configure_ddr_pll<B: RegisterBus>(bus: &mut B) {
    let powered_down = PllDdr::new_with_raw_value(anatop::PLL_DDR_528MHZ).with_powerdown(true);
    bus.write(anatop::PLL_DDR, powered_down.raw_value());
    bus.write(anatop::PLL_DDR_NUM, 0);
    bus.write(anatop::PLL_DDR, anatop::PLL_DDR_528MHZ);
    for _ in 0..PLL_LOCK_MAX_POLLS {
        if PllDdr::new_with_raw_value(bus.read(anatop::PLL_DDR)).lock() {
            return;
        }
    }
    log::warn!("DDR PLL did not lock");
}

/// Decode the current rate of a clock root from its target register.
///
/// Returns [None] if the root is disabled or selects a source which is not modelled.
pub fn root_rate<B: RegisterBus>(bus: &mut B, root: ClockRoot) -> Option<Hertz> {
    let target = TargetRoot::new_with_raw_value(bus.read(ccm::target_root(root.index())));
    if !target.enable() {
        return None;
    }
    let source = root.source_for(target.mux())?;
    let pre_div = target.pre_podf().value() as u32 + 1;
    let post_div = target.post_podf().value() as u32 + 1;
    Some(Hertz::from_raw(source.rate().raw() / pre_div / post_div))
}

/// Clock subsystem query interface.
pub trait ClockQuery {
    fn clock_rate(&self, root: ClockRoot) -> Option<Hertz>;
}

/// Snapshot of the clock root rates.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Clocks {
    rates: [Option<Hertz>; ClockRoot::ALL.len()],
}

impl Clocks {
    /// Decode the rates of all modelled roots from the hardware registers.
    pub fn new_from_regs<B: RegisterBus>(bus: &mut B) -> Self {
        let mut rates = [None; ClockRoot::ALL.len()];
        for (rate, root) in rates.iter_mut().zip(ClockRoot::ALL) {
            *rate = root_rate(bus, root);
        }
        Self { rates }
    }
}

impl ClockQuery for Clocks {
    fn clock_rate(&self, root: ClockRoot) -> Option<Hertz> {
        self.rates[root as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Access, TraceBus};

    const UART1: RootSetting = RootSetting::new(ClockRoot::Uart1, ClockSource::Osc24M, 1, 1);
    const USDHC3: RootSetting =
        RootSetting::new(ClockRoot::Usdhc3, ClockSource::PllSysPfd0_392M, 1, 2);
    const NAND: RootSetting = RootSetting::new(ClockRoot::Nand, ClockSource::PllEnet500M, 1, 4);
    const DRAM: RootSetting = RootSetting::new(ClockRoot::Dram, ClockSource::PllDramMain, 1, 1);

    #[test]
    fn test_rates() {
        assert_eq!(UART1.rate(), Hertz::from_raw(24_000_000));
        assert_eq!(USDHC3.rate(), Hertz::from_raw(196_000_000));
        assert_eq!(NAND.rate(), Hertz::from_raw(125_000_000));
        assert_eq!(DRAM.rate(), Hertz::from_raw(528_000_000));
    }

    #[test]
    fn test_mux_lookup() {
        assert_eq!(ClockRoot::Nand.mux_for(ClockSource::PllEnet500M), Some(u3::new(5)));
        assert_eq!(ClockRoot::Usdhc3.mux_for(ClockSource::PllSysPfd0_392M), Some(u3::new(1)));
        assert_eq!(ClockRoot::Dram.mux_for(ClockSource::Osc24M), None);
        assert_eq!(ClockRoot::Uart1.source_for(u3::new(7)), None);
    }

    #[test]
    #[should_panic(expected = "clock source can not be selected")]
    fn test_invalid_source_rejected() {
        RootSetting::new(ClockRoot::Dram, ClockSource::Osc24M, 1, 1);
    }

    #[test]
    #[should_panic(expected = "post-divider out of range")]
    fn test_invalid_divider_rejected() {
        RootSetting::new(ClockRoot::Uart1, ClockSource::Osc24M, 1, 0);
    }

    #[test]
    fn test_configure_clock_sequence() {
        let mut bus = TraceBus::new();
        let rate = configure_clock(&mut bus, &USDHC3);
        assert_eq!(rate, Hertz::from_raw(196_000_000));
        let gate = ccm::ccgr(GateIndex::USDHC3);
        let target = ccm::target_root(RootIndex::USDHC3);
        assert_eq!(
            bus.log().accesses(),
            [
                Access::Write(gate, 0b00),
                Access::Write(target, (1 << 28) | (1 << 24) | 1),
                Access::Write(gate, 0b11),
            ]
        );
    }

    #[test]
    fn test_dram_clock_powers_up_pll() {
        let mut bus = TraceBus::new();
        bus.pin(anatop::PLL_DDR, anatop::PLL_DDR_528MHZ | (1 << 31));
        configure_clock(&mut bus, &DRAM);
        assert_eq!(
            bus.log().writes_to(anatop::PLL_DDR),
            [0x0070_302C, anatop::PLL_DDR_528MHZ]
        );
        let log = bus.log();
        let pll_locked = log
            .position(|a| matches!(a, Access::Read(r, _) if *r == anatop::PLL_DDR))
            .unwrap();
        let root_written = log
            .position(|a| a.is_write_to(ccm::target_root(RootIndex::DRAM)))
            .unwrap();
        assert!(pll_locked < root_written);
    }

    #[test]
    fn test_dram_pll_wait_is_bounded() {
        let mut bus = TraceBus::new();
        configure_ddr_pll(&mut bus);
        let reads = bus
            .log()
            .accesses()
            .iter()
            .filter(|a| matches!(a, Access::Read(..)))
            .count();
        assert_eq!(reads, PLL_LOCK_MAX_POLLS as usize);
    }

    #[test]
    fn test_snapshot_from_regs() {
        let mut bus = TraceBus::new();
        configure_clock(&mut bus, &UART1);
        configure_clock(&mut bus, &NAND);
        let clocks = Clocks::new_from_regs(&mut bus);
        assert_eq!(clocks.clock_rate(ClockRoot::Uart1), Some(Hertz::from_raw(24_000_000)));
        assert_eq!(clocks.clock_rate(ClockRoot::Nand), Some(Hertz::from_raw(125_000_000)));
        assert_eq!(clocks.clock_rate(ClockRoot::Usdhc3), None);
    }
}
