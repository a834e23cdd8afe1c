//! # DDR module
//!
//! Brings the DDR controller (DDRC) and the DDR PHY from reset into a calibrated, ready state.
//!
//! The configuration is split into two phases. The controller and PHY register tables are fixed
//! for a given DRAM part. The ZQ calibration codes compensate board-level signal integrity
//! variance and are swept in order until the [TrainingCheck] accepts one.
use embedded_hal::delay::DelayNs;
use imx7::{
    RegisterBus,
    ddr_phy::{self, regs::ZqCon1},
    ddrc::{
        self,
        regs::{OperatingMode, Stat},
    },
};

pub mod ll;

pub use ll::{DdrPhyConfigSet, DdrcConfigSet, DdrcMpConfigSet};

/// Polls of the controller status while waiting for the DRAM initialization to complete.
pub const SETTLE_MAX_POLLS: u32 = 10_000;
pub const SETTLE_POLL_INTERVAL_US: u32 = 10;

/// Ordered, non-empty list of candidate ZQ calibration codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationTable<'a>(&'a [u32]);

impl<'a> CalibrationTable<'a> {
    /// Panics if the list is empty. Use it in a `const` context to get a build error instead.
    pub const fn new(codes: &'a [u32]) -> Self {
        assert!(!codes.is_empty(), "calibration table must not be empty");
        Self(codes)
    }

    #[inline]
    pub const fn codes(&self) -> &'a [u32] {
        self.0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Complete DRAM interface configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DramConfig<'a> {
    pub ddrc: DdrcConfigSet,
    pub ddrc_mp: DdrcMpConfigSet,
    pub phy: DdrPhyConfigSet,
    pub calibration: CalibrationTable<'a>,
}

/// Training check performed after a calibration code was written.
pub trait TrainingCheck {
    fn passed<B: RegisterBus>(&mut self, bus: &mut B, code: u32) -> bool;
}

/// Hardware training check: the PHY reports completion of the ZQ calibration with the new code.
pub struct ZqCalibrationDone<D> {
    delay: D,
    timeout_us: u32,
}

impl<D: DelayNs> ZqCalibrationDone<D> {
    pub const DEFAULT_TIMEOUT_US: u32 = 1_000;

    pub const fn new(delay: D, timeout_us: u32) -> Self {
        Self { delay, timeout_us }
    }
}

impl<D: DelayNs> TrainingCheck for ZqCalibrationDone<D> {
    fn passed<B: RegisterBus>(&mut self, bus: &mut B, _code: u32) -> bool {
        for _ in 0..self.timeout_us {
            if ZqCon1::new_with_raw_value(bus.read(ddr_phy::ZQ_CON1)).zq_done() {
                return true;
            }
            self.delay.delay_us(1);
        }
        false
    }
}

/// Calibration code latched by the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    /// Position inside the calibration table.
    pub index: usize,
    pub code: u32,
}

/// The DRAM interface is trained and the ports are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DramReady {
    pub calibration: Calibration,
    /// Number of calibration codes which were tried.
    pub attempts: usize,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DdrInitError {
    #[error("DDR controller did not reach normal operation")]
    SettleTimeout,
    #[error("no calibration code passed training after {attempts} attempts")]
    CalibrationExhausted { attempts: usize },
}

/// This completely sets up the DDR controller and the PHY.
///
/// It performs the following steps:
///
///  1. Holds the controller core in reset.
///  2. Writes the controller configuration.
///  3. Writes the PHY configuration.
///  4. Releases the reset, re-synchronizes the command delay line and wakes the PHY. The
///     controller then runs the JEDEC initialization of the DRAM devices on its own.
///  5. Waits until the controller reports normal operation.
///  6. Sweeps the calibration table until the training check passes.
///  7. Enables the AXI ports.
///
/// No register is written after a failed step. The ports are only enabled after a successful
/// calibration.
pub fn configure_ddr<B: RegisterBus, D: DelayNs, T: TrainingCheck>(
    bus: &mut B,
    delay: &mut D,
    check: &mut T,
    cfg: &DramConfig,
) -> Result<DramReady, DdrInitError> {
    ll::assert_core_reset(bus);
    ll::configure_ddr_config(bus, &cfg.ddrc);
    ll::configure_phy(bus, &cfg.phy);
    ll::release_core_reset(bus);
    ll::resync_command_delay_line(bus);
    ll::wake_phy(bus);

    wait_for_normal_operation(bus, delay)?;
    log::debug!("DDR controller in normal operation");

    let ready = calibrate(bus, check, &cfg.calibration)?;
    log::debug!(
        "DDR calibration code {:#010x} (index {}) passed",
        ready.calibration.code,
        ready.calibration.index
    );

    ll::configure_ports(bus, &cfg.ddrc_mp);
    Ok(ready)
}

/// Poll the controller status until it reports normal operation.
pub fn wait_for_normal_operation<B: RegisterBus, D: DelayNs>(
    bus: &mut B,
    delay: &mut D,
) -> Result<(), DdrInitError> {
    for _ in 0..SETTLE_MAX_POLLS {
        if Stat::new_with_raw_value(bus.read(ddrc::STAT)).operating_mode() == OperatingMode::Normal
        {
            return Ok(());
        }
        delay.delay_us(SETTLE_POLL_INTERVAL_US);
    }
    Err(DdrInitError::SettleTimeout)
}

/// Try the calibration codes in table order and latch the first one which passes the check.
pub fn calibrate<B: RegisterBus, T: TrainingCheck>(
    bus: &mut B,
    check: &mut T,
    table: &CalibrationTable,
) -> Result<DramReady, DdrInitError> {
    for (index, code) in table.codes().iter().copied().enumerate() {
        bus.write(ddr_phy::ZQ_CON0, code);
        if check.passed(bus, code) {
            return Ok(DramReady {
                calibration: Calibration { index, code },
                attempts: index + 1,
            });
        }
        log::trace!("DDR calibration code {:#010x} rejected", code);
    }
    Err(DdrInitError::CalibrationExhausted {
        attempts: table.len(),
    })
}

pub mod memtest {
    //! DRAM tests which run after the calibration.
    //!
    //! Memory words are accessed through a [RegisterBus]. On the target this is the volatile
    //! [imx7::Mmio] bus on the DRAM address space.
    use imx7::{Register, RegisterBus};

    const PATTERN: u32 = 0xAAAA_AAAA;
    const ANTI_PATTERN: u32 = !PATTERN;

    #[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
    #[error("memory test error at {addr:#010x}: expected {expected:#010x}, found {found:#010x}")]
    pub struct MemTestError {
        pub addr: usize,
        pub expected: u32,
        pub found: u32,
    }

    /// Word-aligned memory window under test.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TestRegion {
        base: Register,
        words: usize,
    }

    impl TestRegion {
        /// Panics if the base address is not word aligned. Use it in a `const` context to get a
        /// build error instead.
        pub const fn new(base_addr: usize, words: usize) -> Self {
            assert!(base_addr % 4 == 0, "memory test region must be word aligned");
            Self {
                base: Register::new(base_addr),
                words,
            }
        }

        #[inline]
        pub const fn words(&self) -> usize {
            self.words
        }

        #[inline]
        const fn word(&self, index: usize) -> Register {
            self.base.offset(index * 4)
        }

        /// Word offsets 1, 2, 4, .. inside the region, one per address line.
        fn address_line_offsets(&self) -> impl Iterator<Item = usize> {
            let words = self.words;
            core::iter::successors(Some(1usize), |offset| offset.checked_mul(2))
                .take_while(move |offset| *offset < words)
        }
    }

    /// Runs the data bus, address bus and checkerboard tests.
    pub fn run_all<B: RegisterBus>(bus: &mut B, region: &TestRegion) -> Result<(), MemTestError> {
        data_bus_test(bus, region)?;
        address_bus_test(bus, region)?;
        checkerboard_test(bus, region)
    }

    /// Walking ones and walking zeros on the first word of the region. Finds stuck and shorted
    /// data lines.
    pub fn data_bus_test<B: RegisterBus>(
        bus: &mut B,
        region: &TestRegion,
    ) -> Result<(), MemTestError> {
        if region.words == 0 {
            return Ok(());
        }
        let word = region.word(0);
        for bit in 0..32 {
            for pattern in [1u32 << bit, !(1u32 << bit)] {
                bus.write(word, pattern);
                verify(bus, word, pattern)?;
            }
        }
        Ok(())
    }

    /// Writes a marker to each power-of-two offset and checks that changing one of them does not
    /// change any other. Finds stuck and shorted address lines.
    pub fn address_bus_test<B: RegisterBus>(
        bus: &mut B,
        region: &TestRegion,
    ) -> Result<(), MemTestError> {
        if region.words == 0 {
            return Ok(());
        }
        for offset in region.address_line_offsets() {
            bus.write(region.word(offset), PATTERN);
        }

        // Address lines stuck high alias onto offset 0.
        bus.write(region.word(0), ANTI_PATTERN);
        for offset in region.address_line_offsets() {
            verify(bus, region.word(offset), PATTERN)?;
        }
        bus.write(region.word(0), PATTERN);

        // Address lines stuck low or shorted together.
        for test_offset in region.address_line_offsets() {
            bus.write(region.word(test_offset), ANTI_PATTERN);
            verify(bus, region.word(0), PATTERN)?;
            for offset in region
                .address_line_offsets()
                .filter(|offset| *offset != test_offset)
            {
                verify(bus, region.word(offset), PATTERN)?;
            }
            bus.write(region.word(test_offset), PATTERN);
        }
        Ok(())
    }

    /// Fills the whole region with alternating patterns, then with the inverted ones.
    pub fn checkerboard_test<B: RegisterBus>(
        bus: &mut B,
        region: &TestRegion,
    ) -> Result<(), MemTestError> {
        for pattern in [PATTERN, ANTI_PATTERN] {
            let value = |index: usize| {
                if index.is_multiple_of(2) {
                    pattern
                } else {
                    !pattern
                }
            };
            for index in 0..region.words {
                bus.write(region.word(index), value(index));
            }
            for index in 0..region.words {
                verify(bus, region.word(index), value(index))?;
            }
        }
        Ok(())
    }

    #[inline]
    fn verify<B: RegisterBus>(
        bus: &mut B,
        word: Register,
        expected: u32,
    ) -> Result<(), MemTestError> {
        let found = bus.read(word);
        if found != expected {
            return Err(MemTestError {
                addr: word.addr(),
                expected,
                found,
            });
        }
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Access, NoDelay, ScriptedCheck, TraceBus, TraceLog};
    use imx7::{
        Register,
        ddrc::regs::PortControl,
        src,
    };

    const CODES: [u32; 4] = [0x10, 0x20, 0x30, 0x40];

    fn test_config() -> DramConfig<'static> {
        DramConfig {
            ddrc: DdrcConfigSet {
                mstr: 0x0104_0001,
                init0: 0x0002_0083,
                init1: 0x0069_0000,
                init3: 0x0930_0004,
                init4: 0x0448_0000,
                init5: 0x0010_0004,
                rankctl: 0x0000_033f,
                dramtmg0: 0x0910_090a,
                dramtmg1: 0x000d_020e,
                dramtmg2: 0x0304_0307,
                dramtmg3: 0x0000_2006,
                dramtmg4: 0x0402_0204,
                dramtmg5: 0x0303_0202,
                dramtmg8: 0x0000_0803,
                zqctl0: 0x0080_0020,
                zqctl1: 0x0200_1000,
                dfitmg0: 0x0209_8204,
                dfitmg1: 0x0003_0303,
                dfiupd0: 0x8040_0003,
                dfiupd1: 0x0010_0020,
                dfiupd2: 0x8010_0004,
                odtcfg: 0x0600_0601,
                odtmap: 0x0000_0001,
                rfshtmg: 0x0040_0046,
                addrmap0: 0x0000_001f,
                addrmap1: 0x0008_0808,
                addrmap5: 0x0707_0707,
                addrmap6: 0x0707_0707,
            },
            ddrc_mp: DdrcMpConfigSet {
                pctrl_0: PortControl::builder().with_port_en(true).build(),
            },
            phy: DdrPhyConfigSet {
                phy_con0: 0x1742_0f40,
                phy_con1: 0x1021_0100,
                phy_con4: 0x0006_0807,
                mdll_con0: 0x1010_007e,
                drvds_con0: 0x0000_0d6e,
                cmd_sdll_con0: 0x0000_0010,
                offset_lp_con0: 0x0000_000f,
                offset_rd_con0: 0x0808_0808,
                offset_wr_con0: 0x0808_0808,
            },
            calibration: CalibrationTable::new(&CODES),
        }
    }

    fn settled_bus() -> TraceBus {
        let mut bus = TraceBus::new();
        bus.pin(ddrc::STAT, OperatingMode::Normal as u32);
        bus
    }

    fn reset_window(log: &TraceLog) -> (usize, usize) {
        let asserted = log
            .position(|a| *a == Access::Write(src::DDRC_RCR, 0b10))
            .unwrap();
        let released = log
            .position(|a| *a == Access::Write(src::DDRC_RCR, 0))
            .unwrap();
        (asserted, released)
    }

    fn count_in_window(log: &TraceLog, reg: Register, window: (usize, usize)) -> usize {
        log.accesses()
            .iter()
            .enumerate()
            .filter(|(i, a)| a.is_write_to(reg) && *i > window.0 && *i < window.1)
            .count()
    }

    #[test]
    fn test_tables_written_once_inside_reset_window() {
        let cfg = test_config();
        let mut bus = settled_bus();
        configure_ddr(&mut bus, &mut NoDelay, &mut ScriptedCheck::pass_on(0), &cfg).unwrap();
        let log = bus.log();
        let window = reset_window(&log);
        assert!(window.0 < window.1);
        let table_writes = cfg
            .ddrc
            .register_writes()
            .into_iter()
            .chain(cfg.phy.register_writes());
        for (reg, value) in table_writes {
            assert_eq!(count_in_window(&log, reg, window), 1, "{reg:?}");
            let pos = log.position(|a| *a == Access::Write(reg, value)).unwrap();
            assert!(pos > window.0 && pos < window.1);
        }
        // Nothing but the tables inside the window.
        assert_eq!(
            window.1 - window.0 - 1,
            DdrcConfigSet::REGISTER_COUNT + DdrPhyConfigSet::REGISTER_COUNT
        );
    }

    #[test]
    fn test_controller_tables_precede_phy_tables() {
        let cfg = test_config();
        let mut bus = settled_bus();
        configure_ddr(&mut bus, &mut NoDelay, &mut ScriptedCheck::pass_on(0), &cfg).unwrap();
        let log = bus.log();
        let last_ddrc = log.rposition(|a| a.is_write_to(ddrc::ADDRMAP6)).unwrap();
        let first_phy = log.position(|a| a.is_write_to(ddr_phy::PHY_CON0)).unwrap();
        assert!(last_ddrc < first_phy);
    }

    #[test]
    fn test_sweep_stops_at_first_pass() {
        let cfg = test_config();
        for k in 0..CODES.len() {
            let mut bus = settled_bus();
            let mut check = ScriptedCheck::pass_on(k);
            let ready = configure_ddr(&mut bus, &mut NoDelay, &mut check, &cfg).unwrap();
            assert_eq!(ready.calibration, Calibration { index: k, code: CODES[k] });
            assert_eq!(ready.attempts, k + 1);
            assert_eq!(check.attempts(), k + 1);
            assert_eq!(bus.log().writes_to(ddr_phy::ZQ_CON0), &CODES[..=k]);
        }
    }

    #[test]
    fn test_ports_enabled_after_calibration() {
        let cfg = test_config();
        let mut bus = settled_bus();
        configure_ddr(&mut bus, &mut NoDelay, &mut ScriptedCheck::pass_on(2), &cfg).unwrap();
        let log = bus.log();
        assert_eq!(log.writes_to(ddrc::PCTRL_0), [1]);
        let last_zq = log.rposition(|a| a.is_write_to(ddr_phy::ZQ_CON0)).unwrap();
        let port = log.position(|a| a.is_write_to(ddrc::PCTRL_0)).unwrap();
        assert!(last_zq < port);
        assert_eq!(log.writes().last(), Some(&(ddrc::PCTRL_0, 1)));
    }

    #[test]
    fn test_exhausted_sweep_is_fatal() {
        let cfg = test_config();
        let mut bus = settled_bus();
        let mut check = ScriptedCheck::never();
        let result = configure_ddr(&mut bus, &mut NoDelay, &mut check, &cfg);
        assert_eq!(
            result,
            Err(DdrInitError::CalibrationExhausted {
                attempts: CODES.len()
            })
        );
        let log = bus.log();
        assert!(log.writes_to(ddrc::PCTRL_0).is_empty());
        // The last write is the last calibration code.
        assert_eq!(
            log.writes().last(),
            Some(&(ddr_phy::ZQ_CON0, CODES[CODES.len() - 1]))
        );
    }

    #[test]
    fn test_settle_timeout() {
        let cfg = test_config();
        let mut bus = TraceBus::new();
        let mut check = ScriptedCheck::pass_on(0);
        let result = configure_ddr(&mut bus, &mut NoDelay, &mut check, &cfg);
        assert_eq!(result, Err(DdrInitError::SettleTimeout));
        let log = bus.log();
        assert!(log.writes_to(ddr_phy::ZQ_CON0).is_empty());
        assert!(log.writes_to(ddrc::PCTRL_0).is_empty());
        assert_eq!(check.attempts(), 0);
    }

    #[test]
    fn test_phy_wake_sequence() {
        let cfg = test_config();
        let mut bus = settled_bus();
        configure_ddr(&mut bus, &mut NoDelay, &mut ScriptedCheck::pass_on(0), &cfg).unwrap();
        let log = bus.log();
        let gate = imx7::ccm::ccgr(imx7::ccm::GateIndex::DDR);
        assert_eq!(log.writes_to(gate), [0b00, 0b10]);
        assert_eq!(log.writes_to(imx7::iomuxc::gpr(8)), [0x178]);
        assert_eq!(
            log.writes_to(ddr_phy::CMD_SDLL_CON0),
            [0x10, 0x0100_0010, 0x10]
        );
    }

    #[test]
    fn test_zq_done_check() {
        let mut bus = TraceBus::new();
        let mut check = ZqCalibrationDone::new(NoDelay, 5);
        assert!(!check.passed(&mut bus, 0x10));
        bus.pin(ddr_phy::ZQ_CON1, 1);
        assert!(check.passed(&mut bus, 0x10));
    }

    #[test]
    #[should_panic(expected = "calibration table must not be empty")]
    fn test_empty_calibration_table() {
        CalibrationTable::new(&[]);
    }
}
