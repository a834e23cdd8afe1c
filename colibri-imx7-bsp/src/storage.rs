//! Storage bring-up.
//!
//! Routes and clocks the boot media controller and registers it with the boot media driver. The
//! driver owns the device protocol.
use core::num::NonZeroI32;

use imx7::{RegisterBus, usdhc::USDHC3_BASE_ADDR};
use imx7_hal::{
    clocks::{ClockQuery, ClockRoot, Clocks, configure_clock},
    iomux::apply_pads,
    time::Hertz,
    usdhc::{BootMediaDriver, BusWidth, StorageInterfaceConfig},
};

use crate::{clocks, pads};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BootMedia {
    Emmc,
    Nand,
}

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum StorageInitError {
    #[error("could not initialize MMC ({0})")]
    Driver(NonZeroI32),
    #[error("storage interface clock is not running")]
    ClockUnavailable,
}

/// Build the eMMC interface configuration. The clock rate is taken from the clock subsystem.
pub fn emmc_interface_config<C: ClockQuery>(clocks: &C) -> Option<StorageInterfaceConfig> {
    Some(StorageInterfaceConfig {
        base_addr: USDHC3_BASE_ADDR,
        clock: clocks.clock_rate(ClockRoot::Usdhc3)?,
        max_bus_width: BusWidth::Eight,
    })
}

/// Register the eMMC controller with the boot media driver.
///
/// A failure is reported with exactly one error message and returned to the caller.
pub fn register_mmc<C: ClockQuery, M: BootMediaDriver>(
    clocks: &C,
    driver: &mut M,
) -> Result<(), StorageInitError> {
    let Some(config) = emmc_interface_config(clocks) else {
        log::error!("could not initialize MMC, uSDHC3 clock is not running");
        return Err(StorageInitError::ClockUnavailable);
    };
    driver.initialize(&config).map_err(|status| {
        log::error!("could not initialize MMC ({})", status);
        StorageInitError::Driver(status)
    })
}

/// Route and clock the uSDHC3 controller, then register it with the boot media driver.
pub fn init_mmc<B: RegisterBus, M: BootMediaDriver>(
    bus: &mut B,
    driver: &mut M,
) -> Result<(), StorageInitError> {
    apply_pads(bus, &pads::USDHC3_EMMC);
    configure_clock(bus, &clocks::USDHC3);
    let clocks = Clocks::new_from_regs(bus);
    register_mmc(&clocks, driver)
}

/// Route the SD3 and SAI1 pads to the GPMI NAND controller and clock it.
pub fn setup_gpmi_nand<B: RegisterBus>(bus: &mut B) -> Hertz {
    apply_pads(bus, &pads::GPMI_NAND);
    configure_clock(bus, &clocks::NAND)
}

pub fn init_storage<B: RegisterBus, M: BootMediaDriver>(
    bus: &mut B,
    media: BootMedia,
    driver: &mut M,
) -> Result<(), StorageInitError> {
    match media {
        BootMedia::Emmc => init_mmc(bus, driver),
        BootMedia::Nand => {
            setup_gpmi_nand(bus);
            Ok(())
        }
    }
}

/// The eMMC is soldered on the module, so it is always present.
pub const fn mmc_card_present() -> bool {
    true
}

#[cfg(test)]
pub(crate) mod test_driver {
    use super::*;

    /// Boot media driver which returns a fixed status and records the configuration.
    pub struct FixedStatusDriver {
        pub status: Result<(), NonZeroI32>,
        pub config: Option<StorageInterfaceConfig>,
        pub calls: usize,
    }

    impl FixedStatusDriver {
        pub const fn ok() -> Self {
            Self {
                status: Ok(()),
                config: None,
                calls: 0,
            }
        }

        pub const fn failing(status: i32) -> Self {
            Self {
                status: match NonZeroI32::new(status) {
                    Some(status) => Err(status),
                    None => Ok(()),
                },
                config: None,
                calls: 0,
            }
        }
    }

    impl BootMediaDriver for FixedStatusDriver {
        fn initialize(&mut self, config: &StorageInterfaceConfig) -> Result<(), NonZeroI32> {
            self.config = Some(*config);
            self.calls += 1;
            self.status
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_driver::FixedStatusDriver;
    use super::*;
    use crate::test_util::{capture_logs, take_logs};
    use imx7::ccm;
    use imx7_hal::{iomux::pads as soc_pads, sim::TraceBus};

    struct FixedClocks(Option<Hertz>);

    impl ClockQuery for FixedClocks {
        fn clock_rate(&self, root: ClockRoot) -> Option<Hertz> {
            match root {
                ClockRoot::Usdhc3 => self.0,
                _ => None,
            }
        }
    }

    #[test]
    fn test_card_always_present() {
        assert!(mmc_card_present());
        assert!(mmc_card_present());
    }

    #[test]
    fn test_driver_failure_logged_once() {
        capture_logs();
        let mut driver = FixedStatusDriver::failing(-19);
        let result = register_mmc(&FixedClocks(Some(Hertz::from_raw(196_000_000))), &mut driver);
        assert_eq!(
            result,
            Err(StorageInitError::Driver(NonZeroI32::new(-19).unwrap()))
        );
        let logs = take_logs();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].starts_with("ERROR"));
        assert!(logs[0].contains("-19"));
        assert_eq!(driver.calls, 1);
    }

    #[test]
    fn test_config_resolved_from_clock_query() {
        let mut driver = FixedStatusDriver::ok();
        let clk = Hertz::from_raw(98_000_000);
        register_mmc(&FixedClocks(Some(clk)), &mut driver).unwrap();
        assert_eq!(
            driver.config,
            Some(StorageInterfaceConfig {
                base_addr: USDHC3_BASE_ADDR,
                clock: clk,
                max_bus_width: BusWidth::Eight,
            })
        );
    }

    #[test]
    fn test_missing_clock() {
        capture_logs();
        let mut driver = FixedStatusDriver::ok();
        assert_eq!(
            register_mmc(&FixedClocks(None), &mut driver),
            Err(StorageInitError::ClockUnavailable)
        );
        assert_eq!(driver.calls, 0);
        assert_eq!(take_logs().len(), 1);
    }

    #[test]
    fn test_init_mmc_pads_before_clock() {
        let mut bus = TraceBus::new();
        let mut driver = FixedStatusDriver::ok();
        init_mmc(&mut bus, &mut driver).unwrap();
        let log = bus.log();
        let last_pad = log
            .rposition(|a| a.is_write_to(soc_pads::SD3_STROBE.pad_reg()))
            .unwrap();
        let gate_on = log
            .rposition(|a| a.is_write_to(ccm::ccgr(ccm::GateIndex::USDHC3)))
            .unwrap();
        assert!(last_pad < gate_on);
        assert_eq!(
            driver.config.map(|cfg| cfg.clock),
            Some(Hertz::from_raw(196_000_000))
        );
    }

    #[test]
    fn test_nand_setup() {
        let mut bus = TraceBus::new();
        let mut driver = FixedStatusDriver::ok();
        init_storage(&mut bus, BootMedia::Nand, &mut driver).unwrap();
        assert_eq!(driver.calls, 0);
        let log = bus.log();
        assert_eq!(
            log.writes_to(soc_pads::SD3_CLK.mux_reg()),
            [soc_pads::NAND_ALT.value() as u32]
        );
        assert_eq!(
            log.writes_to(soc_pads::SAI1_TX_DATA.pad_reg()),
            [pads::NAND_PAD_READY0_CTRL.raw_value()]
        );
        assert_eq!(
            Clocks::new_from_regs(&mut bus).clock_rate(ClockRoot::Nand),
            Some(Hertz::from_raw(125_000_000))
        );
    }
}
