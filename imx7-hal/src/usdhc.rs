//! # uSDHC boot media interface
//!
//! The boot media driver which enumerates the device and transfers images belongs to the next
//! stage. This module only provides the interface configuration handed to that driver and a
//! minimal controller driver which resets the host controller and sets the data bus width.
use core::num::NonZeroI32;

use imx7::{
    RegisterBus,
    usdhc::{self, DataTransferWidth, ProtocolControl, SystemControl, offsets},
};

use crate::time::Hertz;

/// Status reported when the controller reset does not complete.
pub const ETIMEDOUT: NonZeroI32 = NonZeroI32::new(-110).unwrap();

pub const RESET_MAX_POLLS: u32 = 10_000;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BusWidth {
    One,
    Four,
    Eight,
}

impl BusWidth {
    pub const fn data_transfer_width(&self) -> DataTransferWidth {
        match self {
            BusWidth::One => DataTransferWidth::OneBit,
            BusWidth::Four => DataTransferWidth::FourBit,
            BusWidth::Eight => DataTransferWidth::EightBit,
        }
    }
}

/// Configuration of the boot media controller instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StorageInterfaceConfig {
    pub base_addr: usize,
    /// Resolved from the clock subsystem at run time.
    pub clock: Hertz,
    pub max_bus_width: BusWidth,
}

/// Boot media driver boundary.
///
/// A successful initialization means the device is ready. Errors carry the driver-defined status
/// code.
pub trait BootMediaDriver {
    fn initialize(&mut self, config: &StorageInterfaceConfig) -> Result<(), NonZeroI32>;
}

/// Register-level uSDHC driver.
pub struct Usdhc<B> {
    bus: B,
}

impl<B: RegisterBus> Usdhc<B> {
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: RegisterBus> BootMediaDriver for Usdhc<B> {
    fn initialize(&mut self, config: &StorageInterfaceConfig) -> Result<(), NonZeroI32> {
        let sys_ctrl = usdhc::reg(config.base_addr, offsets::SYS_CTRL);
        self.bus.modify(sys_ctrl, |val| {
            SystemControl::new_with_raw_value(val)
                .with_reset_all(true)
                .raw_value()
        });
        let mut reset_done = false;
        for _ in 0..RESET_MAX_POLLS {
            if !SystemControl::new_with_raw_value(self.bus.read(sys_ctrl)).reset_all() {
                reset_done = true;
                break;
            }
        }
        if !reset_done {
            return Err(ETIMEDOUT);
        }
        self.bus
            .modify(usdhc::reg(config.base_addr, offsets::PROT_CTRL), |val| {
                ProtocolControl::new_with_raw_value(val)
                    .with_data_transfer_width(config.max_bus_width.data_transfer_width())
                    .raw_value()
            });
        log::debug!(
            "uSDHC at {:#010x} ready, {} Hz",
            config.base_addr,
            config.clock.raw()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TraceBus;

    const CONFIG: StorageInterfaceConfig = StorageInterfaceConfig {
        base_addr: usdhc::USDHC3_BASE_ADDR,
        clock: Hertz::from_raw(196_000_000),
        max_bus_width: BusWidth::Eight,
    };

    #[test]
    fn test_init_sets_bus_width() {
        let mut bus = TraceBus::new();
        bus.pin(usdhc::reg(usdhc::USDHC3_BASE_ADDR, offsets::SYS_CTRL), 0);
        let mut driver = Usdhc::new(bus);
        assert_eq!(driver.initialize(&CONFIG), Ok(()));
        let log = driver.release().log();
        assert_eq!(
            log.writes_to(usdhc::reg(usdhc::USDHC3_BASE_ADDR, offsets::SYS_CTRL)),
            [1 << 24]
        );
        assert_eq!(
            log.writes_to(usdhc::reg(usdhc::USDHC3_BASE_ADDR, offsets::PROT_CTRL)),
            [0b10 << 1]
        );
    }

    #[test]
    fn test_reset_timeout() {
        let mut driver = Usdhc::new(TraceBus::new());
        assert_eq!(driver.initialize(&CONFIG), Err(ETIMEDOUT));
        let log = driver.release().log();
        assert!(
            log.writes_to(usdhc::reg(usdhc::USDHC3_BASE_ADDR, offsets::PROT_CTRL))
                .is_empty()
        );
    }
}
