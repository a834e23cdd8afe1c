//! Clock root settings of the board.
use imx7_hal::clocks::{ClockRoot, ClockSource, RootSetting};

pub const DRAM: RootSetting = RootSetting::new(ClockRoot::Dram, ClockSource::PllDramMain, 1, 1);
pub const UART1: RootSetting = RootSetting::new(ClockRoot::Uart1, ClockSource::Osc24M, 1, 1);
/// 196 MHz, divided further by the controller for the card clock.
pub const USDHC3: RootSetting =
    RootSetting::new(ClockRoot::Usdhc3, ClockSource::PllSysPfd0_392M, 1, 2);
/// 125 MHz.
pub const NAND: RootSetting = RootSetting::new(ClockRoot::Nand, ClockSource::PllEnet500M, 1, 4);

pub const CONSOLE_BAUD: u32 = 115200;
