//! # UART driver
//!
//! Minimal polled transmit driver for the console. All waits are bounded. If the transmitter
//! does not become ready in time, bytes are dropped instead of blocking the caller, so a missing
//! or stalled console never stops the bring-up.
use core::convert::Infallible;

use arbitrary_int::u6;
use imx7::{
    RegisterBus,
    uart::{
        Control1, Control2, Control3, FifoControl, RefDivider, Status2, Test, UartRegisters,
        offsets,
    },
};

use crate::time::Hertz;

/// Reference divider applied to the module clock.
pub const REF_DIVIDER: RefDivider = RefDivider::Div2;
/// Fixed binary rate increment. With 15, the baud rate is the reference frequency divided by
/// UBMR + 1.
pub const UBIR: u32 = 0xF;

pub const TX_MAX_POLLS: u32 = 100_000;
pub const RESET_MAX_POLLS: u32 = 1_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BaudError {
    #[error("baud rate must not be zero")]
    ZeroBaud,
    #[error("baud rate can not be generated from the module clock")]
    OutOfRange,
}

/// Binary rate multiplier setting for a given module clock and baud rate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClockConfig {
    ubmr: u16,
}

impl ClockConfig {
    #[inline]
    pub const fn new(ubmr: u16) -> Self {
        Self { ubmr }
    }

    /// Calculate the rate multiplier which comes closest to the target baud rate.
    pub fn new_autocalc(module_clk: Hertz, target_baud: u32) -> Result<Self, BaudError> {
        if target_baud == 0 {
            return Err(BaudError::ZeroBaud);
        }
        let ref_clk = Self::ref_clk(module_clk);
        let divisor = (ref_clk + target_baud / 2) / target_baud;
        if divisor == 0 || divisor > u16::MAX as u32 + 1 {
            return Err(BaudError::OutOfRange);
        }
        Ok(Self {
            ubmr: (divisor - 1) as u16,
        })
    }

    #[inline]
    const fn ref_clk(module_clk: Hertz) -> u32 {
        // The divider is a constant valid setting.
        match REF_DIVIDER.divisor() {
            Some(div) => module_clk.raw() / div,
            None => module_clk.raw(),
        }
    }

    #[inline]
    pub const fn ubmr(&self) -> u16 {
        self.ubmr
    }

    /// Resulting baud rate for the given module clock.
    pub fn actual_baud(&self, module_clk: Hertz) -> f64 {
        Self::ref_clk(module_clk) as f64 / (self.ubmr as f64 + 1.0)
    }
}

pub struct Uart<B> {
    bus: B,
    regs: UartRegisters,
}

impl<B: RegisterBus> Uart<B> {
    /// Reset and configure the UART for 8N1 transmit and receive operation.
    ///
    /// The pads and the module clock must be configured before calling this.
    pub fn new(bus: B, regs: UartRegisters, clk_cfg: ClockConfig) -> Self {
        let mut uart = Self { bus, regs };
        uart.init(clk_cfg);
        uart
    }

    fn init(&mut self, clk_cfg: ClockConfig) {
        let regs = self.regs;
        self.bus.write(regs.reg(offsets::UCR1), 0);
        self.bus.write(regs.reg(offsets::UCR2), 0);
        for _ in 0..RESET_MAX_POLLS {
            if Control2::new_with_raw_value(self.bus.read(regs.reg(offsets::UCR2))).srst_n() {
                break;
            }
        }
        self.bus.write(
            regs.reg(offsets::UCR3),
            Control3::builder().with_rxdmux_sel(true).build().raw_value(),
        );
        self.bus.write(regs.reg(offsets::UCR4), 0);
        self.bus.write(
            regs.reg(offsets::UFCR),
            FifoControl::builder()
                .with_tx_trigger(u6::new(2))
                .with_ref_divider(REF_DIVIDER)
                .with_rx_trigger(u6::new(1))
                .build()
                .raw_value(),
        );
        self.bus.write(regs.reg(offsets::UBIR), UBIR);
        self.bus.write(regs.reg(offsets::UBMR), clk_cfg.ubmr() as u32);
        self.bus.write(
            regs.reg(offsets::UCR2),
            Control2::builder()
                .with_irts(true)
                .with_stpb(false)
                .with_word_size_8(true)
                .with_tx_enable(true)
                .with_rx_enable(true)
                .with_srst_n(true)
                .build()
                .raw_value(),
        );
        self.bus.write(
            regs.reg(offsets::UCR1),
            Control1::builder().with_uart_enable(true).build().raw_value(),
        );
    }

    #[inline]
    fn tx_full(&mut self) -> bool {
        Test::new_with_raw_value(self.bus.read(self.regs.reg(offsets::UTS))).tx_full()
    }

    /// Write a byte into the transmit FIFO.
    ///
    /// Returns [false] if the FIFO did not drain in time and the byte was dropped.
    pub fn write_byte(&mut self, byte: u8) -> bool {
        for _ in 0..TX_MAX_POLLS {
            if !self.tx_full() {
                self.bus.write(self.regs.reg(offsets::UTXD), byte as u32);
                return true;
            }
        }
        false
    }

    /// Wait until all bytes have been shifted out, with a bounded number of status reads.
    pub fn flush_tx(&mut self) -> bool {
        for _ in 0..TX_MAX_POLLS {
            if Status2::new_with_raw_value(self.bus.read(self.regs.reg(offsets::USR2))).tx_done() {
                return true;
            }
        }
        false
    }

    pub fn release(self) -> B {
        self.bus
    }
}

impl<B> embedded_io::ErrorType for Uart<B> {
    type Error = Infallible;
}

impl<B: RegisterBus> embedded_io::Write for Uart<B> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for byte in buf {
            if !self.write_byte(*byte) {
                // Console is stalled, drop the rest.
                break;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flush_tx();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Access, TraceBus};
    use approx::abs_diff_eq;
    use embedded_io::Write as _;

    const MODULE_CLK: Hertz = Hertz::from_raw(24_000_000);

    #[test]
    fn test_autocalc_115200() {
        let cfg = ClockConfig::new_autocalc(MODULE_CLK, 115200).unwrap();
        assert_eq!(cfg.ubmr(), 103);
        assert!(abs_diff_eq!(cfg.actual_baud(MODULE_CLK), 115384.62, epsilon = 0.01));
    }

    #[test]
    fn test_autocalc_9600() {
        let cfg = ClockConfig::new_autocalc(MODULE_CLK, 9600).unwrap();
        assert_eq!(cfg.ubmr(), 1249);
        assert!(abs_diff_eq!(cfg.actual_baud(MODULE_CLK), 9600.0, epsilon = 0.01));
    }

    #[test]
    fn test_autocalc_errors() {
        assert_eq!(
            ClockConfig::new_autocalc(MODULE_CLK, 0),
            Err(BaudError::ZeroBaud)
        );
        assert_eq!(
            ClockConfig::new_autocalc(MODULE_CLK, 50_000_000),
            Err(BaudError::OutOfRange)
        );
    }

    fn uart_with_bus() -> Uart<TraceBus> {
        let regs = UartRegisters::uart1();
        let mut bus = TraceBus::new();
        bus.pin(regs.reg(offsets::UCR2), 1);
        Uart::new(bus, regs, ClockConfig::new(103))
    }

    #[test]
    fn test_init_sequence() {
        let uart = uart_with_bus();
        let regs = UartRegisters::uart1();
        let log = uart.release().log();
        assert_eq!(log.writes_to(regs.reg(offsets::UCR2)), [0x0, 0x4027]);
        assert_eq!(log.writes_to(regs.reg(offsets::UFCR)), [(2 << 10) | (4 << 7) | 1]);
        assert_eq!(log.writes_to(regs.reg(offsets::UBIR)), [0xF]);
        assert_eq!(log.writes_to(regs.reg(offsets::UBMR)), [103]);
        assert_eq!(log.writes().last(), Some(&(regs.reg(offsets::UCR1), 0x1)));
    }

    #[test]
    fn test_write_bytes() {
        let mut uart = uart_with_bus();
        let regs = UartRegisters::uart1();
        uart.write_all(b"ok").unwrap();
        let log = uart.release().log();
        assert_eq!(
            log.writes_to(regs.reg(offsets::UTXD)),
            [b'o' as u32, b'k' as u32]
        );
    }

    #[test]
    fn test_stalled_transmitter_drops_bytes() {
        let regs = UartRegisters::uart1();
        let mut bus = TraceBus::new();
        bus.pin(regs.reg(offsets::UCR2), 1).pin(regs.reg(offsets::UTS), 1 << 4);
        let mut uart = Uart::new(bus, regs, ClockConfig::new(103));
        assert_eq!(uart.write(b"lost").unwrap(), 4);
        let log = uart.release().log();
        assert!(log.writes_to(regs.reg(offsets::UTXD)).is_empty());
        let reads = log
            .accesses()
            .iter()
            .filter(|a| matches!(a, Access::Read(r, _) if *r == regs.reg(offsets::UTS)))
            .count();
        assert_eq!(reads, TX_MAX_POLLS as usize);
    }
}
