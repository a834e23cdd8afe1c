//! Board-level register setup which runs before the console is available.
use imx7::{RegisterBus, iomuxc::gpr};
use imx7_hal::iomux::apply_pads;

use crate::pads;

/// Board-specific signal steering.
pub const GPR1_VALUE: u32 = 0x4F40_0005;
/// DDR PHY wake-up and DFI reset release.
pub const GPR8_VALUE: u32 = 0x0000_0178;

pub fn gpr_init<B: RegisterBus>(bus: &mut B) {
    bus.write(gpr(1), GPR1_VALUE);
    bus.write(gpr(8), GPR8_VALUE);
}

/// Early board hook. Routes the console UART.
pub fn early_init_f<B: RegisterBus>(bus: &mut B) {
    apply_pads(bus, &pads::UART1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use imx7_hal::sim::TraceBus;

    #[test]
    fn test_gpr_values() {
        let mut bus = TraceBus::new();
        gpr_init(&mut bus);
        assert_eq!(
            bus.log().writes(),
            [(gpr(1), 0x4F40_0005), (gpr(8), 0x0000_0178)]
        );
    }

    #[test]
    fn test_early_init_routes_uart() {
        let mut bus = TraceBus::new();
        early_init_f(&mut bus);
        let log = bus.log();
        assert_eq!(log.writes().len(), 5);
        assert_eq!(
            log.writes_to(imx7_hal::iomux::pads::UART1_TX_DATA.pad_reg()),
            [pads::UART_PAD_CTRL.raw_value()]
        );
    }
}
