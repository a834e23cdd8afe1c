//! # SoC baseline initialization
//!
//! Establishes the register access rights and the watchdog state expected by everything which
//! runs after the boot ROM.
use imx7::{RegisterBus, aipstz, csu, wdog};

/// Open the AIPS-TZ bridges and the CSU to all bus masters and stop the watchdog power-down
/// counters.
pub fn init_baseline<B: RegisterBus>(bus: &mut B) {
    init_aips(bus);
    init_csu(bus);
    disable_wdog_powerdown(bus);
}

pub fn init_aips<B: RegisterBus>(bus: &mut B) {
    for base in aipstz::AIPS_CONFIG_BASES {
        bus.write(aipstz::mpr(base), aipstz::MPR_ALL_MASTERS_TRUSTED);
        for n in 0..aipstz::OPACR_COUNT {
            bus.write(aipstz::opacr(base, n), aipstz::OPACR_UNRESTRICTED);
        }
    }
}

pub fn init_csu<B: RegisterBus>(bus: &mut B) {
    for n in 0..csu::CSL_COUNT {
        bus.write(csu::csl(n), csu::CSL_ALL_ACCESS);
    }
}

/// The power-down counter resets the SoC 16 seconds after power-on unless it is disabled.
pub fn disable_wdog_powerdown<B: RegisterBus>(bus: &mut B) {
    for base in wdog::WDOG_BASES {
        bus.write(
            wdog::wmcr(base),
            wdog::MiscControl::builder().with_pde(false).build().raw_value(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TraceBus;

    #[test]
    fn test_baseline_writes() {
        let mut bus = TraceBus::new();
        init_baseline(&mut bus);
        let log = bus.log();
        assert_eq!(log.writes().len(), 3 * (1 + aipstz::OPACR_COUNT) + csu::CSL_COUNT + 4);
        assert_eq!(
            log.writes_to(aipstz::mpr(aipstz::AIPS2_CONFIG_BASE_ADDR)),
            [0x7777_7777]
        );
        assert_eq!(log.writes_to(csu::csl(63)), [0x00FF_00FF]);
        for base in wdog::WDOG_BASES {
            assert_eq!(log.writes_to(wdog::wmcr(base)), [0]);
        }
    }
}
