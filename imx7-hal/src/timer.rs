//! # System counter
//!
//! The system counter is a free-running 56-bit counter clocked with 8 MHz. After
//! [init_system_counter], it can be used for blocking delays with [SystemCounterDelay].
use imx7::{
    RegisterBus,
    sysctr::{self, CounterControl},
};

use crate::time::Hertz;

pub const SYSTEM_COUNTER_CLOCK: Hertz = Hertz::from_raw(sysctr::SYSCTR_FREQ_HZ);

/// Start the system counter with the base frequency. The counter halts on debug entry.
pub fn init_system_counter<B: RegisterBus>(bus: &mut B) {
    bus.write(
        sysctr::CNTCR,
        CounterControl::builder()
            .with_fcr0(true)
            .with_hdbg(true)
            .with_enable(true)
            .build()
            .raw_value(),
    );
}

/// Blocking delay provider based on the system counter.
pub struct SystemCounterDelay<B> {
    bus: B,
}

impl<B: RegisterBus> SystemCounterDelay<B> {
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Read the 64 bit counter value.
    ///
    /// The upper word is read twice to detect a carry between the two reads of the lower and
    /// upper word.
    pub fn read_counter(&mut self) -> u64 {
        loop {
            let upper = self.bus.read(sysctr::CNTCV_HI);
            let lower = self.bus.read(sysctr::CNTCV_LO);
            if self.bus.read(sysctr::CNTCV_HI) == upper {
                return ((upper as u64) << 32) | lower as u64;
            }
        }
    }

    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: RegisterBus> embedded_hal::delay::DelayNs for SystemCounterDelay<B> {
    fn delay_ns(&mut self, ns: u32) {
        let end_of_delay = self.read_counter()
            + ((ns as u64) * SYSTEM_COUNTER_CLOCK.raw() as u64).div_ceil(1_000_000_000);
        while self.read_counter() < end_of_delay {}
    }
}
