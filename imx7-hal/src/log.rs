//! # Simple logging providers
//!
//! The early bring-up runs on a single core with interrupts disabled, so the logger does not
//! need any locking. Until a logger is installed, all log calls are no-ops.

use core::sync::atomic::AtomicBool;

static LOGGER_INIT_DONE: AtomicBool = AtomicBool::new(false);

/// Blocking UART logger.
pub mod uart_blocking {
    use super::*;
    use core::cell::UnsafeCell;
    use embedded_io::Write as _;

    use imx7::Mmio;
    use log::{LevelFilter, Log, set_logger, set_max_level};

    use crate::uart::Uart;

    pub struct UartLoggerUnsafeSingleThread {
        uart: UnsafeCell<Option<Uart<Mmio>>>,
    }

    unsafe impl Send for UartLoggerUnsafeSingleThread {}
    unsafe impl Sync for UartLoggerUnsafeSingleThread {}

    static UART_LOGGER_UNSAFE_SINGLE_THREAD: UartLoggerUnsafeSingleThread =
        UartLoggerUnsafeSingleThread {
            uart: UnsafeCell::new(None),
        };

    /// Initialize the logger with a blocking UART instance which does not use locks.
    ///
    /// Output lines have the format `LEVEL - message` and are terminated with `\r\n`.
    ///
    /// # Safety
    ///
    /// This is a blocking logger which performs a write WITHOUT a critical section. It must only
    /// be used on a single core with interrupts disabled.
    pub unsafe fn init_unsafe_single_core(uart: Uart<Mmio>, level: LevelFilter) {
        if LOGGER_INIT_DONE.swap(true, core::sync::atomic::Ordering::Relaxed) {
            return;
        }
        let opt_uart = unsafe { &mut *UART_LOGGER_UNSAFE_SINGLE_THREAD.uart.get() };
        opt_uart.replace(uart);

        // Only fails if another logger is already installed, which then keeps receiving the
        // output.
        let _ = set_logger(&UART_LOGGER_UNSAFE_SINGLE_THREAD);
        set_max_level(level);
    }

    impl log::Log for UartLoggerUnsafeSingleThread {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            let uart_mut = unsafe { &mut *self.uart.get() }.as_mut();
            if let Some(uart) = uart_mut {
                let _ = writeln!(uart, "{} - {}\r", record.level(), record.args());
            }
        }

        fn flush(&self) {
            let uart_mut = unsafe { &mut *self.uart.get() }.as_mut();
            if let Some(uart) = uart_mut {
                let _ = uart.flush();
            }
        }
    }

    /// Flush the logger. Used before control is transferred to the next stage.
    pub fn flush() {
        UART_LOGGER_UNSAFE_SINGLE_THREAD.flush();
    }
}
