//! SPL for the Toradex Colibri iMX7 module.
//!
//! Runs from OCRAM. It brings up the console and the DDR3 memory, initializes the selected boot
//! media and then jumps to the next stage which was loaded to [NEXT_STAGE_ADDR].
#![no_std]
#![no_main]

use core::{ffi::c_void, panic::PanicInfo, ptr::NonNull};

use colibri_imx7_bsp::{
    clocks::CONSOLE_BAUD,
    ddr_config::MEMTEST_REGION,
    spl::{Platform, Spl, SplConfig},
};
use cortex_ar::asm::nop;
use imx7::Mmio;
use imx7_hal::{
    ddr::{ZqCalibrationDone, memtest},
    log::uart_blocking,
    time::Hertz,
    timer::SystemCounterDelay,
    uart::{ClockConfig, Uart},
    usdhc::Usdhc,
};
use log::{error, info};

/// Load address of the next stage inside DRAM.
pub const NEXT_STAGE_ADDR: usize = 0x8780_0000;

const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

struct HardwarePlatform;

impl Platform for HardwarePlatform {
    fn console_init(&mut self, uart_clk: Hertz) {
        // Without a console the bring-up continues silently.
        let Ok(clk_cfg) = ClockConfig::new_autocalc(uart_clk, CONSOLE_BAUD) else {
            return;
        };
        let uart = Uart::new(
            unsafe { Mmio::steal() },
            imx7::uart::UartRegisters::uart1(),
            clk_cfg,
        );
        unsafe { uart_blocking::init_unsafe_single_core(uart, LOG_LEVEL) };
    }

    fn verify_dram(&mut self) -> Result<(), memtest::MemTestError> {
        // Safety: The DRAM is configured and nothing is located in the tested range yet.
        let mut dram = unsafe { Mmio::steal() };
        memtest::run_all(&mut dram, &MEMTEST_REGION)
    }

    unsafe fn zero_bss(&mut self) {
        unsafe { imx7_rt::zero_dram_bss() };
    }

    fn jump_to_next_stage(&mut self, board_data: Option<NonNull<c_void>>) -> ! {
        info!("jumping to address {:#010x}", NEXT_STAGE_ADDR);
        uart_blocking::flush();

        cortex_ar::asm::dsb();
        cortex_ar::asm::isb();

        let jump_func: extern "C" fn(*mut c_void) -> ! =
            unsafe { core::mem::transmute(NEXT_STAGE_ADDR) };
        jump_func(board_data.map_or(core::ptr::null_mut(), NonNull::as_ptr))
    }

    fn halt(&mut self) -> ! {
        uart_blocking::flush();
        loop {
            cortex_ar::asm::wfi();
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn kmain() -> ! {
    // Safety: Only the SPL accesses the hardware at this point, and every user of these handles
    // runs sequentially.
    let (bus, delay_bus, training_bus, mmc_bus) =
        unsafe { (Mmio::steal(), Mmio::steal(), Mmio::steal(), Mmio::steal()) };
    let spl = Spl::new(
        bus,
        SystemCounterDelay::new(delay_bus),
        ZqCalibrationDone::new(
            SystemCounterDelay::new(training_bus),
            ZqCalibrationDone::<SystemCounterDelay<Mmio>>::DEFAULT_TIMEOUT_US,
        ),
        Usdhc::new(mmc_bus),
        HardwarePlatform,
    );
    spl.run(&SplConfig::from_features())
}

/// Panic handler
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    error!("Panic: {info:?}");
    loop {
        nop();
    }
}
