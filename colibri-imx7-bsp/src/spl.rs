//! # SPL bring-up sequence
//!
//! [Spl::run] is the terminal procedure of the SPL. It executes the fixed bring-up pipeline:
//!
//!  1. SoC baseline and the DRAM clock.
//!  2. Board signal steering (GPR).
//!  3. Early board hook, which routes the console pads.
//!  4. System counter.
//!  5. Console clock and console. Diagnostics are best-effort from here on.
//!  6. DRAM controller and PHY bring-up, followed by the optional memory test.
//!  7. Zeroing of the DRAM-backed uninitialized data region.
//!  8. Optional storage bring-up, selected by [SplConfig::boot_media].
//!  9. Transfer of control to the next stage.
//!
//! A DRAM failure is fatal: neither the zeroing nor the handoff happen and the platform halts.
//! A storage failure is reported and recorded, but the handoff still happens.
use core::{ffi::c_void, ptr::NonNull};

use embedded_hal::delay::DelayNs;
use imx7::RegisterBus;
use imx7_hal::{
    clocks::configure_clock,
    ddr::{self, DdrInitError, DramReady, TrainingCheck, memtest::MemTestError},
    soc, timer,
    time::Hertz,
    usdhc::BootMediaDriver,
};

use crate::{
    board, clocks, ddr_config,
    storage::{self, BootMedia, StorageInitError},
};

/// Hooks into the execution environment which are not expressed as register accesses.
pub trait Platform {
    /// Install the console logger. The UART pads and clock are configured at this point.
    fn console_init(&mut self, uart_clk: Hertz);

    /// Check the DRAM after it was brought up.
    fn verify_dram(&mut self) -> Result<(), MemTestError>;

    /// Zero the uninitialized data region located in DRAM.
    ///
    /// # Safety
    ///
    /// Must only be called once the DRAM is ready and before anything in that region is used.
    unsafe fn zero_bss(&mut self);

    /// Transfer control to the next stage. Never returns.
    fn jump_to_next_stage(&mut self, board_data: Option<NonNull<c_void>>) -> !;

    /// Stop execution after a fatal error.
    fn halt(&mut self) -> !;
}

/// Selection of the optional pipeline stages.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SplConfig {
    pub boot_media: Option<BootMedia>,
    pub memtest: bool,
    /// Board descriptor passed to the next stage.
    pub board_data: Option<NonNull<c_void>>,
}

impl SplConfig {
    /// Configuration selected by the crate features.
    pub const fn from_features() -> Self {
        Self {
            boot_media: Self::select_boot_media(cfg!(feature = "emmc"), cfg!(feature = "nand")),
            memtest: cfg!(feature = "memtest"),
            board_data: None,
        }
    }

    /// Boot media for the enabled module variants. NAND takes precedence over eMMC.
    pub const fn select_boot_media(emmc: bool, nand: bool) -> Option<BootMedia> {
        match (emmc, nand) {
            (_, true) => Some(BootMedia::Nand),
            (true, false) => Some(BootMedia::Emmc),
            (false, false) => None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BringUpError {
    #[error("DRAM bring-up failed: {0}")]
    Dram(#[from] DdrInitError),
    #[error("DRAM memory test failed: {0}")]
    MemTest(#[from] MemTestError),
}

/// Result of a completed bring-up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BringUp {
    pub dram: DramReady,
    /// [None] if no boot media was selected.
    pub storage: Option<Result<(), StorageInitError>>,
}

pub struct Spl<B, D, T, M, P> {
    pub bus: B,
    pub delay: D,
    pub training: T,
    pub mmc: M,
    pub platform: P,
}

impl<B, D, T, M, P> Spl<B, D, T, M, P>
where
    B: RegisterBus,
    D: DelayNs,
    T: TrainingCheck,
    M: BootMediaDriver,
    P: Platform,
{
    pub const fn new(bus: B, delay: D, training: T, mmc: M, platform: P) -> Self {
        Self {
            bus,
            delay,
            training,
            mmc,
            platform,
        }
    }

    /// Run every bring-up step up to, but excluding, the handoff.
    pub fn bring_up(&mut self, config: &SplConfig) -> Result<BringUp, BringUpError> {
        soc::init_baseline(&mut self.bus);
        configure_clock(&mut self.bus, &clocks::DRAM);
        board::gpr_init(&mut self.bus);
        board::early_init_f(&mut self.bus);
        timer::init_system_counter(&mut self.bus);
        // The console pads are routed by the early board hook.
        let uart_clk = configure_clock(&mut self.bus, &clocks::UART1);
        self.platform.console_init(uart_clk);
        log::info!("Colibri iMX7 SPL");

        let dram = ddr::configure_ddr(
            &mut self.bus,
            &mut self.delay,
            &mut self.training,
            &ddr_config::DRAM_CONFIG,
        )?;
        log::info!(
            "DRAM ready, calibration code {:#010x} after {} attempt(s)",
            dram.calibration.code,
            dram.attempts
        );
        if config.memtest {
            self.platform.verify_dram()?;
            log::info!("DRAM memory test passed");
        }

        // Safety: The DRAM is ready and nothing in the region was used yet.
        unsafe { self.platform.zero_bss() };

        let storage = config
            .boot_media
            .map(|media| storage::init_storage(&mut self.bus, media, &mut self.mmc));
        Ok(BringUp { dram, storage })
    }

    /// Bring up the board and hand over to the next stage. Halts on a fatal error.
    pub fn run(mut self, config: &SplConfig) -> ! {
        match self.bring_up(config) {
            Ok(_) => self.platform.jump_to_next_stage(config.board_data),
            Err(e) => {
                log::error!("{}", e);
                self.platform.halt()
            }
        }
    }
}
