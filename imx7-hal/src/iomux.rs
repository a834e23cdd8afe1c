//! # Pad multiplexing and electrical configuration
//!
//! A [Pad] couples a [MuxSelector], which routes an internal signal to a physical pin, with the
//! [PadControl] word describing the electrical characteristics of that pin. Pad groups are
//! applied with [apply_pads] before the owning peripheral is clocked.
use arbitrary_int::u3;
pub use imx7::iomuxc::regs::{DriveStrength, MuxControl, PadControl, PullSelect, SlewRate};
use imx7::{Register, RegisterBus, iomuxc::iomuxc_reg};

/// Daisy chain input select for pads which share an input path with other pads.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InputSelect {
    pub reg: Register,
    pub value: u32,
}

/// Signal routing of one pad.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MuxSelector {
    mux_reg: Register,
    pad_reg: Register,
    mode: u3,
    sion: bool,
    input_select: Option<InputSelect>,
}

impl MuxSelector {
    /// Create a mux selector from the IOMUXC offsets of the pad.
    pub const fn new(mux_offset: usize, pad_offset: usize, mode: u3) -> Self {
        Self {
            mux_reg: iomuxc_reg(mux_offset),
            pad_reg: iomuxc_reg(pad_offset),
            mode,
            sion: false,
            input_select: None,
        }
    }

    pub const fn with_input_select(mut self, offset: usize, value: u32) -> Self {
        self.input_select = Some(InputSelect {
            reg: iomuxc_reg(offset),
            value,
        });
        self
    }

    pub const fn with_sion(mut self) -> Self {
        self.sion = true;
        self
    }

    /// The same pad routed to another alternate function.
    pub const fn with_mode(mut self, mode: u3) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub const fn mux_reg(&self) -> Register {
        self.mux_reg
    }

    #[inline]
    pub const fn pad_reg(&self) -> Register {
        self.pad_reg
    }

    #[inline]
    pub const fn mode(&self) -> u3 {
        self.mode
    }

    #[inline]
    pub const fn input_select(&self) -> Option<InputSelect> {
        self.input_select
    }

    #[inline]
    pub const fn mux_control(&self) -> MuxControl {
        MuxControl::builder()
            .with_sion(self.sion)
            .with_mux_mode(self.mode)
            .build()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pad {
    pub mux: MuxSelector,
    pub ctrl: PadControl,
}

impl Pad {
    pub const fn new(mux: MuxSelector, ctrl: PadControl) -> Self {
        Self { mux, ctrl }
    }
}

/// Apply a pad group.
///
/// For each pad in declared order, this writes the mux control register, the daisy chain input
/// select if the pad has one, and then the pad control register.
pub fn apply_pads<B: RegisterBus>(bus: &mut B, pads: &[Pad]) {
    for pad in pads {
        bus.write(pad.mux.mux_reg, pad.mux.mux_control().raw_value());
        if let Some(input_select) = pad.mux.input_select {
            bus.write(input_select.reg, input_select.value);
        }
        bus.write(pad.mux.pad_reg, pad.ctrl.raw_value());
    }
}

/// SoC pad definitions for the pads used during early bring-up.
///
/// The selectors use the ALT mode of the primary function. NAND functions are reached with
/// [MuxSelector::with_mode] and [NAND_ALT].
pub mod pads {
    use super::*;

    pub const ALT0: u3 = u3::new(0);
    pub const ALT1: u3 = u3::new(1);
    pub const NAND_ALT: u3 = ALT1;

    pub const UART1_RX_DATA: MuxSelector =
        MuxSelector::new(0x128, 0x398, ALT0).with_input_select(0x6F4, 0);
    pub const UART1_TX_DATA: MuxSelector = MuxSelector::new(0x12C, 0x39C, ALT0);

    pub const SAI1_RX_DATA: MuxSelector = MuxSelector::new(0x1AC, 0x41C, ALT0);
    pub const SAI1_TX_BCLK: MuxSelector = MuxSelector::new(0x1B0, 0x420, ALT0);
    pub const SAI1_TX_DATA: MuxSelector = MuxSelector::new(0x1B8, 0x428, ALT0);

    pub const SD3_CLK: MuxSelector = MuxSelector::new(0x1CC, 0x43C, ALT0);
    pub const SD3_CMD: MuxSelector = MuxSelector::new(0x1D0, 0x440, ALT0);
    pub const SD3_DATA0: MuxSelector = MuxSelector::new(0x1D4, 0x444, ALT0);
    pub const SD3_DATA1: MuxSelector = MuxSelector::new(0x1D8, 0x448, ALT0);
    pub const SD3_DATA2: MuxSelector = MuxSelector::new(0x1DC, 0x44C, ALT0);
    pub const SD3_DATA3: MuxSelector = MuxSelector::new(0x1E0, 0x450, ALT0);
    pub const SD3_DATA4: MuxSelector = MuxSelector::new(0x1E4, 0x454, ALT0);
    pub const SD3_DATA5: MuxSelector = MuxSelector::new(0x1E8, 0x458, ALT0);
    pub const SD3_DATA6: MuxSelector = MuxSelector::new(0x1EC, 0x45C, ALT0);
    pub const SD3_DATA7: MuxSelector = MuxSelector::new(0x1F0, 0x460, ALT0);
    pub const SD3_STROBE: MuxSelector = MuxSelector::new(0x1F4, 0x464, ALT0);
    pub const SD3_RESET_B: MuxSelector = MuxSelector::new(0x1F8, 0x468, ALT0);
}
