//! Pad groups of the board.
use imx7_hal::iomux::{
    DriveStrength, MuxSelector, Pad, PadControl, PullSelect, SlewRate,
    pads::{self, NAND_ALT},
};

pub const UART_PAD_CTRL: PadControl = PadControl::builder()
    .with_pull_select(PullSelect::PullUp100k)
    .with_pue(false)
    .with_hys(true)
    .with_slew_rate(SlewRate::Fast)
    .with_drive_strength(DriveStrength::_49Ohm)
    .build();

pub const USDHC_PAD_CTRL: PadControl = PadControl::builder()
    .with_pull_select(PullSelect::PullUp47k)
    .with_pue(true)
    .with_hys(true)
    .with_slew_rate(SlewRate::Slow)
    .with_drive_strength(DriveStrength::_32Ohm)
    .build();

pub const NAND_PAD_CTRL: PadControl = PadControl::builder()
    .with_pull_select(PullSelect::PullDown100k)
    .with_pue(false)
    .with_hys(true)
    .with_slew_rate(SlewRate::Slow)
    .with_drive_strength(DriveStrength::_49Ohm)
    .build();

pub const NAND_PAD_READY0_CTRL: PadControl = PadControl::builder()
    .with_pull_select(PullSelect::PullUp5k)
    .with_pue(false)
    .with_hys(false)
    .with_slew_rate(SlewRate::Fast)
    .with_drive_strength(DriveStrength::_32Ohm)
    .build();

static_assertions::const_assert_eq!(USDHC_PAD_CTRL.raw_value(), 0x5F);

pub const UART1: [Pad; 2] = [
    Pad::new(pads::UART1_TX_DATA, UART_PAD_CTRL),
    Pad::new(pads::UART1_RX_DATA, UART_PAD_CTRL),
];

pub const USDHC3_EMMC: [Pad; 11] = [
    Pad::new(pads::SD3_CLK, USDHC_PAD_CTRL),
    Pad::new(pads::SD3_CMD, USDHC_PAD_CTRL),
    Pad::new(pads::SD3_DATA0, USDHC_PAD_CTRL),
    Pad::new(pads::SD3_DATA1, USDHC_PAD_CTRL),
    Pad::new(pads::SD3_DATA2, USDHC_PAD_CTRL),
    Pad::new(pads::SD3_DATA3, USDHC_PAD_CTRL),
    Pad::new(pads::SD3_DATA4, USDHC_PAD_CTRL),
    Pad::new(pads::SD3_DATA5, USDHC_PAD_CTRL),
    Pad::new(pads::SD3_DATA6, USDHC_PAD_CTRL),
    Pad::new(pads::SD3_DATA7, USDHC_PAD_CTRL),
    Pad::new(pads::SD3_STROBE, USDHC_PAD_CTRL),
];

const fn nand(sel: MuxSelector) -> MuxSelector {
    sel.with_mode(NAND_ALT)
}

/// GPMI NAND signals on the SD3 and SAI1 pads.
pub const GPMI_NAND: [Pad; 15] = [
    // NAND_CLE
    Pad::new(nand(pads::SD3_CLK), NAND_PAD_CTRL),
    // NAND_ALE
    Pad::new(nand(pads::SD3_CMD), NAND_PAD_CTRL),
    Pad::new(nand(pads::SD3_DATA0), NAND_PAD_CTRL),
    Pad::new(nand(pads::SD3_DATA1), NAND_PAD_CTRL),
    Pad::new(nand(pads::SD3_DATA2), NAND_PAD_CTRL),
    Pad::new(nand(pads::SD3_DATA3), NAND_PAD_CTRL),
    Pad::new(nand(pads::SD3_DATA4), NAND_PAD_CTRL),
    Pad::new(nand(pads::SD3_DATA5), NAND_PAD_CTRL),
    Pad::new(nand(pads::SD3_DATA6), NAND_PAD_CTRL),
    Pad::new(nand(pads::SD3_DATA7), NAND_PAD_CTRL),
    // NAND_RE_B
    Pad::new(nand(pads::SD3_STROBE), NAND_PAD_CTRL),
    // NAND_WE_B
    Pad::new(nand(pads::SD3_RESET_B), NAND_PAD_CTRL),
    // NAND_READY_B
    Pad::new(nand(pads::SAI1_TX_DATA), NAND_PAD_READY0_CTRL),
    // NAND_CE0_B
    Pad::new(nand(pads::SAI1_TX_BCLK), NAND_PAD_CTRL),
    // NAND_CE1_B
    Pad::new(nand(pads::SAI1_RX_DATA), NAND_PAD_CTRL),
];
