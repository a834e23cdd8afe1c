//! # UART register definitions
use arbitrary_int::u6;

use crate::Register;

pub const UART1_BASE_ADDR: usize = 0x3086_0000;
pub const UART2_BASE_ADDR: usize = 0x3089_0000;
pub const UART3_BASE_ADDR: usize = 0x3088_0000;

pub const FIFO_DEPTH: usize = 32;

/// Register offsets inside a UART block.
pub mod offsets {
    pub const URXD: usize = 0x00;
    pub const UTXD: usize = 0x40;
    pub const UCR1: usize = 0x80;
    pub const UCR2: usize = 0x84;
    pub const UCR3: usize = 0x88;
    pub const UCR4: usize = 0x8C;
    pub const UFCR: usize = 0x90;
    pub const USR1: usize = 0x94;
    pub const USR2: usize = 0x98;
    pub const UBIR: usize = 0xA4;
    pub const UBMR: usize = 0xA8;
    pub const UTS: usize = 0xB4;
}

/// Register block of one UART instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UartRegisters {
    base: usize,
}

impl UartRegisters {
    pub const fn new(base: usize) -> Self {
        Self { base }
    }

    pub const fn uart1() -> Self {
        Self::new(UART1_BASE_ADDR)
    }

    #[inline]
    pub const fn base(&self) -> usize {
        self.base
    }

    #[inline]
    pub const fn reg(&self, offset: usize) -> Register {
        Register::new(self.base + offset)
    }
}

#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct Control1 {
    #[bit(0, rw)]
    uart_enable: bool,
}

#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct Control2 {
    /// Ignore the RTS pin.
    #[bit(14, rw)]
    irts: bool,
    /// Two stop bits when set.
    #[bit(6, rw)]
    stpb: bool,
    /// 8 bit words when set, 7 bit otherwise.
    #[bit(5, rw)]
    word_size_8: bool,
    #[bit(2, rw)]
    tx_enable: bool,
    #[bit(1, rw)]
    rx_enable: bool,
    /// Software reset, active low. Reads back zero while the reset is in progress.
    #[bit(0, rw)]
    srst_n: bool,
}

#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct Control3 {
    /// Must be set for the i.MX 7 UART to operate.
    #[bit(2, rw)]
    rxdmux_sel: bool,
}

/// Reference frequency divider applied to the module clock.
#[bitbybit::bitenum(u3, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum RefDivider {
    Div6 = 0b000,
    Div5 = 0b001,
    Div4 = 0b010,
    Div3 = 0b011,
    Div2 = 0b100,
    Div1 = 0b101,
    Div7 = 0b110,
    Reserved = 0b111,
}

impl RefDivider {
    pub const fn divisor(&self) -> Option<u32> {
        Some(match self {
            RefDivider::Div1 => 1,
            RefDivider::Div2 => 2,
            RefDivider::Div3 => 3,
            RefDivider::Div4 => 4,
            RefDivider::Div5 => 5,
            RefDivider::Div6 => 6,
            RefDivider::Div7 => 7,
            RefDivider::Reserved => return None,
        })
    }
}

#[bitbybit::bitfield(u32, default = 0x0, debug)]
pub struct FifoControl {
    #[bits(10..=15, rw)]
    tx_trigger: u6,
    #[bits(7..=9, rw)]
    ref_divider: RefDivider,
    #[bits(0..=5, rw)]
    rx_trigger: u6,
}

#[bitbybit::bitfield(u32, debug)]
pub struct Status2 {
    /// Transmit complete. The shift register and the FIFO are empty.
    #[bit(3, r)]
    tx_done: bool,
    #[bit(0, r)]
    rx_data_ready: bool,
}

#[bitbybit::bitfield(u32, debug)]
pub struct Test {
    #[bit(6, r)]
    tx_empty: bool,
    #[bit(4, r)]
    tx_full: bool,
}
