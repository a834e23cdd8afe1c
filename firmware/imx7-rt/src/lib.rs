//! Rust bare metal run-time support for the SPL stage on the NXP i.MX 7 SoCs
//!
//! The start-up code puts the boot core into supervisor mode with interrupts masked, disables
//! the MMU and the data cache, sets up the stack in OCRAM, zeroes the `.early_bss` section and
//! calls the `kmain` function which must be provided by the application.
//!
//! The `.bss` section is linked into DRAM and is only backed by memory once the DRAM is
//! configured. It is zeroed explicitly with [zero_dram_bss]. Zero-initialized state which is
//! needed before that point must be placed into `.early_bss` in OCRAM. The linker script already
//! does this for the `log` facade and the UART logger.
#![no_std]

#[cfg(feature = "rt")]
pub mod rt;

unsafe extern "C" {
    static mut __sbss: u32;
    static mut __ebss: u32;
}

/// Zero the `.bss` section located in DRAM.
///
/// # Safety
///
/// The DRAM must be configured. No static located in `.bss` may have been accessed before.
pub unsafe fn zero_dram_bss() {
    let mut ptr = core::ptr::addr_of_mut!(__sbss);
    let end = core::ptr::addr_of_mut!(__ebss);
    while ptr < end {
        unsafe {
            core::ptr::write_volatile(ptr, 0);
            ptr = ptr.add(1);
        }
    }
}
