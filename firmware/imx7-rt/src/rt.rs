//! Start-up code for the i.MX 7 SPL
use cortex_ar::register::{Cpsr, cpsr::ProcessorMode};

// Start-up code for Armv7-A
//
// Only the boot core runs this code. `kmain` is called in supervisor mode.
core::arch::global_asm!(
    r#"
.section .text.startup
.align 0

.global _start
.type _start, %function
_start:
    /* Supervisor mode, IRQ and FIQ masked */
    mrs	r0, cpsr
    mvn	r1, #0x1f
    and	r0, r1, r0
    orr	r0, r0, {svc_mode}
    msr	cpsr, r0

    /* Invalidate TLBs, icache and branch predictor */
    mov	r0, #0
    mcr	p15, 0, r0, c8, c7, 0
    mcr	p15, 0, r0, c7, c5, 0
    mcr	p15, 0, r0, c7, c5, 6

    /* Disable MMU and dcache */
    mrc	p15, 0, r0, c1, c0, 0
    bic	r0, r0, #0x1
    bic	r0, r0, #0x4
    mcr	p15, 0, r0, c1, c0, 0
    dsb
    isb

    ldr	sp, =_stack_top

    /* Zero the pre-DRAM state in OCRAM. The DRAM .bss is zeroed after the DRAM bring-up. */
    ldr	r0, =__sbss_early
    ldr	r1, =__ebss_early
    mov	r2, #0
zero_bss:
    cmp	r0, r1
    strlo	r2, [r0], #4
    blo	zero_bss

    bl	kmain
hang:
    b	hang
.size _start, . - _start
    "#,
    svc_mode = const {
        Cpsr::new_with_raw_value(0)
            .with_mode(ProcessorMode::Svc)
            .with_i(true)
            .with_f(true)
            .raw_value()
    },
);
