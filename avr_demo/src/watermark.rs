//! Watermark hooks for the ATmega328P on the Arduino Uno.
//!
//! avr-libc's start-up code has no `.init_array`, so both hooks are called
//! by hand: `watermark_init()` as the first statement of `main`, before any
//! peripheral setup, and `watermark_exit()` or `watermark_measure()` last.

use stackmark::{BrkVal, MemoryLayout};

/// One past RAMEND (0x08FF); the stack starts at RAMEND and grows down.
const RAM_TOP: usize = 0x0900;

// Linker symbol that marks the end of the .bss section.
unsafe extern "C" {
    static _end: u8;
}

fn layout() -> MemoryLayout {
    MemoryLayout::new((&raw const _end) as usize, RAM_TOP)
}

/// Overrun handler. Set a breakpoint here, or watch for the sleeping core.
#[inline(never)]
#[unsafe(no_mangle)]
pub fn watermark_overrun() -> ! {
    loop {
        // SAFETY: `sleep` only halts the core until the next interrupt.
        unsafe { core::arch::asm!("cli", "sleep") };
    }
}

stackmark::lifecycle_hooks! {
    layout: layout(),
    probe: BrkVal,
    overrun: watermark_overrun,
    init: manual,
    exit: manual,
}
