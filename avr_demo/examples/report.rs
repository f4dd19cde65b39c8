#![feature(asm_experimental_arch)]
#![no_std]
#![no_main]

use avr_demo::watermark::{watermark_init, watermark_measure, watermark_overrun};
use avr_demo::workload;
use panic_halt as _;
use stackmark::{Overrun, Verdict};

// Conditional import of uwriteln! - stub out if ufmt feature is not enabled
#[cfg(feature = "ufmt")]
use ufmt::uwriteln;

#[cfg(not(feature = "ufmt"))]
macro_rules! uwriteln {
    ($($args:tt)*) => {
        Ok::<(), core::convert::Infallible>(())
    };
}

#[arduino_hal::entry]
fn main() -> ! {
    // Nothing may touch the stack or heap before painting
    watermark_init();

    let heap_requested = workload::grow_heap();
    let checksum = workload::descend();

    let verdict = watermark_measure();

    #[cfg(feature = "ufmt")]
    let mut serial = {
        let dp = arduino_hal::Peripherals::take().unwrap();
        let pins = arduino_hal::pins!(dp);
        arduino_hal::default_serial!(dp, pins, 57600)
    };

    uwriteln!(&mut serial, "Recursion depth: {}", workload::RECURSION_DEPTH).ok();
    uwriteln!(&mut serial, "Heap requested: {} bytes", heap_requested).ok();
    uwriteln!(&mut serial, "Checksum: {}", checksum).ok();

    match verdict {
        Verdict::Halted(usage) => {
            uwriteln!(&mut serial, "Heap usage: {} bytes", usage.heap_bytes).ok();
            uwriteln!(&mut serial, "Max stack usage: {} bytes", usage.peak_stack_bytes).ok();
            uwriteln!(&mut serial, "Headroom: {} bytes", usage.headroom()).ok();
            uwriteln!(&mut serial, "=== TEST COMPLETE ===").ok();
            // Exit the simulator
            unsafe { core::arch::asm!("cli", "sleep") };
            stackmark::park(usage)
        }
        Verdict::Overrun(Overrun::StackExhausted {
            peak_stack_bytes,
            available_bytes,
        }) => {
            uwriteln!(
                &mut serial,
                "OVERRUN: stack used {} of {} bytes",
                peak_stack_bytes,
                available_bytes
            )
            .ok();
            watermark_overrun()
        }
        Verdict::Overrun(Overrun::Fault(_)) => {
            uwriteln!(&mut serial, "OVERRUN: memory layout fault").ok();
            watermark_overrun()
        }
    }
}
