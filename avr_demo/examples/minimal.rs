#![no_std]
#![no_main]

use avr_demo::watermark::{watermark_exit, watermark_init};
use avr_demo::workload;
use panic_halt as _;

#[arduino_hal::entry]
fn main() -> ! {
    watermark_init();

    workload::grow_heap();
    core::hint::black_box(workload::descend());

    // Parks with heap_usage and peak_stack_usage in locals of `park`
    watermark_exit()
}
