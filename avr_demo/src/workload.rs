//! A configurable amount of stack and heap consumption to measure.

include!(concat!(env!("OUT_DIR"), "/workload.rs"));

unsafe extern "C" {
    fn malloc(size: usize) -> *mut u8;
}

/// Claims `HEAP_BYTES` from avr-libc's allocator and never frees them, so
/// the break stays where the allocation left it.
pub fn grow_heap() -> usize {
    if HEAP_BYTES == 0 {
        return 0;
    }
    // SAFETY: plain avr-libc malloc; a null return just means no growth.
    let block = unsafe { malloc(HEAP_BYTES) };
    if block.is_null() {
        return 0;
    }
    // SAFETY: `block` points at HEAP_BYTES writable bytes.
    unsafe { core::ptr::write_bytes(block, 0xA5, HEAP_BYTES) };
    HEAP_BYTES
}

/// Recurses `RECURSION_DEPTH` levels, each holding a 16 byte frame.
pub fn descend() -> u8 {
    descend_from(RECURSION_DEPTH)
}

#[inline(never)]
fn descend_from(depth: usize) -> u8 {
    let frame = core::hint::black_box([depth as u8; 16]);
    if depth == 0 {
        frame[0]
    } else {
        descend_from(depth - 1).wrapping_add(frame[15])
    }
}
