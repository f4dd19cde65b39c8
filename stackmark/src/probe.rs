// SPDX-License-Identifier: Apache-2.0

use crate::Error;

/// Trait for allocators that can report their current break.
pub trait BreakProbe {
    /// Returns the current upper boundary of claimed heap memory.
    ///
    /// # Contract
    /// - The query is a zero-size request and **MUST NOT** move the break
    /// - A failure **MUST** be reported as an error, never as an address
    fn current_break(&self) -> Result<usize, Error>;
}

impl<T: BreakProbe + ?Sized> BreakProbe for &T {
    fn current_break(&self) -> Result<usize, Error> {
        (**self).current_break()
    }
}

/// A break that never moves, for firmware without a heap allocator.
///
/// Usually the address of the linker's end-of-static-data symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBreak(pub usize);

impl BreakProbe for FixedBreak {
    fn current_break(&self) -> Result<usize, Error> {
        Ok(self.0)
    }
}

#[cfg(feature = "newlib")]
extern "C" {
    fn _sbrk(increment: isize) -> *mut u8;
}

/// Break probe for newlib-style runtimes, calling `_sbrk(0)`.
#[cfg(feature = "newlib")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Sbrk;

#[cfg(feature = "newlib")]
impl BreakProbe for Sbrk {
    fn current_break(&self) -> Result<usize, Error> {
        // SAFETY: a zero increment only reports the break.
        let brk = unsafe { _sbrk(0) } as usize;
        // `(void *)-1` signals failure
        if brk == usize::MAX {
            return Err(Error::ProbeFailed);
        }
        Ok(brk)
    }
}

#[cfg(feature = "avr-libc")]
extern "C" {
    static mut __brkval: *mut u8;
    static __heap_start: u8;
}

/// Break probe for avr-libc's `malloc`.
///
/// `__brkval` stays null until the first allocation, in which case the heap
/// is still empty and the break is `__heap_start`.
#[cfg(feature = "avr-libc")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrkVal;

#[cfg(feature = "avr-libc")]
impl BreakProbe for BrkVal {
    fn current_break(&self) -> Result<usize, Error> {
        // SAFETY: avr-libc defines `__brkval` and `malloc` is the only writer;
        // single-threaded access.
        let brk = unsafe { core::ptr::read_volatile(&raw const __brkval) };
        if brk.is_null() {
            Ok((&raw const __heap_start) as usize)
        } else {
            Ok(brk as usize)
        }
    }
}
