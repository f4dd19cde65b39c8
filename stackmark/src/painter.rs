// SPDX-License-Identifier: Apache-2.0

//! Start-up pass that paints unused RAM with the sentinel word.

use crate::config::WatermarkConfig;
use crate::region::RamRegion;
use crate::Error;

/// Result of the painting pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    /// `words` sentinel words were written to `start..end`.
    Painted {
        start: usize,
        end: usize,
        words: usize,
    },
    /// No safe range was known, nothing was written.
    Skipped(Error),
}

impl PaintOutcome {
    /// Number of words written, zero when skipped.
    pub fn words(&self) -> usize {
        match self {
            PaintOutcome::Painted { words, .. } => *words,
            PaintOutcome::Skipped(_) => 0,
        }
    }
}

/// Paints every whole word from the aligned break up to the stack pointer.
///
/// A stack pointer at or below the aligned break paints nothing.
///
/// # Safety
///
/// `brk..stack_pointer` must be RAM that holds nothing live, and
/// `stack_pointer` must be at or below the lowest frame still in use.
#[inline(always)]
pub(crate) unsafe fn paint<C: WatermarkConfig>(brk: usize, stack_pointer: usize) -> PaintOutcome {
    let region = RamRegion::between(brk, stack_pointer);
    // SAFETY: per the caller.
    let words = unsafe { region.paint(C::SENTINEL) };
    PaintOutcome::Painted {
        start: region.start(),
        end: region.end(),
        words,
    }
}
