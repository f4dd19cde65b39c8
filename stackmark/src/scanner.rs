// SPDX-License-Identifier: Apache-2.0

//! Shutdown pass that reads the watermark back.

use crate::config::WatermarkConfig;
use crate::layout::{align_up, MemoryLayout};
use crate::policy::Overrun;
use crate::region::RamRegion;

/// Measured high-water marks, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    /// Final break minus the end of static data.
    pub heap_bytes: usize,
    /// Top of RAM minus the lowest disturbed sentinel word.
    pub peak_stack_bytes: usize,
    /// Top of RAM minus the aligned final break.
    pub available_stack_bytes: usize,
}

impl Usage {
    /// Bytes of untouched sentinel left between the heap and the deepest stack.
    pub fn headroom(&self) -> usize {
        self.available_stack_bytes.saturating_sub(self.peak_stack_bytes)
    }
}

impl core::fmt::Display for Usage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "heap {} bytes, peak stack {} bytes, {} bytes headroom",
            self.heap_bytes,
            self.peak_stack_bytes,
            self.headroom()
        )
    }
}

/// Terminal state of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The figures are trustworthy; park for inspection.
    Halted(Usage),
    /// Hand over to the overrun policy.
    Overrun(Overrun),
}

/// Scans upward from the aligned final break for the first disturbed word.
///
/// `brk` must already have been checked against `layout`.
///
/// # Safety
///
/// Every address from the aligned break up to the top of RAM must be
/// readable.
pub(crate) unsafe fn scan<C: WatermarkConfig>(layout: &MemoryLayout, brk: usize) -> Verdict {
    let top = layout.top_of_ram();
    let heap_bytes = brk - layout.static_end();
    let floor = align_up(brk);
    let available_stack_bytes = top.saturating_sub(floor);

    let region = RamRegion::between(floor, top);
    // SAFETY: per the caller.
    let stop = unsafe { region.first_disturbed(C::SENTINEL) };
    let peak_stack_bytes = top.saturating_sub(stop);

    if peak_stack_bytes >= available_stack_bytes {
        return Verdict::Overrun(Overrun::StackExhausted {
            peak_stack_bytes,
            available_bytes: available_stack_bytes,
        });
    }
    Verdict::Halted(Usage {
        heap_bytes,
        peak_stack_bytes,
        available_stack_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DefaultConfig;
    use test_log::test;

    const SENTINEL: u32 = 0xDEAD_BEEF;

    #[test]
    fn test_scan_reports_disturbed_words() {
        let mut ram = [SENTINEL; 64];
        let base = ram.as_mut_ptr() as usize;
        let top = base + 64 * 4;
        // Static data ends at word 4, heap grew to word 10, stack reached word 50
        ram[..10].fill(0);
        ram[50..].fill(0x1234_5678);
        let layout = MemoryLayout::new(base + 4 * 4, top);

        let verdict = unsafe { scan::<DefaultConfig>(&layout, base + 10 * 4) };
        assert_eq!(
            verdict,
            Verdict::Halted(Usage {
                heap_bytes: 6 * 4,
                peak_stack_bytes: 14 * 4,
                available_stack_bytes: 54 * 4,
            })
        );
    }

    #[test]
    fn test_scan_exhausted_region_is_overrun() {
        let mut ram = [0u32; 16];
        let base = ram.as_mut_ptr() as usize;
        let layout = MemoryLayout::new(base, base + 16 * 4);

        let verdict = unsafe { scan::<DefaultConfig>(&layout, base + 4 * 4) };
        assert_eq!(
            verdict,
            Verdict::Overrun(Overrun::StackExhausted {
                peak_stack_bytes: 12 * 4,
                available_bytes: 12 * 4,
            })
        );
    }

    #[test]
    fn test_scan_break_at_top_is_overrun() {
        let mut ram = [SENTINEL; 4];
        let base = ram.as_mut_ptr() as usize;
        let layout = MemoryLayout::new(base, base + 4 * 4);

        let verdict = unsafe { scan::<DefaultConfig>(&layout, base + 4 * 4) };
        assert_eq!(
            verdict,
            Verdict::Overrun(Overrun::StackExhausted {
                peak_stack_bytes: 0,
                available_bytes: 0,
            })
        );
    }

    #[test]
    fn test_usage_headroom_and_display() {
        let usage = Usage {
            heap_bytes: 256,
            peak_stack_bytes: 512,
            available_stack_bytes: 3584,
        };
        assert_eq!(usage.headroom(), 3072);
        assert_eq!(
            format!("{usage}"),
            "heap 256 bytes, peak stack 512 bytes, 3072 bytes headroom"
        );
    }
}
