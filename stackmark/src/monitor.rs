// SPDX-License-Identifier: Apache-2.0

use core::marker::PhantomData;

use log::{error, info, warn};

use crate::config::{DefaultConfig, WatermarkConfig};
use crate::layout::MemoryLayout;
use crate::painter::{self, PaintOutcome};
use crate::policy::OverrunPolicy;
use crate::probe::BreakProbe;
use crate::scanner::{self, Usage, Verdict};
use crate::{arch, Error};

/// Paints unused RAM at start-up and reads the watermark back at shutdown.
///
/// # Type Parameters
///
/// * `P` - Reports the allocator's break. Must implement [`BreakProbe`].
/// * `O` - Terminal action on overrun. Must implement [`OverrunPolicy`].
/// * `C` - Sentinel configuration, [`DefaultConfig`] unless overridden.
///
/// A monitor is meant to run exactly once in each direction: [`paint`] before
/// any application code, [`conclude`] after all of it. Scanning a second time
/// reads memory the first scan's parking loop may already have disturbed.
///
/// [`paint`]: Monitor::paint
/// [`conclude`]: Monitor::conclude
pub struct Monitor<P, O, C = DefaultConfig> {
    layout: MemoryLayout,
    probe: P,
    policy: O,
    _config: PhantomData<C>,
}

impl<P, O, C> Monitor<P, O, C>
where
    P: BreakProbe,
    O: OverrunPolicy,
    C: WatermarkConfig,
{
    /// # Safety
    ///
    /// `layout` and `probe` must describe this program's RAM: everything
    /// between the reported break and the live stack pointer is free to
    /// overwrite, and everything up to `top_of_ram` is readable.
    pub const unsafe fn new(layout: MemoryLayout, probe: P, policy: O) -> Self {
        Self {
            layout,
            probe,
            policy,
            _config: PhantomData,
        }
    }

    pub fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    fn checked_break(&self) -> Result<usize, Error> {
        self.layout.validate()?;
        self.layout.check_break(self.probe.current_break()?)
    }

    /// Paints from the current break up to the live stack pointer.
    ///
    /// Nothing is written, and nothing is reported beyond the returned
    /// outcome, when the break cannot be trusted. Painting does not log: any
    /// call made after the stack pointer is read would land in the freshly
    /// painted words.
    #[inline(always)]
    pub fn paint(&self) -> PaintOutcome {
        let brk = match self.checked_break() {
            Ok(brk) => brk,
            Err(e) => return skipped(e),
        };
        let stack_pointer = arch::stack_pointer();
        // SAFETY: the layout contract from `new`; nothing below the live
        // stack pointer is in use.
        unsafe { painter::paint::<C>(brk, stack_pointer) }
    }

    /// Paints from the current break up to `stack_pointer`.
    ///
    /// # Safety
    ///
    /// Nothing live may be stored below `stack_pointer` down to the break.
    pub unsafe fn paint_below(&self, stack_pointer: usize) -> PaintOutcome {
        match self.checked_break() {
            // SAFETY: per the caller.
            Ok(brk) => unsafe { painter::paint::<C>(brk, stack_pointer) },
            Err(e) => skipped(e),
        }
    }

    /// Reads the watermark back without acting on the result.
    ///
    /// A failed break probe is an overrun and no memory is scanned.
    pub fn measure(&self) -> Verdict {
        match self.checked_break() {
            // SAFETY: the layout contract from `new`.
            Ok(brk) => unsafe { scanner::scan::<C>(&self.layout, brk) },
            Err(e) => Verdict::Overrun(e.into()),
        }
    }

    /// Measures, then either parks with the figures or runs the overrun
    /// policy.
    pub fn conclude(&self) -> ! {
        match self.measure() {
            Verdict::Halted(usage) => {
                info!("{usage}");
                park(usage)
            }
            Verdict::Overrun(cause) => {
                error!("Overrun: {cause}");
                self.policy.on_overrun()
            }
        }
    }
}

fn skipped(e: Error) -> PaintOutcome {
    warn!("Skipping watermark painting: {e}");
    PaintOutcome::Skipped(e)
}

/// Idles forever with both figures held in locals for a debugger to read.
#[inline(never)]
pub fn park(usage: Usage) -> ! {
    let heap_usage = usage.heap_bytes;
    let peak_stack_usage = usage.peak_stack_bytes;
    loop {
        // Breakpoint here
        core::hint::black_box(&heap_usage);
        core::hint::black_box(&peak_stack_usage);
        core::hint::spin_loop();
    }
}
