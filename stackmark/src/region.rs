// SPDX-License-Identifier: Apache-2.0

use crate::layout::{align_up, WORD_SIZE};

/// A word-aligned range of raw RAM addresses, `start..end`.
///
/// This is not a buffer owned by anyone: it names memory that lies between
/// the heap and the stack and is only touched through volatile accesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamRegion {
    start: usize,
    end: usize,
}

impl RamRegion {
    /// The largest run of whole words at or above `floor` that ends at or
    /// below `ceiling`. An inverted pair gives an empty region at `floor`.
    #[inline(always)]
    pub const fn between(floor: usize, ceiling: usize) -> Self {
        let start = align_up(floor);
        let end = if ceiling > start {
            start + (ceiling - start) / WORD_SIZE * WORD_SIZE
        } else {
            start
        };
        Self { start, end }
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn end(&self) -> usize {
        self.end
    }

    pub const fn len_bytes(&self) -> usize {
        self.end - self.start
    }

    pub const fn len_words(&self) -> usize {
        self.len_bytes() / WORD_SIZE
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Writes `sentinel` into every word of the region and returns how many
    /// words were written.
    ///
    /// Inlined so that no new stack frame lands inside a region that ends at
    /// the caller's stack pointer.
    ///
    /// # Safety
    ///
    /// * Every address in the region must be writable RAM.
    /// * Nothing live may be stored in the region.
    #[inline(always)]
    pub unsafe fn paint(&self, sentinel: u32) -> usize {
        let mut addr = self.start;
        while addr < self.end {
            // SAFETY: word aligned and inside the region, per the caller.
            unsafe { core::ptr::write_volatile(addr as *mut u32, sentinel) };
            addr += WORD_SIZE;
        }
        self.len_words()
    }

    /// Returns the address of the lowest word that no longer holds
    /// `sentinel`, or `end` if every word still does.
    ///
    /// # Safety
    ///
    /// Every address in the region must be readable RAM.
    #[inline(always)]
    pub unsafe fn first_disturbed(&self, sentinel: u32) -> usize {
        let mut addr = self.start;
        // SAFETY: word aligned and inside the region, per the caller.
        while addr < self.end && unsafe { core::ptr::read_volatile(addr as *const u32) } == sentinel
        {
            addr += WORD_SIZE;
        }
        addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const SENTINEL: u32 = 0xDEAD_BEEF;

    fn base_of(ram: &[u32]) -> usize {
        ram.as_ptr() as usize
    }

    #[test]
    fn test_between_trims_to_whole_words() {
        let region = RamRegion::between(0x1001, 0x100B);
        assert_eq!(region.start(), 0x1004);
        assert_eq!(region.end(), 0x1008);
        assert_eq!(region.len_words(), 1);
    }

    #[test]
    fn test_between_inverted_is_empty() {
        let region = RamRegion::between(0x2000, 0x1000);
        assert!(region.is_empty());
        assert_eq!(region.start(), 0x2000);
        assert_eq!(region.len_bytes(), 0);

        // Ceiling inside the word the floor rounds up to
        let region = RamRegion::between(0x1001, 0x1003);
        assert!(region.is_empty());
    }

    #[test]
    fn test_paint_fills_region_only() {
        let mut ram = [0u32; 16];
        let base = ram.as_mut_ptr() as usize;
        let region = RamRegion::between(base + 4 * 4, base + 12 * 4);
        let words = unsafe { region.paint(SENTINEL) };
        assert_eq!(words, 8);
        for (i, word) in ram.iter().enumerate() {
            let expected = if (4..12).contains(&i) { SENTINEL } else { 0 };
            assert_eq!(*word, expected, "word {i}");
        }
    }

    #[test]
    fn test_first_disturbed() {
        let mut ram = [SENTINEL; 8];
        ram[5] = 0;
        let base = base_of(&ram);
        let region = RamRegion::between(base, base + 8 * 4);
        assert_eq!(unsafe { region.first_disturbed(SENTINEL) }, base + 5 * 4);
    }

    #[test]
    fn test_first_disturbed_untouched_reaches_end() {
        let ram = [SENTINEL; 8];
        let base = base_of(&ram);
        let region = RamRegion::between(base, base + 6 * 4);
        assert_eq!(unsafe { region.first_disturbed(SENTINEL) }, base + 6 * 4);
    }

    #[test]
    fn test_first_disturbed_empty_region() {
        let ram = [0u32; 2];
        let base = base_of(&ram);
        let region = RamRegion::between(base + 4, base + 4);
        assert_eq!(unsafe { region.first_disturbed(SENTINEL) }, base + 4);
    }
}
