// SPDX-License-Identifier: Apache-2.0

use crate::Error;

/// Size of a sentinel word in bytes.
pub const WORD_SIZE: usize = core::mem::size_of::<u32>();

/// Rounds `addr` up to the next word boundary.
///
/// Saturates at the highest aligned address instead of wrapping to zero.
#[inline(always)]
pub const fn align_up(addr: usize) -> usize {
    addr.saturating_add(WORD_SIZE - 1) & !(WORD_SIZE - 1)
}

/// Memory layout facts supplied by the linker script and startup code.
///
/// RAM is one flat region: static data at the bottom ending at `static_end`,
/// the heap growing up from there and the stack growing down from
/// `top_of_ram`, which is one past the last usable byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLayout {
    static_end: usize,
    top_of_ram: usize,
}

impl MemoryLayout {
    pub const fn new(static_end: usize, top_of_ram: usize) -> Self {
        Self {
            static_end,
            top_of_ram,
        }
    }

    pub const fn static_end(&self) -> usize {
        self.static_end
    }

    pub const fn top_of_ram(&self) -> usize {
        self.top_of_ram
    }

    /// Checks that the layout satisfies the heap-up, stack-down assumption.
    pub fn validate(&self) -> Result<(), Error> {
        if self.static_end > self.top_of_ram {
            return Err(Error::InvertedLayout {
                static_end: self.static_end,
                top_of_ram: self.top_of_ram,
            });
        }
        if self.top_of_ram % WORD_SIZE != 0 {
            return Err(Error::MisalignedTop(self.top_of_ram));
        }
        Ok(())
    }

    /// Accepts a probed break only if it lies between static data and the
    /// top of RAM.
    pub fn check_break(&self, brk: usize) -> Result<usize, Error> {
        if (self.static_end..=self.top_of_ram).contains(&brk) {
            Ok(brk)
        } else {
            Err(Error::BreakOutOfRange(brk))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0x2000_0180), 0x2000_0180);
        assert_eq!(align_up(0x2000_0181), 0x2000_0184);
        assert_eq!(align_up(0x2000_0183), 0x2000_0184);
        assert_eq!(align_up(0), 0);
    }

    #[test]
    fn test_align_up_saturates() {
        assert_eq!(align_up(usize::MAX), usize::MAX & !(WORD_SIZE - 1));
        assert_eq!(align_up(usize::MAX - 1), usize::MAX & !(WORD_SIZE - 1));
    }

    #[test]
    fn test_validate() {
        assert_eq!(MemoryLayout::new(0x2000_0100, 0x2000_1000).validate(), Ok(()));
        assert_eq!(
            MemoryLayout::new(0x2000_1100, 0x2000_1000).validate(),
            Err(Error::InvertedLayout {
                static_end: 0x2000_1100,
                top_of_ram: 0x2000_1000
            })
        );
        assert_eq!(
            MemoryLayout::new(0x2000_0100, 0x2000_0FFF).validate(),
            Err(Error::MisalignedTop(0x2000_0FFF))
        );
    }

    #[test]
    fn test_check_break() {
        let layout = MemoryLayout::new(0x2000_0100, 0x2000_1000);
        assert_eq!(layout.check_break(0x2000_0100), Ok(0x2000_0100));
        assert_eq!(layout.check_break(0x2000_0181), Ok(0x2000_0181));
        assert_eq!(layout.check_break(0x2000_1000), Ok(0x2000_1000));
        assert_eq!(
            layout.check_break(0x2000_00FF),
            Err(Error::BreakOutOfRange(0x2000_00FF))
        );
        assert_eq!(
            layout.check_break(usize::MAX),
            Err(Error::BreakOutOfRange(usize::MAX))
        );
    }
}
