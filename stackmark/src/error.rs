// SPDX-License-Identifier: Apache-2.0

/// Errors that prevent a meaningful measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The allocator could not report its current break.
    ProbeFailed,
    /// The end of static data lies above the top of RAM.
    InvertedLayout { static_end: usize, top_of_ram: usize },
    /// The top of RAM is not aligned to a word boundary.
    MisalignedTop(usize),
    /// The allocator reported a break outside `static_end..=top_of_ram`.
    BreakOutOfRange(usize),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::ProbeFailed => write!(f, "allocator break probe failed"),
            Error::InvertedLayout {
                static_end,
                top_of_ram,
            } => write!(
                f,
                "static data ends at {static_end:#x}, above top of RAM {top_of_ram:#x}"
            ),
            Error::MisalignedTop(top) => write!(f, "top of RAM {top:#x} is not word aligned"),
            Error::BreakOutOfRange(brk) => write!(f, "break {brk:#x} lies outside the heap range"),
        }
    }
}
