// SPDX-License-Identifier: Apache-2.0

//! Stack and heap high-water-mark estimation for bare-metal firmware.
//!
//! Before `main` runs, every word of RAM between the allocator's break and the
//! live stack pointer is painted with a sentinel. After `main` returns, the
//! painted range is scanned upward from the final break: the first word that
//! no longer holds the sentinel marks the deepest point the stack reached.
//!
//! ```text
//!   top_of_ram ┌──────────────┐
//!              │    stack     │ grows down
//!              ├──────────────┤ <- peak depth (first disturbed word)
//!              │   sentinel   │
//!              ├──────────────┤ <- break
//!              │     heap     │ grows up
//!   static_end ├──────────────┤
//!              │ .data + .bss │
//!              └──────────────┘
//! ```
//!
//! The [`lifecycle_hooks!`] macro wires a [`Monitor`] into `.init_array` and
//! `.fini_array`, or leaves both calls to the integrator.

#![cfg_attr(not(test), no_std)]

// Compile-time configuration validation
mod config_check;

mod arch;
pub use arch::stack_pointer;

mod config;
pub use config::{DefaultConfig, Sentinel, WatermarkConfig};

mod error;
pub use error::Error;

mod layout;
pub use layout::{align_up, MemoryLayout, WORD_SIZE};

mod region;
pub use region::RamRegion;

mod probe;
pub use probe::{BreakProbe, FixedBreak};

#[cfg(feature = "newlib")]
pub use probe::Sbrk;

#[cfg(feature = "avr-libc")]
pub use probe::BrkVal;

mod policy;
pub use policy::{Overrun, OverrunPolicy, PanicOnOverrun, Spin};

mod painter;
pub use painter::PaintOutcome;

mod scanner;
pub use scanner::{Usage, Verdict};

mod monitor;
pub use monitor::{park, Monitor};

mod hooks;
