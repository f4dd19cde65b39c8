// SPDX-License-Identifier: Apache-2.0

use crate::Error;

/// Terminal action taken when no trustworthy measurement exists.
///
/// Supplied by the integrator. It receives no arguments and never returns:
/// halting, resetting and trapping into a debugger are all valid choices.
pub trait OverrunPolicy {
    fn on_overrun(&self) -> !;
}

/// Binds any diverging function as the overrun handler, so a breakpoint can
/// be set on a named symbol.
impl OverrunPolicy for fn() -> ! {
    fn on_overrun(&self) -> ! {
        (self)()
    }
}

/// Idles forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spin;

impl OverrunPolicy for Spin {
    fn on_overrun(&self) -> ! {
        loop {
            core::hint::spin_loop();
        }
    }
}

/// Hands control to the integrator's panic handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicOnOverrun;

impl OverrunPolicy for PanicOnOverrun {
    fn on_overrun(&self) -> ! {
        panic!("stack/heap overrun")
    }
}

/// Why the overrun policy was invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overrun {
    /// The memory layout or break could not be trusted.
    Fault(Error),
    /// The stack consumed every painted word, so it may have gone deeper or
    /// collided with the heap.
    StackExhausted {
        peak_stack_bytes: usize,
        available_bytes: usize,
    },
}

impl From<Error> for Overrun {
    fn from(err: Error) -> Self {
        Overrun::Fault(err)
    }
}

impl core::fmt::Display for Overrun {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Overrun::Fault(e) => write!(f, "{e}"),
            Overrun::StackExhausted {
                peak_stack_bytes,
                available_bytes,
            } => write!(
                f,
                "stack used {peak_stack_bytes} of {available_bytes} available bytes"
            ),
        }
    }
}
