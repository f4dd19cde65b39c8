// SPDX-License-Identifier: Apache-2.0

//! Registration of the start-up and shutdown hooks.

/// Generates `watermark_init()`, `watermark_measure()` and
/// `watermark_exit() -> !` for one program.
///
/// ```ignore
/// stackmark::lifecycle_hooks! {
///     layout: MemoryLayout::new((&raw const end) as usize, 0x2002_0000),
///     probe: stackmark::Sbrk,
///     overrun: HardFault_Trap,
///     init: automatic,
///     exit: automatic,
/// }
/// ```
///
/// * `layout` - a [`MemoryLayout`](crate::MemoryLayout) expression, evaluated
///   on every call.
/// * `probe` - a [`BreakProbe`](crate::BreakProbe) expression.
/// * `overrun` - path to a `fn() -> !`; set a breakpoint on it.
/// * `init` / `exit` - `automatic` registers an entry in `.init_array` /
///   `.fini_array`, `manual` leaves the call to the integrator as the first
///   and last statement of `main`.
///
/// `watermark_measure()` returns the [`Verdict`](crate::Verdict) without
/// acting on it, for firmware that reports the figures itself before parking.
///
/// The `layout` and `probe` expressions are asserted to describe the
/// program's real RAM, see [`Monitor::new`](crate::Monitor::new).
#[macro_export]
macro_rules! lifecycle_hooks {
    (
        layout: $layout:expr,
        probe: $probe:expr,
        overrun: $handler:path,
        init: $init:ident,
        exit: $exit:ident $(,)?
    ) => {
        /// Paints unused RAM with the watermark sentinel.
        #[allow(dead_code)]
        #[inline(never)]
        pub fn watermark_init() {
            // SAFETY: asserted by the `lifecycle_hooks!` invocation.
            let monitor = unsafe {
                $crate::Monitor::<_, _>::new($layout, $probe, $handler as fn() -> !)
            };
            let _ = monitor.paint();
        }

        /// Reads the watermark back without acting on the result.
        #[allow(dead_code)]
        #[inline(never)]
        pub fn watermark_measure() -> $crate::Verdict {
            // SAFETY: asserted by the `lifecycle_hooks!` invocation.
            let monitor = unsafe {
                $crate::Monitor::<_, _>::new($layout, $probe, $handler as fn() -> !)
            };
            monitor.measure()
        }

        /// Reads the watermark back, then parks or runs the overrun handler.
        #[allow(dead_code)]
        #[inline(never)]
        pub fn watermark_exit() -> ! {
            // SAFETY: asserted by the `lifecycle_hooks!` invocation.
            let monitor = unsafe {
                $crate::Monitor::<_, _>::new($layout, $probe, $handler as fn() -> !)
            };
            monitor.conclude()
        }

        $crate::__register_hook!($init, ".init_array", __STACKMARK_INIT, watermark_init);
        $crate::__register_hook!($exit, ".fini_array", __STACKMARK_EXIT, watermark_exit);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __register_hook {
    (automatic, $section:literal, $slot:ident, $hook:ident) => {
        #[used]
        #[link_section = $section]
        static $slot: extern "C" fn() = {
            extern "C" fn trampoline() {
                $hook()
            }
            trampoline
        };
    };
    (manual, $section:literal, $slot:ident, $hook:ident) => {};
}
