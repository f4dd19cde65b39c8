// SPDX-License-Identifier: Apache-2.0

//! Compile-time configuration validation
//!
//! The break probe backends bind to different C runtimes and must not be
//! enabled together.

#[cfg(all(feature = "newlib", feature = "avr-libc"))]
compile_error!(
    "Cannot enable both 'newlib' and 'avr-libc' features simultaneously: choose one C runtime"
);

#[cfg(all(feature = "avr-libc", not(target_arch = "avr")))]
compile_error!("The 'avr-libc' feature reads avr-libc's '__brkval' and only builds for AVR targets");
