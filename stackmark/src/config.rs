// SPDX-License-Identifier: Apache-2.0

/// Configuration trait for the watermark pattern.
///
/// The sentinel should be a value the monitored program is unlikely to write
/// to its own stack. A word that happens to equal it is read as untouched, so
/// a poor choice can only under-report stack usage.
pub trait WatermarkConfig {
    /// The 32-bit word painted across unused RAM.
    const SENTINEL: u32;
}

/// Default configuration, painting `0xDEADBEEF`.
pub struct DefaultConfig;

impl WatermarkConfig for DefaultConfig {
    const SENTINEL: u32 = 0xDEAD_BEEF;
}

/// Watermark configuration with a custom sentinel word.
///
/// Example: `Monitor::<_, _, Sentinel<0xCAFE_F00D>>` for firmware that uses
/// `0xDEADBEEF` as a poison value of its own.
pub struct Sentinel<const WORD: u32>;

impl<const WORD: u32> WatermarkConfig for Sentinel<WORD> {
    const SENTINEL: u32 = WORD;
}
