#![feature(asm_experimental_arch)]
#![no_std]

pub mod watermark;
pub mod workload;
