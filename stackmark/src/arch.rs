// SPDX-License-Identifier: Apache-2.0

//! Reads the live stack pointer from the execution context.
//!
//! Every supported target grows its stack downward.

#[cfg(any(target_arch = "arm", target_arch = "aarch64"))]
#[inline(always)]
pub fn stack_pointer() -> usize {
    let sp: usize;
    // SAFETY: reads a register, touches no memory.
    unsafe { core::arch::asm!("mov {}, sp", out(reg) sp, options(nomem, nostack, preserves_flags)) };
    sp
}

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
#[inline(always)]
pub fn stack_pointer() -> usize {
    let sp: usize;
    // SAFETY: reads a register, touches no memory.
    unsafe { core::arch::asm!("mv {}, sp", out(reg) sp, options(nomem, nostack, preserves_flags)) };
    sp
}

#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn stack_pointer() -> usize {
    let sp: usize;
    // SAFETY: reads a register, touches no memory.
    unsafe { core::arch::asm!("mov {}, rsp", out(reg) sp, options(nomem, nostack, preserves_flags)) };
    sp
}

#[cfg(target_arch = "x86")]
#[inline(always)]
pub fn stack_pointer() -> usize {
    let sp: usize;
    // SAFETY: reads a register, touches no memory.
    unsafe { core::arch::asm!("mov {}, esp", out(reg) sp, options(nomem, nostack, preserves_flags)) };
    sp
}

// SPL and SPH are memory mapped I/O registers on every AVR core.
#[cfg(target_arch = "avr")]
const SPL: *const u8 = 0x5D as *const u8;
#[cfg(target_arch = "avr")]
const SPH: *const u8 = 0x5E as *const u8;

#[cfg(target_arch = "avr")]
#[inline(always)]
pub fn stack_pointer() -> usize {
    // SAFETY: SPL/SPH are always present and side-effect free to read.
    let (low, high) = unsafe { (core::ptr::read_volatile(SPL), core::ptr::read_volatile(SPH)) };
    usize::from(u16::from_le_bytes([low, high]))
}

#[cfg(not(any(
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "riscv32",
    target_arch = "riscv64",
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "avr",
)))]
compile_error!("Unsupported target platform!");

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_stack_pointer_is_near_locals() {
        let local = 0u64;
        let local_addr = core::hint::black_box(&local) as *const u64 as usize;
        let sp = stack_pointer();
        // Locals live above the stack pointer on a downward-growing stack
        assert!(sp <= local_addr, "sp {sp:#x} above local {local_addr:#x}");
        assert!(local_addr - sp < 64 * 1024);
    }

    #[inline(never)]
    fn nested_stack_pointer() -> usize {
        let pad = core::hint::black_box([0u8; 256]);
        core::hint::black_box(&pad);
        stack_pointer()
    }

    #[test]
    fn test_stack_grows_down() {
        let outer = stack_pointer();
        let inner = nested_stack_pointer();
        assert!(inner < outer, "inner {inner:#x} not below outer {outer:#x}");
    }
}
