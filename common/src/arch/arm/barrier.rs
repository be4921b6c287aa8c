//! Memory and instruction barriers.

/// Data synchronisation barrier: completes all outstanding memory accesses.
#[inline(always)]
pub fn dsb() {
    unsafe { core::arch::asm!("dsb sy", options(nostack, preserves_flags)) }
}

/// Instruction synchronisation barrier: flushes the pipeline.
#[inline(always)]
pub fn isb() {
    unsafe { core::arch::asm!("isb sy", options(nostack, preserves_flags)) }
}
