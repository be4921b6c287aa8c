//! Portable stand-ins used when not building for a Cortex-M core.

use crate::sync::irq::IrqControl;

/// Interrupt "masking" for host builds.
///
/// There is no asynchronous interrupt context off-target, so masking
/// reduces to a compiler fence that keeps the critical section ordered.
pub struct HostIrq;

impl IrqControl for HostIrq {
    type State = ();

    #[inline(always)]
    fn disable() {
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }

    #[inline(always)]
    fn restore(_state: ()) {
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}

pub mod barrier {
    use core::sync::atomic::{Ordering, fence};

    #[inline(always)]
    pub fn dsb() {
        fence(Ordering::SeqCst);
    }

    #[inline(always)]
    pub fn isb() {
        fence(Ordering::SeqCst);
    }
}
