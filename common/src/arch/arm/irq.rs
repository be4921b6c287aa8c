use crate::sync::irq::IrqControl;

const PRIMASK_PM_BIT: u32 = 1 << 0;

pub struct ArmIrq;

/// Interrupt masking for ARMv7-M / ARMv6-M cores.
///
/// Masks configurable-priority exceptions through PRIMASK.
///
/// # State Management
/// The `State` type is `bool`: `true` when interrupts were enabled before
/// `disable()` ran, so `restore` only unmasks what it masked.
///
/// # Assembly Details
///
/// - `mrs {0}, PRIMASK`: read the current mask
/// - `cpsid i`: set PRIMASK (mask interrupts)
/// - `cpsie i`: clear PRIMASK (unmask interrupts)
///
/// The asm blocks are not `nomem`: they double as compiler barriers so
/// register accesses cannot be hoisted out of a critical section.
impl IrqControl for ArmIrq {
    type State = bool;

    #[inline(always)]
    fn disable() -> bool {
        let primask: u32;
        unsafe {
            core::arch::asm!(
                "mrs {0}, PRIMASK",
                "cpsid i",
                out(reg) primask,
                options(nostack, preserves_flags)
            );
        }
        primask & PRIMASK_PM_BIT == 0
    }

    #[inline(always)]
    fn restore(prev_enabled: bool) {
        if prev_enabled {
            unsafe {
                core::arch::asm!("cpsie i", options(nostack, preserves_flags));
            }
        }
    }
}
