use core::fmt::Debug;

/// Architecture-specific interrupt masking interface.
///
/// Implemented by the architecture layer (see [`crate::arch`]).
pub trait IrqControl {
    /// Saved interrupt state
    type State: Copy + Debug;

    /// Disable interrupts and return the previous state.
    fn disable() -> Self::State;

    /// Restore interrupts to a previous state.
    fn restore(state: Self::State);
}

/// Run `f` with interrupts masked, restoring the previous mask afterwards.
///
/// Nesting is fine: an inner section sees interrupts already disabled and
/// leaves them that way on exit.
#[inline]
pub fn critical_section<I: IrqControl, R>(f: impl FnOnce() -> R) -> R {
    let state = I::disable();
    let result = f();
    I::restore(state);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};

    static DEPTH: AtomicU32 = AtomicU32::new(0);

    struct CountingIrq;

    impl IrqControl for CountingIrq {
        type State = u32;

        fn disable() -> u32 {
            DEPTH.fetch_add(1, Ordering::SeqCst)
        }

        fn restore(state: u32) {
            DEPTH.store(state, Ordering::SeqCst);
        }
    }

    #[test]
    fn critical_section_restores_previous_state() {
        let inner = critical_section::<CountingIrq, _>(|| {
            assert_eq!(DEPTH.load(Ordering::SeqCst), 1);
            critical_section::<CountingIrq, _>(|| DEPTH.load(Ordering::SeqCst))
        });
        assert_eq!(inner, 2);
        assert_eq!(DEPTH.load(Ordering::SeqCst), 0);
    }
}
