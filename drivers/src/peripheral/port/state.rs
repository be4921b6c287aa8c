//! Per-port descriptor and runtime record.

use crate::hal::gpio::{DriverInfo, GpioStatus, SignalEvent};
use crate::hal::interrupt::{Handler, IrqNumber};
use crate::hal::power::ClockGate;
use core::ptr;
use core::sync::atomic::{AtomicPtr, AtomicU32, Ordering};

/// Immutable binding of one logical port to its hardware.
pub struct PortDescriptor<R> {
    /// Name used in log records.
    pub name: &'static str,
    /// Register interface of the port.
    pub regs: R,
    /// Vector number of the port interrupt.
    pub irq: IrqNumber,
    /// Trampoline installed at `irq` by `initialize`.
    pub handler: Handler,
    /// Clock gate switched by `power_control`.
    pub clock: ClockGate,
    /// Version and capabilities reported by this instance.
    pub info: &'static DriverInfo,
}

/// Mutable per-port record shared between the application and the port's
/// interrupt handler.
///
/// Both fields are single aligned words. `callback` is published with
/// release ordering by `initialize` and read with acquire ordering by the
/// dispatcher; `status` is a relaxed snapshot that may be stale.
pub struct PortState {
    callback: AtomicPtr<()>,
    status: AtomicU32,
}

impl PortState {
    pub const fn new() -> Self {
        Self {
            callback: AtomicPtr::new(ptr::null_mut()),
            status: AtomicU32::new(0),
        }
    }

    /// Replace the registered callback.
    pub fn bind(&self, callback: Option<SignalEvent>) {
        let raw = callback.map_or(ptr::null_mut(), |f| f as *mut ());
        self.callback.store(raw, Ordering::Release);
    }

    /// Currently registered callback.
    pub fn callback(&self) -> Option<SignalEvent> {
        let raw = self.callback.load(Ordering::Acquire);
        if raw.is_null() {
            None
        } else {
            // SAFETY: non-null values are only ever stored by `bind`, from a
            // `SignalEvent`; function and data pointers have the same size
            // on every supported target.
            Some(unsafe { core::mem::transmute::<*mut (), SignalEvent>(raw) })
        }
    }

    /// Record the events seen by the latest dispatch.
    pub fn record(&self, events: u32) {
        self.status.store(events, Ordering::Relaxed);
    }

    pub fn status(&self) -> GpioStatus {
        GpioStatus {
            events: self.status.load(Ordering::Relaxed),
        }
    }
}

impl Default for PortState {
    fn default() -> Self {
        Self::new()
    }
}
