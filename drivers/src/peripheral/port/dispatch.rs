//! Shared interrupt dispatcher.
//!
//! Every port trampoline ends up here. Runs in interrupt context: no
//! locks, no logging, a fixed number of register accesses plus the inline
//! callback.

use super::state::PortState;
use crate::hal::port::{PortRegister, PortRegisters};

/// Acknowledge the port's latched events and signal them.
///
/// The status register is read once and exactly that value is written
/// back, so flags latching between the read and the write stay pending for
/// the next interrupt. Returns the captured mask.
pub fn dispatch<R: PortRegisters>(regs: &R, state: &PortState) -> u32 {
    let events = regs.read(PortRegister::InterruptStatus);
    regs.write(PortRegister::InterruptStatus, events);

    state.record(events);

    if let Some(callback) = state.callback() {
        callback(events);
    }

    events
}
