//! Power Management Hardware Abstraction Layer.

use crate::hal::gpio::{DriverError, closed_enum};

/// Requested power state of a peripheral.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PowerState {
    /// Clock gated, registers inaccessible.
    Off = 0,
    /// Low-power mode.
    Low = 1,
    /// Fully operational.
    Full = 2,
}

closed_enum!(PowerState, DriverError::Unsupported, { 0 => Off, 1 => Low, 2 => Full });

/// Identifier of one clock gate, interpreted by the platform.
pub type ClockGate = u32;

/// Clock gating controller.
pub trait ClockControl {
    /// Enable or disable the clock behind `gate`.
    fn set_clock(&self, gate: ClockGate, enabled: bool);
}
