//! Platform Abstraction Layer
//!
//! A platform supplies what the port driver cannot know by itself: how the
//! port registers are reached, where the vector table lives, how clocks are
//! gated and how interrupts are masked on the CPU.
//!
//! # Usage
//!
//! ```ignore
//! use drivers::hal::gpio::GpioDriver;
//! use drivers::platform::{CurrentPlatform, Platform};
//!
//! log::info!("running on {}", CurrentPlatform::name());
//! ```

use crate::hal::interrupt::VectorTable;
use crate::hal::port::PortRegisters;
use crate::hal::power::ClockControl;
use common::sync::IrqControl;

/// Platform trait - implemented by each supported platform
pub trait Platform: VectorTable + ClockControl {
    /// Register interface of one port.
    type Registers: PortRegisters;

    /// CPU interrupt masking used for read-modify-write sequences.
    type Irq: IrqControl;

    /// Platform name for debugging
    fn name() -> &'static str;
}

// Platform selection based on Cargo features
cfg_if::cfg_if! {
    if #[cfg(feature = "k66")] {
        pub mod k66;
        pub use k66::K66Platform as CurrentPlatform;
    } else if #[cfg(feature = "sim")] {
        pub use sim::SimPlatform as CurrentPlatform;
    } else {
        compile_error!(
            "No platform selected!\n\
            Use: cargo build --features k66\n\
            Or:  cargo build --features sim"
        );
    }
}

#[cfg(any(test, feature = "sim"))]
pub mod sim;
