//! Port-controller GPIO driver.
//!
//! Driver logic for GPIO blocks built from a port controller (per-pin
//! control registers, a latched interrupt status register) paired with a
//! data block (output, set/clear/toggle, input, direction registers). All
//! ports of a chip share this code; each is described by a
//! [`PortDescriptor`] and served through a [`GpioPort`] handle.
//!
//! # Components
//!
//! - [`codec`]: pin configuration requests to register fields
//! - [`dispatch`]: shared interrupt dispatcher
//! - [`driver`]: the [`GpioDriver`](crate::hal::gpio::GpioDriver) implementation
//! - [`trampoline`]: per-port vector entry points
//!
//! # Example
//!
//! ```ignore
//! use drivers::hal::gpio::{GpioDriver, InterruptMode, PinConfig};
//! use drivers::hal::power::PowerState;
//!
//! fn on_pps(events: u32) { /* interrupt context */ }
//!
//! let port = drivers::platform::k66::port(1).unwrap();
//! port.initialize(Some(on_pps))?;
//! port.power_control(PowerState::Full)?;
//! port.configure_pin(5, PinConfig::input().with_interrupt(InterruptMode::Rising))?;
//! ```

pub mod codec;
pub mod dispatch;
pub mod driver;
pub mod state;
pub mod trampoline;

pub use driver::GpioPort;
pub use state::{PortDescriptor, PortState};
pub use trampoline::{StaticPort, trampoline};
