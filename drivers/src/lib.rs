//! Multi-port GPIO driver.
//!
//! This crate provides a layered architecture for port-controller GPIO:
//!
//! # Module Organization
//!
//! - [`hal`]: Platform-independent trait definitions and types
//! - [`hw`]: Raw register layouts
//! - [`peripheral`]: Reusable driver logic (pin codec, dispatcher, facade)
//! - [`platform`]: SoC bindings, selected by Cargo feature
//! - [`device_manager`]: Registry of the ports of a platform
//!
//! # Usage Example
//!
//! ```ignore
//! use drivers::hal::gpio::{GpioDriver, PinCommand, cfg};
//! use drivers::hal::power::PowerState;
//!
//! let port = drivers::platform::k66::port(4).unwrap();
//! port.initialize(None)?;
//! port.power_control(PowerState::Full)?;
//! port.control_pin(10, PinCommand::Config as u32, cfg::ENABLED | cfg::OUTPUT)?;
//! port.set_pin(10);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod device_manager;
pub mod hal;
pub mod hw;
pub mod peripheral;
pub mod platform;

// Re-export commonly used types
pub use device_manager::{PortId, PortManager};
pub use hal::gpio::{DriverError, GpioDriver, PinConfig, PinLevel};
pub use peripheral::port::GpioPort;
pub use platform::{CurrentPlatform, Platform};
