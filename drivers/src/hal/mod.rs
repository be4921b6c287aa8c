//! Hardware Abstraction Layer (HAL) - Platform-Independent Traits
//!
//! This module defines the types and traits the GPIO driver core is
//! written against. Platform code implements the collaborator traits
//! ([`port::PortRegisters`], [`interrupt::VectorTable`],
//! [`power::ClockControl`]); application code talks to
//! [`gpio::GpioDriver`].
//!
//! # Design Principles
//!
//! - **Zero-cost abstractions**: Traits compile to direct hardware access
//! - **No platform leakage**: Traits must not reference platform-specific types
//! - **Testability**: every collaborator can be backed by a simulation
//!
//! # Available Interfaces
//!
//! - [`gpio`]: GPIO driver surface and pin configuration types
//! - [`port`]: Register interface of a port peripheral
//! - [`interrupt`]: Vector installation
//! - [`power`]: Power states and clock gating

pub mod gpio;
pub mod interrupt;
pub mod port;
pub mod power;
