//! Architecture and synchronisation primitives shared by the driver crates.
//!
//! - [`arch`]: CPU-level operations (interrupt masking, memory barriers)
//! - [`sync`]: interfaces built on top of them

#![cfg_attr(not(test), no_std)]

pub mod arch;
pub mod sync;
