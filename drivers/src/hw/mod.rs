//! Raw register layouts and memory-mapped access.
//!
//! Nothing here knows about the driver API; platform bindings build on
//! these blocks.

pub mod k66;
