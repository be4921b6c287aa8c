//! Interrupt Vector Hardware Abstraction Layer.
//!
//! The GPIO core never writes the vector table itself; it asks the
//! platform to do so through [`VectorTable`].

/// Interrupt number type (exception vector index).
pub type IrqNumber = u32;

/// Entry point placed in a vector slot.
pub type Handler = extern "C" fn();

/// Writable exception vector table.
pub trait VectorTable {
    /// Point vector `irq` at `handler`.
    fn install(&self, irq: IrqNumber, handler: Handler);

    /// Make preceding vector writes visible before any interrupt is taken.
    fn barrier(&self);
}
