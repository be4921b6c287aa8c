pub mod irq;
pub use irq::{IrqControl, critical_section};
