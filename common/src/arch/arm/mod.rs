pub mod barrier;
pub mod irq;
