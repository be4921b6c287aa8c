//! NXP Kinetis K66 register blocks used by the GPIO driver.

pub mod port;
pub mod scb;
pub mod sim;

/// PORTx (pin control) register block bases.
pub const PORTA_BASE: usize = 0x4004_9000;
pub const PORTB_BASE: usize = 0x4004_A000;
pub const PORTC_BASE: usize = 0x4004_B000;
pub const PORTD_BASE: usize = 0x4004_C000;
pub const PORTE_BASE: usize = 0x4004_D000;

/// PTx (GPIO data) register block bases.
pub const PTA_BASE: usize = 0x400F_F000;
pub const PTB_BASE: usize = 0x400F_F040;
pub const PTC_BASE: usize = 0x400F_F080;
pub const PTD_BASE: usize = 0x400F_F0C0;
pub const PTE_BASE: usize = 0x400F_F100;

/// Exception vector numbers of the port interrupts.
pub const INT_PORTA: u32 = 75;
pub const INT_PORTB: u32 = 76;
pub const INT_PORTC: u32 = 77;
pub const INT_PORTD: u32 = 78;
pub const INT_PORTE: u32 = 79;

/// Number of entries in the vector table (16 system exceptions plus
/// external interrupts).
pub const VECTOR_COUNT: usize = 116;
