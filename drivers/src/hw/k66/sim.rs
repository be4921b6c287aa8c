//! System Integration Module: peripheral clock gating.

use core::ptr::{read_volatile, write_volatile};

/// Address of System Clock Gating Control Register 5.
pub const SIM_SCGC5: usize = 0x4004_8038;

/// SCGC5 gate bit positions of the port clocks.
pub const SCGC5_PORTA: u32 = 9;
pub const SCGC5_PORTB: u32 = 10;
pub const SCGC5_PORTC: u32 = 11;
pub const SCGC5_PORTD: u32 = 12;
pub const SCGC5_PORTE: u32 = 13;

/// Clock gating register.
pub struct ClockGating {
    scgc5: *mut u32,
}

// SAFETY: single MMIO word, accessed with volatile operations only.
unsafe impl Send for ClockGating {}
unsafe impl Sync for ClockGating {}

impl ClockGating {
    /// # Safety
    /// `base` must be the address of SCGC5, mapped for the lifetime of
    /// this value.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            scgc5: base as *mut u32,
        }
    }

    /// Set or clear the gate bits in `mask`.
    ///
    /// Read-modify-write; callers serialise against other writers.
    pub fn set(&self, mask: u32, enabled: bool) {
        // SAFETY: `scgc5` is the register handed to `new`.
        unsafe {
            let value = read_volatile(self.scgc5);
            let value = if enabled { value | mask } else { value & !mask };
            write_volatile(self.scgc5, value);
        }
    }

    pub fn is_enabled(&self, mask: u32) -> bool {
        unsafe { read_volatile(self.scgc5) & mask == mask }
    }
}
