//! System Control Block: vector table location.

use core::ptr::read_volatile;

/// Address of the Vector Table Offset Register.
pub const SCB_VTOR: usize = 0xE000_ED08;

/// Bits of VTOR holding the table address.
const TBLOFF_MASK: u32 = 0xFFFF_FF80;

pub struct Scb {
    vtor: *const u32,
}

// SAFETY: single MMIO word, read with volatile operations only.
unsafe impl Send for Scb {}
unsafe impl Sync for Scb {}

impl Scb {
    /// # Safety
    /// `vtor` must be the address of VTOR.
    pub const unsafe fn new(vtor: usize) -> Self {
        Self {
            vtor: vtor as *const u32,
        }
    }

    /// Base address of the active vector table.
    pub fn vector_table(&self) -> usize {
        (unsafe { read_volatile(self.vtor) } & TBLOFF_MASK) as usize
    }
}
