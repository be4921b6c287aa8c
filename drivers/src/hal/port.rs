//! Port Register Interface.
//!
//! A port peripheral is modelled as a small set of named 32-bit registers.
//! The driver core only reads and writes these names; a platform adapter
//! maps them onto memory-mapped hardware, and the simulation maps them
//! onto a plain register file.

/// Named register of a port peripheral.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PortRegister {
    /// Pin control register of one pin (mux, pull, slew rate, drive,
    /// interrupt configuration).
    PinControl(u8),
    /// Latched interrupt flags, one bit per pin, write-1-to-clear.
    InterruptStatus,
    /// Output data.
    DataOutput,
    /// Write-only: sets the output bits written as 1.
    SetOutput,
    /// Write-only: clears the output bits written as 1.
    ClearOutput,
    /// Write-only: toggles the output bits written as 1.
    ToggleOutput,
    /// Read-only: current pad levels.
    DataInput,
    /// Direction, one bit per pin, 1 = output.
    DataDirection,
}

/// Register-level access to one port.
///
/// Methods take `&self`: registers are shared hardware state and
/// implementors are expected to use volatile (or otherwise interior
/// mutable) accesses. Reads of write-only registers return 0 and writes to
/// read-only registers are ignored.
pub trait PortRegisters {
    /// Read the full register value.
    fn read(&self, reg: PortRegister) -> u32;

    /// Write the full register value.
    fn write(&self, reg: PortRegister, value: u32);

    /// Read-modify-write `reg`.
    ///
    /// Not atomic with respect to other writers of the same register.
    fn modify(&self, reg: PortRegister, f: impl FnOnce(u32) -> u32) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }
}
