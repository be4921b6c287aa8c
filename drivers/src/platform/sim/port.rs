//! Simulated port register file.

use crate::hal::port::{PortRegister, PortRegisters};
use crate::peripheral::port::codec::PinControl;
use spin::Mutex;

const ISF: u32 = PinControl::INTERRUPT_FLAG.bits();
const IRQC_SHIFT: u32 = 16;

#[derive(Debug)]
struct Registers {
    pcr: [u32; 32],
    isfr: u32,
    pdor: u32,
    pddr: u32,
    /// Levels applied to the pads from outside.
    pads: u32,
}

impl Registers {
    const fn new() -> Self {
        Self {
            pcr: [0; 32],
            isfr: 0,
            pdor: 0,
            pddr: 0,
            pads: 0,
        }
    }

    fn input(&self) -> u32 {
        (self.pdor & self.pddr) | (self.pads & !self.pddr)
    }
}

/// One port controller plus its data block, held in memory.
///
/// Models the behaviour the driver depends on: set/clear/toggle output
/// registers, the write-1-to-clear interrupt status register and its
/// mirror in each pin control register, and the input register reading
/// back outputs for output pins and pad levels for input pins.
#[derive(Debug)]
pub struct SimPort {
    regs: Mutex<Registers>,
}

impl SimPort {
    pub const fn new() -> Self {
        Self {
            regs: Mutex::new(Registers::new()),
        }
    }

    /// Latch interrupt flags for `mask` as if the port detected events.
    pub fn latch(&self, mask: u32) {
        self.regs.lock().isfr |= mask;
    }

    /// Drive the pads in `mask` to `level` from outside.
    ///
    /// Pins whose interrupt configuration matches the resulting edge or
    /// level get their flag latched.
    pub fn drive(&self, mask: u32, level: bool) {
        let mut regs = self.regs.lock();
        let before = regs.pads;
        if level {
            regs.pads |= mask;
        } else {
            regs.pads &= !mask;
        }

        let rising = !before & regs.pads;
        let falling = before & !regs.pads;
        let high = regs.pads & mask;
        let low = !regs.pads & mask;

        let mut latched = 0;
        for pin in (0..32usize).filter(|&pin| mask & (1u32 << pin) != 0) {
            let hit = match (regs.pcr[pin] >> IRQC_SHIFT) & 0xF {
                0x9 => rising,
                0xA => falling,
                0xB => rising | falling,
                0xC => high,
                0x8 => low,
                _ => 0,
            };
            latched |= hit & (1u32 << pin);
        }
        regs.isfr |= latched;
    }
}

impl Default for SimPort {
    fn default() -> Self {
        Self::new()
    }
}

impl PortRegisters for SimPort {
    fn read(&self, reg: PortRegister) -> u32 {
        let regs = self.regs.lock();
        match reg {
            PortRegister::PinControl(pin) => match regs.pcr.get(pin as usize) {
                Some(pcr) if regs.isfr & (1u32 << pin) != 0 => pcr | ISF,
                Some(pcr) => *pcr,
                None => 0,
            },
            PortRegister::InterruptStatus => regs.isfr,
            PortRegister::DataOutput => regs.pdor,
            PortRegister::DataInput => regs.input(),
            PortRegister::DataDirection => regs.pddr,
            PortRegister::SetOutput | PortRegister::ClearOutput | PortRegister::ToggleOutput => 0,
        }
    }

    fn write(&self, reg: PortRegister, value: u32) {
        let mut regs = self.regs.lock();
        match reg {
            PortRegister::PinControl(pin) => {
                let Some(slot) = regs.pcr.get_mut(pin as usize) else {
                    return;
                };
                *slot = value & !ISF;
                if value & ISF != 0 {
                    regs.isfr &= !(1u32 << pin);
                }
            }
            PortRegister::InterruptStatus => regs.isfr &= !value,
            PortRegister::DataOutput => regs.pdor = value,
            PortRegister::SetOutput => regs.pdor |= value,
            PortRegister::ClearOutput => regs.pdor &= !value,
            PortRegister::ToggleOutput => regs.pdor ^= value,
            PortRegister::DataDirection => regs.pddr = value,
            PortRegister::DataInput => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_flags_are_write_one_to_clear() {
        let port = SimPort::new();
        port.latch(0b1011);

        port.write(PortRegister::InterruptStatus, 0b0001);
        assert_eq!(port.read(PortRegister::InterruptStatus), 0b1010);

        // The flag is mirrored in the pin control register.
        assert_eq!(port.read(PortRegister::PinControl(3)), ISF);
        port.write(PortRegister::PinControl(3), ISF);
        assert_eq!(port.read(PortRegister::InterruptStatus), 0b0010);
        assert_eq!(port.read(PortRegister::PinControl(3)), 0);
    }

    #[test]
    fn drive_latches_configured_edges_only() {
        let port = SimPort::new();
        port.write(PortRegister::PinControl(1), 0x9 << IRQC_SHIFT);
        port.write(PortRegister::PinControl(2), 0xA << IRQC_SHIFT);

        port.drive(0b110, true);
        assert_eq!(port.read(PortRegister::InterruptStatus), 0b010);

        port.drive(0b110, false);
        assert_eq!(port.read(PortRegister::InterruptStatus), 0b110);
    }

    #[test]
    fn write_only_registers_read_zero() {
        let port = SimPort::new();
        port.write(PortRegister::SetOutput, 0xF0);

        assert_eq!(port.read(PortRegister::SetOutput), 0);
        assert_eq!(port.read(PortRegister::DataOutput), 0xF0);
        // All pins are inputs, so outputs are not visible on the pads.
        assert_eq!(port.read(PortRegister::DataInput), 0);
    }
}
