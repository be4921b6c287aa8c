use crate::hal::port::{PortRegister, PortRegisters};
use core::mem::offset_of;
use core::ptr::{read_volatile, write_volatile};

/// Memory-mapped layout of a PORTx block.
///
/// Reserved words keep `isfr` at 0xA0 and the digital filter registers
/// at 0xC0.
#[allow(dead_code)]
#[repr(C)]
struct PortRegs {
    /// Pin control registers, one per pin.
    pcr: [u32; 32],
    /// Global pin control, low and high half. Write-only.
    gpclr: u32,
    gpchr: u32,
    _reserved0: [u32; 6],
    /// Interrupt status flags, write-1-to-clear.
    isfr: u32,
    _reserved1: [u32; 7],
    /// Digital filter enable, clock and width.
    dfer: u32,
    dfcr: u32,
    dfwr: u32,
}

/// Memory-mapped layout of a PTx block.
#[allow(dead_code)]
#[repr(C)]
struct GpioRegs {
    /// Port data output.
    pdor: u32,
    /// Port set output. Write-only.
    psor: u32,
    /// Port clear output. Write-only.
    pcor: u32,
    /// Port toggle output. Write-only.
    ptor: u32,
    /// Port data input. Read-only.
    pdir: u32,
    /// Port data direction.
    pddr: u32,
}

/// One K66 port: its PORTx pin control block and PTx data block.
pub struct K66Port {
    port: *mut PortRegs,
    gpio: *mut GpioRegs,
}

// SAFETY: the pointers name fixed MMIO blocks and every access is a
// single volatile word access.
unsafe impl Send for K66Port {}
unsafe impl Sync for K66Port {}

impl K66Port {
    /// # Safety
    /// `port_base` and `gpio_base` must be the PORTx and PTx block
    /// addresses of the same port, mapped for the lifetime of this value.
    pub const unsafe fn new(port_base: usize, gpio_base: usize) -> Self {
        Self {
            port: port_base as *mut PortRegs,
            gpio: gpio_base as *mut GpioRegs,
        }
    }

    /// Address of `reg`, or `None` for a pin outside the block.
    fn register(&self, reg: PortRegister) -> Option<*mut u32> {
        let (base, offset) = match reg {
            PortRegister::PinControl(pin) if pin < 32 => {
                (self.port.cast::<u8>(), offset_of!(PortRegs, pcr) + 4 * pin as usize)
            }
            PortRegister::PinControl(_) => return None,
            PortRegister::InterruptStatus => (self.port.cast(), offset_of!(PortRegs, isfr)),
            PortRegister::DataOutput => (self.gpio.cast(), offset_of!(GpioRegs, pdor)),
            PortRegister::SetOutput => (self.gpio.cast(), offset_of!(GpioRegs, psor)),
            PortRegister::ClearOutput => (self.gpio.cast(), offset_of!(GpioRegs, pcor)),
            PortRegister::ToggleOutput => (self.gpio.cast(), offset_of!(GpioRegs, ptor)),
            PortRegister::DataInput => (self.gpio.cast(), offset_of!(GpioRegs, pdir)),
            PortRegister::DataDirection => (self.gpio.cast(), offset_of!(GpioRegs, pddr)),
        };
        Some(base.wrapping_add(offset).cast::<u32>())
    }
}

impl PortRegisters for K66Port {
    fn read(&self, reg: PortRegister) -> u32 {
        match reg {
            PortRegister::SetOutput | PortRegister::ClearOutput | PortRegister::ToggleOutput => 0,
            _ => match self.register(reg) {
                // SAFETY: `register` returned an address inside the blocks
                // handed to `new`.
                Some(ptr) => unsafe { read_volatile(ptr) },
                None => 0,
            },
        }
    }

    fn write(&self, reg: PortRegister, value: u32) {
        if reg == PortRegister::DataInput {
            return;
        }
        if let Some(ptr) = self.register(reg) {
            // SAFETY: as in `read`.
            unsafe { write_volatile(ptr, value) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::size_of;

    #[test]
    fn port_block_layout() {
        assert_eq!(offset_of!(PortRegs, gpclr), 0x80);
        assert_eq!(offset_of!(PortRegs, gpchr), 0x84);
        assert_eq!(offset_of!(PortRegs, isfr), 0xA0);
        assert_eq!(offset_of!(PortRegs, dfer), 0xC0);
        assert_eq!(offset_of!(PortRegs, dfwr), 0xC8);
    }

    #[test]
    fn gpio_block_layout() {
        assert_eq!(offset_of!(GpioRegs, psor), 0x04);
        assert_eq!(offset_of!(GpioRegs, pdir), 0x10);
        assert_eq!(offset_of!(GpioRegs, pddr), 0x14);
        assert_eq!(size_of::<GpioRegs>(), 0x18);
    }

    #[test]
    fn registers_resolve_into_their_block() {
        let port = unsafe { K66Port::new(0x4004_A000, 0x400F_F040) };
        let addr = |reg| port.register(reg).map(|ptr| ptr as usize);

        assert_eq!(addr(PortRegister::PinControl(5)), Some(0x4004_A014));
        assert_eq!(addr(PortRegister::PinControl(32)), None);
        assert_eq!(addr(PortRegister::InterruptStatus), Some(0x4004_A0A0));
        assert_eq!(addr(PortRegister::ToggleOutput), Some(0x400F_F04C));
        assert_eq!(addr(PortRegister::DataDirection), Some(0x400F_F054));
    }
}
