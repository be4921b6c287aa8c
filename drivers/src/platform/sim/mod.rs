//! Host simulation platform.
//!
//! Stands in for a five-port board on the host: port registers live in
//! memory ([`SimPort`]), the vector table is an array the tests can
//! "fire", and clock gates are bits in a word. The board mirrors the
//! Kinetis layout (vectors 75 to 79, gates 9 to 13) so the same
//! application flow runs unchanged.

mod port;

pub use port::SimPort;

use super::Platform;
use crate::device_manager::{PortId, PortManager};
use crate::hal::gpio::{API_VERSION, Capabilities, DriverInfo, DriverVersion, version_major_minor};
use crate::hal::interrupt::{Handler, IrqNumber, VectorTable};
use crate::hal::power::{ClockControl, ClockGate};
use crate::peripheral::port::{GpioPort, PortDescriptor, trampoline};
use common::arch::CpuIrq;
use core::ptr;
use core::sync::atomic::{AtomicPtr, AtomicU32, Ordering};

/// Number of vector slots.
pub const VECTORS: usize = 128;

/// Driver metadata reported by simulated ports.
pub const SIM_INFO: DriverInfo = DriverInfo {
    version: DriverVersion {
        api: API_VERSION,
        drv: version_major_minor(0, 0),
    },
    capabilities: Capabilities::all(),
};

pub struct SimPlatform {
    vectors: [AtomicPtr<()>; VECTORS],
    clocks: AtomicU32,
    barriers: AtomicU32,
}

impl SimPlatform {
    pub const fn new() -> Self {
        Self {
            vectors: [const { AtomicPtr::new(ptr::null_mut()) }; VECTORS],
            clocks: AtomicU32::new(0),
            barriers: AtomicU32::new(0),
        }
    }

    /// Handler installed at `irq`, if any.
    pub fn handler(&self, irq: IrqNumber) -> Option<Handler> {
        let raw = self.vectors.get(irq as usize)?.load(Ordering::Acquire);
        if raw.is_null() {
            None
        } else {
            // SAFETY: non-null slots are only written by `install`, from a
            // `Handler`.
            Some(unsafe { core::mem::transmute::<*mut (), Handler>(raw) })
        }
    }

    /// Take interrupt `irq`. Returns false if no handler is installed.
    pub fn fire(&self, irq: IrqNumber) -> bool {
        match self.handler(irq) {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    pub fn clock_enabled(&self, gate: ClockGate) -> bool {
        gate < u32::BITS && self.clocks.load(Ordering::Relaxed) & (1 << gate) != 0
    }

    /// Number of vector barriers issued so far.
    pub fn barrier_count(&self) -> u32 {
        self.barriers.load(Ordering::Relaxed)
    }
}

impl Default for SimPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorTable for SimPlatform {
    fn install(&self, irq: IrqNumber, handler: Handler) {
        match self.vectors.get(irq as usize) {
            Some(slot) => slot.store(handler as *mut (), Ordering::Release),
            None => log::warn!("sim: vector {} out of range", irq),
        }
    }

    fn barrier(&self) {
        self.barriers.fetch_add(1, Ordering::Relaxed);
    }
}

impl ClockControl for SimPlatform {
    fn set_clock(&self, gate: ClockGate, enabled: bool) {
        let Some(bit) = 1u32.checked_shl(gate) else {
            log::warn!("sim: clock gate {} out of range", gate);
            return;
        };
        if enabled {
            self.clocks.fetch_or(bit, Ordering::Relaxed);
        } else {
            self.clocks.fetch_and(!bit, Ordering::Relaxed);
        }
    }
}

impl Platform for SimPlatform {
    type Registers = SimPort;
    type Irq = CpuIrq;

    fn name() -> &'static str {
        "Simulated five-port board"
    }
}

const fn sim_port(
    name: &'static str,
    irq: IrqNumber,
    handler: Handler,
    clock: ClockGate,
) -> PortDescriptor<SimPort> {
    PortDescriptor {
        name,
        regs: SimPort::new(),
        irq,
        handler,
        clock,
        info: &SIM_INFO,
    }
}

/// Ports A to E of the simulated board.
pub static BOARD: PortManager<SimPlatform, 5> = PortManager::new(
    SimPlatform::new(),
    [
        sim_port("PORTA", 75, trampoline::<SimPortA>, 9),
        sim_port("PORTB", 76, trampoline::<SimPortB>, 10),
        sim_port("PORTC", 77, trampoline::<SimPortC>, 11),
        sim_port("PORTD", 78, trampoline::<SimPortD>, 12),
        sim_port("PORTE", 79, trampoline::<SimPortE>, 13),
    ],
);

crate::static_ports!(BOARD: SimPlatform => {
    pub SimPortA = 0,
    pub SimPortB = 1,
    pub SimPortC = 2,
    pub SimPortD = 3,
    pub SimPortE = 4,
});

/// Driver for board port `index` (0 = A).
pub fn port(index: usize) -> Option<GpioPort<'static, SimPlatform>> {
    BOARD.port(PortId(index))
}
