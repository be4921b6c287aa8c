//! NXP Kinetis K66 (MK66F18) platform.
//!
//! Five ports, A to E. Each port's interrupt vector is pointed at its own
//! trampoline when the port driver is initialised; the vector table must
//! already live in RAM (VTOR relocated by the startup code).

use super::Platform;
use crate::device_manager::{PortId, PortManager};
use crate::hal::gpio::{API_VERSION, Capabilities, DriverInfo, DriverVersion, version_major_minor};
use crate::hal::interrupt::{Handler, IrqNumber, VectorTable};
use crate::hal::power::{ClockControl, ClockGate};
use crate::hw::k66::port::K66Port;
use crate::hw::k66::scb::{SCB_VTOR, Scb};
use crate::hw::k66::sim::{self as clocks, ClockGating, SIM_SCGC5};
use crate::hw::k66::{self, VECTOR_COUNT};
use crate::peripheral::port::{GpioPort, PortDescriptor, trampoline};
use common::arch::{CpuIrq, barrier};
use common::sync::critical_section;
use core::ptr::write_volatile;

/// Driver metadata reported by every K66 port.
pub const K66_INFO: DriverInfo = DriverInfo {
    version: DriverVersion {
        api: API_VERSION,
        drv: version_major_minor(0, 0),
    },
    capabilities: Capabilities::all(),
};

pub struct K66Platform {
    scb: Scb,
    clocks: ClockGating,
}

impl K66Platform {
    /// # Safety
    /// Must run on a K66 with the SCB and SIM blocks at their reset
    /// addresses. Only one instance may exist.
    pub const unsafe fn new() -> Self {
        unsafe {
            Self {
                scb: Scb::new(SCB_VTOR),
                clocks: ClockGating::new(SIM_SCGC5),
            }
        }
    }
}

impl VectorTable for K66Platform {
    fn install(&self, irq: IrqNumber, handler: Handler) {
        if irq as usize >= VECTOR_COUNT {
            log::warn!("k66: vector {} out of range", irq);
            return;
        }

        let table = self.scb.vector_table() as *mut Handler;
        // SAFETY: the table is relocated to RAM and holds VECTOR_COUNT
        // entries.
        unsafe { write_volatile(table.add(irq as usize), handler) };
    }

    fn barrier(&self) {
        barrier::dsb();
        barrier::isb();
    }
}

impl ClockControl for K66Platform {
    fn set_clock(&self, gate: ClockGate, enabled: bool) {
        let Some(mask) = 1u32.checked_shl(gate) else {
            log::warn!("k66: clock gate {} out of range", gate);
            return;
        };
        critical_section::<CpuIrq, _>(|| self.clocks.set(mask, enabled));
    }
}

impl Platform for K66Platform {
    type Registers = K66Port;
    type Irq = CpuIrq;

    fn name() -> &'static str {
        "NXP Kinetis K66"
    }
}

const fn k66_port(
    name: &'static str,
    port_base: usize,
    gpio_base: usize,
    irq: IrqNumber,
    handler: Handler,
    clock: ClockGate,
) -> PortDescriptor<K66Port> {
    PortDescriptor {
        name,
        // SAFETY: bases come from the K66 memory map below.
        regs: unsafe { K66Port::new(port_base, gpio_base) },
        irq,
        handler,
        clock,
        info: &K66_INFO,
    }
}

/// Ports A to E.
static GPIO: PortManager<K66Platform, 5> = PortManager::new(
    // SAFETY: this is the only instance.
    unsafe { K66Platform::new() },
    [
        k66_port(
            "PORTA",
            k66::PORTA_BASE,
            k66::PTA_BASE,
            k66::INT_PORTA,
            trampoline::<PortA>,
            clocks::SCGC5_PORTA,
        ),
        k66_port(
            "PORTB",
            k66::PORTB_BASE,
            k66::PTB_BASE,
            k66::INT_PORTB,
            trampoline::<PortB>,
            clocks::SCGC5_PORTB,
        ),
        k66_port(
            "PORTC",
            k66::PORTC_BASE,
            k66::PTC_BASE,
            k66::INT_PORTC,
            trampoline::<PortC>,
            clocks::SCGC5_PORTC,
        ),
        k66_port(
            "PORTD",
            k66::PORTD_BASE,
            k66::PTD_BASE,
            k66::INT_PORTD,
            trampoline::<PortD>,
            clocks::SCGC5_PORTD,
        ),
        k66_port(
            "PORTE",
            k66::PORTE_BASE,
            k66::PTE_BASE,
            k66::INT_PORTE,
            trampoline::<PortE>,
            clocks::SCGC5_PORTE,
        ),
    ],
);

crate::static_ports!(GPIO: K66Platform => {
    pub PortA = 0,
    pub PortB = 1,
    pub PortC = 2,
    pub PortD = 3,
    pub PortE = 4,
});

/// Driver for port `index` (0 = PORTA).
pub fn port(index: usize) -> Option<GpioPort<'static, K66Platform>> {
    GPIO.port(PortId(index))
}

/// All five port drivers.
pub fn ports() -> impl Iterator<Item = GpioPort<'static, K66Platform>> {
    GPIO.ports()
}
