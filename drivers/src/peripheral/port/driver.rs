//! Generic GPIO port driver.
//!
//! [`GpioPort`] binds the shared driver logic to one port's descriptor and
//! runtime record. It is a pair of references, so handing out one per
//! physical port costs nothing and every operation is a direct call.

use super::codec;
use super::dispatch;
use super::state::{PortDescriptor, PortState};
use crate::hal::gpio::{
    Capabilities, DriverError, DriverVersion, GpioDriver, GpioStatus, PINS_PER_PORT, SignalEvent,
};
use crate::hal::port::{PortRegister, PortRegisters};
use crate::hal::power::PowerState;
use crate::platform::Platform;

/// Driver handle for one port of platform `P`.
pub struct GpioPort<'a, P: Platform> {
    platform: &'a P,
    port: &'a PortDescriptor<P::Registers>,
    state: &'a PortState,
}

impl<P: Platform> Clone for GpioPort<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Platform> Copy for GpioPort<'_, P> {}

impl<'a, P: Platform> GpioPort<'a, P> {
    pub const fn new(
        platform: &'a P,
        port: &'a PortDescriptor<P::Registers>,
        state: &'a PortState,
    ) -> Self {
        Self {
            platform,
            port,
            state,
        }
    }

    pub fn name(&self) -> &'static str {
        self.port.name
    }

    pub fn descriptor(&self) -> &'a PortDescriptor<P::Registers> {
        self.port
    }

    /// Service this port's interrupt. Called by the port trampoline.
    pub fn handle_interrupt(&self) -> u32 {
        dispatch::dispatch(&self.port.regs, self.state)
    }

    fn regs(&self) -> &P::Registers {
        &self.port.regs
    }

    /// Single-bit mask for `pin`, or `None` if it is not on this port.
    fn pin_mask(&self, pin: u32) -> Option<u32> {
        if pin < PINS_PER_PORT {
            Some(1 << pin)
        } else {
            log::warn!("{}: pin {} out of range, ignored", self.port.name, pin);
            None
        }
    }
}

impl<P: Platform> GpioDriver for GpioPort<'_, P> {
    fn version(&self) -> DriverVersion {
        self.port.info.version
    }

    fn capabilities(&self) -> Capabilities {
        self.port.info.capabilities
    }

    fn initialize(&self, callback: Option<SignalEvent>) -> Result<(), DriverError> {
        log::debug!(
            "{}: initialize, vector {} (callback: {})",
            self.port.name,
            self.port.irq,
            callback.is_some()
        );

        self.state.bind(callback);
        self.platform.install(self.port.irq, self.port.handler);
        self.platform.barrier();

        Ok(())
    }

    fn uninitialize(&self) -> Result<(), DriverError> {
        // Pins and the installed vector stay as they are: other
        // peripherals multiplexed on this port may still rely on them.
        log::debug!("{}: uninitialize", self.port.name);
        Ok(())
    }

    fn power_control(&self, state: PowerState) -> Result<(), DriverError> {
        match state {
            PowerState::Off => self.platform.set_clock(self.port.clock, false),
            PowerState::Full => self.platform.set_clock(self.port.clock, true),
            PowerState::Low => {
                log::warn!("{}: power state {:?} unsupported", self.port.name, state);
                return Err(DriverError::Unsupported);
            }
        }

        log::debug!("{}: power {:?}", self.port.name, state);
        Ok(())
    }

    fn control(&self, control: u32, _arg: u32) -> Result<(), DriverError> {
        // No port-wide control codes are defined.
        log::warn!("{}: control code {:#x} unsupported", self.port.name, control);
        Err(DriverError::Unsupported)
    }

    fn status(&self) -> GpioStatus {
        self.state.status()
    }

    fn set_port(&self, mask: u32) {
        self.regs().write(PortRegister::SetOutput, mask);
    }

    fn clear_port(&self, mask: u32) {
        self.regs().write(PortRegister::ClearOutput, mask);
    }

    fn toggle_port(&self, mask: u32) {
        self.regs().write(PortRegister::ToggleOutput, mask);
    }

    fn write_port(&self, values: u32) {
        self.regs().write(PortRegister::DataOutput, values);
    }

    fn read_port(&self) -> u32 {
        self.regs().read(PortRegister::DataInput)
    }

    fn port_events(&self) -> u32 {
        self.regs().read(PortRegister::InterruptStatus)
    }

    fn clear_port_events(&self, mask: u32) {
        self.regs().write(PortRegister::InterruptStatus, mask);
    }

    fn control_pin(&self, pin: u32, control: u32, arg: u32) -> Result<(), DriverError> {
        if pin >= PINS_PER_PORT {
            return Err(DriverError::Parameter);
        }

        codec::apply::<_, P::Irq>(self.regs(), pin as u8, control, arg).inspect_err(|e| {
            log::debug!(
                "{}: pin {} control {:#x} arg {:#x} rejected: {:?}",
                self.port.name,
                pin,
                control,
                arg,
                e
            );
        })
    }

    fn set_pin(&self, pin: u32) {
        if let Some(mask) = self.pin_mask(pin) {
            self.set_port(mask);
        }
    }

    fn clear_pin(&self, pin: u32) {
        if let Some(mask) = self.pin_mask(pin) {
            self.clear_port(mask);
        }
    }

    fn toggle_pin(&self, pin: u32) {
        if let Some(mask) = self.pin_mask(pin) {
            self.toggle_port(mask);
        }
    }

    fn write_pin(&self, pin: u32, value: u32) {
        if let Some(mask) = self.pin_mask(pin) {
            if value != 0 {
                self.set_port(mask);
            } else {
                self.clear_port(mask);
            }
        }
    }

    fn read_pin(&self, pin: u32) -> u32 {
        match self.pin_mask(pin) {
            Some(mask) => (self.read_port() & mask != 0) as u32,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_manager::{PortId, PortManager};
    use crate::hal::gpio::{
        DRIVER_ERROR_PARAMETER, DRIVER_ERROR_UNSUPPORTED, DRIVER_OK, DriverInfo, PinCommand,
        PinConfig, PinLevel, cfg, status_code,
    };
    use crate::platform::sim::{SIM_INFO, SimPlatform, SimPort};
    use core::sync::atomic::{AtomicU32, Ordering};

    extern "C" fn unused_handler() {}

    fn manager() -> PortManager<SimPlatform, 2> {
        PortManager::new(
            SimPlatform::new(),
            [
                PortDescriptor {
                    name: "A",
                    regs: SimPort::new(),
                    irq: 20,
                    handler: unused_handler,
                    clock: 0,
                    info: &SIM_INFO,
                },
                PortDescriptor {
                    name: "B",
                    regs: SimPort::new(),
                    irq: 21,
                    handler: unused_handler,
                    clock: 1,
                    info: &DriverInfo::TEMPLATE,
                },
            ],
        )
    }

    #[test]
    fn output_pins_read_back_written_level() {
        let gpio = manager();
        let port = gpio.port_at::<0>();

        for pin in 0..32 {
            assert_eq!(
                port.control_pin(pin, PinCommand::Direction as u32, 1),
                Ok(())
            );
            port.write_pin(pin, 1);
            assert_eq!(port.read_pin(pin), 1, "pin {}", pin);
            port.write_pin(pin, 0);
            assert_eq!(port.read_pin(pin), 0, "pin {}", pin);
        }
    }

    #[test]
    fn out_of_range_pin_is_rejected_without_writes() {
        let gpio = manager();
        let port = gpio.port_at::<0>();
        let regs = &port.descriptor().regs;

        for control in 0..=9 {
            assert_eq!(port.control_pin(32, control, 1), Err(DriverError::Parameter));
        }
        assert_eq!(
            port.control_pin(u32::MAX, PinCommand::Config as u32, cfg::ENABLED),
            Err(DriverError::Parameter)
        );

        port.set_pin(32);
        port.write_pin(40, 1);
        port.toggle_pin(33);
        assert_eq!(port.read_pin(32), 0);

        assert_eq!(regs.read(PortRegister::DataDirection), 0);
        assert_eq!(regs.read(PortRegister::DataOutput), 0);
        assert!((0..32).all(|pin| regs.read(PortRegister::PinControl(pin)) == 0));
    }

    #[test]
    fn power_states() {
        let gpio = manager();

        for port in gpio.ports() {
            assert_eq!(port.power_control(PowerState::Low), Err(DriverError::Unsupported));
            assert_eq!(port.power_control(PowerState::Full), Ok(()));
            assert!(gpio.platform().clock_enabled(port.descriptor().clock));
            assert_eq!(port.power_control(PowerState::Off), Ok(()));
            assert!(!gpio.platform().clock_enabled(port.descriptor().clock));
        }

        assert_eq!(PowerState::try_from(3), Err(DriverError::Unsupported));
    }

    #[test]
    fn port_events_and_clear() {
        let gpio = manager();
        let port = gpio.port_at::<1>();
        port.descriptor().regs.latch((1 << 3) | (1 << 7));

        assert_eq!(port.port_events(), 0b1000_1000);
        // Reading does not clear.
        assert_eq!(port.port_events(), 0b1000_1000);

        port.clear_port_events(0b0000_1000);
        assert_eq!(port.port_events(), 0b1000_0000);
    }

    #[test]
    fn port_data_operations() {
        let gpio = manager();
        let port = gpio.port_at::<0>();
        port.descriptor().regs.write(PortRegister::DataDirection, 0xFFFF);

        port.set_port((1 << 10) | (1 << 11));
        assert_eq!(port.read_port(), 0x0C00);

        port.clear_pin(11);
        port.toggle_port((1 << 10) | (1 << 11));
        assert_eq!(port.read_port(), 0x0800);

        port.write_port(0x00FF_00F0);
        assert_eq!(port.read_port(), 0x0000_00F0);

        port.toggle_pin(4);
        assert_eq!(port.level(4), PinLevel::Low);
        assert_eq!(port.level(5), PinLevel::High);
    }

    #[test]
    fn inputs_reflect_pad_levels() {
        let gpio = manager();
        let port = gpio.port_at::<0>();
        port.configure_pin(2, PinConfig::input()).unwrap();
        port.configure_pin(3, PinConfig::output()).unwrap();

        port.descriptor().regs.drive(1 << 2, true);
        port.set_pin(3);
        assert_eq!(port.read_port(), (1 << 2) | (1 << 3));

        // Output writes do not reach an input pad.
        port.clear_pin(2);
        assert_eq!(port.read_pin(2), 1);
    }

    static EVENTS: AtomicU32 = AtomicU32::new(0);

    fn record_events(events: u32) {
        EVENTS.fetch_or(events, Ordering::SeqCst);
    }

    #[test]
    fn initialize_binds_callback_and_installs_vector() {
        let gpio = manager();
        let port = gpio.port_at::<1>();

        assert_eq!(port.initialize(Some(record_events)), Ok(()));
        assert!(gpio.platform().handler(21).is_some());
        assert_eq!(gpio.platform().barrier_count(), 1);

        // Re-initialising rebinds.
        assert_eq!(port.initialize(None), Ok(()));
        assert_eq!(gpio.platform().barrier_count(), 2);
        port.descriptor().regs.latch(1 << 1);
        assert_eq!(port.handle_interrupt(), 1 << 1);
        assert_eq!(EVENTS.load(Ordering::SeqCst), 0);

        port.initialize(Some(record_events)).unwrap();
        port.descriptor().regs.latch(1 << 9);
        assert_eq!(gpio.dispatch(PortId(1)), Some(1 << 9));
        assert_eq!(EVENTS.load(Ordering::SeqCst), 1 << 9);
        assert_eq!(port.status().events, 1 << 9);
        assert_eq!(port.port_events(), 0);
    }

    #[test]
    fn version_capabilities_and_control() {
        let gpio = manager();
        let full = gpio.port_at::<0>();
        let template = gpio.port_at::<1>();

        assert_eq!(full.capabilities(), Capabilities::all());
        assert_eq!(
            template.capabilities(),
            Capabilities::RISING_EDGE | Capabilities::FALLING_EDGE
        );
        assert_eq!(template.version().drv, 0x0100);
        assert_eq!(full.version().api, template.version().api);

        assert_eq!(full.control(0, 0), Err(DriverError::Unsupported));
        assert_eq!(full.uninitialize(), Ok(()));
    }

    #[test]
    fn status_codes() {
        let gpio = manager();
        let port = gpio.port_at::<0>();

        assert_eq!(status_code(port.control_pin(0, 3, 1)), DRIVER_OK);
        assert_eq!(status_code(port.control_pin(32, 3, 1)), DRIVER_ERROR_PARAMETER);
        assert_eq!(status_code(port.control_pin(0, 42, 1)), DRIVER_ERROR_UNSUPPORTED);
        assert_ne!(DRIVER_ERROR_PARAMETER, DRIVER_ERROR_UNSUPPORTED);
    }

    #[test]
    fn ports_are_independent() {
        let gpio = manager();
        let a = gpio.port_at::<0>();
        let b = gpio.port_at::<1>();

        a.configure_pin(6, PinConfig::output()).unwrap();
        a.set_pin(6);

        assert_eq!(b.descriptor().regs.read(PortRegister::DataDirection), 0);
        assert_eq!(b.read_port(), 0);
        assert_eq!(a.read_port(), 1 << 6);
    }
}
