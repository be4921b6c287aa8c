//! GPIO port registry.
//!
//! A [`PortManager`] owns every port descriptor of a platform together
//! with the ports' runtime records, stored side by side in fixed arrays and
//! addressed by [`PortId`]. It is `const`-constructible so a platform can
//! keep its manager in a `static`, and it never allocates.

use crate::peripheral::port::{GpioPort, PortDescriptor, PortState};
use crate::platform::Platform;

/// Index of a port within its [`PortManager`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PortId(pub usize);

pub struct PortManager<P: Platform, const N: usize> {
    platform: P,
    ports: [PortDescriptor<P::Registers>; N],
    states: [PortState; N],
}

impl<P: Platform, const N: usize> PortManager<P, N> {
    pub const fn new(platform: P, ports: [PortDescriptor<P::Registers>; N]) -> Self {
        Self {
            platform,
            ports,
            states: [const { PortState::new() }; N],
        }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Driver handle for port `id`, if it exists.
    pub fn port(&self, id: PortId) -> Option<GpioPort<'_, P>> {
        let port = self.ports.get(id.0)?;
        let state = self.states.get(id.0)?;
        Some(GpioPort::new(&self.platform, port, state))
    }

    /// Driver handle for port `I`, checked at compile time.
    pub fn port_at<const I: usize>(&self) -> GpioPort<'_, P> {
        const { assert!(I < N, "port index out of range") };
        GpioPort::new(&self.platform, &self.ports[I], &self.states[I])
    }

    /// Look a port up by descriptor name.
    pub fn find(&self, name: &str) -> Option<GpioPort<'_, P>> {
        let index = self.ports.iter().position(|port| port.name == name)?;
        self.port(PortId(index))
    }

    pub fn ports(&self) -> impl Iterator<Item = GpioPort<'_, P>> {
        self.ports
            .iter()
            .zip(self.states.iter())
            .map(|(port, state)| GpioPort::new(&self.platform, port, state))
    }

    /// Run the shared dispatcher for port `id`.
    ///
    /// Returns the acknowledged event mask, or `None` for an unknown port.
    pub fn dispatch(&self, id: PortId) -> Option<u32> {
        self.port(id).map(|port| port.handle_interrupt())
    }
}
