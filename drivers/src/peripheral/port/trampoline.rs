//! Per-port interrupt entry points.
//!
//! A vector slot holds a bare `extern "C" fn()`, which cannot carry the
//! port it belongs to. Each port therefore gets a zero-sized type naming
//! its static driver handle, and [`trampoline`] is instantiated once per
//! such type.

use super::driver::GpioPort;
use crate::platform::Platform;

/// A port whose driver handle lives in a `static`.
pub trait StaticPort: 'static {
    type Platform: Platform + 'static;

    fn port() -> GpioPort<'static, Self::Platform>;
}

/// Interrupt entry point for port `S`.
pub extern "C" fn trampoline<S: StaticPort>() {
    S::port().handle_interrupt();
}

/// Declare [`StaticPort`] types for the ports of a static
/// [`PortManager`](crate::device_manager::PortManager).
///
/// ```ignore
/// static_ports!(GPIO: K66Platform => {
///     pub PortA = 0,
///     pub PortB = 1,
/// });
/// ```
#[macro_export]
macro_rules! static_ports {
    ($manager:path : $platform:ty => { $($(#[$meta:meta])* $vis:vis $name:ident = $index:literal),+ $(,)? }) => {
        $(
            $(#[$meta])*
            $vis struct $name;

            impl $crate::peripheral::port::StaticPort for $name {
                type Platform = $platform;

                fn port() -> $crate::peripheral::port::GpioPort<'static, $platform> {
                    $manager.port_at::<$index>()
                }
            }
        )+
    };
}
