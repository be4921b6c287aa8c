//! GPIO (General Purpose Input/Output) Hardware Abstraction Layer.
//!
//! This module defines the platform-independent surface of a GPIO port
//! driver: the value types accepted by pin control, the version and
//! capability records, and the [`GpioDriver`] operation set that every port
//! instance exposes.
//!
//! # Status codes
//!
//! Fallible operations return [`Result`] with a [`DriverError`]. Callers
//! that speak the numeric driver convention can convert with
//! [`status_code`]: `0` for success, [`DRIVER_ERROR_UNSUPPORTED`] and
//! [`DRIVER_ERROR_PARAMETER`] for the two failure classes.

use crate::hal::power::PowerState;
use bitflags::bitflags;

/// Number of pins addressed by one port.
pub const PINS_PER_PORT: u32 = 32;

/// Operation succeeded.
pub const DRIVER_OK: i32 = 0;
/// Operation, command or power state not supported.
pub const DRIVER_ERROR_UNSUPPORTED: i32 = -4;
/// Parameter out of range or not a member of its enumeration.
pub const DRIVER_ERROR_PARAMETER: i32 = -5;

/// Pin logic level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinLevel {
    /// Logic low (0V or ground).
    Low,
    /// Logic high (VDD).
    High,
}

impl From<bool> for PinLevel {
    fn from(value: bool) -> Self {
        if value {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

impl From<PinLevel> for bool {
    fn from(level: PinLevel) -> bool {
        matches!(level, PinLevel::High)
    }
}

impl From<PinLevel> for u32 {
    fn from(level: PinLevel) -> u32 {
        bool::from(level) as u32
    }
}

/// Errors reported by GPIO driver operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// Unrecognised control code or power state.
    Unsupported,
    /// Pin index out of range, or an argument outside its enumeration.
    Parameter,
}

impl DriverError {
    /// Signed status code for this error.
    pub const fn code(self) -> i32 {
        match self {
            DriverError::Unsupported => DRIVER_ERROR_UNSUPPORTED,
            DriverError::Parameter => DRIVER_ERROR_PARAMETER,
        }
    }
}

/// Collapse an operation result into a signed status code.
pub fn status_code(result: Result<(), DriverError>) -> i32 {
    match result {
        Ok(()) => DRIVER_OK,
        Err(e) => e.code(),
    }
}

/// Pack a `major.minor` version pair into its 16-bit encoding.
pub const fn version_major_minor(major: u8, minor: u8) -> u16 {
    ((major as u16) << 8) | minor as u16
}

/// Version of the GPIO driver API implemented by this crate.
pub const API_VERSION: u16 = version_major_minor(0, 0);

/// API and implementation version of a driver instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DriverVersion {
    /// API version.
    pub api: u16,
    /// Driver implementation version.
    pub drv: u16,
}

bitflags! {
    /// Features a driver instance claims to support.
    ///
    /// The driver never consults these itself; they tell callers which
    /// pin-control arguments are meaningful on a given instance.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Capabilities: u32 {
        /// Rising edge interrupts.
        const RISING_EDGE = 1 << 0;
        /// Falling edge interrupts.
        const FALLING_EDGE = 1 << 1;
        /// Interrupts on both edges.
        const BOTH_EDGES = 1 << 2;
        /// Level-high sensitive interrupts.
        const LEVEL_HIGH = 1 << 3;
        /// Level-low sensitive interrupts.
        const LEVEL_LOW = 1 << 4;
        /// Internal pull-up resistor.
        const PULL_UP = 1 << 5;
        /// Internal pull-down resistor.
        const PULL_DOWN = 1 << 6;
        /// Output speed (slew rate) selection.
        const SPEED = 1 << 7;
        /// Open-drain outputs.
        const OPEN_DRAIN = 1 << 8;
        /// Drive strength selection.
        const DRIVE_STRENGTH = 1 << 9;
    }
}

/// Fixed identity of a driver implementation: what it is and what it can do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DriverInfo {
    pub version: DriverVersion,
    pub capabilities: Capabilities,
}

impl DriverInfo {
    /// Generic template driver: edge interrupts only.
    pub const TEMPLATE: DriverInfo = DriverInfo {
        version: DriverVersion {
            api: API_VERSION,
            drv: version_major_minor(1, 0),
        },
        capabilities: Capabilities::RISING_EDGE.union(Capabilities::FALLING_EDGE),
    };
}

/// Driver status snapshot.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct GpioStatus {
    /// Event mask captured by the most recent interrupt dispatch.
    pub events: u32,
}

/// Event notification: receives the mask of pins whose interrupt fired.
///
/// Invoked from interrupt context; it must not block.
pub type SignalEvent = fn(u32);

/// Implements `TryFrom<u32>` for a closed, numbered enumeration.
macro_rules! closed_enum {
    ($ty:ident, $err:expr, { $($value:literal => $variant:ident),+ $(,)? }) => {
        impl TryFrom<u32> for $ty {
            type Error = DriverError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok($ty::$variant),)+
                    _ => Err($err),
                }
            }
        }
    };
}

pub(crate) use closed_enum;

/// Pin control commands accepted by [`GpioDriver::control_pin`].
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinCommand {
    /// Configure every pin attribute at once; `arg` uses the [`cfg`] layout.
    Config = 0x01,
    /// Route the pin to GPIO or away from it; `arg` is a [`PinState`].
    State = 0x02,
    /// `arg` is a [`Direction`].
    Direction = 0x03,
    /// `arg` is an [`InterruptMode`].
    Irq = 0x04,
    /// `arg` is a [`PullMode`].
    Pull = 0x05,
    /// `arg` is a [`Speed`].
    Speed = 0x06,
    /// `arg` is an [`OpenDrain`].
    OpenDrain = 0x07,
    /// `arg` is a [`DriveStrength`].
    DriveStrength = 0x08,
}

closed_enum!(PinCommand, DriverError::Unsupported, {
    0x01 => Config,
    0x02 => State,
    0x03 => Direction,
    0x04 => Irq,
    0x05 => Pull,
    0x06 => Speed,
    0x07 => OpenDrain,
    0x08 => DriveStrength,
});

/// Whether the pin is routed to the GPIO function.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinState {
    Disabled = 0,
    Enabled = 1,
}

closed_enum!(PinState, DriverError::Parameter, { 0 => Disabled, 1 => Enabled });

/// Pin direction.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Input = 0,
    Output = 1,
}

closed_enum!(Direction, DriverError::Parameter, { 0 => Input, 1 => Output });

/// Interrupt trigger for a pin.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum InterruptMode {
    /// Interrupt disabled.
    #[default]
    None = 0,
    /// Rising edge (low-to-high transition).
    Rising = 1,
    /// Falling edge (high-to-low transition).
    Falling = 2,
    /// Either edge.
    Both = 3,
    /// While the pin is high.
    LevelHigh = 4,
    /// While the pin is low.
    LevelLow = 5,
}

closed_enum!(InterruptMode, DriverError::Parameter, {
    0 => None,
    1 => Rising,
    2 => Falling,
    3 => Both,
    4 => LevelHigh,
    5 => LevelLow,
});

/// Internal pull resistor configuration.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PullMode {
    /// No pull resistor (high impedance).
    #[default]
    None = 0,
    /// Enable internal pull-up resistor.
    Up = 1,
    /// Enable internal pull-down resistor.
    Down = 2,
}

closed_enum!(PullMode, DriverError::Parameter, { 0 => None, 1 => Up, 2 => Down });

/// Output speed.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Speed {
    #[default]
    VeryHigh = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

closed_enum!(Speed, DriverError::Parameter, {
    0 => VeryHigh,
    1 => High,
    2 => Medium,
    3 => Low,
});

/// Open-drain output selection.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OpenDrain {
    Disabled = 0,
    Enabled = 1,
}

closed_enum!(OpenDrain, DriverError::Parameter, { 0 => Disabled, 1 => Enabled });

/// Output driver strength.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum DriveStrength {
    #[default]
    Low = 0,
    High = 1,
}

closed_enum!(DriveStrength, DriverError::Parameter, { 0 => Low, 1 => High });

/// Bit layout of the [`PinCommand::Config`] argument.
///
/// ```text
///  10    9     8..7   6..5   4..2   1     0
/// [DSE] [ODE] [SPEED] [PULL] [IRQ] [DIR] [EN]
/// ```
pub mod cfg {
    use super::{InterruptMode, PullMode, Speed};

    pub const ENABLED_POS: u32 = 0;
    /// Pin routed to GPIO.
    pub const ENABLED: u32 = 1 << ENABLED_POS;

    pub const OUTPUT_POS: u32 = 1;
    /// Pin is an output.
    pub const OUTPUT: u32 = 1 << OUTPUT_POS;

    pub const IRQ_POS: u32 = 2;
    pub const IRQ_MASK: u32 = 0x7 << IRQ_POS;
    pub const IRQ_NONE: u32 = (InterruptMode::None as u32) << IRQ_POS;
    pub const IRQ_RISING: u32 = (InterruptMode::Rising as u32) << IRQ_POS;
    pub const IRQ_FALLING: u32 = (InterruptMode::Falling as u32) << IRQ_POS;
    pub const IRQ_BOTH: u32 = (InterruptMode::Both as u32) << IRQ_POS;
    pub const IRQ_LEVEL_HIGH: u32 = (InterruptMode::LevelHigh as u32) << IRQ_POS;
    pub const IRQ_LEVEL_LOW: u32 = (InterruptMode::LevelLow as u32) << IRQ_POS;

    pub const PULL_POS: u32 = 5;
    pub const PULL_MASK: u32 = 0x3 << PULL_POS;
    pub const PULL_NONE: u32 = (PullMode::None as u32) << PULL_POS;
    pub const PULL_UP: u32 = (PullMode::Up as u32) << PULL_POS;
    pub const PULL_DOWN: u32 = (PullMode::Down as u32) << PULL_POS;

    pub const SPEED_POS: u32 = 7;
    pub const SPEED_MASK: u32 = 0x3 << SPEED_POS;
    pub const SPEED_VERY_HIGH: u32 = (Speed::VeryHigh as u32) << SPEED_POS;
    pub const SPEED_HIGH: u32 = (Speed::High as u32) << SPEED_POS;
    pub const SPEED_MEDIUM: u32 = (Speed::Medium as u32) << SPEED_POS;
    pub const SPEED_LOW: u32 = (Speed::Low as u32) << SPEED_POS;

    pub const OPEN_DRAIN_POS: u32 = 9;
    /// Open-drain output enabled.
    pub const OPEN_DRAIN: u32 = 1 << OPEN_DRAIN_POS;

    pub const DRIVE_STRENGTH_POS: u32 = 10;
    /// High drive strength.
    pub const DRIVE_STRENGTH: u32 = 1 << DRIVE_STRENGTH_POS;

    /// Every bit with a meaning in the layout.
    pub const MASK: u32 = (1 << (DRIVE_STRENGTH_POS + 1)) - 1;
}

/// Complete configuration of one pin.
///
/// The all-zero [`Default`] is a disabled input with no pull, no
/// interrupt, very-high speed, push-pull, low drive strength.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PinConfig {
    /// Routed to GPIO rather than an alternate function.
    pub enabled: bool,
    pub direction: Direction,
    pub interrupt: InterruptMode,
    pub pull: PullMode,
    pub speed: Speed,
    pub open_drain: bool,
    pub drive_strength: DriveStrength,
}

impl PinConfig {
    /// Enabled GPIO input.
    pub const fn input() -> Self {
        Self {
            enabled: true,
            direction: Direction::Input,
            interrupt: InterruptMode::None,
            pull: PullMode::None,
            speed: Speed::VeryHigh,
            open_drain: false,
            drive_strength: DriveStrength::Low,
        }
    }

    /// Enabled GPIO output.
    pub const fn output() -> Self {
        Self {
            direction: Direction::Output,
            ..Self::input()
        }
    }

    pub const fn with_interrupt(mut self, interrupt: InterruptMode) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub const fn with_pull(mut self, pull: PullMode) -> Self {
        self.pull = pull;
        self
    }

    pub const fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    pub const fn with_open_drain(mut self, open_drain: bool) -> Self {
        self.open_drain = open_drain;
        self
    }

    pub const fn with_drive_strength(mut self, drive_strength: DriveStrength) -> Self {
        self.drive_strength = drive_strength;
        self
    }
}

/// GPIO port driver.
///
/// One implementor value stands for one physical port. The method order is
/// the driver's operation table: lifecycle first, then whole-port data
/// operations, then pin-scoped operations.
///
/// Methods take `&self`: the hardware registers are the only mutable state
/// besides the per-port runtime record, and the data operations map to
/// single register accesses that are safe from any context.
pub trait GpioDriver {
    /// API and driver version.
    fn version(&self) -> DriverVersion;

    /// Supported features.
    fn capabilities(&self) -> Capabilities;

    /// Bind `callback` and install this port's interrupt handler.
    ///
    /// Calling it again rebinds the callback and reinstalls the handler.
    fn initialize(&self, callback: Option<SignalEvent>) -> Result<(), DriverError>;

    /// Release the driver. Pin configuration is left as is.
    fn uninitialize(&self) -> Result<(), DriverError>;

    /// Gate or ungate the port clock.
    fn power_control(&self, state: PowerState) -> Result<(), DriverError>;

    /// Port-wide control command.
    fn control(&self, control: u32, arg: u32) -> Result<(), DriverError>;

    /// Latest status snapshot.
    fn status(&self) -> GpioStatus;

    /// Drive the pins in `mask` high.
    fn set_port(&self, mask: u32);

    /// Drive the pins in `mask` low.
    fn clear_port(&self, mask: u32);

    /// Invert the pins in `mask`.
    fn toggle_port(&self, mask: u32);

    /// Replace the whole output state.
    fn write_port(&self, values: u32);

    /// Current pad levels of all pins.
    fn read_port(&self) -> u32;

    /// Latched interrupt flags. Reading does not clear them.
    fn port_events(&self) -> u32;

    /// Clear the latched interrupt flags in `mask`.
    fn clear_port_events(&self, mask: u32);

    /// Apply a [`PinCommand`] with its argument to `pin`.
    fn control_pin(&self, pin: u32, control: u32, arg: u32) -> Result<(), DriverError>;

    /// Drive `pin` high.
    fn set_pin(&self, pin: u32);

    /// Drive `pin` low.
    fn clear_pin(&self, pin: u32);

    /// Invert `pin`.
    fn toggle_pin(&self, pin: u32);

    /// Drive `pin` high for any non-zero `value`, low otherwise.
    fn write_pin(&self, pin: u32, value: u32);

    /// Pad level of `pin` as `0` or `1`.
    fn read_pin(&self, pin: u32) -> u32;

    /// Apply a complete [`PinConfig`] to `pin`.
    fn configure_pin(&self, pin: u32, config: PinConfig) -> Result<(), DriverError> {
        self.control_pin(pin, PinCommand::Config as u32, config.to_bits())
    }

    /// Pad level of `pin`.
    fn level(&self, pin: u32) -> PinLevel {
        PinLevel::from(self.read_pin(pin) != 0)
    }
}
