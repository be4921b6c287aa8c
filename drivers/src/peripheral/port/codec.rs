//! Pin configuration codec.
//!
//! Translates pin-control requests into pin control register values. The
//! composite [`PinCommand::Config`] request is decoded and validated in full
//! before the first register write, so a rejected argument leaves the pin
//! untouched. Single-aspect commands read-modify-write only their own field.
//!
//! # Pin control register
//!
//! ```text
//!  24    19..16  10..8  6     5     4     2     1    0
//! [ISF] [IRQC]  [MUX]  [DSE] [ODE] [PFE] [SRE] [PE] [PS]
//! ```
//!
//! `ISF` mirrors the pin's bit in the interrupt status register and is
//! write-1-to-clear, so it is masked out of every write issued here.

use crate::hal::gpio::{
    Direction, DriveStrength, DriverError, InterruptMode, OpenDrain, PinCommand, PinConfig,
    PinState, PullMode, Speed, cfg,
};
use crate::hal::port::{PortRegister, PortRegisters};
use bitflags::bitflags;
use common::sync::{IrqControl, critical_section};

bitflags! {
    /// Fields of a pin control register.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct PinControl: u32 {
        /// Pull select: 1 = pull-up, 0 = pull-down.
        const PULL_SELECT = 1 << 0;
        /// Pull enable.
        const PULL_ENABLE = 1 << 1;
        /// Slow slew rate.
        const SLOW_SLEW = 1 << 2;
        /// Passive input filter.
        const PASSIVE_FILTER = 1 << 4;
        /// Open-drain output.
        const OPEN_DRAIN = 1 << 5;
        /// High drive strength.
        const DRIVE_STRENGTH = 1 << 6;
        /// Pin mux field.
        const MUX = 0x7 << 8;
        /// Lock: register is read-only until reset.
        const LOCK = 1 << 15;
        /// Interrupt configuration field.
        const IRQC = 0xF << 16;
        /// Interrupt flag (write-1-to-clear).
        const INTERRUPT_FLAG = 1 << 24;
    }
}

const MUX_SHIFT: u32 = 8;
const MUX_GPIO: u32 = 1;
const IRQC_SHIFT: u32 = 16;

impl PinControl {
    /// Mux field selecting alternative `alt`.
    pub const fn mux(alt: u32) -> Self {
        Self::from_bits_retain((alt << MUX_SHIFT) & Self::MUX.bits())
    }

    /// Mux field routing the pin to GPIO.
    pub const fn gpio() -> Self {
        Self::mux(MUX_GPIO)
    }

    /// Interrupt configuration field holding hardware code `code`.
    pub const fn irqc(code: u32) -> Self {
        Self::from_bits_retain((code << IRQC_SHIFT) & Self::IRQC.bits())
    }

    /// Interrupt configuration field for `mode`.
    pub const fn interrupt(mode: InterruptMode) -> Self {
        Self::irqc(irqc_code(mode))
    }

    /// Pull field for `pull`.
    pub const fn pull(pull: PullMode) -> Self {
        match pull {
            PullMode::None => Self::empty(),
            PullMode::Up => Self::PULL_ENABLE.union(Self::PULL_SELECT),
            PullMode::Down => Self::PULL_ENABLE,
        }
    }

    /// Slew-rate field for `speed`. Low and medium speed use slow slew.
    pub const fn speed(speed: Speed) -> Self {
        match speed {
            Speed::Low | Speed::Medium => Self::SLOW_SLEW,
            Speed::High | Speed::VeryHigh => Self::empty(),
        }
    }
}

/// Hardware interrupt configuration code for `mode`.
pub const fn irqc_code(mode: InterruptMode) -> u32 {
    match mode {
        InterruptMode::None => 0x0,
        InterruptMode::Rising => 0x9,
        InterruptMode::Falling => 0xA,
        InterruptMode::Both => 0xB,
        InterruptMode::LevelHigh => 0xC,
        InterruptMode::LevelLow => 0x8,
    }
}

impl PinConfig {
    /// Decode a [`PinCommand::Config`] argument.
    ///
    /// Every field is validated; bits outside [`cfg::MASK`] are ignored.
    pub fn from_bits(arg: u32) -> Result<Self, DriverError> {
        let field = |mask: u32, pos: u32| (arg & mask) >> pos;

        Ok(Self {
            enabled: arg & cfg::ENABLED != 0,
            direction: Direction::try_from(field(cfg::OUTPUT, cfg::OUTPUT_POS))?,
            interrupt: InterruptMode::try_from(field(cfg::IRQ_MASK, cfg::IRQ_POS))?,
            pull: PullMode::try_from(field(cfg::PULL_MASK, cfg::PULL_POS))?,
            speed: Speed::try_from(field(cfg::SPEED_MASK, cfg::SPEED_POS))?,
            open_drain: arg & cfg::OPEN_DRAIN != 0,
            drive_strength: DriveStrength::try_from(field(
                cfg::DRIVE_STRENGTH,
                cfg::DRIVE_STRENGTH_POS,
            ))?,
        })
    }

    /// Encode as a [`PinCommand::Config`] argument.
    pub const fn to_bits(&self) -> u32 {
        (self.enabled as u32) << cfg::ENABLED_POS
            | (self.direction as u32) << cfg::OUTPUT_POS
            | (self.interrupt as u32) << cfg::IRQ_POS
            | (self.pull as u32) << cfg::PULL_POS
            | (self.speed as u32) << cfg::SPEED_POS
            | (self.open_drain as u32) << cfg::OPEN_DRAIN_POS
            | (self.drive_strength as u32) << cfg::DRIVE_STRENGTH_POS
    }

    /// Consolidated pin control register value. Direction lives in the
    /// port direction register and is not part of it.
    pub const fn pin_control(&self) -> PinControl {
        let mut pcr = PinControl::interrupt(self.interrupt)
            .union(PinControl::pull(self.pull))
            .union(PinControl::speed(self.speed));
        if self.enabled {
            pcr = pcr.union(PinControl::gpio());
        }
        if self.open_drain {
            pcr = pcr.union(PinControl::OPEN_DRAIN);
        }
        if matches!(self.drive_strength, DriveStrength::High) {
            pcr = pcr.union(PinControl::DRIVE_STRENGTH);
        }
        pcr
    }
}

/// Apply a raw pin-control request to `pin`.
///
/// `pin` must already be range-checked. The direction register is shared by
/// the whole port, so its read-modify-write runs with interrupts masked
/// through `I`.
pub fn apply<R, I>(regs: &R, pin: u8, control: u32, arg: u32) -> Result<(), DriverError>
where
    R: PortRegisters,
    I: IrqControl,
{
    match PinCommand::try_from(control)? {
        PinCommand::Config => {
            let config = PinConfig::from_bits(arg)?;
            log::trace!("pin {}: configure {:?}", pin, config);
            regs.write(PortRegister::PinControl(pin), config.pin_control().bits());
            set_direction::<R, I>(regs, pin, config.direction);
        }
        PinCommand::State => {
            let mux = match PinState::try_from(arg)? {
                PinState::Disabled => PinControl::empty(),
                PinState::Enabled => PinControl::gpio(),
            };
            update(regs, pin, PinControl::MUX, mux);
        }
        PinCommand::Direction => {
            set_direction::<R, I>(regs, pin, Direction::try_from(arg)?);
        }
        PinCommand::Irq => {
            let mode = InterruptMode::try_from(arg)?;
            update(regs, pin, PinControl::IRQC, PinControl::interrupt(mode));
        }
        PinCommand::Pull => {
            let pull = PullMode::try_from(arg)?;
            update(
                regs,
                pin,
                PinControl::PULL_ENABLE | PinControl::PULL_SELECT,
                PinControl::pull(pull),
            );
        }
        PinCommand::Speed => {
            let speed = Speed::try_from(arg)?;
            update(regs, pin, PinControl::SLOW_SLEW, PinControl::speed(speed));
        }
        PinCommand::OpenDrain => {
            let open_drain = match OpenDrain::try_from(arg)? {
                OpenDrain::Disabled => PinControl::empty(),
                OpenDrain::Enabled => PinControl::OPEN_DRAIN,
            };
            update(regs, pin, PinControl::OPEN_DRAIN, open_drain);
        }
        PinCommand::DriveStrength => {
            let drive = match DriveStrength::try_from(arg)? {
                DriveStrength::Low => PinControl::empty(),
                DriveStrength::High => PinControl::DRIVE_STRENGTH,
            };
            update(regs, pin, PinControl::DRIVE_STRENGTH, drive);
        }
    }

    Ok(())
}

/// Replace the `field` bits of `pin`'s control register with `value`.
fn update<R: PortRegisters>(regs: &R, pin: u8, field: PinControl, value: PinControl) {
    regs.modify(PortRegister::PinControl(pin), |pcr| {
        let pcr = PinControl::from_bits_retain(pcr)
            .difference(field | PinControl::INTERRUPT_FLAG)
            .union(value);
        pcr.bits()
    });
}

fn set_direction<R, I>(regs: &R, pin: u8, direction: Direction)
where
    R: PortRegisters,
    I: IrqControl,
{
    let bit = 1u32 << pin;
    critical_section::<I, _>(|| {
        regs.modify(PortRegister::DataDirection, |pddr| match direction {
            Direction::Input => pddr & !bit,
            Direction::Output => pddr | bit,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::sim::SimPort;
    use common::arch::CpuIrq;

    fn pcr(port: &SimPort, pin: u8) -> u32 {
        port.read(PortRegister::PinControl(pin))
    }

    fn ddr(port: &SimPort) -> u32 {
        port.read(PortRegister::DataDirection)
    }

    fn control(port: &SimPort, pin: u8, command: PinCommand, arg: u32) -> Result<(), DriverError> {
        apply::<_, CpuIrq>(port, pin, command as u32, arg)
    }

    #[test]
    fn interrupt_modes_map_to_hardware_codes() {
        let port = SimPort::new();
        let expected = [0x0, 0x9, 0xA, 0xB, 0xC, 0x8];

        for (mode, code) in expected.into_iter().enumerate() {
            control(&port, 4, PinCommand::Irq, mode as u32).unwrap();
            assert_eq!(pcr(&port, 4), code << 16, "mode {}", mode);
        }
    }

    #[test]
    fn composite_matches_single_aspect_commands() {
        let args = [
            cfg::ENABLED | cfg::OUTPUT,
            cfg::ENABLED | cfg::IRQ_RISING | cfg::PULL_UP,
            cfg::ENABLED | cfg::IRQ_LEVEL_LOW | cfg::PULL_DOWN | cfg::SPEED_LOW,
            cfg::OUTPUT | cfg::SPEED_MEDIUM | cfg::OPEN_DRAIN | cfg::DRIVE_STRENGTH,
            cfg::ENABLED | cfg::IRQ_BOTH | cfg::SPEED_HIGH | cfg::DRIVE_STRENGTH,
        ];

        for arg in args {
            let composite = SimPort::new();
            control(&composite, 7, PinCommand::Config, arg).unwrap();

            let config = PinConfig::from_bits(arg).unwrap();
            let single = SimPort::new();
            let steps = [
                (PinCommand::State, config.enabled as u32),
                (PinCommand::Direction, config.direction as u32),
                (PinCommand::Irq, config.interrupt as u32),
                (PinCommand::Pull, config.pull as u32),
                (PinCommand::Speed, config.speed as u32),
                (PinCommand::OpenDrain, config.open_drain as u32),
                (PinCommand::DriveStrength, config.drive_strength as u32),
            ];
            for (command, value) in steps {
                control(&single, 7, command, value).unwrap();
            }

            assert_eq!(pcr(&composite, 7), pcr(&single, 7), "arg {:#x}", arg);
            assert_eq!(ddr(&composite), ddr(&single), "arg {:#x}", arg);
        }
    }

    #[test]
    fn enabled_output_matches_state_then_direction() {
        for pin in [0, 10, 31] {
            let composite = SimPort::new();
            control(&composite, pin, PinCommand::Config, cfg::ENABLED | cfg::OUTPUT).unwrap();

            let separate = SimPort::new();
            control(&separate, pin, PinCommand::State, PinState::Enabled as u32).unwrap();
            control(&separate, pin, PinCommand::Direction, Direction::Output as u32).unwrap();

            assert_eq!(pcr(&composite, pin), pcr(&separate, pin));
            assert_eq!(ddr(&composite), ddr(&separate));
        }
    }

    #[test]
    fn enabled_output_is_gpio_mux_and_direction_bit() {
        let port = SimPort::new();
        control(&port, 10, PinCommand::Config, cfg::ENABLED | cfg::OUTPUT).unwrap();

        assert_eq!(pcr(&port, 10), PinControl::gpio().bits());
        assert_eq!(ddr(&port), 1 << 10);
    }

    #[test]
    fn invalid_composite_field_writes_nothing() {
        let port = SimPort::new();
        control(&port, 3, PinCommand::Config, cfg::ENABLED | cfg::OUTPUT).unwrap();
        let before = (pcr(&port, 3), ddr(&port));

        // Interrupt mode 6 and pull mode 3 are outside their enumerations.
        let bad_irq = (6 << cfg::IRQ_POS) | cfg::PULL_UP;
        let bad_pull = cfg::ENABLED | (3 << cfg::PULL_POS);
        assert_eq!(control(&port, 3, PinCommand::Config, bad_irq), Err(DriverError::Parameter));
        assert_eq!(control(&port, 3, PinCommand::Config, bad_pull), Err(DriverError::Parameter));

        assert_eq!((pcr(&port, 3), ddr(&port)), before);
    }

    #[test]
    fn single_aspect_commands_leave_other_fields() {
        let port = SimPort::new();
        let arg = cfg::ENABLED | cfg::IRQ_FALLING | cfg::PULL_UP | cfg::DRIVE_STRENGTH;
        control(&port, 0, PinCommand::Config, arg).unwrap();

        control(&port, 0, PinCommand::OpenDrain, OpenDrain::Enabled as u32).unwrap();
        let expected = PinControl::gpio()
            | PinControl::interrupt(InterruptMode::Falling)
            | PinControl::pull(PullMode::Up)
            | PinControl::DRIVE_STRENGTH
            | PinControl::OPEN_DRAIN;
        assert_eq!(pcr(&port, 0), expected.bits());

        control(&port, 0, PinCommand::Pull, PullMode::Down as u32).unwrap();
        let expected = expected.difference(PinControl::PULL_SELECT);
        assert_eq!(pcr(&port, 0), expected.bits());

        control(&port, 0, PinCommand::State, PinState::Disabled as u32).unwrap();
        assert_eq!(pcr(&port, 0), expected.difference(PinControl::MUX).bits());
    }

    #[test]
    fn invalid_single_aspect_argument_is_rejected() {
        let port = SimPort::new();
        control(&port, 9, PinCommand::Config, cfg::ENABLED | cfg::IRQ_RISING).unwrap();
        let before = pcr(&port, 9);

        let cases = [
            (PinCommand::State, 2),
            (PinCommand::Direction, 2),
            (PinCommand::Irq, 6),
            (PinCommand::Pull, 3),
            (PinCommand::Speed, 4),
            (PinCommand::OpenDrain, 2),
            (PinCommand::DriveStrength, 2),
        ];
        for (command, arg) in cases {
            assert_eq!(control(&port, 9, command, arg), Err(DriverError::Parameter));
        }

        assert_eq!(pcr(&port, 9), before);
        assert_eq!(ddr(&port), 0);
    }

    #[test]
    fn unknown_command_is_unsupported() {
        let port = SimPort::new();
        assert_eq!(apply::<_, CpuIrq>(&port, 1, 0, 0), Err(DriverError::Unsupported));
        assert_eq!(apply::<_, CpuIrq>(&port, 1, 9, 1), Err(DriverError::Unsupported));
        assert_eq!(pcr(&port, 1), 0);
    }

    #[test]
    fn modify_does_not_acknowledge_pending_flag() {
        let port = SimPort::new();
        port.latch(1 << 5);

        control(&port, 5, PinCommand::Speed, Speed::Low as u32).unwrap();

        assert_eq!(port.read(PortRegister::InterruptStatus), 1 << 5);
    }

    #[test]
    fn config_round_trips_through_argument() {
        let config = PinConfig::output()
            .with_interrupt(InterruptMode::LevelHigh)
            .with_pull(PullMode::Down)
            .with_speed(Speed::Medium)
            .with_open_drain(true)
            .with_drive_strength(DriveStrength::High);

        assert_eq!(PinConfig::from_bits(config.to_bits()), Ok(config));
        assert_eq!(PinConfig::output().to_bits(), cfg::ENABLED | cfg::OUTPUT);
    }
}
