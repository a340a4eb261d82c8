//! Digital I/O backends
//!
//! Real pins go through the Linux sysfs GPIO interface. When GPIO is disabled,
//! or the pins cannot be opened, the client falls back to a key that is never
//! pressed and a sounder that only logs, which still lets it monitor a channel.

use std::fs;
use std::path::{Path, PathBuf};

use shared::{Component, PinLevel, component_debug, component_info, component_warn};
use shared::logging::log_error;
use crate::config::TelegraphConfig;
use crate::error::{TelegraphError, TelegraphResult};
use crate::traits::{KeyInput, SounderOutput};

/// Mount point of the sysfs GPIO class
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// Initial direction written when exporting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    /// Output, initially at the given level
    Out(PinLevel),
}

impl Direction {
    fn as_sysfs(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out(PinLevel::Low) => "low",
            Direction::Out(PinLevel::High) => "high",
        }
    }
}

/// An exported sysfs GPIO pin
#[derive(Debug, Clone)]
pub struct SysfsPin {
    number: u32,
    value_path: PathBuf,
}

impl SysfsPin {
    /// Export `number` under `root` (if not already exported) and set its direction
    pub fn export(root: &Path, number: u32, direction: Direction) -> TelegraphResult<Self> {
        let gpio_error = |e: std::io::Error| TelegraphError::Gpio {
            pin: number,
            message: e.to_string(),
        };

        let pin_dir = root.join(format!("gpio{number}"));
        if !pin_dir.exists() {
            fs::write(root.join("export"), number.to_string()).map_err(gpio_error)?;
        }
        fs::write(pin_dir.join("direction"), direction.as_sysfs()).map_err(gpio_error)?;

        component_debug!(Component::Gpio, "Exported pin {} as {}", number, direction.as_sysfs());
        Ok(Self {
            number,
            value_path: pin_dir.join("value"),
        })
    }

    fn read_level(&self) -> TelegraphResult<PinLevel> {
        let raw = fs::read_to_string(&self.value_path).map_err(|e| TelegraphError::Gpio {
            pin: self.number,
            message: e.to_string(),
        })?;

        match raw.trim() {
            "0" => Ok(PinLevel::Low),
            "1" => Ok(PinLevel::High),
            other => Err(TelegraphError::Gpio {
                pin: self.number,
                message: format!("unexpected value {other:?}"),
            }),
        }
    }

    fn write_level(&self, level: PinLevel) -> TelegraphResult<()> {
        let value = match level {
            PinLevel::Low => "0",
            PinLevel::High => "1",
        };
        fs::write(&self.value_path, value).map_err(|e| TelegraphError::Gpio {
            pin: self.number,
            message: e.to_string(),
        })
    }
}

/// Key input on a sysfs pin. The pull-up comes from the board or device tree;
/// sysfs cannot configure it.
#[derive(Debug)]
pub struct SysfsKeyInput {
    pin: SysfsPin,
}

impl SysfsKeyInput {
    pub fn open(root: &Path, number: u32) -> TelegraphResult<Self> {
        Ok(Self {
            pin: SysfsPin::export(root, number, Direction::In)?,
        })
    }
}

impl KeyInput for SysfsKeyInput {
    fn read(&mut self) -> TelegraphResult<PinLevel> {
        self.pin.read_level()
    }
}

/// Sounder output on a sysfs pin, starting silent
#[derive(Debug)]
pub struct SysfsSounder {
    pin: SysfsPin,
}

impl SysfsSounder {
    /// `idle` is the level that keeps this pin's sounder quiet
    pub fn open(root: &Path, number: u32, idle: PinLevel) -> TelegraphResult<Self> {
        Ok(Self {
            pin: SysfsPin::export(root, number, Direction::Out(idle))?,
        })
    }
}

impl SounderOutput for SysfsSounder {
    fn write(&mut self, level: PinLevel) -> TelegraphResult<()> {
        self.pin.write_level(level)
    }
}

/// Key that is never pressed
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualKey;

impl KeyInput for VirtualKey {
    fn read(&mut self) -> TelegraphResult<PinLevel> {
        Ok(PinLevel::High)
    }
}

/// Sounder that logs level changes instead of driving a pin
#[derive(Debug, Clone)]
pub struct LogSounder {
    name: &'static str,
    last: Option<PinLevel>,
}

impl LogSounder {
    pub fn new(name: &'static str) -> Self {
        Self { name, last: None }
    }
}

impl SounderOutput for LogSounder {
    fn write(&mut self, level: PinLevel) -> TelegraphResult<()> {
        if self.last != Some(level) {
            component_info!(Component::Gpio, "{} sounder {}", self.name, level);
            self.last = Some(level);
        }
        Ok(())
    }
}

/// The pins the key poller and tone driver are built from
pub struct Hardware {
    pub key: Box<dyn KeyInput>,
    pub sounder: Box<dyn SounderOutput>,
    pub inverted_sounder: Option<Box<dyn SounderOutput>>,
}

impl Hardware {
    pub fn virtual_pins(with_inverted: bool) -> Self {
        Self {
            key: Box::new(VirtualKey),
            sounder: Box::new(LogSounder::new("primary")),
            inverted_sounder: with_inverted
                .then(|| Box::new(LogSounder::new("inverted")) as Box<dyn SounderOutput>),
        }
    }

    /// Open the configured pins under `root`
    pub fn sysfs(root: &Path, config: &TelegraphConfig) -> TelegraphResult<Self> {
        let key = SysfsKeyInput::open(root, config.key_pin)?;
        let sounder = SysfsSounder::open(root, config.sounder_pin, PinLevel::Low)?;
        let inverted_sounder = match config.inverted_sounder_pin {
            Some(number) => Some(Box::new(SysfsSounder::open(root, number, PinLevel::High)?)
                as Box<dyn SounderOutput>),
            None => None,
        };

        Ok(Self {
            key: Box::new(key),
            sounder: Box::new(sounder),
            inverted_sounder,
        })
    }

    /// Pins per configuration; hardware failures degrade to virtual pins
    pub fn open(config: &TelegraphConfig) -> Self {
        let with_inverted = config.inverted_sounder_pin.is_some();
        if !config.gpio {
            component_info!(Component::Gpio, "GPIO disabled, using virtual key and sounder");
            return Self::virtual_pins(with_inverted);
        }

        match Self::sysfs(Path::new(SYSFS_GPIO_ROOT), config) {
            Ok(hardware) => {
                component_info!(
                    Component::Gpio,
                    "GPIO open: key pin {}, sounder pin {}, inverted pin {:?}",
                    config.key_pin,
                    config.sounder_pin,
                    config.inverted_sounder_pin
                );
                hardware
            }
            Err(e) => {
                log_error(Component::Gpio, "Initializing GPIO", &e);
                component_warn!(Component::Gpio, "Continuing with virtual key and sounder");
                Self::virtual_pins(with_inverted)
            }
        }
    }
}
