//! Trill command frames.
//!
//! Every configuration command is a single write starting with the command
//! register offset, followed by the opcode and up to two parameter bytes.

use core::fmt;

use arrayvec::ArrayVec;

use super::layout::*;
use super::types::{Mode, ScanSettings};

/// Bytes of one command frame as written to the bus.
pub type CommandFrame = ArrayVec<u8, MAX_COMMAND_FRAME>;

/// A command written to the sensor's command register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask the device for its type and firmware version (2-byte response).
    Identify,
    /// Select what the data region reports.
    SetMode(Mode),
    /// Scan speed and ADC resolution.
    ScanSettings(ScanSettings),
    Prescaler(u8),
    NoiseThreshold(u8),
    Idac(u8),
    /// Minimum size for a touch to be reported. Sent big-endian.
    MinimumSize(u16),
    /// Re-capture the baseline of every channel.
    BaselineUpdate,
}

impl Command {
    pub const fn opcode(&self) -> u8 {
        match self {
            Command::Identify => CMD_IDENTIFY,
            Command::SetMode(_) => CMD_MODE,
            Command::ScanSettings(_) => CMD_SCAN_SETTINGS,
            Command::Prescaler(_) => CMD_PRESCALER,
            Command::NoiseThreshold(_) => CMD_NOISE_THRESHOLD,
            Command::Idac(_) => CMD_IDAC,
            Command::MinimumSize(_) => CMD_MINIMUM_SIZE,
            Command::BaselineUpdate => CMD_BASELINE_UPDATE,
        }
    }

    /// Formats the complete frame: `[OFFSET_COMMAND, opcode, params...]`.
    pub fn frame(&self) -> CommandFrame {
        let mut frame = CommandFrame::new();
        frame.push(OFFSET_COMMAND);
        frame.push(self.opcode());
        match *self {
            Command::Identify | Command::BaselineUpdate => {}
            Command::SetMode(mode) => frame.push(mode.code()),
            Command::ScanSettings(settings) => {
                frame.push(settings.speed);
                frame.push(settings.num_bits);
            }
            Command::Prescaler(value) | Command::NoiseThreshold(value) | Command::Idac(value) => {
                frame.push(value)
            }
            Command::MinimumSize(size) => {
                let [high, low] = size.to_be_bytes();
                frame.push(high);
                frame.push(low);
            }
        }
        frame
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Identify => write!(f, "identify"),
            Command::SetMode(mode) => write!(f, "mode {:?}", mode),
            Command::ScanSettings(s) => write!(f, "scan speed {} bits {}", s.speed, s.num_bits),
            Command::Prescaler(v) => write!(f, "prescaler {}", v),
            Command::NoiseThreshold(v) => write!(f, "noise threshold {}", v),
            Command::Idac(v) => write!(f, "idac {}", v),
            Command::MinimumSize(v) => write!(f, "minimum size {}", v),
            Command::BaselineUpdate => write!(f, "baseline update"),
        }
    }
}
