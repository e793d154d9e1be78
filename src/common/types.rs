// src/common/types.rs

use super::error::TrillError;
use super::layout::{RAW_LENGTH_1D, RAW_LENGTH_DEFAULT};
use core::fmt;

// --- Device identity ---

/// Sensor family reported by the identify command.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum DeviceType {
    /// No device answered.
    #[default]
    None,
    /// Linear (one-dimensional) sensor, e.g. Trill Bar.
    OneD,
    /// Two-dimensional sensor, e.g. Trill Square.
    TwoD,
    /// A type code this driver does not know about.
    Unknown(u8),
}

impl DeviceType {
    pub const fn code(&self) -> u8 {
        match self {
            DeviceType::None => 0,
            DeviceType::OneD => 1,
            DeviceType::TwoD => 2,
            DeviceType::Unknown(code) => *code,
        }
    }

    /// Raw frame length used when a raw request does not name one.
    pub const fn default_raw_length(&self) -> usize {
        match self {
            DeviceType::OneD => RAW_LENGTH_1D,
            _ => RAW_LENGTH_DEFAULT,
        }
    }

    #[inline]
    pub const fn is_present(&self) -> bool {
        !matches!(self, DeviceType::None)
    }
}

impl From<u8> for DeviceType {
    fn from(code: u8) -> Self {
        match code {
            0 => DeviceType::None,
            1 => DeviceType::OneD,
            2 => DeviceType::TwoD,
            other => DeviceType::Unknown(other),
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceType::None => write!(f, "none"),
            DeviceType::OneD => write!(f, "1D"),
            DeviceType::TwoD => write!(f, "2D"),
            DeviceType::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}

/// Result of the identification handshake.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct DeviceIdentity {
    pub device_type: DeviceType,
    pub firmware_version: u8,
}

impl DeviceIdentity {
    /// Identity recorded when nothing answers.
    pub const NONE: DeviceIdentity = DeviceIdentity {
        device_type: DeviceType::None,
        firmware_version: 0,
    };

    /// Builds the identity from the two-byte identify response.
    pub fn from_response(response: [u8; 2]) -> Self {
        DeviceIdentity {
            device_type: DeviceType::from(response[0]),
            firmware_version: response[1],
        }
    }
}

// --- Operating mode ---

/// What the sensor places in its data region.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Mode {
    /// Processed touches (locations and sizes). The only mode with touch data.
    #[default]
    Normal,
    /// Raw per-channel readings.
    Raw,
    /// Per-channel baseline values.
    Baseline,
    /// Raw minus baseline.
    Differential,
}

impl Mode {
    pub const fn code(&self) -> u8 {
        match self {
            Mode::Normal => 0,
            Mode::Raw => 1,
            Mode::Baseline => 2,
            Mode::Differential => 3,
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = TrillError<()>;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Mode::Normal),
            1 => Ok(Mode::Raw),
            2 => Ok(Mode::Baseline),
            3 => Ok(Mode::Differential),
            other => Err(TrillError::InvalidMode(other)),
        }
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        mode.code()
    }
}

// --- Scan results ---

/// One contact point from a normal-mode scan.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Touch {
    pub location: u16,
    pub size: u16,
}

/// Scan speed and resolution, sent together in one frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ScanSettings {
    /// 0 (fastest) to 3 (slowest).
    pub speed: u8,
    /// ADC resolution in bits.
    pub num_bits: u8,
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_type_codes() {
        assert_eq!(DeviceType::from(0), DeviceType::None);
        assert_eq!(DeviceType::from(1), DeviceType::OneD);
        assert_eq!(DeviceType::from(2), DeviceType::TwoD);
        assert_eq!(DeviceType::from(9), DeviceType::Unknown(9));
        assert_eq!(DeviceType::Unknown(9).code(), 9);
        assert!(!DeviceType::None.is_present());
        assert!(DeviceType::Unknown(9).is_present());
    }

    #[test]
    fn test_default_raw_length() {
        assert_eq!(DeviceType::OneD.default_raw_length(), RAW_LENGTH_1D);
        assert_eq!(DeviceType::TwoD.default_raw_length(), RAW_LENGTH_DEFAULT);
        assert_eq!(DeviceType::None.default_raw_length(), RAW_LENGTH_DEFAULT);
    }

    #[test]
    fn test_identity_from_response() {
        let identity = DeviceIdentity::from_response([0x01, 0x03]);
        assert_eq!(identity.device_type, DeviceType::OneD);
        assert_eq!(identity.firmware_version, 3);
    }

    #[test]
    fn test_mode_codes() {
        for mode in [Mode::Normal, Mode::Raw, Mode::Baseline, Mode::Differential] {
            assert_eq!(Mode::try_from(mode.code()).unwrap(), mode);
        }
        assert!(matches!(Mode::try_from(4), Err(TrillError::InvalidMode(4))));
        assert_eq!(u8::from(Mode::Differential), 3);
    }
}
