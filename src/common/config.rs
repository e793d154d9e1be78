// src/common/config.rs

use super::command::Command;
use super::types::{Mode, ScanSettings};
use arrayvec::ArrayVec;

/// Configuration applied by [`TrillSensor::begin`](crate::sensor::TrillSensor::begin).
///
/// Unset options are left at the sensor's power-on values.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SensorConfig {
    pub mode: Mode,
    pub scan_settings: Option<ScanSettings>,
    pub prescaler: Option<u8>,
    pub noise_threshold: Option<u8>,
    pub idac_value: Option<u8>,
    pub minimum_touch_size: Option<u16>,
}

impl SensorConfig {
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode,
            scan_settings: None,
            prescaler: None,
            noise_threshold: None,
            idac_value: None,
            minimum_touch_size: None,
        }
    }

    pub const fn with_scan_settings(mut self, speed: u8, num_bits: u8) -> Self {
        self.scan_settings = Some(ScanSettings { speed, num_bits });
        self
    }

    pub const fn with_prescaler(mut self, prescaler: u8) -> Self {
        self.prescaler = Some(prescaler);
        self
    }

    pub const fn with_noise_threshold(mut self, threshold: u8) -> Self {
        self.noise_threshold = Some(threshold);
        self
    }

    pub const fn with_idac_value(mut self, value: u8) -> Self {
        self.idac_value = Some(value);
        self
    }

    pub const fn with_minimum_touch_size(mut self, size: u16) -> Self {
        self.minimum_touch_size = Some(size);
        self
    }

    /// Commands to send after the mode, in order.
    pub(crate) fn setting_commands(&self) -> ArrayVec<Command, 5> {
        let mut commands = ArrayVec::new();
        if let Some(settings) = self.scan_settings {
            commands.push(Command::ScanSettings(settings));
        }
        if let Some(prescaler) = self.prescaler {
            commands.push(Command::Prescaler(prescaler));
        }
        if let Some(threshold) = self.noise_threshold {
            commands.push(Command::NoiseThreshold(threshold));
        }
        if let Some(value) = self.idac_value {
            commands.push(Command::Idac(value));
        }
        if let Some(size) = self.minimum_touch_size {
            commands.push(Command::MinimumSize(size));
        }
        commands
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::new(Mode::Normal)
    }
}
