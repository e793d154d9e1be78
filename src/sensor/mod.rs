// src/sensor/mod.rs

//! The Trill sensor session.
//!
//! A [`TrillSensor`] owns everything the driver knows about one device: its
//! address, identity and mode, the last scan frame, where the device's read
//! pointer currently sits and how much of a split raw read is still pending.
//! Any number of sessions can exist at once, one per device address.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use log::{debug, trace, warn};

use crate::common::{
    address::TrillAddr,
    command::Command,
    config::SensorConfig,
    error::TrillError,
    hal_traits::TwoWireBus,
    layout::{NORMAL_LENGTH, OFFSET_COMMAND, OFFSET_DATA},
    timing,
    types::{DeviceIdentity, DeviceType, Mode, ScanSettings},
};

mod raw;
mod scan;

#[cfg(test)]
pub(crate) mod mock;

/// Error type of a session over bus `B` with reset pin `R`.
pub type SensorError<B, R> =
    TrillError<<B as TwoWireBus>::Error, <R as ErrorType>::Error>;

/// Placeholder reset pin for sensors wired without one.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoReset;

impl ErrorType for NoReset {
    type Error = Infallible;
}

impl OutputPin for NoReset {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A session with one Trill sensor.
#[derive(Debug)]
pub struct TrillSensor<B, R = NoReset> {
    bus: B,
    address: TrillAddr,
    reset_pin: Option<R>,
    identity: DeviceIdentity,
    mode: Option<Mode>,
    // Offset the device read pointer was last moved to; None until known.
    last_read_loc: Option<u8>,
    buffer: [u8; NORMAL_LENGTH],
    num_touches: usize,
    raw_bytes_left: usize,
    // Raw bytes already requested in the current frame.
    raw_bytes_fetched: usize,
}

impl<B> TrillSensor<B, NoReset>
where
    B: TwoWireBus,
{
    /// Creates a session for a sensor without a reset line.
    pub fn new(bus: B, address: TrillAddr) -> Self {
        Self::build(bus, address, None)
    }
}

impl<B, R> TrillSensor<B, R>
where
    B: TwoWireBus,
    R: OutputPin,
{
    /// Creates a session whose sensor reset is driven by `reset_pin` (active high).
    pub fn with_reset_pin(bus: B, address: TrillAddr, reset_pin: R) -> Self {
        Self::build(bus, address, Some(reset_pin))
    }

    fn build(bus: B, address: TrillAddr, reset_pin: Option<R>) -> Self {
        TrillSensor {
            bus,
            address,
            reset_pin,
            identity: DeviceIdentity::NONE,
            mode: None,
            last_read_loc: None,
            buffer: [0; NORMAL_LENGTH],
            num_touches: 0,
            raw_bytes_left: 0,
            raw_bytes_fetched: 0,
        }
    }

    /// Brings the sensor up: releases reset, identifies the device and, if one
    /// answered, applies `config`. Returns the detected type.
    ///
    /// `DeviceType::None` means nothing answered; no configuration was sent.
    pub fn begin(&mut self, config: &SensorConfig) -> Result<DeviceType, SensorError<B, R>> {
        if let Some(pin) = self.reset_pin.as_mut() {
            pin.set_low().map_err(TrillError::Pin)?;
        }

        let device_type = self.identify();
        if !device_type.is_present() {
            return Ok(device_type);
        }

        self.set_mode(config.mode)?;
        for command in config.setting_commands() {
            self.send_command(command)?;
        }
        Ok(device_type)
    }

    /// Asks the device for its type and firmware version.
    ///
    /// A missing or short answer (including a bus error, which is how an
    /// absent device shows up) records and returns `DeviceType::None`.
    /// Nothing is retried.
    pub fn identify(&mut self) -> DeviceType {
        let address = self.address.as_u8();
        let exchange = self
            .send_command(Command::Identify)
            .and_then(|()| self.bus.request_from(address, 2).map_err(TrillError::Io));

        self.identity = match exchange {
            Err(err) => {
                warn!("trill {}: identify failed: {:?}", self.address, err);
                DeviceIdentity::NONE
            }
            Ok(_) if self.bus.available() < 2 => {
                debug!("trill {}: no identify response", self.address);
                DeviceIdentity::NONE
            }
            Ok(_) => match (self.bus.read(), self.bus.read()) {
                (Some(device_type), Some(firmware)) => {
                    DeviceIdentity::from_response([device_type, firmware])
                }
                _ => DeviceIdentity::NONE,
            },
        };

        debug!(
            "trill {}: device {} firmware {}",
            self.address, self.identity.device_type, self.identity.firmware_version
        );
        self.identity.device_type
    }

    /// Selects what the data region reports (`CMD_MODE`). Touch accessors only
    /// return data in [`Mode::Normal`].
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), SensorError<B, R>> {
        self.send_command(Command::SetMode(mode))?;
        self.mode = Some(mode);
        Ok(())
    }

    /// Sets scan speed (0 fastest to 3 slowest) and ADC resolution in bits (`CMD_SCAN_SETTINGS`).
    pub fn set_scan_settings(&mut self, speed: u8, num_bits: u8) -> Result<(), SensorError<B, R>> {
        self.send_command(Command::ScanSettings(ScanSettings { speed, num_bits }))
    }

    /// Sets the capacitance-to-digital prescaler (`CMD_PRESCALER`).
    pub fn set_prescaler(&mut self, prescaler: u8) -> Result<(), SensorError<B, R>> {
        self.send_command(Command::Prescaler(prescaler))
    }

    /// Sets the level below which channel activity is ignored (`CMD_NOISE_THRESHOLD`).
    pub fn set_noise_threshold(&mut self, threshold: u8) -> Result<(), SensorError<B, R>> {
        self.send_command(Command::NoiseThreshold(threshold))
    }

    /// Sets the IDAC charge current (`CMD_IDAC`).
    pub fn set_idac_value(&mut self, value: u8) -> Result<(), SensorError<B, R>> {
        self.send_command(Command::Idac(value))
    }

    /// Sets the smallest size reported as a touch, sent big-endian (`CMD_MINIMUM_SIZE`).
    pub fn set_minimum_touch_size(&mut self, size: u16) -> Result<(), SensorError<B, R>> {
        self.send_command(Command::MinimumSize(size))
    }

    /// Makes the sensor re-capture its channel baselines.
    pub fn update_baseline(&mut self) -> Result<(), SensorError<B, R>> {
        self.send_command(Command::BaselineUpdate)
    }

    /// Pulses the reset line high for [`timing::RESET_PULSE`].
    ///
    /// Does nothing when the session has no reset pin. The sensor comes back
    /// with default settings; call [`begin`](Self::begin) again afterwards.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), SensorError<B, R>> {
        let Some(pin) = self.reset_pin.as_mut() else {
            return Ok(());
        };
        pin.set_high().map_err(TrillError::Pin)?;
        delay.delay_us(timing::RESET_PULSE.as_micros() as u32);
        pin.set_low().map_err(TrillError::Pin)?;

        self.last_read_loc = None;
        Ok(())
    }

    // --- Accessors ---

    pub fn address(&self) -> TrillAddr {
        self.address
    }

    pub fn identity(&self) -> DeviceIdentity {
        self.identity
    }

    pub fn device_type(&self) -> DeviceType {
        self.identity.device_type
    }

    pub fn firmware_version(&self) -> u8 {
        self.identity.firmware_version
    }

    /// Last mode written to the device; `None` before the first `set_mode`.
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Ends the session, handing back the bus and reset pin.
    pub fn release(self) -> (B, Option<R>) {
        (self.bus, self.reset_pin)
    }

    // --- Low-level helpers (crate-private) ---

    fn send_command(&mut self, command: Command) -> Result<(), SensorError<B, R>> {
        trace!("trill {}: {}", self.address, command);
        self.write_frame(&command.frame(), OFFSET_COMMAND)
    }

    /// Moves the device read pointer to the data region unless it is already there.
    pub(crate) fn prepare_for_data_read(&mut self) -> Result<(), SensorError<B, R>> {
        if self.last_read_loc != Some(OFFSET_DATA) {
            self.write_frame(&[OFFSET_DATA], OFFSET_DATA)?;
        }
        Ok(())
    }

    /// Writes `frame`, after which the device read pointer sits at `cursor`.
    fn write_frame(&mut self, frame: &[u8], cursor: u8) -> Result<(), SensorError<B, R>> {
        match self.bus.write(self.address.as_u8(), frame) {
            Ok(()) => {
                self.last_read_loc = Some(cursor);
                Ok(())
            }
            Err(err) => {
                warn!("trill {}: write {:02x?} failed: {:?}", self.address, frame, err);
                // A partial write may or may not have moved the pointer.
                self.last_read_loc = None;
                Err(TrillError::Io(err))
            }
        }
    }
}
