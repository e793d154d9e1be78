// src/lib.rs

//! Driver for Trill capacitive touch sensors over I2C.
//!
//! ```ignore
//! use trill::{bus::I2cBus, SensorConfig, TrillAddr, TrillSensor};
//!
//! let mut sensor = TrillSensor::new(I2cBus::new(i2c), TrillAddr::BAR);
//! sensor.begin(&SensorConfig::default())?;
//! loop {
//!     if sensor.read().is_ok() {
//!         for touch in sensor.touches() {
//!             log::info!("touch at {} size {}", touch.location, touch.size);
//!         }
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)] // Tests get std for their mocks

pub mod bus;
pub mod common;
pub mod sensor;

// Re-export key types for convenience
pub use common::{DeviceType, Mode, SensorConfig, TrillAddr, TrillError, TwoWireBus};
pub use sensor::{NoReset, SensorError, TrillSensor};
