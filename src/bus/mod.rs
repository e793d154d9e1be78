// src/bus/mod.rs

// Transport adapters implementing `TwoWireBus`.
pub mod i2c;

pub use i2c::{I2cBus, RX_BUFFER_LEN};
