// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod address;
pub mod command;
pub mod config;
pub mod error;
pub mod hal_traits;
pub mod layout;
pub mod response;
pub mod timing;
pub mod types;

// --- Re-export key types/traits for easier access ---

pub use address::TrillAddr;
pub use command::{Command, CommandFrame};
pub use config::SensorConfig;
pub use error::TrillError;
pub use hal_traits::TwoWireBus;
pub use response::ScanFrame;
pub use types::{DeviceIdentity, DeviceType, Mode, ScanSettings, Touch};
