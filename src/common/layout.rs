// src/common/layout.rs

//! Register map and frame sizes of the Trill I2C protocol.

// === Register offsets ===

/// Offset of the command register; configuration frames start with it.
pub const OFFSET_COMMAND: u8 = 0;
/// Offset of the data region (scan results and raw channel data).
pub const OFFSET_DATA: u8 = 4;

// === Command opcodes ===

pub const CMD_MODE: u8 = 1;
pub const CMD_SCAN_SETTINGS: u8 = 2;
pub const CMD_PRESCALER: u8 = 3;
pub const CMD_NOISE_THRESHOLD: u8 = 4;
pub const CMD_IDAC: u8 = 5;
pub const CMD_BASELINE_UPDATE: u8 = 6;
pub const CMD_MINIMUM_SIZE: u8 = 7;
pub const CMD_IDENTIFY: u8 = 255;

// === Scan frame ===

/// Maximum number of touches reported in one scan.
pub const MAX_TOUCHES: usize = 5;
/// Length of a normal-mode scan frame: locations then sizes, 16 bits each.
pub const NORMAL_LENGTH: usize = MAX_TOUCHES * 4;
/// Location pair marking an empty slot.
pub const NO_TOUCH: [u8; 2] = [0xFF, 0xFF];

// === Raw data ===

/// Raw frame length of one-dimensional sensors (26 channels).
pub const RAW_LENGTH_1D: usize = 52;
/// Raw frame length of every other sensor (30 channels).
pub const RAW_LENGTH_DEFAULT: usize = 60;
/// Longest raw request the driver issues.
pub const RAW_LENGTH_MAX: usize = 60;
/// Wire-level length sentinel selecting the device default.
pub const RAW_LENGTH_USE_DEFAULT: u8 = 0xFF;

// === Transport ===

/// Per-transaction receive limit of the reference two-wire transport.
pub const DEFAULT_CHUNK_LIMIT: usize = 32;

/// Longest command frame: offset, opcode and two parameter bytes.
pub const MAX_COMMAND_FRAME: usize = 4;
