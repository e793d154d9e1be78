// src/common/address.rs

use super::error::TrillError;
use core::convert::TryFrom;
use core::fmt;

/// A validated 7-bit I2C address of a Trill sensor.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct TrillAddr(u8);

impl TrillAddr {
    /// Factory address of Trill Bar.
    pub const BAR: TrillAddr = TrillAddr(0x20);
    /// Factory address of Trill Square.
    pub const SQUARE: TrillAddr = TrillAddr(0x28);
    /// Factory address of Trill Craft.
    pub const CRAFT: TrillAddr = TrillAddr(0x30);
    /// Factory address of Trill Ring.
    pub const RING: TrillAddr = TrillAddr(0x38);
    /// Factory address of Trill Hex.
    pub const HEX: TrillAddr = TrillAddr(0x40);

    pub const DEFAULT_ADDRESS: TrillAddr = Self::BAR;

    /// Creates a new `TrillAddr` if `address` is a non-reserved 7-bit address.
    /// Returns `Result<Self, TrillError<()>>` because validation itself
    /// cannot cause an I/O error.
    pub fn new(address: u8) -> Result<Self, TrillError<()>> {
        if Self::is_valid_address(address) {
            Ok(TrillAddr(address))
        } else {
            Err(TrillError::InvalidAddress(address))
        }
    }

    #[inline]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// 0x00..=0x07 and 0x78..=0x7F are reserved by the I2C specification.
    #[inline]
    pub const fn is_valid_address(address: u8) -> bool {
        matches!(address, 0x08..=0x77)
    }
}

impl Default for TrillAddr {
    fn default() -> Self {
        Self::DEFAULT_ADDRESS
    }
}

impl TryFrom<u8> for TrillAddr {
    type Error = TrillError<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TrillAddr> for u8 {
    fn from(value: TrillAddr) -> Self {
        value.0
    }
}

impl fmt::Display for TrillAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}
