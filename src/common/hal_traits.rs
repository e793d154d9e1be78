// src/common/hal_traits.rs

use super::layout::DEFAULT_CHUNK_LIMIT;
use core::fmt::Debug;

/// Abstraction over a buffered two-wire (I2C) master.
///
/// Mirrors the transaction model the Trill protocol was designed around:
/// a write is a complete begin/write/end transaction, while reads are issued
/// with [`request_from`](TwoWireBus::request_from) into a receive buffer that
/// is then drained byte by byte.
///
/// See [`crate::bus::I2cBus`] for an implementation over `embedded-hal`.
pub trait TwoWireBus {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Writes `bytes` to the device at `address` in one transaction.
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Reads up to `len` bytes from `address` into the receive buffer,
    /// replacing anything still buffered. Returns the number of bytes received.
    ///
    /// Implementations never buffer more than [`chunk_limit`](TwoWireBus::chunk_limit)
    /// bytes per request.
    fn request_from(&mut self, address: u8, len: usize) -> Result<usize, Self::Error>;

    /// Bytes waiting in the receive buffer.
    fn available(&self) -> usize;

    /// Pops the next received byte.
    fn read(&mut self) -> Option<u8>;

    /// Largest number of bytes a single request can return.
    fn chunk_limit(&self) -> usize {
        DEFAULT_CHUNK_LIMIT
    }
}

impl<T: TwoWireBus + ?Sized> TwoWireBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, bytes)
    }

    fn request_from(&mut self, address: u8, len: usize) -> Result<usize, Self::Error> {
        T::request_from(self, address, len)
    }

    fn available(&self) -> usize {
        T::available(self)
    }

    fn read(&mut self) -> Option<u8> {
        T::read(self)
    }

    fn chunk_limit(&self) -> usize {
        T::chunk_limit(self)
    }
}
