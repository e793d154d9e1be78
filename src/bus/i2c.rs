// src/bus/i2c.rs

use crate::common::hal_traits::TwoWireBus;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use heapless::Deque;

/// Receive buffer size, matching the classic Wire `BUFFER_LENGTH`.
pub const RX_BUFFER_LEN: usize = 32;

/// [`TwoWireBus`] over any `embedded-hal` 1.0 I2C master.
///
/// Each [`request_from`](TwoWireBus::request_from) performs one I2C read of at
/// most [`RX_BUFFER_LEN`] bytes into an internal queue. A bus error leaves the
/// queue empty.
pub struct I2cBus<I> {
    i2c: I,
    rx: Deque<u8, RX_BUFFER_LEN>,
}

impl<I> I2cBus<I>
where
    I: I2c<SevenBitAddress>,
{
    /// Create a new [`I2cBus`]. Pass `&mut i2c` to keep ownership of the peripheral.
    pub fn new(i2c: I) -> Self {
        Self { i2c, rx: Deque::new() }
    }

    /// Gives back the wrapped peripheral.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I> TwoWireBus for I2cBus<I>
where
    I: I2c<SevenBitAddress>,
{
    type Error = I::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, bytes)
    }

    fn request_from(&mut self, address: u8, len: usize) -> Result<usize, Self::Error> {
        self.rx.clear();
        let len = len.min(RX_BUFFER_LEN);
        if len == 0 {
            return Ok(0);
        }

        let mut scratch = [0u8; RX_BUFFER_LEN];
        self.i2c.read(address, &mut scratch[..len])?;
        for &byte in &scratch[..len] {
            if self.rx.push_back(byte).is_err() {
                break;
            }
        }
        Ok(self.rx.len())
    }

    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn chunk_limit(&self) -> usize {
        RX_BUFFER_LEN
    }
}
