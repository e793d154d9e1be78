// src/sensor/raw.rs

use embedded_hal::digital::OutputPin;
use log::trace;

use super::{SensorError, TrillSensor};
use crate::common::{
    error::TrillError,
    hal_traits::TwoWireBus,
    layout::{OFFSET_DATA, RAW_LENGTH_MAX, RAW_LENGTH_USE_DEFAULT},
};

// Raw channel data streaming.
//
// A raw frame can be longer than what the transport returns per request. The
// first request takes one chunk; each following chunk is fetched from the data
// offset shifted by the bytes already requested, once the previous one has
// been drained.
impl<B, R> TrillSensor<B, R>
where
    B: TwoWireBus,
    R: OutputPin,
{
    /// Starts reading a raw frame of up to `max_length` bytes.
    ///
    /// `None` (or the wire sentinel `0xFF`) selects the device default. The
    /// length is capped at [`RAW_LENGTH_MAX`].
    pub fn request_raw_data(&mut self, max_length: Option<u8>) -> Result<(), SensorError<B, R>> {
        self.prepare_for_data_read()?;

        let length = match max_length {
            None | Some(RAW_LENGTH_USE_DEFAULT) => self.identity.device_type.default_raw_length(),
            Some(length) => usize::from(length),
        }
        .min(RAW_LENGTH_MAX);
        let first_chunk = length.min(self.raw_chunk_limit());

        self.raw_bytes_left = 0;
        self.raw_bytes_fetched = 0;
        self.bus
            .request_from(self.address.as_u8(), first_chunk)
            .map_err(TrillError::Io)?;
        self.raw_bytes_fetched = first_chunk;
        self.raw_bytes_left = length - first_chunk;

        trace!(
            "trill {}: raw request {} bytes ({} deferred)",
            self.address, length, self.raw_bytes_left
        );
        Ok(())
    }

    /// Number of complete 16-bit samples left, buffered or still on the device.
    pub fn raw_data_available(&self) -> usize {
        (self.bus.available() + self.raw_bytes_left) >> 1
    }

    /// Next big-endian raw sample, or 0 when the frame is exhausted.
    ///
    /// A real sample can also be 0; use [`next_raw_sample`](Self::next_raw_sample)
    /// or [`raw_data_available`](Self::raw_data_available) to tell them apart.
    pub fn raw_data_read(&mut self) -> Result<u16, SensorError<B, R>> {
        Ok(self.next_raw_sample()?.unwrap_or(0))
    }

    /// Next big-endian raw sample, or `None` when the frame is exhausted.
    pub fn next_raw_sample(&mut self) -> Result<Option<u16>, SensorError<B, R>> {
        while self.bus.available() < 2 && self.raw_bytes_left > 0 {
            self.fetch_next_raw_chunk()?;
        }
        if self.bus.available() < 2 {
            return Ok(None);
        }

        Ok(match (self.bus.read(), self.bus.read()) {
            (Some(high), Some(low)) => Some(u16::from_be_bytes([high, low])),
            _ => None,
        })
    }

    /// Requests the next chunk of the pending raw frame.
    ///
    /// The pending count drops before the bus is touched; a failed transfer
    /// abandons the rest of the frame.
    fn fetch_next_raw_chunk(&mut self) -> Result<(), SensorError<B, R>> {
        let chunk = self.raw_bytes_left.min(self.raw_chunk_limit());
        let offset = self.continuation_offset();
        self.raw_bytes_left -= chunk;
        self.raw_bytes_fetched += chunk;

        let result = self.write_frame(&[offset], offset).and_then(|()| {
            self.bus
                .request_from(self.address.as_u8(), chunk)
                .map(|_| ())
                .map_err(TrillError::Io)
        });
        if result.is_err() {
            self.raw_bytes_left = 0;
        }
        result
    }

    // Never below one sample, or the fetch loop could not make progress.
    fn raw_chunk_limit(&self) -> usize {
        self.bus.chunk_limit().max(2)
    }

    /// Register offset of the first raw byte not yet requested.
    fn continuation_offset(&self) -> u8 {
        let fetched = u8::try_from(self.raw_bytes_fetched).unwrap_or(u8::MAX);
        OFFSET_DATA.saturating_add(fetched)
    }
}
