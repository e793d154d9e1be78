// src/sensor/mock.rs

//! Test doubles shared by the session tests.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::common::{hal_traits::TwoWireBus, layout::DEFAULT_CHUNK_LIMIT};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockBusError;

/// Records every write and request; answers requests with staged responses.
///
/// Each `request_from` consumes one staged response, truncated to the
/// requested length and the chunk limit. No staged response reads as silence.
#[derive(Debug)]
pub(crate) struct MockBus {
    pub writes: Vec<Vec<u8>>,
    pub requests: Vec<usize>,
    pub addresses: Vec<u8>,
    pub chunk: usize,
    pub fail_writes: bool,
    pub fail_requests: bool,
    responses: VecDeque<Vec<u8>>,
    rx: VecDeque<u8>,
}

impl MockBus {
    pub fn new() -> Self {
        MockBus {
            writes: Vec::new(),
            requests: Vec::new(),
            addresses: Vec::new(),
            chunk: DEFAULT_CHUNK_LIMIT,
            fail_writes: false,
            fail_requests: false,
            responses: VecDeque::new(),
            rx: VecDeque::new(),
        }
    }

    pub fn stage(&mut self, bytes: &[u8]) {
        self.responses.push_back(bytes.to_vec());
    }
}

impl TwoWireBus for MockBus {
    type Error = MockBusError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MockBusError);
        }
        self.addresses.push(address);
        self.writes.push(bytes.to_vec());
        Ok(())
    }

    fn request_from(&mut self, address: u8, len: usize) -> Result<usize, Self::Error> {
        self.rx.clear();
        if self.fail_requests {
            return Err(MockBusError);
        }
        self.addresses.push(address);
        self.requests.push(len);
        let response = self.responses.pop_front().unwrap_or_default();
        self.rx.extend(response.into_iter().take(len.min(self.chunk)));
        Ok(self.rx.len())
    }

    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn chunk_limit(&self) -> usize {
        self.chunk
    }
}

/// Output pin remembering every level it was driven to (`true` = high).
#[derive(Debug, Default)]
pub(crate) struct MockPin {
    pub levels: Vec<bool>,
}

impl ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.push(true);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
