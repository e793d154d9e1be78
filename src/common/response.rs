// src/common/response.rs

//! Decoding of the normal-mode scan frame.
//!
//! Layout (`MAX_TOUCHES` = N):
//!
//! ```text
//! [loc0_hi, loc0_lo, ..., loc{N-1}_hi, loc{N-1}_lo, size0_hi, size0_lo, ...]
//! ```
//!
//! An empty slot has `0xFF, 0xFF` as its location; the first empty slot ends
//! the list of valid touches.

use super::layout::{MAX_TOUCHES, NORMAL_LENGTH, NO_TOUCH};

/// Borrowed view over a complete scan frame.
#[derive(Debug, Copy, Clone)]
pub struct ScanFrame<'a>(&'a [u8; NORMAL_LENGTH]);

impl<'a> ScanFrame<'a> {
    pub fn new(bytes: &'a [u8; NORMAL_LENGTH]) -> Self {
        ScanFrame(bytes)
    }

    /// Index of the first empty slot, or `MAX_TOUCHES` when every slot is used.
    pub fn touch_count(&self) -> usize {
        self.0[..MAX_TOUCHES * 2]
            .chunks_exact(2)
            .position(|pair| pair == NO_TOUCH)
            .unwrap_or(MAX_TOUCHES)
    }

    /// Location stored in `slot`, or `None` if the slot index is out of range.
    ///
    /// Does not look at the touch count: slots past it decode whatever the
    /// device left there (usually `0xFFFF`).
    pub fn location(&self, slot: usize) -> Option<u16> {
        self.word(slot, 0)
    }

    /// Size stored in `slot`; same rules as [`ScanFrame::location`].
    pub fn size(&self, slot: usize) -> Option<u16> {
        self.word(slot, MAX_TOUCHES * 2)
    }

    fn word(&self, slot: usize, region: usize) -> Option<u16> {
        if slot >= MAX_TOUCHES {
            return None;
        }
        let at = region + slot * 2;
        Some(u16::from_be_bytes([self.0[at], self.0[at + 1]]))
    }
}
