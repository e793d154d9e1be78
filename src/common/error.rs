// src/common/error.rs

use core::convert::Infallible;
use core::fmt::Debug;

/// Errors reported by the Trill driver.
///
/// `E` is the error type of the two-wire transport, `P` the error type of the
/// optional reset pin. Validation helpers that never touch hardware use the
/// defaults (`TrillError<()>`).
#[derive(Debug, thiserror::Error)]
pub enum TrillError<E = (), P = Infallible>
where
    E: Debug,
    P: Debug,
{
    /// Underlying I/O error from the bus transport.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// Driving the reset line failed.
    #[error("Reset pin error: {0:?}")]
    Pin(P),

    /// The device returned fewer bytes than the frame requires.
    /// The scan buffer keeps its previous (stale) contents past `received`.
    #[error("Short read: expected {expected} bytes, received {received}")]
    ShortRead { expected: usize, received: usize },

    /// Provided value is not a usable 7-bit I2C address.
    #[error("Invalid I2C address: {0:#04x}")]
    InvalidAddress(u8),

    /// Byte does not name a known sensor mode.
    #[error("Invalid mode code: {0}")]
    InvalidMode(u8),
}

// Note: no blanket `From<E>` conversion. With two generic parameters the
// transport and pin errors are mapped explicitly (`map_err(TrillError::Io)`).
