//! Errors raised while sampling the demodulator pins.
//!
//! The decoding core itself has no failure modes: a block that fails its
//! syndrome check is simply not a block. Only pin access can fail.

use embedded_hal::digital::ErrorKind;
use thiserror::Error;

/// Pin-level failure while receiving RDS bits.
#[derive(Debug, Error)]
pub enum RdsError<E> {
    /// Reading the data pin failed. The bit was dropped.
    #[error("RDS data pin read failed: {0:?}")]
    Data(E),
    /// Reading the clock pin failed.
    #[error("RDS clock pin read failed: {0:?}")]
    Clock(ErrorKind),
}
