//! Pin-driven RDS receiver.
//!
//! This module provides the [`RdsDriver`] struct, which samples the data line
//! of a BU1924-style RDS demodulator and feeds each bit to an [`RdsDecoder`].
//! The demodulator recovers the 1187.5 bit/s RDS clock itself and presents it
//! on a separate clock pin; data is valid on the rising clock edge.
//!
//! The driver never touches the clock pin. Either call
//! [`tick()`](RdsDriver::tick) from the clock pin's rising-edge interrupt
//! (see [`crate::clock`] for `critical-section` helpers), or poll the clock pin
//! with [`crate::clock::poll_rds_clock`] (feature `poll-loop`).
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use bu1924::driver::RdsDriver;
//!
//! fn main() {
//!     # let data_pin = Pin::new(&[PinTransaction::get(PinState::High)]);
//!     let mut driver: RdsDriver<Pin> = RdsDriver::new(data_pin, None, None);
//!     driver.start();
//!
//!     loop {
//!         driver.tick().unwrap(); // Called on every rising edge of the RDS clock
//!         # break; // For testing purposes
//!     }
//!     # driver.data.done();
//! }
//! ```

use embedded_hal::digital::InputPin;

use crate::consts::{MESSAGE_TEXT_LEN, PROGRAM_NAME_LEN};
use crate::decoder::{RdsConfig, RdsDecoder};
use crate::error::RdsError;

/// Operational mode of an [`RdsDriver`].
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum RdsMode {
    ///   Not armed. [`tick()`](RdsDriver::tick) does nothing.
    #[default]
    Idle,
    ///   Armed. Every [`tick()`](RdsDriver::tick) samples one bit.
    Rx,
}

/// An RDS receiver reading bits from a digital input pin.
///
/// ## Type Parameters
///
/// - `DATA`: A type implementing [`embedded_hal::digital::InputPin`] wired to the
///   demodulator's data output
///
/// ## Notes
///
/// - The driver starts in [`RdsMode::Idle`]; call [`start()`](RdsDriver::start)
///   once the clock interrupt is wired up.
/// - Output accessors borrow the decoder, so they cannot observe a half-written
///   segment. When the driver lives in a global shared with an interrupt, use
///   the snapshot helpers in [`crate::clock`].
#[derive(Debug)]
pub struct RdsDriver<DATA>
where
    DATA: InputPin,
{
    /// The current mode of the receiver
    pub mode: RdsMode,
    /// Data pin
    pub data: DATA,
    /// [`RdsDecoder`] instance
    pub decoder: RdsDecoder,
    inverted: bool,

    /// Counter of failed data pin reads.
    pub pin_errors: u16,
}

impl<DATA> RdsDriver<DATA>
where
    DATA: InputPin,
{
    /// Creates a new `RdsDriver` reading from the given data pin.
    ///
    /// # Arguments
    /// - `data`: The input pin wired to the demodulator's data output.
    /// - `inverted`: Whether every sampled level should be inverted (HIGH => 0).
    /// - `config`: Decoder options, [`RdsConfig::default()`] when `None`.
    ///
    /// # Returns
    /// An idle driver. Call [`start()`](RdsDriver::start) to arm it.
    pub fn new(data: DATA, inverted: Option<bool>, config: Option<RdsConfig>) -> Self {
        Self {
            mode: RdsMode::Idle,
            data,
            decoder: RdsDecoder::with_config(config.unwrap_or_default()),
            inverted: inverted.unwrap_or(false),
            pin_errors: 0,
        }
    }

    /// Arms the receiver.
    pub fn start(&mut self) {
        if self.mode != RdsMode::Rx {
            debug!("rds: receiver armed");
            self.mode = RdsMode::Rx;
        }
    }

    /// Disarms the receiver. Decoded output is kept.
    pub fn stop(&mut self) {
        self.mode = RdsMode::Idle;
    }

    /// Whether the receiver has been armed.
    ///
    /// This says nothing about block lock; see
    /// [`RdsDecoder::state()`](crate::decoder::RdsDecoder::state).
    pub fn is_ready(&self) -> bool {
        self.mode == RdsMode::Rx
    }

    /// Samples the data pin and feeds the bit to the decoder.
    ///
    /// Must be called once per rising edge of the demodulator clock. Does
    /// nothing while the driver is idle.
    ///
    /// # Errors
    /// [`RdsError::Data`] when the pin cannot be read. The bit is dropped, which
    /// the synchronizer handles like any other lost bit.
    pub fn tick(&mut self) -> Result<(), RdsError<DATA::Error>> {
        if self.mode != RdsMode::Rx {
            return Ok(());
        }
        match self.data.is_high() {
            Ok(level) => {
                self.decoder.submit_bit(level != self.inverted);
                Ok(())
            }
            Err(e) => {
                self.pin_errors = self.pin_errors.wrapping_add(1);
                warn!("rds: data pin read failed");
                Err(RdsError::Data(e))
            }
        }
    }

    /// See [`RdsDecoder::program_name()`].
    pub fn program_name(&self) -> &[u8; PROGRAM_NAME_LEN] {
        self.decoder.program_name()
    }

    /// See [`RdsDecoder::message_text()`].
    pub fn message_text(&self) -> &[u8; MESSAGE_TEXT_LEN] {
        self.decoder.message_text()
    }

    /// See [`RdsDecoder::reset()`].
    pub fn reset(&mut self) {
        self.decoder.reset();
    }
}
