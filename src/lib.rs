//! # bu1924
//!
//! A portable, no_std Rust decoder for the RDS (Radio Data System) bitstream
//! produced by FM demodulator chips such as the ROHM BU1924, which output the
//! recovered 1187.5 bit/s data and clock on two plain digital lines.
//!
//! This crate implements the receive side of RDS in software:
//! - blind block synchronization using the syndrome of the (26, 16) block code
//! - group assembly (blocks A, B, C/C′, D)
//! - program service name (group types 0 and 15) and radio text (group type 2)
//! - `embedded-hal` traits for pin access
//! - interrupt-safe global access with `critical-section`
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` and returns `String`s instead of `heapless::String`s |
//! | `poll-loop`           | Polls the clock pin with `embedded_hal::delay::DelayNs` between samples |
//! | `clock-isr` (default) | Global driver and macros for a clock pin interrupt via `critical_section::with` |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Usage
//!
//! The decoding core needs nothing but bits:
//!
//! ```rust
//! use bu1924::decoder::RdsDecoder;
//!
//! let mut decoder = RdsDecoder::new();
//! # let received_bits = core::iter::repeat(false).take(208);
//! for bit in received_bits {
//!     decoder.submit_bit(bit);
//! }
//! let name = decoder.program_name();
//! # assert_eq!(name, &[0; 8]);
//! ```
//!
//! On hardware, wrap the data pin in a [`driver::RdsDriver`] and call
//! [`tick()`](driver::RdsDriver::tick) on each rising edge of the clock pin:
//!
//! ```rust,ignore
//! bu1924::init_rds_driver!(DataPin);
//!
//! fn main() {
//!     bu1924::setup_rds_driver!(data_pin);
//!     loop {
//!         let name = bu1924::clock::global_rds_program_name(&RDS_DRIVER);
//!         // ...
//!     }
//! }
//!
//! #[interrupt]
//! fn EXTI0() {
//!     bu1924::tick_rds_clock!();
//! }
//! ```
//!
//! ## Integration Notes
//!
//! - Data is valid on the rising edge of the demodulator clock
//! - Synchronization is automatic. How lock is recovered after a failed block
//!   depends on [`decoder::RdsConfig::resync`]; the default
//!   [`sync::ResyncPolicy::Seek`] resumes the search on its own
//! - [`decoder::RdsDecoder::reset()`] is the only operation that clears the
//!   output buffers and is never triggered internally
//! - Several decoders can coexist, one per instance; the `clock-isr` macros
//!   declare a single global named `RDS_DRIVER`
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "clock-isr")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

#[macro_use]
mod fmt;

pub mod clock;
pub mod consts;
pub mod decoder;
pub mod driver;
pub mod encoding;
pub mod error;
pub mod group;
pub mod store;
pub mod sync;
pub mod syndrome;
pub mod window;
