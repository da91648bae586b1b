//! Clock delivery helpers for the RDS driver.
//!
//! A BU1924-style demodulator outputs the recovered RDS clock on its own pin,
//! and one data bit is valid per rising edge. Two ways of turning those edges
//! into [`RdsDriver::tick()`](crate::driver::RdsDriver::tick) calls are
//! provided: an interrupt handler on the clock pin sharing a global driver
//! through `critical_section::with` (`clock-isr` feature), or a busy loop that
//! polls the clock pin and detects edges itself (`poll-loop` feature).
//!
//! Contains:
//! - `poll_interval_ns`: runtime poll period calculator
//! - `const_poll_interval_ns`: compile-time poll period calculator
//! - `run_rds_clock_loop` and `poll_rds_clock`: polling driver loop (feature `poll-loop`)
//! - `global_rds_clock_tick` and `tick_rds_clock!()`: interrupt-based tick callback wrapper
//!   (feature `clock-isr`)
//!
//! Common poll rates:
//!
//! | OVERSAMPLE | Poll interval |
//! |------------|---------------|
//! |          2 |     421053 ns |
//! |          4 |     210526 ns |
//! |          8 |     105263 ns |
//! |         16 |      52632 ns |

use libm::round;

use crate::consts::{BITS_PER_SECOND, NANOSECONDS_PER_SECOND};

#[cfg(feature = "poll-loop")]
mod poll;
#[cfg_attr(feature = "poll-loop", allow(unused_imports))]
#[cfg(feature = "poll-loop")]
pub use poll::*;

#[cfg(feature = "clock-isr")]
mod isr;
#[cfg_attr(feature = "clock-isr", allow(unused_imports))]
#[cfg(feature = "clock-isr")]
pub use isr::*;

#[cfg(feature = "clock-isr")]
mod macros;

/// Computes the delay between two clock pin polls.
///
/// # Arguments
/// - `oversample`: number of polls per RDS bit (at least 2 to see both clock
///   levels; 0 is treated as 1)
///
/// # Returns
/// - Poll period in nanoseconds, rounded to the nearest integer
pub fn poll_interval_ns(oversample: u32) -> u32 {
    let bit_ns = NANOSECONDS_PER_SECOND as f64 / BITS_PER_SECOND;
    round(bit_ns / f64::from(oversample.max(1))) as u32
}

/// Compile-time poll period calculator
///
/// Same as [`poll_interval_ns`] but truncates instead of rounding.
pub const fn const_poll_interval_ns(oversample: u32) -> u32 {
    let oversample = if oversample == 0 { 1 } else { oversample as u64 };
    // 1187.5 bit/s == 2375 bits / 2 s
    (NANOSECONDS_PER_SECOND * 2 / (2375 * oversample)) as u32
}
