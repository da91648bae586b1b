use crate::driver::RdsDriver;
use crate::error::RdsError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, ErrorKind, InputPin};

/// Rising-edge detector for a polled clock pin.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClockEdge {
    last: bool,
}

impl ClockEdge {
    /// Creates a detector that assumes the clock starts low.
    pub const fn new() -> Self {
        Self { last: false }
    }

    /// Samples `clock` once.
    ///
    /// # Returns
    /// - `Ok(())` if the clock went from low to high since the previous sample
    /// - `Err(nb::Error::WouldBlock)` otherwise
    pub fn poll<CLK: InputPin>(&mut self, clock: &mut CLK) -> nb::Result<(), ErrorKind> {
        let level = clock
            .is_high()
            .map_err(|e| nb::Error::Other(e.kind()))?;
        let rising = level && !self.last;
        self.last = level;
        if rising {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

/// Polls the clock pin once and, on a rising edge, ticks the driver.
///
/// # Returns
/// - `Ok(())` when a bit was sampled
/// - `Err(nb::Error::WouldBlock)` when no edge was seen
/// - `Err(nb::Error::Other(_))` when either pin could not be read
pub fn poll_rds_clock<DATA, CLK>(
    driver: &mut RdsDriver<DATA>,
    edge: &mut ClockEdge,
    clock: &mut CLK,
) -> nb::Result<(), RdsError<DATA::Error>>
where
    DATA: InputPin,
    CLK: InputPin,
{
    edge.poll(clock).map_err(|e| e.map(RdsError::Clock))?;
    driver.tick().map_err(nb::Error::Other)
}

/// Runs a blocking loop that polls the clock pin and ticks the RDS driver on
/// every rising edge.
///
/// This is a simple timing loop for use in environments where the clock pin
/// cannot raise an interrupt. The delay between polls must be well below half
/// an RDS bit period (421 µs), see [`poll_interval_ns`](crate::clock::poll_interval_ns).
///
/// # Arguments
/// - `driver`: A mutable reference to an `RdsDriver` instance.
/// - `clock`: The input pin wired to the demodulator's clock output.
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `poll_ns`: The delay between clock pin polls, in nanoseconds.
///
/// # Example
/// ```rust,ignore
/// use bu1924::clock::{poll_interval_ns, run_rds_clock_loop};
/// let mut driver = RdsDriver::new(data, None, None);
/// driver.start();
/// run_rds_clock_loop(&mut driver, &mut clock, &mut delay, poll_interval_ns(8));
/// ```
///
/// # Notes
/// - This loop will never return; it is intended for single-purpose polling firmware.
/// - Pin read errors are counted or logged and otherwise ignored.
pub fn run_rds_clock_loop<D, DATA, CLK>(
    driver: &mut RdsDriver<DATA>,
    clock: &mut CLK,
    delay: &mut D,
    poll_ns: u32,
) where
    D: DelayNs,
    DATA: InputPin,
    CLK: InputPin,
{
    let mut edge = ClockEdge::new();
    loop {
        match poll_rds_clock(driver, &mut edge, clock) {
            Ok(()) => {}
            Err(nb::Error::WouldBlock) => delay.delay_ns(poll_ns),
            Err(nb::Error::Other(RdsError::Clock(_))) => warn!("rds: clock pin read failed"),
            Err(nb::Error::Other(RdsError::Data(_))) => {}
        }
    }
}
