use crate::consts::{MESSAGE_TEXT_LEN, PROGRAM_NAME_LEN};
use crate::decoder::RdsConfig;
use crate::driver::RdsDriver;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::InputPin;

/// Used to initialize the global static `RdsDriver` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust,ignore
/// use bu1924::clock::global_rds_driver_init;
/// use bu1924::driver::RdsDriver;
/// use core::cell::RefCell;
/// use critical_section::Mutex;
/// use some_hal::PD2;
///
/// static RDS_DRIVER: Mutex<RefCell<Option<RdsDriver<PD2>>>> = global_rds_driver_init::<PD2>();
/// ```
pub const fn global_rds_driver_init<DATA: InputPin>() -> Mutex<RefCell<Option<RdsDriver<DATA>>>> {
    Mutex::new(RefCell::new(None))
}

/// Creates and arms the global driver.
///
/// # Arguments
/// * The global static `RdsDriver`
/// * The data pin
/// * Whether the data line is inverted
/// * Decoder options
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     global_rds_driver_setup(&RDS_DRIVER, data_pin, None, None);
///     // then enable the rising-edge interrupt on the clock pin
/// }
/// ```
pub fn global_rds_driver_setup<DATA: InputPin>(
    global_driver: &'static Mutex<RefCell<Option<RdsDriver<DATA>>>>,
    data: DATA,
    inverted: Option<bool>,
    config: Option<RdsConfig>,
) {
    let mut driver = RdsDriver::new(data, inverted, config);
    driver.start();
    critical_section::with(|cs| {
        let _ = global_driver.borrow(cs).replace(Some(driver));
    });
}

/// Samples one bit on each clock interrupt
///
/// Pin errors are counted in [`RdsDriver::pin_errors`] and otherwise dropped.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn EXTI0() {
///     global_rds_clock_tick(&RDS_DRIVER);
/// }
/// ```
pub fn global_rds_clock_tick<DATA: InputPin>(
    global_driver: &'static Mutex<RefCell<Option<RdsDriver<DATA>>>>,
) {
    critical_section::with(|cs| {
        if let Some(driver) = global_driver.borrow(cs).borrow_mut().as_mut() {
            let _ = driver.tick();
        }
    });
}

/// Copies the program name out of the global driver.
///
/// The copy is taken inside one critical section, so it never contains a
/// half-written segment.
///
/// # Returns
/// `None` until the driver has been set up
pub fn global_rds_program_name<DATA: InputPin>(
    global_driver: &'static Mutex<RefCell<Option<RdsDriver<DATA>>>>,
) -> Option<[u8; PROGRAM_NAME_LEN]> {
    critical_section::with(|cs| {
        global_driver
            .borrow(cs)
            .borrow()
            .as_ref()
            .map(|driver| *driver.program_name())
    })
}

/// Copies the current radio text out of the global driver.
///
/// Like [`global_rds_program_name`] the copy is atomic with respect to the
/// clock interrupt.
pub fn global_rds_message_text<DATA: InputPin>(
    global_driver: &'static Mutex<RefCell<Option<RdsDriver<DATA>>>>,
) -> Option<[u8; MESSAGE_TEXT_LEN]> {
    critical_section::with(|cs| {
        global_driver
            .borrow(cs)
            .borrow()
            .as_ref()
            .map(|driver| *driver.message_text())
    })
}

/// Clears the output buffers of the global driver and restarts the search
/// for block A.
pub fn global_rds_reset<DATA: InputPin>(
    global_driver: &'static Mutex<RefCell<Option<RdsDriver<DATA>>>>,
) {
    critical_section::with(|cs| {
        if let Some(driver) = global_driver.borrow(cs).borrow_mut().as_mut() {
            driver.reset();
        }
    });
}

/// Whether the global driver has been set up and armed.
pub fn global_rds_is_ready<DATA: InputPin>(
    global_driver: &'static Mutex<RefCell<Option<RdsDriver<DATA>>>>,
) -> bool {
    critical_section::with(|cs| {
        global_driver
            .borrow(cs)
            .borrow()
            .as_ref()
            .is_some_and(|driver| driver.is_ready())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::tests::pin_reads;
    use crate::encoding::group_bits;
    use embedded_hal_mock::eh1::digital::Mock as PinMock;

    #[test]
    fn test_global_driver_lifecycle() {
        static DRIVER: Mutex<RefCell<Option<RdsDriver<PinMock>>>> = global_rds_driver_init();

        assert!(!global_rds_is_ready(&DRIVER));
        assert_eq!(global_rds_program_name(&DRIVER), None);
        global_rds_clock_tick(&DRIVER);

        let mut bits = pin_reads(group_bits(&[0x1234, 0x0001, 0, 0x4142], false), false);
        bits.extend(pin_reads(group_bits(&[0x1234, 0x2000, 0x4869, 0x2021], false), false));
        global_rds_driver_setup(&DRIVER, PinMock::new(&bits), None, None);
        assert!(global_rds_is_ready(&DRIVER));

        for _ in 0..208 {
            global_rds_clock_tick(&DRIVER);
        }

        assert_eq!(global_rds_program_name(&DRIVER), Some(*b"\0\0AB\0\0\0\0"));
        let text = global_rds_message_text(&DRIVER).unwrap();
        assert_eq!(&text[..4], b"Hi !");

        global_rds_reset(&DRIVER);
        assert_eq!(global_rds_program_name(&DRIVER), Some([0; 8]));
        assert_eq!(global_rds_message_text(&DRIVER), Some([0; 64]));

        let mut driver = critical_section::with(|cs| DRIVER.borrow(cs).take()).unwrap();
        driver.data.done();
    }
}
