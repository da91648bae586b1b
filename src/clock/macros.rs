/// Declares a static global `RDS_DRIVER` instance protected by a `critical_section` mutex.
///
/// This macro creates a `static` singleton `RDS_DRIVER` suitable for use in
/// interrupt-based environments, where both the main thread and the clock pin
/// ISR need to safely access the shared driver state.
///
/// # Arguments
/// - `$data`: The concrete type of the data pin (must implement `InputPin`)
///
/// # Example
/// ```rust,ignore
/// init_rds_driver!(MyDataPinType);
/// ```
#[macro_export]
macro_rules! init_rds_driver {
    ( $data:ty ) => {
        pub static RDS_DRIVER: $crate::critical_section::Mutex<
            ::core::cell::RefCell<Option<$crate::driver::RdsDriver<$data>>>,
        > = $crate::critical_section::Mutex::new(::core::cell::RefCell::new(None));
    };
}

/// Creates and arms the global `RDS_DRIVER` declared by `init_rds_driver!`.
///
/// # Arguments
/// - `$data`: The data pin (must implement `InputPin`)
/// - `$inverted`: Optional `Option<bool>`, whether the data line is inverted
/// - `$config`: Optional `Option<RdsConfig>`
///
/// # Example
/// ```rust,ignore
/// main() {
///     setup_rds_driver!(data);
///     // or
///     setup_rds_driver!(data, Some(true), None);
/// }
/// ```
#[macro_export]
macro_rules! setup_rds_driver {
    ( $data:expr ) => {
        $crate::setup_rds_driver!($data, None, None)
    };
    ( $data:expr, $inverted:expr, $config:expr ) => {
        $crate::clock::global_rds_driver_setup(&RDS_DRIVER, $data, $inverted, $config)
    };
}

/// Calls `tick()` on the global `RDS_DRIVER` if it has been initialized.
///
/// This macro is intended to be invoked from the rising-edge interrupt of the
/// demodulator's clock pin.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn EXTI0() {
///     tick_rds_clock!();
/// }
/// ```
///
/// # Notes
/// - This macro assumes `RDS_DRIVER` was declared with `init_rds_driver!`.
/// - Safe to call before `setup_rds_driver!`, it silently does nothing.
#[macro_export]
macro_rules! tick_rds_clock {
    () => {
        $crate::clock::global_rds_clock_tick(&RDS_DRIVER)
    };
}
