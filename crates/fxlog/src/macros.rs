//! Variadic logging macros.
//!
//! Each macro takes a logger followed by any number of arguments convertible
//! into [`Value`](crate::Value), and evaluates to the logger method's
//! `Result<()>`:
//!
//! ```ignore
//! fxlog::info!(logger, "user", user_id, "logged in")?;
//! fxlog::error!(logger, "request failed:", status)?;
//! ```

/// Log with the `log` type.
#[macro_export]
macro_rules! log {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.log(::std::vec::Vec::<$crate::Value>::from([$($crate::Value::from($arg)),*]))
    };
}

/// Log with the `info` type.
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.info(::std::vec::Vec::<$crate::Value>::from([$($crate::Value::from($arg)),*]))
    };
}

/// Log with the `success` type.
#[macro_export]
macro_rules! success {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.success(::std::vec::Vec::<$crate::Value>::from([$($crate::Value::from($arg)),*]))
    };
}

/// Log with the `warn` type.
#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.warn(::std::vec::Vec::<$crate::Value>::from([$($crate::Value::from($arg)),*]))
    };
}

/// Log with the `error` type.
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.error(::std::vec::Vec::<$crate::Value>::from([$($crate::Value::from($arg)),*]))
    };
}

/// Log with any configured type.
#[macro_export]
macro_rules! emit {
    ($logger:expr, $kind:expr $(, $arg:expr)* $(,)?) => {
        $logger.emit(
            $kind,
            ::std::vec::Vec::<$crate::Value>::from([$($crate::Value::from($arg)),*]),
        )
    };
}
