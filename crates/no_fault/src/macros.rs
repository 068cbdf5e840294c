// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Asserts that an operation completes without returning an error or panicking.
///
/// Evaluates to the value produced by the operation. On failure, panics with the failure
/// message followed by the fault that caused it. An optional format string and arguments
/// prefix the message; they are only formatted if the assertion fails.
///
/// # Examples
///
/// ```
/// use no_fault::assert_does_not_fail;
///
/// let port: u16 = assert_does_not_fail!(|| "8080".parse::<u16>());
/// assert_eq!(port, 8080);
///
/// assert_does_not_fail!(|| println!("side effect"), "printing {}", "greeting");
/// ```
///
/// ```should_panic
/// use no_fault::assert_does_not_fail;
///
/// // panics with "parsing port ==> Unexpected exception thrown: core::num::error::ParseIntError ..."
/// assert_does_not_fail!(|| "http".parse::<u16>(), "parsing port");
/// ```
#[macro_export]
macro_rules! assert_does_not_fail {
    ($operation:expr $(,)?) => {
        match $crate::yields($operation) {
            ::core::result::Result::Ok(value) => value,
            ::core::result::Result::Err(failure) => $crate::__private::fail(&failure),
        }
    };
    ($operation:expr, $($arg:tt)+) => {
        match $crate::yields_with($operation, $crate::Message::deferred(|| ::std::format!($($arg)+))) {
            ::core::result::Result::Ok(value) => value,
            ::core::result::Result::Err(failure) => $crate::__private::fail(&failure),
        }
    };
}
