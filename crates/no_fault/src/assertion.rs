// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::panic::{AssertUnwindSafe, catch_unwind};

use futures::FutureExt;

use crate::{AssertionFailedError, Completion, Fault, Message, UNEXPECTED_FAULT, build_prefix};

/// Asserts that an operation completes without returning an error or panicking.
///
/// This is the configurable form of the checker; the free functions [`does_not_fail`][crate::does_not_fail]
/// and [`yields`][crate::yields] are shorthands for the common cases.
///
/// The operation runs exactly once, on the calling thread. If it faults, the message source is
/// resolved, and an [`AssertionFailedError`] carrying the fault as its cause is returned.
///
/// # Examples
///
/// ```
/// use no_fault::{Assertion, Message};
///
/// let port = Assertion::new()
///     .message("parsing port")
///     .get(|| "8080".parse::<u16>())
///     .unwrap();
/// assert_eq!(port, 8080);
///
/// let failure = Assertion::new()
///     .message(Message::deferred(|| format!("parsing {:?}", "http")))
///     .get(|| "http".parse::<u16>())
///     .unwrap_err();
/// assert_eq!(
///     failure.message(),
///     "parsing \"http\" ==> Unexpected exception thrown: core::num::error::ParseIntError"
/// );
/// ```
#[derive(Debug)]
#[must_use]
pub struct Assertion<'a> {
    message: Message<'a>,
    capture_panics: bool,
}

impl<'a> Assertion<'a> {
    /// Creates an assertion without a message that treats panics as faults.
    pub fn new() -> Self {
        Self {
            message: Message::None,
            capture_panics: true,
        }
    }

    /// Sets the message that prefixes the failure text.
    pub fn message(mut self, message: impl Into<Message<'a>>) -> Self {
        self.message = message.into();
        self
    }

    /// Controls whether panics raised by the operation are captured as faults.
    ///
    /// When disabled, panics propagate to the caller untouched and only returned errors fail
    /// the assertion. Enabled by default.
    pub fn capture_panics(mut self, capture: bool) -> Self {
        self.capture_panics = capture;
        self
    }

    /// Runs an operation that produces no value.
    ///
    /// # Errors
    ///
    /// Returns an [`AssertionFailedError`] if the operation faults.
    pub fn check<F, C>(self, operation: F) -> Result<(), AssertionFailedError>
    where
        F: FnOnce() -> C,
        C: Completion<Value = ()>,
    {
        self.get(operation)
    }

    /// Runs an operation and returns the value it produces.
    ///
    /// # Errors
    ///
    /// Returns an [`AssertionFailedError`] if the operation faults.
    pub fn get<F, C>(self, operation: F) -> Result<C::Value, AssertionFailedError>
    where
        F: FnOnce() -> C,
        C: Completion,
    {
        let outcome = if self.capture_panics {
            catch_unwind(AssertUnwindSafe(operation)).map_err(Fault::from_panic)
        } else {
            Ok(operation())
        };

        outcome.and_then(Completion::into_result).map_err(|fault| self.fail(fault))
    }

    /// Awaits a future and returns the value it produces.
    ///
    /// The future is polled by the caller's executor. A panic raised while polling it counts as
    /// a fault, the same as in [`get`][Self::get].
    ///
    /// # Errors
    ///
    /// Returns an [`AssertionFailedError`] if the future faults.
    pub async fn get_async<Fut>(self, future: Fut) -> Result<<Fut::Output as Completion>::Value, AssertionFailedError>
    where
        Fut: Future,
        Fut::Output: Completion,
    {
        let outcome = if self.capture_panics {
            AssertUnwindSafe(future).catch_unwind().await.map_err(Fault::from_panic)
        } else {
            Ok(future.await)
        };

        outcome.and_then(Completion::into_result).map_err(|fault| self.fail(fault))
    }

    fn fail(self, fault: Fault) -> AssertionFailedError {
        let message = self.message.resolve();
        let message = format!("{}{UNEXPECTED_FAULT}{}", build_prefix(message.as_deref()), fault.type_name());

        #[cfg(feature = "logs")]
        tracing::debug!(
            fault.type_name = fault.type_name(),
            fault.panic = fault.is_panic(),
            assertion.message = %message,
            "no_fault.failure"
        );

        AssertionFailedError::new(message, fault)
    }
}

impl Default for Assertion<'_> {
    fn default() -> Self {
        Self::new()
    }
}
