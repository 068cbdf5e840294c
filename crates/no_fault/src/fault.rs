// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::{Any, type_name};
use std::error::Error;

use crate::Panic;

/// A boxed error, the representation of every fault cause.
///
/// No `Send` or `Sync` bound is imposed so that errors holding `Rc`, `Cell` and the like, as well
/// as plain `Box<dyn Error>`, can be checked.
pub type BoxError = Box<dyn Error + 'static>;

/// Something that went wrong while executing an operation under assertion.
///
/// A fault remembers the concrete type name of what was raised. For returned errors this is
/// the error type as seen by the operation, before any boxing.
#[derive(Debug)]
pub struct Fault {
    type_name: &'static str,
    cause: BoxError,
}

impl Fault {
    /// Creates a fault from an error returned by an operation.
    pub fn from_error<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            type_name: type_name::<E>(),
            cause: error.into(),
        }
    }

    /// Creates a fault from a panic payload caught while executing an operation.
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let panic = Panic::from_payload(payload);

        Self {
            type_name: panic.payload_type(),
            cause: Box::new(panic),
        }
    }

    /// The concrete type name of the fault.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the fault is a captured panic.
    #[must_use]
    pub fn is_panic(&self) -> bool {
        self.cause.is::<Panic>()
    }

    pub(crate) fn into_parts(self) -> (&'static str, BoxError) {
        (self.type_name, self.cause)
    }
}

/// The result of running an operation, as understood by the assertion.
///
/// Implemented for `()`, which can only fail by panicking, and for any `Result` whose error
/// converts into a [`BoxError`]: concrete error types, `&str`, `String` and `Box<dyn Error>`.
/// A `Box<dyn Error + Send + Sync>` coerces into a `Box<dyn Error>` with `map_err`.
///
/// Implement it for custom outcome types to make them usable with the checker.
pub trait Completion {
    /// The value produced when the operation completes normally.
    type Value;

    /// Splits the outcome into a value or a fault.
    ///
    /// # Errors
    ///
    /// Returns the [`Fault`] the operation raised.
    fn into_result(self) -> Result<Self::Value, Fault>;
}

impl Completion for () {
    type Value = ();

    fn into_result(self) -> Result<Self::Value, Fault> {
        Ok(())
    }
}

impl<T, E> Completion for Result<T, E>
where
    E: Into<BoxError>,
{
    type Value = T;

    fn into_result(self) -> Result<Self::Value, Fault> {
        self.map_err(Fault::from_error)
    }
}
