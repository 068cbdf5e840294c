// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error;
use std::fmt;

use crate::{BoxError, Fault, Panic};

/// Fixed text that names the fault type at the end of every failure message.
pub const UNEXPECTED_FAULT: &str = "Unexpected exception thrown: ";

/// An assertion failed because the operation under test raised a fault.
///
/// The message has the form `"<prefix>Unexpected exception thrown: <type>"`, where the
/// prefix comes from the optional [`Message`][crate::Message] and `<type>` is the concrete type
/// name of the fault. The original fault is available through [`Error::source`], as well as
/// the typed accessors on this type.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AssertionFailedError {
    message: String,
    fault_type_name: &'static str,
    #[source]
    cause: BoxError,
}

impl AssertionFailedError {
    pub(crate) fn new(message: String, fault: Fault) -> Self {
        let (fault_type_name, cause) = fault.into_parts();

        Self {
            message,
            fault_type_name,
            cause,
        }
    }

    /// The full failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The type name of the fault that caused the failure.
    ///
    /// For returned errors this is the static error type of the operation. An operation that
    /// returns a boxed trait object such as `Box<dyn Error>` therefore reports the box type,
    /// not the concrete error inside it; use [`cause`][Self::cause] to inspect the latter.
    #[must_use]
    pub const fn fault_type_name(&self) -> &'static str {
        self.fault_type_name
    }

    /// The original fault.
    #[must_use]
    pub fn cause(&self) -> &(dyn Error + 'static) {
        &*self.cause
    }

    /// Returns `true` if the operation panicked rather than returning an error.
    #[must_use]
    pub fn is_panic(&self) -> bool {
        self.cause.is::<Panic>()
    }

    /// The captured panic, if the operation panicked.
    #[must_use]
    pub fn panic(&self) -> Option<&Panic> {
        self.cause.downcast_ref()
    }

    /// Returns the original fault if it is of type `E`.
    ///
    /// Errors that were converted into a box on the way out of the operation (for example `&str`
    /// or `String` errors) are stored in their boxed form and cannot be recovered as `E`.
    #[must_use]
    pub fn downcast_cause_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        self.cause.downcast_ref()
    }

    /// Takes the original fault out of the failure if it is of type `E`.
    ///
    /// # Errors
    ///
    /// Returns the failure unchanged if the fault is of some other type.
    pub fn downcast_cause<E>(self) -> Result<E, Self>
    where
        E: Error + 'static,
    {
        let Self {
            message,
            fault_type_name,
            cause,
        } = self;

        match cause.downcast::<E>() {
            Ok(error) => Ok(*error),
            Err(cause) => Err(Self {
                message,
                fault_type_name,
                cause,
            }),
        }
    }

    /// Consumes the failure and returns the original fault.
    #[must_use]
    pub fn into_cause(self) -> BoxError {
        self.cause
    }

    /// Formats the failure message followed by the fault that caused it.
    #[must_use]
    pub fn report(&self) -> impl fmt::Display + '_ {
        Report(self)
    }

    /// Raises the failure as a panic.
    ///
    /// A captured panic is resumed with its original payload. A returned error panics with
    /// the [report][Self::report] of this failure.
    #[track_caller]
    pub fn resume_unwind(self) -> ! {
        let Self {
            message,
            fault_type_name,
            cause,
        } = self;

        match cause.downcast::<Panic>() {
            Ok(panic) => (*panic).resume(),
            Err(cause) => fail(&Self {
                message,
                fault_type_name,
                cause,
            }),
        }
    }
}

struct Report<'a>(&'a AssertionFailedError);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\ncaused by: {}", self.0.message, self.0.cause)
    }
}

#[track_caller]
#[expect(clippy::panic, reason = "raising a failed assertion as a panic is the purpose of this function")]
fn fail(failure: &AssertionFailedError) -> ! {
    panic!("{}", failure.report())
}

#[doc(hidden)]
pub mod __private {
    use super::AssertionFailedError;

    /// Panics with the report of a failed assertion. Used by the assertion macros.
    #[track_caller]
    pub fn fail(failure: &AssertionFailedError) -> ! {
        super::fail(failure)
    }
}
