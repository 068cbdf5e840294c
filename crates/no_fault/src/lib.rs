// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Assertions that an operation completes without faulting.
//!
//! A test often needs to state that some piece of code simply works: it must not return an error
//! and it must not panic. Unwrapping gets the job done, but the resulting failure says little
//! about what was being checked. This crate runs the operation, and if it faults, produces an
//! [`AssertionFailedError`] with a descriptive message and the original fault attached as its
//! [`source`](std::error::Error::source).
//!
//! # Faults
//!
//! An operation faults if it returns `Err` or panics. Operations return any type that implements
//! [`Completion`]: `()` for operations that produce nothing, or a `Result` whose error can be
//! boxed.
//!
//! # Messages
//!
//! Failure messages take the form `"<message> ==> Unexpected exception thrown: <type>"`, where
//! `<type>` is the concrete type name of the fault. The message part is optional and may be given
//! as a literal or as a [deferred][Message::deferred] closure that only runs on failure.
//!
//! # Examples
//!
//! ```
//! use no_fault::{Message, does_not_fail, does_not_fail_with, yields, yields_with};
//!
//! # fn main() -> Result<(), no_fault::AssertionFailedError> {
//! does_not_fail(|| "1".parse::<u8>().map(drop))?;
//! does_not_fail_with(|| {}, "no-op")?;
//!
//! let value: u32 = yields(|| "42".parse::<u32>())?;
//! assert_eq!(value, 42);
//!
//! let failure = yields_with(
//!     || "forty-two".parse::<u32>(),
//!     Message::deferred(|| format!("parsing {}", "forty-two")),
//! )
//! .unwrap_err();
//! assert_eq!(
//!     failure.to_string(),
//!     "parsing forty-two ==> Unexpected exception thrown: core::num::error::ParseIntError"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Tests that prefer panics can use the [`assert_does_not_fail!`] macro instead.
//!
//! # Configuration
//!
//! [`Assertion`] is the configurable form of the checker. It accepts the message, controls
//! whether panics count as faults, and can also await futures.
//!
//! # Features
//!
//! - `logs` (default): emits a `DEBUG` event through `tracing` whenever an assertion fails.

mod assertion;
mod failure;
mod fault;
mod macros;
mod message;
mod panic;

#[cfg(all(test, feature = "logs"))]
mod testing;

pub use assertion::Assertion;
#[doc(hidden)]
pub use failure::__private;
pub use failure::{AssertionFailedError, UNEXPECTED_FAULT};
pub use fault::{BoxError, Completion, Fault};
pub use message::{Message, PREFIX_SEPARATOR, build_prefix};
pub use panic::Panic;

/// Asserts that an operation which produces no value does not fault.
///
/// # Errors
///
/// Returns an [`AssertionFailedError`] if the operation returns an error or panics.
pub fn does_not_fail<F, C>(operation: F) -> Result<(), AssertionFailedError>
where
    F: FnOnce() -> C,
    C: Completion<Value = ()>,
{
    Assertion::new().check(operation)
}

/// Asserts that an operation which produces no value does not fault, prefixing any failure
/// message with `message`.
///
/// # Errors
///
/// Returns an [`AssertionFailedError`] if the operation returns an error or panics.
pub fn does_not_fail_with<'a, F, C>(operation: F, message: impl Into<Message<'a>>) -> Result<(), AssertionFailedError>
where
    F: FnOnce() -> C,
    C: Completion<Value = ()>,
{
    Assertion::new().message(message).check(operation)
}

/// Asserts that an operation does not fault and returns the value it produced.
///
/// # Errors
///
/// Returns an [`AssertionFailedError`] if the operation returns an error or panics.
pub fn yields<F, C>(operation: F) -> Result<C::Value, AssertionFailedError>
where
    F: FnOnce() -> C,
    C: Completion,
{
    Assertion::new().get(operation)
}

/// Asserts that an operation does not fault and returns the value it produced, prefixing any
/// failure message with `message`.
///
/// # Errors
///
/// Returns an [`AssertionFailedError`] if the operation returns an error or panics.
pub fn yields_with<'a, F, C>(operation: F, message: impl Into<Message<'a>>) -> Result<C::Value, AssertionFailedError>
where
    F: FnOnce() -> C,
    C: Completion,
{
    Assertion::new().message(message).get(operation)
}
