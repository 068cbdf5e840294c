// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::{Any, type_name};
use std::fmt;

use parking_lot::Mutex;

/// Type name reported for panic payloads that are neither `&str` nor `String`.
pub(crate) const OPAQUE_PAYLOAD: &str = "Box<dyn Any + Send>";

/// A panic captured while executing an operation.
///
/// The payload is kept intact so the panic can be re-raised with [`Panic::resume`].
/// Payloads produced by `panic!` with a message are also available as text.
#[derive(thiserror::Error)]
#[error("{}", describe(.message))]
pub struct Panic {
    message: Option<String>,
    payload_type: &'static str,
    // The mutex only exists to make the payload `Sync`; it is never contended.
    payload: Mutex<Box<dyn Any + Send>>,
}

impl Panic {
    pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let (message, payload_type) = if let Some(text) = payload.downcast_ref::<&'static str>() {
            (Some((*text).to_owned()), type_name::<&str>())
        } else if let Some(text) = payload.downcast_ref::<String>() {
            (Some(text.clone()), type_name::<String>())
        } else {
            (None, OPAQUE_PAYLOAD)
        };

        Self {
            message,
            payload_type,
            payload: Mutex::new(payload),
        }
    }

    /// The panic message, if the payload was a string.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The type name of the panic payload.
    #[must_use]
    pub const fn payload_type(&self) -> &'static str {
        self.payload_type
    }

    /// Returns `true` if the payload is of type `T`.
    #[must_use]
    pub fn payload_is<T: Any>(&self) -> bool {
        self.payload.lock().is::<T>()
    }

    /// Consumes the panic and returns its original payload.
    #[must_use]
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload.into_inner()
    }

    /// Re-raises the panic with its original payload.
    pub fn resume(self) -> ! {
        std::panic::resume_unwind(self.into_payload())
    }
}

impl fmt::Debug for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panic")
            .field("message", &self.message)
            .field("payload_type", &self.payload_type)
            .finish_non_exhaustive()
    }
}

fn describe(message: &Option<String>) -> String {
    message
        .as_deref()
        .map_or_else(|| "panicked with a non-string payload".to_owned(), |text| format!("panicked: {text}"))
}
