// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::fmt;

/// Separator placed between a user-supplied message and the generated failure text.
pub const PREFIX_SEPARATOR: &str = " ==> ";

/// The source of an optional prefix for an assertion failure message.
///
/// A message is either absent, a literal string, or a deferred closure that
/// produces the string. Deferred messages are only evaluated when the assertion
/// fails, so building them can be arbitrarily expensive without slowing down
/// passing tests.
///
/// # Examples
///
/// ```
/// use no_fault::Message;
///
/// let literal = Message::from("loading config");
/// let deferred = Message::deferred(|| format!("loading config from {}", "/etc/app.toml"));
/// let absent = Message::none();
///
/// assert_eq!(literal.resolve().as_deref(), Some("loading config"));
/// assert_eq!(deferred.resolve().as_deref(), Some("loading config from /etc/app.toml"));
/// assert_eq!(absent.resolve(), None);
/// ```
#[derive(Default)]
pub enum Message<'a> {
    /// No message was supplied.
    #[default]
    None,

    /// A message known up front.
    Literal(Cow<'a, str>),

    /// A message computed on demand, at most once.
    Deferred(Box<dyn FnOnce() -> String + 'a>),
}

impl<'a> Message<'a> {
    /// Creates an absent message.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Creates a message that is only computed if the assertion fails.
    pub fn deferred(supplier: impl FnOnce() -> String + 'a) -> Self {
        Self::Deferred(Box::new(supplier))
    }

    /// Returns `true` if no message was supplied.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Resolves the message into its final text, invoking a deferred supplier if there is one.
    #[must_use]
    pub fn resolve(self) -> Option<Cow<'a, str>> {
        match self {
            Self::None => None,
            Self::Literal(text) => Some(text),
            Self::Deferred(supplier) => Some(Cow::Owned(supplier())),
        }
    }
}

impl fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Deferred(_) => f.debug_tuple("Deferred").finish_non_exhaustive(),
        }
    }
}

impl<'a> From<&'a str> for Message<'a> {
    fn from(value: &'a str) -> Self {
        Self::Literal(Cow::Borrowed(value))
    }
}

impl From<String> for Message<'_> {
    fn from(value: String) -> Self {
        Self::Literal(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for Message<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Self::Literal(value)
    }
}

impl<'a, M> From<Option<M>> for Message<'a>
where
    M: Into<Self>,
{
    fn from(value: Option<M>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

/// Builds the prefix that precedes the generated part of a failure message.
///
/// Absent and blank messages produce an empty prefix. Anything else is
/// followed by [`PREFIX_SEPARATOR`].
///
/// ```
/// use no_fault::build_prefix;
///
/// assert_eq!(build_prefix(Some("parsing input")), "parsing input ==> ");
/// assert_eq!(build_prefix(Some("  ")), "");
/// assert_eq!(build_prefix(None), "");
/// ```
#[must_use]
pub fn build_prefix(message: Option<&str>) -> String {
    match message {
        Some(text) if !text.trim().is_empty() => format!("{text}{PREFIX_SEPARATOR}"),
        _ => String::new(),
    }
}
