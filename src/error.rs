//! The error type for duration operations.

use alloc::borrow::Cow;
use core::fmt;

/// The category of failure a duration operation surfaced.
///
/// Every error is synchronous and non-retryable; none of the conditions
/// below are transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An internal invariant did not hold.
    Generic,
    /// An input had an invalid shape, such as a field record with every
    /// field unset.
    Type,
    /// A value fell outside its valid domain or outside the anchor's
    /// representable range.
    Range,
    /// Lexical text did not match the duration grammar.
    Syntax,
    /// The value's field pattern cannot support the operation: no named
    /// schema type matches, a sum needs a month/day borrow, or a fractional
    /// month would have to carry into days.
    State,
    /// The request exceeded this implementation's capability limits.
    Unsupported,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Generic => "generic",
            Self::Type => "type",
            Self::Range => "range",
            Self::Syntax => "syntax",
            Self::State => "state",
            Self::Unsupported => "unsupported",
        })
    }
}

/// The error returned by fallible duration operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl DurationError {
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Creates a generic error.
    #[must_use]
    pub const fn generic() -> Self {
        Self::new(ErrorKind::Generic)
    }

    /// Creates a type error.
    #[must_use]
    pub const fn r#type() -> Self {
        Self::new(ErrorKind::Type)
    }

    /// Creates a range error.
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Creates a syntax error.
    #[must_use]
    pub const fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Creates a state error.
    #[must_use]
    pub const fn state() -> Self {
        Self::new(ErrorKind::State)
    }

    /// Creates an unsupported-operation error.
    #[must_use]
    pub const fn unsupported() -> Self {
        Self::new(ErrorKind::Unsupported)
    }

    pub(crate) const fn assert() -> Self {
        Self {
            kind: ErrorKind::Generic,
            msg: Cow::Borrowed("internal invariant violated."),
        }
    }

    /// Attaches a message to this error.
    #[must_use]
    pub fn with_message(mut self, msg: impl Into<Cow<'static, str>>) -> Self {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns this error's message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error", self.kind)?;
        if !self.msg.is_empty() {
            write!(f, ": {}", self.msg)?;
        }
        Ok(())
    }
}

impl core::error::Error for DurationError {}
