//! The `xsd_duration` crate is an implementation of the W3C XML Schema
//! `duration` datatype in Rust.
//!
//! ```rust
//! use core::str::FromStr;
//! use xsd_duration::{Duration, OrderRelation};
//!
//! // One month and thirty days cannot be ordered without picking an instant.
//! let month = Duration::from_str("P1M").unwrap();
//! let thirty_days = Duration::from_str("P30D").unwrap();
//! assert_eq!(month.compare(&thirty_days).unwrap(), OrderRelation::Indeterminate);
//!
//! // One day and twenty-four hours meet at the same instant everywhere.
//! let day = Duration::from_str("P1D").unwrap();
//! let day_in_hours = Duration::from_str("PT24H").unwrap();
//! assert_eq!(day, day_in_hours);
//! ```
//!
//! A [`Duration`] is a signed span over six optional Gregorian fields
//! (years, months, days, hours, minutes, and decimal seconds) with
//! arbitrary-precision magnitudes. The value space, order relation, and
//! lexical form follow [XML Schema Part 2: Datatypes][xsd] §3.2.6.
//!
//! Variable-length units (months, years) are disambiguated by a
//! [`CalendarAnchor`]: an absolute instant the duration is applied to.
//! Anchored operations take the anchor as a transient parameter and never
//! retain it.
//!
//! [xsd]: https://www.w3.org/TR/xmlschema-2/
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod anchor;
pub mod error;
pub mod fields;
pub mod parsers;

mod duration;
pub(crate) mod utils;

use core::cmp::Ordering;

#[doc(inline)]
pub use error::DurationError;

/// The duration result type.
pub type DurationResult<T> = Result<T, DurationError>;

pub use crate::{
    anchor::{CalendarAnchor, GregorianAnchor},
    duration::{Duration, FieldValue, OrderRelation, PartialDuration, SchemaType},
    fields::{AnchorField, DateTimeField},
};

/// A library specific trait for unwrapping assertions.
pub(crate) trait DurationUnwrap {
    type Output;

    /// `xsd_duration` based assertion for unwrapping. This will panic in
    /// debug builds, but throws an error during runtime.
    fn duration_unwrap(self) -> DurationResult<Self::Output>;
}

impl<T> DurationUnwrap for Option<T> {
    type Output = T;

    fn duration_unwrap(self) -> DurationResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(DurationError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! duration_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::DurationError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::DurationError::assert());
        }
    };
}

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

impl From<i8> for Sign {
    fn from(value: i8) -> Self {
        match value.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

impl Sign {
    /// Coerces the current `Sign` to be either negative or positive.
    pub(crate) fn as_sign_multiplier(self) -> i8 {
        if matches!(self, Self::Zero) {
            return 1;
        }
        self as i8
    }

    pub(crate) fn negate(self) -> Sign {
        Sign::from(-(self as i8))
    }
}

// Relevant numeric constants
/// Milliseconds per day constant: 8.64e+7
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
