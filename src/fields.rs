//! Field kinds of the duration component model.

use core::fmt;

/// The six value fields of a duration, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateTimeField {
    /// The `years` field.
    Years,
    /// The `months` field.
    Months,
    /// The `days` field.
    Days,
    /// The `hours` field.
    Hours,
    /// The `minutes` field.
    Minutes,
    /// The `seconds` field, the only field that may carry a fraction.
    Seconds,
}

impl DateTimeField {
    /// All six fields in application order.
    pub const ALL: [Self; 6] = [
        Self::Years,
        Self::Months,
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
    ];
}

impl fmt::Display for DateTimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Years => "years",
            Self::Months => "months",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        })
    }
}

/// The units an anchor instant is advanced by: the six duration fields plus
/// the millisecond remainder of the seconds fraction.
///
/// Anchored application always proceeds in this order, most significant
/// unit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorField {
    /// Whole calendar years.
    Years,
    /// Whole calendar months.
    Months,
    /// Whole days.
    Days,
    /// Whole hours.
    Hours,
    /// Whole minutes.
    Minutes,
    /// Whole seconds.
    Seconds,
    /// Whole milliseconds.
    Milliseconds,
}
