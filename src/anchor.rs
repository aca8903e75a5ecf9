//! The calendar anchor capability and its proleptic Gregorian
//! implementation.
//!
//! Anchored operations treat the anchor as a transient scratch instant:
//! cloned where the original must survive, advanced field by field in
//! most-significant order, and read back as epoch milliseconds. Durations
//! never own or cache an anchor.

use crate::{
    duration_assert,
    fields::AnchorField,
    utils::{self, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND},
    DurationError, DurationResult, MS_PER_DAY,
};

/// The calendar capability consumed by anchored duration operations.
///
/// `Clone` doubles as the snapshot operation: callers clone the anchor when
/// the original instant must be preserved across an application.
pub trait CalendarAnchor: Clone {
    /// Advances this instant by `amount` units of `field`, in place.
    fn advance(&mut self, field: AnchorField, amount: i64) -> DurationResult<()>;

    /// Milliseconds since the Unix epoch for the current instant.
    fn epoch_millis(&self) -> i64;
}

/// Largest absolute day offset from the epoch an anchor may reach. Keeps
/// every reachable instant's millisecond value inside `i64`.
pub(crate) const MAX_EPOCH_DAYS: i64 = 100_000_000;

fn range_error() -> DurationError {
    DurationError::range().with_message("instant is outside the anchor's representable range.")
}

/// A proleptic Gregorian instant at a fixed offset with millisecond
/// precision.
///
/// Advancing by months or years clamps the day-of-month into the target
/// month (adding one month to January 31 lands on the last day of
/// February).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GregorianAnchor {
    year: i32,
    month: u8,
    day: u8,
    millis_of_day: u32,
}

impl GregorianAnchor {
    /// The Unix epoch, 1970-01-01T00:00:00Z.
    #[must_use]
    pub const fn epoch() -> Self {
        Self {
            year: 1970,
            month: 1,
            day: 1,
            millis_of_day: 0,
        }
    }

    /// The reference instants of the duration order relation: four calendar
    /// points chosen to exercise worst-case month-length and leap-year
    /// variability (XML Schema Part 2 §3.2.6.2).
    pub(crate) const REFERENCE_POINTS: [Self; 4] = [
        Self {
            year: 1696,
            month: 9,
            day: 1,
            millis_of_day: 0,
        },
        Self {
            year: 1697,
            month: 2,
            day: 1,
            millis_of_day: 0,
        },
        Self {
            year: 1903,
            month: 3,
            day: 1,
            millis_of_day: 0,
        },
        Self {
            year: 1903,
            month: 7,
            day: 1,
            millis_of_day: 0,
        },
    ];

    /// Creates an anchor at midnight of the given civil date.
    pub fn new(year: i32, month: u8, day: u8) -> DurationResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DurationError::range().with_message("month must be between 1 and 12."));
        }
        if day < 1 || day > utils::days_in_month(year, month) {
            return Err(DurationError::range().with_message("day is out of range for the month."));
        }
        let anchor = Self {
            year,
            month,
            day,
            millis_of_day: 0,
        };
        anchor.ensure_in_range()?;
        Ok(anchor)
    }

    /// The civil year of this instant.
    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The civil month of this instant, between 1 and 12.
    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// The civil day-of-month of this instant.
    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Milliseconds elapsed since this instant's midnight.
    #[inline]
    #[must_use]
    pub const fn millis_of_day(&self) -> u32 {
        self.millis_of_day
    }

    pub(crate) fn epoch_days(&self) -> i64 {
        utils::epoch_days_from_date(self.year, self.month, self.day)
    }

    fn ensure_in_range(&self) -> DurationResult<()> {
        if self.epoch_days().abs() > MAX_EPOCH_DAYS {
            return Err(range_error());
        }
        Ok(())
    }

    fn with_epoch_days(&self, days: i64) -> DurationResult<Self> {
        if days.abs() > MAX_EPOCH_DAYS {
            return Err(range_error());
        }
        let (year, month, day) = utils::date_from_epoch_days(days);
        duration_assert!(
            (1..=12).contains(&month),
            "day balancing produced month {month}"
        );
        Ok(Self {
            year,
            month,
            day,
            millis_of_day: self.millis_of_day,
        })
    }

    fn advanced_by_millis(&self, amount: i64) -> DurationResult<Self> {
        let total = i128::from(self.millis_of_day) + i128::from(amount);
        let day_delta = i64::try_from(total.div_euclid(i128::from(MS_PER_DAY)))
            .map_err(|_| range_error())?;
        let millis_of_day = total.rem_euclid(i128::from(MS_PER_DAY)) as u32;
        let days = self
            .epoch_days()
            .checked_add(day_delta)
            .ok_or_else(range_error)?;
        let mut next = self.with_epoch_days(days)?;
        next.millis_of_day = millis_of_day;
        Ok(next)
    }
}

impl CalendarAnchor for GregorianAnchor {
    fn advance(&mut self, field: AnchorField, amount: i64) -> DurationResult<()> {
        let next = match field {
            AnchorField::Years => {
                let year = i32::try_from(i64::from(self.year).checked_add(amount).ok_or_else(range_error)?)
                    .map_err(|_| range_error())?;
                let day = utils::constrain_day(year, self.month, self.day);
                let next = Self { year, day, ..*self };
                next.ensure_in_range()?;
                next
            }
            AnchorField::Months => {
                let total = i64::from(self.year)
                    .checked_mul(12)
                    .and_then(|months| months.checked_add(i64::from(self.month) - 1))
                    .and_then(|months| months.checked_add(amount))
                    .ok_or_else(range_error)?;
                let year = i32::try_from(total.div_euclid(12)).map_err(|_| range_error())?;
                let month = (total.rem_euclid(12) + 1) as u8;
                let day = utils::constrain_day(year, month, self.day);
                let next = Self {
                    year,
                    month,
                    day,
                    millis_of_day: self.millis_of_day,
                };
                next.ensure_in_range()?;
                next
            }
            AnchorField::Days => {
                let days = self
                    .epoch_days()
                    .checked_add(amount)
                    .ok_or_else(range_error)?;
                self.with_epoch_days(days)?
            }
            AnchorField::Hours => {
                self.advanced_by_millis(amount.checked_mul(MS_PER_HOUR).ok_or_else(range_error)?)?
            }
            AnchorField::Minutes => self
                .advanced_by_millis(amount.checked_mul(MS_PER_MINUTE).ok_or_else(range_error)?)?,
            AnchorField::Seconds => self
                .advanced_by_millis(amount.checked_mul(MS_PER_SECOND).ok_or_else(range_error)?)?,
            AnchorField::Milliseconds => self.advanced_by_millis(amount)?,
        };
        *self = next;
        Ok(())
    }

    fn epoch_millis(&self) -> i64 {
        self.epoch_days() * MS_PER_DAY + i64::from(self.millis_of_day)
    }
}

impl Default for GregorianAnchor {
    fn default() -> Self {
        Self::epoch()
    }
}
