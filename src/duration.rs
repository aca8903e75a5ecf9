//! This module implements the XML Schema `Duration` value type along with
//! its arithmetic, ordering, and anchored operations.

use crate::{
    anchor::{CalendarAnchor, GregorianAnchor},
    fields::{AnchorField, DateTimeField},
    parsers::{self, FormattableDuration},
    DurationError, DurationResult, DurationUnwrap, Sign, MS_PER_DAY,
};
use alloc::format;
use bigdecimal::{BigDecimal, RoundingMode};
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::str::FromStr;
use num_bigint::{BigInt, BigUint, Sign as BigSign};
use num_traits::{ToPrimitive, Zero};
use writeable::Writeable;

#[cfg(test)]
mod tests;

/// A `PartialDuration` is the record of optional field magnitudes a
/// `Duration` factory accepts.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PartialDuration {
    /// A potentially existent `years` magnitude.
    pub years: Option<BigUint>,
    /// A potentially existent `months` magnitude.
    pub months: Option<BigUint>,
    /// A potentially existent `days` magnitude.
    pub days: Option<BigUint>,
    /// A potentially existent `hours` magnitude.
    pub hours: Option<BigUint>,
    /// A potentially existent `minutes` magnitude.
    pub minutes: Option<BigUint>,
    /// A potentially existent `seconds` magnitude; may carry a fraction.
    pub seconds: Option<BigDecimal>,
}

impl PartialDuration {
    /// Returns whether the `PartialDuration` is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// The XML Schema datatype a duration's set-field pattern matches.
///
/// The classification is derived from which fields are set, never stored;
/// a duration matching none of the three patterns is a valid general
/// duration with no named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    /// `xs:duration`: all six fields set.
    Duration,
    /// `xs:dayTimeDuration`: days and the time fields set, years and
    /// months unset.
    DayTimeDuration,
    /// `xs:yearMonthDuration`: years and months set, all others unset.
    YearMonthDuration,
}

/// The outcome of the duration order relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderRelation {
    /// The left duration is shorter at every reference instant.
    Less,
    /// Both durations meet at the same instant everywhere.
    Equal,
    /// The left duration is longer at every reference instant.
    Greater,
    /// The reference instants disagree; the pair has no anchor-independent
    /// order (one month versus thirty days).
    Indeterminate,
}

impl OrderRelation {
    /// Converts a determinate relation into an `Ordering`.
    #[inline]
    #[must_use]
    pub fn as_ordering(self) -> Option<Ordering> {
        match self {
            Self::Less => Some(Ordering::Less),
            Self::Equal => Some(Ordering::Equal),
            Self::Greater => Some(Ordering::Greater),
            Self::Indeterminate => None,
        }
    }
}

impl From<Ordering> for OrderRelation {
    fn from(value: Ordering) -> Self {
        match value {
            Ordering::Less => Self::Less,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::Greater,
        }
    }
}

/// A full-precision view of one duration field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Integer magnitude of a year, month, day, hour, or minute field.
    Integer(&'a BigUint),
    /// Decimal magnitude of the seconds field.
    Decimal(&'a BigDecimal),
}

/// The native Rust implementation of the XML Schema `duration` value space.
///
/// A `Duration` is a signed span over six optional Gregorian fields. Each
/// field is independently set or unset (an unset field carries no
/// constraint and is distinct from zero) and magnitudes have arbitrary
/// precision. The sign is carried once, separately from the magnitudes.
///
/// Values are immutable; every operation returns a new `Duration`.
#[derive(Debug, Clone)]
pub struct Duration {
    sign: Sign,
    years: Option<BigUint>,
    months: Option<BigUint>,
    days: Option<BigUint>,
    hours: Option<BigUint>,
    minutes: Option<BigUint>,
    seconds: Option<BigDecimal>,
}

// ==== Private creation methods ====

impl Duration {
    #[inline]
    pub(crate) fn new_unchecked(sign: Sign, fields: PartialDuration) -> Self {
        Self {
            sign,
            years: fields.years,
            months: fields.months,
            days: fields.days,
            hours: fields.hours,
            minutes: fields.minutes,
            seconds: fields.seconds,
        }
    }

    fn as_formattable(&self) -> FormattableDuration<'_> {
        FormattableDuration {
            sign: self.sign,
            years: self.years.as_ref(),
            months: self.months.as_ref(),
            days: self.days.as_ref(),
            hours: self.hours.as_ref(),
            minutes: self.minutes.as_ref(),
            seconds: self.seconds.as_ref(),
        }
    }

    /// Millisecond remainder of the seconds fraction, truncated (never
    /// rounded) below millisecond precision.
    fn fractional_millis(&self) -> i64 {
        let Some(seconds) = self.seconds.as_ref() else {
            return 0;
        };
        let whole = seconds.with_scale_round(0, RoundingMode::Down);
        let fraction = seconds - &whole;
        (fraction * BigDecimal::from(1000u32))
            .with_scale_round(0, RoundingMode::Down)
            .to_i64()
            .unwrap_or(0)
    }

    /// Anchored operations apply fields at the convenience-getter
    /// precision; any field beyond `i32` fails this check first.
    fn check_anchor_capacity(&self) -> DurationResult<()> {
        let integer_limit = BigUint::from(i32::MAX as u32);
        let decimal_limit = BigDecimal::from(i32::MAX);
        for field in DateTimeField::ALL {
            let too_large = match self.field(field) {
                Some(FieldValue::Integer(value)) => *value > integer_limit,
                Some(FieldValue::Decimal(value)) => *value > decimal_limit,
                None => false,
            };
            if too_large {
                return Err(DurationError::unsupported()
                    .with_message(format!("{field} magnitude exceeds the comparison capability.")));
            }
        }
        Ok(())
    }
}

// ==== Public Duration API: creation ====

impl Duration {
    /// Creates a `Duration` from a sign and a `PartialDuration`.
    ///
    /// A duration with every field unset is refused; a duration whose set
    /// fields are all zero gets the zero sign regardless of `positive`.
    pub fn from_partial(positive: bool, fields: PartialDuration) -> DurationResult<Self> {
        if fields.is_empty() {
            return Err(DurationError::r#type()
                .with_message("PartialDuration cannot have all empty fields."));
        }
        let sign = derived_sign(positive, &fields);
        Ok(Self::new_unchecked(sign, fields))
    }

    /// Creates a full `Duration` with all six fields set.
    pub fn from_parts(
        positive: bool,
        years: u64,
        months: u64,
        days: u64,
        hours: u64,
        minutes: u64,
        seconds: BigDecimal,
    ) -> DurationResult<Self> {
        if seconds.sign() == BigSign::Minus {
            return Err(
                DurationError::range().with_message("field magnitudes must be non-negative.")
            );
        }
        Self::from_partial(
            positive,
            PartialDuration {
                years: Some(BigUint::from(years)),
                months: Some(BigUint::from(months)),
                days: Some(BigUint::from(days)),
                hours: Some(BigUint::from(hours)),
                minutes: Some(BigUint::from(minutes)),
                seconds: Some(seconds),
            },
        )
    }

    /// Creates a year-month duration: years and months set, all other
    /// fields unset.
    #[must_use]
    pub fn year_month(positive: bool, years: u64, months: u64) -> Self {
        let fields = PartialDuration {
            years: Some(BigUint::from(years)),
            months: Some(BigUint::from(months)),
            ..PartialDuration::default()
        };
        Self::new_unchecked(derived_sign(positive, &fields), fields)
    }

    /// Creates a day-time duration: days and the time fields set, years and
    /// months unset.
    #[must_use]
    pub fn day_time(positive: bool, days: u64, hours: u64, minutes: u64, seconds: u64) -> Self {
        let fields = PartialDuration {
            days: Some(BigUint::from(days)),
            hours: Some(BigUint::from(hours)),
            minutes: Some(BigUint::from(minutes)),
            seconds: Some(BigDecimal::from(seconds)),
            ..PartialDuration::default()
        };
        Self::new_unchecked(derived_sign(positive, &fields), fields)
    }

    /// Creates a day-time duration from a millisecond count. The seconds
    /// field keeps millisecond scale, so `1500` becomes `PT...1.500S`.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        let mut remainder = millis.unsigned_abs();
        let days = remainder / MS_PER_DAY as u64;
        remainder %= MS_PER_DAY as u64;
        let hours = remainder / 3_600_000;
        remainder %= 3_600_000;
        let minutes = remainder / 60_000;
        remainder %= 60_000;
        let fields = PartialDuration {
            days: Some(BigUint::from(days)),
            hours: Some(BigUint::from(hours)),
            minutes: Some(BigUint::from(minutes)),
            seconds: Some(BigDecimal::new(BigInt::from(remainder), 3)),
            ..PartialDuration::default()
        };
        Self::new_unchecked(derived_sign(millis >= 0, &fields), fields)
    }
}

// ==== Public Duration getters ====

impl Duration {
    /// Returns the full-precision magnitude of a field, or `None` if the
    /// field is unset.
    #[must_use]
    pub fn field(&self, field: DateTimeField) -> Option<FieldValue<'_>> {
        match field {
            DateTimeField::Years => self.years.as_ref().map(FieldValue::Integer),
            DateTimeField::Months => self.months.as_ref().map(FieldValue::Integer),
            DateTimeField::Days => self.days.as_ref().map(FieldValue::Integer),
            DateTimeField::Hours => self.hours.as_ref().map(FieldValue::Integer),
            DateTimeField::Minutes => self.minutes.as_ref().map(FieldValue::Integer),
            DateTimeField::Seconds => self.seconds.as_ref().map(FieldValue::Decimal),
        }
    }

    /// Returns whether a field is set.
    #[inline]
    #[must_use]
    pub fn is_set(&self, field: DateTimeField) -> bool {
        self.field(field).is_some()
    }

    /// Returns the sign of this duration.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Returns whether this duration is zero-signed.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }

    /// Returns the years field truncated to its low-order 32 bits, or 0 if
    /// unset.
    ///
    /// The fixed-width getters deliberately lose precision; use
    /// [`Duration::field`] for the exact magnitude.
    #[inline]
    #[must_use]
    pub fn years(&self) -> i32 {
        truncated(self.years.as_ref())
    }

    /// Returns the months field truncated to its low-order 32 bits, or 0 if
    /// unset.
    #[inline]
    #[must_use]
    pub fn months(&self) -> i32 {
        truncated(self.months.as_ref())
    }

    /// Returns the days field truncated to its low-order 32 bits, or 0 if
    /// unset.
    #[inline]
    #[must_use]
    pub fn days(&self) -> i32 {
        truncated(self.days.as_ref())
    }

    /// Returns the hours field truncated to its low-order 32 bits, or 0 if
    /// unset.
    #[inline]
    #[must_use]
    pub fn hours(&self) -> i32 {
        truncated(self.hours.as_ref())
    }

    /// Returns the minutes field truncated to its low-order 32 bits, or 0
    /// if unset.
    #[inline]
    #[must_use]
    pub fn minutes(&self) -> i32 {
        truncated(self.minutes.as_ref())
    }

    /// Returns the whole part of the seconds field truncated to its
    /// low-order 32 bits, or 0 if unset. The fraction is discarded.
    #[must_use]
    pub fn seconds(&self) -> i32 {
        self.seconds.as_ref().map_or(0, |seconds| {
            let (unscaled, _) = seconds
                .with_scale_round(0, RoundingMode::Down)
                .as_bigint_and_exponent();
            truncated(Some(unscaled.magnitude()))
        })
    }

    /// Classifies this duration into one of the three named XML Schema
    /// types by its exact set-field pattern.
    pub fn xml_schema_type(&self) -> DurationResult<SchemaType> {
        match (
            self.years.is_some(),
            self.months.is_some(),
            self.days.is_some(),
            self.hours.is_some(),
            self.minutes.is_some(),
            self.seconds.is_some(),
        ) {
            (true, true, true, true, true, true) => Ok(SchemaType::Duration),
            (false, false, true, true, true, true) => Ok(SchemaType::DayTimeDuration),
            (true, true, false, false, false, false) => Ok(SchemaType::YearMonthDuration),
            _ => Err(DurationError::state()
                .with_message("set-field pattern does not match a named schema type.")),
        }
    }
}

// ==== Public Duration methods: arithmetic ====

impl Duration {
    /// Returns a negated `Duration`; a zero-signed duration stays
    /// zero-signed. Magnitudes and the set-field pattern are unchanged.
    #[inline]
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            sign: self.sign.negate(),
            ..self.clone()
        }
    }

    /// Returns the result of adding a `Duration` to the current `Duration`.
    ///
    /// A result field is set when the field is set in at least one operand,
    /// or when a borrow forced a value into it. Mixed-sign sums are aligned
    /// by borrowing within the year/month group and within the
    /// day/hour/minute/second group; a sum that would need a borrow across
    /// the month/day boundary errors, since months and days have no fixed
    /// conversion.
    pub fn add(&self, other: &Self) -> DurationResult<Self> {
        // Operand signs ride along in the per-field sums; the alignment
        // below restores a single consistent sign.
        let seconds_sum = signed_seconds(self.seconds.as_ref(), self.sign)
            + signed_seconds(other.seconds.as_ref(), other.sign);
        let (mut seconds_unscaled, mut scale) = seconds_sum.as_bigint_and_exponent();
        if scale < 0 {
            seconds_unscaled *= pow10(-scale);
            scale = 0;
        }

        let mut buf = [
            signed_int(self.years.as_ref(), self.sign)
                + signed_int(other.years.as_ref(), other.sign),
            signed_int(self.months.as_ref(), self.sign)
                + signed_int(other.months.as_ref(), other.sign),
            signed_int(self.days.as_ref(), self.sign)
                + signed_int(other.days.as_ref(), other.sign),
            signed_int(self.hours.as_ref(), self.sign)
                + signed_int(other.hours.as_ref(), other.sign),
            signed_int(self.minutes.as_ref(), self.sign)
                + signed_int(other.minutes.as_ref(), other.sign),
            seconds_unscaled,
        ];

        // One minute is sixty seconds, expressed in the unscaled unit of
        // the seconds slot.
        let seconds_factor = BigInt::from(60) * pow10(scale);
        align_signs(&mut buf[..2], &[BigInt::from(12)]);
        align_signs(
            &mut buf[2..],
            &[BigInt::from(24), BigInt::from(60), seconds_factor],
        );

        // Each group is internally consistent now; a remaining mismatch
        // would need a month/day borrow.
        let mut sign = 0i8;
        for value in &buf {
            let value_sign = signum(value);
            if i16::from(sign) * i16::from(value_sign) < 0 {
                return Err(DurationError::state().with_message(
                    "sum requires a borrow between month and day fields, which have no fixed conversion.",
                ));
            }
            if sign == 0 {
                sign = value_sign;
            }
        }

        let fields = PartialDuration {
            years: combined_int(&buf[0], self.years.is_some() || other.years.is_some()),
            months: combined_int(&buf[1], self.months.is_some() || other.months.is_some()),
            days: combined_int(&buf[2], self.days.is_some() || other.days.is_some()),
            hours: combined_int(&buf[3], self.hours.is_some() || other.hours.is_some()),
            minutes: combined_int(&buf[4], self.minutes.is_some() || other.minutes.is_some()),
            seconds: combined_seconds(
                &buf[5],
                scale,
                self.seconds.is_some() || other.seconds.is_some(),
            ),
        };
        Ok(Self::new_unchecked(Sign::from(sign), fields))
    }

    /// Returns the result of subtracting a `Duration` from the current
    /// `Duration`.
    #[inline]
    pub fn subtract(&self, other: &Self) -> DurationResult<Self> {
        self.add(&other.negated())
    }

    /// Returns this duration scaled by an arbitrary-precision decimal
    /// factor.
    ///
    /// Integer fields keep their integrality by carrying fractional
    /// remainders into the next smaller unit (1 year = 12 months, 1 day =
    /// 24 hours, 1 hour = 60 minutes, 1 minute = 60 seconds). A nonzero
    /// remainder leaving the months field errors: months-to-days is not a
    /// fixed ratio and this operation takes no anchor. Seconds absorb any
    /// remaining fraction exactly.
    pub fn multiply(&self, factor: &BigDecimal) -> DurationResult<Self> {
        let positive =
            i16::from(self.sign as i8) * i16::from(decimal_signum(factor)) >= 0;
        let magnitude = factor.abs();

        let integer_inputs = [
            self.years.as_ref(),
            self.months.as_ref(),
            self.days.as_ref(),
            self.hours.as_ref(),
            self.minutes.as_ref(),
        ];
        // Ratio of each slot into the next smaller one; months have none.
        let carry_factors: [Option<u32>; 5] = [Some(12), None, Some(24), Some(60), Some(60)];

        let mut carry = BigDecimal::zero();
        let mut whole_parts: [Option<BigUint>; 5] = [None, None, None, None, None];
        for (index, field) in integer_inputs.into_iter().enumerate() {
            let scaled = field.map_or_else(BigDecimal::zero, |value| {
                BigDecimal::from(BigInt::from(value.clone()))
            }) * &magnitude
                + &carry;
            let whole = scaled.with_scale_round(0, RoundingMode::Down);
            let fraction = &scaled - &whole;
            carry = match carry_factors[index] {
                Some(ratio) => &fraction * BigDecimal::from(ratio),
                None => {
                    if !fraction.is_zero() {
                        return Err(DurationError::state().with_message(
                            "a fractional month cannot be carried into days without a calendar anchor.",
                        ));
                    }
                    BigDecimal::zero()
                }
            };
            let (unscaled, _) = whole.as_bigint_and_exponent();
            whole_parts[index] = if field.is_none() && unscaled.is_zero() {
                None
            } else {
                Some(unscaled.magnitude().clone())
            };
        }

        let seconds_scaled = match self.seconds.as_ref() {
            Some(seconds) => seconds * &magnitude + carry,
            None => carry,
        };
        let seconds = if self.seconds.is_none() && seconds_scaled.is_zero() {
            None
        } else {
            Some(seconds_scaled)
        };

        let [years, months, days, hours, minutes] = whole_parts;
        let fields = PartialDuration {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        };
        Ok(Self::new_unchecked(derived_sign(positive, &fields), fields))
    }

    /// Returns this duration scaled by an integer factor.
    #[inline]
    pub fn multiply_int(&self, factor: i32) -> DurationResult<Self> {
        self.multiply(&BigDecimal::from(factor))
    }
}

// ==== Public Duration methods: anchored operations ====

impl Duration {
    /// Applies this duration to an anchor, mutating it in place.
    ///
    /// Fields are applied sign-multiplied in the fixed order years, months,
    /// days, hours, minutes, seconds, milliseconds, at the fixed-width
    /// precision of the convenience getters; the sub-millisecond part of
    /// the seconds fraction is discarded.
    pub fn add_to<A: CalendarAnchor>(&self, anchor: &mut A) -> DurationResult<()> {
        let sign = i64::from(self.sign.as_sign_multiplier());
        anchor.advance(AnchorField::Years, sign * i64::from(self.years()))?;
        anchor.advance(AnchorField::Months, sign * i64::from(self.months()))?;
        anchor.advance(AnchorField::Days, sign * i64::from(self.days()))?;
        anchor.advance(AnchorField::Hours, sign * i64::from(self.hours()))?;
        anchor.advance(AnchorField::Minutes, sign * i64::from(self.minutes()))?;
        anchor.advance(AnchorField::Seconds, sign * i64::from(self.seconds()))?;
        anchor.advance(AnchorField::Milliseconds, sign * self.fractional_millis())?;
        Ok(())
    }

    /// Measures this duration in wall-clock milliseconds relative to the
    /// given instant: the difference between a clone advanced by this
    /// duration and the original. The anchor itself is untouched.
    pub fn time_in_millis<A: CalendarAnchor>(&self, anchor: &A) -> DurationResult<i64> {
        let mut end = anchor.clone();
        self.add_to(&mut end)?;
        let elapsed = i128::from(end.epoch_millis()) - i128::from(anchor.epoch_millis());
        i64::try_from(elapsed).map_err(|_| {
            DurationError::range().with_message("elapsed milliseconds overflow a 64-bit value.")
        })
    }

    /// Converts the years and months fields into an equivalent day count
    /// anchored at the given instant.
    ///
    /// The result has years and months unset, a days field holding the
    /// whole-day count elapsed across years, months, and days (any
    /// partial-day remainder is discarded), and the time fields carried
    /// over unchanged.
    pub fn normalize_with<A: CalendarAnchor>(&self, anchor: &A) -> DurationResult<Self> {
        let sign = i64::from(self.sign.as_sign_multiplier());
        let mut end = anchor.clone();
        end.advance(AnchorField::Years, sign * i64::from(self.years()))?;
        end.advance(AnchorField::Months, sign * i64::from(self.months()))?;
        end.advance(AnchorField::Days, sign * i64::from(self.days()))?;
        let elapsed = i128::from(end.epoch_millis()) - i128::from(anchor.epoch_millis());
        let days = elapsed / i128::from(MS_PER_DAY);
        let fields = PartialDuration {
            days: Some(BigUint::from(days.unsigned_abs())),
            hours: self.hours.clone(),
            minutes: self.minutes.clone(),
            seconds: self.seconds.clone(),
            ..PartialDuration::default()
        };
        Ok(Self::new_unchecked(derived_sign(days >= 0, &fields), fields))
    }
}

// ==== Public Duration methods: ordering ====

impl Duration {
    /// Orders two durations per the XML Schema order relation.
    ///
    /// Both durations are applied to each of the four reference instants;
    /// if all four resulting pairs order the same way, that is the
    /// relation, otherwise the pair is [`OrderRelation::Indeterminate`].
    /// One equal point already falsifies a strict order and one unequal
    /// point falsifies equality, so strict agreement is exactly the
    /// "for all instants" relation.
    ///
    /// Errors with an unsupported-operation error when a field magnitude
    /// exceeds what the reference anchors can represent.
    pub fn compare(&self, other: &Self) -> DurationResult<OrderRelation> {
        self.check_anchor_capacity()?;
        other.check_anchor_capacity()?;
        let mut agreed: Option<Ordering> = None;
        for point in GregorianAnchor::REFERENCE_POINTS {
            let mut lhs = point;
            self.add_to(&mut lhs)?;
            let mut rhs = point;
            other.add_to(&mut rhs)?;
            let ordering = lhs.epoch_millis().cmp(&rhs.epoch_millis());
            match agreed {
                None => agreed = Some(ordering),
                Some(previous) if previous != ordering => {
                    return Ok(OrderRelation::Indeterminate)
                }
                Some(_) => {}
            }
        }
        agreed.map(OrderRelation::from).duration_unwrap()
    }

    /// Returns whether this duration is strictly longer than `other`.
    #[inline]
    pub fn is_longer_than(&self, other: &Self) -> DurationResult<bool> {
        Ok(self.compare(other)? == OrderRelation::Greater)
    }

    /// Returns whether this duration is strictly shorter than `other`.
    #[inline]
    pub fn is_shorter_than(&self, other: &Self) -> DurationResult<bool> {
        Ok(self.compare(other)? == OrderRelation::Less)
    }
}

/// Equality is the order relation's `Equal`: `P1D` equals `PT24H`, while an
/// indeterminate pair and a pair beyond the comparison capability are both
/// unequal. The latter makes `==` non-reflexive for over-capacity values,
/// so `Eq` is deliberately not implemented.
impl PartialEq for Duration {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.compare(other), Ok(OrderRelation::Equal))
    }
}

/// The partial order over durations; `None` where the relation is
/// indeterminate or beyond the comparison capability.
impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok().and_then(OrderRelation::as_ordering)
    }
}

/// Hashes the instant reached from the first reference point. Durations
/// that compare `Equal` meet at the same instant on every reference point,
/// so they hash identically. Values beyond the anchor's capability hash
/// from their raw fields; `compare` errors for those, they are never
/// `==`-equal, and the hash law holds vacuously.
impl Hash for Duration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut anchor = GregorianAnchor::REFERENCE_POINTS[0];
        if self.check_anchor_capacity().is_ok() && self.add_to(&mut anchor).is_ok() {
            anchor.epoch_millis().hash(state);
        } else {
            (self.sign as i8).hash(state);
            self.years.hash(state);
            self.months.hash(state);
            self.days.hash(state);
            self.hours.hash(state);
            self.minutes.hash(state);
            self.seconds
                .as_ref()
                .map(|seconds| seconds.as_bigint_and_exponent())
                .hash(state);
        }
    }
}

impl core::fmt::Display for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.as_formattable().write_to(f)
    }
}

// ==== FromStr trait impl ====

impl FromStr for Duration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_duration(s)
    }
}

// ==== Field combination helpers ====

fn signum(value: &BigInt) -> i8 {
    match value.sign() {
        BigSign::Minus => -1,
        BigSign::NoSign => 0,
        BigSign::Plus => 1,
    }
}

fn decimal_signum(value: &BigDecimal) -> i8 {
    match value.sign() {
        BigSign::Minus => -1,
        BigSign::NoSign => 0,
        BigSign::Plus => 1,
    }
}

fn pow10(exponent: i64) -> BigInt {
    num_traits::pow(BigInt::from(10), exponent as usize)
}

fn truncated(value: Option<&BigUint>) -> i32 {
    value.map_or(0, |value| value.iter_u32_digits().next().unwrap_or(0) as i32)
}

fn signed_int(value: Option<&BigUint>, sign: Sign) -> BigInt {
    let magnitude = BigInt::from(value.cloned().unwrap_or_default());
    if sign == Sign::Negative {
        -magnitude
    } else {
        magnitude
    }
}

fn signed_seconds(value: Option<&BigDecimal>, sign: Sign) -> BigDecimal {
    let magnitude = value.cloned().unwrap_or_else(BigDecimal::zero);
    if sign == Sign::Negative {
        -magnitude
    } else {
        magnitude
    }
}

fn combined_int(value: &BigInt, was_set: bool) -> Option<BigUint> {
    if !was_set && value.is_zero() {
        None
    } else {
        Some(value.magnitude().clone())
    }
}

fn combined_seconds(unscaled: &BigInt, scale: i64, was_set: bool) -> Option<BigDecimal> {
    if !was_set && unscaled.is_zero() {
        None
    } else {
        Some(BigDecimal::new(
            BigInt::from(unscaled.magnitude().clone()),
            scale,
        ))
    }
}

fn derived_sign(positive: bool, fields: &PartialDuration) -> Sign {
    let is_zero = fields.years.as_ref().map_or(true, |v| v.is_zero())
        && fields.months.as_ref().map_or(true, |v| v.is_zero())
        && fields.days.as_ref().map_or(true, |v| v.is_zero())
        && fields.hours.as_ref().map_or(true, |v| v.is_zero())
        && fields.minutes.as_ref().map_or(true, |v| v.is_zero())
        && fields.seconds.as_ref().map_or(true, |v| v.is_zero());
    if is_zero {
        Sign::Zero
    } else if positive {
        Sign::Positive
    } else {
        Sign::Negative
    }
}

fn ceil_div_abs(value: &BigInt, factor: &BigInt) -> BigInt {
    let mut quotient = value.magnitude() / factor.magnitude();
    if !(value.magnitude() % factor.magnitude()).is_zero() {
        quotient += 1u32;
    }
    BigInt::from(quotient)
}

/// Repeatedly borrows from the left neighbor until every slot in the group
/// carries the same sign. `factors[i]` converts one unit of slot `i` into
/// units of slot `i + 1`.
fn align_signs(buf: &mut [BigInt], factors: &[BigInt]) {
    let mut touched = true;
    while touched {
        touched = false;
        let mut sign = 0i8;
        for i in 0..buf.len() {
            if i16::from(sign) * i16::from(signum(&buf[i])) < 0 {
                touched = true;
                // Units borrowed from the left to absorb the mismatch.
                let mut borrow = ceil_div_abs(&buf[i], &factors[i - 1]);
                if signum(&buf[i]) > 0 {
                    borrow = -borrow;
                }
                buf[i - 1] -= &borrow;
                buf[i] += &borrow * &factors[i - 1];
            }
            if !buf[i].is_zero() {
                sign = signum(&buf[i]);
            }
        }
    }
}
