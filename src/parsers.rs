//! Lexical mapping between duration values and the `PnYnMnDTnHnMnS` text
//! space.
//!
//! The grammar is `[-]P(nY)?(nM)?(nD)?(T(nH)?(nM)?(n(.n+)?S)?)?` with at
//! least one field present, per XML Schema Part 2 §3.2.6.1 (with the errata
//! that permits a zero year). Emission preserves set-but-zero fields and
//! the exact decimal expansion of the seconds field, so text round-trips
//! through parsing to an equal value.

use crate::{
    duration::{Duration, PartialDuration},
    DurationError, DurationResult, DurationUnwrap, Sign,
};
use bigdecimal::BigDecimal;
use core::str::FromStr;
use num_bigint::BigUint;
use writeable::{impl_display_with_writeable, Writeable};

// ==== Lexical emission ====

/// A borrowed view of a duration's sign and set fields, writeable as the
/// lexical form.
pub struct FormattableDuration<'a> {
    pub sign: Sign,
    pub years: Option<&'a BigUint>,
    pub months: Option<&'a BigUint>,
    pub days: Option<&'a BigUint>,
    pub hours: Option<&'a BigUint>,
    pub minutes: Option<&'a BigUint>,
    pub seconds: Option<&'a BigDecimal>,
}

impl Writeable for FormattableDuration<'_> {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if self.sign == Sign::Negative {
            sink.write_char('-')?;
        }
        sink.write_char('P')?;
        write_uint_with_suffix(self.years, 'Y', sink)?;
        write_uint_with_suffix(self.months, 'M', sink)?;
        write_uint_with_suffix(self.days, 'D', sink)?;
        if self.hours.is_some() || self.minutes.is_some() || self.seconds.is_some() {
            sink.write_char('T')?;
            write_uint_with_suffix(self.hours, 'H', sink)?;
            write_uint_with_suffix(self.minutes, 'M', sink)?;
            if let Some(seconds) = self.seconds {
                write_decimal(seconds, sink)?;
                sink.write_char('S')?;
            }
        }
        Ok(())
    }
}

impl_display_with_writeable!(FormattableDuration<'_>);

fn write_uint_with_suffix<W: core::fmt::Write + ?Sized>(
    value: Option<&BigUint>,
    suffix: char,
    sink: &mut W,
) -> core::fmt::Result {
    // A set-but-zero field still renders; only absence elides it.
    let Some(value) = value else { return Ok(()) };
    write!(sink, "{value}")?;
    sink.write_char(suffix)
}

/// Writes the exact plain-decimal expansion of a non-negative decimal: no
/// exponent notation, trailing zeros preserved.
fn write_decimal<W: core::fmt::Write + ?Sized>(
    value: &BigDecimal,
    sink: &mut W,
) -> core::fmt::Result {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    let digits = unscaled.magnitude().to_str_radix(10);
    if scale <= 0 {
        sink.write_str(&digits)?;
        for _ in 0..-scale {
            sink.write_char('0')?;
        }
        return Ok(());
    }
    let scale = scale as usize;
    if scale < digits.len() {
        let (integer, fraction) = digits.split_at(digits.len() - scale);
        sink.write_str(integer)?;
        sink.write_char('.')?;
        sink.write_str(fraction)
    } else {
        sink.write_str("0.")?;
        for _ in 0..(scale - digits.len()) {
            sink.write_char('0')?;
        }
        sink.write_str(&digits)
    }
}

// ==== Parsing ====

fn syntax(msg: &'static str) -> DurationError {
    DurationError::syntax().with_message(msg)
}

fn scan_digits<'a>(bytes: &'a [u8], pos: &mut usize) -> &'a [u8] {
    let start = *pos;
    while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
        *pos += 1;
    }
    &bytes[start..*pos]
}

/// Parses duration text into a value.
pub(crate) fn parse_duration(text: &str) -> DurationResult<Duration> {
    let bytes = text.as_bytes();
    let mut pos = 0usize;

    let negative = bytes.first() == Some(&b'-');
    if negative {
        pos += 1;
    }
    if bytes.get(pos) != Some(&b'P') {
        return Err(syntax("duration text must begin with 'P'."));
    }
    pos += 1;

    let mut fields = PartialDuration::default();

    // Date portion: years, months, days, strictly in that order.
    let mut rank = 0u8;
    while pos < bytes.len() && bytes[pos] != b'T' {
        let digits = scan_digits(bytes, &mut pos);
        if digits.is_empty() {
            return Err(syntax("expected a digit in the date portion."));
        }
        let value = BigUint::parse_bytes(digits, 10).duration_unwrap()?;
        let designator = bytes.get(pos).copied();
        pos += 1;
        match designator {
            Some(b'Y') if rank < 1 => {
                rank = 1;
                fields.years = Some(value);
            }
            Some(b'M') if rank < 2 => {
                rank = 2;
                fields.months = Some(value);
            }
            Some(b'D') if rank < 3 => {
                rank = 3;
                fields.days = Some(value);
            }
            _ => return Err(syntax("misplaced or unknown designator in the date portion.")),
        }
    }

    // Time portion, introduced by 'T': hours, minutes, seconds.
    if pos < bytes.len() {
        pos += 1;
        let mut rank = 0u8;
        let mut any_time = false;
        while pos < bytes.len() {
            let start = pos;
            if scan_digits(bytes, &mut pos).is_empty() {
                return Err(syntax("expected a digit in the time portion."));
            }
            let mut fraction = false;
            if bytes.get(pos) == Some(&b'.') {
                pos += 1;
                fraction = true;
                if scan_digits(bytes, &mut pos).is_empty() {
                    return Err(syntax("a decimal point must be followed by digits."));
                }
            }
            let designator = bytes.get(pos).copied();
            let number_end = pos;
            pos += 1;
            match designator {
                Some(b'H') if rank < 1 && !fraction => {
                    rank = 1;
                    fields.hours =
                        Some(BigUint::parse_bytes(&bytes[start..number_end], 10).duration_unwrap()?);
                }
                Some(b'M') if rank < 2 && !fraction => {
                    rank = 2;
                    fields.minutes =
                        Some(BigUint::parse_bytes(&bytes[start..number_end], 10).duration_unwrap()?);
                }
                Some(b'S') if rank < 3 => {
                    rank = 3;
                    let literal = text.get(start..number_end).duration_unwrap()?;
                    fields.seconds = Some(
                        BigDecimal::from_str(literal)
                            .map_err(|_| syntax("seconds value is not a valid decimal."))?,
                    );
                }
                _ if fraction => {
                    return Err(syntax("only the seconds field may carry a fraction."))
                }
                _ => return Err(syntax("misplaced or unknown designator in the time portion.")),
            }
            any_time = true;
        }
        if !any_time {
            return Err(syntax("'T' must introduce at least one time field."));
        }
    }

    if fields.is_empty() {
        return Err(syntax("at least one field is required."));
    }

    Duration::from_partial(!negative, fields)
}
