use core::str::FromStr;

use alloc::string::ToString;
use bigdecimal::BigDecimal;
use num_bigint::BigUint;

use crate::{anchor::GregorianAnchor, error::ErrorKind, fields::DateTimeField, Sign, MS_PER_DAY};

use super::{Duration, OrderRelation, PartialDuration, SchemaType};

fn dur(text: &str) -> Duration {
    Duration::from_str(text).unwrap()
}

fn reflected(relation: OrderRelation) -> OrderRelation {
    match relation {
        OrderRelation::Less => OrderRelation::Greater,
        OrderRelation::Greater => OrderRelation::Less,
        other => other,
    }
}

// ==== Creation ====

#[test]
fn partial_duration_empty() {
    let err = Duration::from_partial(true, PartialDuration::default());
    assert_eq!(err.unwrap_err().kind(), ErrorKind::Type);
}

#[test]
fn partial_duration_values() {
    let result = Duration::from_partial(
        true,
        PartialDuration {
            years: Some(BigUint::from(20u32)),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(result.years(), 20);
    assert_eq!(result.to_string(), "P20Y");
}

#[test]
fn from_parts_sets_every_field() {
    let duration = Duration::from_parts(true, 1, 2, 3, 4, 5, BigDecimal::from_str("6.5").unwrap())
        .unwrap();
    assert_eq!(duration.to_string(), "P1Y2M3DT4H5M6.5S");
    assert_eq!(duration.xml_schema_type().unwrap(), SchemaType::Duration);

    let err = Duration::from_parts(true, 0, 0, 0, 0, 0, BigDecimal::from_str("-1").unwrap());
    assert_eq!(err.unwrap_err().kind(), ErrorKind::Range);
}

#[test]
fn subtype_factories() {
    let duration = Duration::year_month(false, 1, 2);
    assert_eq!(duration.to_string(), "-P1Y2M");
    assert_eq!(
        duration.xml_schema_type().unwrap(),
        SchemaType::YearMonthDuration
    );

    let duration = Duration::day_time(true, 1, 2, 3, 4);
    assert_eq!(duration.to_string(), "P1DT2H3M4S");
    assert_eq!(
        duration.xml_schema_type().unwrap(),
        SchemaType::DayTimeDuration
    );

    // All-zero magnitudes collapse to the zero sign regardless of the flag.
    assert_eq!(Duration::year_month(false, 0, 0).sign(), Sign::Zero);
}

#[test]
fn from_millis_decomposition() {
    let duration = Duration::from_millis(90_061_001);
    assert_eq!(duration.to_string(), "P1DT1H1M1.001S");
    assert_eq!(
        duration.xml_schema_type().unwrap(),
        SchemaType::DayTimeDuration
    );
    assert_eq!(
        duration.time_in_millis(&GregorianAnchor::epoch()).unwrap(),
        90_061_001
    );

    let duration = Duration::from_millis(-1_500);
    assert_eq!(duration.sign(), Sign::Negative);
    assert_eq!(duration.to_string(), "-P0DT0H0M1.500S");

    let duration = Duration::from_millis(0);
    assert_eq!(duration.sign(), Sign::Zero);
    assert_eq!(duration.to_string(), "P0DT0H0M0.000S");
}

// ==== Getters ====

#[test]
fn unset_fields_are_distinct_from_zero() {
    let duration = dur("P1Y");
    assert!(duration.is_set(DateTimeField::Years));
    assert!(!duration.is_set(DateTimeField::Months));
    assert_eq!(duration.months(), 0);

    let zero_months = dur("P1Y0M");
    assert!(zero_months.is_set(DateTimeField::Months));
    assert_eq!(zero_months.months(), 0);
}

#[test]
fn convenience_getters_truncate() {
    // 2^32 + 1 keeps only its low-order 32 bits.
    let duration = dur("P4294967297Y");
    assert_eq!(duration.years(), 1);

    assert_eq!(dur("PT10.9S").seconds(), 10);
    assert_eq!(dur("P1M").seconds(), 0);
}

#[test]
fn schema_type_classification() {
    assert_eq!(
        dur("P1Y2M3DT4H5M6S").xml_schema_type().unwrap(),
        SchemaType::Duration
    );
    assert_eq!(
        dur("P1DT2H3M4S").xml_schema_type().unwrap(),
        SchemaType::DayTimeDuration
    );
    assert_eq!(
        dur("P1Y2M").xml_schema_type().unwrap(),
        SchemaType::YearMonthDuration
    );

    // Patterns outside the three named types are valid durations with no
    // classification.
    for text in ["P1Y2M3D", "PT1H", "P1D", "P1M3D"] {
        let err = dur(text).xml_schema_type().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State, "classified {text:?}");
    }
}

// ==== Negation ====

#[test]
fn negation_involution() {
    for text in ["P1Y", "-P1M30D", "PT0.5S", "P0D"] {
        let duration = dur(text);
        let double_negated = duration.negated().negated();
        assert_eq!(double_negated.to_string(), duration.to_string());
        assert_eq!(double_negated, duration);
    }
}

#[test]
fn negation_preserves_zero_sign() {
    let zero = dur("P0D");
    assert_eq!(zero.sign(), Sign::Zero);
    assert_eq!(zero.negated().sign(), Sign::Zero);
    assert_eq!(dur("-P1D").negated().sign(), Sign::Positive);
}

// ==== Addition and subtraction ====

#[test]
fn add_is_field_wise_for_same_signs() {
    let lhs = dur("P1Y2M");
    let rhs = dur("P3M5D");
    let sum = lhs.add(&rhs).unwrap();
    assert_eq!(sum.to_string(), "P1Y5M5D");
    // Commutative when the signs agree.
    assert_eq!(rhs.add(&lhs).unwrap().to_string(), "P1Y5M5D");
}

#[test]
fn add_unions_set_fields() {
    let sum = dur("P1Y").add(&dur("PT1H")).unwrap();
    assert_eq!(sum.to_string(), "P1YT1H");
    assert!(!sum.is_set(DateTimeField::Months));

    let sum = dur("PT1.25S").add(&dur("PT1M")).unwrap();
    assert_eq!(sum.to_string(), "PT1M1.25S");
}

#[test]
fn additive_inverse_is_zero_with_fields_kept() {
    let duration = dur("P1Y2M3DT4H5M6.7S");
    let sum = duration.add(&duration.negated()).unwrap();
    assert_eq!(sum.sign(), Sign::Zero);
    for field in DateTimeField::ALL {
        assert!(sum.is_set(field), "{field} became unset");
    }
    assert_eq!(sum.to_string(), "P0Y0M0DT0H0M0.0S");
}

#[test]
fn subtraction_borrows_within_day_time_group() {
    let difference = dur("P1DT1H").subtract(&dur("PT2H")).unwrap();
    assert_eq!(difference.to_string(), "P0DT23H");
    assert_eq!(difference, dur("PT23H"));
}

#[test]
fn subtraction_borrows_within_year_month_group() {
    let difference = dur("P1Y").subtract(&dur("P2M")).unwrap();
    assert_eq!(difference.to_string(), "P0Y10M");
    assert_eq!(difference, dur("P10M"));
}

#[test]
fn subtraction_flips_sign_cleanly() {
    let difference = dur("PT1H").subtract(&dur("PT2H")).unwrap();
    assert_eq!(difference.sign(), Sign::Negative);
    assert_eq!(difference.to_string(), "-PT1H");
}

#[test]
fn month_day_borrow_is_refused() {
    let err = dur("P1M").subtract(&dur("P1D")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);

    let err = dur("P1D").add(&dur("-P1M")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);
}

#[test]
fn add_cascades_borrows_through_months() {
    // One year less thirteen months crosses the year twice over.
    let difference = dur("P1Y").subtract(&dur("P13M")).unwrap();
    assert_eq!(difference.sign(), Sign::Negative);
    assert_eq!(difference.to_string(), "-P0Y1M");
}

// ==== Scalar multiplication ====

#[test]
fn multiply_carries_fractions_downward() {
    let half_day = dur("P1D").multiply(&BigDecimal::from_str("0.5").unwrap()).unwrap();
    assert_eq!(half_day.to_string(), "P0DT12H");
    assert_eq!(half_day, dur("PT12H"));

    let half_hour = dur("PT1H").multiply(&BigDecimal::from_str("0.5").unwrap()).unwrap();
    assert_eq!(half_hour.to_string(), "PT0H30M");

    let half_year = dur("P1Y").multiply(&BigDecimal::from_str("0.5").unwrap()).unwrap();
    assert_eq!(half_year.to_string(), "P0Y6M");
}

#[test]
fn multiply_fractional_month_is_refused() {
    let err = dur("P1M").multiply(&BigDecimal::from_str("1.5").unwrap()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);
}

#[test]
fn multiply_seconds_stay_exact() {
    let tripled = dur("PT1.1S").multiply_int(3).unwrap();
    assert_eq!(tripled.to_string(), "PT3.3S");
}

#[test]
fn multiply_int_scales_fields() {
    let doubled = dur("P1Y2M").multiply_int(2).unwrap();
    assert_eq!(doubled.to_string(), "P2Y4M");

    let negated = dur("P1Y2M").multiply_int(-1).unwrap();
    assert_eq!(negated.to_string(), "-P1Y2M");

    let zeroed = dur("P1Y2M").multiply_int(0).unwrap();
    assert_eq!(zeroed.sign(), Sign::Zero);
}

// ==== Anchored operations ====

#[test]
fn time_in_millis_truncates_below_milliseconds() {
    let anchor = GregorianAnchor::epoch();
    assert_eq!(dur("PT10.00099S").time_in_millis(&anchor).unwrap(), 10_000);
    assert_eq!(dur("-PT10.00099S").time_in_millis(&anchor).unwrap(), -10_000);
}

#[test]
fn time_in_millis_depends_on_the_anchor() {
    let year = dur("P1Y");
    // Across February 1904, a leap year.
    let leap = GregorianAnchor::new(1903, 3, 1).unwrap();
    assert_eq!(year.time_in_millis(&leap).unwrap(), 366 * MS_PER_DAY);
    // Across February 2003.
    let common = GregorianAnchor::new(2002, 3, 1).unwrap();
    assert_eq!(year.time_in_millis(&common).unwrap(), 365 * MS_PER_DAY);
}

#[test]
fn add_to_applies_fields_in_order() {
    let mut anchor = GregorianAnchor::new(2003, 1, 31).unwrap();
    // The month advance constrains to February 28 before days apply.
    dur("P1M1D").add_to(&mut anchor).unwrap();
    assert_eq!(
        (anchor.year(), anchor.month(), anchor.day()),
        (2003, 3, 1)
    );
}

#[test]
fn normalize_with_resolves_year_and_month_lengths() {
    let anchor = GregorianAnchor::new(2004, 2, 1).unwrap();
    let normalized = dur("P1M2DT3H").normalize_with(&anchor).unwrap();
    assert_eq!(normalized.to_string(), "P31DT3H");
    assert!(!normalized.is_set(DateTimeField::Years));
    assert!(!normalized.is_set(DateTimeField::Months));

    let anchor = GregorianAnchor::new(2003, 1, 1).unwrap();
    assert_eq!(dur("P1Y").normalize_with(&anchor).unwrap().to_string(), "P365D");
}

#[test]
fn normalize_with_keeps_direction() {
    let anchor = GregorianAnchor::new(2004, 3, 31).unwrap();
    let normalized = dur("-P1M").normalize_with(&anchor).unwrap();
    // March 31 backs up to the constrained February 29.
    assert_eq!(normalized.to_string(), "-P31D");
}

// ==== Ordering ====

#[test]
fn month_and_thirty_days_are_indeterminate() {
    let month = dur("P1M");
    let thirty_days = dur("P30D");
    assert_eq!(
        month.compare(&thirty_days).unwrap(),
        OrderRelation::Indeterminate
    );
    assert!(!month.is_longer_than(&thirty_days).unwrap());
    assert!(!month.is_shorter_than(&thirty_days).unwrap());
    assert!(month != thirty_days);
    assert!(thirty_days != month);
}

#[test]
fn day_and_twenty_four_hours_are_equal() {
    assert_eq!(
        dur("P1D").compare(&dur("PT24H")).unwrap(),
        OrderRelation::Equal
    );
    assert_eq!(dur("P1D"), dur("PT24H"));
    assert_eq!(dur("P1Y"), dur("P12M"));
    assert_eq!(dur("P1Y2M"), dur("P14M"));
}

#[test]
fn determinate_orderings() {
    assert_eq!(dur("P1Y").compare(&dur("P13M")).unwrap(), OrderRelation::Less);
    assert_eq!(
        dur("PT2H").compare(&dur("PT1H")).unwrap(),
        OrderRelation::Greater
    );
    assert!(dur("PT2H").is_longer_than(&dur("PT1H")).unwrap());
    assert!(dur("PT1H").is_shorter_than(&dur("PT2H")).unwrap());
}

#[test]
fn year_and_365_days_are_indeterminate() {
    // Equal across 1697's February, longer across 1904's.
    assert_eq!(
        dur("P1Y").compare(&dur("P365D")).unwrap(),
        OrderRelation::Indeterminate
    );
}

#[test]
fn comparison_is_a_reflection() {
    let pairs = [
        ("P1M", "P30D"),
        ("P1D", "PT24H"),
        ("P1Y", "P13M"),
        ("PT2H", "PT1H"),
        ("P1Y", "P365D"),
    ];
    for (lhs, rhs) in pairs {
        let forward = dur(lhs).compare(&dur(rhs)).unwrap();
        let backward = dur(rhs).compare(&dur(lhs)).unwrap();
        assert_eq!(backward, reflected(forward), "{lhs} vs {rhs}");
    }
}

#[test]
fn comparison_is_millisecond_precise() {
    // The anchors carry milliseconds; finer fractions collapse.
    assert_eq!(
        dur("PT0.0009S").compare(&dur("PT0.0001S")).unwrap(),
        OrderRelation::Equal
    );
    assert_eq!(
        dur("PT0.009S").compare(&dur("PT0.001S")).unwrap(),
        OrderRelation::Greater
    );
}

#[test]
fn comparison_capability_is_bounded() {
    let big = Duration::from_partial(
        true,
        PartialDuration {
            years: Some(BigUint::from(i32::MAX as u64 + 1)),
            ..Default::default()
        },
    )
    .unwrap();
    let err = big.compare(&dur("P1D")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    // An over-capacity value is unequal to everything, itself included.
    assert!(big != big.clone());
}

#[test]
fn partial_ord_matches_the_relation() {
    assert!(dur("PT1H") < dur("PT2H"));
    assert!(dur("P1Y") <= dur("P12M"));
    let month = dur("P1M");
    let thirty_days = dur("P30D");
    assert!(!(month < thirty_days));
    assert!(!(month > thirty_days));
    assert_eq!(month.partial_cmp(&thirty_days), None);
}

#[test]
fn equal_durations_hash_identically() {
    use core::hash::{Hash, Hasher};
    use std::hash::DefaultHasher;

    fn hashed(duration: &Duration) -> u64 {
        let mut hasher = DefaultHasher::new();
        duration.hash(&mut hasher);
        hasher.finish()
    }

    assert_eq!(hashed(&dur("P1D")), hashed(&dur("PT24H")));
    assert_eq!(hashed(&dur("P1Y")), hashed(&dur("P12M")));
    assert_ne!(hashed(&dur("P1D")), hashed(&dur("PT25H")));
}

// ==== Round trips ====

#[test]
fn lexical_round_trip_preserves_value() {
    for text in [
        "P1Y",
        "-P1Y2M3DT4H5M6.789S",
        "PT0.5S",
        "P0D",
        "P1YT1H",
        "P20000YT2H",
    ] {
        let duration = dur(text);
        let reparsed = dur(&duration.to_string());
        assert_eq!(
            reparsed.compare(&duration).unwrap(),
            OrderRelation::Equal,
            "{text} did not round trip"
        );
    }
}
