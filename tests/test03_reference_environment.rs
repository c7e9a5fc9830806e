use chrono::{NaiveDate, TimeDelta};
use oci_transforms::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn ora_code(err: &OciTransformError) -> Option<i32> {
    match err {
        OciTransformError::Conversion { code, .. } => Some(*code),
        _ => None,
    }
}

#[test]
fn decimal_floats_survive_a_round_trip() {
    let env = ReferenceEnvironment::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..500 {
        let value: f64 = rng.random_range(-1.0e9..1.0e9);
        let native = number_from_float(&env, value).unwrap();
        assert_eq!(
            number_to_host_float(&env, &native).unwrap().as_float(),
            Some(value)
        );
    }
}

#[test]
fn numbers_match_oracle_bytes() {
    let env = ReferenceEnvironment::default();
    let cases: [(&str, &[u8]); 5] = [
        ("0", &[0x80]),
        ("1", &[0xC1, 0x02]),
        ("-1", &[0x3E, 0x64, 0x66]),
        ("123.45", &[0xC2, 0x02, 0x18, 0x2E]),
        ("-123.45", &[0x3D, 0x64, 0x4E, 0x38, 0x66]),
    ];
    for (text, bytes) in cases {
        let native = number_from_text(&env, text).unwrap();
        assert_eq!(native.bytes(), bytes, "{text}");
        assert_eq!(env.number_to_text(&native).unwrap(), text);
    }
}

#[test]
fn number_overflow_and_garbage_carry_ora_codes() {
    let env = ReferenceEnvironment::default();
    let huge = format!("1{}", "0".repeat(130));
    assert_eq!(ora_code(&number_from_text(&env, &huge).unwrap_err()), Some(1426));
    assert_eq!(ora_code(&number_from_text(&env, "abc").unwrap_err()), Some(1722));

    let one = number_from_text(&env, "1").unwrap();
    assert_eq!(number_to_host(&env, &one, NumberKind::Int32).unwrap(), HostValue::Int(1));
    let too_big = number_from_text(&env, &"9".repeat(25)).unwrap();
    assert_eq!(
        ora_code(&number_to_host(&env, &too_big, NumberKind::Int64).unwrap_err()),
        Some(1455)
    );
}

#[test]
fn timestamps_round_trip_at_microsecond_precision() {
    let env = ReferenceEnvironment::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..500 {
        let dt = NaiveDate::from_ymd_opt(
            rng.random_range(-4712..=9999),
            rng.random_range(1..=12),
            rng.random_range(1..=28),
        )
        .unwrap()
        .and_hms_micro_opt(
            rng.random_range(0..24),
            rng.random_range(0..60),
            rng.random_range(0..60),
            rng.random_range(0..1_000_000),
        )
        .unwrap();
        let native = timestamp_from_host(&env, &dt).unwrap();
        assert_eq!(timestamp_to_host(&env, &native).unwrap().as_datetime(), Some(dt));
    }
}

#[test]
fn intervals_round_trip_with_a_single_sign() {
    let env = ReferenceEnvironment::default();
    for delta in [
        TimeDelta::zero(),
        TimeDelta::microseconds(-1),
        TimeDelta::days(3) + TimeDelta::hours(4) + TimeDelta::microseconds(250),
        -(TimeDelta::days(400) + TimeDelta::seconds(59) + TimeDelta::milliseconds(1)),
    ] {
        let native = interval_from_host(&env, delta).unwrap();
        let host = interval_to_host(&env, &native).unwrap().as_duration().unwrap();
        assert_eq!(host.to_time_delta(), delta);
        let signs = [host.days, host.seconds, host.microseconds].map(i32::signum);
        assert!(!(signs.contains(&1) && signs.contains(&-1)), "{host:?}");
    }
}

#[test]
fn leap_seconds_and_huge_intervals_are_parameter_errors() {
    let env = ReferenceEnvironment::default();
    let leap = NaiveDate::from_ymd_opt(2016, 12, 31)
        .unwrap()
        .and_hms_milli_opt(23, 59, 59, 1_500)
        .unwrap();
    assert!(matches!(
        timestamp_from_host(&env, &leap),
        Err(OciTransformError::ParameterError(_))
    ));
    assert!(matches!(
        interval_from_host(&env, TimeDelta::days(i64::from(i32::MAX) + 1)),
        Err(OciTransformError::ParameterError(_))
    ));
    let err = interval_from_host(&env, TimeDelta::days(1_000_000_000)).unwrap_err();
    assert_eq!(ora_code(&err), Some(1867));
}

#[test]
fn dates_pass_through_unchanged() {
    let dt = NaiveDate::from_ymd_opt(1969, 7, 20)
        .unwrap()
        .and_hms_opt(20, 17, 40)
        .unwrap();
    let native = date_from_host(&dt).unwrap();
    assert_eq!(native.date(), (1969, 7, 20));
    assert_eq!(native.time(), (20, 17, 40));
    assert_eq!(
        date_to_host(&native, DateTag::DateTime).unwrap().as_datetime(),
        Some(dt)
    );
}
