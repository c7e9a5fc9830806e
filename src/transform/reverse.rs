//! Host to native conversions, used when binding host values.

use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};

use crate::error::OciTransformError;
use crate::native::{
    DatePortion, DaySecond, NativeEnvironment, OciDate, OciDateTime, OciInterval, OciNumber,
    TimePortion,
};

const SECONDS_PER_DAY: i64 = 86_400;

fn native_year(at: &str, year: i32) -> Result<i16, OciTransformError> {
    i16::try_from(year).map_err(|_| {
        OciTransformError::ParameterError(format!("{at}: year {year} does not fit OCI dates"))
    })
}

// chrono reports values below 256 for these fields, the casts cannot truncate.
#[allow(clippy::cast_possible_truncation)]
fn small(v: u32) -> u8 {
    v as u8
}

/// Build an `OCIDate` from a host datetime. Sub-second precision is dropped.
///
/// # Errors
///
/// Returns `OciTransformError::ParameterError` if the year does not fit.
pub fn date_from_host(value: &NaiveDateTime) -> Result<OciDate, OciTransformError> {
    Ok(OciDate::new(
        native_year("date_from_host()", value.year())?,
        small(value.month()),
        small(value.day()),
        small(value.hour()),
        small(value.minute()),
        small(value.second()),
    ))
}

/// Build an `OCIDateTime` from a host datetime, keeping nanoseconds.
///
/// # Errors
///
/// Returns `ParameterError` for years outside `i16` or leap-second values, and
/// `Conversion` if the native constructor fails.
pub fn timestamp_from_host<E>(
    env: &E,
    value: &NaiveDateTime,
) -> Result<OciDateTime, OciTransformError>
where
    E: NativeEnvironment + ?Sized,
{
    const AT: &str = "timestamp_from_host()";
    let fractional = value.nanosecond();
    if fractional >= 1_000_000_000 {
        return Err(OciTransformError::ParameterError(format!(
            "{AT}: leap seconds cannot be stored"
        )));
    }
    let date = DatePortion {
        year: native_year(AT, value.year())?,
        month: small(value.month()),
        day: small(value.day()),
    };
    let time = TimePortion {
        hour: small(value.hour()),
        minute: small(value.minute()),
        second: small(value.second()),
        fractional,
    };
    env.datetime_construct(date, time)
        .map_err(|err| OciTransformError::conversion(AT, err))
}

/// Build an `OCIInterval` from a host duration. Every component carries the
/// sign of the whole duration.
///
/// # Errors
///
/// Returns `ParameterError` if the day count does not fit, and `Conversion` if
/// the native setter rejects the value.
pub fn interval_from_host<E>(env: &E, value: TimeDelta) -> Result<OciInterval, OciTransformError>
where
    E: NativeEnvironment + ?Sized,
{
    const AT: &str = "interval_from_host()";
    let total = value.num_seconds();
    let days = i32::try_from(total / SECONDS_PER_DAY).map_err(|_| {
        OciTransformError::ParameterError(format!("{AT}: {value} has too many days"))
    })?;
    // Each remainder is below 86400 in magnitude, so the narrowing is exact.
    #[allow(clippy::cast_possible_truncation)]
    let within_day = (total % SECONDS_PER_DAY) as i32;
    let parts = DaySecond {
        days,
        hours: within_day / 3600,
        minutes: within_day % 3600 / 60,
        seconds: within_day % 60,
        fractional: value.subsec_nanos(),
    };
    env.interval_set_day_second(parts)
        .map_err(|err| OciTransformError::conversion(AT, err))
}

/// # Errors
///
/// Returns `ParameterError` for NaN or infinities, and `Conversion` if the
/// native conversion fails (e.g. overflow).
pub fn number_from_float<E>(env: &E, value: f64) -> Result<OciNumber, OciTransformError>
where
    E: NativeEnvironment + ?Sized,
{
    if !value.is_finite() {
        return Err(OciTransformError::ParameterError(format!(
            "number_from_float(): {value} cannot be stored in a NUMBER"
        )));
    }
    env.number_from_real(value)
        .map_err(|err| OciTransformError::conversion("number_from_float()", err))
}

/// # Errors
///
/// Returns `Conversion` if the native conversion fails.
pub fn number_from_int<E>(env: &E, value: i64) -> Result<OciNumber, OciTransformError>
where
    E: NativeEnvironment + ?Sized,
{
    env.number_from_int(value)
        .map_err(|err| OciTransformError::conversion("number_from_int()", err))
}

/// `true` is stored as 1, `false` as 0.
///
/// # Errors
///
/// Returns `Conversion` if the native conversion fails.
pub fn number_from_bool<E>(env: &E, value: bool) -> Result<OciNumber, OciTransformError>
where
    E: NativeEnvironment + ?Sized,
{
    number_from_int(env, i64::from(value))
}

/// Parse decimal text such as `"-12.5"` into a NUMBER.
///
/// # Errors
///
/// Returns `Conversion` if the native parser rejects the text.
pub fn number_from_text<E>(env: &E, text: &str) -> Result<OciNumber, OciTransformError>
where
    E: NativeEnvironment + ?Sized,
{
    env.number_from_text(text.trim())
        .map_err(|err| OciTransformError::conversion("number_from_text()", err))
}
