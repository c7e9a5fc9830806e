//! Native to host value conversions.
//!
//! Each function takes one native value (and the environment, where a native
//! call is needed) and returns one newly built host value. Nothing is cached and
//! inputs are never modified. The first failing native call aborts the
//! conversion.

pub mod number;
pub mod pipeline;
pub mod reverse;

use chrono::NaiveDate;

use crate::error::OciTransformError;
use crate::native::{
    DatePortion, NativeEnvironment, NativeResult, OciDate, OciDateTime, OciInterval, OciNumber,
    TimePortion,
};
use crate::types::{DateTag, HostDuration, HostValue};
use pipeline::Step;

pub use number::{NumberKind, number_to_host};
pub use reverse::{
    date_from_host, interval_from_host, number_from_bool, number_from_float, number_from_int,
    number_from_text, timestamp_from_host,
};

/// Convert an `OCIDate` to a host date or datetime, as chosen by `tag`.
///
/// The native accessors cannot fail; the only error is a field combination the
/// host calendar rejects (e.g. February 30th).
///
/// # Errors
///
/// Returns `OciTransformError::OutOfRange` if the fields do not form a valid
/// date or time.
pub fn date_to_host(value: &OciDate, tag: DateTag) -> Result<HostValue, OciTransformError> {
    const AT: &str = "date_to_host()";
    let (year, month, day) = value.date();
    let (hour, minute, second) = value.time();

    let date = calendar_date(AT, year, month, day)?;
    if tag == DateTag::DateOnly {
        return Ok(HostValue::Date(date));
    }
    let dt = date
        .and_hms_opt(u32::from(hour), u32::from(minute), u32::from(second))
        .ok_or_else(|| OciTransformError::OutOfRange {
            at: AT,
            detail: format!("{hour:02}:{minute:02}:{second:02}"),
        })?;
    Ok(HostValue::DateTime(dt))
}

/// Convert an `OCIInterval` (day to second) to a host duration.
///
/// # Errors
///
/// Returns `OciTransformError::Conversion` if the native decomposition fails,
/// or `OutOfRange` if the combined seconds overflow.
pub fn interval_to_host<E>(env: &E, value: &OciInterval) -> Result<HostValue, OciTransformError>
where
    E: NativeEnvironment + ?Sized,
{
    const AT: &str = "interval_to_host()";
    let parts = env
        .interval_get_day_second(value)
        .map_err(|err| OciTransformError::conversion(AT, err))?;

    let seconds = parts
        .hours
        .checked_mul(3600)
        .and_then(|h| parts.minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(parts.seconds))
        .ok_or_else(|| OciTransformError::OutOfRange {
            at: AT,
            detail: format!("{parts:?}"),
        })?;

    tracing::trace!(?parts, "interval decomposed");
    Ok(HostValue::Duration(HostDuration::new(
        parts.days,
        seconds,
        parts.fractional / 1000,
    )))
}

/// Fields gathered by the timestamp pipeline.
#[derive(Debug, Default)]
struct TimestampParts {
    date: DatePortion,
    time: TimePortion,
}

fn read_date_portion<E>(env: &E, value: &OciDateTime, parts: &mut TimestampParts) -> NativeResult<()>
where
    E: NativeEnvironment + ?Sized,
{
    parts.date = env.datetime_get_date(value)?;
    Ok(())
}

fn read_time_portion<E>(env: &E, value: &OciDateTime, parts: &mut TimestampParts) -> NativeResult<()>
where
    E: NativeEnvironment + ?Sized,
{
    parts.time = env.datetime_get_time(value)?;
    Ok(())
}

/// Convert an `OCIDateTime` to a host datetime with microsecond precision.
///
/// The date and time portions are read by two native calls, in that order;
/// a failure is labelled "date portion" or "time portion".
///
/// # Errors
///
/// Returns `OciTransformError::Conversion` for the first failing portion, or
/// `OutOfRange` if the fields do not form a valid datetime.
pub fn timestamp_to_host<E>(env: &E, value: &OciDateTime) -> Result<HostValue, OciTransformError>
where
    E: NativeEnvironment + ?Sized,
{
    const AT: &str = "timestamp_to_host()";
    let steps: [Step<E, OciDateTime, TimestampParts>; 2] = [
        Step::new("date portion", read_date_portion::<E>),
        Step::new("time portion", read_time_portion::<E>),
    ];
    let mut parts = TimestampParts::default();
    pipeline::run(AT, env, value, &mut parts, &steps)?;

    let TimestampParts { date, time } = parts;
    let dt = calendar_date(AT, date.year, date.month, date.day)?
        .and_hms_micro_opt(
            u32::from(time.hour),
            u32::from(time.minute),
            u32::from(time.second),
            time.fractional / 1000,
        )
        .ok_or_else(|| OciTransformError::OutOfRange {
            at: AT,
            detail: format!("{time:?}"),
        })?;
    Ok(HostValue::DateTime(dt))
}

/// Convert an `OCINumber` to a host float.
///
/// # Errors
///
/// Returns `OciTransformError::Conversion` if the native conversion fails.
pub fn number_to_host_float<E>(env: &E, value: &OciNumber) -> Result<HostValue, OciTransformError>
where
    E: NativeEnvironment + ?Sized,
{
    env.number_to_real(value)
        .map(HostValue::Float)
        .map_err(|err| OciTransformError::conversion("number_to_host_float()", err))
}

fn calendar_date(
    at: &'static str,
    year: i16,
    month: u8,
    day: u8,
) -> Result<NaiveDate, OciTransformError> {
    NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day)).ok_or_else(|| {
        OciTransformError::OutOfRange {
            at,
            detail: format!("{year:04}-{month:02}-{day:02}"),
        }
    })
}
