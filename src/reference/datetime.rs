//! External TIMESTAMP and INTERVAL DAY TO SECOND formats.
//!
//! TIMESTAMP: `century+100, year+100, month, day, hour+1, minute+1, second+1`
//! followed by big-endian fractional nanoseconds.
//! INTERVAL DAY TO SECOND: big-endian `days + 2^31`, `hour+60, minute+60,
//! second+60`, big-endian `nanoseconds + 2^31`.

use chrono::NaiveDate;

use crate::native::{
    DatePortion, DaySecond, NativeError, NativeResult, OCI_DATETIME_SIZE, OciDateTime, OciInterval,
    TimePortion,
};

const INTERVAL_BIAS: u32 = 0x8000_0000;
const TIME_FIELD_BIAS: i32 = 60;
const MAX_INTERVAL_DAYS: u32 = 999_999_999;
const NANOS_PER_SECOND: u32 = 1_000_000_000;

fn be_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    u32::from_be_bytes(buf)
}

// Wrapping reinterpretation is the format: the bias maps i32::MIN..=i32::MAX
// onto 0..=u32::MAX.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn unbias(raw: u32) -> i32 {
    raw.wrapping_sub(INTERVAL_BIAS) as i32
}

#[allow(clippy::cast_sign_loss)]
fn bias(value: i32) -> u32 {
    (value as u32).wrapping_add(INTERVAL_BIAS)
}

fn invalid_interval() -> NativeError {
    NativeError::ora(1867, "the interval is invalid")
}

pub(crate) fn interval_decode(value: &OciInterval) -> NativeResult<DaySecond> {
    let raw = value.as_raw();
    let parts = DaySecond {
        days: unbias(be_u32(&raw[0..4])),
        hours: i32::from(raw[4]) - TIME_FIELD_BIAS,
        minutes: i32::from(raw[5]) - TIME_FIELD_BIAS,
        seconds: i32::from(raw[6]) - TIME_FIELD_BIAS,
        fractional: unbias(be_u32(&raw[7..11])),
    };
    validate_interval(&parts)?;
    Ok(parts)
}

pub(crate) fn interval_encode(parts: DaySecond) -> NativeResult<OciInterval> {
    validate_interval(&parts)?;
    let mut raw = [0u8; OCI_DATETIME_SIZE];
    raw[0..4].copy_from_slice(&bias(parts.days).to_be_bytes());
    for (slot, field) in raw[4..7]
        .iter_mut()
        .zip([parts.hours, parts.minutes, parts.seconds])
    {
        *slot = u8::try_from(field + TIME_FIELD_BIAS).map_err(|_| invalid_interval())?;
    }
    raw[7..11].copy_from_slice(&bias(parts.fractional).to_be_bytes());
    Ok(OciInterval::from_raw(raw))
}

fn validate_interval(parts: &DaySecond) -> NativeResult<()> {
    let in_range = parts.days.unsigned_abs() <= MAX_INTERVAL_DAYS
        && parts.hours.unsigned_abs() < 24
        && parts.minutes.unsigned_abs() < 60
        && parts.seconds.unsigned_abs() < 60
        && parts.fractional.unsigned_abs() < NANOS_PER_SECOND;
    if !in_range {
        return Err(invalid_interval());
    }
    let signs = [
        parts.days,
        parts.hours,
        parts.minutes,
        parts.seconds,
        parts.fractional,
    ]
    .map(i32::signum);
    if signs.contains(&1) && signs.contains(&-1) {
        return Err(invalid_interval());
    }
    Ok(())
}

pub(crate) fn timestamp_date(value: &OciDateTime) -> NativeResult<DatePortion> {
    let raw = value.as_raw();
    let century = i32::from(raw[0]) - 100;
    let year_in_century = i32::from(raw[1]) - 100;
    let year = i16::try_from(century * 100 + year_in_century)
        .map_err(|_| NativeError::ora(1841, "(full) year must be between -4713 and +9999"))?;
    let (month, day) = (raw[2], raw[3]);
    if !(1..=12).contains(&month) {
        return Err(NativeError::ora(1843, "not a valid month"));
    }
    let valid_day = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
        .is_some();
    if !valid_day {
        return Err(NativeError::ora(
            1847,
            "day of month must be between 1 and last day of month",
        ));
    }
    Ok(DatePortion { year, month, day })
}

pub(crate) fn timestamp_time(value: &OciDateTime) -> NativeResult<TimePortion> {
    let raw = value.as_raw();
    let [hour, minute, second] = [raw[4], raw[5], raw[6]].map(|b| b.wrapping_sub(1));
    if hour > 23 {
        return Err(NativeError::ora(1850, "hour must be between 0 and 23"));
    }
    if minute > 59 {
        return Err(NativeError::ora(1851, "minutes must be between 0 and 59"));
    }
    if second > 59 {
        return Err(NativeError::ora(1852, "seconds must be between 0 and 59"));
    }
    let fractional = be_u32(&raw[7..11]);
    if fractional >= NANOS_PER_SECOND {
        return Err(NativeError::ora(
            1880,
            "the fractional seconds must be between 0 and 999999999",
        ));
    }
    Ok(TimePortion {
        hour,
        minute,
        second,
        fractional,
    })
}

pub(crate) fn timestamp_encode(date: DatePortion, time: TimePortion) -> NativeResult<OciDateTime> {
    let year = i32::from(date.year);
    let out_of_range = || NativeError::ora(1841, "(full) year must be between -4713 and +9999");
    // BC years store both parts below 100, e.g. -4712 as 53, 88.
    let century = u8::try_from(year / 100 + 100).map_err(|_| out_of_range())?;
    let year_in_century = u8::try_from(year % 100 + 100).map_err(|_| out_of_range())?;
    let mut raw = [0u8; OCI_DATETIME_SIZE];
    raw[0] = century;
    raw[1] = year_in_century;
    raw[2] = date.month;
    raw[3] = date.day;
    raw[4] = time.hour.wrapping_add(1);
    raw[5] = time.minute.wrapping_add(1);
    raw[6] = time.second.wrapping_add(1);
    raw[7..11].copy_from_slice(&time.fractional.to_be_bytes());

    let value = OciDateTime::from_raw(raw);
    // Reject what the accessors would reject, so a constructed value always reads back.
    timestamp_date(&value)?;
    timestamp_time(&value)?;
    Ok(value)
}
