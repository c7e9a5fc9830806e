use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::native::{OciDate, OciDateTime, OciInterval, OciNumber};

/// Values produced for the host side of the binding.
///
/// ```rust
/// use oci_transforms::prelude::*;
///
/// let values = vec![
///     HostValue::Float(1.5),
///     HostValue::Int(7),
///     HostValue::Null,
/// ];
/// # let _ = values;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HostValue {
    /// Calendar date without a time component
    Date(NaiveDate),
    /// Date and time, microsecond precision
    DateTime(NaiveDateTime),
    /// Day/second/sub-second duration
    Duration(HostDuration),
    /// Floating point value (64-bit)
    Float(f64),
    /// Integer value (64-bit)
    Int(i64),
    /// Boolean value
    Bool(bool),
    /// Text value, e.g. a NUMBER fetched as string
    Text(String),
    /// NULL value
    Null,
}

impl HostValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            HostValue::Date(d) => Some(*d),
            HostValue::DateTime(dt) => Some(dt.date()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        if let HostValue::DateTime(dt) = self {
            Some(*dt)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_duration(&self) -> Option<HostDuration> {
        if let HostValue::Duration(d) = self {
            Some(*d)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            HostValue::Float(f) => Some(*f),
            #[allow(clippy::cast_precision_loss)]
            HostValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let HostValue::Int(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HostValue::Bool(b) => Some(*b),
            HostValue::Int(1) => Some(true),
            HostValue::Int(0) => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let HostValue::Text(s) = self {
            Some(s)
        } else {
            None
        }
    }
}

/// A duration split the way interval values are: whole days, seconds within
/// the day, and the sub-second remainder (fractional nanoseconds divided by
/// 1000).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct HostDuration {
    pub days: i32,
    pub seconds: i32,
    pub microseconds: i32,
}

impl HostDuration {
    #[must_use]
    pub fn new(days: i32, seconds: i32, microseconds: i32) -> Self {
        Self {
            days,
            seconds,
            microseconds,
        }
    }

    #[must_use]
    pub fn to_time_delta(self) -> TimeDelta {
        TimeDelta::days(i64::from(self.days))
            + TimeDelta::seconds(i64::from(self.seconds))
            + TimeDelta::microseconds(i64::from(self.microseconds))
    }
}

impl From<HostDuration> for TimeDelta {
    fn from(value: HostDuration) -> Self {
        value.to_time_delta()
    }
}

/// Which shape a native date should take on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DateTag {
    /// Calendar fields only
    DateOnly,
    /// Calendar and clock fields
    #[default]
    DateTime,
}

/// A native value of one of the supported kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeValue {
    Date(OciDate),
    Interval(OciInterval),
    Timestamp(OciDateTime),
    Number(OciNumber),
}
