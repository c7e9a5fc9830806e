//! The seam to the native client library.
//!
//! Every fallible accessor is a method on [`NativeEnvironment`], the Rust face
//! of the environment/error-handle pair. An FFI binding implements the trait by
//! calling OCI and running the returned `sword` through [`check_status`];
//! [`crate::reference::ReferenceEnvironment`] implements it in pure Rust.

mod handles;
mod status;

pub use handles::{
    OCI_DATETIME_SIZE, OCI_NUMBER_SIZE, OciDate, OciDateTime, OciInterval, OciNumber,
};
pub use status::{NativeError, NativeResult, Status, check_status};

use crate::version::VersionMarker;

/// Output of `OCIIntervalGetDaySecond`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySecond {
    pub days: i32,
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
    /// Nanoseconds.
    pub fractional: i32,
}

/// Date portion of an `OCIDateTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatePortion {
    pub year: i16,
    pub month: u8,
    pub day: u8,
}

/// Time portion of an `OCIDateTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimePortion {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Nanoseconds.
    pub fractional: u32,
}

/// Environment and error context of the native client library.
///
/// Borrowed read-only by every conversion; its lifecycle belongs to whoever
/// opened it.
pub trait NativeEnvironment {
    /// Version evidence visible for the linked library, if any.
    fn client_version(&self) -> Option<VersionMarker>;

    /// `OCIIntervalGetDaySecond`
    fn interval_get_day_second(&self, value: &OciInterval) -> NativeResult<DaySecond>;

    /// `OCIIntervalSetDaySecond`
    fn interval_set_day_second(&self, parts: DaySecond) -> NativeResult<OciInterval>;

    /// `OCIDateTimeGetDate`
    fn datetime_get_date(&self, value: &OciDateTime) -> NativeResult<DatePortion>;

    /// `OCIDateTimeGetTime`
    fn datetime_get_time(&self, value: &OciDateTime) -> NativeResult<TimePortion>;

    /// `OCIDateTimeConstruct`
    fn datetime_construct(&self, date: DatePortion, time: TimePortion)
    -> NativeResult<OciDateTime>;

    /// `OCINumberToReal`
    fn number_to_real(&self, value: &OciNumber) -> NativeResult<f64>;

    /// `OCINumberFromReal`
    fn number_from_real(&self, value: f64) -> NativeResult<OciNumber>;

    /// `OCINumberToInt`, signed 64-bit.
    fn number_to_int(&self, value: &OciNumber) -> NativeResult<i64>;

    /// `OCINumberFromInt`, signed 64-bit.
    fn number_from_int(&self, value: i64) -> NativeResult<OciNumber>;

    /// `OCINumberToText` with the `TM9` format.
    fn number_to_text(&self, value: &OciNumber) -> NativeResult<String>;

    /// `OCINumberFromText` with `NLS_NUMERIC_CHARACTERS='.,'`.
    fn number_from_text(&self, text: &str) -> NativeResult<OciNumber>;
}
