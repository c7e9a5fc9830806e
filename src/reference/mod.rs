//! A pure-Rust [`NativeEnvironment`].
//!
//! Decodes and encodes Oracle's external NUMBER, TIMESTAMP and INTERVAL DAY TO
//! SECOND formats in process, reporting the same ORA codes the client library
//! would for malformed values. Useful wherever no client library is linked:
//! tests, benchmarks and tooling.

mod datetime;
mod number;

use crate::native::{
    DatePortion, DaySecond, NativeEnvironment, NativeResult, OciDateTime, OciInterval, OciNumber,
    TimePortion,
};
use crate::version::{VersionMarker, linked_version};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceEnvironment {
    marker: Option<VersionMarker>,
}

impl ReferenceEnvironment {
    /// An environment reporting the compile-time linked version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            marker: Some(VersionMarker::Explicit(linked_version())),
        }
    }

    /// An environment reporting `marker` (or nothing) when probed.
    #[must_use]
    pub fn with_marker(marker: Option<VersionMarker>) -> Self {
        Self { marker }
    }
}

impl Default for ReferenceEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeEnvironment for ReferenceEnvironment {
    fn client_version(&self) -> Option<VersionMarker> {
        self.marker
    }

    fn interval_get_day_second(&self, value: &OciInterval) -> NativeResult<DaySecond> {
        datetime::interval_decode(value)
    }

    fn interval_set_day_second(&self, parts: DaySecond) -> NativeResult<OciInterval> {
        datetime::interval_encode(parts)
    }

    fn datetime_get_date(&self, value: &OciDateTime) -> NativeResult<DatePortion> {
        datetime::timestamp_date(value)
    }

    fn datetime_get_time(&self, value: &OciDateTime) -> NativeResult<TimePortion> {
        datetime::timestamp_time(value)
    }

    fn datetime_construct(
        &self,
        date: DatePortion,
        time: TimePortion,
    ) -> NativeResult<OciDateTime> {
        datetime::timestamp_encode(date, time)
    }

    fn number_to_real(&self, value: &OciNumber) -> NativeResult<f64> {
        number::decode_real(value)
    }

    fn number_from_real(&self, value: f64) -> NativeResult<OciNumber> {
        number::encode_real(value)
    }

    fn number_to_int(&self, value: &OciNumber) -> NativeResult<i64> {
        number::decode_int(value)
    }

    fn number_from_int(&self, value: i64) -> NativeResult<OciNumber> {
        number::encode_text(&value.to_string())
    }

    fn number_to_text(&self, value: &OciNumber) -> NativeResult<String> {
        number::decode_text(value)
    }

    fn number_from_text(&self, text: &str) -> NativeResult<OciNumber> {
        number::encode_text(text)
    }
}
