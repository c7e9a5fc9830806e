//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::conversion::{to_host, to_host_row};
pub use crate::error::OciTransformError;
pub use crate::native::{
    DatePortion, DaySecond, NativeEnvironment, NativeError, NativeResult, OciDate, OciDateTime,
    OciInterval, OciNumber, Status, TimePortion,
};
pub use crate::reference::ReferenceEnvironment;
pub use crate::transform::{
    NumberKind, date_from_host, date_to_host, interval_from_host, interval_to_host,
    number_from_bool, number_from_float, number_from_int, number_from_text, number_to_host,
    number_to_host_float, timestamp_from_host, timestamp_to_host,
};
pub use crate::types::{DateTag, HostDuration, HostValue, NativeValue};
pub use crate::version::{
    Capabilities, ClientVersion, ResolverOptions, ResolverOptionsBuilder, VersionMarker,
};
