//! Value conversion entry points.
//!
//! This module dispatches native values of any supported kind to the matching
//! transform, so callers holding a mixed row do not need to branch on kind.

use crate::error::OciTransformError;
use crate::native::NativeEnvironment;
use crate::transform::{date_to_host, interval_to_host, number_to_host_float, timestamp_to_host};
use crate::types::{DateTag, HostValue, NativeValue};

/// Convert one native value to its host counterpart.
///
/// `tag` only matters for [`NativeValue::Date`].
///
/// # Errors
///
/// Returns whatever the underlying transform returns; see
/// [`crate::transform`].
///
/// # Example
///
/// ```rust
/// use oci_transforms::prelude::*;
///
/// let env = ReferenceEnvironment::default();
/// let value = NativeValue::Date(OciDate::new(2024, 3, 15, 0, 0, 0));
/// let host = to_host(&env, &value, DateTag::DateOnly).unwrap();
/// assert_eq!(host.as_date().unwrap().to_string(), "2024-03-15");
/// ```
pub fn to_host<E>(env: &E, value: &NativeValue, tag: DateTag) -> Result<HostValue, OciTransformError>
where
    E: NativeEnvironment + ?Sized,
{
    match value {
        NativeValue::Date(v) => date_to_host(v, tag),
        NativeValue::Interval(v) => interval_to_host(env, v),
        NativeValue::Timestamp(v) => timestamp_to_host(env, v),
        NativeValue::Number(v) => number_to_host_float(env, v),
    }
}

/// Convert a row of possibly-NULL native values, stopping at the first failure.
///
/// # Errors
///
/// Returns the first conversion error encountered; no partial row is returned.
pub fn to_host_row<E>(
    env: &E,
    values: &[Option<NativeValue>],
    tag: DateTag,
) -> Result<Vec<HostValue>, OciTransformError>
where
    E: NativeEnvironment + ?Sized,
{
    let mut row = Vec::with_capacity(values.len());
    for value in values {
        row.push(match value {
            Some(v) => to_host(env, v, tag)?,
            None => HostValue::Null,
        });
    }
    Ok(row)
}
