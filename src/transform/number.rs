//! How NUMBER columns surface on the host side.

use serde::Serialize;

use crate::error::OciTransformError;
use crate::native::{NativeEnvironment, OciNumber};
use crate::types::HostValue;

/// Host shape for a fetched NUMBER.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum NumberKind {
    Int32,
    Int64,
    LongInteger,
    #[default]
    Float,
    /// `BINARY_DOUBLE`; already native, never narrowed to an integer.
    NativeFloat,
    NumberAsString,
    Boolean,
}

impl NumberKind {
    /// Pick the kind for a column from its describe metadata.
    ///
    /// Columns with a declared precision and scale 0 (or -127) are narrowed
    /// to an integer kind when the caller asked for a float or nothing at all.
    /// Unconstrained `NUMBER`s and computed expressions report precision 0 and
    /// stay floats.
    #[must_use]
    pub fn for_column(requested: Option<NumberKind>, precision: i16, scale: i8) -> NumberKind {
        let narrowable = matches!(requested, None | Some(NumberKind::Float));
        if narrowable && precision > 0 && (scale == 0 || scale == -127) {
            return match precision {
                1..=9 => NumberKind::Int32,
                10..=18 => NumberKind::Int64,
                _ => NumberKind::LongInteger,
            };
        }
        requested.unwrap_or_default()
    }

    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            NumberKind::Int32 | NumberKind::Int64 | NumberKind::Boolean
        )
    }

    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(self, NumberKind::Float | NumberKind::NativeFloat)
    }
}

/// Convert an `OCINumber` to the host shape chosen by `kind`.
///
/// `LongInteger` goes through text so values beyond 64 bits keep every digit;
/// it becomes `Int` when the text fits, `Text` otherwise.
///
/// # Errors
///
/// Returns `OciTransformError::Conversion` if the native conversion fails.
pub fn number_to_host<E>(
    env: &E,
    value: &OciNumber,
    kind: NumberKind,
) -> Result<HostValue, OciTransformError>
where
    E: NativeEnvironment + ?Sized,
{
    match kind {
        NumberKind::Int32 | NumberKind::Int64 | NumberKind::Boolean => {
            let int = env
                .number_to_int(value)
                .map_err(|err| OciTransformError::conversion("number_to_host(): integer", err))?;
            if kind == NumberKind::Boolean {
                Ok(HostValue::Bool(int > 0))
            } else {
                Ok(HostValue::Int(int))
            }
        }
        NumberKind::NumberAsString | NumberKind::LongInteger => {
            let text = env
                .number_to_text(value)
                .map_err(|err| OciTransformError::conversion("number_to_host(): text", err))?;
            if kind == NumberKind::LongInteger {
                if let Ok(int) = text.parse::<i64>() {
                    return Ok(HostValue::Int(int));
                }
            }
            Ok(HostValue::Text(text))
        }
        NumberKind::Float | NumberKind::NativeFloat => super::number_to_host_float(env, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceEnvironment;

    #[test]
    fn integral_columns_are_narrowed_by_precision() {
        assert_eq!(NumberKind::for_column(None, 5, 0), NumberKind::Int32);
        assert_eq!(NumberKind::for_column(None, 9, 0), NumberKind::Int32);
        assert_eq!(NumberKind::for_column(None, 10, 0), NumberKind::Int64);
        assert_eq!(NumberKind::for_column(None, 18, 0), NumberKind::Int64);
        assert_eq!(NumberKind::for_column(None, 19, 0), NumberKind::LongInteger);
        assert_eq!(NumberKind::for_column(None, 38, -127), NumberKind::LongInteger);
        assert_eq!(NumberKind::for_column(None, 5, -127), NumberKind::Int32);
        assert_eq!(
            NumberKind::for_column(Some(NumberKind::Float), 4, 0),
            NumberKind::Int32
        );
    }

    #[test]
    fn fractional_or_explicit_kinds_are_kept() {
        assert_eq!(NumberKind::for_column(None, 10, 2), NumberKind::Float);
        assert_eq!(NumberKind::for_column(None, 0, -127), NumberKind::Float);
        assert_eq!(NumberKind::for_column(None, 0, 0), NumberKind::Float);
        assert_eq!(
            NumberKind::for_column(Some(NumberKind::LongInteger), 5, 0),
            NumberKind::LongInteger
        );
        assert_eq!(
            NumberKind::for_column(Some(NumberKind::NumberAsString), 5, 0),
            NumberKind::NumberAsString
        );
        assert_eq!(
            NumberKind::for_column(Some(NumberKind::Boolean), 1, 0),
            NumberKind::Boolean
        );
    }

    #[test]
    fn shapes() {
        let env = ReferenceEnvironment::default();
        let n = env.number_from_text("42").unwrap();
        assert_eq!(number_to_host(&env, &n, NumberKind::Int32).unwrap(), HostValue::Int(42));
        assert_eq!(number_to_host(&env, &n, NumberKind::Boolean).unwrap(), HostValue::Bool(true));
        assert_eq!(
            number_to_host(&env, &n, NumberKind::NumberAsString).unwrap(),
            HostValue::Text("42".into())
        );
        assert_eq!(number_to_host(&env, &n, NumberKind::Float).unwrap(), HostValue::Float(42.0));

        let zero = env.number_from_int(0).unwrap();
        assert_eq!(
            number_to_host(&env, &zero, NumberKind::Boolean).unwrap(),
            HostValue::Bool(false)
        );
    }

    #[test]
    fn unconstrained_columns_keep_fractions() {
        let env = ReferenceEnvironment::default();
        let n = env.number_from_text("1.5").unwrap();
        let kind = NumberKind::for_column(None, 0, -127);
        assert_eq!(number_to_host(&env, &n, kind).unwrap(), HostValue::Float(1.5));
    }

    #[test]
    fn long_integers_beyond_i64_stay_text() {
        let env = ReferenceEnvironment::default();
        let big = env.number_from_text("123456789012345678901234567890").unwrap();
        assert_eq!(
            number_to_host(&env, &big, NumberKind::LongInteger).unwrap(),
            HostValue::Text("123456789012345678901234567890".into())
        );
        let small = env.number_from_int(-77).unwrap();
        assert_eq!(
            number_to_host(&env, &small, NumberKind::LongInteger).unwrap(),
            HostValue::Int(-77)
        );
    }
}
