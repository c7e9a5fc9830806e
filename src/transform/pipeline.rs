//! Labelled multi-call conversions.
//!
//! Some conversions need several native calls that must all succeed, in order.
//! Each call is a [`Step`] with its own label; [`run`] evaluates them until the
//! first failure and reports that step's label.

use crate::error::OciTransformError;
use crate::native::NativeResult;

/// One native call in a pipeline. `op` reads from `input` through `env` and
/// records its result in `state`.
pub struct Step<E: ?Sized, I, S> {
    pub label: &'static str,
    pub op: fn(&E, &I, &mut S) -> NativeResult<()>,
}

impl<E: ?Sized, I, S> Clone for Step<E, I, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ?Sized, I, S> Copy for Step<E, I, S> {}

impl<E: ?Sized, I, S> Step<E, I, S> {
    pub const fn new(label: &'static str, op: fn(&E, &I, &mut S) -> NativeResult<()>) -> Self {
        Self { label, op }
    }
}

/// Run `steps` in order, stopping at the first failure.
///
/// The error's call site is `"{site}: {label}"`.
///
/// # Errors
///
/// Returns `OciTransformError::Conversion` for the first step that fails;
/// later steps are not called.
pub fn run<E, I, S>(
    site: &str,
    env: &E,
    input: &I,
    state: &mut S,
    steps: &[Step<E, I, S>],
) -> Result<(), OciTransformError>
where
    E: ?Sized,
{
    for step in steps {
        (step.op)(env, input, state)
            .map_err(|err| OciTransformError::conversion(format!("{site}: {}", step.label), err))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{NativeError, Status};

    struct Counter;

    fn push_one(_: &Counter, _: &(), out: &mut Vec<u8>) -> NativeResult<()> {
        out.push(1);
        Ok(())
    }

    fn fail(_: &Counter, _: &(), _: &mut Vec<u8>) -> NativeResult<()> {
        Err(NativeError::new(Status::InvalidHandle, 0, "bad handle"))
    }

    #[test]
    fn runs_all_steps_in_order() {
        let mut out = Vec::new();
        let steps = [Step::new("a", push_one), Step::new("b", push_one)];
        run("site()", &Counter, &(), &mut out, &steps).unwrap();
        assert_eq!(out, vec![1, 1]);
    }

    #[test]
    fn stops_at_first_failure_with_its_label() {
        let mut out = Vec::new();
        let steps = [
            Step::new("first", push_one),
            Step::new("second", fail),
            Step::new("third", push_one),
        ];
        let err = run("site()", &Counter, &(), &mut out, &steps).unwrap_err();
        assert_eq!(err.call_site(), Some("site(): second"));
        assert_eq!(out, vec![1]);
    }
}
