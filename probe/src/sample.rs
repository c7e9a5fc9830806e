use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use oci_transforms::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Outcome of pushing random values through one conversion pair.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub(crate) struct SampleReport {
    pub(crate) kind: &'static str,
    pub(crate) checked: u64,
    pub(crate) mismatches: u64,
    pub(crate) errors: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) first_problem: Option<String>,
}

impl SampleReport {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    fn record(&mut self, input: impl std::fmt::Debug, outcome: Result<bool, OciTransformError>) {
        self.checked += 1;
        let problem = match outcome {
            Ok(true) => return,
            Ok(false) => {
                self.mismatches += 1;
                format!("{input:?} did not survive the round trip")
            }
            Err(err) => {
                self.errors += 1;
                format!("{input:?}: {err}")
            }
        };
        tracing::warn!(kind = self.kind, "{problem}");
        self.first_problem.get_or_insert(problem);
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.mismatches == 0 && self.errors == 0
    }
}

pub(crate) fn run_all<E>(env: &E, rng: &mut ChaCha8Rng, samples: u64) -> Vec<SampleReport>
where
    E: NativeEnvironment + ?Sized,
{
    vec![
        timestamps(env, rng, samples),
        intervals(env, rng, samples),
        floats(env, rng, samples),
        integers(env, rng, samples),
    ]
}

fn random_datetime(rng: &mut ChaCha8Rng) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(
        rng.random_range(1..=9999),
        rng.random_range(1..=12),
        rng.random_range(1..=28),
    )?
    .and_hms_micro_opt(
        rng.random_range(0..24),
        rng.random_range(0..60),
        rng.random_range(0..60),
        rng.random_range(0..1_000_000),
    )
}

fn timestamps<E>(env: &E, rng: &mut ChaCha8Rng, samples: u64) -> SampleReport
where
    E: NativeEnvironment + ?Sized,
{
    let mut report = SampleReport::new("timestamp");
    for _ in 0..samples {
        let Some(value) = random_datetime(rng) else {
            continue;
        };
        let outcome = timestamp_from_host(env, &value)
            .and_then(|native| timestamp_to_host(env, &native))
            .map(|host| host.as_datetime() == Some(value));
        report.record(value, outcome);
    }
    report
}

fn intervals<E>(env: &E, rng: &mut ChaCha8Rng, samples: u64) -> SampleReport
where
    E: NativeEnvironment + ?Sized,
{
    const MAX_MICROS: i64 = 999_999 * 86_400 * 1_000_000;
    let mut report = SampleReport::new("interval");
    for _ in 0..samples {
        let value = TimeDelta::microseconds(rng.random_range(-MAX_MICROS..=MAX_MICROS));
        let outcome = interval_from_host(env, value)
            .and_then(|native| interval_to_host(env, &native))
            .map(|host| host.as_duration().map(HostDuration::to_time_delta) == Some(value));
        report.record(value, outcome);
    }
    report
}

fn floats<E>(env: &E, rng: &mut ChaCha8Rng, samples: u64) -> SampleReport
where
    E: NativeEnvironment + ?Sized,
{
    let mut report = SampleReport::new("float");
    for _ in 0..samples {
        let mantissa: f64 = rng.random_range(-1.0..1.0);
        let value = mantissa * 10f64.powi(rng.random_range(-60..60));
        let outcome = number_from_float(env, value)
            .and_then(|native| number_to_host_float(env, &native))
            .map(|host| host.as_float() == Some(value));
        report.record(value, outcome);
    }
    report
}

fn integers<E>(env: &E, rng: &mut ChaCha8Rng, samples: u64) -> SampleReport
where
    E: NativeEnvironment + ?Sized,
{
    let mut report = SampleReport::new("integer");
    for _ in 0..samples {
        let value: i64 = rng.random();
        let outcome = number_from_int(env, value)
            .and_then(|native| number_to_host(env, &native, NumberKind::Int64))
            .map(|host| host.as_int() == Some(value));
        report.record(value, outcome);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn reference_environment_round_trips_cleanly() {
        let env = ReferenceEnvironment::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for report in run_all(&env, &mut rng, 200) {
            assert!(report.is_clean(), "{report:?}");
            assert!(report.checked > 0);
        }
    }

    #[test]
    fn problems_are_counted_once_each() {
        let mut report = SampleReport::new("float");
        report.record(1.0, Ok(true));
        report.record(2.0, Ok(false));
        report.record(
            3.0,
            Err(OciTransformError::ParameterError("boom".to_string())),
        );
        assert_eq!((report.checked, report.mismatches, report.errors), (3, 1, 1));
        assert_eq!(
            report.first_problem.as_deref(),
            Some("2.0 did not survive the round trip")
        );
    }
}
