//! Round-trip self-test over every configured convention.
//!
//! A mismatch is not recoverable: [`Harness::run`] stops at the first one and
//! returns [`Error::Mismatch`], or [`Error::ScalarMismatch`] for the sum.
//! [`Harness::run_or_abort`] turns it into a panic naming what failed.

use crate::buffer::CallerBuffer;
use crate::calls;
use handoff_core::constants::{
    SCALAR_ARG_U16, SCALAR_ARG_U32, SCALAR_ARG_U8, SCALAR_EXPECTED_SUM,
};
use handoff_core::{Case, Convention, Error, HarnessConfig, OwnedVariant, Result};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, info_span};

/// Outcome of one convention across all cases and iterations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConventionReport {
    pub convention: Convention,
    /// Boundary calls made, counting each convention-A variant separately
    pub round_trips: usize,
    /// Callee allocations handed back through a release entry point
    pub releases: usize,
    pub elapsed_ms: u64,
}

/// Outcome of a full self-test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub scalar_sum: usize,
    pub iterations: usize,
    pub cases: usize,
    pub conventions: Vec<ConventionReport>,
}

impl Report {
    pub fn total_round_trips(&self) -> usize {
        self.conventions.iter().map(|c| c.round_trips).sum()
    }

    pub fn total_releases(&self) -> usize {
        self.conventions.iter().map(|c| c.releases).sum()
    }
}

pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run the scalar check and every convention; stop at the first failure.
    pub fn run(&self) -> Result<Report> {
        self.config.validate()?;
        let scalar_sum = check_scalar_sum()?;
        info!(scalar_sum, "scalar passthrough ok");

        let mut conventions = Vec::with_capacity(self.config.conventions.len());
        for &convention in &self.config.conventions {
            conventions.push(self.run_convention(convention)?);
        }

        Ok(Report {
            scalar_sum,
            iterations: self.config.iterations,
            cases: self.config.cases.len(),
            conventions,
        })
    }

    /// Like [`Harness::run`], but a failure aborts the self-test with a panic.
    pub fn run_or_abort(&self) -> Report {
        match self.run() {
            Ok(report) => report,
            Err(e) => panic!("handoff self-test failed: {e}"),
        }
    }

    fn run_convention(&self, convention: Convention) -> Result<ConventionReport> {
        let span = info_span!("convention", %convention);
        let _enter = span.enter();
        let started = Instant::now();

        let mut round_trips = 0;
        let mut releases = 0;
        for _ in 0..self.config.iterations {
            for case in &self.config.cases {
                let calls = round_trip(convention, case)?;
                round_trips += calls;
                if convention.callee_allocates() {
                    releases += calls;
                }
            }
        }

        let report = ConventionReport {
            convention,
            round_trips,
            releases,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        info!(
            round_trips = report.round_trips,
            releases = report.releases,
            elapsed_ms = report.elapsed_ms,
            "convention ok"
        );
        Ok(report)
    }
}

/// Call the scalar entry point with the fixture and check the sum.
pub fn check_scalar_sum() -> Result<usize> {
    expect_sum(calls::scalar_sum(SCALAR_ARG_U8, SCALAR_ARG_U16, SCALAR_ARG_U32))
}

fn expect_sum(sum: usize) -> Result<usize> {
    if sum != SCALAR_EXPECTED_SUM {
        return Err(Error::scalar_mismatch(SCALAR_EXPECTED_SUM, sum));
    }
    Ok(sum)
}

/// One round trip of `case` under `convention`; returns the number of
/// boundary calls made.
///
/// The input buffer is allocated and freed by the caller inside this
/// function; every callee allocation is released before it returns.
pub fn round_trip(convention: Convention, case: &Case) -> Result<usize> {
    let input = CallerBuffer::new(&case.input)?;

    match convention {
        Convention::Owned => {
            for variant in OwnedVariant::ALL {
                let out = calls::owned(variant, &input)?;
                expect_bytes(convention, case, out.as_c_str()?.to_bytes())?;
            }
            Ok(OwnedVariant::ALL.len())
        }
        Convention::RawParts => {
            let out = calls::raw_parts(&input)?;
            expect_bytes(convention, case, out.as_bytes()?)?;
            expect_bytes(convention, case, out.as_c_str()?.to_bytes())?;
            Ok(1)
        }
        Convention::NoCopy => {
            let prefix = calls::prefix_no_copy(&input)?;
            if !prefix.starts_at_input() {
                return Err(Error::ffi(
                    "handoff_prefix_no_copy",
                    "returned pointer does not alias the caller's input",
                ));
            }
            // Read the answer from the original buffer, not through the result
            expect_bytes(convention, case, &input.as_bytes()[..prefix.len()])?;
            // Unbounded read through the alias still sees the untouched input
            if input.as_c_str().to_bytes() != case.input.as_bytes() {
                return Err(Error::mismatch(
                    convention,
                    &case.input,
                    &case.input,
                    String::from_utf8_lossy(input.as_c_str().to_bytes()),
                ));
            }
            Ok(1)
        }
    }
}

fn expect_bytes(convention: Convention, case: &Case, actual: &[u8]) -> Result<()> {
    if actual == case.expected.as_bytes() {
        debug!(input = %case.input, "round trip ok");
        return Ok(());
    }
    Err(Error::mismatch(
        convention,
        &case.input,
        &case.expected,
        String::from_utf8_lossy(actual),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_pass_every_convention() {
        let report = Harness::new(HarnessConfig::default().with_iterations(3)).run().unwrap();
        assert_eq!(report.scalar_sum, SCALAR_EXPECTED_SUM);
        assert_eq!(report.conventions.len(), 3);
        // 2 cases x 3 iterations; convention A makes three calls per case
        assert_eq!(report.conventions[0].round_trips, 18);
        assert_eq!(report.conventions[1].round_trips, 6);
        assert_eq!(report.conventions[2].round_trips, 6);
        assert_eq!(report.conventions[2].releases, 0);
        assert_eq!(report.total_releases(), 24);
    }

    #[test]
    fn wrong_expectation_is_a_mismatch() {
        let case = Case::new("Datafuse Lab", "Datafuse");
        for convention in Convention::ALL {
            let err = round_trip(convention, &case).unwrap_err();
            match err {
                Error::Mismatch {
                    convention: c,
                    input,
                    actual,
                    ..
                } => {
                    assert_eq!(c, convention);
                    assert_eq!(input, "Datafuse Lab");
                    assert_eq!(actual, "Datafuse Lab");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn wrong_scalar_sum_is_a_mismatch() {
        assert_eq!(expect_sum(SCALAR_EXPECTED_SUM).unwrap(), SCALAR_EXPECTED_SUM);
        let err = expect_sum(SCALAR_EXPECTED_SUM - 1).unwrap_err();
        assert!(err.is_mismatch(), "{err}");
        match err {
            Error::ScalarMismatch { expected, actual } => {
                assert_eq!(expected, SCALAR_EXPECTED_SUM);
                assert_eq!(actual, SCALAR_EXPECTED_SUM - 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    #[should_panic(expected = "convention C round trip")]
    fn run_or_abort_panics_with_convention_and_input() {
        let config = HarnessConfig {
            iterations: 1,
            conventions: vec![Convention::NoCopy],
            cases: vec![Case::new("Datafuse Lab", "nope")],
        };
        Harness::new(config).run_or_abort();
    }

    #[test]
    fn invalid_config_is_rejected_before_any_call() {
        let config = HarnessConfig::default().with_iterations(0);
        assert!(matches!(
            Harness::new(config).run(),
            Err(Error::Configuration { .. })
        ));
    }
}
