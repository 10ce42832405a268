//! Layered configuration for the round-trip self-test.
//!
//! Values are resolved from built-in defaults, then environment variables,
//! then an optional JSON cases file. Command-line flags are applied last by
//! the binary through the `with_*` setters.

use crate::constants::{
    DEFAULT_ITERATIONS, FIXTURE_ASCII_EXPECTED, FIXTURE_ASCII_INPUT, FIXTURE_MULTIBYTE_EXPECTED,
    FIXTURE_MULTIBYTE_INPUT, HANDOFF_CONVENTIONS_VAR, HANDOFF_ITERATIONS_VAR,
};
use crate::convention::Convention;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One input string and the output every convention must produce for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub input: String,
    pub expected: String,
}

impl Case {
    pub fn new(input: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected: expected.into(),
        }
    }

    /// The multi-byte and ASCII fixtures every build is checked against.
    pub fn fixtures() -> Vec<Case> {
        vec![
            Case::new(FIXTURE_MULTIBYTE_INPUT, FIXTURE_MULTIBYTE_EXPECTED),
            Case::new(FIXTURE_ASCII_INPUT, FIXTURE_ASCII_EXPECTED),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct CasesFile {
    cases: Vec<Case>,
}

/// Settings consumed by the self-test harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Repetitions of every case under every convention
    pub iterations: usize,

    /// Conventions to exercise, in order
    pub conventions: Vec<Convention>,

    /// Input/expected pairs
    pub cases: Vec<Case>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            conventions: Convention::ALL.to_vec(),
            cases: Case::fixtures(),
        }
    }
}

impl HarnessConfig {
    /// Defaults overridden by `HANDOFF_ITERATIONS` and `HANDOFF_CONVENTIONS`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(HANDOFF_ITERATIONS_VAR) {
            config.iterations = raw.trim().parse::<usize>().map_err(|e| {
                Error::configuration(format!("{HANDOFF_ITERATIONS_VAR}='{raw}': {e}"))
            })?;
        }

        if let Ok(raw) = std::env::var(HANDOFF_CONVENTIONS_VAR) {
            config.conventions = Convention::parse_list(&raw).map_err(|e| match e {
                Error::Configuration { message } => {
                    Error::configuration(format!("invalid {HANDOFF_CONVENTIONS_VAR}: {message}"))
                }
                other => other,
            })?;
        }

        tracing::debug!(
            iterations = config.iterations,
            conventions = ?config.conventions,
            "loaded harness configuration from environment"
        );

        config.validate()?;
        Ok(config)
    }

    /// Replace the case list with the contents of a JSON cases file.
    pub fn with_cases_file(mut self, path: &Path) -> Result<Self> {
        self.cases = load_cases(path)?;
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_conventions(mut self, conventions: Vec<Convention>) -> Self {
        self.conventions = conventions;
        self
    }

    /// Reject settings that would make the self-test vacuous or impossible.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::configuration("iterations must be at least 1"));
        }
        if self.conventions.is_empty() {
            return Err(Error::configuration("at least one convention is required"));
        }
        if self.cases.is_empty() {
            return Err(Error::configuration("at least one case is required"));
        }
        if let Some(case) = self.cases.iter().find(|c| c.input.contains('\0')) {
            return Err(Error::configuration(format!(
                "case input {:?} contains a NUL byte and cannot cross the boundary",
                case.input
            )));
        }
        Ok(())
    }
}

/// Read `{"cases": [{"input": .., "expected": ..}]}` from disk.
pub fn load_cases(path: &Path) -> Result<Vec<Case>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| Error::file_system(path, "read", e))?;
    let file: CasesFile = serde_json::from_str(&raw)?;
    tracing::debug!(path = %path.display(), count = file.cases.len(), "loaded cases file");
    Ok(file.cases)
}
