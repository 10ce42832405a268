use handoff_caller::{Harness, Report};
use handoff_core::{Convention, HarnessConfig};
use std::path::PathBuf;
use tracing::{error, info};

/// Resolve the configuration (defaults, environment, cases file, flags) and
/// run the harness. Any mismatch is fatal and reported as the error.
pub fn execute(
    iterations: Option<usize>,
    conventions: Vec<Convention>,
    cases: Option<PathBuf>,
    json: bool,
) -> eyre::Result<()> {
    let mut config = HarnessConfig::from_env()?;
    if let Some(path) = cases {
        config = config.with_cases_file(&path)?;
    }
    if let Some(iterations) = iterations {
        config = config.with_iterations(iterations);
    }
    if !conventions.is_empty() {
        config = config.with_conventions(dedup(conventions));
    }

    info!(
        iterations = config.iterations,
        cases = config.cases.len(),
        conventions = ?config.conventions,
        "starting self-test"
    );

    let report = Harness::new(config).run().map_err(|e| {
        error!(error = %e, "self-test failed");
        e
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn dedup(conventions: Vec<Convention>) -> Vec<Convention> {
    let mut out = Vec::with_capacity(conventions.len());
    for c in conventions {
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}

fn print_summary(report: &Report) {
    println!("scalar sum: {} ok", report.scalar_sum);
    for c in &report.conventions {
        println!(
            "{}: {} round trips, {} releases, {} ms ok",
            c.convention, c.round_trips, c.releases, c.elapsed_ms
        );
    }
    println!(
        "{} cases x {} iterations: {} round trips ok",
        report.cases,
        report.iterations,
        report.total_round_trips()
    );
}
