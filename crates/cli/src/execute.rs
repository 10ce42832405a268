use crate::commands::{selftest, sum, transform, Commands};

impl Commands {
    pub fn execute(self) -> eyre::Result<()> {
        match self {
            Commands::Selftest {
                iterations,
                conventions,
                cases,
                json,
            } => selftest::execute(iterations, conventions, cases, json),
            Commands::Sum { a, b, c } => sum::execute(a, b, c),
            Commands::Transform { kind, text } => transform::execute(kind, &text),
        }
    }
}
