use clap::{Subcommand, ValueEnum};
use handoff_core::Convention;
use std::path::PathBuf;

pub mod selftest;
pub mod sum;
pub mod transform;

#[derive(Subcommand)]
pub enum Commands {
    /// Round-trip the configured cases through every convention
    #[command(visible_alias = "test")]
    Selftest {
        /// Repetitions of every case (overrides HANDOFF_ITERATIONS)
        #[arg(short, long)]
        iterations: Option<usize>,

        /// Convention to exercise: a, b or c (can be specified multiple times)
        #[arg(short = 'c', long = "convention")]
        conventions: Vec<Convention>,

        /// JSON file of cases: {"cases": [{"input": "..", "expected": ".."}]}
        #[arg(long, value_name = "FILE")]
        cases: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add three integers of different widths across the boundary
    Sum { a: u8, b: u16, c: u32 },

    /// Send one string through a single convention and show what came back
    Transform {
        /// Entry point to call
        #[arg(short = 'c', long = "convention", value_enum, default_value = "a")]
        kind: TransformKind,

        /// Text to send
        text: String,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Selftest {
            iterations: None,
            conventions: Vec::new(),
            cases: None,
            json: false,
        }
    }
}

/// Entry points reachable from `handoff transform`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransformKind {
    /// Convention A, borrowed input to owned result
    A,
    /// Convention A, input copied and truncated in place
    AOwned,
    /// Convention A, borrowed sub-slice copied out
    ABorrowed,
    /// Convention B, pointer plus length and capacity
    B,
    /// Convention C, length into the caller's own buffer
    C,
}
