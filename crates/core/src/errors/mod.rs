//! Error types for handoff operations

mod builders;
mod conversions;
mod display;
mod types;

pub use types::{Error, Result};
