//! Core domain types, errors and configuration for `handoff`.
//!
//! Both sides of the string boundary depend on this crate: the callee for the
//! prefix rule it applies, the caller for the conventions it exercises and the
//! errors it reports.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias shared by every crate.
//! - **`convention`**: the three ownership-transfer conventions and the
//!   convention-A read variants.
//! - **`config`**: the layered `HarnessConfig` used by the self-test harness.
//! - **`constants`**: the prefix limit, fixtures and environment variable names.

pub mod config;
pub mod constants;
pub mod convention;
pub mod errors;

pub use self::{
    config::{Case, HarnessConfig},
    constants::*,
    convention::{Convention, OwnedVariant},
    errors::{Error, Result},
};
