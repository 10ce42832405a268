//! Core error type definitions

use crate::convention::Convention;
use std::path::PathBuf;

/// Result type alias for handoff operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for handoff operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A boundary call returned something the convention does not allow
    Ffi { operation: String, message: String },

    /// Text that cannot cross the boundary as a C string
    Encoding {
        operation: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Round-tripped content differs from the expected output
    Mismatch {
        convention: Convention,
        input: String,
        expected: String,
        actual: String,
    },

    /// The scalar passthrough returned the wrong sum
    ScalarMismatch { expected: usize, actual: usize },

    /// Configuration errors
    Configuration { message: String },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}
