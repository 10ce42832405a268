//! Builder methods for creating errors with context

use super::types::Error;
use crate::convention::Convention;
use std::path::PathBuf;

impl Error {
    /// Create an FFI error
    #[must_use]
    pub fn ffi(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Ffi {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create an encoding error
    #[must_use]
    pub fn encoding(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Encoding {
            operation: operation.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create an encoding error with a source error
    #[must_use]
    pub fn encoding_with_source(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Encoding {
            operation: operation.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a self-test mismatch error
    #[must_use]
    pub fn mismatch(
        convention: Convention,
        input: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Error::Mismatch {
            convention,
            input: input.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    #[must_use]
    pub fn scalar_mismatch(expected: usize, actual: usize) -> Self {
        Error::ScalarMismatch { expected, actual }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Whether this error is a wrong result reported by the self-test
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Error::Mismatch { .. } | Error::ScalarMismatch { .. })
    }
}
