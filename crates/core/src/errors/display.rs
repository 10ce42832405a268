//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Ffi { operation, message } => {
                write!(f, "FFI operation '{operation}' failed: {message}")
            }
            Error::Encoding {
                operation, message, ..
            } => {
                write!(f, "cannot pass text through '{operation}': {message}")
            }
            Error::Mismatch {
                convention,
                input,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{convention} round trip of {input:?} failed: expected {expected:?}, got {actual:?}"
                )
            }
            Error::ScalarMismatch { expected, actual } => {
                write!(
                    f,
                    "scalar passthrough round trip failed: expected {expected}, got {actual}"
                )
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convention::Convention;

    #[test]
    fn mismatch_names_convention_and_input() {
        let err = Error::mismatch(Convention::RawParts, "Datafuse Lab", "Datafuse Lab", "Data");
        let msg = err.to_string();
        assert!(msg.contains("convention B"), "{msg}");
        assert!(msg.contains("\"Datafuse Lab\""), "{msg}");
        assert!(msg.contains("\"Data\""), "{msg}");
        assert!(err.is_mismatch());
    }

    #[test]
    fn scalar_mismatch_reads_like_a_round_trip_failure() {
        let err = Error::scalar_mismatch(1_235_924, 1_235_923);
        assert_eq!(
            err.to_string(),
            "scalar passthrough round trip failed: expected 1235924, got 1235923"
        );
        assert!(err.is_mismatch());
    }

    #[test]
    fn ffi_error_names_operation() {
        let err = Error::ffi("handoff_raw_parts", "returned a null pointer");
        assert_eq!(
            err.to_string(),
            "FFI operation 'handoff_raw_parts' failed: returned a null pointer"
        );
        assert!(!err.is_mismatch());
    }
}
