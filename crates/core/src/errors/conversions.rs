//! Conversion implementations for error types

use super::types::Error;
use std::str::Utf8Error;

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

// Raised when a callee result is read back as `&str`
impl From<Utf8Error> for Error {
    fn from(error: Utf8Error) -> Self {
        Error::encoding_with_source("from_utf8", "buffer is not valid UTF-8", error)
    }
}
