//! The ownership-transfer conventions spoken across the string boundary.
//!
//! Each convention has its own release path. There is deliberately no generic
//! "free" shared between them: a pointer obtained under one convention must
//! only ever be released the way that convention prescribes.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// How a transformed string travels back from the callee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Convention {
    /// Convention A: callee allocates a null-terminated buffer and returns the
    /// pointer. Released with `handoff_release_cstring`.
    Owned,
    /// Convention B: callee allocates and reports pointer, raw pointer, length
    /// and capacity. Released with `handoff_release_raw_parts`, which needs the
    /// length and capacity exactly as reported.
    RawParts,
    /// Convention C: no allocation. The returned pointer aliases the caller's
    /// own buffer and must never be passed to a callee release function.
    NoCopy,
}

impl Convention {
    /// Every convention, in the order the harness exercises them.
    pub const ALL: [Convention; 3] = [Convention::Owned, Convention::RawParts, Convention::NoCopy];

    /// Single-letter tag used on the command line and in the environment.
    pub fn letter(self) -> char {
        match self {
            Convention::Owned => 'A',
            Convention::RawParts => 'B',
            Convention::NoCopy => 'C',
        }
    }

    /// Whether the callee allocates memory the caller must hand back.
    pub fn callee_allocates(self) -> bool {
        !matches!(self, Convention::NoCopy)
    }

    /// Name of the callee entry point that releases results of this convention.
    pub fn release_symbol(self) -> Option<&'static str> {
        match self {
            Convention::Owned => Some("handoff_release_cstring"),
            Convention::RawParts => Some("handoff_release_raw_parts"),
            Convention::NoCopy => None,
        }
    }

    /// Parse a comma separated list such as `a,b` or `owned,no-copy`.
    pub fn parse_list(list: &str) -> Result<Vec<Convention>> {
        let mut out = Vec::new();
        for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let convention = item.parse::<Convention>()?;
            if !out.contains(&convention) {
                out.push(convention);
            }
        }
        if out.is_empty() {
            return Err(Error::configuration(format!(
                "no conventions listed in '{list}'"
            )));
        }
        Ok(out)
    }
}

impl Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "convention {}", self.letter())
    }
}

impl FromStr for Convention {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "owned" => Ok(Convention::Owned),
            "b" | "raw-parts" => Ok(Convention::RawParts),
            "c" | "no-copy" => Ok(Convention::NoCopy),
            other => Err(Error::configuration(format!(
                "unknown convention '{other}' (expected a, b or c)"
            ))),
        }
    }
}

/// How the convention-A callee reads its input before allocating the result.
///
/// All three return a fresh null-terminated buffer released with the same
/// entry point; they differ only in the allocations made along the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OwnedVariant {
    /// Borrow the input and build a new owned string.
    BorrowedToOwned,
    /// Copy the input into an owned string, then truncate it in place.
    OwnedToOwned,
    /// Borrow the input, take a sub-slice, then copy the slice out because it
    /// is not null-terminated.
    BorrowedToBorrowed,
}

impl OwnedVariant {
    pub const ALL: [OwnedVariant; 3] = [
        OwnedVariant::BorrowedToOwned,
        OwnedVariant::OwnedToOwned,
        OwnedVariant::BorrowedToBorrowed,
    ];

    /// Exported C symbol for this variant.
    pub fn symbol(self) -> &'static str {
        match self {
            OwnedVariant::BorrowedToOwned => "handoff_borrowed_to_owned",
            OwnedVariant::OwnedToOwned => "handoff_owned_to_owned",
            OwnedVariant::BorrowedToBorrowed => "handoff_borrowed_to_borrowed",
        }
    }
}

impl Display for OwnedVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a", Convention::Owned)]
    #[case("B", Convention::RawParts)]
    #[case("no-copy", Convention::NoCopy)]
    #[case("Raw-Parts", Convention::RawParts)]
    fn parses_letters_and_names(#[case] input: &str, #[case] expected: Convention) {
        assert_eq!(input.parse::<Convention>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_convention() {
        let err = "d".parse::<Convention>().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn parse_list_dedups_and_keeps_order() {
        let list = Convention::parse_list("c, a ,c").unwrap();
        assert_eq!(list, vec![Convention::NoCopy, Convention::Owned]);
    }

    #[test]
    fn parse_list_rejects_empty() {
        assert!(Convention::parse_list(" , ").is_err());
    }

    #[test]
    fn only_no_copy_has_no_release() {
        assert_eq!(Convention::NoCopy.release_symbol(), None);
        assert!(!Convention::NoCopy.callee_allocates());
        assert_ne!(
            Convention::Owned.release_symbol(),
            Convention::RawParts.release_symbol()
        );
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&Convention::RawParts).unwrap();
        assert_eq!(json, "\"raw-parts\"");
        let back: OwnedVariant = serde_json::from_str("\"borrowed-to-borrowed\"").unwrap();
        assert_eq!(back, OwnedVariant::BorrowedToBorrowed);
    }
}
