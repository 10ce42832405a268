//! Caller side of the handoff string boundary
//!
//! This crate plays the foreign runtime: it allocates its input buffers with
//! its own allocator (`malloc`), calls the callee through the C ABI, and
//! releases every result through the entry point its convention prescribes.
//!
//! Each convention returns its own handle type, and each handle's `Drop`
//! calls exactly one release function:
//!
//! | Convention | Handle | Released by |
//! |---|---|---|
//! | A | [`CalleeCString`] | `handoff_release_cstring` |
//! | B | [`CalleeRawParts`] | `handoff_release_raw_parts(ptr, len, cap)` |
//! | C | [`BorrowedPrefix`] | nothing; borrows the caller's [`CallerBuffer`] |

// Links the callee's exported symbols into this crate's artifacts.
extern crate handoff_callee as _;

pub mod buffer;
pub mod calls;
pub mod handles;
pub mod harness;
mod sys;

pub use buffer::CallerBuffer;
pub use calls::{owned, prefix_no_copy, raw_parts, scalar_sum};
pub use handles::{BorrowedPrefix, CalleeCString, CalleeRawParts};
pub use harness::{ConventionReport, Harness, Report};
