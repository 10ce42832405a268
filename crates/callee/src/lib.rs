//! Callee side of the handoff string boundary
//!
//! This crate builds the native library a foreign caller links against. The
//! C entry points live in [`ffi`] and are declared for C callers in
//! `include/handoff.h`. The string logic behind them is plain safe Rust in
//! [`transform`].
//!
//! Memory returned by this library is allocated with Rust's global allocator
//! and must come back through the release entry point of the convention that
//! produced it.

pub mod ffi;
pub mod transform;

pub use transform::{prefix_len, RawParts};
