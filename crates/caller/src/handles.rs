//! Owning handles for the results of each convention.
//!
//! Fields are private and no handle can be built from arbitrary pointers in
//! safe code, so a result can only be released the way its own convention
//! prescribes, exactly once.
//!
//! Handles hold raw pointers and stay on the thread that made the call. None
//! of them is `Send`:
//!
//! ```compile_fail
//! fn assert_send<T: Send>() {}
//! assert_send::<handoff_caller::CalleeCString>();
//! ```
//!
//! ```compile_fail
//! fn assert_send<T: Send>() {}
//! assert_send::<handoff_caller::CalleeRawParts>();
//! ```
//!
//! ```compile_fail
//! fn assert_send<T: Send>() {}
//! assert_send::<handoff_caller::BorrowedPrefix<'static>>();
//! ```
//!
//! and none of them is `Sync`:
//!
//! ```compile_fail
//! fn assert_sync<T: Sync>() {}
//! assert_sync::<handoff_caller::CalleeCString>();
//! ```
//!
//! ```compile_fail
//! fn assert_sync<T: Sync>() {}
//! assert_sync::<handoff_caller::CalleeRawParts>();
//! ```
//!
//! ```compile_fail
//! fn assert_sync<T: Sync>() {}
//! assert_sync::<handoff_caller::BorrowedPrefix<'static>>();
//! ```

use crate::buffer::CallerBuffer;
use crate::sys;
use handoff_core::{Convention, Error, Result};
use std::ffi::CStr;
use std::os::raw::c_char;

/// RAII wrapper for a convention-A C string returned by the callee.
/// Released with `handoff_release_cstring` when dropped.
#[derive(Debug)]
pub struct CalleeCString {
    ptr: *mut c_char,
}

impl CalleeCString {
    /// Take ownership of a convention-A result.
    ///
    /// # Safety
    /// The caller must ensure that:
    /// - `ptr` is null or was returned by a convention-A entry point
    /// - The pointer has not been released already
    /// - No other handle owns the same pointer
    pub unsafe fn from_raw(ptr: *mut c_char) -> Self {
        Self { ptr }
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    pub fn as_c_str(&self) -> Result<&CStr> {
        if self.ptr.is_null() {
            return Err(Error::ffi(
                "CalleeCString::as_c_str",
                "convention A returned a null pointer",
            ));
        }
        // SAFETY: non-null and NUL-terminated by the callee; alive until drop.
        Ok(unsafe { CStr::from_ptr(self.ptr) })
    }

    pub fn to_str(&self) -> Result<&str> {
        Ok(self.as_c_str()?.to_str()?)
    }
}

impl Drop for CalleeCString {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            // SAFETY: `from_raw` guarantees sole ownership of a convention-A pointer.
            unsafe { sys::handoff_release_cstring(self.ptr) }
        }
    }
}

/// RAII wrapper for a convention-B allocation.
///
/// Holds the pointer, length and capacity exactly as the callee reported them
/// and passes them back unchanged to `handoff_release_raw_parts` on drop.
#[derive(Debug)]
pub struct CalleeRawParts {
    ptr: *mut c_char,
    raw: *mut u8,
    len: usize,
    cap: usize,
}

impl CalleeRawParts {
    /// Take ownership of the four values one `handoff_raw_parts` call wrote.
    ///
    /// # Safety
    /// `ptr`, `len` and `cap` must be unmodified output of a single
    /// `handoff_raw_parts` call whose allocation no other handle owns.
    pub unsafe fn from_raw_parts(ptr: *mut c_char, raw: *mut u8, len: usize, cap: usize) -> Self {
        Self { ptr, raw, len, cap }
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Whether the C-string slot and the raw slot name the same allocation.
    pub fn slots_agree(&self) -> bool {
        self.ptr.cast::<u8>() == self.raw
    }

    /// The result through the raw slot, bounded by the reported length.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        if self.raw.is_null() {
            return Err(Error::ffi(
                "handoff_raw_parts",
                "convention B returned a null pointer",
            ));
        }
        // SAFETY: the callee initialised `len` bytes at `raw`; alive until drop.
        Ok(unsafe { std::slice::from_raw_parts(self.raw, self.len) })
    }

    /// The result through the C-string slot, read up to its terminator.
    pub fn as_c_str(&self) -> Result<&CStr> {
        if self.ptr.is_null() {
            return Err(Error::ffi(
                "handoff_raw_parts",
                "convention B returned a null pointer",
            ));
        }
        // SAFETY: the callee NUL-terminates at `ptr + len`; alive until drop.
        Ok(unsafe { CStr::from_ptr(self.ptr) })
    }

    pub fn to_str(&self) -> Result<&str> {
        Ok(std::str::from_utf8(self.as_bytes()?)?)
    }
}

impl Drop for CalleeRawParts {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            // SAFETY: the triple is exactly what `handoff_raw_parts` reported.
            unsafe { sys::handoff_release_raw_parts(self.ptr, self.len, self.cap) }
        }
    }
}

/// A convention-C result: a length into the caller's own buffer.
///
/// Borrows the [`CallerBuffer`] it points into, so the buffer cannot be freed
/// while the prefix is alive. Has no `Drop`; there is nothing to release.
#[derive(Debug, Clone, Copy)]
pub struct BorrowedPrefix<'a> {
    buffer: &'a CallerBuffer,
    ptr: *const c_char,
    len: usize,
}

impl<'a> BorrowedPrefix<'a> {
    /// Validate the callee's answer against the buffer it was computed from.
    pub(crate) fn new(buffer: &'a CallerBuffer, ptr: *const c_char, len: usize) -> Result<Self> {
        if ptr.is_null() {
            return Err(Error::ffi(
                "handoff_prefix_no_copy",
                "convention C returned a null pointer",
            ));
        }
        if !buffer.contains_span(ptr, len) {
            return Err(Error::ffi(
                "handoff_prefix_no_copy",
                format!(
                    "{} result of {len} bytes does not lie inside the caller buffer",
                    Convention::NoCopy
                ),
            ));
        }
        Ok(Self { buffer, ptr, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the returned pointer is the caller's own input pointer.
    pub fn starts_at_input(&self) -> bool {
        self.ptr == self.buffer.as_ptr()
    }

    /// The prefix, read from the caller's buffer.
    pub fn as_bytes(&self) -> &'a [u8] {
        let offset = self.ptr as usize - self.buffer.as_ptr() as usize;
        &self.buffer.as_bytes()[offset..offset + self.len]
    }

    pub fn to_str(&self) -> Result<&'a str> {
        Ok(std::str::from_utf8(self.as_bytes())?)
    }
}
