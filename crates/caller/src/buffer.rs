//! Input buffers owned by the caller.

use handoff_core::{Error, Result};
use std::ffi::CStr;
use std::marker::PhantomData;
use std::os::raw::c_char;
use std::ptr::NonNull;

/// A NUL-terminated copy of a string, allocated with the caller's allocator.
///
/// The callee only ever borrows this buffer. It is freed with `libc::free`
/// when dropped, on every exit path, and never through a callee release
/// function.
///
/// The buffer cannot leave the thread that allocated it:
///
/// ```compile_fail
/// fn assert_send<T: Send>() {}
/// assert_send::<handoff_caller::CallerBuffer>();
/// ```
///
/// ```compile_fail
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<handoff_caller::CallerBuffer>();
/// ```
pub struct CallerBuffer {
    ptr: NonNull<u8>,
    len: usize,
    // Raw storage handed across the boundary; keep it on one thread.
    _not_send: PhantomData<*mut u8>,
}

impl CallerBuffer {
    /// Copy `s` into a fresh `malloc` allocation with a trailing NUL.
    pub fn new(s: &str) -> Result<Self> {
        if let Some(pos) = s.bytes().position(|b| b == 0) {
            return Err(Error::encoding(
                "CallerBuffer::new",
                format!("interior NUL byte at offset {pos}"),
            ));
        }

        let len = s.len();
        // SAFETY: malloc with a non-zero size; null is checked below.
        let raw = unsafe { libc::malloc(len + 1) }.cast::<u8>();
        let ptr = NonNull::new(raw)
            .ok_or_else(|| Error::ffi("malloc", format!("failed to allocate {} bytes", len + 1)))?;

        // SAFETY: the allocation holds len + 1 bytes and does not overlap `s`.
        unsafe {
            std::ptr::copy_nonoverlapping(s.as_ptr(), ptr.as_ptr(), len);
            *ptr.as_ptr().add(len) = 0;
        }

        Ok(Self {
            ptr,
            len,
            _not_send: PhantomData,
        })
    }

    /// Pointer to pass to the callee.
    pub fn as_ptr(&self) -> *const c_char {
        self.ptr.as_ptr().cast::<c_char>().cast_const()
    }

    /// String bytes, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: `len` bytes were initialised in `new` and the buffer is immutable.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_c_str(&self) -> &CStr {
        // SAFETY: NUL-terminated in `new`, with no interior NUL.
        unsafe { CStr::from_ptr(self.as_ptr()) }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `[ptr, ptr + len)` lies inside this buffer's string bytes.
    pub fn contains_span(&self, ptr: *const c_char, len: usize) -> bool {
        let start = self.ptr.as_ptr() as usize;
        let end = start + self.len;
        let span_start = ptr as usize;
        span_start >= start
            && span_start
                .checked_add(len)
                .is_some_and(|span_end| span_end <= end)
    }
}

impl Drop for CallerBuffer {
    fn drop(&mut self) {
        // SAFETY: allocated by libc::malloc in `new` and freed only here.
        unsafe { libc::free(self.ptr.as_ptr().cast::<libc::c_void>()) }
    }
}

impl std::fmt::Debug for CallerBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallerBuffer")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("text", &String::from_utf8_lossy(self.as_bytes()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_text_and_terminates() {
        let buf = CallerBuffer::new("极客").unwrap();
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.as_bytes(), "极客".as_bytes());
        assert_eq!(buf.as_c_str().to_str().unwrap(), "极客");
    }

    #[test]
    fn empty_string_is_allowed() {
        let buf = CallerBuffer::new("").unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.as_c_str().to_bytes(), b"");
    }

    #[test]
    fn interior_nul_is_rejected() {
        let err = CallerBuffer::new("a\0b").unwrap_err();
        assert!(
            matches!(err, Error::Encoding { ref operation, .. } if operation == "CallerBuffer::new"),
            "{err}"
        );
        assert!(err.to_string().contains("offset 1"), "{err}");
    }

    #[test]
    fn contains_span_bounds() {
        let buf = CallerBuffer::new("Datafuse").unwrap();
        assert!(buf.contains_span(buf.as_ptr(), 8));
        assert!(buf.contains_span(buf.as_ptr(), 0));
        assert!(!buf.contains_span(buf.as_ptr(), 9));
        let other = CallerBuffer::new("Datafuse").unwrap();
        assert!(!buf.contains_span(other.as_ptr(), 1));
    }
}
