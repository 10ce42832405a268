//! C ABI entry points.
//!
//! Ownership rules, by convention:
//!
//! * **A** (`handoff_borrowed_to_owned`, `handoff_owned_to_owned`,
//!   `handoff_borrowed_to_borrowed`): the input stays owned by the caller. The
//!   returned `char*` is owned by this library and must be passed to
//!   `handoff_release_cstring` exactly once.
//! * **B** (`handoff_raw_parts`): the input stays owned by the caller. The
//!   returned pointer, length and capacity describe one allocation owned by
//!   this library; pass all three unchanged to `handoff_release_raw_parts`.
//! * **C** (`handoff_prefix_no_copy`): nothing is allocated. The returned
//!   pointer aliases the caller's input; the caller frees only its own buffer
//!   and must never hand this pointer to a release function here.
//!
//! Null or non-UTF-8 input yields a null result (A) or null/zero out slots
//! (B, C). Release functions ignore null.

use crate::transform::{self, RawParts};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use tracing::{debug, warn};

/// Borrow a caller-owned C string as `&str` for the duration of one call.
///
/// # Safety
/// `s` must be null or point to a NUL-terminated buffer that stays alive and
/// unmodified for `'a`.
unsafe fn borrow_input<'a>(operation: &'static str, s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        warn!(operation, "received a null input pointer");
        return None;
    }
    match CStr::from_ptr(s).to_str() {
        Ok(s) => Some(s),
        Err(e) => {
            warn!(operation, error = %e, "input is not valid UTF-8");
            None
        }
    }
}

/// Hand a string to the caller as a NUL-terminated buffer it must release with
/// `handoff_release_cstring`.
fn into_caller_cstring(operation: &'static str, s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c) => {
            debug!(operation, len = c.as_bytes().len(), "returning callee-owned C string");
            c.into_raw()
        }
        Err(e) => {
            warn!(operation, nul_position = e.nul_position(), "result contains a NUL byte");
            ptr::null_mut()
        }
    }
}

/// Sum three integers of different widths.
#[no_mangle]
pub extern "C" fn handoff_scalar_sum(a: u8, b: u16, c: u32) -> usize {
    transform::scalar_sum(a, b, c)
}

/// Convention A: borrow the input, build a new owned prefix.
///
/// # Safety
/// `s` must be null or a valid NUL-terminated string that outlives the call.
#[no_mangle]
pub unsafe extern "C" fn handoff_borrowed_to_owned(s: *const c_char) -> *mut c_char {
    const OP: &str = "handoff_borrowed_to_owned";
    match borrow_input(OP, s) {
        Some(input) => into_caller_cstring(OP, transform::borrowed_to_owned(input)),
        None => ptr::null_mut(),
    }
}

/// Convention A: copy the input into an owned string, truncate in place.
///
/// # Safety
/// `s` must be null or a valid NUL-terminated string that outlives the call.
#[no_mangle]
pub unsafe extern "C" fn handoff_owned_to_owned(s: *const c_char) -> *mut c_char {
    const OP: &str = "handoff_owned_to_owned";
    match borrow_input(OP, s) {
        Some(input) => into_caller_cstring(OP, transform::owned_to_owned(input.to_string())),
        None => ptr::null_mut(),
    }
}

/// Convention A: the prefix is computed without allocating, but a sub-slice is
/// not NUL-terminated, so it is still copied into a fresh C string here.
///
/// # Safety
/// `s` must be null or a valid NUL-terminated string that outlives the call.
#[no_mangle]
pub unsafe extern "C" fn handoff_borrowed_to_borrowed(s: *const c_char) -> *mut c_char {
    const OP: &str = "handoff_borrowed_to_borrowed";
    match borrow_input(OP, s) {
        Some(input) => {
            into_caller_cstring(OP, transform::borrowed_to_borrowed(input).to_owned())
        }
        None => ptr::null_mut(),
    }
}

/// Release a string returned by any convention-A entry point.
///
/// # Safety
/// `s` must be null or a pointer returned by a convention-A entry point that
/// has not been released yet. Never pass a caller-allocated buffer, a
/// convention-B pointer, or a convention-C pointer.
#[no_mangle]
pub unsafe extern "C" fn handoff_release_cstring(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    drop(CString::from_raw(s));
}

/// Convention B: allocate the prefix and report it through four out slots.
///
/// `out_ptr` and `out_raw` receive the same address: the first typed as a C
/// string (the buffer is NUL-terminated), the second as raw bytes. `out_len`
/// counts the string bytes without the terminator; `out_cap` is the capacity
/// of the allocation.
///
/// # Safety
/// `s` must be null or a valid NUL-terminated string that outlives the call.
/// Every out pointer must be null or valid for a write. If any out pointer is
/// null nothing is allocated.
#[no_mangle]
pub unsafe extern "C" fn handoff_raw_parts(
    s: *const c_char,
    out_ptr: *mut *mut c_char,
    out_raw: *mut *mut u8,
    out_len: *mut usize,
    out_cap: *mut usize,
) {
    const OP: &str = "handoff_raw_parts";
    if out_ptr.is_null() || out_raw.is_null() || out_len.is_null() || out_cap.is_null() {
        warn!(operation = OP, "received a null out slot");
        return;
    }

    let parts = match borrow_input(OP, s) {
        Some(input) => RawParts::leak(transform::owned_to_owned(input.to_string())),
        None => RawParts {
            ptr: ptr::null_mut(),
            len: 0,
            cap: 0,
        },
    };

    debug!(operation = OP, len = parts.len, cap = parts.cap, "returning raw parts");
    *out_ptr = parts.ptr.cast::<c_char>();
    *out_raw = parts.ptr;
    *out_len = parts.len;
    *out_cap = parts.cap;
}

/// Release an allocation returned by `handoff_raw_parts`.
///
/// # Safety
/// `s`, `len` and `cap` must be exactly the pointer, length and capacity one
/// call to `handoff_raw_parts` wrote, and that allocation must not have been
/// released yet. A mismatched length or capacity is undefined behaviour; the
/// detectable case (`len >= cap`, which leaves no room for the terminator)
/// aborts the process instead of freeing.
#[no_mangle]
pub unsafe extern "C" fn handoff_release_raw_parts(s: *mut c_char, len: usize, cap: usize) {
    if s.is_null() {
        return;
    }
    assert!(
        len < cap,
        "handoff_release_raw_parts: length {len} does not fit capacity {cap}"
    );
    RawParts {
        ptr: s.cast::<u8>(),
        len,
        cap,
    }
    .release();
}

/// Convention C: report the prefix as a length into the caller's own buffer.
///
/// `*out_ptr` is set to `s` itself. Nothing is allocated.
///
/// # Safety
/// `s` must be null or a valid NUL-terminated string that outlives every use of
/// `*out_ptr`. Both out pointers must be null or valid for a write.
#[no_mangle]
pub unsafe extern "C" fn handoff_prefix_no_copy(
    s: *const c_char,
    out_ptr: *mut *const c_char,
    out_len: *mut usize,
) {
    const OP: &str = "handoff_prefix_no_copy";
    if out_ptr.is_null() || out_len.is_null() {
        warn!(operation = OP, "received a null out slot");
        return;
    }

    match borrow_input(OP, s) {
        Some(input) => {
            let prefix = transform::borrowed_to_borrowed(input);
            debug!(operation = OP, len = prefix.len(), "returning alias into caller buffer");
            *out_ptr = prefix.as_ptr().cast::<c_char>();
            *out_len = prefix.len();
        }
        None => {
            *out_ptr = ptr::null();
            *out_len = 0;
        }
    }
}
