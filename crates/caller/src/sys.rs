//! Raw declarations of the callee's C entry points, mirroring
//! `crates/callee/include/handoff.h`.

use std::os::raw::c_char;

extern "C" {
    pub fn handoff_scalar_sum(a: u8, b: u16, c: u32) -> usize;

    pub fn handoff_borrowed_to_owned(s: *const c_char) -> *mut c_char;
    pub fn handoff_owned_to_owned(s: *const c_char) -> *mut c_char;
    pub fn handoff_borrowed_to_borrowed(s: *const c_char) -> *mut c_char;
    pub fn handoff_release_cstring(s: *mut c_char);

    pub fn handoff_raw_parts(
        s: *const c_char,
        out_ptr: *mut *mut c_char,
        out_raw: *mut *mut u8,
        out_len: *mut usize,
        out_cap: *mut usize,
    );
    pub fn handoff_release_raw_parts(s: *mut c_char, len: usize, cap: usize);

    pub fn handoff_prefix_no_copy(
        s: *const c_char,
        out_ptr: *mut *const c_char,
        out_len: *mut usize,
    );
}
