//! Safe wrappers over each boundary call.
//!
//! Every wrapper takes the caller's [`CallerBuffer`] by reference, so the input
//! outlives the call, and returns the handle type of its convention.

use crate::buffer::CallerBuffer;
use crate::handles::{BorrowedPrefix, CalleeCString, CalleeRawParts};
use crate::sys;
use handoff_core::{Error, OwnedVariant, Result};
use std::os::raw::c_char;
use std::ptr;
use tracing::trace;

pub fn scalar_sum(a: u8, b: u16, c: u32) -> usize {
    // SAFETY: plain values, no pointers involved.
    unsafe { sys::handoff_scalar_sum(a, b, c) }
}

/// Convention A through the chosen entry point.
pub fn owned(variant: OwnedVariant, input: &CallerBuffer) -> Result<CalleeCString> {
    // SAFETY: `input` is a live NUL-terminated buffer for the whole call.
    let ptr = unsafe {
        match variant {
            OwnedVariant::BorrowedToOwned => sys::handoff_borrowed_to_owned(input.as_ptr()),
            OwnedVariant::OwnedToOwned => sys::handoff_owned_to_owned(input.as_ptr()),
            OwnedVariant::BorrowedToBorrowed => sys::handoff_borrowed_to_borrowed(input.as_ptr()),
        }
    };
    trace!(symbol = variant.symbol(), ?ptr, "convention A call returned");

    // SAFETY: fresh convention-A result, owned by nobody else.
    let handle = unsafe { CalleeCString::from_raw(ptr) };
    if handle.is_null() {
        return Err(Error::ffi(variant.symbol(), "returned a null pointer"));
    }
    Ok(handle)
}

/// Convention B.
pub fn raw_parts(input: &CallerBuffer) -> Result<CalleeRawParts> {
    let mut out_ptr: *mut c_char = ptr::null_mut();
    let mut out_raw: *mut u8 = ptr::null_mut();
    let mut len = 0usize;
    let mut cap = 0usize;

    // SAFETY: `input` is live for the call and every out slot is a valid local.
    unsafe {
        sys::handoff_raw_parts(
            input.as_ptr(),
            &mut out_ptr,
            &mut out_raw,
            &mut len,
            &mut cap,
        );
    }
    trace!(?out_ptr, len, cap, "convention B call returned");

    // SAFETY: unmodified output of one handoff_raw_parts call.
    let handle = unsafe { CalleeRawParts::from_raw_parts(out_ptr, out_raw, len, cap) };
    if handle.is_null() {
        return Err(Error::ffi("handoff_raw_parts", "returned a null pointer"));
    }
    if !handle.slots_agree() {
        return Err(Error::ffi(
            "handoff_raw_parts",
            "pointer and raw pointer slots name different allocations",
        ));
    }
    Ok(handle)
}

/// Convention C. The result borrows `input`; nothing is released.
pub fn prefix_no_copy(input: &CallerBuffer) -> Result<BorrowedPrefix<'_>> {
    let mut out_ptr: *const c_char = ptr::null();
    let mut len = 0usize;

    // SAFETY: `input` is live for the call and both out slots are valid locals.
    unsafe { sys::handoff_prefix_no_copy(input.as_ptr(), &mut out_ptr, &mut len) };
    trace!(?out_ptr, len, "convention C call returned");

    BorrowedPrefix::new(input, out_ptr, len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_core::constants::*;

    #[test]
    fn scalar_sum_crosses_the_boundary() {
        assert_eq!(
            scalar_sum(SCALAR_ARG_U8, SCALAR_ARG_U16, SCALAR_ARG_U32),
            SCALAR_EXPECTED_SUM
        );
    }

    #[test]
    fn owned_variants_return_prefix() {
        let input = CallerBuffer::new(FIXTURE_MULTIBYTE_INPUT).unwrap();
        for variant in OwnedVariant::ALL {
            let out = owned(variant, &input).unwrap();
            assert_eq!(out.to_str().unwrap(), FIXTURE_MULTIBYTE_EXPECTED, "{variant}");
        }
    }

    #[test]
    fn raw_parts_views_agree() {
        let input = CallerBuffer::new(FIXTURE_MULTIBYTE_INPUT).unwrap();
        let out = raw_parts(&input).unwrap();
        assert_eq!(out.len(), FIXTURE_MULTIBYTE_EXPECTED.len());
        assert!(out.capacity() > out.len());
        assert_eq!(out.to_str().unwrap(), FIXTURE_MULTIBYTE_EXPECTED);
        assert_eq!(out.as_c_str().unwrap().to_bytes(), out.as_bytes().unwrap());
    }

    #[test]
    fn no_copy_reads_caller_buffer() {
        let input = CallerBuffer::new(FIXTURE_MULTIBYTE_INPUT).unwrap();
        let prefix = prefix_no_copy(&input).unwrap();
        assert!(prefix.starts_at_input());
        assert_eq!(prefix.to_str().unwrap(), FIXTURE_MULTIBYTE_EXPECTED);
        assert_eq!(
            &input.as_bytes()[..prefix.len()],
            FIXTURE_MULTIBYTE_EXPECTED.as_bytes()
        );
    }

    #[test]
    fn empty_input_round_trips() {
        let input = CallerBuffer::new("").unwrap();
        assert_eq!(owned(OwnedVariant::OwnedToOwned, &input).unwrap().to_str().unwrap(), "");
        let parts = raw_parts(&input).unwrap();
        assert!(parts.is_empty());
        assert!(prefix_no_copy(&input).unwrap().is_empty());
    }
}
