//! Safe string logic behind the C entry points.
//!
//! The derived string is the input's prefix of at most [`PREFIX_LIMIT`] bytes,
//! cut back to a character boundary. Because the result is always a byte
//! prefix of the input, the no-copy convention can describe it with a length
//! alone.

use handoff_core::PREFIX_LIMIT;
use std::mem::ManuallyDrop;

/// Length in bytes of the prefix kept from `s`.
pub fn prefix_len(s: &str) -> usize {
    if s.len() <= PREFIX_LIMIT {
        return s.len();
    }
    let mut end = PREFIX_LIMIT;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

pub fn scalar_sum(a: u8, b: u16, c: u32) -> usize {
    usize::from(a) + usize::from(b) + c as usize
}

/// Both paths allocate.
pub fn borrowed_to_owned(s: &str) -> String {
    s[..prefix_len(s)].to_string()
}

/// Truncates in place; no allocation beyond the one that produced `s`.
pub fn owned_to_owned(mut s: String) -> String {
    let end = prefix_len(&s);
    s.truncate(end);
    s
}

/// Neither path allocates.
pub fn borrowed_to_borrowed(s: &str) -> &str {
    &s[..prefix_len(s)]
}

/// A leaked, NUL-terminated string allocation described by its raw parts.
///
/// `len` counts the string bytes only; the terminator sits at `ptr + len`.
/// `cap` is the capacity of the allocation and is needed to free it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawParts {
    pub ptr: *mut u8,
    pub len: usize,
    pub cap: usize,
}

impl RawParts {
    /// Take ownership of `s`, append a terminator and forget the allocation.
    pub fn leak(mut s: String) -> Self {
        s.push('\0');
        let mut s = ManuallyDrop::new(s);
        Self {
            ptr: s.as_mut_ptr(),
            len: s.len() - 1,
            cap: s.capacity(),
        }
    }

    /// Rebuild and drop the allocation produced by [`RawParts::leak`].
    ///
    /// # Safety
    /// `ptr`, `len` and `cap` must be exactly the values returned by one call
    /// to [`RawParts::leak`], and the allocation must not have been released
    /// already. Any other triple is undefined behaviour.
    pub unsafe fn release(self) {
        drop(Vec::from_raw_parts(self.ptr, self.len, self.cap));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_core::constants::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(FIXTURE_MULTIBYTE_INPUT, FIXTURE_MULTIBYTE_EXPECTED)]
    #[case(FIXTURE_ASCII_INPUT, FIXTURE_ASCII_EXPECTED)]
    #[case("", "")]
    #[case("exactly15bytes!", "exactly15bytes!")]
    #[case("sixteen bytes!!!", "sixteen bytes!!")]
    fn every_variant_agrees(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(borrowed_to_owned(input), expected);
        assert_eq!(owned_to_owned(input.to_string()), expected);
        assert_eq!(borrowed_to_borrowed(input), expected);
    }

    #[test]
    fn cut_moves_back_to_char_boundary() {
        // 14 ASCII bytes then a 3-byte character straddling byte 15
        let s = "abcdefghijklmn极";
        assert_eq!(prefix_len(s), 14);
        assert_eq!(borrowed_to_borrowed(s), "abcdefghijklmn");
    }

    #[test]
    fn borrowed_to_borrowed_aliases_input() {
        let s = FIXTURE_MULTIBYTE_INPUT;
        assert_eq!(borrowed_to_borrowed(s).as_ptr(), s.as_ptr());
    }

    #[test]
    fn owned_to_owned_keeps_allocation() {
        let s = FIXTURE_MULTIBYTE_INPUT.to_string();
        let ptr = s.as_ptr();
        let out = owned_to_owned(s);
        assert_eq!(out.as_ptr(), ptr);
    }

    #[test]
    fn scalar_sum_does_not_overflow_narrow_widths() {
        assert_eq!(
            scalar_sum(SCALAR_ARG_U8, SCALAR_ARG_U16, SCALAR_ARG_U32),
            SCALAR_EXPECTED_SUM
        );
        assert_eq!(
            scalar_sum(u8::MAX, u16::MAX, u32::MAX),
            255 + 65_535 + 4_294_967_295usize
        );
    }

    #[test]
    fn raw_parts_are_nul_terminated() {
        let parts = RawParts::leak("Datafuse Lab".to_string());
        assert_eq!(parts.len, 12);
        assert!(parts.cap > parts.len);
        let bytes = unsafe { std::slice::from_raw_parts(parts.ptr, parts.len + 1) };
        assert_eq!(&bytes[..12], b"Datafuse Lab");
        assert_eq!(bytes[12], 0);
        unsafe { parts.release() };
    }

    proptest! {
        #[test]
        fn prefix_is_valid_bounded_prefix(s in "\\PC{0,40}") {
            let out = borrowed_to_borrowed(&s);
            prop_assert!(out.len() <= PREFIX_LIMIT);
            prop_assert!(s.starts_with(out));
            // Nothing longer fits without crossing the limit
            if out.len() < s.len() {
                let next = s[out.len()..].chars().next().unwrap();
                prop_assert!(out.len() + next.len_utf8() > PREFIX_LIMIT);
            }
        }

        #[test]
        fn short_inputs_are_identity(s in "[ -~]{0,15}") {
            prop_assert_eq!(borrowed_to_owned(&s), s);
        }
    }
}
