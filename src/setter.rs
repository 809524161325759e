//! Bit-range setter.
//!
//! Sets every bit of an interval in a word bitmap by OR-ing masks into the
//! boundary words and overwriting the words strictly between them. Bits
//! outside the interval are never touched, and no bit is ever cleared.
//!
//! Two parameterizations produce identical bitmaps:
//!
//! - [`set_range`]: half-open `[start, end)`.
//! - [`set_range_len`]: `start` plus `len_minus_one`, covering
//!   `[start, start + len_minus_one]`. This is the shape a [`Run`](crate::Run)
//!   already has, so the caller can skip computing `end`.
//!
//! Each has an `_unchecked` twin for trusted input.

use crate::error::RangeError;
use crate::word::{FULL_WORD, WORD_BITS, head_mask, run_mask, span_mask, tail_mask};

/// Bits addressable in a bitmap of `words` words.
///
/// Positions are `u32`, so the addressable capacity is capped at `2^32`
/// even for larger bitmaps.
#[inline]
pub fn capacity_bits(words: usize) -> u64 {
    (words as u64)
        .saturating_mul(WORD_BITS as u64)
        .min(1u64 << 32)
}

/// Validate a half-open range against a bitmap of `words` words.
#[inline]
pub(crate) fn check_range(words: usize, start: u64, end: u64) -> Result<(), RangeError> {
    if start > end {
        return Err(RangeError::Inverted { start, end });
    }
    let capacity = capacity_bits(words);
    if end > capacity {
        return Err(RangeError::OutOfRange {
            start,
            end,
            capacity,
        });
    }
    Ok(())
}

/// Set every bit in `[start, end)`.
///
/// An empty range (`start == end`) leaves the bitmap unchanged.
///
/// # Errors
///
/// - [`RangeError::Inverted`] if `start > end`.
/// - [`RangeError::OutOfRange`] if `end` exceeds `bitmap.len() * 64`. This is
///   checked even for empty ranges.
///
/// The bitmap is not modified when an error is returned.
///
/// # Example
///
/// ```
/// use rangebits::set_range;
///
/// let mut bitmap = [0u64; 2];
/// set_range(&mut bitmap, 62, 66).unwrap();
/// assert_eq!(bitmap, [0b11 << 62, 0b11]);
///
/// assert!(set_range(&mut bitmap, 100, 129).is_err());
/// ```
#[inline]
pub fn set_range(bitmap: &mut [u64], start: u32, end: u32) -> Result<(), RangeError> {
    check_range(bitmap.len(), start as u64, end as u64)?;
    // SAFETY: start <= end <= bitmap.len() * 64 was checked above
    unsafe { set_range_unchecked(bitmap, start, end) };
    Ok(())
}

/// Set every bit in `[start, start + len_minus_one]`.
///
/// Produces the same bitmap as `set_range(bitmap, start, start + len_minus_one + 1)`.
/// There is no empty form: at least one bit is always set.
///
/// # Errors
///
/// [`RangeError::OutOfRange`] if the range extends past `bitmap.len() * 64`.
/// The bitmap is not modified when an error is returned.
#[inline]
pub fn set_range_len(bitmap: &mut [u64], start: u32, len_minus_one: u32) -> Result<(), RangeError> {
    let start64 = start as u64;
    check_range(bitmap.len(), start64, start64 + len_minus_one as u64 + 1)?;
    // SAFETY: the full range fits in the bitmap (checked above)
    unsafe { set_range_len_unchecked(bitmap, start, len_minus_one) };
    Ok(())
}

/// Set every bit in `[start, end)` without bounds checking.
///
/// # Safety
///
/// Caller must ensure `start <= end` and `end <= bitmap.len() * 64`.
#[inline(always)]
pub unsafe fn set_range_unchecked(bitmap: &mut [u64], start: u32, end: u32) {
    debug_assert!(start <= end, "inverted range [{}, {})", start, end);
    debug_assert!(end as u64 <= capacity_bits(bitmap.len()));

    // A zero-length range must not reach the mask computation: (end - 1)
    // would select the word before `start`.
    if start == end {
        return;
    }

    let first_word = (start / WORD_BITS) as usize;
    let last_word = ((end - 1) / WORD_BITS) as usize;

    if first_word == last_word {
        // SAFETY: last_word < bitmap.len() since end <= bitmap.len() * 64
        unsafe { *bitmap.get_unchecked_mut(first_word) |= span_mask(start, end) };
        return;
    }

    // SAFETY: first_word < last_word < bitmap.len()
    unsafe {
        fill_span(
            bitmap,
            first_word,
            last_word,
            head_mask(start),
            tail_mask(end),
        )
    };
}

/// Set every bit in `[start, start + len_minus_one]` without bounds checking.
///
/// # Safety
///
/// Caller must ensure `start + len_minus_one + 1 <= bitmap.len() * 64`
/// (evaluated without overflow) and `start + len_minus_one <= u32::MAX`.
#[inline(always)]
pub unsafe fn set_range_len_unchecked(bitmap: &mut [u64], start: u32, len_minus_one: u32) {
    debug_assert!(start as u64 + len_minus_one as u64 + 1 <= capacity_bits(bitmap.len()));

    let last_bit = start + len_minus_one;
    let first_word = (start / WORD_BITS) as usize;
    let last_word = (last_bit / WORD_BITS) as usize;

    if first_word == last_word {
        // single word: len_minus_one <= 63 - start % 64
        // SAFETY: last_word < bitmap.len()
        unsafe { *bitmap.get_unchecked_mut(first_word) |= run_mask(start, len_minus_one) };
        return;
    }

    // last_bit + 1 wraps to 0 only at 2^32, which is word-aligned and
    // yields the full tail mask either way.
    // SAFETY: first_word < last_word < bitmap.len()
    unsafe {
        fill_span(
            bitmap,
            first_word,
            last_word,
            head_mask(start),
            tail_mask(last_bit.wrapping_add(1)),
        )
    };
}

/// OR `head` into `first`, fill the words strictly between, OR `tail` into `last`.
///
/// # Safety
///
/// `first < last < bitmap.len()`.
#[inline(always)]
unsafe fn fill_span(bitmap: &mut [u64], first: usize, last: usize, head: u64, tail: u64) {
    debug_assert!(first < last && last < bitmap.len());
    // SAFETY: guaranteed by caller
    unsafe {
        *bitmap.get_unchecked_mut(first) |= head;
        bitmap.get_unchecked_mut(first + 1..last).fill(FULL_WORD);
        *bitmap.get_unchecked_mut(last) |= tail;
    }
}
