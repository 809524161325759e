//! Word-level mask primitives shared by every range setter.
//!
//! A bitmap is a flat slice of `u64` words with little-endian bit order:
//! bit `i` lives in word `i / 64` at offset `i % 64`.
//!
//! All shift amounts produced here stay in `0..64`. The upper bound of a
//! half-open range is turned into a right-shift with `(-end) mod 64` instead
//! of `64 - end % 64`, so a word-aligned `end` shifts by 0 (keep every bit)
//! rather than by 64.

/// Number of bits in a bitmap word.
pub const WORD_BITS: u32 = u64::BITS;

/// A word with every bit set.
pub const FULL_WORD: u64 = !0u64;

/// Bits at offsets `start % 64 ..= 63`.
#[inline(always)]
pub const fn head_mask(start: u32) -> u64 {
    FULL_WORD << (start % WORD_BITS)
}

/// Bits at offsets `0 .. end % 64`, or the full word when `end` is a
/// multiple of 64.
///
/// `end` is the exclusive upper bound of the range. The shift amount is
/// `(-end) mod 64`; `2^32` is a multiple of 64 so the wrapping negation of
/// a `u32` gives the same residue.
#[inline(always)]
pub const fn tail_mask(end: u32) -> u64 {
    FULL_WORD >> (end.wrapping_neg() % WORD_BITS)
}

/// Bits at offsets `[start % 64, end % 64)` for a range inside one word.
///
/// Only meaningful when `start < end` and both bounds fall in the same word
/// (`start / 64 == (end - 1) / 64`).
#[inline(always)]
pub const fn span_mask(start: u32, end: u32) -> u64 {
    head_mask(start) & tail_mask(end)
}

/// Single-word mask for `len_minus_one + 1` bits starting at `start % 64`.
///
/// Built from the length directly: `len_minus_one + 1` low bits, then moved
/// into place. Requires `start % 64 + len_minus_one <= 63`, which holds
/// whenever the run fits in one word.
///
/// # Panics
///
/// In debug builds, if `len_minus_one >= 64`.
#[inline(always)]
pub(crate) const fn run_mask(start: u32, len_minus_one: u32) -> u64 {
    debug_assert!(len_minus_one < WORD_BITS);
    (FULL_WORD >> (63 - len_minus_one)) << (start % WORD_BITS)
}

/// Number of words needed to hold `bits` bits.
#[inline]
pub const fn words_for_bits(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS as usize)
}

/// Number of set bits across all words.
#[inline]
pub fn cardinality(words: &[u64]) -> usize {
    words.iter().map(|w| w.count_ones() as usize).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_mask() {
        assert_eq!(head_mask(0), u64::MAX);
        assert_eq!(head_mask(63), 1 << 63);
        assert_eq!(head_mask(64), u64::MAX);
        assert_eq!(head_mask(70), u64::MAX << 6);
    }

    #[test]
    fn test_tail_mask_word_aligned() {
        // end on a word boundary keeps the whole word
        assert_eq!(tail_mask(64), u64::MAX);
        assert_eq!(tail_mask(128), u64::MAX);
        assert_eq!(tail_mask(65536), u64::MAX);
    }

    #[test]
    fn test_tail_mask_partial() {
        assert_eq!(tail_mask(1), 1);
        assert_eq!(tail_mask(3), 0b111);
        assert_eq!(tail_mask(63), u64::MAX >> 1);
        assert_eq!(tail_mask(65), 1);
    }

    #[test]
    fn test_tail_mask_top_of_u32() {
        assert_eq!(tail_mask(u32::MAX), u64::MAX >> 1);
    }

    #[test]
    fn test_span_mask() {
        assert_eq!(span_mask(0, 64), u64::MAX);
        assert_eq!(span_mask(0, 1), 1);
        assert_eq!(span_mask(3, 6), 0b111_000);
        assert_eq!(span_mask(63, 64), 1 << 63);
        assert_eq!(span_mask(70, 72), 0b11 << 6);
    }

    #[test]
    fn test_run_mask_matches_span_mask() {
        for start in 0..64u32 {
            for len_minus_one in 0..(64 - start) {
                let end = start + len_minus_one + 1;
                assert_eq!(
                    run_mask(start, len_minus_one),
                    span_mask(start, end),
                    "start={} len_minus_one={}",
                    start,
                    len_minus_one
                );
            }
        }
    }

    #[test]
    fn test_run_mask_offset_words() {
        // only start % 64 matters
        assert_eq!(run_mask(128 + 5, 2), run_mask(5, 2));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_run_mask_rejects_multi_word_length() {
        run_mask(0, WORD_BITS);
    }

    #[test]
    fn test_words_for_bits() {
        assert_eq!(words_for_bits(0), 0);
        assert_eq!(words_for_bits(1), 1);
        assert_eq!(words_for_bits(64), 1);
        assert_eq!(words_for_bits(65), 2);
        assert_eq!(words_for_bits(1 << 16), 1024);
    }

    #[test]
    fn test_cardinality() {
        assert_eq!(cardinality(&[]), 0);
        assert_eq!(cardinality(&[0b1011, u64::MAX, 0]), 67);
    }
}
