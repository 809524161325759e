//! Run-length encoded pairs over the 16-bit value domain.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::word::{WORD_BITS, words_for_bits};

/// Number of values addressable by a run (`0..=u16::MAX`).
pub const CONTAINER_BITS: usize = 1 << 16;

/// Words in a bitmap covering the whole 16-bit domain.
pub const CONTAINER_WORDS: usize = words_for_bits(CONTAINER_BITS);

/// A run of consecutive values.
///
/// `Run { value, length }` covers `length + 1` values: the closed range
/// `[value, value + length]`. A run therefore always covers at least one
/// value; there is no empty run.
///
/// The layout matches the on-disk roaring run container pair.
///
/// # Example
///
/// ```
/// use rangebits::Run;
///
/// let run = Run::new(3, 2);
/// assert_eq!(run.start(), 3);
/// assert_eq!(run.end(), 6);
/// assert_eq!(run.cardinality(), 3);
/// assert!(run.contains(5));
/// assert!(!run.contains(6));
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Run {
    /// First value in the run
    pub value: u16,
    /// Number of values after `value` (run length minus one)
    pub length: u16,
}

impl Run {
    /// Create a run covering `[value, value + length]`.
    #[inline]
    pub const fn new(value: u16, length: u16) -> Self {
        Self { value, length }
    }

    /// Create a run covering the closed range `[first, last]`.
    ///
    /// Returns `None` if `last < first`.
    #[inline]
    pub const fn from_inclusive(first: u16, last: u16) -> Option<Self> {
        if last < first {
            return None;
        }
        Some(Self::new(first, last - first))
    }

    /// First covered position.
    #[inline]
    pub const fn start(self) -> u32 {
        self.value as u32
    }

    /// Exclusive upper bound, `value + length + 1`.
    ///
    /// May exceed the 16-bit domain (up to `2 * u16::MAX + 1`) when the
    /// pair itself is malformed; setters reject such runs against the
    /// bitmap capacity.
    #[inline]
    pub const fn end(self) -> u32 {
        self.value as u32 + self.length as u32 + 1
    }

    /// Last covered position (inclusive).
    #[inline]
    pub const fn last(self) -> u32 {
        self.value as u32 + self.length as u32
    }

    /// Number of covered positions.
    #[inline]
    pub const fn cardinality(self) -> u32 {
        self.length as u32 + 1
    }

    /// Whether `pos` falls inside the run.
    #[inline]
    pub const fn contains(self, pos: u32) -> bool {
        pos >= self.start() && pos <= self.last()
    }

    /// Whether the run lies within a single bitmap word.
    #[inline]
    pub const fn is_single_word(self) -> bool {
        self.start() / WORD_BITS == self.last() / WORD_BITS
    }
}

impl From<(u16, u16)> for Run {
    #[inline]
    fn from((value, length): (u16, u16)) -> Self {
        Self::new(value, length)
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start(), self.last())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_constants() {
        assert_eq!(CONTAINER_BITS, 65536);
        assert_eq!(CONTAINER_WORDS, 1024);
    }

    #[test]
    fn test_bounds() {
        let run = Run::new(10, 0);
        assert_eq!(run.start(), 10);
        assert_eq!(run.last(), 10);
        assert_eq!(run.end(), 11);
        assert_eq!(run.cardinality(), 1);
    }

    #[test]
    fn test_bounds_top_of_domain() {
        let run = Run::new(u16::MAX, 0);
        assert_eq!(run.end(), CONTAINER_BITS as u32);

        let run = Run::new(0, u16::MAX);
        assert_eq!(run.end(), CONTAINER_BITS as u32);
        assert_eq!(run.cardinality(), 65536);
    }

    #[test]
    fn test_end_does_not_wrap() {
        let run = Run::new(u16::MAX, u16::MAX);
        assert_eq!(run.end(), 131_071);
    }

    #[test]
    fn test_from_inclusive() {
        assert_eq!(Run::from_inclusive(3, 5), Some(Run::new(3, 2)));
        assert_eq!(Run::from_inclusive(7, 7), Some(Run::new(7, 0)));
        assert_eq!(Run::from_inclusive(8, 7), None);
    }

    #[test]
    fn test_contains() {
        let run = Run::new(63, 1);
        assert!(!run.contains(62));
        assert!(run.contains(63));
        assert!(run.contains(64));
        assert!(!run.contains(65));
    }

    #[test]
    fn test_is_single_word() {
        assert!(Run::new(0, 63).is_single_word());
        assert!(!Run::new(0, 64).is_single_word());
        assert!(!Run::new(63, 1).is_single_word());
        assert!(Run::new(64, 0).is_single_word());
    }

    #[test]
    fn test_from_tuple() {
        let run: Run = (70, 5).into();
        assert_eq!(run, Run::new(70, 5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Run::new(70, 5).to_string(), "[70, 75]");
    }

    #[test]
    fn test_ordering_by_value() {
        let mut runs = [Run::new(10, 0), Run::new(0, 2), Run::new(70, 5)];
        runs.sort();
        assert_eq!(runs, [Run::new(0, 2), Run::new(10, 0), Run::new(70, 5)]);
    }
}
