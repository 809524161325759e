//! Errors reported by the range setters and run-list drivers.

use thiserror::Error;

use crate::run::Run;

/// A bit range that cannot be applied to the destination bitmap.
///
/// Both variants are bounds violations: the range does not lie within
/// `[0, capacity]`. `Inverted` is the case where `start` lies past `end`,
/// kept apart so the message can name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The range extends past the last bit of the bitmap.
    #[error("bit range [{start}, {end}) exceeds bitmap capacity of {capacity} bits")]
    OutOfRange {
        /// First bit of the range
        start: u64,
        /// Exclusive upper bound of the range
        end: u64,
        /// Bitmap capacity in bits (`words * 64`)
        capacity: u64,
    },

    /// The half-open range has `start > end`.
    #[error("bit range is inverted: start {start} > end {end}")]
    Inverted {
        /// First bit of the range
        start: u64,
        /// Exclusive upper bound of the range
        end: u64,
    },
}

impl RangeError {
    /// First bit of the rejected range.
    pub fn start(&self) -> u64 {
        match *self {
            RangeError::OutOfRange { start, .. } | RangeError::Inverted { start, .. } => start,
        }
    }

    /// Exclusive upper bound of the rejected range.
    pub fn end(&self) -> u64 {
        match *self {
            RangeError::OutOfRange { end, .. } | RangeError::Inverted { end, .. } => end,
        }
    }
}

/// A run in a run list that could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("run {index} {run} rejected: {source}")]
pub struct UnionError {
    /// Position of the run in the input slice
    pub index: usize,
    /// The offending run
    pub run: Run,
    /// Why the run was rejected
    #[source]
    pub source: RangeError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = RangeError::OutOfRange {
            start: 60,
            end: 130,
            capacity: 128,
        };
        assert_eq!(
            err.to_string(),
            "bit range [60, 130) exceeds bitmap capacity of 128 bits"
        );
        assert_eq!(err.end(), 130);
    }

    #[test]
    fn test_inverted_message() {
        let err = RangeError::Inverted { start: 9, end: 3 };
        assert_eq!(err.to_string(), "bit range is inverted: start 9 > end 3");
    }

    #[test]
    fn test_variants_carry_bounds() {
        let out = RangeError::OutOfRange {
            start: 60,
            end: 130,
            capacity: 128,
        };
        assert_eq!((out.start(), out.end()), (60, 130));

        let inverted = RangeError::Inverted { start: 9, end: 3 };
        assert_eq!((inverted.start(), inverted.end()), (9, 3));
    }

    #[test]
    fn test_union_error_message() {
        let err = UnionError {
            index: 2,
            run: Run::new(120, 10),
            source: RangeError::OutOfRange {
                start: 120,
                end: 131,
                capacity: 128,
            },
        };
        assert_eq!(
            err.to_string(),
            "run 2 [120, 130] rejected: bit range [120, 131) exceeds bitmap capacity of 128 bits"
        );
    }

    #[test]
    fn test_union_error_source() {
        use std::error::Error as _;

        let source = RangeError::Inverted { start: 1, end: 0 };
        let err = UnionError {
            index: 0,
            run: Run::new(0, 0),
            source,
        };
        assert!(err.source().is_some());
    }
}
