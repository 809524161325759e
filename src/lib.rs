//! # Rangebits
//!
//! Materialize run-length encoded ranges into dense bitmaps.
//!
//! A run container stores a set of 16-bit values as `(value, length)` pairs;
//! a bitmap container stores one bit per value in 64-bit words. Merging a
//! run container into a bitmap container means setting every bit each run
//! covers. This crate provides that primitive and its run-list driver.
//!
//! ## Quick Start
//!
//! ```
//! use rangebits::{CONTAINER_WORDS, Run, cardinality, union_runs};
//!
//! let mut bitmap = vec![0u64; CONTAINER_WORDS];
//! let runs = [Run::new(0, 2), Run::new(10, 0), Run::new(70, 5)];
//!
//! union_runs(&mut bitmap, &runs).unwrap();
//! assert_eq!(cardinality(&bitmap), 10);
//! assert_eq!(bitmap[0], 0b100_0000_0111);
//! assert_eq!(bitmap[1], 0b11_1111 << 6);
//! ```
//!
//! ## Variants
//!
//! Every setter and driver variant produces the same bitmap; they differ only
//! in the instructions they run:
//! - Half-open setter ([`set_range`]) vs length-offset setter ([`set_range_len`])
//! - Unroll factor 1, 2 or 4 in [`union_runs_with`]
//!
//! Checked entry points return an error instead of writing past the bitmap.
//! The `_unchecked` functions skip validation for trusted input.
//!
//! ## Features
//!
//! - `std` - Implement `std::error::Error` through `thiserror/std`
//! - `serde` - Serialization for [`Run`] and [`UnionConfig`]
//! - `cli` - Build the `rangebits` command-line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod error;
mod run;
mod setter;
mod union;
mod word;

pub use error::{RangeError, UnionError};
pub use run::{CONTAINER_BITS, CONTAINER_WORDS, Run};
pub use setter::{
    capacity_bits, set_range, set_range_len, set_range_len_unchecked, set_range_unchecked,
};
pub use union::{check_runs, union_runs, union_runs_unchecked, union_runs_with};
pub use word::{
    FULL_WORD, WORD_BITS, cardinality, head_mask, span_mask, tail_mask, words_for_bits,
};

/// Which range setter a driver calls for each run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SetterKind {
    /// `set_range(value, value + length + 1)`
    HalfOpen,
    /// `set_range_len(value, length)`
    #[default]
    LengthOffset,
}

/// How many runs a driver processes per loop iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Unroll {
    /// One run per iteration
    #[default]
    One,
    /// Two runs per iteration, then a scalar tail
    Two,
    /// Four runs per iteration, then a scalar tail
    Four,
}

impl Unroll {
    /// Runs per iteration.
    pub const fn factor(self) -> usize {
        match self {
            Unroll::One => 1,
            Unroll::Two => 2,
            Unroll::Four => 4,
        }
    }
}

/// Configuration for [`union_runs_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnionConfig {
    /// Setter called per run (default: length-offset)
    pub setter: SetterKind,
    /// Loop unroll factor (default: 1)
    pub unroll: Unroll,
}

impl UnionConfig {
    /// Every setter/unroll combination.
    pub const ALL: [UnionConfig; 6] = [
        UnionConfig::new(SetterKind::HalfOpen, Unroll::One),
        UnionConfig::new(SetterKind::HalfOpen, Unroll::Two),
        UnionConfig::new(SetterKind::HalfOpen, Unroll::Four),
        UnionConfig::new(SetterKind::LengthOffset, Unroll::One),
        UnionConfig::new(SetterKind::LengthOffset, Unroll::Two),
        UnionConfig::new(SetterKind::LengthOffset, Unroll::Four),
    ];

    /// Create a configuration.
    pub const fn new(setter: SetterKind, unroll: Unroll) -> Self {
        Self { setter, unroll }
    }
}
