//! Run-list union drivers.
//!
//! A driver ORs every run of a run list into a destination bitmap, one
//! setter call per run, in order. Runs are applied independently: adjacent
//! or overlapping runs are not coalesced, and overlap simply ORs the same
//! bits twice.
//!
//! - [`union_runs`] checks and applies each run in turn, stopping at the
//!   first run that does not fit.
//! - [`union_runs_with`] validates the whole list up front, then runs the
//!   configured setter with the configured unroll factor. On error the
//!   bitmap is untouched.
//! - [`union_runs_unchecked`] skips validation.

use crate::error::UnionError;
use crate::run::Run;
use crate::setter::{check_range, set_range, set_range_len_unchecked, set_range_unchecked};
use crate::{SetterKind, UnionConfig, Unroll};

/// OR every run of `runs` into `bitmap`.
///
/// Each run is applied as `set_range(bitmap, value, value + length + 1)`.
///
/// # Errors
///
/// Returns [`UnionError`] for the first run that extends past
/// `bitmap.len() * 64`. Runs before it have already been applied; runs
/// after it have not.
///
/// # Example
///
/// ```
/// use rangebits::{Run, union_runs};
///
/// let mut bitmap = [0u64; 2];
/// union_runs(&mut bitmap, &[Run::new(63, 1)]).unwrap();
/// assert_eq!(bitmap, [1 << 63, 1]);
///
/// let err = union_runs(&mut bitmap, &[Run::new(0, 0), Run::new(120, 8)]).unwrap_err();
/// assert_eq!(err.index, 1);
/// ```
pub fn union_runs(bitmap: &mut [u64], runs: &[Run]) -> Result<(), UnionError> {
    for (index, &run) in runs.iter().enumerate() {
        set_range(bitmap, run.start(), run.end()).map_err(|source| UnionError {
            index,
            run,
            source,
        })?;
    }
    Ok(())
}

/// Check that every run of `runs` fits in `bitmap`.
///
/// Returns the first run that does not.
pub fn check_runs(bitmap: &[u64], runs: &[Run]) -> Result<(), UnionError> {
    let words = bitmap.len();
    for (index, &run) in runs.iter().enumerate() {
        check_range(words, run.start() as u64, run.end() as u64).map_err(|source| UnionError {
            index,
            run,
            source,
        })?;
    }
    Ok(())
}

/// OR every run of `runs` into `bitmap` using the setter and unroll factor
/// chosen by `config`.
///
/// All configurations produce identical bitmaps.
///
/// # Errors
///
/// Returns [`UnionError`] for the first run that extends past
/// `bitmap.len() * 64`. The whole list is validated before any bit is
/// written, so the bitmap is unchanged on error.
///
/// # Example
///
/// ```
/// use rangebits::{Run, SetterKind, UnionConfig, Unroll, union_runs_with};
///
/// let runs = [Run::new(0, 2), Run::new(10, 0), Run::new(70, 5)];
/// let mut half_open = [0u64; 2];
/// let mut unrolled = [0u64; 2];
///
/// union_runs_with(&mut half_open, &runs, UnionConfig::new(SetterKind::HalfOpen, Unroll::One)).unwrap();
/// union_runs_with(&mut unrolled, &runs, UnionConfig::new(SetterKind::LengthOffset, Unroll::Four)).unwrap();
/// assert_eq!(half_open, unrolled);
/// ```
pub fn union_runs_with(
    bitmap: &mut [u64],
    runs: &[Run],
    config: UnionConfig,
) -> Result<(), UnionError> {
    check_runs(bitmap, runs)?;
    // SAFETY: every run fits in the bitmap (checked above)
    unsafe { union_runs_unchecked(bitmap, runs, config) };
    Ok(())
}

/// OR every run of `runs` into `bitmap` without bounds checking.
///
/// # Safety
///
/// Every run must satisfy `run.value + run.length + 1 <= bitmap.len() * 64`,
/// e.g. as established by [`check_runs`]. Any run list over a bitmap of
/// [`CONTAINER_WORDS`](crate::CONTAINER_WORDS) words whose runs stay inside
/// the 16-bit domain qualifies.
pub unsafe fn union_runs_unchecked(bitmap: &mut [u64], runs: &[Run], config: UnionConfig) {
    // SAFETY: forwarded from the caller
    unsafe {
        match config.setter {
            SetterKind::HalfOpen => drive::<HalfOpen>(bitmap, runs, config.unroll),
            SetterKind::LengthOffset => drive::<LengthOffset>(bitmap, runs, config.unroll),
        }
    }
}

/// Per-run setter used by the drivers.
trait RunSetter {
    /// # Safety
    ///
    /// `run.end() <= bitmap.len() * 64`.
    unsafe fn apply(bitmap: &mut [u64], run: Run);
}

struct HalfOpen;

impl RunSetter for HalfOpen {
    #[inline(always)]
    unsafe fn apply(bitmap: &mut [u64], run: Run) {
        // SAFETY: start < end <= capacity by the trait contract
        unsafe { set_range_unchecked(bitmap, run.start(), run.end()) }
    }
}

struct LengthOffset;

impl RunSetter for LengthOffset {
    #[inline(always)]
    unsafe fn apply(bitmap: &mut [u64], run: Run) {
        // SAFETY: start + length + 1 <= capacity by the trait contract
        unsafe { set_range_len_unchecked(bitmap, run.start(), run.length as u32) }
    }
}

/// # Safety
///
/// Every run fits in `bitmap`.
#[inline(always)]
unsafe fn drive<S: RunSetter>(bitmap: &mut [u64], runs: &[Run], unroll: Unroll) {
    // SAFETY: forwarded from the caller
    unsafe {
        match unroll {
            Unroll::One => drive_x1::<S>(bitmap, runs),
            Unroll::Two => drive_x2::<S>(bitmap, runs),
            Unroll::Four => drive_x4::<S>(bitmap, runs),
        }
    }
}

#[inline(never)]
unsafe fn drive_x1<S: RunSetter>(bitmap: &mut [u64], runs: &[Run]) {
    for &run in runs {
        // SAFETY: forwarded from the caller
        unsafe { S::apply(bitmap, run) };
    }
}

#[inline(never)]
unsafe fn drive_x2<S: RunSetter>(bitmap: &mut [u64], runs: &[Run]) {
    let mut pairs = runs.chunks_exact(2);
    for pair in &mut pairs {
        // SAFETY: forwarded from the caller
        unsafe {
            S::apply(bitmap, pair[0]);
            S::apply(bitmap, pair[1]);
        }
    }
    // SAFETY: forwarded from the caller
    unsafe { drive_x1::<S>(bitmap, pairs.remainder()) };
}

#[inline(never)]
unsafe fn drive_x4<S: RunSetter>(bitmap: &mut [u64], runs: &[Run]) {
    let mut quads = runs.chunks_exact(4);
    for quad in &mut quads {
        // SAFETY: forwarded from the caller
        unsafe {
            S::apply(bitmap, quad[0]);
            S::apply(bitmap, quad[1]);
            S::apply(bitmap, quad[2]);
            S::apply(bitmap, quad[3]);
        }
    }
    // SAFETY: forwarded from the caller
    unsafe { drive_x1::<S>(bitmap, quads.remainder()) };
}
