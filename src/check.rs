//! Verification that a word sequence is in ascending order.

use crate::error::{SortError, SortResult};
use itertools::Itertools;
use rayon::prelude::*;

/// Inputs at least this long are checked in parallel
const PARALLEL_THRESHOLD: usize = 100_000;

/// Check that `words` is non-decreasing.
///
/// On failure reports the 1-based line of the first word that is smaller
/// than its predecessor.
pub fn check_sorted(words: &[String]) -> SortResult<()> {
    let first_break = if words.len() >= PARALLEL_THRESHOLD {
        words
            .par_windows(2)
            .position_first(|pair| pair[0] > pair[1])
    } else {
        words.iter().tuple_windows().position(|(a, b)| a > b)
    };

    match first_break {
        Some(index) => Err(SortError::NotSorted { line: index + 2 }),
        None => Ok(()),
    }
}
