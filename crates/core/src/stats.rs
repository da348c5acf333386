//! Aggregate statistics over a batch of integers.

use crate::{CoreError, CoreResult};
use std::collections::HashMap;

/// Count, mean, median and modes of a non-empty batch.
///
/// `mean` and `median` are unrounded; rounding happens when the summary is turned into its
/// display form ([`crate::report::ReportStatistics`]).
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub total: usize,
    pub mean: f64,
    pub median: f64,
    /// Every value sharing the highest frequency, in order of first appearance.
    pub modes: Vec<i64>,
}

impl StatsSummary {
    /// Summarises `numbers`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::EmptyDataset` when `numbers` is empty.
    pub fn summarize(numbers: &[i64]) -> CoreResult<Self> {
        if numbers.is_empty() {
            return Err(CoreError::EmptyDataset);
        }

        Ok(Self {
            total: numbers.len(),
            mean: mean(numbers),
            median: median(numbers),
            modes: modes(numbers),
        })
    }

    /// Modes joined with `", "`, e.g. `"1, 2"`.
    pub fn modes_display(&self) -> String {
        self.modes
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn mean(numbers: &[i64]) -> f64 {
    let sum: i128 = numbers.iter().copied().map(i128::from).sum();
    sum as f64 / numbers.len() as f64
}

fn median(numbers: &[i64]) -> f64 {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (i128::from(sorted[mid - 1]) + i128::from(sorted[mid])) as f64 / 2.0
    }
}

fn modes(numbers: &[i64]) -> Vec<i64> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    let mut first_seen = Vec::new();
    for &n in numbers {
        let count = counts.entry(n).or_insert(0);
        if *count == 0 {
            first_seen.push(n);
        }
        *count += 1;
    }

    let highest = counts.values().copied().max().unwrap_or(0);
    first_seen
        .into_iter()
        .filter(|n| counts.get(n) == Some(&highest))
        .collect()
}

/// Rounds to two decimal places, half to even: `0.125` becomes `0.12` and `0.625` becomes `0.62`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
