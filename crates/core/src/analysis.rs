//! Batch analysis: classify every number and summarise the batch.

use crate::config::CoreConfig;
use crate::constants::DEFAULT_MAX_BATCH;
use crate::numbers::NumberRecord;
use crate::report::ReportStatistics;
use crate::stats::StatsSummary;
use crate::{CoreError, CoreResult};

/// Result of analysing one batch of numbers.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub results: Vec<NumberRecord>,
    pub summary: StatsSummary,
}

impl Analysis {
    pub fn statistics(&self) -> ReportStatistics {
        ReportStatistics::from(&self.summary)
    }
}

/// Number analysis bounded by the configured maximum magnitude and batch length.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    max_magnitude: u64,
    max_batch: usize,
}

impl AnalysisService {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            max_magnitude: cfg.max_magnitude(),
            max_batch: cfg.max_batch(),
        }
    }

    /// Service with the given magnitude limit and the default batch limit.
    pub fn with_max_magnitude(max_magnitude: u64) -> Self {
        Self {
            max_magnitude,
            max_batch: DEFAULT_MAX_BATCH,
        }
    }

    pub fn with_max_batch(mut self, max_batch: usize) -> Self {
        self.max_batch = max_batch;
        self
    }

    /// Classifies and summarises `numbers`.
    ///
    /// # Errors
    ///
    /// - `CoreError::EmptyDataset` if `numbers` is empty
    /// - `CoreError::BatchTooLarge` if there are more numbers than the batch limit allows
    /// - `CoreError::MagnitudeTooLarge` for the first number whose absolute value exceeds the
    ///   configured maximum; nothing is classified in that case
    pub fn analyze(&self, numbers: &[i64]) -> CoreResult<Analysis> {
        if numbers.is_empty() {
            return Err(CoreError::EmptyDataset);
        }

        if numbers.len() > self.max_batch {
            return Err(CoreError::BatchTooLarge {
                len: numbers.len(),
                limit: self.max_batch,
            });
        }

        if let Some(&value) = numbers
            .iter()
            .find(|n| n.unsigned_abs() > self.max_magnitude)
        {
            return Err(CoreError::MagnitudeTooLarge {
                value,
                limit: self.max_magnitude,
            });
        }

        let results = numbers.iter().copied().map(NumberRecord::classify).collect();
        let summary = StatsSummary::summarize(numbers)?;

        tracing::debug!("analysed {} numbers", numbers.len());

        Ok(Analysis { results, summary })
    }
}
