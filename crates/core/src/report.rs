//! Plain-text report rendering.
//!
//! The layout is fixed; a saved report read back from disk must equal [`render_report`]'s
//! output byte for byte:
//!
//! ```text
//! NUMBER ANALYZER PRO+ REPORT
//!
//! 6   Even | Prime: False | Perfect: True | Positive
//!
//! === STATISTICS SUMMARY ===
//! Total: 1
//! Mean: 6.00
//! Median: 6.00
//! Mode(s): 6
//! ```

use crate::numbers::NumberRecord;
use crate::stats::{round2, StatsSummary};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use utoipa::ToSchema;

pub const REPORT_TITLE: &str = "NUMBER ANALYZER PRO+ REPORT";
pub const STATISTICS_HEADING: &str = "=== STATISTICS SUMMARY ===";
pub const NO_NUMBERS_LINE: &str = "No numbers were entered.";

/// Display form of a [`StatsSummary`]: rounded mean and median, modes as a joined string.
///
/// This is what clients receive from an analysis and send back when saving a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportStatistics {
    pub total: usize,
    pub mean: f64,
    pub median: f64,
    pub modes: String,
}

impl From<&StatsSummary> for ReportStatistics {
    fn from(summary: &StatsSummary) -> Self {
        Self {
            total: summary.total,
            mean: round2(summary.mean),
            median: round2(summary.median),
            modes: summary.modes_display(),
        }
    }
}

fn capitalised_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// One report body line, without the trailing newline.
pub fn render_record_line(record: &NumberRecord) -> String {
    format!(
        "{}   {} | Prime: {} | Perfect: {} | {}",
        record.value,
        record.parity,
        capitalised_bool(record.is_prime),
        capitalised_bool(record.is_perfect),
        record.sign
    )
}

/// Renders the statistics footer, including its heading.
pub fn render_statistics(statistics: &ReportStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", STATISTICS_HEADING);
    let _ = writeln!(out, "Total: {}", statistics.total);
    let _ = writeln!(out, "Mean: {:.2}", statistics.mean);
    let _ = writeln!(out, "Median: {:.2}", statistics.median);
    let _ = writeln!(out, "Mode(s): {}", statistics.modes);
    out
}

/// Renders a complete report.
///
/// An empty `records` slice produces the "no numbers" line; the statistics footer is only
/// written when `statistics` is given.
pub fn render_report(records: &[NumberRecord], statistics: Option<&ReportStatistics>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", REPORT_TITLE);
    out.push('\n');

    if records.is_empty() {
        let _ = writeln!(out, "{}", NO_NUMBERS_LINE);
    } else {
        for record in records {
            let _ = writeln!(out, "{}", render_record_line(record));
        }
    }

    if let Some(statistics) = statistics {
        out.push('\n');
        out.push_str(&render_statistics(statistics));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(values: &[i64]) -> Vec<NumberRecord> {
        values.iter().copied().map(NumberRecord::classify).collect()
    }

    #[test]
    fn full_report_layout() {
        let values = [6, -3, 7, 7];
        let summary = StatsSummary::summarize(&values).unwrap();
        let statistics = ReportStatistics::from(&summary);

        let text = render_report(&records(&values), Some(&statistics));

        let expected = "NUMBER ANALYZER PRO+ REPORT\n\
\n\
6   Even | Prime: False | Perfect: True | Positive\n\
-3   Odd | Prime: False | Perfect: False | Negative\n\
7   Odd | Prime: True | Perfect: False | Positive\n\
7   Odd | Prime: True | Perfect: False | Positive\n\
\n\
=== STATISTICS SUMMARY ===\n\
Total: 4\n\
Mean: 4.25\n\
Median: 6.50\n\
Mode(s): 7\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_report_without_statistics() {
        let text = render_report(&[], None);
        assert_eq!(text, "NUMBER ANALYZER PRO+ REPORT\n\nNo numbers were entered.\n");
    }

    #[test]
    fn statistics_are_rounded_for_display() {
        let summary = StatsSummary::summarize(&[1, 2, 2]).unwrap();
        let statistics = ReportStatistics::from(&summary);
        assert_eq!(statistics.mean, 1.67);
        assert_eq!(statistics.median, 2.0);
        assert!(render_statistics(&statistics).contains("Mean: 1.67\nMedian: 2.00\n"));
    }

    #[test]
    fn mean_ties_round_to_even() {
        let eighth = ReportStatistics::from(&StatsSummary::summarize(&[0, 0, 0, 0, 0, 0, 0, 1]).unwrap());
        assert_eq!(eighth.mean, 0.12);
        assert!(render_statistics(&eighth).contains("Mean: 0.12\n"));

        let five_eighths =
            ReportStatistics::from(&StatsSummary::summarize(&[0, 0, 0, 0, 0, 1, 2, 2]).unwrap());
        assert_eq!(five_eighths.mean, 0.62);
        assert!(render_statistics(&five_eighths).contains("Mean: 0.62\n"));
    }

    #[test]
    fn multimodal_footer_lists_all_modes() {
        let summary = StatsSummary::summarize(&[1, 1, 2, 2]).unwrap();
        let text = render_statistics(&ReportStatistics::from(&summary));
        assert!(text.ends_with("Mode(s): 1, 2\n"));
    }
}
