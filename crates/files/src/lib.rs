//! medcalc report storage
//!
//! This crate owns the reports directory of the number analysis service.
//!
//! ## Storage Model
//!
//! - Reports are flat text files directly inside one directory; there are no subdirectories
//! - A requested filename is reduced to its base name, so no request can name a path outside
//!   the directory
//! - Saved reports always end in `.txt`
//! - Saving opens the file in truncate mode; the last writer wins and there is no locking
//!
//! ```text
//! reports/
//! ├── number_analysis_report.txt
//! └── batch-2.txt
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use medcalc_files::ReportStore;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ReportStore::new(Path::new("reports"));
//! let saved = store.save(Some("../../etc/passwd"), "NUMBER ANALYZER PRO+ REPORT\n")?;
//! assert!(saved.starts_with("reports"));
//! # Ok(())
//! # }
//! ```

mod store;

pub use store::{sanitize_download_name, sanitize_report_name, ReportStore};

/// Filename used when a save request does not name one.
pub const DEFAULT_REPORT_FILENAME: &str = "number_analysis_report.txt";

/// Extension enforced on saved reports.
pub const REPORT_EXTENSION: &str = ".txt";

/// Errors that can occur during report storage operations
#[derive(Debug, thiserror::Error)]
pub enum ReportStoreError {
    /// The requested filename has no usable base name (empty, `.` or `..`)
    #[error("Invalid report filename: {0:?}")]
    InvalidFilename(String),

    /// No report with this name exists in the reports directory
    #[error("File not found")]
    NotFound(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
