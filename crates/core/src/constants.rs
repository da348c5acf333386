//! Constants used throughout the medcalc core crate.
//!
//! Fixed user-facing strings and defaults live here so that the HTTP layer, the CLI and the
//! tests all agree on them.

/// Disclaimer appended to every matched condition.
pub const DISCLAIMER: &str = "This is general information only. Please consult a healthcare professional for proper diagnosis and treatment.";

/// Message returned when neither a condition name nor any symptom is recognised.
pub const UNMATCHED_MESSAGE: &str =
    "Could not identify condition. Please describe your symptoms or mention a condition.";

/// Error text for a condition lookup miss.
pub const CONDITION_NOT_FOUND: &str = "Condition not found";

/// Default directory for saved reports when no explicit directory is configured.
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Largest accepted absolute value for numbers submitted for analysis.
pub const DEFAULT_MAX_MAGNITUDE: u64 = 10_000_000;

/// Largest number of values one analysis accepts.
pub const DEFAULT_MAX_BATCH: usize = 1_000;

/// Built-in knowledge base, compiled into the binary.
pub const BUILTIN_KNOWLEDGE_BASE: &str = include_str!("../knowledge/conditions.yaml");
