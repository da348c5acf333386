//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into services. Request handlers
//! never read environment variables.

use crate::constants::{DEFAULT_MAX_BATCH, DEFAULT_MAX_MAGNITUDE, DEFAULT_REPORTS_DIR};
use crate::knowledge::KnowledgeBase;
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    reports_dir: PathBuf,
    knowledge_base_path: Option<PathBuf>,
    max_magnitude: u64,
    max_batch: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if `reports_dir` is empty or `max_magnitude` is zero.
    pub fn new(
        reports_dir: PathBuf,
        knowledge_base_path: Option<PathBuf>,
        max_magnitude: u64,
    ) -> CoreResult<Self> {
        if reports_dir.as_os_str().is_empty() {
            return Err(CoreError::InvalidInput(
                "reports_dir cannot be empty".into(),
            ));
        }

        if max_magnitude == 0 {
            return Err(CoreError::InvalidInput(
                "max_magnitude must be greater than zero".into(),
            ));
        }

        Ok(Self {
            reports_dir,
            knowledge_base_path,
            max_magnitude,
            max_batch: DEFAULT_MAX_BATCH,
        })
    }

    /// Replaces the maximum number of values accepted by one analysis.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if `max_batch` is zero.
    pub fn with_max_batch(mut self, max_batch: usize) -> CoreResult<Self> {
        if max_batch == 0 {
            return Err(CoreError::InvalidInput(
                "max_batch must be greater than zero".into(),
            ));
        }
        self.max_batch = max_batch;
        Ok(self)
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn knowledge_base_path(&self) -> Option<&Path> {
        self.knowledge_base_path.as_deref()
    }

    pub fn max_magnitude(&self) -> u64 {
        self.max_magnitude
    }

    pub fn max_batch(&self) -> usize {
        self.max_batch
    }

    /// Loads the configured knowledge base, falling back to the built-in one.
    pub fn load_knowledge_base(&self) -> CoreResult<KnowledgeBase> {
        match self.knowledge_base_path() {
            Some(path) => {
                tracing::info!("loading knowledge base from {}", path.display());
                KnowledgeBase::from_path(path)
            }
            None => KnowledgeBase::builtin(),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            knowledge_base_path: None,
            max_magnitude: DEFAULT_MAX_MAGNITUDE,
            max_batch: DEFAULT_MAX_BATCH,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the reports directory from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default `reports` directory.
pub fn reports_dir_from_env_value(value: Option<String>) -> PathBuf {
    non_blank(value)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORTS_DIR))
}

/// Parse an optional knowledge base path; blank means "use the built-in knowledge base".
pub fn knowledge_base_path_from_env_value(value: Option<String>) -> Option<PathBuf> {
    non_blank(value).map(PathBuf::from)
}

/// Parse the maximum accepted magnitude from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default.
pub fn max_magnitude_from_env_value(value: Option<String>) -> CoreResult<u64> {
    match non_blank(value) {
        Some(v) => v.parse::<u64>().map_err(|e| {
            CoreError::InvalidInput(format!("MEDCALC_MAX_MAGNITUDE '{}' is invalid: {}", v, e))
        }),
        None => Ok(DEFAULT_MAX_MAGNITUDE),
    }
}

/// Parse the maximum batch length from an optional string value.
///
/// # Arguments
/// * `value` - raw `MEDCALC_MAX_BATCH` value, if set
///
/// # Returns
/// The default batch limit when `value` is `None` or blank, otherwise the parsed value.
pub fn max_batch_from_env_value(value: Option<String>) -> CoreResult<usize> {
    match non_blank(value) {
        Some(v) => v.parse::<usize>().map_err(|e| {
            CoreError::InvalidInput(format!("MEDCALC_MAX_BATCH '{}' is invalid: {}", v, e))
        }),
        None => Ok(DEFAULT_MAX_BATCH),
    }
}
