#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no data: statistics need at least one number")]
    EmptyDataset,
    #[error("number {value} exceeds the maximum supported magnitude of {limit}")]
    MagnitudeTooLarge { value: i64, limit: u64 },
    #[error("{len} numbers exceeds the maximum batch size of {limit}")]
    BatchTooLarge { len: usize, limit: usize },

    #[error("failed to read knowledge base {path}: {source}", path = path.display())]
    KnowledgeBaseRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse knowledge base YAML: {0}")]
    KnowledgeBaseParse(serde_yaml::Error),
    #[error("duplicate condition id in knowledge base: {0}")]
    DuplicateCondition(String),
    #[error("condition '{condition}' has no {field}")]
    EmptyConditionField {
        condition: String,
        field: &'static str,
    },
    #[error("knowledge base defines no conditions")]
    EmptyKnowledgeBase,
}

impl CoreError {
    /// True for errors caused by the caller's input rather than by the service.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidInput(_)
                | CoreError::EmptyDataset
                | CoreError::MagnitudeTooLarge { .. }
                | CoreError::BatchTooLarge { .. }
        )
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
