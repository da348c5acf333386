//! Condition knowledge base.
//!
//! The knowledge base is an ordered, read-only list of condition records loaded once at startup,
//! either from the built-in YAML document or from a file named in configuration. Order is
//! significant: the matcher breaks ties by position, so the records are kept in a `Vec` in
//! document order and never in a hash map.

use crate::constants::BUILTIN_KNOWLEDGE_BASE;
use crate::{CoreError, CoreResult};
use medcalc_types::{ConditionId, NonEmptyText};
use std::collections::HashSet;
use std::path::Path;

/// One condition with its symptom phrases, advice and prevention tips, in authored order.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Condition {
    pub id: ConditionId,
    pub symptoms: Vec<NonEmptyText>,
    pub advice: Vec<NonEmptyText>,
    pub prevention: Vec<NonEmptyText>,
}

impl Condition {
    pub fn symptoms(&self) -> impl Iterator<Item = &str> {
        self.symptoms.iter().map(NonEmptyText::as_str)
    }

    pub fn advice(&self) -> impl Iterator<Item = &str> {
        self.advice.iter().map(NonEmptyText::as_str)
    }

    pub fn prevention(&self) -> impl Iterator<Item = &str> {
        self.prevention.iter().map(NonEmptyText::as_str)
    }
}

#[derive(serde::Deserialize)]
struct KnowledgeDocument {
    conditions: Vec<Condition>,
}

/// Immutable, ordered collection of conditions.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    conditions: Vec<Condition>,
}

impl KnowledgeBase {
    /// Loads the knowledge base compiled into the binary.
    pub fn builtin() -> CoreResult<Self> {
        Self::from_yaml_str(BUILTIN_KNOWLEDGE_BASE)
    }

    /// Loads a knowledge base from a YAML file on disk.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::KnowledgeBaseRead` if the file cannot be read, and any error
    /// [`Self::from_yaml_str`] returns for its contents.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| CoreError::KnowledgeBaseRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_yaml_str(&contents)
    }

    /// Parses and validates a YAML knowledge base document.
    ///
    /// # Errors
    ///
    /// - `KnowledgeBaseParse` for malformed YAML, blank strings or ill-formed ids
    /// - `EmptyKnowledgeBase` if no conditions are defined
    /// - `DuplicateCondition` if an id appears twice
    /// - `EmptyConditionField` if a condition has no symptoms, advice or prevention tips
    pub fn from_yaml_str(yaml: &str) -> CoreResult<Self> {
        let document: KnowledgeDocument =
            serde_yaml::from_str(yaml).map_err(CoreError::KnowledgeBaseParse)?;
        Self::new(document.conditions)
    }

    /// Builds a knowledge base from records, enforcing unique ids and non-empty lists.
    pub fn new(conditions: Vec<Condition>) -> CoreResult<Self> {
        if conditions.is_empty() {
            return Err(CoreError::EmptyKnowledgeBase);
        }

        let mut seen = HashSet::new();
        for condition in &conditions {
            if !seen.insert(condition.id.as_str()) {
                return Err(CoreError::DuplicateCondition(condition.id.to_string()));
            }

            let fields = [
                ("symptoms", condition.symptoms.is_empty()),
                ("advice", condition.advice.is_empty()),
                ("prevention", condition.prevention.is_empty()),
            ];
            if let Some((field, _)) = fields.into_iter().find(|(_, empty)| *empty) {
                return Err(CoreError::EmptyConditionField {
                    condition: condition.id.to_string(),
                    field,
                });
            }
        }

        tracing::debug!("knowledge base loaded with {} conditions", conditions.len());

        Ok(Self { conditions })
    }

    /// Finds a condition by its exact identifier.
    pub fn lookup(&self, id: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.id.as_str() == id)
    }

    /// All condition identifiers in knowledge-base order.
    pub fn list_ids(&self) -> Vec<&ConditionId> {
        self.conditions.iter().map(|c| &c.id).collect()
    }

    /// All conditions in knowledge-base order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TINY: &str = r#"
conditions:
  - id: alpha
    symptoms: [one]
    advice: [rest]
    prevention: [wash hands]
  - id: beta_gamma
    symptoms: [two, three]
    advice: [drink water]
    prevention: [sleep]
"#;

    #[test]
    fn builtin_loads_in_document_order() {
        let kb = KnowledgeBase::builtin().unwrap();
        let ids: Vec<&str> = kb.list_ids().into_iter().map(|id| id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "malaria",
                "typhoid",
                "nausea",
                "std",
                "common_cold",
                "diarrhea",
                "headache"
            ]
        );
    }

    #[test]
    fn builtin_conditions_have_content() {
        let kb = KnowledgeBase::builtin().unwrap();
        let malaria = kb.lookup("malaria").unwrap();
        assert_eq!(malaria.symptoms().count(), 8);
        assert_eq!(malaria.advice().count(), 6);
        assert_eq!(malaria.prevention().count(), 5);
        assert_eq!(malaria.symptoms().last(), Some("body aches"));
    }

    #[test]
    fn lookup_miss_returns_none() {
        let kb = KnowledgeBase::from_yaml_str(TINY).unwrap();
        assert!(kb.lookup("gamma").is_none());
        assert!(kb.lookup("beta_gamma").is_some());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = r#"
conditions:
  - id: alpha
    symptoms: [one]
    advice: [rest]
    prevention: [sleep]
  - id: alpha
    symptoms: [two]
    advice: [rest]
    prevention: [sleep]
"#;
        let err = KnowledgeBase::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateCondition(id) if id == "alpha"));
    }

    #[test]
    fn empty_lists_are_rejected() {
        let yaml = r#"
conditions:
  - id: alpha
    symptoms: [one]
    advice: []
    prevention: [sleep]
"#;
        let err = KnowledgeBase::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            err,
            CoreError::EmptyConditionField { field: "advice", .. }
        ));
    }

    #[test]
    fn malformed_ids_and_blank_phrases_fail_to_parse() {
        let bad_id = "conditions:\n  - id: Bad Id\n    symptoms: [a]\n    advice: [b]\n    prevention: [c]\n";
        assert!(matches!(
            KnowledgeBase::from_yaml_str(bad_id),
            Err(CoreError::KnowledgeBaseParse(_))
        ));

        let blank = "conditions:\n  - id: ok\n    symptoms: ['  ']\n    advice: [b]\n    prevention: [c]\n";
        assert!(matches!(
            KnowledgeBase::from_yaml_str(blank),
            Err(CoreError::KnowledgeBaseParse(_))
        ));
    }

    #[test]
    fn no_conditions_is_an_error() {
        assert!(matches!(
            KnowledgeBase::from_yaml_str("conditions: []"),
            Err(CoreError::EmptyKnowledgeBase)
        ));
    }

    #[test]
    fn from_path_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kb.yaml");
        fs::write(&path, TINY).unwrap();

        let kb = KnowledgeBase::from_path(&path).unwrap();
        assert_eq!(kb.len(), 2);
    }

    #[test]
    fn from_path_missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = KnowledgeBase::from_path(&temp.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, CoreError::KnowledgeBaseRead { .. }));
    }
}
