//! Free-text condition matching.
//!
//! Matching is plain substring search over the lowercased input, with no tokenisation or
//! stemming. A condition named in the text wins outright; otherwise the condition whose symptom
//! phrases appear most often wins. Ties go to the condition listed first in the knowledge base.

use crate::constants::{DISCLAIMER, UNMATCHED_MESSAGE};
use crate::knowledge::{Condition, KnowledgeBase};
use medcalc_types::ConditionId;

/// Outcome of matching a piece of free text against the knowledge base.
#[derive(Debug, Clone)]
pub enum MatchResult<'kb> {
    Matched(ConditionMatch<'kb>),
    Unmatched {
        message: &'static str,
        available: Vec<&'kb ConditionId>,
    },
}

/// A selected condition together with how it was selected.
#[derive(Debug, Clone)]
pub struct ConditionMatch<'kb> {
    pub condition: &'kb Condition,
    pub disclaimer: &'static str,
    /// Number of symptom phrases found; `None` when the condition was named directly.
    pub confidence: Option<usize>,
}

impl ConditionMatch<'_> {
    pub fn condition_id(&self) -> &ConditionId {
        &self.condition.id
    }

    /// Text such as `"2 symptom(s) matched"` for symptom-overlap matches.
    pub fn confidence_label(&self) -> Option<String> {
        self.confidence
            .map(|count| format!("{} symptom(s) matched", count))
    }
}

/// Matches user input against a borrowed knowledge base.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'kb> {
    knowledge: &'kb KnowledgeBase,
}

impl<'kb> Matcher<'kb> {
    /// Creates a matcher over `knowledge`.
    ///
    /// # Arguments
    /// * `knowledge` - the knowledge base to search; its condition order decides ties
    ///
    /// # Returns
    /// A `Matcher` that borrows `knowledge`. Matching never mutates it, so one knowledge base
    /// can serve any number of concurrent matchers.
    pub fn new(knowledge: &'kb KnowledgeBase) -> Self {
        Self { knowledge }
    }

    /// Picks the best condition for `input`, or reports that nothing matched.
    pub fn match_input(&self, input: &str) -> MatchResult<'kb> {
        let text = input.to_lowercase();

        if let Some(condition) = self.direct_match(&text) {
            return MatchResult::Matched(ConditionMatch {
                condition,
                disclaimer: DISCLAIMER,
                confidence: None,
            });
        }

        if let Some((condition, score)) = self.best_symptom_overlap(&text) {
            return MatchResult::Matched(ConditionMatch {
                condition,
                disclaimer: DISCLAIMER,
                confidence: Some(score),
            });
        }

        MatchResult::Unmatched {
            message: UNMATCHED_MESSAGE,
            available: self.knowledge.list_ids(),
        }
    }

    /// First condition, in knowledge-base order, whose name appears in the text.
    fn direct_match(&self, text: &str) -> Option<&'kb Condition> {
        self.knowledge
            .conditions()
            .iter()
            .find(|c| text.contains(&c.id.phrase()))
    }

    /// Condition with the strictly highest symptom count; earlier conditions win ties.
    fn best_symptom_overlap(&self, text: &str) -> Option<(&'kb Condition, usize)> {
        let mut best: Option<(&'kb Condition, usize)> = None;

        for condition in self.knowledge.conditions() {
            let score = symptom_overlap(condition, text);
            if score == 0 {
                continue;
            }
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((condition, score)),
            }
        }

        best
    }
}

/// Number of the condition's symptom phrases that occur in `text`.
pub fn symptom_overlap(condition: &Condition, text: &str) -> usize {
    condition
        .symptoms()
        .filter(|symptom| text.contains(*symptom))
        .count()
}

impl KnowledgeBase {
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> KnowledgeBase {
        KnowledgeBase::builtin().expect("built-in knowledge base loads")
    }

    fn matched_id(result: &MatchResult<'_>) -> Option<String> {
        match result {
            MatchResult::Matched(m) => Some(m.condition_id().to_string()),
            MatchResult::Unmatched { .. } => None,
        }
    }

    #[test]
    fn every_condition_matches_its_own_name() {
        let kb = builtin();
        let matcher = kb.matcher();
        for id in kb.list_ids() {
            let result = matcher.match_input(&id.phrase());
            assert_eq!(matched_id(&result).as_deref(), Some(id.as_str()));
        }
    }

    #[test]
    fn direct_name_match_has_no_confidence() {
        let kb = builtin();
        match kb.matcher().match_input("What should I do for Malaria?") {
            MatchResult::Matched(m) => {
                assert_eq!(m.condition_id().as_str(), "malaria");
                assert_eq!(m.confidence, None);
                assert_eq!(m.confidence_label(), None);
                assert_eq!(m.disclaimer, DISCLAIMER);
            }
            other => panic!("expected match, got {:?}", other),
        }
    }

    #[test]
    fn highest_symptom_overlap_wins() {
        let kb = builtin();
        match kb.matcher().match_input("I have fever and chills") {
            MatchResult::Matched(m) => {
                assert_eq!(m.condition_id().as_str(), "malaria");
                assert_eq!(m.confidence, Some(2));
                assert_eq!(m.confidence_label().as_deref(), Some("2 symptom(s) matched"));
            }
            other => panic!("expected match, got {:?}", other),
        }
    }

    #[test]
    fn ties_go_to_the_earlier_condition() {
        // "sweating" scores 1 for both malaria and nausea; malaria is listed first.
        let kb = builtin();
        let result = kb.matcher().match_input("lots of sweating");
        assert_eq!(matched_id(&result).as_deref(), Some("malaria"));
    }

    #[test]
    fn direct_name_beats_symptom_overlap() {
        // "nausea" is a condition name, so it wins even though "fever chills" favours malaria.
        let kb = builtin();
        let result = kb.matcher().match_input("fever, chills and nausea");
        assert_eq!(matched_id(&result).as_deref(), Some("nausea"));
    }

    #[test]
    fn substring_matching_is_not_word_aware() {
        // "rash" hides inside "crashing"; typhoid is picked up by that substring alone.
        let kb = builtin();
        let result = kb.matcher().match_input("my computer keeps crashing");
        assert_eq!(matched_id(&result).as_deref(), Some("typhoid"));
    }

    #[test]
    fn unknown_text_lists_all_conditions() {
        let kb = builtin();
        match kb.matcher().match_input("banana") {
            MatchResult::Unmatched { message, available } => {
                assert_eq!(message, UNMATCHED_MESSAGE);
                assert_eq!(available, kb.list_ids());
            }
            other => panic!("expected no match, got {:?}", other),
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        let kb = builtin();
        let result = kb.matcher().match_input("SORE THROAT and RUNNY NOSE");
        assert_eq!(matched_id(&result).as_deref(), Some("common_cold"));
    }

    #[test]
    fn symptom_overlap_counts_each_phrase_once() {
        let kb = builtin();
        let malaria = kb.lookup("malaria").unwrap();
        assert_eq!(symptom_overlap(malaria, "fever fever fever"), 1);
        assert_eq!(symptom_overlap(malaria, "fever with nausea and vomiting"), 3);
    }
}
