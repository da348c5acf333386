//! Conversational text for match results.

use crate::knowledge::Condition;
use crate::matcher::{ConditionMatch, MatchResult};
use std::fmt::Write as _;

const MAX_SYMPTOMS_SHOWN: usize = 5;
const MAX_ADVICE_SHOWN: usize = 4;
const MAX_PREVENTION_SHOWN: usize = 3;

/// Renders a match result as the multi-line chat reply.
pub fn render_chat_response(result: &MatchResult<'_>) -> String {
    match result {
        MatchResult::Matched(found) => render_matched(found),
        MatchResult::Unmatched { message, available } => {
            let names: Vec<String> = available.iter().map(|id| id.display_name()).collect();
            format!("{}\n\nI can help with: {}", message, names.join(", "))
        }
    }
}

fn render_matched(found: &ConditionMatch<'_>) -> String {
    let condition = found.condition;
    let mut out = String::new();

    let _ = write!(out, "**{}**\n\n", condition.id.display_name());

    out.push_str("**Symptoms:**\n");
    for symptom in condition.symptoms().take(MAX_SYMPTOMS_SHOWN) {
        let _ = writeln!(out, "• {}", symptom);
    }

    out.push_str("\n**Medical Advice:**\n");
    for (i, advice) in condition.advice().take(MAX_ADVICE_SHOWN).enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, advice);
    }

    out.push_str("\n**Prevention Tips:**\n");
    for tip in condition.prevention().take(MAX_PREVENTION_SHOWN) {
        let _ = writeln!(out, "• {}", tip);
    }

    let _ = write!(out, "\n⚠️ {}", found.disclaimer);
    out
}

/// All advice lines numbered from 1 and joined with newlines.
pub fn numbered_advice(condition: &Condition) -> String {
    condition
        .advice()
        .enumerate()
        .map(|(i, advice)| format!("{}. {}", i + 1, advice))
        .collect::<Vec<_>>()
        .join("\n")
}
