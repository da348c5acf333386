//! # medcalc Core
//!
//! Core logic for the two medcalc services:
//! - the condition knowledge base and the free-text symptom matcher
//! - per-number classification, batch statistics and plain-text report rendering
//!
//! **No API concerns**: HTTP servers, routing and report storage belong in `api-rest` and
//! `medcalc-files`.

pub mod analysis;
pub mod chat;
pub mod config;
pub mod constants;
pub mod error;
pub mod knowledge;
pub mod matcher;
pub mod numbers;
pub mod report;
pub mod stats;

pub use analysis::{Analysis, AnalysisService};
pub use chat::{numbered_advice, render_chat_response};
pub use config::CoreConfig;
pub use constants::*;
pub use error::{CoreError, CoreResult};
pub use knowledge::{Condition, KnowledgeBase};
pub use matcher::{ConditionMatch, MatchResult, Matcher};
pub use medcalc_types::{title_case, ConditionId, NonEmptyText};
pub use numbers::{is_perfect, is_prime, NumberRecord, Parity, Sign};
pub use report::{render_report, ReportStatistics};
pub use stats::StatsSummary;
