//! Data models for the flashcard system

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category assigned to cards created without one
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A flashcard with its spaced-repetition scheduling state.
///
/// Identity is the (question, answer) pair within a category; there is no
/// synthetic id. `question` and `answer` are immutable after creation and
/// only [`CardStore::grade`](super::store::CardStore::grade) mutates the
/// scheduling fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub question: String,
    pub answer: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Current interval in days (>= 1)
    #[serde(default = "default_interval")]
    pub interval: i64,
    /// Date of the last review; `None` means never reviewed (always due)
    #[serde(default)]
    pub last_review: Option<NaiveDate>,
    /// Consecutive successful recalls; reset to 0 on failure
    #[serde(default)]
    pub repetitions: u32,
    /// SM-2 easiness factor (>= 1.3)
    #[serde(default = "default_easiness")]
    pub easiness: f64,
    /// Cumulative success counter, never negative
    #[serde(default)]
    pub score: u32,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_interval() -> i64 {
    1
}

fn default_easiness() -> f64 {
    2.5
}

impl Card {
    pub fn new(question: String, answer: String, category: String) -> Self {
        let category = if category.is_empty() {
            default_category()
        } else {
            category
        };
        Self {
            question,
            answer,
            category,
            interval: default_interval(),
            last_review: None,
            repetitions: 0,
            easiness: default_easiness(),
            score: 0,
        }
    }

    /// Ordered identity key used for first-wins dedup on load
    pub fn identity_key(&self) -> String {
        format!("{}:{}", self.question, self.answer)
    }

    /// True if `other` is the same pair or its question/answer reverse
    pub fn is_same_pair(&self, question: &str, answer: &str) -> bool {
        (self.question == question && self.answer == answer)
            || (self.question == answer && self.answer == question)
    }
}

/// Coarse user grading label, mapped to an SM-2 quality by the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewLabel {
    Again,
    Hard,
    Good,
    Easy,
}

impl ReviewLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewLabel::Again => "again",
            ReviewLabel::Hard => "hard",
            ReviewLabel::Good => "good",
            ReviewLabel::Easy => "easy",
        }
    }
}

/// How a study session selects and orders cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyMode {
    /// Only due cards, deterministic order
    Scheduled,
    /// All cards in the category, shuffled, scheduling state untouched
    Practice,
}
