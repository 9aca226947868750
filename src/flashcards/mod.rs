//! Flashcard domain core
//!
//! This module provides:
//! - The `Card` model with its scheduling state
//! - SM-2 spaced repetition algorithm
//! - Due-card selection (scheduled and practice modes)
//! - The `CardStore` owning identity, deduplication, and persistence

pub mod algorithm;
pub mod matching;
pub mod models;
pub mod selector;
pub mod store;

pub use matching::{AnswerMatcher, NormalizingMatcher};
pub use models::{Card, ReviewLabel, StudyMode};
pub use selector::due_cards;
pub use store::{CardStore, StoreError};
