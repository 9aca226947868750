//! Card collection ownership, deduplication, and persistence

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;
use thiserror::Error;

use crate::storage::{CardStorage, StorageError};

use super::algorithm::{calculate_next_review, quality_from_label, Sm2State};
use super::models::{Card, StudyMode};
use super::selector::due_cards;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Answer cannot be empty")]
    EmptyAnswer,

    #[error("Category cannot be empty")]
    EmptyCategory,

    #[error("No card at index {0}")]
    CardNotFound(usize),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Owns the in-memory card collection and writes through a storage
/// collaborator.
///
/// With an active category the store loads and saves only that partition;
/// without one it merges every partition on load and writes each card back
/// to its own category's partition on save. The in-memory collection is
/// authoritative: a failed write surfaces as an error but never rolls back
/// state.
pub struct CardStore {
    storage: Box<dyn CardStorage>,
    category: Option<String>,
    cards: Vec<Card>,
}

impl CardStore {
    /// Create a store and load its cards.
    ///
    /// Loading never fails: missing or unreadable partitions contribute no
    /// cards (the storage layer logs the degradation), so startup always
    /// produces a valid, possibly empty, collection.
    pub fn new(storage: Box<dyn CardStorage>, category: Option<String>) -> Self {
        let mut store = Self {
            storage,
            category,
            cards: Vec::new(),
        };
        store.reload();
        store
    }

    /// Reload cards from storage, replacing the in-memory collection.
    ///
    /// Within a load the first occurrence of an identity key wins;
    /// later duplicates, even across partition files, are dropped.
    pub fn reload(&mut self) {
        let partitions = match &self.category {
            Some(category) => vec![category.clone()],
            None => self.storage.list_partitions(),
        };

        let mut seen: HashSet<String> = HashSet::new();
        let mut cards = Vec::new();
        for partition in &partitions {
            for card in self.storage.load_partition(partition) {
                if seen.insert(card.identity_key()) {
                    cards.push(card);
                } else {
                    log::debug!("Dropping duplicate card '{}' on load", card.identity_key());
                }
            }
        }

        log::debug!("Loaded {} cards from {} partition(s)", cards.len(), partitions.len());
        self.cards = cards;
    }

    /// All cards currently in memory, read-only
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards to study in `category` for the given mode
    pub fn due_cards(&self, category: &str, today: NaiveDate, mode: StudyMode) -> Vec<&Card> {
        due_cards(&self.cards, category, today, mode)
    }

    /// Distinct categories of the in-memory cards, sorted
    pub fn categories(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.cards.iter().map(|c| c.category.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// Index of the card with exactly this (question, answer) pair
    pub fn position_of(&self, question: &str, answer: &str) -> Option<usize> {
        self.cards
            .iter()
            .position(|c| c.question == question && c.answer == answer)
    }

    /// Add a question/answer pair to a category.
    ///
    /// Creates the forward card and its reverse together, both with
    /// default scheduling state, and persists the category partition.
    /// Returns `Ok(false)` without mutating anything when the pair (in
    /// either direction) already exists; empty inputs are validation
    /// errors.
    pub fn add(&mut self, question: &str, answer: &str, category: &str) -> Result<bool> {
        if question.is_empty() {
            return Err(StoreError::EmptyQuestion);
        }
        if answer.is_empty() {
            return Err(StoreError::EmptyAnswer);
        }
        if category.is_empty() {
            return Err(StoreError::EmptyCategory);
        }

        if self.is_duplicate(question, answer) {
            return Ok(false);
        }

        let forward = Card::new(question.to_string(), answer.to_string(), category.to_string());
        let reverse = Card::new(answer.to_string(), question.to_string(), category.to_string());
        self.cards.push(forward);
        self.cards.push(reverse);

        self.save_category(category)?;
        Ok(true)
    }

    /// Grade the card at `index` with a coarse label and persist.
    ///
    /// Applies the SM-2 result, sets `last_review` to `today`, and adjusts
    /// the score (+1 for quality >= 4, saturating -1 for quality <= 2).
    /// The card is updated in memory before the write, so a storage
    /// failure leaves the grade applied and reports the error.
    pub fn grade(&mut self, index: usize, label: &str, today: NaiveDate) -> Result<()> {
        let card = self
            .cards
            .get_mut(index)
            .ok_or(StoreError::CardNotFound(index))?;

        let quality = quality_from_label(label);
        let state = Sm2State {
            easiness: card.easiness,
            interval: card.interval,
            repetitions: card.repetitions,
        };
        let (next, _next_due) = calculate_next_review(quality, &state, today);

        card.easiness = next.easiness;
        card.interval = next.interval;
        card.repetitions = next.repetitions;
        card.last_review = Some(today);

        if quality >= 4 {
            card.score += 1;
        } else if quality <= 2 {
            card.score = card.score.saturating_sub(1);
        }

        let category = card.category.clone();
        self.save_category(&category)
    }

    /// Persist the in-memory cards.
    ///
    /// With an active category only that partition is written; otherwise
    /// every category present in memory is written to its own partition.
    pub fn save(&self) -> Result<()> {
        match &self.category {
            Some(category) => self.save_category(category),
            None => {
                let mut by_category: BTreeMap<&str, Vec<&Card>> = BTreeMap::new();
                for card in &self.cards {
                    by_category.entry(card.category.as_str()).or_default().push(card);
                }
                for (category, cards) in by_category {
                    let owned: Vec<Card> = cards.into_iter().cloned().collect();
                    self.storage.save_partition(category, &owned)?;
                }
                Ok(())
            }
        }
    }

    fn save_category(&self, category: &str) -> Result<()> {
        let cards: Vec<Card> = self
            .cards
            .iter()
            .filter(|c| c.category == category)
            .cloned()
            .collect();

        if let Err(err) = self.storage.save_partition(category, &cards) {
            log::warn!("Failed to save category '{}': {}", category, err);
            return Err(err.into());
        }
        Ok(())
    }

    /// Symmetric duplicate check: the pair is blocked once either the
    /// forward or the reverse card exists anywhere in the collection.
    fn is_duplicate(&self, question: &str, answer: &str) -> bool {
        self.cards.iter().any(|c| c.is_same_pair(question, answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileCardStorage;
    use tempfile::TempDir;

    fn create_test_store(category: Option<&str>) -> (CardStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileCardStorage::new(temp_dir.path().to_path_buf()).unwrap();
        let store = CardStore::new(Box::new(storage), category.map(String::from));
        (store, temp_dir)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_creates_forward_and_reverse() {
        let (mut store, _temp) = create_test_store(Some("German"));

        let added = store.add("Hund", "dog", "German").unwrap();
        assert!(added);
        assert_eq!(store.cards().len(), 2);

        assert!(store.position_of("Hund", "dog").is_some());
        assert!(store.position_of("dog", "Hund").is_some());
        assert!(store.cards().iter().all(|c| c.category == "German"));
    }

    #[test]
    fn test_add_rejects_duplicate_and_reverse() {
        let (mut store, _temp) = create_test_store(Some("German"));

        assert!(store.add("Hund", "dog", "German").unwrap());
        assert!(!store.add("Hund", "dog", "German").unwrap());
        assert!(!store.add("dog", "Hund", "German").unwrap());
        assert_eq!(store.cards().len(), 2);
    }

    #[test]
    fn test_add_validates_empty_fields() {
        let (mut store, _temp) = create_test_store(Some("German"));

        assert!(matches!(store.add("", "a", "c"), Err(StoreError::EmptyQuestion)));
        assert!(matches!(store.add("q", "", "c"), Err(StoreError::EmptyAnswer)));
        assert!(matches!(store.add("q", "a", ""), Err(StoreError::EmptyCategory)));
        assert!(store.cards().is_empty());
    }

    #[test]
    fn test_round_trip_through_storage() {
        let temp_dir = TempDir::new().unwrap();
        {
            let storage = FileCardStorage::new(temp_dir.path().to_path_buf()).unwrap();
            let mut store = CardStore::new(Box::new(storage), Some("German".to_string()));
            store.add("Hund", "dog", "German").unwrap();
            store.grade(0, "easy", date(2026, 1, 10)).unwrap();
        }

        let storage = FileCardStorage::new(temp_dir.path().to_path_buf()).unwrap();
        let store = CardStore::new(Box::new(storage), Some("German".to_string()));

        assert_eq!(store.cards().len(), 2);
        let graded = &store.cards()[store.position_of("Hund", "dog").unwrap()];
        assert_eq!(graded.repetitions, 1);
        assert_eq!(graded.interval, 1);
        assert_eq!(graded.score, 1);
        assert_eq!(graded.last_review, Some(date(2026, 1, 10)));
        assert!((graded.easiness - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_load_merges_all_partitions_with_dedup() {
        let temp_dir = TempDir::new().unwrap();
        {
            let storage = FileCardStorage::new(temp_dir.path().to_path_buf()).unwrap();
            let mut german = CardStore::new(Box::new(storage), Some("German".to_string()));
            german.add("Hund", "dog", "German").unwrap();

            let storage = FileCardStorage::new(temp_dir.path().to_path_buf()).unwrap();
            let mut spanish = CardStore::new(Box::new(storage), Some("Spanish".to_string()));
            spanish.add("perro", "dog", "Spanish").unwrap();
        }

        // A duplicate identity in a partition that loads after "German"
        // (partitions load in sorted name order)
        let storage = FileCardStorage::new(temp_dir.path().to_path_buf()).unwrap();
        let mut dup = Card::new("Hund".to_string(), "dog".to_string(), "Imports".to_string());
        dup.score = 99;
        storage.save_partition("Imports", &[dup]).unwrap();

        let storage = FileCardStorage::new(temp_dir.path().to_path_buf()).unwrap();
        let store = CardStore::new(Box::new(storage), None);

        // 2 German + 2 Spanish, later duplicate dropped (first occurrence wins)
        assert_eq!(store.cards().len(), 4);
        let kept = &store.cards()[store.position_of("Hund", "dog").unwrap()];
        assert_ne!(kept.score, 99);
        assert_eq!(store.categories(), vec!["German", "Spanish"]);
    }

    #[test]
    fn test_dedup_first_wins_follows_partition_sort_order() {
        let temp_dir = TempDir::new().unwrap();
        {
            let storage = FileCardStorage::new(temp_dir.path().to_path_buf()).unwrap();
            let mut german = CardStore::new(Box::new(storage), Some("German".to_string()));
            german.add("Hund", "dog", "German").unwrap();
        }

        // "Archive" sorts before "German", so its copy is the first
        // occurrence of the identity and wins the dedup
        let storage = FileCardStorage::new(temp_dir.path().to_path_buf()).unwrap();
        let mut dup = Card::new("Hund".to_string(), "dog".to_string(), "Archive".to_string());
        dup.score = 99;
        storage.save_partition("Archive", &[dup]).unwrap();

        let storage = FileCardStorage::new(temp_dir.path().to_path_buf()).unwrap();
        let store = CardStore::new(Box::new(storage), None);

        // Archive copy + German reverse card; the German forward is dropped
        assert_eq!(store.cards().len(), 2);
        let kept = &store.cards()[store.position_of("Hund", "dog").unwrap()];
        assert_eq!(kept.score, 99);
        assert_eq!(kept.category, "Archive");
        assert_eq!(store.categories(), vec!["Archive", "German"]);
    }

    #[test]
    fn test_grade_easy_scenario() {
        let (mut store, _temp) = create_test_store(Some("German"));
        store.add("Hund", "dog", "German").unwrap();
        let idx = store.position_of("Hund", "dog").unwrap();

        store.grade(idx, "easy", date(2026, 1, 10)).unwrap();

        let card = &store.cards()[idx];
        assert!((card.easiness - 2.6).abs() < 1e-9);
        assert_eq!(card.repetitions, 1);
        assert_eq!(card.interval, 1);
        assert_eq!(card.score, 1);
        assert_eq!(card.last_review, Some(date(2026, 1, 10)));
    }

    #[test]
    fn test_grade_again_scenario() {
        let (mut store, _temp) = create_test_store(Some("German"));
        store.add("Hund", "dog", "German").unwrap();
        let idx = store.position_of("Hund", "dog").unwrap();

        store.grade(idx, "again", date(2026, 1, 10)).unwrap();

        let card = &store.cards()[idx];
        assert_eq!(card.repetitions, 0);
        assert_eq!(card.interval, 1);
        // Score floors at zero
        assert_eq!(card.score, 0);
    }

    #[test]
    fn test_grade_unknown_label_defaults_to_good() {
        let (mut store, _temp) = create_test_store(Some("German"));
        store.add("Hund", "dog", "German").unwrap();
        let idx = store.position_of("Hund", "dog").unwrap();

        store.grade(idx, "xyz", date(2026, 1, 10)).unwrap();

        let card = &store.cards()[idx];
        assert_eq!(card.repetitions, 1);
        // Quality 3 leaves the score untouched
        assert_eq!(card.score, 0);
    }

    #[test]
    fn test_grade_only_touches_target_card() {
        let (mut store, _temp) = create_test_store(Some("German"));
        store.add("Hund", "dog", "German").unwrap();
        let forward = store.position_of("Hund", "dog").unwrap();
        let reverse = store.position_of("dog", "Hund").unwrap();

        store.grade(forward, "easy", date(2026, 1, 10)).unwrap();

        // The reverse card is scheduled independently
        let untouched = &store.cards()[reverse];
        assert_eq!(untouched.repetitions, 0);
        assert!(untouched.last_review.is_none());
    }

    #[test]
    fn test_grade_failure_keeps_in_memory_state() {
        struct FailingStorage;

        impl CardStorage for FailingStorage {
            fn load_partition(&self, _category: &str) -> Vec<Card> {
                vec![Card::new("q".to_string(), "a".to_string(), "c".to_string())]
            }

            fn save_partition(&self, _category: &str, _cards: &[Card]) -> std::result::Result<(), StorageError> {
                Err(StorageError::Io(std::io::Error::from(
                    std::io::ErrorKind::PermissionDenied,
                )))
            }

            fn list_partitions(&self) -> Vec<String> {
                vec!["c".to_string()]
            }
        }

        let mut store = CardStore::new(Box::new(FailingStorage), Some("c".to_string()));
        let result = store.grade(0, "easy", date(2026, 1, 10));

        assert!(result.is_err());
        // The grade stays applied; the caller decides how to retry/report
        assert_eq!(store.cards()[0].repetitions, 1);
        assert_eq!(store.cards()[0].score, 1);
    }

    #[test]
    fn test_save_without_active_category_writes_all_partitions() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileCardStorage::new(temp_dir.path().to_path_buf()).unwrap();
        let mut store = CardStore::new(Box::new(storage), None);

        store.add("Hund", "dog", "German").unwrap();
        store.add("perro", "dog", "Spanish").unwrap();
        store.save().unwrap();

        let storage = FileCardStorage::new(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(storage.load_partition("German").len(), 2);
        assert_eq!(storage.load_partition("Spanish").len(), 2);
    }

    #[test]
    fn test_due_cards_scheduled_mode() {
        let (mut store, _temp) = create_test_store(Some("German"));
        store.add("Hund", "dog", "German").unwrap();
        store.add("Katze", "cat", "German").unwrap();

        let idx = store.position_of("Katze", "cat").unwrap();
        store.grade(idx, "easy", date(2026, 1, 10)).unwrap();

        // The graded card is due again one day later, not the same day
        let due = store.due_cards("German", date(2026, 1, 10), StudyMode::Scheduled);
        assert_eq!(due.len(), 3);
        let due = store.due_cards("German", date(2026, 1, 11), StudyMode::Scheduled);
        assert_eq!(due.len(), 4);
    }
}
