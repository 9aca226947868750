//! Spaced-repetition flashcard engine and card store.
//!
//! The library is split into two layers:
//! - [`flashcards`] — the domain core: the `Card` model, the SM-2
//!   scheduling policy, due-set selection, and the `CardStore` that owns
//!   card identity and deduplication.
//! - [`storage`] — the persistence boundary: a `CardStorage` trait plus a
//!   file-backed implementation writing one JSON file per category.

pub mod flashcards;
pub mod storage;

pub use flashcards::{
    Card, CardStore, ReviewLabel, StoreError, StudyMode,
};
pub use storage::{CardStorage, FileCardStorage, StorageError};
