pub mod file_storage;

pub use file_storage::{FileCardStorage, StorageError};

use crate::flashcards::Card;

/// Persistence collaborator consumed by the card store.
///
/// One partition per category. Loads degrade to an empty list when the
/// partition is absent or unreadable; only writes can fail.
pub trait CardStorage {
    /// Load every record in a category's partition
    fn load_partition(&self, category: &str) -> Vec<Card>;

    /// Write a category's partition, replacing its previous contents
    fn save_partition(&self, category: &str, cards: &[Card]) -> Result<(), StorageError>;

    /// Category names that currently have a partition
    fn list_partitions(&self) -> Vec<String>;
}
