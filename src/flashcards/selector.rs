//! Due-card selection for study sessions

use chrono::NaiveDate;
use rand::seq::SliceRandom;

use super::algorithm::is_due;
use super::models::{Card, StudyMode};

/// Select the cards to study from `cards` for a category.
///
/// Scheduled mode returns the due subset in input order; practice mode
/// returns every card in the category, freshly shuffled, without looking
/// at scheduling state. An empty result is a normal outcome ("nothing
/// due"), not an error.
pub fn due_cards<'a>(
    cards: &'a [Card],
    category: &str,
    today: NaiveDate,
    mode: StudyMode,
) -> Vec<&'a Card> {
    let mut selected: Vec<&Card> = cards
        .iter()
        .filter(|card| card.category == category)
        .filter(|card| match mode {
            StudyMode::Scheduled => is_due(card.last_review, card.interval, today),
            StudyMode::Practice => true,
        })
        .collect();

    if mode == StudyMode::Practice {
        selected.shuffle(&mut rand::thread_rng());
    }

    selected
}
