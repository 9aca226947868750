//! SM-2 Spaced Repetition Algorithm
//!
//! Implementation of the SuperMemo 2 algorithm for calculating
//! optimal review intervals based on user performance.
//!
//! Quality ratings (0-5):
//! - 0: Complete blackout, no recall
//! - 1: Incorrect, but upon seeing answer, remembered
//! - 2: Incorrect, but answer seemed easy to recall
//! - 3: Correct response with serious difficulty
//! - 4: Correct response after hesitation
//! - 5: Perfect response with no hesitation
//!
//! The policy is total: quality is clamped into 0-5 and every numeric
//! invariant (easiness floor, minimum interval) is enforced internally,
//! so no input produces an error.

use chrono::{Duration, NaiveDate};

/// Minimum easiness factor allowed
const MIN_EASINESS: f64 = 1.3;

/// Scheduling state fed to and produced by the SM-2 recurrence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sm2State {
    pub easiness: f64,
    pub interval: i64,
    pub repetitions: u32,
}

impl Default for Sm2State {
    fn default() -> Self {
        Self {
            easiness: 2.5,
            interval: 1,
            repetitions: 0,
        }
    }
}

/// Calculate the next review interval and easiness using SM-2
///
/// # Arguments
/// * `quality` - Quality rating (0-5, clamped)
/// * `state` - Current scheduling state
/// * `today` - The review date
///
/// # Returns
/// The updated state and the date the card is next due.
pub fn calculate_next_review(
    quality: i32,
    state: &Sm2State,
    today: NaiveDate,
) -> (Sm2State, NaiveDate) {
    let quality = quality.clamp(0, 5);

    // EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02)), floored at 1.3.
    // Applied on failures too, so repeated misses keep lowering easiness.
    let miss = f64::from(5 - quality);
    let easiness = (state.easiness + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASINESS);

    let (repetitions, interval) = if quality < 3 {
        // Incorrect response resets the repetition streak
        (0, 1)
    } else {
        let repetitions = state.repetitions + 1;
        let interval = match repetitions {
            1 => 1,
            2 => 6,
            _ => (state.interval as f64 * easiness).round() as i64,
        };
        (repetitions, interval.max(1))
    };

    let next_due = today + Duration::days(interval);

    (
        Sm2State {
            easiness,
            interval,
            repetitions,
        },
        next_due,
    )
}

/// Map a coarse user label to an SM-2 quality score
///
/// Unrecognized labels default to 3 (good).
pub fn quality_from_label(label: &str) -> i32 {
    match label {
        "again" => 0, // Complete blackout
        "hard" => 2,  // Answer looked familiar
        "good" => 3,  // Correct with difficulty
        "easy" => 5,  // Perfect recall
        _ => 3,
    }
}

/// Check if a card is due for review
///
/// Date-only comparison: a card reviewed on `last_review` with interval
/// `n` becomes due at midnight `n` days later. `None` means never
/// reviewed and therefore always due.
pub fn is_due(last_review: Option<NaiveDate>, interval: i64, today: NaiveDate) -> bool {
    match last_review {
        None => true,
        Some(last) => last + Duration::days(interval) <= today,
    }
}
