use anyhow::{bail, Result};

use mneme_lib::ReviewLabel;

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    question: &str,
    answer: &str,
    label: ReviewLabel,
    format: &OutputFormat,
) -> Result<()> {
    let Some(index) = app.store.position_of(question, answer) else {
        bail!("No card '{}' / '{}' in this category", question, answer);
    };

    app.store.grade(index, label.as_str(), App::today())?;
    let card = &app.store.cards()[index];

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "question": card.question,
                    "label": label.as_str(),
                    "interval": card.interval,
                    "easiness": card.easiness,
                    "repetitions": card.repetitions,
                    "score": card.score,
                    "lastReview": card.last_review.map(|d| d.to_string()),
                }))?
            );
        }
        OutputFormat::Plain => {
            println!(
                "Graded '{}' as {}: next review in {} day(s).",
                card.question, label.as_str(), card.interval
            );
        }
    }

    Ok(())
}
