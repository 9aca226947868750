use anyhow::Result;

use mneme_lib::{Card, StudyMode};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, category: Option<&str>, format: &OutputFormat) -> Result<()> {
    let today = App::today();

    let categories = match category {
        Some(name) => vec![name.to_string()],
        None => app.store.categories(),
    };

    let mut due: Vec<&Card> = Vec::new();
    for name in &categories {
        due.extend(app.store.due_cards(name, today, StudyMode::Scheduled));
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = due
                .iter()
                .map(|card| {
                    serde_json::json!({
                        "question": card.question,
                        "category": card.category,
                        "interval": card.interval,
                        "lastReview": card.last_review.map(|d| d.to_string()),
                        "repetitions": card.repetitions,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing due.");
                return Ok(());
            }

            let question_width = due
                .iter()
                .map(|c| c.question.chars().count())
                .max()
                .unwrap_or(8)
                .clamp(8, 40);

            println!(
                "{:<q_w$} {:<15} {:>8} {}",
                "Question", "Category", "Interval", "Last review",
                q_w = question_width
            );
            for card in &due {
                let question = truncate(&card.question, question_width);
                let last = card
                    .last_review
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "never".to_string());
                println!(
                    "{:<q_w$} {:<15} {:>7}d {}",
                    question, card.category, card.interval, last,
                    q_w = question_width
                );
            }

            println!("\n{} cards due", due.len());
        }
    }

    Ok(())
}

/// Shorten to `width` characters, counting chars so multi-byte questions
/// never get cut mid-character
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
