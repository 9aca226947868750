use anyhow::Result;

use mneme_lib::StudyMode;

use crate::app::App;
use crate::OutputFormat;

struct CategoryStats {
    category: String,
    total: usize,
    due: usize,
    score: u32,
    avg_easiness: f64,
}

fn collect(app: &App, category: &str) -> CategoryStats {
    let today = App::today();
    let cards: Vec<_> = app
        .store
        .cards()
        .iter()
        .filter(|c| c.category == category)
        .collect();

    let total = cards.len();
    let due = app.store.due_cards(category, today, StudyMode::Scheduled).len();
    let score = cards.iter().map(|c| c.score).sum();
    let avg_easiness = if total == 0 {
        0.0
    } else {
        cards.iter().map(|c| c.easiness).sum::<f64>() / total as f64
    };

    CategoryStats {
        category: category.to_string(),
        total,
        due,
        score,
        avg_easiness,
    }
}

pub fn run(app: &App, category: Option<&str>, format: &OutputFormat) -> Result<()> {
    let categories = match category {
        Some(name) => vec![name.to_string()],
        None => app.store.categories(),
    };

    let stats: Vec<CategoryStats> = categories.iter().map(|c| collect(app, c)).collect();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = stats
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "category": s.category,
                        "totalCards": s.total,
                        "dueCards": s.due,
                        "score": s.score,
                        "avgEasiness": s.avg_easiness,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if stats.is_empty() {
                println!("No cards yet.");
                return Ok(());
            }

            println!(
                "{:<20} {:>6} {:>6} {:>7} {:>9}",
                "Category", "Cards", "Due", "Score", "Easiness"
            );
            for s in &stats {
                println!(
                    "{:<20} {:>6} {:>6} {:>7} {:>9.2}",
                    s.category, s.total, s.due, s.score, s.avg_easiness
                );
            }
        }
    }

    Ok(())
}
