use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    question: &str,
    answer: &str,
    category: &str,
    format: &OutputFormat,
) -> Result<()> {
    let added = app.store.add(question, answer, category)?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "added": added,
                    "question": question,
                    "answer": answer,
                    "category": category,
                }))?
            );
        }
        OutputFormat::Plain => {
            if added {
                println!("Added '{}' / '{}' to {} (forward and reverse).", question, answer, category);
            } else {
                println!("Not added: '{}' / '{}' already exists (in either direction).", question, answer);
            }
        }
    }

    Ok(())
}
