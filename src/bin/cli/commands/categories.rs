use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let categories = app.store.categories();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = categories
                .iter()
                .map(|name| {
                    let count = app
                        .store
                        .cards()
                        .iter()
                        .filter(|c| &c.category == name)
                        .count();
                    serde_json::json!({ "category": name, "cards": count })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if categories.is_empty() {
                println!("No categories found.");
                return Ok(());
            }

            for name in &categories {
                let count = app
                    .store
                    .cards()
                    .iter()
                    .filter(|c| &c.category == name)
                    .count();
                println!("{:<30} {} cards", name, count);
            }
        }
    }

    Ok(())
}
