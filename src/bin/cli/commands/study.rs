use std::io::{self, BufRead, Write};

use anyhow::Result;

use mneme_lib::flashcards::{AnswerMatcher, NormalizingMatcher};
use mneme_lib::StudyMode;

use crate::app::App;

/// Interactive study loop.
///
/// Scheduled mode walks the due set and grades each card; practice mode
/// cycles the whole category shuffled, never touching scheduling state,
/// and offers another round when the pool is exhausted (each round gets a
/// fresh shuffle).
pub fn run(app: &mut App, category: &str, practice: bool) -> Result<()> {
    let matcher = NormalizingMatcher;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        let mode = if practice {
            StudyMode::Practice
        } else {
            StudyMode::Scheduled
        };

        // Card identities, so grading can mutate through the store
        let pool: Vec<(String, String)> = app
            .store
            .due_cards(category, App::today(), mode)
            .into_iter()
            .map(|c| (c.question.clone(), c.answer.clone()))
            .collect();

        if pool.is_empty() {
            println!("Nothing due in '{}'. Come back later!", category);
            return Ok(());
        }

        println!(
            "{} cards in '{}' ({} mode). Empty line quits.\n",
            pool.len(),
            category,
            if practice { "practice" } else { "scheduled" }
        );

        for (question, answer) in &pool {
            println!("Q: {}", question);
            let Some(user_answer) = prompt(&mut input, "Your answer: ")? else {
                return Ok(());
            };

            if matcher.matches(&user_answer, answer) {
                println!("Correct!");
            } else {
                println!("The answer was: {}", answer);
            }

            if !practice {
                let Some(label) = prompt(&mut input, "Grade [again/hard/good/easy]: ")? else {
                    return Ok(());
                };
                if let Some(index) = app.store.position_of(question, answer) {
                    // Unknown labels grade as "good"
                    if let Err(err) = app.store.grade(index, &label, App::today()) {
                        eprintln!("Warning: changes not saved ({})", err);
                    }
                }
            }
            println!();
        }

        if !practice {
            return Ok(());
        }

        let Some(again) = prompt(&mut input, "Practice another round? [y/N]: ")? else {
            return Ok(());
        };
        if !again.eq_ignore_ascii_case("y") {
            return Ok(());
        }
        println!();
    }
}

/// Read one trimmed line; `None` means quit (empty line or EOF)
fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim().to_lowercase();
    if line.is_empty() {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
