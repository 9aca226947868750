mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mneme-cli", about = "Spaced-repetition flashcard CLI", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Command-line grading label, mapped onto the domain label
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum LabelArg {
    Again,
    Hard,
    Good,
    Easy,
}

impl From<LabelArg> for mneme_lib::ReviewLabel {
    fn from(label: LabelArg) -> Self {
        match label {
            LabelArg::Again => Self::Again,
            LabelArg::Hard => Self::Hard,
            LabelArg::Good => Self::Good,
            LabelArg::Easy => Self::Easy,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Add a card pair (forward and reverse) to a category
    Add {
        /// Question text
        question: String,
        /// Answer text
        answer: String,
        /// Category to file the pair under
        #[arg(long)]
        category: String,
    },

    /// List categories with card counts
    Categories,

    /// List cards due for review today
    Due {
        /// Restrict to one category
        #[arg(long)]
        category: Option<String>,
    },

    /// Run an interactive study session
    Study {
        /// Category to study
        category: String,
        /// Cycle every card regardless of schedule, without grading
        #[arg(long)]
        practice: bool,
    },

    /// Grade a single card without a session
    Grade {
        /// Question text of the card
        question: String,
        /// Answer text of the card
        answer: String,
        /// How well the card was recalled
        label: LabelArg,
        /// Category the card lives in
        #[arg(long)]
        category: String,
    },

    /// Show review statistics
    Stats {
        /// Restrict to one category
        #[arg(long)]
        category: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Add {
            question,
            answer,
            category,
        } => {
            let mut app = app::App::new(cli.data_dir.as_deref(), Some(&category))?;
            commands::add::run(&mut app, &question, &answer, &category, &cli.format)?;
        }
        Command::Categories => {
            let app = app::App::new(cli.data_dir.as_deref(), None)?;
            commands::categories::run(&app, &cli.format)?;
        }
        Command::Due { category } => {
            let app = app::App::new(cli.data_dir.as_deref(), category.as_deref())?;
            commands::due::run(&app, category.as_deref(), &cli.format)?;
        }
        Command::Study { category, practice } => {
            let mut app = app::App::new(cli.data_dir.as_deref(), Some(&category))?;
            commands::study::run(&mut app, &category, practice)?;
        }
        Command::Grade {
            question,
            answer,
            label,
            category,
        } => {
            let mut app = app::App::new(cli.data_dir.as_deref(), Some(&category))?;
            commands::grade::run(&mut app, &question, &answer, label.into(), &cli.format)?;
        }
        Command::Stats { category } => {
            let app = app::App::new(cli.data_dir.as_deref(), category.as_deref())?;
            commands::stats::run(&app, category.as_deref(), &cli.format)?;
        }
    }

    Ok(())
}
