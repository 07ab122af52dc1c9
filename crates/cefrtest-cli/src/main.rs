//! cefrtest CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cefrtest", version, about = "CEFR English-proficiency scoring engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a completed sitting
    Score {
        /// Bank spec: "builtin", or a path to a .toml bank or directory
        #[arg(long, default_value = "builtin")]
        bank: String,

        /// Bank id, required when the spec holds more than one bank
        #[arg(long)]
        bank_id: Option<String>,

        /// JSON answer map, keyed by question id
        #[arg(long)]
        answers: PathBuf,

        /// Keep only questions at this CEFR level
        #[arg(long)]
        level: Option<String>,

        /// Keep only questions for this skill area
        #[arg(long)]
        skill: Option<String>,

        /// Cap the number of questions administered
        #[arg(long)]
        count: Option<usize>,

        /// Output directory
        #[arg(long, default_value = "./cefrtest-results")]
        output: PathBuf,

        /// Output format: json, html, csv, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Override the recorded time spent, in seconds
        #[arg(long)]
        time_spent: Option<u64>,
    },

    /// Compare two result files to track progress
    Compare {
        /// Baseline result JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current result JSON
        #[arg(long)]
        current: PathBuf,

        /// Percentage points a skill must move to count as a trend
        #[arg(long, default_value = "5")]
        threshold: u32,

        /// Exit code 1 if any skill declined
        #[arg(long)]
        fail_on_decline: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// List available banks, or the questions in one
    List {
        /// Bank spec: "builtin", or a path to a .toml bank or directory
        #[arg(long, default_value = "builtin")]
        bank: String,

        /// Show the questions of this bank instead of the bank summary
        #[arg(long)]
        bank_id: Option<String>,
    },

    /// Create starter config and an example bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cefrtest=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            bank,
            bank_id,
            answers,
            level,
            skill,
            count,
            output,
            format,
            time_spent,
        } => commands::score::execute(
            bank, bank_id, answers, level, skill, count, output, format, time_spent,
        ),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_decline,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_decline, format),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::List { bank, bank_id } => commands::list::execute(bank, bank_id),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
