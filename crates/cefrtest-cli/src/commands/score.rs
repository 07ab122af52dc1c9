//! The `cefrtest score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use cefrtest_bank::{create_source, select_questions, SelectionOptions};
use cefrtest_core::model::{AnswerMap, CefrLevel, SkillArea};
use cefrtest_core::results::TestResult;
use cefrtest_core::session::TestSession;
use cefrtest_report::csv::write_csv_report;
use cefrtest_report::html::write_html_report;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    bank_spec: String,
    bank_id: Option<String>,
    answers_path: PathBuf,
    level: Option<String>,
    skill: Option<String>,
    count: Option<usize>,
    output: PathBuf,
    format: String,
    time_spent: Option<u64>,
) -> Result<()> {
    let source = create_source(&bank_spec)?;

    // Resolve which bank to administer
    let bank_id = match bank_id {
        Some(id) => id,
        None => {
            let infos = source.list();
            match infos.as_slice() {
                [only] => only.id.clone(),
                [] => anyhow::bail!("no banks found at '{bank_spec}'"),
                many => anyhow::bail!(
                    "'{bank_spec}' holds {} banks, pick one with --bank-id: {:?}",
                    many.len(),
                    many.iter().map(|i| i.id.as_str()).collect::<Vec<_>>()
                ),
            }
        }
    };
    let bank = source.load(&bank_id)?;

    // Apply question selection
    let options = SelectionOptions {
        level: level
            .map(|l| l.parse::<CefrLevel>().map_err(|e| anyhow::anyhow!(e)))
            .transpose()?,
        skill_area: skill
            .map(|s| s.parse::<SkillArea>().map_err(|e| anyhow::anyhow!(e)))
            .transpose()?,
        count,
    };
    let questions = select_questions(&bank, &options);
    anyhow::ensure!(
        !questions.is_empty(),
        "selection left no questions to score"
    );

    // Load the final answer snapshot
    let answers_json = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers: {}", answers_path.display()))?;
    let answers: AnswerMap =
        serde_json::from_str(&answers_json).context("failed to parse answer JSON")?;

    let mut session = TestSession::with_questions(&bank.id, questions, bank.time_limit_secs);
    for (question_id, answer) in answers {
        session.record_answer(&question_id, answer);
    }

    let mut result = session.complete();
    if let Some(secs) = time_spent {
        result.time_spent_secs = secs;
    }

    print_summary(&result);

    // Save outputs
    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "csv"]
    } else {
        format.split(',').collect()
    };

    for fmt in &formats {
        match fmt.trim() {
            "json" => {
                let path = output.join(format!("result-{timestamp}.json"));
                result.save_json(&path)?;
                eprintln!("Result saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("result-{timestamp}.html"));
                write_html_report(&result, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            "csv" => {
                let path = output.join(format!("result-{timestamp}.csv"));
                write_csv_report(std::slice::from_ref(&result), &path)?;
                eprintln!("CSV report: {}", path.display());
            }
            other => {
                eprintln!("Unknown format: {other}");
            }
        }
    }

    Ok(())
}

fn print_summary(result: &TestResult) {
    use comfy_table::{Cell, Table};

    let summary = &result.summary;

    let mut table = Table::new();
    table.set_header(vec!["Skill", "Score", "Max", "Percentage"]);

    for (skill, bucket) in &summary.skill_breakdown {
        if bucket.max_score == 0 {
            continue;
        }
        table.add_row(vec![
            Cell::new(skill),
            Cell::new(bucket.score),
            Cell::new(bucket.max_score),
            Cell::new(format!("{}%", bucket.percentage)),
        ]);
    }

    eprintln!("\n{table}\n");

    println!(
        "Level: {} ({}) — {}/{} points, {}%",
        summary.cefr_level,
        summary.cefr_level.label(),
        summary.total_score,
        summary.max_score,
        summary.percentage
    );

    if !summary.recommendations.is_empty() {
        println!("\nRecommendations:");
        for tip in &summary.recommendations {
            println!("  - {tip}");
        }
    }
}
