//! The `cefrtest compare` command.

use std::path::PathBuf;

use anyhow::Result;

use cefrtest_core::progress::ProgressReport;
use cefrtest_core::results::TestResult;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: u32,
    fail_on_decline: bool,
    format: String,
) -> Result<()> {
    let baseline = TestResult::load_json(&baseline_path)?;
    let current = TestResult::load_json(&current_path)?;

    let report = ProgressReport::between(&baseline, &current, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Overall: {}% -> {}% ({:+} pts), {} -> {}",
                report.baseline_percentage,
                report.current_percentage,
                report.delta,
                report.baseline_level,
                report.current_level,
            );

            for s in &report.skills {
                println!(
                    "  {}: {}% -> {}% ({:+})",
                    s.skill, s.baseline_percentage, s.current_percentage, s.delta
                );
            }
        }
    }

    if fail_on_decline && report.has_declines() {
        std::process::exit(1);
    }

    Ok(())
}
