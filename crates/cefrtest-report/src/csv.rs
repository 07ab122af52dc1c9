//! CSV export of test results.
//!
//! One row per result, for spreadsheet import and results-history tooling.

use anyhow::Result;
use std::path::Path;

use cefrtest_core::model::SkillArea;
use cefrtest_core::results::TestResult;

/// Quote a CSV field if it contains a delimiter, quote, or newline.
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Generate CSV for a batch of results.
pub fn generate_csv(results: &[TestResult]) -> String {
    let mut csv = String::new();

    csv.push_str("result_id,session_id,completed_at,time_spent_secs,total_score,max_score,percentage,cefr_level");
    for skill in SkillArea::ALL {
        csv.push_str(&format!(",{skill}_percentage"));
    }
    csv.push('\n');

    for result in results {
        let summary = &result.summary;
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{}",
            result.id,
            result.session_id,
            csv_escape(&result.completed_at.to_rfc3339()),
            result.time_spent_secs,
            summary.total_score,
            summary.max_score,
            summary.percentage,
            summary.cefr_level,
        ));
        for skill in SkillArea::ALL {
            let percentage = summary
                .skill_breakdown
                .get(&skill)
                .map(|b| b.percentage)
                .unwrap_or(0);
            csv.push_str(&format!(",{percentage}"));
        }
        csv.push('\n');
    }

    csv
}

/// Write a CSV report to a file.
pub fn write_csv_report(results: &[TestResult], path: &Path) -> Result<()> {
    let csv = generate_csv(results);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, csv)?;
    Ok(())
}
