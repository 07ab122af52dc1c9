//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use cefrtest_core::results::TestResult;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a test result.
pub fn generate_html(result: &TestResult) -> String {
    let mut html = String::new();
    let summary = &result.summary;

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>cefrtest report — {}</title>\n",
        summary.cefr_level
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>cefrtest report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Session {} | completed {} | {}m {}s</p>\n",
        result.session_id,
        result.completed_at.format("%Y-%m-%d %H:%M:%S UTC"),
        result.time_spent_secs / 60,
        result.time_spent_secs % 60,
    ));
    html.push_str("</header>\n");

    // Headline score
    html.push_str("<section class=\"headline\">\n");
    html.push_str(&format!(
        "<p class=\"level\">{} <span class=\"label\">({})</span></p>\n",
        summary.cefr_level,
        html_escape(summary.cefr_level.label()),
    ));
    html.push_str(&format!(
        "<p class=\"score\">{} / {} points — {}%</p>\n",
        summary.total_score, summary.max_score, summary.percentage
    ));
    html.push_str("</section>\n");

    // Skill breakdown
    html.push_str("<section class=\"skills\">\n");
    html.push_str("<h2>Skill Breakdown</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str(
        "<thead><tr><th>Skill</th><th>Score</th><th>Max</th><th>Percentage</th></tr></thead>\n",
    );
    html.push_str("<tbody>\n");
    for (skill, bucket) in &summary.skill_breakdown {
        if bucket.max_score == 0 {
            continue;
        }
        html.push_str(&format!(
            "<tr><td>{skill}</td><td>{}</td><td>{}</td><td>{}%</td></tr>\n",
            bucket.score, bucket.max_score, bucket.percentage,
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str(&generate_bar_chart(result));
    html.push_str("</section>\n");

    // Recommendations
    if !summary.recommendations.is_empty() {
        html.push_str("<section class=\"recommendations\">\n");
        html.push_str("<h2>Recommendations</h2>\n<ul>\n");
        for tip in &summary.recommendations {
            html.push_str(&format!("<li>{}</li>\n", html_escape(tip)));
        }
        html.push_str("</ul>\n</section>\n");
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(result)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(result: &TestResult, path: &Path) -> Result<()> {
    let html = generate_html(result);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(result: &TestResult) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 140;

    let skills: Vec<(String, u32)> = result
        .summary
        .skill_breakdown
        .iter()
        .filter(|(_, bucket)| bucket.max_score > 0)
        .map(|(skill, bucket)| (skill.to_string(), bucket.percentage))
        .collect();

    if skills.is_empty() {
        return String::new();
    }

    let total_height = skills.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (skill, percentage)) in skills.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (*percentage as usize * max_width) / 100;

        let color = if *percentage >= 80 {
            "#22c55e"
        } else if *percentage >= 50 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(skill)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            percentage
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --accent: #2563eb; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --accent: #60a5fa; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.level { font-size: 3rem; font-weight: bold; color: var(--accent); margin: 0.5rem 0 0; }
.level .label { font-size: 1.25rem; font-weight: normal; color: var(--fg); }
.score { font-size: 1.25rem; margin-top: 0.25rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
ul { line-height: 1.8; }
"#;
