//! HTML results page.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use aptitude_core::report::AssessmentReport;
use aptitude_core::scoring::{ScoreMap, NOMINAL_MAX};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate the results page for a completed assessment.
pub fn generate_html(report: &AssessmentReport) -> String {
    let name = html_escape(report.display_name());
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>Results for {name}</title>\n"));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>Hi {name}, here are your scores</h1>\n"));
    html.push_str(&format!(
        "<p class=\"meta\">Question bank: <strong>{}</strong> | {} questions | {} answered | {}</p>\n",
        html_escape(&report.bank.name),
        report.bank.question_count,
        report.answers.len(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Score table
    html.push_str("<section class=\"scores\">\n");
    html.push_str("<h2>Scores</h2>\n");
    html.push_str("<table>\n");
    html.push_str(&format!(
        "<thead><tr><th>Category</th><th>Raw</th><th>Score (/ {NOMINAL_MAX})</th></tr></thead>\n"
    ));
    html.push_str("<tbody>\n");
    for (category, display) in report.display_scores.iter() {
        let raw = report.scores.get(category).unwrap_or(0.0);
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.1}</td><td>{:.2}</td></tr>\n",
            html_escape(category.label()),
            raw,
            display,
        ));
    }
    html.push_str("</tbody></table>\n");

    if !report.display_scores.is_empty() {
        html.push_str(&generate_bar_chart(&report.display_scores));
    }
    html.push_str("</section>\n");

    // Summary and suggestions
    if let Some(summary) = report.summary() {
        html.push_str("<section class=\"summary\">\n");
        html.push_str("<h2>Summary</h2>\n");
        html.push_str(&format!(
            "<p>{}</p>\n",
            html_escape(&summary.message(report.display_name()))
        ));
        html.push_str("<h3>Suggested career paths</h3>\n<ul>\n");
        for suggestion in &summary.suggestions {
            html.push_str(&format!("<li>{}</li>\n", html_escape(suggestion)));
        }
        html.push_str("</ul>\n</section>\n");
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write the results page to a file.
pub fn write_html_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(scores: &ScoreMap) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 180;

    let total_height = scores.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (category, score)) in scores.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let fraction = (score / NOMINAL_MAX).clamp(0.0, 1.0);
        let width = (fraction * max_width as f64) as usize;

        let color = if fraction >= 0.8 {
            "#22c55e"
        } else if fraction >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(category.label())
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.2}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --accent: #fad0c4; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --accent: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); max-width: 48rem; }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.summary { border-left: 4px solid var(--accent); padding-left: 1rem; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use aptitude_core::answer::{Answer, AnswerSheet};
    use aptitude_core::model::QuestionBank;
    use aptitude_core::scoring::score_answers;
    use aptitude_core::session::{Gender, Profile};

    fn make_test_report(name: &str) -> AssessmentReport {
        let bank = QuestionBank::builtin();
        let answers: AnswerSheet = (0..bank.len()).map(|i| (i, Answer::Scale(4))).collect();
        let scores = score_answers(&bank, &answers);
        let participant = Profile {
            name: name.into(),
            age: 30,
            gender: Gender::PreferNotToSay,
            email: String::new(),
        };
        AssessmentReport::new(
            uuid::Uuid::nil(),
            &bank,
            Some(participant),
            answers,
            scores,
            true,
        )
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_test_report("Ada"));

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Hi Ada"));
        assert!(html.contains("Creative-Technical"));
        assert!(html.contains("Five Aspects of Intelligence"));
        assert!(html.contains("Suggested career paths"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn html_escapes_participant_name() {
        let html = generate_html(&make_test_report("<script>alert(1)</script>"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn raw_json_block_escapes_ampersands() {
        let html = generate_html(&make_test_report("Tom &lt;3"));
        assert!(html.contains("Tom &amp;lt;3"));
        assert!(!html.contains("Tom &lt;3"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report("Ada");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
