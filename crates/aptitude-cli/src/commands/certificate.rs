//! The `aptitude certificate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use aptitude_core::config::load_config;
use aptitude_core::report::{AssessmentReport, DEFAULT_NAME};
use aptitude_core::scoring::ScoreMap;
use aptitude_report::certificate::{certificate_file_name, write_certificate, CertificateStyle};

pub fn execute(
    name: Option<String>,
    scores_path: Option<PathBuf>,
    report_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = load_config()?;

    let (report_name, scores) = match (scores_path, report_path) {
        (_, Some(path)) => {
            let report = AssessmentReport::load_json(&path)?;
            (report.display_name().to_string(), report.display_scores)
        }
        (Some(path), None) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read scores from {}", path.display()))?;
            let scores: ScoreMap = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse scores JSON: {}", path.display()))?;
            (DEFAULT_NAME.to_string(), scores)
        }
        (None, None) => anyhow::bail!("either --scores or --report is required"),
    };

    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or(report_name);

    let output = output.unwrap_or(config.output_dir);
    let path = output.join(certificate_file_name(&name));
    let style = CertificateStyle::from(config.certificate);
    write_certificate(&path, &style, &name, &scores)?;

    println!("Certificate written to: {}", path.display());
    Ok(())
}
