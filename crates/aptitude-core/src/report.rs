//! Assessment report with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answer::AnswerSheet;
use crate::model::QuestionBank;
use crate::scoring::{ScoreMap, NOMINAL_MAX};
use crate::session::Profile;
use crate::summary::ResultsSummary;

/// Name used when the participant never registered one.
pub const DEFAULT_NAME: &str = "Tester";

/// The outcome of one completed assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier (the session id).
    pub id: Uuid,
    /// When the test was submitted.
    pub created_at: DateTime<Utc>,
    /// Summary of the question bank.
    pub bank: BankSummary,
    /// Registration details, if any were given.
    #[serde(default)]
    pub participant: Option<Profile>,
    /// Answers as submitted.
    pub answers: AnswerSheet,
    /// Raw per-category sums.
    pub scores: ScoreMap,
    /// Scores as shown on the certificate.
    pub display_scores: ScoreMap,
}

/// Summary of a question bank (without the questions themselves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

impl BankSummary {
    pub fn of(bank: &QuestionBank) -> Self {
        Self {
            id: bank.id.clone(),
            name: bank.name.clone(),
            question_count: bank.len(),
        }
    }
}

impl AssessmentReport {
    /// Assemble a report; `scale` selects rescaled display scores
    /// instead of the raw sums.
    pub fn new(
        id: Uuid,
        bank: &QuestionBank,
        participant: Option<Profile>,
        answers: AnswerSheet,
        scores: ScoreMap,
        scale: bool,
    ) -> Self {
        let display_scores = if scale {
            scores.scaled(bank, NOMINAL_MAX)
        } else {
            scores.clone()
        };
        Self {
            id,
            created_at: Utc::now(),
            bank: BankSummary::of(bank),
            participant,
            answers,
            scores,
            display_scores,
        }
    }

    /// Registered name, or [`DEFAULT_NAME`].
    pub fn display_name(&self) -> &str {
        self.participant
            .as_ref()
            .map(|p| p.name.trim())
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_NAME)
    }

    /// Strongest/weakest reading of the display scores.
    pub fn summary(&self) -> Option<ResultsSummary> {
        ResultsSummary::from_scores(&self.display_scores)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AssessmentReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
