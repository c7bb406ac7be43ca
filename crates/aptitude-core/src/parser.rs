//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Category, Question, QuestionBank, QuestionKind};

/// Intermediate TOML structure for parsing question bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(default)]
    id: Option<String>,
    text: String,
    category: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    options: Option<Vec<toml::Value>>,
    #[serde(default)]
    correct: Option<toml::Value>,
    #[serde(default)]
    options_1: Option<Vec<toml::Value>>,
    #[serde(default)]
    options_2: Option<Vec<toml::Value>>,
    #[serde(default)]
    correct_1: Option<toml::Value>,
    #[serde(default)]
    correct_2: Option<toml::Value>,
}

/// Options and keys may be written as numbers or strings.
fn option_text(value: &toml::Value) -> Result<String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        other => anyhow::bail!("option must be a number or string, got {}", other.type_str()),
    }
}

fn required<T>(field: Option<T>, name: &str, question: &str) -> Result<T> {
    field.with_context(|| format!("question '{question}' is missing `{name}`"))
}

fn option_list(values: Option<Vec<toml::Value>>, name: &str, question: &str) -> Result<Vec<String>> {
    required(values, name, question)?
        .iter()
        .map(option_text)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid `{name}` in question '{question}'"))
}

fn key(value: Option<toml::Value>, name: &str, question: &str) -> Result<String> {
    option_text(&required(value, name, question)?)
        .with_context(|| format!("invalid `{name}` in question '{question}'"))
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank file: {}", path.display()))?;

    parse_question_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_question_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(position, q)| {
            let id = q.id.unwrap_or_else(|| format!("q{}", position + 1));

            let category: Category = q
                .category
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question '{id}': {e}"))?;

            let kind = match q.kind.trim().to_lowercase().as_str() {
                "likert" => QuestionKind::Likert,
                "numeric_choice" => QuestionKind::NumericChoice {
                    options: option_list(q.options, "options", &id)?,
                    correct: key(q.correct, "correct", &id)?,
                },
                "numeric_choice_multi" => QuestionKind::NumericChoiceMulti {
                    options_1: option_list(q.options_1, "options_1", &id)?,
                    options_2: option_list(q.options_2, "options_2", &id)?,
                    correct_1: key(q.correct_1, "correct_1", &id)?,
                    correct_2: key(q.correct_2, "correct_2", &id)?,
                },
                other => anyhow::bail!("question '{id}': unknown question type: {other}"),
            };

            Ok(Question {
                id,
                text: q.text.trim().to_string(),
                category,
                kind,
            })
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid question bank: {}", source_path.display()))?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions,
    })
}

/// Recursively load all `.toml` question bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_question_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

fn check_options(id: &str, name: &str, options: &[String], key: &str) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if options.len() < 2 {
        warnings.push(ValidationWarning::question(
            id,
            format!("`{name}` offers fewer than two options"),
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for option in options {
        if !seen.insert(option) {
            warnings.push(ValidationWarning::question(
                id,
                format!("duplicate option '{option}' in `{name}`"),
            ));
        }
    }

    if !options.iter().any(|o| o == key) {
        warnings.push(ValidationWarning::question(
            id,
            format!("keyed answer '{key}' is not among `{name}`"),
        ));
    }

    warnings
}

/// Validate a question bank for common issues.
pub fn validate_question_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "question bank has no questions".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for q in &bank.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("duplicate question ID: {}", q.id),
            ));
        }
    }

    for q in &bank.questions {
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning::question(&q.id, "question text is empty"));
        }

        match &q.kind {
            QuestionKind::Likert => {}
            QuestionKind::NumericChoice { options, correct } => {
                warnings.extend(check_options(&q.id, "options", options, correct));
            }
            QuestionKind::NumericChoiceMulti {
                options_1,
                options_2,
                correct_1,
                correct_2,
            } => {
                warnings.extend(check_options(&q.id, "options_1", options_1, correct_1));
                warnings.extend(check_options(&q.id, "options_2", options_2, correct_2));
            }
        }
    }

    warnings
}
