//! Answer values and the per-participant answer sheet.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{LikertLevel, Question, QuestionKind};

/// A submitted answer, shaped by the question type it answers.
///
/// JSON form is untagged: `4`, `"32"`, `["98", "148"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// A point on the agreement scale (1..=5 when well-formed).
    Scale(i64),
    /// A single chosen option.
    Choice(String),
    /// Two chosen options for a two-part question.
    Pair(String, String),
}

impl Answer {
    pub fn likert(level: LikertLevel) -> Self {
        Answer::Scale(level.value())
    }

    pub fn choice(value: impl Into<String>) -> Self {
        Answer::Choice(value.into())
    }

    pub fn pair(first: impl Into<String>, second: impl Into<String>) -> Self {
        Answer::Pair(first.into(), second.into())
    }

    /// Raw score contribution of this answer to `question`.
    ///
    /// Never fails: an answer that does not fit the question, a Likert value
    /// outside 1..=5, or an unparseable string contributes zero.
    pub fn points(&self, question: &Question) -> u32 {
        match (&question.kind, self) {
            (QuestionKind::Likert, Answer::Scale(n)) => likert_points(*n),
            (QuestionKind::Likert, Answer::Choice(s)) => {
                s.trim().parse::<i64>().map(likert_points).unwrap_or(0)
            }
            (QuestionKind::NumericChoice { correct, .. }, Answer::Choice(s)) => {
                u32::from(matches_key(s, correct))
            }
            (QuestionKind::NumericChoice { correct, .. }, Answer::Scale(n)) => {
                u32::from(matches_key(&n.to_string(), correct))
            }
            (
                QuestionKind::NumericChoiceMulti {
                    correct_1,
                    correct_2,
                    ..
                },
                Answer::Pair(a, b),
            ) => u32::from(matches_key(a, correct_1)) + u32::from(matches_key(b, correct_2)),
            _ => 0,
        }
    }
}

fn likert_points(n: i64) -> u32 {
    LikertLevel::from_value(n).map_or(0, |level| level.value() as u32)
}

fn matches_key(given: &str, key: &str) -> bool {
    given.trim() == key.trim()
}

impl Question {
    /// The selection offered before the participant picks anything:
    /// `Neutral` for Likert items, the first option otherwise.
    pub fn default_answer(&self) -> Answer {
        match &self.kind {
            QuestionKind::Likert => Answer::likert(LikertLevel::default()),
            QuestionKind::NumericChoice { options, .. } => {
                Answer::Choice(options.first().cloned().unwrap_or_default())
            }
            QuestionKind::NumericChoiceMulti {
                options_1,
                options_2,
                ..
            } => Answer::Pair(
                options_1.first().cloned().unwrap_or_default(),
                options_2.first().cloned().unwrap_or_default(),
            ),
        }
    }
}

/// Answers keyed by question position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    answers: BTreeMap<usize, Answer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the answer for `position`.
    pub fn record(&mut self, position: usize, answer: Answer) {
        self.answers.insert(position, answer);
    }

    pub fn get(&self, position: usize) -> Option<&Answer> {
        self.answers.get(&position)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Answer)> {
        self.answers.iter().map(|(pos, answer)| (*pos, answer))
    }

    /// Load an answer sheet from a JSON object keyed by position.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read answers from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse answers JSON: {}", path.display()))
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize answers")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write answers to {}", path.display()))?;
        Ok(())
    }
}

impl FromIterator<(usize, Answer)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (usize, Answer)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}
