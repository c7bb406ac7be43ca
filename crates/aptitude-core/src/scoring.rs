//! Per-category score aggregation.
//!
//! Scores are raw sums: each answer contributes its points to its
//! question's category, missing answers contribute zero, and nothing is
//! averaged. Categories built from different question types therefore
//! have different maxima; [`ScoreMap::scaled`] maps them onto a common
//! display range.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::answer::AnswerSheet;
use crate::model::{Category, QuestionBank};

/// Nominal maximum printed next to every score on the certificate.
pub const NOMINAL_MAX: f64 = 5.0;

/// Accumulated score per category, ordered by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMap {
    scores: BTreeMap<Category, f64>,
}

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        self.scores.get(&category).copied()
    }

    pub fn insert(&mut self, category: Category, score: f64) {
        self.scores.insert(category, score);
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.scores.iter().map(|(c, s)| (*c, *s))
    }

    /// Rescale every category onto `0..=nominal_max` using the bank's
    /// attainable maximum for that category.
    pub fn scaled(&self, bank: &QuestionBank, nominal_max: f64) -> ScoreMap {
        self.iter()
            .map(|(category, raw)| {
                let max = bank.max_points(category);
                let scaled = if max == 0 {
                    0.0
                } else {
                    raw * nominal_max / f64::from(max)
                };
                (category, scaled)
            })
            .collect()
    }
}

impl FromIterator<(Category, f64)> for ScoreMap {
    fn from_iter<I: IntoIterator<Item = (Category, f64)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

/// Score an answer sheet against a bank.
///
/// Every category present in the bank gets an entry, even when none of its
/// questions were answered.
pub fn score_answers(bank: &QuestionBank, answers: &AnswerSheet) -> ScoreMap {
    let mut scores = ScoreMap::new();

    for (position, question) in bank.iter().enumerate() {
        let points = answers
            .get(position)
            .map(|answer| answer.points(question))
            .unwrap_or(0);
        *scores.scores.entry(question.category).or_insert(0.0) += f64::from(points);
    }

    tracing::debug!(
        bank = %bank.id,
        answered = answers.len(),
        categories = scores.len(),
        "scored answer sheet"
    );
    scores
}
