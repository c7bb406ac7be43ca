//! Short personalised reading of a score map.

use serde::{Deserialize, Serialize};

use crate::model::Category;
use crate::scoring::ScoreMap;

/// Strongest and weakest categories plus career suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsSummary {
    pub strongest: Category,
    pub weakest: Category,
    pub suggestions: Vec<String>,
}

impl ResultsSummary {
    /// Build a summary; `None` when there is nothing to summarise.
    ///
    /// Ties resolve to the earliest category in display order.
    pub fn from_scores(scores: &ScoreMap) -> Option<Self> {
        let mut iter = scores.iter();
        let (first, first_score) = iter.next()?;
        let (mut strongest, mut best) = (first, first_score);
        let (mut weakest, mut worst) = (first, first_score);

        for (category, score) in iter {
            if score > best {
                strongest = category;
                best = score;
            }
            if score < worst {
                weakest = category;
                worst = score;
            }
        }

        Some(Self {
            strongest,
            weakest,
            suggestions: strongest
                .career_suggestions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        })
    }

    /// The summary paragraph addressed to `name`.
    pub fn message(&self, name: &str) -> String {
        format!(
            "Nice work, {name}! You show strong {} intelligence, which is a natural strength. \
             You may want to focus on improving {} through targeted activities. \
             Overall, keep exploring and building on your strengths.",
            self.strongest, self.weakest
        )
    }
}
