//! Core data model types for aptitude.
//!
//! These are the fundamental types that the rest of the system uses to
//! represent categories, questions, and question banks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five intelligence aspects a question can target.
///
/// Ordering follows declaration order, which is also the order categories
/// appear in score tables and on the certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Analytical,
    Social,
    Moral,
    Symbolic,
    #[serde(
        rename = "Creative-Technical",
        alias = "creative_technical",
        alias = "creative-technical"
    )]
    CreativeTechnical,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Analytical,
        Category::Social,
        Category::Moral,
        Category::Symbolic,
        Category::CreativeTechnical,
    ];

    /// Display label, e.g. `Creative-Technical`.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Analytical => "Analytical",
            Category::Social => "Social",
            Category::Moral => "Moral",
            Category::Symbolic => "Symbolic",
            Category::CreativeTechnical => "Creative-Technical",
        }
    }

    /// Career paths suggested when this category is the strongest.
    pub fn career_suggestions(&self) -> [&'static str; 3] {
        match self {
            Category::Analytical => ["Data Scientist", "Engineer", "Research Analyst"],
            Category::Social => ["Counselor", "Teacher", "PR Specialist"],
            Category::Moral => ["Social Worker", "Ethics Officer", "NGO Coordinator"],
            Category::Symbolic => ["Designer", "Mathematician", "Cryptographer"],
            Category::CreativeTechnical => {
                ["Product Designer", "Inventor", "Creative Technologist"]
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "analytical" => Ok(Category::Analytical),
            "social" => Ok(Category::Social),
            "moral" => Ok(Category::Moral),
            "symbolic" => Ok(Category::Symbolic),
            "creative-technical" | "creative_technical" | "creativetechnical" => {
                Ok(Category::CreativeTechnical)
            }
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// A point on the five-step agreement scale used by Likert items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LikertLevel {
    StronglyDisagree = 1,
    Disagree = 2,
    #[default]
    Neutral = 3,
    Agree = 4,
    StronglyAgree = 5,
}

impl LikertLevel {
    pub const ALL: [LikertLevel; 5] = [
        LikertLevel::StronglyDisagree,
        LikertLevel::Disagree,
        LikertLevel::Neutral,
        LikertLevel::Agree,
        LikertLevel::StronglyAgree,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LikertLevel::StronglyDisagree => "Strongly disagree",
            LikertLevel::Disagree => "Disagree",
            LikertLevel::Neutral => "Neutral",
            LikertLevel::Agree => "Agree",
            LikertLevel::StronglyAgree => "Strongly agree",
        }
    }

    /// Score value of this level (1..=5).
    pub fn value(&self) -> i64 {
        *self as i64
    }

    pub fn from_value(value: i64) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.value() == value)
    }
}

/// How a question is answered and, for scored types, what counts as correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Answered on the five-point agreement scale.
    Likert,
    /// One choice among numeric-looking options.
    NumericChoice { options: Vec<String>, correct: String },
    /// Two independent choices, each scored against its own key.
    NumericChoiceMulti {
        options_1: Vec<String>,
        options_2: Vec<String>,
        correct_1: String,
        correct_2: String,
    },
}

impl QuestionKind {
    /// Short type name as it appears in question bank files.
    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::Likert => "likert",
            QuestionKind::NumericChoice { .. } => "numeric_choice",
            QuestionKind::NumericChoiceMulti { .. } => "numeric_choice_multi",
        }
    }

    /// Highest raw score an answer to this question can contribute.
    pub fn max_points(&self) -> u32 {
        match self {
            QuestionKind::Likert => 5,
            QuestionKind::NumericChoice { .. } => 1,
            QuestionKind::NumericChoiceMulti { .. } => 2,
        }
    }
}

/// A single question in a bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within its bank.
    pub id: String,
    /// Text shown to the participant.
    pub text: String,
    /// The aspect this question contributes to.
    pub category: Category,
    /// Answer type plus option and key fields.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn likert(id: &str, category: Category, text: &str) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category,
            kind: QuestionKind::Likert,
        }
    }
}

/// An ordered, immutable list of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Question> {
        self.questions.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for q in &self.questions {
            if !seen.contains(&q.category) {
                seen.push(q.category);
            }
        }
        seen
    }

    /// Highest raw score attainable in `category` with this bank.
    pub fn max_points(&self, category: Category) -> u32 {
        self.questions
            .iter()
            .filter(|q| q.category == category)
            .map(|q| q.kind.max_points())
            .sum()
    }

    /// The standard fifteen-question bank.
    pub fn builtin() -> Self {
        let numeric = |values: &[u32]| values.iter().map(u32::to_string).collect::<Vec<_>>();

        let questions = vec![
            Question {
                id: "analytical-doubling".into(),
                text: "If a pattern is 2, 4, 8, 16, what comes next?".into(),
                category: Category::Analytical,
                kind: QuestionKind::NumericChoice {
                    options: numeric(&[32, 34, 36, 40]),
                    correct: "32".into(),
                },
            },
            Question::likert(
                "analytical-logic-puzzles",
                Category::Analytical,
                "I can solve logic puzzles quickly.",
            ),
            Question {
                id: "analytical-series".into(),
                text: "The series has numbers 3, 8, 18, 35, 61, __, __. Find the missing two."
                    .into(),
                category: Category::Analytical,
                kind: QuestionKind::NumericChoiceMulti {
                    options_1: numeric(&[92, 95, 98, 105]),
                    options_2: numeric(&[148, 161, 175, 180]),
                    correct_1: "98".into(),
                    correct_2: "148".into(),
                },
            },
            Question::likert(
                "social-empathy",
                Category::Social,
                "I feel comfortable understanding how others feel.",
            ),
            Question::likert(
                "social-mediation",
                Category::Social,
                "I often help friends navigate social problems.",
            ),
            Question::likert(
                "social-teamwork",
                Category::Social,
                "I prefer working in teams rather than alone.",
            ),
            Question::likert(
                "moral-consequences",
                Category::Moral,
                "I consider ethical consequences before making decisions.",
            ),
            Question::likert(
                "moral-conviction",
                Category::Moral,
                "I stand up for what I believe is right.",
            ),
            Question::likert(
                "moral-fairness",
                Category::Moral,
                "I often think about fairness and justice.",
            ),
            Question::likert(
                "symbolic-codes",
                Category::Symbolic,
                "I enjoy puzzles that use symbols and codes.",
            ),
            Question::likert(
                "symbolic-diagrams",
                Category::Symbolic,
                "I can interpret maps, charts and abstract diagrams easily.",
            ),
            Question::likert(
                "symbolic-languages",
                Category::Symbolic,
                "I like to work with languages or symbolic systems.",
            ),
            Question::likert(
                "creative-repair",
                Category::CreativeTechnical,
                "I enjoy making things and fixing mechanical problems.",
            ),
            Question::likert(
                "creative-novel-solutions",
                Category::CreativeTechnical,
                "I come up with novel solutions to technical problems.",
            ),
            Question::likert(
                "creative-prototypes",
                Category::CreativeTechnical,
                "I like designing or building prototypes.",
            ),
        ];

        Self {
            id: "default".into(),
            name: "Five Aspects of Intelligence".into(),
            description: "Analytical, Social, Moral, Symbolic, and Creative-Technical".into(),
            questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_display_and_parse() {
        assert_eq!(Category::CreativeTechnical.to_string(), "Creative-Technical");
        assert_eq!("social".parse::<Category>().unwrap(), Category::Social);
        assert_eq!(
            "Creative-Technical".parse::<Category>().unwrap(),
            Category::CreativeTechnical
        );
        assert_eq!(
            "creative_technical".parse::<Category>().unwrap(),
            Category::CreativeTechnical
        );
        assert!("emotional".parse::<Category>().is_err());
    }

    #[test]
    fn category_serde_uses_display_label() {
        let json = serde_json::to_string(&Category::CreativeTechnical).unwrap();
        assert_eq!(json, "\"Creative-Technical\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::CreativeTechnical);
    }

    #[test]
    fn likert_levels() {
        assert_eq!(LikertLevel::default(), LikertLevel::Neutral);
        assert_eq!(LikertLevel::StronglyAgree.value(), 5);
        assert_eq!(LikertLevel::from_value(2), Some(LikertLevel::Disagree));
        assert_eq!(LikertLevel::from_value(6), None);
    }

    #[test]
    fn builtin_bank_shape() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), 15);
        assert_eq!(bank.categories(), Category::ALL.to_vec());
        // likert + choice + pair
        assert_eq!(bank.max_points(Category::Analytical), 8);
        assert_eq!(bank.max_points(Category::Social), 15);
    }

    #[test]
    fn builtin_keys_are_among_options() {
        for q in QuestionBank::builtin().iter() {
            match &q.kind {
                QuestionKind::Likert => {}
                QuestionKind::NumericChoice { options, correct } => {
                    assert!(options.contains(correct), "{}", q.id);
                }
                QuestionKind::NumericChoiceMulti {
                    options_1,
                    options_2,
                    correct_1,
                    correct_2,
                } => {
                    assert!(options_1.contains(correct_1), "{}", q.id);
                    assert!(options_2.contains(correct_2), "{}", q.id);
                }
            }
        }
    }

    #[test]
    fn question_serde_is_tagged_by_type() {
        let bank = QuestionBank::builtin();
        let json = serde_json::to_value(&bank.questions[0]).unwrap();
        assert_eq!(json["type"], "numeric_choice");
        assert_eq!(json["correct"], "32");
        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back, bank.questions[0]);
    }
}
