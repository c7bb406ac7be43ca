//! Interactive session state.
//!
//! A [`Session`] is created when a participant starts, is mutated only by
//! registration, answer, and navigation calls, and is dropped (or turned
//! into an [`AssessmentReport`]) when the interaction ends.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answer::{Answer, AnswerSheet};
use crate::error::SessionError;
use crate::model::{LikertLevel, Question, QuestionBank, QuestionKind};
use crate::report::{AssessmentReport, DEFAULT_NAME};
use crate::scoring::{score_answers, ScoreMap};

/// Accepted registration ages.
pub const AGE_RANGE: std::ops::RangeInclusive<u32> = 6..=120;

/// Registration details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    #[default]
    PreferNotToSay,
    Female,
    Male,
    NonBinary,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 5] = [
        Gender::PreferNotToSay,
        Gender::Female,
        Gender::Male,
        Gender::NonBinary,
        Gender::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::PreferNotToSay => "Prefer not to say",
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::NonBinary => "Non-binary",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a `next` call left the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved to the question at this position.
    Moved(usize),
    /// The last question was passed and the answers were scored.
    Submitted,
}

/// One participant's walk through a question bank.
#[derive(Debug)]
pub struct Session<'a> {
    id: Uuid,
    bank: &'a QuestionBank,
    profile: Option<Profile>,
    current: usize,
    answers: AnswerSheet,
    scores: Option<ScoreMap>,
}

impl<'a> Session<'a> {
    pub fn new(bank: &'a QuestionBank) -> Result<Self, SessionError> {
        if bank.is_empty() {
            return Err(SessionError::EmptyBank);
        }
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, bank = %bank.id, "session started");
        Ok(Self {
            id,
            bank,
            profile: None,
            current: 0,
            answers: AnswerSheet::new(),
            scores: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bank(&self) -> &QuestionBank {
        self.bank
    }

    /// Save (or replace) the registration details.
    pub fn register(&mut self, profile: Profile) -> Result<(), SessionError> {
        if !AGE_RANGE.contains(&profile.age) {
            return Err(SessionError::AgeOutOfRange(profile.age));
        }
        self.profile = Some(profile);
        Ok(())
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Registered name, or the default when none was given.
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.name.trim())
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_NAME)
    }

    /// Zero-based position of the current question.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.bank.len()
    }

    pub fn current_question(&self) -> &Question {
        &self.bank.questions[self.current]
    }

    pub fn current_answer(&self) -> Option<&Answer> {
        self.answers.get(self.current)
    }

    /// The previous answer to the current question, or its default.
    pub fn preselected(&self) -> Answer {
        self.current_answer()
            .cloned()
            .unwrap_or_else(|| self.current_question().default_answer())
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// Record an answer for the current question.
    pub fn answer(&mut self, answer: Answer) -> Result<(), SessionError> {
        check_answer(self.current, self.current_question(), &answer)?;
        self.answers.record(self.current, answer);
        Ok(())
    }

    /// Step back one question; a no-op on the first.
    pub fn back(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    /// Step forward, or score and submit when on the last question.
    pub fn next(&mut self) -> Step {
        if self.current + 1 < self.total() {
            self.current += 1;
            return Step::Moved(self.current);
        }

        let scores = score_answers(self.bank, &self.answers);
        tracing::debug!(session = %self.id, answered = self.answers.len(), "test submitted");
        self.scores = Some(scores);
        Step::Submitted
    }

    pub fn is_submitted(&self) -> bool {
        self.scores.is_some()
    }

    /// Scores from the latest submission.
    pub fn results(&self) -> Result<&ScoreMap, SessionError> {
        self.scores.as_ref().ok_or(SessionError::NotSubmitted)
    }

    /// Turn the submitted session into a report.
    pub fn into_report(self, scale: bool) -> Result<AssessmentReport, SessionError> {
        let scores = self.scores.ok_or(SessionError::NotSubmitted)?;
        Ok(AssessmentReport::new(
            self.id,
            self.bank,
            self.profile,
            self.answers,
            scores,
            scale,
        ))
    }
}

fn check_answer(position: usize, question: &Question, answer: &Answer) -> Result<(), SessionError> {
    let mismatch = || SessionError::AnswerMismatch {
        position,
        expected: question.kind.type_name(),
    };
    let unknown = |value: &str| SessionError::UnknownOption {
        position,
        value: value.to_string(),
    };

    match (&question.kind, answer) {
        (QuestionKind::Likert, Answer::Scale(n)) => LikertLevel::from_value(*n)
            .map(|_| ())
            .ok_or(SessionError::LikertOutOfRange(*n)),
        (QuestionKind::NumericChoice { options, .. }, Answer::Choice(value)) => {
            if options.contains(value) {
                Ok(())
            } else {
                Err(unknown(value))
            }
        }
        (
            QuestionKind::NumericChoiceMulti {
                options_1,
                options_2,
                ..
            },
            Answer::Pair(first, second),
        ) => {
            if !options_1.contains(first) {
                Err(unknown(first))
            } else if !options_2.contains(second) {
                Err(unknown(second))
            } else {
                Ok(())
            }
        }
        _ => Err(mismatch()),
    }
}
