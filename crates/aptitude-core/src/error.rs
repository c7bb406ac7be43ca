//! Session error types.
//!
//! Scoring itself never fails; these cover input the session refuses to
//! record and requests made out of order.

use thiserror::Error;

/// Errors raised while driving a [`Session`](crate::session::Session).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Registered age is outside the accepted range.
    #[error("age {0} is outside the accepted range 6-120")]
    AgeOutOfRange(u32),

    /// The question bank has no questions to walk.
    #[error("question bank is empty")]
    EmptyBank,

    /// The answer's shape does not fit the question type.
    #[error("question {number} expects a {expected} answer", number = .position + 1)]
    AnswerMismatch {
        position: usize,
        expected: &'static str,
    },

    /// The chosen value is not one of the question's options.
    #[error("'{value}' is not an option for question {number}", number = .position + 1)]
    UnknownOption { position: usize, value: String },

    /// A Likert answer outside 1..=5.
    #[error("Likert answer {0} is outside 1-5")]
    LikertOutOfRange(i64),

    /// Results were requested before the test was submitted.
    #[error("the test has not been submitted yet")]
    NotSubmitted,
}
