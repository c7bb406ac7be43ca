//! aptitude-core: Question bank, scoring engine, and session model.
//!
//! This crate defines the data model, the per-category scoring that turns
//! an answer sheet into a score map, and the session state that walks a
//! participant through a question bank.

pub mod answer;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod session;
pub mod summary;

pub use answer::{Answer, AnswerSheet};
pub use error::SessionError;
pub use model::{Category, LikertLevel, Question, QuestionBank, QuestionKind};
pub use report::AssessmentReport;
pub use scoring::{score_answers, ScoreMap, NOMINAL_MAX};
pub use session::{Gender, Profile, Session, Step};
pub use summary::ResultsSummary;
