//! Lettergrade Core Library
//!
//! Variant selection and grading for the letter-frequency counting homework.

pub mod answers;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod grade;
pub mod logging;
pub mod reference;
pub mod variant;

pub use answers::{parse_answers, AnswerSet, AnswerSheet, ParseError};
pub use config::GraderConfig;
pub use engine::Grader;
pub use grade::{GradingParams, GradingPolicy, Rejection, Verdict};
pub use variant::{VariantIndex, VariantSelector};
