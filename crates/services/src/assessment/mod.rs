mod service;
mod source;

// Public API of the assessment subsystem.
pub use crate::error::AssessmentError;
pub use service::AssessmentService;
pub use source::{BuiltinQuestions, JsonQuestionSource, QuestionSource};
