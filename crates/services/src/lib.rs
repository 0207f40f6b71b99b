#![forbid(unsafe_code)]

pub mod assessment;
pub mod auth_service;
pub mod error;

pub use error::{AssessmentError, AuthError};

pub use assessment::{AssessmentService, BuiltinQuestions, JsonQuestionSource, QuestionSource};
pub use auth_service::{Account, AuthService};
