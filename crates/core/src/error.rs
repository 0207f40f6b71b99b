use thiserror::Error;

use crate::login::CpfError;
use crate::model::{BookingError, LessonError, QuestionError, QuizError, SessionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Cpf(#[from] CpfError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Booking(#[from] BookingError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionDraft;

    #[test]
    fn domain_errors_convert_into_crate_error() {
        let err: Error = QuestionDraft::new("Q", ["A"], "A").validate().unwrap_err().into();
        assert!(matches!(err, Error::Question(_)));
        assert_eq!(err.to_string(), "a question needs at least two options, got 1");
    }
}
