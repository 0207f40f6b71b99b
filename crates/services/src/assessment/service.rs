use std::fmt;
use std::sync::Arc;

use tracing::debug;
use vida_core::model::{QuizAction, QuizResult, QuizSession};

use super::source::{BuiltinQuestions, QuestionSource};
use crate::error::AssessmentError;

/// Opens quiz attempts and drives them through dispatched actions.
#[derive(Clone)]
pub struct AssessmentService {
    source: Arc<dyn QuestionSource>,
}

impl AssessmentService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self { source }
    }

    /// Service over the bundled assessment.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Arc::new(BuiltinQuestions))
    }

    /// Start a fresh attempt at the first question.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError` if the question source fails.
    pub fn open(&self) -> Result<QuizSession, AssessmentError> {
        let questions = self.source.questions()?;
        debug!(questions = questions.len(), "assessment opened");
        Ok(QuizSession::new(questions))
    }

    /// Apply `action` to `session`. Refused actions leave it unchanged.
    #[must_use]
    pub fn dispatch(&self, session: QuizSession, action: QuizAction) -> QuizSession {
        match session.try_apply(action.clone()) {
            Ok(next) => {
                debug!(?action, phase = ?next.phase(), "quiz action applied");
                next
            }
            Err(err) => {
                debug!(?action, %err, "quiz action ignored");
                session
            }
        }
    }

    /// Score of the attempt so far.
    #[must_use]
    pub fn score(&self, session: &QuizSession) -> QuizResult {
        session.result()
    }
}

impl fmt::Debug for AssessmentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vida_core::model::{QuestionDraft, QuestionSet, QuizPhase};

    struct TwoQuestions;

    impl QuestionSource for TwoQuestions {
        fn questions(&self) -> Result<QuestionSet, AssessmentError> {
            Ok(QuestionSet::from_drafts([
                QuestionDraft::new("Q1", ["A", "B"], "A"),
                QuestionDraft::new("Q2", ["C", "D"], "D"),
            ])?)
        }
    }

    #[test]
    fn dispatch_runs_the_scored_walkthrough() {
        let service = AssessmentService::new(Arc::new(TwoQuestions));
        let mut quiz = service.open().unwrap();
        for action in [
            QuizAction::Select("A".into()),
            QuizAction::Advance,
            QuizAction::Select("C".into()),
            QuizAction::Advance,
        ] {
            quiz = service.dispatch(quiz, action);
        }

        assert_eq!(quiz.phase(), QuizPhase::Completed);
        let result = service.score(&quiz);
        assert_eq!(result.total_questions, 2);
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.percentage, 50.0);
    }

    #[test]
    fn refused_actions_are_ignored() {
        let service = AssessmentService::new(Arc::new(TwoQuestions));
        let quiz = service.open().unwrap();
        let after = service.dispatch(quiz.clone(), QuizAction::Advance);
        let after = service.dispatch(after, QuizAction::Select("Z".into()));
        assert_eq!(after, quiz);
    }

    #[test]
    fn builtin_source_opens() {
        let quiz = AssessmentService::builtin().open().unwrap();
        assert_eq!(quiz.current_index(), Some(0));
    }
}
