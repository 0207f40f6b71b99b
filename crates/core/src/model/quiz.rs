use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::{Question, QuestionSet};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Actions the current quiz state does not accept.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz already completed")]
    AlreadyCompleted,

    #[error("\"{option}\" is not an option of question {index}")]
    UnknownOption { index: usize, option: String },

    #[error("question {index} has not been answered")]
    Unanswered { index: usize },
}

//
// ─── PHASE & ACTIONS ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// `current` is always a valid index into the question set.
    InProgress { current: usize },
    Completed,
}

/// Messages the presentation layer dispatches into a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizAction {
    Select(String),
    Advance,
    Reset,
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

/// Score derived from the answers recorded so far.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuizResult {
    pub total_questions: usize,
    pub correct_count: usize,
    pub percentage: f64,
}

impl QuizResult {
    #[allow(clippy::cast_precision_loss)]
    fn new(total_questions: usize, correct_count: usize) -> Self {
        let percentage = if total_questions == 0 {
            0.0
        } else {
            100.0 * correct_count as f64 / total_questions as f64
        };
        Self {
            total_questions,
            correct_count,
            percentage,
        }
    }
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// One attempt at a fixed question set.
///
/// Starts at `InProgress { current: 0 }` with no answers. `Completed` is only
/// reached by advancing past the last question, which requires every question
/// to have been answered in order.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    questions: QuestionSet,
    answers: BTreeMap<usize, String>,
    phase: QuizPhase,
}

impl QuizSession {
    #[must_use]
    pub fn new(questions: QuestionSet) -> Self {
        Self {
            questions,
            answers: BTreeMap::new(),
            phase: QuizPhase::InProgress { current: 0 },
        }
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, QuizPhase::Completed)
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            QuizPhase::InProgress { current } => Some(current),
            QuizPhase::Completed => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().map(|i| &self.questions[i])
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    /// Whether `advance` would currently be accepted.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.current_index()
            .is_some_and(|i| self.answers.contains_key(&i))
    }

    /// Record `option` for the current question, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// `AlreadyCompleted` after the last advance, `UnknownOption` when the
    /// option does not belong to the current question. State is unchanged on
    /// error.
    pub fn select_answer(&mut self, option: impl Into<String>) -> Result<(), QuizError> {
        let QuizPhase::InProgress { current } = self.phase else {
            return Err(QuizError::AlreadyCompleted);
        };
        let option = option.into();
        if !self.questions[current].has_option(&option) {
            return Err(QuizError::UnknownOption {
                index: current,
                option,
            });
        }
        self.answers.insert(current, option);
        Ok(())
    }

    /// Move to the next question, or complete after the last one.
    ///
    /// # Errors
    ///
    /// `AlreadyCompleted`, or `Unanswered` when the current question has no
    /// selection yet. State is unchanged on error.
    pub fn advance(&mut self) -> Result<(), QuizError> {
        let QuizPhase::InProgress { current } = self.phase else {
            return Err(QuizError::AlreadyCompleted);
        };
        if !self.answers.contains_key(&current) {
            return Err(QuizError::Unanswered { index: current });
        }
        self.phase = if current >= self.questions.last_index() {
            QuizPhase::Completed
        } else {
            QuizPhase::InProgress {
                current: current + 1,
            }
        };
        Ok(())
    }

    /// Discard all answers and start over on the same questions.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.phase = QuizPhase::InProgress { current: 0 };
    }

    /// Pure transition: the state after `action`, or why it was refused.
    ///
    /// # Errors
    ///
    /// Propagates the `QuizError` of the underlying mutator.
    pub fn try_apply(&self, action: QuizAction) -> Result<Self, QuizError> {
        let mut next = self.clone();
        match action {
            QuizAction::Select(option) => next.select_answer(option)?,
            QuizAction::Advance => next.advance()?,
            QuizAction::Reset => next.reset(),
        }
        Ok(next)
    }

    /// Apply `action`, ignoring it when the current state refuses it.
    #[must_use]
    pub fn dispatch(self, action: QuizAction) -> Self {
        match self.try_apply(action) {
            Ok(next) => next,
            Err(_) => self,
        }
    }

    /// Score over the answers recorded so far; unanswered questions count as
    /// wrong.
    #[must_use]
    pub fn result(&self) -> QuizResult {
        let correct = self
            .answers
            .iter()
            .filter(|(i, answer)| self.questions[**i].is_correct(answer))
            .count();
        QuizResult::new(self.questions.len(), correct)
    }

    /// The score, once the quiz is completed.
    #[must_use]
    pub fn final_result(&self) -> Option<QuizResult> {
        self.is_complete().then(|| self.result())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionDraft;

    fn two_questions() -> QuestionSet {
        QuestionSet::from_drafts([
            QuestionDraft::new("Q1", ["A", "B"], "A"),
            QuestionDraft::new("Q2", ["C", "D"], "D"),
        ])
        .unwrap()
    }

    fn three_questions() -> QuestionSet {
        QuestionSet::from_drafts([
            QuestionDraft::new("Q1", ["A", "B"], "A"),
            QuestionDraft::new("Q2", ["C", "D"], "D"),
            QuestionDraft::new("Q3", ["E", "F", "G"], "G"),
        ])
        .unwrap()
    }

    #[test]
    fn starts_at_first_question_without_answers() {
        let quiz = QuizSession::new(two_questions());
        assert_eq!(quiz.phase(), QuizPhase::InProgress { current: 0 });
        assert!(quiz.answers().is_empty());
        assert!(!quiz.can_advance());
        assert_eq!(quiz.current_question().unwrap().prompt(), "Q1");
    }

    #[test]
    fn scored_walkthrough_reaches_completed() {
        let mut quiz = QuizSession::new(two_questions());
        quiz.select_answer("A").unwrap();
        quiz.advance().unwrap();
        quiz.select_answer("C").unwrap();
        quiz.advance().unwrap();

        assert!(quiz.is_complete());
        assert_eq!(
            quiz.final_result(),
            Some(QuizResult {
                total_questions: 2,
                correct_count: 1,
                percentage: 50.0,
            })
        );
    }

    #[test]
    fn n_answer_advance_pairs_complete_the_quiz() {
        let questions = three_questions();
        let mut quiz = QuizSession::new(questions.clone());
        for (i, question) in questions.iter().enumerate() {
            assert_eq!(quiz.current_index(), Some(i));
            quiz.select_answer(question.options()[0].clone()).unwrap();
            quiz.advance().unwrap();
        }
        assert!(quiz.is_complete());
        assert_eq!(quiz.answers().len(), questions.len());
    }

    #[test]
    fn advance_without_answer_is_refused_and_changes_nothing() {
        let mut quiz = QuizSession::new(two_questions());
        let before = quiz.clone();
        assert_eq!(quiz.advance(), Err(QuizError::Unanswered { index: 0 }));
        assert_eq!(quiz, before);

        let dispatched = quiz.clone().dispatch(QuizAction::Advance);
        assert_eq!(dispatched, before);
    }

    #[test]
    fn reselecting_overwrites_previous_choice() {
        let mut quiz = QuizSession::new(two_questions());
        quiz.select_answer("A").unwrap();
        quiz.select_answer("B").unwrap();
        assert_eq!(quiz.answer(0), Some("B"));
        assert_eq!(quiz.answers().len(), 1);
        assert_eq!(quiz.current_index(), Some(0));
    }

    #[test]
    fn foreign_option_is_refused() {
        let mut quiz = QuizSession::new(two_questions());
        let err = quiz.select_answer("C").unwrap_err();
        assert_eq!(
            err,
            QuizError::UnknownOption {
                index: 0,
                option: "C".into(),
            }
        );
        assert!(quiz.answers().is_empty());
    }

    #[test]
    fn completed_quiz_refuses_mutation() {
        let quiz = QuizSession::new(two_questions())
            .dispatch(QuizAction::Select("A".into()))
            .dispatch(QuizAction::Advance)
            .dispatch(QuizAction::Select("D".into()))
            .dispatch(QuizAction::Advance);
        assert!(quiz.is_complete());

        assert_eq!(
            quiz.try_apply(QuizAction::Select("A".into())),
            Err(QuizError::AlreadyCompleted)
        );
        assert_eq!(
            quiz.try_apply(QuizAction::Advance),
            Err(QuizError::AlreadyCompleted)
        );
        assert_eq!(quiz.final_result().unwrap().percentage, 100.0);
    }

    #[test]
    fn reset_returns_initial_state() {
        let questions = two_questions();
        let mut quiz = QuizSession::new(questions.clone());
        quiz.select_answer("B").unwrap();
        quiz.advance().unwrap();
        quiz.select_answer("C").unwrap();
        quiz.advance().unwrap();
        assert!(quiz.is_complete());

        let reset = quiz.dispatch(QuizAction::Reset);
        assert_eq!(reset, QuizSession::new(questions));
    }

    #[test]
    fn in_progress_result_counts_only_answered_questions() {
        let mut quiz = QuizSession::new(three_questions());
        assert_eq!(quiz.result().correct_count, 0);
        assert_eq!(quiz.result().percentage, 0.0);
        assert_eq!(quiz.final_result(), None);

        quiz.select_answer("A").unwrap();
        let result = quiz.result();
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.correct_count, 1);
        assert!((result.percentage - 100.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn percentage_stays_within_bounds_for_every_answer_combination() {
        let questions = three_questions();
        for a in ["A", "B"] {
            for b in ["C", "D"] {
                for c in ["E", "F", "G"] {
                    let quiz = [a, b, c].into_iter().fold(
                        QuizSession::new(questions.clone()),
                        |quiz, option| {
                            quiz.dispatch(QuizAction::Select(option.into()))
                                .dispatch(QuizAction::Advance)
                        },
                    );
                    let result = quiz.final_result().unwrap();
                    let expected = [a == "A", b == "D", c == "G"]
                        .into_iter()
                        .filter(|hit| *hit)
                        .count();
                    assert_eq!(result.correct_count, expected);
                    assert!((0.0..=100.0).contains(&result.percentage));
                    assert_eq!(
                        result.percentage,
                        100.0 * expected as f64 / 3.0
                    );
                }
            }
        }
    }
}
