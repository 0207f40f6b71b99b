use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least two options, got {count}")]
    TooFewOptions { count: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("option \"{option}\" appears more than once")]
    DuplicateOption { option: String },

    #[error("correct option \"{option}\" is not one of the options")]
    CorrectOptionMissing { option: String },

    #[error("a question set cannot be empty")]
    EmptySet,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Unvalidated question content, as supplied by a content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: String,
}

impl QuestionDraft {
    #[must_use]
    pub fn new<S: Into<String>>(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = S>,
        correct_option: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_option: correct_option.into(),
        }
    }

    /// Check the question invariants and freeze the content.
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionError` found: blank prompt, fewer than two
    /// options, a blank or repeated option, or a correct option that is not
    /// among the options.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                count: self.options.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        for (index, option) in self.options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            if !seen.insert(option.as_str()) {
                return Err(QuestionError::DuplicateOption {
                    option: option.clone(),
                });
            }
        }

        if !seen.contains(self.correct_option.as_str()) {
            return Err(QuestionError::CorrectOptionMissing {
                option: self.correct_option,
            });
        }

        Ok(Question {
            prompt: self.prompt,
            options: self.options,
            correct_option: self.correct_option,
        })
    }
}

/// A validated multiple-choice question.
///
/// Options are distinct and `correct_option` equals exactly one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_option: String,
}

impl Question {
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_option == option
    }
}

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// Ordered, non-empty, shared sequence of questions.
///
/// Cloning is cheap so quiz transitions can return new sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet(Arc<[Question]>);

impl QuestionSet {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptySet` when `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionError> {
        if questions.is_empty() {
            return Err(QuestionError::EmptySet);
        }
        Ok(Self(questions.into()))
    }

    /// Validate every draft, in order, and build the set.
    ///
    /// # Errors
    ///
    /// Returns the first draft's `QuestionError`, or `EmptySet`.
    pub fn from_drafts(
        drafts: impl IntoIterator<Item = QuestionDraft>,
    ) -> Result<Self, QuestionError> {
        let questions = drafts
            .into_iter()
            .map(QuestionDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.0.len() - 1
    }
}

impl Deref for QuestionSet {
    type Target = [Question];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
