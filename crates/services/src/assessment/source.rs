use std::path::PathBuf;

use vida_core::content::theory_assessment;
use vida_core::model::{QuestionDraft, QuestionSet};

use crate::error::AssessmentError;

/// Supplies the fixed, ordered question set an assessment runs over.
pub trait QuestionSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `AssessmentError` if the content cannot be loaded or breaks a
    /// question invariant.
    fn questions(&self) -> Result<QuestionSet, AssessmentError>;
}

/// The assessment bundled with the portal.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinQuestions;

impl QuestionSource for BuiltinQuestions {
    fn questions(&self) -> Result<QuestionSet, AssessmentError> {
        Ok(theory_assessment()?)
    }
}

/// Questions read from a JSON array of `{prompt, options, correct_option}`.
#[derive(Debug, Clone)]
pub struct JsonQuestionSource {
    path: PathBuf,
}

impl JsonQuestionSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QuestionSource for JsonQuestionSource {
    fn questions(&self) -> Result<QuestionSet, AssessmentError> {
        let raw = std::fs::read_to_string(&self.path)?;
        let drafts: Vec<QuestionDraft> =
            serde_json::from_str(&raw).map_err(|e| AssessmentError::Parse(e.to_string()))?;
        Ok(QuestionSet::from_drafts(drafts)?)
    }
}
