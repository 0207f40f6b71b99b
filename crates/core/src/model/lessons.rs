use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("module title cannot be empty")]
    EmptyTitle,

    #[error("module progress must be between 0 and 100, got {progress}")]
    ProgressOutOfRange { progress: u8 },
}

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

/// What opening a module does, given where the student stands in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonStart {
    /// Completed modules open their content for review.
    Review,
    /// The module the student is in the middle of.
    Resume,
    Begin,
}

/// One theoretical module of the course and the student's progress in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonModule {
    title: String,
    hours: u32,
    progress: u8,
    completed: bool,
    current: bool,
}

impl LessonModule {
    /// # Errors
    ///
    /// Returns `LessonError` for a blank title or a progress above 100.
    pub fn new(title: impl Into<String>, hours: u32, progress: u8) -> Result<Self, LessonError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        if progress > 100 {
            return Err(LessonError::ProgressOutOfRange { progress });
        }
        Ok(Self {
            title,
            hours,
            progress,
            completed: false,
            current: false,
        })
    }

    #[must_use]
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Mark this as the module the student is working through.
    #[must_use]
    pub fn current(mut self) -> Self {
        self.current = true;
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn hours(&self) -> u32 {
        self.hours
    }

    /// Percentage of the module's workload done, `0..=100`.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current
    }

    #[must_use]
    pub fn start(&self) -> LessonStart {
        if self.completed {
            LessonStart::Review
        } else if self.current {
            LessonStart::Resume
        } else {
            LessonStart::Begin
        }
    }

    /// Hours of this module still to be taken.
    #[must_use]
    pub fn hours_remaining(&self) -> f64 {
        let hours = f64::from(self.hours);
        hours - hours * f64::from(self.progress) / 100.0
    }
}

//
// ─── COURSE PROGRESS ───────────────────────────────────────────────────────────
//

/// Course-wide figures shown on the lessons screen.
///
/// Unrelated to assessment scoring: this weighs module progress by workload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseProgress {
    pub total_hours: u32,
    /// Module progress weighted by each module's share of the total hours.
    pub percentage: f64,
    pub hours_remaining: f64,
}

impl CourseProgress {
    /// An empty course, or one with no hours, is at 0%.
    #[must_use]
    pub fn of(modules: &[LessonModule]) -> Self {
        let total_hours: u32 = modules.iter().map(LessonModule::hours).sum();
        let percentage = if total_hours == 0 {
            0.0
        } else {
            let total = f64::from(total_hours);
            modules
                .iter()
                .map(|m| f64::from(m.progress) * f64::from(m.hours) / total)
                .sum()
        };
        Self {
            total_hours,
            percentage,
            hours_remaining: modules.iter().map(LessonModule::hours_remaining).sum(),
        }
    }
}
