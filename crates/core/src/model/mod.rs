pub mod booking;
pub mod lessons;
mod question;
pub mod quiz;
mod session;

pub use booking::{Booking, BookingError, BookingStep, BookingWizard, TimeSlot, VehicleType};
pub use lessons::{CourseProgress, LessonError, LessonModule, LessonStart};
pub use question::{Question, QuestionDraft, QuestionError, QuestionSet};
pub use quiz::{QuizAction, QuizError, QuizPhase, QuizResult, QuizSession};
pub use session::{Session, SessionError, SessionToken};
