mod phase;
mod progress;
mod service;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use phase::Phase;
pub use progress::SessionProgress;
pub use service::{Advance, AnswerResult, FetchTicket, LoadOutcome, QuestionReady, QuizSession};
