#![forbid(unsafe_code)]

pub mod error;
pub mod opentdb;
pub mod session;
pub mod source;
pub mod workflow;

pub use trivia_core::model::{
    CategoryId, Difficulty, Question, QuestionBatch, SessionFilters,
};

pub use error::{FetchError, LoadFailure, SessionError};
pub use opentdb::{OpenTdbConfig, OpenTdbSource};
pub use session::{
    Advance, AnswerResult, FetchTicket, LoadOutcome, Phase, QuestionReady, QuizSession,
    SessionProgress,
};
pub use source::{DEFAULT_BATCH_SIZE, FetchRequest, QuestionSource};
pub use workflow::QuizService;
