#![forbid(unsafe_code)]

pub mod model;

pub use model::{
    CategoryId, Difficulty, ParseCategoryIdError, ParseDifficultyError, Question, QuestionBatch,
    SessionFilters,
};
