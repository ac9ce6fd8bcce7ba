mod filters;
mod question;

pub use filters::{
    CategoryId, Difficulty, ParseCategoryIdError, ParseDifficultyError, SessionFilters,
};
pub use question::{Question, QuestionBatch};
