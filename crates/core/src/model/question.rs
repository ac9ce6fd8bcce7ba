use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// One fetch's worth of questions. May be empty, which callers treat as
/// "no results for these filters" rather than an error.
pub type QuestionBatch = Vec<Question>;

/// A single multiple-choice trivia question.
///
/// Text fields are stored exactly as the provider sent them, HTML entities
/// included (`&amp;`, `&quot;`, …). Decoding is a presentation concern;
/// answer comparisons happen on the raw values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    category: String,
    prompt: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl Question {
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Self {
        Self {
            category: category.into(),
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers,
        }
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn incorrect_answers(&self) -> &[String] {
        &self.incorrect_answers
    }

    /// Number of answer options this question presents.
    #[must_use]
    pub fn answer_count(&self) -> usize {
        self.incorrect_answers.len() + 1
    }

    /// Returns all answers (correct + incorrect) in a fresh uniformly
    /// random order.
    ///
    /// The permutation is recomputed on every call and never cached, so a
    /// caller that needs a stable order for one screen must capture the
    /// result once and reuse it.
    #[must_use]
    pub fn all_answers<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut answers = Vec::with_capacity(self.answer_count());
        answers.extend(self.incorrect_answers.iter().cloned());
        answers.push(self.correct_answer.clone());
        answers.shuffle(rng);
        answers
    }
}
