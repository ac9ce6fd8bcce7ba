use async_trait::async_trait;

use trivia_core::model::{CategoryId, Difficulty, QuestionBatch, SessionFilters};

use crate::error::FetchError;

/// Questions requested per session unless the host overrides it.
pub const DEFAULT_BATCH_SIZE: u8 = 5;

/// One logical fetch: how many questions, and for which filters.
///
/// The question type is always multiple-choice; that is fixed at the wire
/// layer by each source implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    amount: u8,
    filters: SessionFilters,
}

impl FetchRequest {
    /// A request for the default batch size.
    #[must_use]
    pub fn new(filters: SessionFilters) -> Self {
        Self::with_amount(filters, DEFAULT_BATCH_SIZE)
    }

    #[must_use]
    pub fn with_amount(filters: SessionFilters, amount: u8) -> Self {
        Self { amount, filters }
    }

    #[must_use]
    pub fn amount(&self) -> u8 {
        self.amount
    }

    #[must_use]
    pub fn category(&self) -> Option<CategoryId> {
        self.filters.category()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.filters.difficulty()
    }
}

/// Contract for anything that can produce a batch of questions.
///
/// One attempt per call, no internal retry; an empty batch is a valid
/// success and means "no results for these filters". Timeouts, if any,
/// live in the implementation and surface as `FetchError::NetworkFailure`.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch a batch of multiple-choice questions.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the questions could not be produced.
    async fn fetch(&self, request: &FetchRequest) -> Result<QuestionBatch, FetchError>;
}
