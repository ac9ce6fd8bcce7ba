use std::sync::Arc;

use tracing::{debug, info, warn};

use trivia_core::model::SessionFilters;

use crate::error::SessionError;
use crate::session::{LoadOutcome, QuizSession};
use crate::source::{DEFAULT_BATCH_SIZE, FetchRequest, QuestionSource};

/// Orchestrates session loading against an injected question source.
///
/// This is the only suspending path in the crate: it performs
/// `begin_load`, awaits the source on whatever context the host runs it
/// on, and applies the result with `finish_load`. All other session
/// operations are synchronous calls on `QuizSession` itself.
#[derive(Clone)]
pub struct QuizService {
    source: Arc<dyn QuestionSource>,
    batch_size: u8,
}

impl QuizService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            source,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override how many questions each session requests.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: u8) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Start (or retry) a session: fetch a batch for the given filters
    /// and load it into the session.
    ///
    /// The returned `LoadOutcome` carries the first question on success
    /// or the failure reason for the presentation layer. Exclusive access
    /// to the session (`&mut`) keeps commands from interleaving with the
    /// fetch; a second logical caller is rejected by `begin_load` with
    /// `SessionError::Busy` before any request goes out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the session cannot start loading in
    /// its current phase.
    pub async fn start_session(
        &self,
        session: &mut QuizSession,
        filters: SessionFilters,
    ) -> Result<LoadOutcome, SessionError> {
        let ticket = session.begin_load(filters)?;
        let request = FetchRequest::with_amount(ticket.filters(), self.batch_size);
        debug!(?filters, amount = self.batch_size, "starting quiz session");

        let outcome = session.finish_load(&ticket, self.source.fetch(&request).await);
        match &outcome {
            LoadOutcome::Ready(ready) => {
                info!(total = ready.total, "quiz session ready");
            }
            LoadOutcome::Failed(failure) => {
                warn!(%failure, "quiz session failed to load");
            }
            LoadOutcome::Stale => {
                debug!("discarded a stale fetch result");
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use trivia_core::model::{Question, QuestionBatch};

    use crate::error::{FetchError, LoadFailure};
    use crate::session::Phase;

    struct CannedSource {
        batch: Result<QuestionBatch, FetchError>,
        calls: AtomicUsize,
    }

    impl CannedSource {
        fn new(batch: Result<QuestionBatch, FetchError>) -> Self {
            Self {
                batch,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QuestionSource for CannedSource {
        async fn fetch(&self, _request: &FetchRequest) -> Result<QuestionBatch, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.batch.clone()
        }
    }

    fn build_batch(len: usize) -> QuestionBatch {
        (0..len)
            .map(|id| {
                Question::new(
                    "General Knowledge",
                    format!("Q{id}?"),
                    format!("A{id}"),
                    vec![format!("B{id}"), format!("C{id}")],
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn start_session_loads_the_requested_batch() {
        let source = Arc::new(CannedSource::new(Ok(build_batch(5))));
        let service = QuizService::new(source.clone());
        let mut session = QuizSession::new();

        let outcome = service
            .start_session(&mut session, SessionFilters::any())
            .await
            .unwrap();

        let LoadOutcome::Ready(ready) = outcome else {
            panic!("expected Ready");
        };
        assert_eq!(ready.total, 5);
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn empty_batches_surface_as_no_results() {
        let source = Arc::new(CannedSource::new(Ok(Vec::new())));
        let service = QuizService::new(source);
        let mut session = QuizSession::new();

        let outcome = service
            .start_session(&mut session, SessionFilters::any())
            .await
            .unwrap();

        assert_eq!(outcome, LoadOutcome::Failed(LoadFailure::NoResults));
        assert_eq!(session.phase(), Phase::Errored);
    }

    #[tokio::test]
    async fn mid_game_start_is_rejected_without_a_fetch() {
        let source = Arc::new(CannedSource::new(Ok(build_batch(2))));
        let service = QuizService::new(source.clone());
        let mut session = QuizSession::new();

        service
            .start_session(&mut session, SessionFilters::any())
            .await
            .unwrap();
        let err = service
            .start_session(&mut session, SessionFilters::any())
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::InvalidPhase { .. }));
        assert_eq!(source.calls(), 1);
    }
}
