use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use engine::{
    Advance, CategoryId, Difficulty, FetchError, FetchRequest, LoadFailure, LoadOutcome, Phase,
    Question, QuestionBatch, QuestionSource, QuizService, QuizSession, SessionFilters,
};

/// Source delivering a fixed batch, counting how often it is asked.
struct FixedSource {
    batch: QuestionBatch,
    calls: AtomicUsize,
}

impl FixedSource {
    fn new(batch: QuestionBatch) -> Self {
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
impl QuestionSource for FixedSource {
    async fn fetch(&self, _request: &FetchRequest) -> Result<QuestionBatch, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.batch.clone())
    }
}

struct FlakySource {
    calls: AtomicUsize,
}

#[async_trait]
impl QuestionSource for FlakySource {
    async fn fetch(&self, _request: &FetchRequest) -> Result<QuestionBatch, FetchError> {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst);
        if attempt == 0 {
            Err(FetchError::NetworkFailure("connection reset".into()))
        } else {
            Ok(build_batch(2))
        }
    }
}

fn build_batch(len: usize) -> QuestionBatch {
    (0..len)
        .map(|id| {
            Question::new(
                "General Knowledge",
                format!("Question {id}?"),
                format!("Right {id}"),
                vec![format!("Wrong {id}a"), format!("Wrong {id}b")],
            )
        })
        .collect()
}

#[tokio::test]
async fn playthrough_and_replay_fetch_exactly_once() {
    let source = Arc::new(FixedSource::new(build_batch(5)));
    let service = QuizService::new(source.clone());
    let mut session = QuizSession::new();

    let filters = SessionFilters::any()
        .with_category(CategoryId::new(9))
        .with_difficulty(Difficulty::Easy);
    let outcome = service.start_session(&mut session, filters).await.unwrap();
    let LoadOutcome::Ready(first) = outcome else {
        panic!("expected questions");
    };
    assert_eq!(first.number, 1);
    assert_eq!(first.total, 5);

    // Answer the first question correctly and the rest wrong.
    let feedback = session.submit_answer("Right 0").unwrap();
    assert!(feedback.is_correct);
    session.advance().unwrap();

    while !session.is_finished() {
        session.submit_answer("not even close").unwrap();
        if let Advance::GameOver { score, total } = session.advance().unwrap() {
            assert_eq!(score, 1);
            assert_eq!(total, 5);
        }
    }

    // Replay reuses the fetched batch without another request.
    let ready = session.replay().unwrap();
    assert_eq!(ready.number, 1);
    assert_eq!(session.score(), 0);
    assert_eq!(session.phase(), Phase::AwaitingAnswer);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn errored_session_recovers_on_retry() {
    let source = Arc::new(FlakySource {
        calls: AtomicUsize::new(0),
    });
    let service = QuizService::new(source).with_batch_size(2);
    let mut session = QuizSession::new();

    let outcome = service
        .start_session(&mut session, SessionFilters::any())
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        LoadOutcome::Failed(LoadFailure::Fetch(FetchError::NetworkFailure(_)))
    ));
    assert_eq!(session.phase(), Phase::Errored);

    let retry = service
        .start_session(&mut session, SessionFilters::any())
        .await
        .unwrap();
    assert!(matches!(retry, LoadOutcome::Ready(_)));
    assert_eq!(session.phase(), Phase::AwaitingAnswer);
    assert_eq!(session.total_questions(), 2);
}

#[tokio::test]
async fn new_game_after_finish_fetches_again() {
    let source = Arc::new(FixedSource::new(build_batch(1)));
    let service = QuizService::new(source.clone());
    let mut session = QuizSession::new();

    service
        .start_session(&mut session, SessionFilters::any())
        .await
        .unwrap();
    session.submit_answer("Right 0").unwrap();
    assert!(matches!(
        session.advance().unwrap(),
        Advance::GameOver { score: 1, total: 1 }
    ));

    // Finished sessions may start over with fresh filters.
    let outcome = service
        .start_session(
            &mut session,
            SessionFilters::any().with_difficulty(Difficulty::Hard),
        )
        .await
        .unwrap();
    assert!(matches!(outcome, LoadOutcome::Ready(_)));
    assert_eq!(source.calls(), 2);
    assert_eq!(session.score(), 0);
}
