use rand::rng;
use std::fmt;

use trivia_core::model::{Question, QuestionBatch, SessionFilters};

use super::phase::Phase;
use super::progress::SessionProgress;
use crate::error::{FetchError, LoadFailure, SessionError};

//
// ─── NOTIFICATION PAYLOADS ─────────────────────────────────────────────────────
//

/// Everything the presentation layer needs to show one question.
///
/// `answers` is the shuffled order captured when the question became
/// current; it stays stable until the session advances or replays, so a
/// host can wire it to buttons without re-deriving (and accidentally
/// re-shuffling) the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReady {
    pub question: Question,
    pub answers: Vec<String>,
    /// 1-based position for display ("Question 2/5").
    pub number: usize,
    pub total: usize,
}

/// Outcome of submitting an answer, ready to render as feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub is_correct: bool,
    pub correct_answer: String,
}

/// What happened when the session moved past the feedback screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    NextQuestion(QuestionReady),
    GameOver { score: usize, total: usize },
}

/// Result of applying a completed fetch to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Questions loaded; the first one is ready to show.
    Ready(QuestionReady),
    /// The session is `Errored`; the failure says why.
    Failed(LoadFailure),
    /// The fetch belonged to a superseded load; state was left untouched.
    Stale,
}

/// Handle tying one in-flight fetch to the session generation that
/// started it. `finish_load` discards results whose ticket no longer
/// matches, so an abandoned fetch can never clobber newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    filters: SessionFilters,
}

impl FetchTicket {
    /// The filters captured when this load started.
    #[must_use]
    pub fn filters(&self) -> SessionFilters {
        self.filters
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state machine for one quiz playthrough.
///
/// Owns the question batch, current index, score, and phase. All
/// operations are synchronous and fail fast with `SessionError` when
/// called out of sequence; the async fetch is split into `begin_load` /
/// `finish_load` so the host decides where the suspension lives (see
/// `QuizService` for the usual wiring).
pub struct QuizSession {
    questions: QuestionBatch,
    current: usize,
    score: usize,
    phase: Phase,
    generation: u64,
    filters: SessionFilters,
    current_answers: Vec<String>,
}

impl QuizSession {
    /// A fresh session in the `Idle` phase, ready for `begin_load`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            current: 0,
            score: 0,
            phase: Phase::Idle,
            generation: 0,
            filters: SessionFilters::any(),
            current_answers: Vec::new(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Index of the current question, `0 ≤ index ≤ total_questions()`.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// The filters captured by the most recent `begin_load`.
    #[must_use]
    pub fn filters(&self) -> SessionFilters {
        self.filters
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = match self.phase {
            Phase::ShowingFeedback => self.current + 1,
            Phase::Finished => self.questions.len(),
            _ => self.current,
        };
        SessionProgress {
            total: self.questions.len(),
            answered,
            score: self.score,
            is_finished: self.is_finished(),
        }
    }

    /// The question currently presented to the player.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside
    /// `AwaitingAnswer`/`ShowingFeedback`.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        if !self.phase.has_current_question() {
            return Err(self.invalid("current_question"));
        }
        self.questions
            .get(self.current)
            .ok_or_else(|| self.invalid("current_question"))
    }

    /// The shuffled answer order captured for the current question.
    ///
    /// Stable across calls; it only changes when a different question
    /// becomes current or the session replays.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside
    /// `AwaitingAnswer`/`ShowingFeedback`.
    pub fn current_answers(&self) -> Result<&[String], SessionError> {
        if !self.phase.has_current_question() {
            return Err(self.invalid("current_answers"));
        }
        Ok(&self.current_answers)
    }

    /// Start loading questions for the given filters.
    ///
    /// Valid from `Idle`, `Errored` (retry), and `Finished` (new game).
    /// The returned ticket must be handed back to `finish_load` together
    /// with the source's result.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Busy` while a fetch is already in flight,
    /// and `SessionError::InvalidPhase` mid-game.
    pub fn begin_load(&mut self, filters: SessionFilters) -> Result<FetchTicket, SessionError> {
        if self.phase == Phase::Loading {
            return Err(SessionError::Busy);
        }
        if !self.phase.accepts_load() {
            return Err(self.invalid("begin_load"));
        }

        self.generation += 1;
        self.filters = filters;
        self.phase = Phase::Loading;
        Ok(FetchTicket {
            generation: self.generation,
            filters,
        })
    }

    /// Apply a completed fetch.
    ///
    /// A ticket from a superseded load (the session was reset since) is
    /// discarded as `LoadOutcome::Stale` without touching state. A
    /// non-empty batch enters `AwaitingAnswer` with index 0 and score 0;
    /// an empty batch or a fetch error enters `Errored` with the reason
    /// preserved for the presentation layer.
    pub fn finish_load(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<QuestionBatch, FetchError>,
    ) -> LoadOutcome {
        if self.phase != Phase::Loading || ticket.generation != self.generation {
            return LoadOutcome::Stale;
        }

        match outcome {
            Err(error) => {
                self.phase = Phase::Errored;
                LoadOutcome::Failed(LoadFailure::Fetch(error))
            }
            Ok(batch) if batch.is_empty() => {
                self.phase = Phase::Errored;
                LoadOutcome::Failed(LoadFailure::NoResults)
            }
            Ok(batch) => {
                self.questions = batch;
                self.current = 0;
                self.score = 0;
                self.capture_answers();
                self.phase = Phase::AwaitingAnswer;
                match self.question_ready() {
                    Some(ready) => LoadOutcome::Ready(ready),
                    None => LoadOutcome::Failed(LoadFailure::NoResults),
                }
            }
        }
    }

    /// Evaluate the player's selected answer against the current question.
    ///
    /// Comparison is exact string equality on the raw stored values
    /// (HTML entities and all); a match increments the score. The phase
    /// moves to `ShowingFeedback` whether or not the answer was correct.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside `AwaitingAnswer`;
    /// score and index are left untouched.
    pub fn submit_answer(&mut self, answer: &str) -> Result<AnswerResult, SessionError> {
        if self.phase != Phase::AwaitingAnswer {
            return Err(self.invalid("submit_answer"));
        }
        let Some(question) = self.questions.get(self.current) else {
            return Err(self.invalid("submit_answer"));
        };

        let is_correct = answer == question.correct_answer();
        if is_correct {
            self.score += 1;
        }
        self.phase = Phase::ShowingFeedback;

        Ok(AnswerResult {
            is_correct,
            correct_answer: question.correct_answer().to_owned(),
        })
    }

    /// Move past the feedback screen to the next question or the final
    /// score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside `ShowingFeedback`.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        if self.phase != Phase::ShowingFeedback {
            return Err(self.invalid("advance"));
        }

        self.current += 1;
        if self.current >= self.questions.len() {
            self.phase = Phase::Finished;
            return Ok(Advance::GameOver {
                score: self.score,
                total: self.questions.len(),
            });
        }

        self.capture_answers();
        let Some(ready) = self.question_ready() else {
            self.phase = Phase::Finished;
            return Ok(Advance::GameOver {
                score: self.score,
                total: self.questions.len(),
            });
        };
        self.phase = Phase::AwaitingAnswer;
        Ok(Advance::NextQuestion(ready))
    }

    /// Restart the playthrough with the same question batch.
    ///
    /// No fetch happens. Valid after `Finished`, and mid-game as a forced
    /// reset. Index and score return to 0 and the answer order is
    /// reshuffled.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` when no batch has been
    /// loaded (`Idle`, `Loading`, `Errored`).
    pub fn replay(&mut self) -> Result<QuestionReady, SessionError> {
        if !matches!(
            self.phase,
            Phase::Finished | Phase::AwaitingAnswer | Phase::ShowingFeedback
        ) {
            return Err(self.invalid("replay"));
        }

        self.current = 0;
        self.score = 0;
        self.capture_answers();
        let Some(ready) = self.question_ready() else {
            return Err(self.invalid("replay"));
        };
        self.phase = Phase::AwaitingAnswer;
        Ok(ready)
    }

    /// Forced return to `Idle`, discarding the batch and any in-flight
    /// fetch (its eventual completion will come back `Stale`).
    pub fn reset(&mut self) {
        self.generation += 1;
        self.questions.clear();
        self.current = 0;
        self.score = 0;
        self.current_answers.clear();
        self.phase = Phase::Idle;
    }

    fn capture_answers(&mut self) {
        self.current_answers = match self.questions.get(self.current) {
            Some(question) => question.all_answers(&mut rng()),
            None => Vec::new(),
        };
    }

    fn question_ready(&self) -> Option<QuestionReady> {
        let question = self.questions.get(self.current)?;
        Some(QuestionReady {
            question: question.clone(),
            answers: self.current_answers.clone(),
            number: self.current + 1,
            total: self.questions.len(),
        })
    }

    fn invalid(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidPhase {
            operation,
            phase: self.phase,
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("generation", &self.generation)
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
