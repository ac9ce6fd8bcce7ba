/// Where a quiz session currently sits in its lifecycle.
///
/// Transitions are driven exclusively by `QuizSession` operations:
///
/// ```text
/// Idle --begin_load--> Loading
/// Loading --finish_load (non-empty)--> AwaitingAnswer
/// Loading --finish_load (empty or error)--> Errored
/// AwaitingAnswer --submit_answer--> ShowingFeedback
/// ShowingFeedback --advance (more questions)--> AwaitingAnswer
/// ShowingFeedback --advance (no more questions)--> Finished
/// Finished --replay--> AwaitingAnswer
/// Errored --begin_load (retry)--> Loading
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    AwaitingAnswer,
    ShowingFeedback,
    Finished,
    Errored,
}

impl Phase {
    /// True for the phases from which a (re)load may start.
    #[must_use]
    pub fn accepts_load(&self) -> bool {
        matches!(self, Phase::Idle | Phase::Errored | Phase::Finished)
    }

    /// True while a question is on screen, answered or not.
    #[must_use]
    pub fn has_current_question(&self) -> bool {
        matches!(self, Phase::AwaitingAnswer | Phase::ShowingFeedback)
    }
}
