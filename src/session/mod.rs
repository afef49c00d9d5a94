//! Practice session state machine
//!
//! Drives the question flow: `Idle -> Generating -> Presenting ->
//! Submitting -> Presenting (next) | Idle (queue exhausted)`. The session
//! owns the in-memory pending-question queue and the single current
//! question; all durable state goes through the store, and store mutation
//! for a submission happens only after a successful evaluation response.

use std::collections::VecDeque;

use thiserror::Error;

use crate::backend::{BackendError, Evaluation, QuizBackend};
use crate::store::model::{HistoryEntry, RetryRequest, UNKNOWN_TOPIC};
use crate::store::{PersistentStore, StoreKey};

/// Where the session currently sits in the question flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// No active question
    #[default]
    Idle,
    /// Waiting for the generation endpoint
    Generating,
    /// A question is displayed and awaiting an answer
    Presenting,
    /// Waiting for the evaluation endpoint
    Submitting,
}

/// Validated parameters for a generate request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateParams {
    pub topic: String,
    pub count: u32,
}

/// How a successful generate call resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Questions arrived; the first one is now presenting
    Presented,
    /// The backend returned zero questions
    NoQuestions,
}

/// Result of a successful answer submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// The backend's evaluation, for feedback display
    pub evaluation: Evaluation,
    /// Whether another question followed from the queue
    pub queue_exhausted: bool,
}

/// Errors the session surfaces to the user
///
/// Nothing here is fatal: every error path leaves the session in a stable,
/// previously valid phase (`Idle` or `Presenting`).
#[derive(Debug, Error)]
pub enum SessionError {
    /// Request rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// Submission attempted with nothing presenting
    #[error("No question is currently displayed.")]
    NoActiveQuestion,

    /// The backend call failed
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl SessionError {
    /// Message suitable for the status line
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Backend(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// The allowed range for the requested question count
pub const MIN_QUESTIONS: u32 = 1;
pub const MAX_QUESTIONS: u32 = 5;

/// Validate a user-issued generate request before any network call
pub fn validate_generate_request(
    topic: &str,
    count: Option<u32>,
) -> Result<GenerateParams, SessionError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(SessionError::Validation(
            "Please enter a topic to generate questions!".to_string(),
        ));
    }

    match count {
        Some(n) if (MIN_QUESTIONS..=MAX_QUESTIONS).contains(&n) => {
            Ok(GenerateParams { topic: topic.to_string(), count: n })
        }
        _ => Err(SessionError::Validation(
            "Please enter a valid number of questions between 1 and 5.".to_string(),
        )),
    }
}

/// One practice session
pub struct PracticeSession {
    store: PersistentStore,
    phase: Phase,
    queue: VecDeque<String>,
    current: Option<String>,
    /// Topic recorded into history entries for submitted answers
    topic: String,
    /// Set when a retry request was consumed on startup
    retry_notice: Option<String>,
}

impl PracticeSession {
    /// Start a session, consuming any pending retry request
    ///
    /// A stored retry request seeds the queue with its single question,
    /// pre-fills the topic, and is deleted from the store immediately.
    pub fn new(store: PersistentStore) -> Self {
        let mut session = Self {
            store,
            phase: Phase::Idle,
            queue: VecDeque::new(),
            current: None,
            topic: String::new(),
            retry_notice: None,
        };

        if let Some(RetryRequest { question, topic }) = session.store.take_retry_request() {
            tracing::info!("Resuming retried question on {topic}");
            session.retry_notice = Some(format!("Retrying question on: {topic}"));
            session.topic = topic;
            session.queue.push_back(question);
            session.present_next();
        }

        session
    }

    /// Current phase of the question flow
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The question currently awaiting an answer, if any
    pub fn current_question(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Questions still queued behind the current one
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Topic the session is practicing
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Notice to surface when a retry request was consumed on startup
    pub fn take_retry_notice(&mut self) -> Option<String> {
        self.retry_notice.take()
    }

    /// Read access to the backing store
    pub fn store(&self) -> &PersistentStore {
        &self.store
    }

    /// Request a fresh batch of questions from the backend
    ///
    /// `params` must come from [`validate_generate_request`]. On any error
    /// the session returns to `Idle` with no state mutated.
    pub async fn generate(
        &mut self,
        backend: &QuizBackend,
        params: GenerateParams,
    ) -> Result<GenerateOutcome, SessionError> {
        self.phase = Phase::Generating;

        match backend.generate_questions(&params.topic, params.count).await {
            Ok(questions) => {
                self.topic = params.topic;
                Ok(self.apply_generated(questions))
            }
            Err(e) => {
                self.phase = Phase::Idle;
                Err(e.into())
            }
        }
    }

    /// Install a freshly generated question batch
    ///
    /// Replaces the pending queue wholesale. An empty batch lands back in
    /// `Idle` (a zero-result success, not an error).
    pub fn apply_generated(&mut self, questions: Vec<String>) -> GenerateOutcome {
        if questions.is_empty() {
            self.queue.clear();
            self.current = None;
            self.phase = Phase::Idle;
            return GenerateOutcome::NoQuestions;
        }

        self.queue = questions.into();
        self.present_next();
        GenerateOutcome::Presented
    }

    /// Submit the answer for the current question
    ///
    /// On success all four aggregates are updated and persisted and the next
    /// question (if any) is presented. On failure nothing is mutated and the
    /// same question stays presenting so the user can retry the submission.
    pub async fn submit(
        &mut self,
        backend: &QuizBackend,
        answer: &str,
    ) -> Result<SubmitOutcome, SessionError> {
        let answer = validate_answer(answer)?.to_string();

        let Some(question) = self.current.clone() else {
            return Err(SessionError::NoActiveQuestion);
        };

        self.phase = Phase::Submitting;

        match backend.evaluate_answer(&question, &answer).await {
            Ok(evaluation) => Ok(self.apply_evaluation(&answer, evaluation)),
            Err(e) => {
                // All-or-nothing: no counters, performance data, or history
                // were touched before this point
                self.phase = Phase::Presenting;
                Err(e.into())
            }
        }
    }

    /// Fold a successful evaluation into the persistent aggregates
    ///
    /// Increments the counters, applies the legacy incremental per-topic
    /// accuracy update (priors rescanned from history, not cached), appends
    /// the history entry, persists all four keys, and advances the queue.
    pub fn apply_evaluation(&mut self, answer: &str, evaluation: Evaluation) -> SubmitOutcome {
        let question = self.current.take().unwrap_or_default();
        let topic =
            if self.topic.trim().is_empty() { UNKNOWN_TOPIC } else { self.topic.trim() };

        let question_count = self.store.question_count() + 1;
        let correct_count =
            self.store.correct_count() + u32::from(evaluation.is_correct);

        let mut history = self.store.history();
        let mut performance = self.store.performance();
        performance.record(topic, &history, evaluation.is_correct);

        history.push(HistoryEntry::new(
            question,
            answer,
            evaluation.ai_feedback.clone(),
            evaluation.is_correct,
            evaluation.correct_answer.clone(),
            topic,
        ));

        self.persist(StoreKey::QuestionCount, &question_count);
        self.persist(StoreKey::CorrectCount, &correct_count);
        self.persist(StoreKey::PerformanceData, &performance);
        self.persist(StoreKey::PracticeHistory, &history);

        let queue_exhausted = self.queue.is_empty();
        if queue_exhausted {
            self.phase = Phase::Idle;
        } else {
            self.present_next();
        }

        SubmitOutcome { evaluation, queue_exhausted }
    }

    /// Dequeue the next question into the presenting slot
    fn present_next(&mut self) {
        self.current = self.queue.pop_front();
        self.phase = if self.current.is_some() { Phase::Presenting } else { Phase::Idle };
    }

    fn persist<T: serde::Serialize>(&self, key: StoreKey, value: &T) {
        // Storage-full and similar write failures are logged, not fatal
        if let Err(e) = self.store.save(key, value) {
            tracing::warn!("Failed to persist {}: {e:#}", key.file_name());
        }
    }
}

/// Validate an answer before submission
pub fn validate_answer(answer: &str) -> Result<&str, SessionError> {
    let answer = answer.trim();
    if answer.is_empty() {
        Err(SessionError::Validation(
            "Please type an answer before submitting!".to_string(),
        ))
    } else {
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::stats;

    fn temp_session() -> (TempDir, PracticeSession) {
        let dir = TempDir::new().unwrap();
        let store = PersistentStore::new(dir.path());
        (dir, PracticeSession::new(store))
    }

    fn evaluation(is_correct: bool) -> Evaluation {
        Evaluation {
            is_correct,
            ai_feedback: "feedback".to_string(),
            correct_answer: Some("canonical".to_string()),
        }
    }

    #[test]
    fn validation_rejects_empty_topic() {
        let err = validate_generate_request("   ", Some(3)).unwrap_err();
        assert!(err.to_string().contains("topic"));
    }

    #[test]
    fn validation_rejects_out_of_range_count() {
        assert!(validate_generate_request("Biology", Some(0)).is_err());
        assert!(validate_generate_request("Biology", Some(6)).is_err());
        assert!(validate_generate_request("Biology", None).is_err());
    }

    #[test]
    fn validation_accepts_range_bounds() {
        assert!(validate_generate_request("Biology", Some(1)).is_ok());
        assert!(validate_generate_request("Biology", Some(5)).is_ok());
    }

    #[test]
    fn validation_trims_topic() {
        let params = validate_generate_request("  Biology  ", Some(2)).unwrap();
        assert_eq!(params.topic, "Biology");
    }

    #[test]
    fn empty_answer_is_rejected() {
        assert!(matches!(validate_answer("   "), Err(SessionError::Validation(_))));
        assert_eq!(validate_answer(" mitosis ").unwrap(), "mitosis");
    }

    #[tokio::test]
    async fn submit_without_active_question_is_rejected() {
        let (_dir, mut session) = temp_session();
        let backend = QuizBackend::new("http://127.0.0.1:9");

        let result = session.submit(&backend, "answer").await;

        assert!(matches!(result, Err(SessionError::NoActiveQuestion)));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn new_session_starts_idle() {
        let (_dir, session) = temp_session();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.current_question(), None);
    }

    #[test]
    fn generated_batch_presents_first_question() {
        let (_dir, mut session) = temp_session();
        session.topic = "Biology".to_string();

        let outcome = session.apply_generated(vec!["Q1".into(), "Q2".into(), "Q3".into()]);

        assert_eq!(outcome, GenerateOutcome::Presented);
        assert_eq!(session.phase(), Phase::Presenting);
        assert_eq!(session.current_question(), Some("Q1"));
        assert_eq!(session.queue_len(), 2);
    }

    #[test]
    fn empty_batch_returns_to_idle() {
        let (_dir, mut session) = temp_session();

        let outcome = session.apply_generated(vec![]);

        assert_eq!(outcome, GenerateOutcome::NoQuestions);
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.current_question(), None);
    }

    #[test]
    fn retry_request_seeds_session_and_is_consumed() {
        let dir = TempDir::new().unwrap();
        let store = PersistentStore::new(dir.path());
        store
            .save(
                StoreKey::RetryRequest,
                &RetryRequest { question: "Q1".into(), topic: "Biology".into() },
            )
            .unwrap();

        let mut session = PracticeSession::new(store);

        assert_eq!(session.current_question(), Some("Q1"));
        assert_eq!(session.queue_len(), 0);
        assert_eq!(session.topic(), "Biology");
        assert_eq!(session.phase(), Phase::Presenting);
        assert_eq!(
            session.take_retry_notice().as_deref(),
            Some("Retrying question on: Biology")
        );

        // Consume-once: the stored request is gone after the first read
        assert_eq!(session.store().take_retry_request(), None);
    }

    #[test]
    fn biology_batch_scenario() {
        // Generate 3 questions, answer all 3 (2 correct, 1 incorrect)
        let (_dir, mut session) = temp_session();
        session.topic = "Biology".to_string();
        session.apply_generated(vec!["Q1".into(), "Q2".into(), "Q3".into()]);

        let first = session.apply_evaluation("A1", evaluation(true));
        assert!(!first.queue_exhausted);
        assert_eq!(session.current_question(), Some("Q2"));

        session.apply_evaluation("A2", evaluation(false));
        let last = session.apply_evaluation("A3", evaluation(true));
        assert!(last.queue_exhausted);
        assert_eq!(session.phase(), Phase::Idle);

        let store = session.store();
        assert_eq!(store.question_count(), 3);
        assert_eq!(store.correct_count(), 2);

        let history = store.history();
        assert_eq!(history.len(), 3);
        let questions: Vec<&str> = history.iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["Q1", "Q2", "Q3"]);
        assert!(history.iter().all(|e| e.topic == "Biology"));

        let weakest = stats::compute_weakest_topic(&history);
        assert_eq!(weakest.topic.as_deref(), Some("Biology"));
        assert!((weakest.accuracy_percent - 200.0 / 3.0).abs() < 0.05);
    }

    #[test]
    fn counters_stay_consistent_with_history_through_the_session_flow() {
        // Divergence between the independently maintained counters and a
        // fresh derivation from history is a detectable inconsistency; this
        // pins the two together for the normal append path.
        let (_dir, mut session) = temp_session();
        session.topic = "Calculus".to_string();
        session.apply_generated(vec!["Q1".into(), "Q2".into(), "Q3".into()]);

        session.apply_evaluation("A1", evaluation(true));
        session.apply_evaluation("A2", evaluation(true));
        session.apply_evaluation("A3", evaluation(false));

        let store = session.store();
        let history = store.history();
        assert_eq!(store.question_count() as usize, history.len());
        assert_eq!(
            store.correct_count() as usize,
            history.iter().filter(|e| e.is_correct).count()
        );
    }

    #[test]
    fn performance_data_updates_incrementally() {
        let (_dir, mut session) = temp_session();
        session.topic = "Biology".to_string();
        session.apply_generated(vec!["Q1".into(), "Q2".into()]);

        session.apply_evaluation("A1", evaluation(true));
        let after_first = session.store().performance();
        assert_eq!(after_first.topics["Biology"], 1.0);

        session.apply_evaluation("A2", evaluation(false));
        let after_second = session.store().performance();
        assert_eq!(after_second.topics["Biology"], 0.5);
    }

    #[test]
    fn blank_topic_records_unknown_topic() {
        let (_dir, mut session) = temp_session();
        session.apply_generated(vec!["Q1".into()]);

        session.apply_evaluation("A1", evaluation(true));

        let history = session.store().history();
        assert_eq!(history[0].topic, UNKNOWN_TOPIC);
    }

    #[tokio::test]
    async fn generate_failure_returns_to_idle_without_mutation() {
        let (_dir, mut session) = temp_session();
        // Port 9 (discard) is never serving HTTP on loopback
        let backend = QuizBackend::new("http://127.0.0.1:9");

        let params = GenerateParams { topic: "Biology".to_string(), count: 3 };
        let result = session.generate(&backend, params).await;

        assert!(result.is_err());
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.current_question(), None);
        assert_eq!(session.store().question_count(), 0);
    }

    #[tokio::test]
    async fn submit_failure_keeps_question_and_leaves_store_untouched() {
        let (_dir, mut session) = temp_session();
        session.topic = "Biology".to_string();
        session.apply_generated(vec!["Q1".into(), "Q2".into()]);

        let backend = QuizBackend::new("http://127.0.0.1:9");
        let result = session.submit(&backend, "my answer").await;

        assert!(result.is_err());
        // Same question still presenting, ready for re-submission
        assert_eq!(session.phase(), Phase::Presenting);
        assert_eq!(session.current_question(), Some("Q1"));
        assert_eq!(session.queue_len(), 1);

        let store = session.store();
        assert_eq!(store.question_count(), 0);
        assert_eq!(store.correct_count(), 0);
        assert!(store.history().is_empty());
    }
}
