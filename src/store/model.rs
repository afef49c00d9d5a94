//! Data shapes persisted by the store

use std::collections::HashMap;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Topic substituted when an entry was stored without one
pub const UNKNOWN_TOPIC: &str = "Unknown Topic";

/// Sentinel the backend sends when it has no canonical answer
pub const NO_CANONICAL_ANSWER: &str = "N/A";

/// One answered question in the practice history
///
/// Entries are append-only and immutable once stored; the history list is
/// never reordered, only appended to or wholly cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Verbatim question text (also the lookup key for retries)
    pub question: String,

    /// The answer the user submitted
    pub student_answer: String,

    /// Opaque feedback text from the backend
    pub ai_feedback: String,

    /// Whether the backend judged the answer correct
    pub is_correct: bool,

    /// Canonical answer, when the backend has one
    #[serde(default)]
    pub correct_answer: Option<String>,

    /// Topic the question was generated for
    #[serde(default)]
    pub topic: String,

    /// Formatted local creation time; display-only, never parsed back
    pub timestamp: String,
}

impl HistoryEntry {
    /// Create an entry timestamped now
    pub fn new(
        question: impl Into<String>,
        student_answer: impl Into<String>,
        ai_feedback: impl Into<String>,
        is_correct: bool,
        correct_answer: Option<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            student_answer: student_answer.into(),
            ai_feedback: ai_feedback.into(),
            is_correct,
            correct_answer,
            topic: topic.into(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Topic for grouping, with the missing-topic default substituted
    pub fn topic_or_default(&self) -> &str {
        if self.topic.is_empty() { UNKNOWN_TOPIC } else { &self.topic }
    }

    /// Canonical answer suitable for display ("N/A" and empty treated as absent)
    pub fn displayable_answer(&self) -> Option<&str> {
        self.correct_answer
            .as_deref()
            .filter(|a| !a.is_empty() && *a != NO_CANONICAL_ANSWER)
    }
}

/// Legacy per-topic running accuracy (topic name -> fraction in [0, 1])
///
/// Seeded with five default topics at zero and updated incrementally per
/// answer. Nothing reads this back for display; the dashboard recomputes
/// topic accuracy from history instead. The two mechanisms may diverge and
/// callers must not assume they agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerformanceData {
    pub topics: HashMap<String, f64>,
}

impl Default for PerformanceData {
    fn default() -> Self {
        let topics = [
            "Artificial Intelligence",
            "Quantum Physics",
            "World History",
            "Calculus",
            "Biology",
        ]
        .into_iter()
        .map(|t| (t.to_string(), 0.0))
        .collect();

        Self { topics }
    }
}

impl PerformanceData {
    /// Fold one answer into the running accuracy for `topic`
    ///
    /// `history` is the history as it stood before this answer; prior counts
    /// are recomputed from it rather than cached. A topic not yet present in
    /// the map starts from the answer alone, ignoring any prior history for
    /// it (legacy behavior, kept for layout compatibility).
    pub fn record(&mut self, topic: &str, history: &[HistoryEntry], is_correct: bool) {
        let hit = if is_correct { 1.0 } else { 0.0 };

        match self.topics.get_mut(topic) {
            Some(accuracy) => {
                let prior_total = history.iter().filter(|e| e.topic == topic).count() as f64;
                let prior_correct =
                    history.iter().filter(|e| e.topic == topic && e.is_correct).count() as f64;
                *accuracy = (prior_correct + hit) / (prior_total + 1.0);
            }
            None => {
                self.topics.insert(topic.to_string(), hit);
            }
        }
    }
}

/// A question queued for retry from the history screen
///
/// At most one exists at a time; it is consumed and deleted the next time a
/// practice session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryRequest {
    pub question: String,
    pub topic: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(topic: &str, is_correct: bool) -> HistoryEntry {
        HistoryEntry::new("Q", "A", "feedback", is_correct, None, topic)
    }

    #[test]
    fn topic_defaults_when_empty() {
        let e = entry("", true);
        assert_eq!(e.topic_or_default(), UNKNOWN_TOPIC);
    }

    #[test]
    fn topic_defaults_when_absent_in_stored_json() {
        let json = r#"{
            "question": "Q",
            "studentAnswer": "A",
            "aiFeedback": "ok",
            "isCorrect": true,
            "timestamp": "2026-01-01 10:00:00"
        }"#;

        let e: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.topic_or_default(), UNKNOWN_TOPIC);
        assert_eq!(e.correct_answer, None);
    }

    #[test]
    fn na_sentinel_is_not_displayable() {
        let mut e = entry("Biology", false);
        e.correct_answer = Some(NO_CANONICAL_ANSWER.to_string());
        assert_eq!(e.displayable_answer(), None);

        e.correct_answer = Some("Mitochondria".to_string());
        assert_eq!(e.displayable_answer(), Some("Mitochondria"));
    }

    #[test]
    fn performance_data_seeds_five_topics_at_zero() {
        let data = PerformanceData::default();
        assert_eq!(data.topics.len(), 5);
        assert_eq!(data.topics["Biology"], 0.0);
        assert_eq!(data.topics["Calculus"], 0.0);
    }

    #[test]
    fn record_uses_history_priors_for_seeded_topic() {
        let mut data = PerformanceData::default();
        let history = vec![entry("Biology", true), entry("Biology", false)];

        // 1 correct of 2 prior, plus 1 correct now -> 2/3
        data.record("Biology", &history, true);
        assert!((data.topics["Biology"] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn record_starts_unknown_topic_from_the_answer_alone() {
        let mut data = PerformanceData::default();
        // Prior history for the topic exists but the map key does not; the
        // legacy update ignores the priors in that case.
        let history = vec![entry("Astronomy", false)];

        data.record("Astronomy", &history, true);
        assert_eq!(data.topics["Astronomy"], 1.0);
    }
}
