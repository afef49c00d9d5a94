//! Aggregate statistics derived from the practice history
//!
//! Pure functions over the stored data shapes; nothing here touches the
//! store itself. The dashboard re-derives everything from history on each
//! render rather than trusting the independently maintained counters.

use std::collections::HashMap;

use crate::store::model::HistoryEntry;

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overview {
    /// Total answers submitted
    pub total_questions: u32,
    /// Correct answers as a whole percentage, rounded half away from zero
    pub correct_rate_percent: u32,
}

/// How many questions were answered for one topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCount {
    pub topic: String,
    pub count: usize,
}

/// The topic with the lowest accuracy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeakestTopic {
    /// `None` when the history holds no entries at all
    pub topic: Option<String>,
    /// Unrounded accuracy percentage for that topic (0 when no topic)
    pub accuracy_percent: f64,
}

/// Derive the headline numbers from the two counters
///
/// A zero question count yields a zero rate rather than a division error.
pub fn compute_overview(question_count: u32, correct_count: u32) -> Overview {
    let correct_rate_percent = if question_count == 0 {
        0
    } else {
        (correct_count as f64 / question_count as f64 * 100.0).round() as u32
    };

    Overview { total_questions: question_count, correct_rate_percent }
}

/// Count answered questions per topic, sorted lexicographically by topic
///
/// The alphabetical ordering (not frequency ordering) is part of the
/// contract; callers rely on a stable display order across renders.
pub fn compute_topic_breakdown(history: &[HistoryEntry]) -> Vec<TopicCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in history {
        *counts.entry(entry.topic_or_default()).or_insert(0) += 1;
    }

    let mut breakdown: Vec<TopicCount> = counts
        .into_iter()
        .map(|(topic, count)| TopicCount { topic: topic.to_string(), count })
        .collect();
    breakdown.sort_by(|a, b| a.topic.cmp(&b.topic));
    breakdown
}

/// Find the topic with the strictly lowest accuracy
///
/// Ties resolve to the topic seen first in history iteration order. An empty
/// history yields `topic: None`, which is distinct from a single topic at
/// zero accuracy.
pub fn compute_weakest_topic(history: &[HistoryEntry]) -> WeakestTopic {
    // (topic, total, correct) in first-seen order
    let mut per_topic: Vec<(&str, u32, u32)> = Vec::new();

    for entry in history {
        let topic = entry.topic_or_default();
        let stats = match per_topic.iter_mut().find(|(t, _, _)| *t == topic) {
            Some(stats) => stats,
            None => {
                per_topic.push((topic, 0, 0));
                per_topic.last_mut().unwrap()
            }
        };
        stats.1 += 1;
        if entry.is_correct {
            stats.2 += 1;
        }
    }

    let mut weakest: Option<(&str, f64)> = None;
    for (topic, total, correct) in &per_topic {
        let accuracy = *correct as f64 / *total as f64 * 100.0;
        // Strict comparison keeps the first-seen topic on ties
        if weakest.is_none_or(|(_, lowest)| accuracy < lowest) {
            weakest = Some((topic, accuracy));
        }
    }

    match weakest {
        Some((topic, accuracy_percent)) => {
            WeakestTopic { topic: Some(topic.to_string()), accuracy_percent }
        }
        None => WeakestTopic { topic: None, accuracy_percent: 0.0 },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn entry(topic: &str, is_correct: bool) -> HistoryEntry {
        HistoryEntry::new("Q", "A", "feedback", is_correct, None, topic)
    }

    #[test]
    fn overview_guards_division_by_zero() {
        let overview = compute_overview(0, 0);
        assert_eq!(overview.total_questions, 0);
        assert_eq!(overview.correct_rate_percent, 0);
    }

    #[test]
    fn overview_rounds_half_away_from_zero() {
        // 2/3 = 66.66..% -> 67
        assert_eq!(compute_overview(3, 2).correct_rate_percent, 67);
        // 1/8 = 12.5% -> 13
        assert_eq!(compute_overview(8, 1).correct_rate_percent, 13);
        // 1/3 = 33.33..% -> 33
        assert_eq!(compute_overview(3, 1).correct_rate_percent, 33);
    }

    #[test]
    fn breakdown_is_sorted_lexicographically() {
        let history = vec![
            entry("Zoology", true),
            entry("Biology", false),
            entry("Zoology", true),
            entry("Calculus", true),
        ];

        let breakdown = compute_topic_breakdown(&history);
        let topics: Vec<&str> = breakdown.iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(topics, vec!["Biology", "Calculus", "Zoology"]);
        assert_eq!(breakdown[2].count, 2);
    }

    #[test]
    fn breakdown_substitutes_unknown_topic() {
        let history = vec![entry("", true)];
        let breakdown = compute_topic_breakdown(&history);
        assert_eq!(breakdown[0].topic, "Unknown Topic");
        assert_eq!(breakdown[0].count, 1);
    }

    #[test]
    fn weakest_topic_of_empty_history_is_none() {
        let weakest = compute_weakest_topic(&[]);
        assert_eq!(weakest.topic, None);
        assert_eq!(weakest.accuracy_percent, 0.0);
    }

    #[test]
    fn weakest_topic_distinguishes_zero_accuracy_from_no_data() {
        let history = vec![entry("Biology", false)];
        let weakest = compute_weakest_topic(&history);
        assert_eq!(weakest.topic.as_deref(), Some("Biology"));
        assert_eq!(weakest.accuracy_percent, 0.0);
    }

    #[test]
    fn weakest_topic_picks_lowest_accuracy() {
        let history = vec![
            entry("Biology", true),
            entry("Biology", true),
            entry("Calculus", false),
            entry("Calculus", true),
        ];

        let weakest = compute_weakest_topic(&history);
        assert_eq!(weakest.topic.as_deref(), Some("Calculus"));
        assert_eq!(weakest.accuracy_percent, 50.0);
    }

    #[test]
    fn weakest_topic_tie_break_is_first_seen() {
        // Both topics sit at 50%; "A" appears first in history order
        let history = vec![
            entry("A", true),
            entry("B", false),
            entry("A", false),
            entry("B", true),
        ];

        let weakest = compute_weakest_topic(&history);
        assert_eq!(weakest.topic.as_deref(), Some("A"));
    }

    #[test]
    fn weakest_topic_tie_break_ignores_alphabetical_order() {
        // "Z" is seen first and must win the tie despite sorting last
        let history = vec![entry("Z", false), entry("A", false)];

        let weakest = compute_weakest_topic(&history);
        assert_eq!(weakest.topic.as_deref(), Some("Z"));
    }

    proptest! {
        #[test]
        fn breakdown_sorted_for_any_topic_permutation(
            topics in proptest::collection::vec("[a-e]", 0..40)
        ) {
            let history: Vec<HistoryEntry> =
                topics.iter().map(|t| entry(t, true)).collect();

            let breakdown = compute_topic_breakdown(&history);

            // Sorted ascending with no duplicates
            for pair in breakdown.windows(2) {
                prop_assert!(pair[0].topic < pair[1].topic);
            }
            // Counts add back up to the input size
            let total: usize = breakdown.iter().map(|t| t.count).sum();
            prop_assert_eq!(total, history.len());
        }
    }
}
