//! Conversation statistics computed directly from the messages.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use carechat_session::{Message, MessageRole, SessionHandle};
use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::error::ReportResult;
use crate::section::{SectionKind, SectionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayCounts {
    pub user: usize,
    pub assistant: usize,
}

/// Seconds between a user message and the assistant reply that follows it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseTimeStats {
    pub count: usize,
    pub min_seconds: f64,
    pub max_seconds: f64,
    pub mean_seconds: f64,
    pub median_seconds: f64,
}

impl ResponseTimeStats {
    fn from_samples(mut samples: Vec<f64>) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        samples.sort_by(f64::total_cmp);

        let count = samples.len();
        let median = if count % 2 == 0 {
            (samples[count / 2 - 1] + samples[count / 2]) / 2.0
        } else {
            samples[count / 2]
        };

        Self {
            count,
            min_seconds: samples[0],
            max_seconds: samples[count - 1],
            mean_seconds: samples.iter().sum::<f64>() / count as f64,
            median_seconds: median,
        }
    }
}

/// Data of the `descriptive_stats` section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub total_messages: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
    pub total_words: usize,
    pub avg_words_per_user_message: f64,
    pub avg_words_per_assistant_message: f64,
    pub avg_chars_per_message: f64,
    /// Word count of the longest user message
    pub longest_user_message: usize,
    pub shortest_user_message: usize,
    /// First to last message, rounded to two decimals
    pub session_duration_hours: f64,
    /// Keyed by `YYYY-MM-DD` (UTC)
    pub messages_by_day: BTreeMap<String, DayCounts>,
    pub conversations_count: usize,
    pub average_messages_per_chat: f64,
    pub response_times: ResponseTimeStats,
}

fn mean(values: &[usize]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<usize>() as f64 / values.len() as f64
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl DescriptiveStats {
    /// Statistics over messages in chronological order.
    pub fn compute(messages: &[Message]) -> Self {
        if messages.is_empty() {
            return Self::default();
        }

        let words_of = |role: MessageRole| -> Vec<usize> {
            messages
                .iter()
                .filter(|m| m.role == role)
                .map(Message::word_count)
                .collect()
        };
        let user_words = words_of(MessageRole::User);
        let assistant_words = words_of(MessageRole::Assistant);

        let mut messages_by_day: BTreeMap<String, DayCounts> = BTreeMap::new();
        for message in messages {
            let day = messages_by_day
                .entry(message.timestamp.format("%Y-%m-%d").to_string())
                .or_default();
            match message.role {
                MessageRole::User => day.user += 1,
                MessageRole::Assistant => day.assistant += 1,
                MessageRole::System => {}
            }
        }

        // Messages without a conversation id form one implicit conversation
        let conversations: BTreeSet<Option<&str>> = messages
            .iter()
            .map(|m| m.conversation_id.as_deref())
            .collect();

        let response_times = messages
            .windows(2)
            .filter(|pair| pair[0].role == MessageRole::User && pair[1].role == MessageRole::Assistant)
            .map(|pair| (pair[1].timestamp - pair[0].timestamp).num_milliseconds() as f64 / 1000.0)
            .filter(|seconds| *seconds >= 0.0)
            .collect();

        let first = messages.iter().map(|m| m.timestamp).min();
        let last = messages.iter().map(|m| m.timestamp).max();
        let duration_hours = match (first, last) {
            (Some(first), Some(last)) => (last - first).num_seconds() as f64 / 3600.0,
            _ => 0.0,
        };

        let total_chars: usize = messages.iter().map(|m| m.content.chars().count()).sum();

        Self {
            total_messages: messages.len(),
            user_messages: user_words.len(),
            assistant_messages: assistant_words.len(),
            total_words: user_words.iter().sum::<usize>() + assistant_words.iter().sum::<usize>(),
            avg_words_per_user_message: mean(&user_words),
            avg_words_per_assistant_message: mean(&assistant_words),
            avg_chars_per_message: total_chars as f64 / messages.len() as f64,
            longest_user_message: user_words.iter().copied().max().unwrap_or(0),
            shortest_user_message: user_words.iter().copied().min().unwrap_or(0),
            session_duration_hours: round2(duration_hours),
            messages_by_day,
            conversations_count: conversations.len(),
            average_messages_per_chat: messages.len() as f64 / conversations.len() as f64,
            response_times: ResponseTimeStats::from_samples(response_times),
        }
    }
}

#[derive(Debug, Default)]
pub struct DescriptiveStatsComponent;

impl DescriptiveStatsComponent {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Component for DescriptiveStatsComponent {
    fn kind(&self) -> SectionKind {
        SectionKind::DescriptiveStats
    }

    fn description(&self) -> &str {
        "Message counts, lengths, duration and response times"
    }

    fn is_critical(&self) -> bool {
        true
    }

    async fn generate(&self, session: &SessionHandle) -> ReportResult<SectionRecord> {
        let messages = session.messages()?;
        SectionRecord::complete(self.kind(), self.title(), &DescriptiveStats::compute(&messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_compute() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 23, 0, 0).unwrap();
        let messages = vec![
            Message::user("I slept badly").at(t).in_conversation("a"),
            Message::assistant("Sorry to hear that").at(t + Duration::seconds(4)).in_conversation("a"),
            Message::user("Better today").at(t + Duration::hours(2)).in_conversation("b"),
            Message::assistant("Glad").at(t + Duration::hours(2) + Duration::seconds(10)).in_conversation("b"),
            Message::assistant("Anything else?").at(t + Duration::hours(3)).in_conversation("b"),
        ];

        let stats = DescriptiveStats::compute(&messages);
        assert_eq!(stats.total_messages, 5);
        assert_eq!(stats.user_messages, 2);
        assert_eq!(stats.assistant_messages, 3);
        assert_eq!(stats.total_words, 3 + 4 + 2 + 1 + 2);
        assert_eq!(stats.avg_words_per_user_message, 2.5);
        assert_eq!(stats.longest_user_message, 3);
        assert_eq!(stats.shortest_user_message, 2);
        assert_eq!(stats.session_duration_hours, 3.0);
        assert_eq!(stats.messages_by_day.len(), 2);
        assert_eq!(
            stats.messages_by_day["2024-03-02"],
            DayCounts { user: 1, assistant: 2 }
        );
        assert_eq!(stats.conversations_count, 2);
        assert_eq!(stats.average_messages_per_chat, 2.5);

        assert_eq!(stats.response_times.count, 2);
        assert_eq!(stats.response_times.min_seconds, 4.0);
        assert_eq!(stats.response_times.max_seconds, 10.0);
        assert_eq!(stats.response_times.median_seconds, 7.0);
    }

    #[test]
    fn test_empty_session() {
        let stats = DescriptiveStats::compute(&[]);
        assert_eq!(stats, DescriptiveStats::default());
        assert_eq!(stats.total_messages, 0);
        assert_eq!(stats.response_times.count, 0);
    }

    #[test]
    fn test_implicit_conversation() {
        let stats = DescriptiveStats::compute(&[Message::user("hi"), Message::user("again")]);
        assert_eq!(stats.conversations_count, 1);
        assert_eq!(stats.average_messages_per_chat, 2.0);
    }
}
