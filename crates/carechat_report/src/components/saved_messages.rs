//! Messages the user flagged as saved.

use async_trait::async_trait;
use carechat_session::{MessageRole, SessionHandle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::error::ReportResult;
use crate::section::{SectionKind, SectionRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMessageEntry {
    pub id: String,
    pub role: MessageRole,
    pub text: String,
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub timestamp_formatted: String,
}

/// Data of the `saved_messages` section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedMessagesData {
    /// Chronological
    pub messages: Vec<SavedMessageEntry>,
    pub total_count: usize,
}

#[derive(Debug, Default)]
pub struct SavedMessagesComponent;

impl SavedMessagesComponent {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Component for SavedMessagesComponent {
    fn kind(&self) -> SectionKind {
        SectionKind::SavedMessages
    }

    fn description(&self) -> &str {
        "Messages flagged as saved, in the order they were sent"
    }

    fn is_critical(&self) -> bool {
        true
    }

    async fn generate(&self, session: &SessionHandle) -> ReportResult<SectionRecord> {
        let messages: Vec<SavedMessageEntry> = session
            .messages()?
            .into_iter()
            .filter(|m| m.saved)
            .map(|m| SavedMessageEntry {
                timestamp_formatted: m.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                id: m.id,
                role: m.role,
                text: m.content,
                note: m.note,
                timestamp: m.timestamp,
            })
            .collect();

        let data = SavedMessagesData {
            total_count: messages.len(),
            messages,
        };
        SectionRecord::complete(self.kind(), self.title(), &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carechat_session::{ChatSession, MemorySessionStore, Message, SessionMetadata};
    use chrono::Duration;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_only_saved_in_order() {
        let t = Utc::now();
        let session = ChatSession::new(SessionMetadata::new("t").with_id("s1"))
            .with_message(Message::user("later").at(t + Duration::minutes(5)).saved())
            .with_message(Message::assistant("skip me").at(t + Duration::minutes(1)))
            .with_message(
                Message::user("earlier")
                    .at(t)
                    .saved()
                    .with_note("first breakthrough"),
            );
        let handle =
            SessionHandle::new("s1", Arc::new(MemorySessionStore::new().with_session(session)));

        let record = SavedMessagesComponent::new().generate(&handle).await.unwrap();
        let data: SavedMessagesData = record.data_as().unwrap();

        assert_eq!(data.total_count, 2);
        assert_eq!(data.messages[0].text, "earlier");
        assert_eq!(data.messages[0].note.as_deref(), Some("first breakthrough"));
        assert_eq!(data.messages[1].text, "later");
    }
}
