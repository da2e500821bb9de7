//! Session handle passed to report components.

use std::sync::Arc;

use crate::error::SessionResult;
use crate::store::SessionStore;
use crate::types::{Message, SessionMetadata};

/// Names one session and reads it through a store.
///
/// The handle never caches: every read goes to the store, so each report
/// component observes the session as persisted at the time it runs.
#[derive(Clone)]
pub struct SessionHandle {
    id: String,
    store: Arc<dyn SessionStore>,
}

impl SessionHandle {
    pub fn new(id: impl Into<String>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            id: id.into(),
            store,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn metadata(&self) -> SessionResult<SessionMetadata> {
        self.store.load_metadata(&self.id)
    }

    /// Messages in chronological order. Messages sharing a timestamp keep
    /// their storage order.
    pub fn messages(&self) -> SessionResult<Vec<Message>> {
        let mut messages = self.store.load_messages(&self.id)?;
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").field("id", &self.id).finish()
    }
}
