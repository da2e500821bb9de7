//! Session stores.
//!
//! [`SessionStore`] is the read contract report generation depends on.
//! [`FileSessionStore`] persists sessions on disk; [`MemorySessionStore`]
//! keeps them in process, which is what embedding callers and tests use.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::{SessionError, SessionResult};
use crate::types::{ChatSession, Message, SessionMetadata, SessionSummary};

/// Read access to persisted chat sessions.
pub trait SessionStore: Send + Sync {
    /// Load the metadata of a session.
    fn load_metadata(&self, session_id: &str) -> SessionResult<SessionMetadata>;

    /// Load every message of a session, in storage order.
    fn load_messages(&self, session_id: &str) -> SessionResult<Vec<Message>>;
}

/// Reject ids that could escape the sessions directory
fn validate_id(session_id: &str) -> SessionResult<()> {
    let valid = !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SessionError::InvalidId(session_id.to_string()))
    }
}

/// Filesystem-backed session store
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    /// Root path of the workspace
    root: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at a workspace directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn sessions_dir(&self) -> PathBuf {
        self.root.join(".carechat").join("sessions")
    }

    fn session_dir(&self, session_id: &str) -> PathBuf {
        self.sessions_dir().join(session_id)
    }

    fn messages_path(&self, session_id: &str) -> PathBuf {
        self.session_dir(session_id).join("messages.jsonl")
    }

    fn existing_session_dir(&self, session_id: &str) -> SessionResult<PathBuf> {
        validate_id(session_id)?;
        let dir = self.session_dir(session_id);
        if !dir.exists() {
            return Err(SessionError::NotFound(session_id.to_string()));
        }
        Ok(dir)
    }

    /// Create a new session and persist its metadata
    pub fn create_session(&self, metadata: SessionMetadata) -> SessionResult<SessionMetadata> {
        validate_id(&metadata.id)?;
        let session_dir = self.session_dir(&metadata.id);
        fs::create_dir_all(&session_dir)?;

        self.save_metadata(&metadata)?;
        File::create(session_dir.join("messages.jsonl"))?;

        debug!("Created session {} at {:?}", metadata.id, session_dir);
        Ok(metadata)
    }

    /// Persist a whole in-memory session, replacing any stored messages
    pub fn import_session(&self, session: &ChatSession) -> SessionResult<()> {
        self.create_session(session.metadata.clone())?;
        self.write_messages(session.id(), &session.messages)
    }

    /// Overwrite the metadata of a session
    pub fn save_metadata(&self, metadata: &SessionMetadata) -> SessionResult<()> {
        validate_id(&metadata.id)?;
        let session_dir = self.session_dir(&metadata.id);
        fs::create_dir_all(&session_dir)?;

        let content = serde_json::to_string_pretty(metadata)?;
        fs::write(session_dir.join("session.json"), content)?;
        Ok(())
    }

    /// Append a message to the session log
    pub fn append_message(&self, session_id: &str, message: &Message) -> SessionResult<()> {
        self.existing_session_dir(session_id)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.messages_path(session_id))?;

        let json = serde_json::to_string(message)?;
        writeln!(file, "{}", json)?;

        Ok(())
    }

    /// Flag a message as saved, optionally attaching a note
    pub fn mark_saved(
        &self,
        session_id: &str,
        message_id: &str,
        note: Option<String>,
    ) -> SessionResult<Message> {
        let mut messages = self.load_messages(session_id)?;
        let message = messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or_else(|| SessionError::MessageNotFound {
                session_id: session_id.to_string(),
                message_id: message_id.to_string(),
            })?;

        message.saved = true;
        if note.is_some() {
            message.note = note;
        }
        let updated = message.clone();

        self.write_messages(session_id, &messages)?;
        Ok(updated)
    }

    /// Rewrite the message log through a temporary file so readers never
    /// observe a half-written log.
    fn write_messages(&self, session_id: &str, messages: &[Message]) -> SessionResult<()> {
        let path = self.messages_path(session_id);
        let tmp_path = path.with_extension("jsonl.tmp");

        let mut file = File::create(&tmp_path)?;
        for message in messages {
            writeln!(file, "{}", serde_json::to_string(message)?)?;
        }
        file.sync_all()?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// List all sessions, newest first
    pub fn list_sessions(&self) -> SessionResult<Vec<SessionSummary>> {
        let sessions_dir = self.sessions_dir();

        if !sessions_dir.exists() {
            return Ok(Vec::new());
        }

        let mut sessions = Vec::new();
        for entry in fs::read_dir(sessions_dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let Some(id) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Ok(metadata) = self.load_metadata(id) {
                let message_count = self.load_messages(id).map(|m| m.len()).unwrap_or(0);
                sessions.push(SessionSummary {
                    id: metadata.id,
                    title: metadata.title,
                    created_at: metadata.created_at,
                    message_count,
                });
            }
        }

        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(sessions)
    }

    /// Delete a session and its messages
    pub fn delete_session(&self, session_id: &str) -> SessionResult<()> {
        let session_dir = self.existing_session_dir(session_id)?;
        fs::remove_dir_all(session_dir)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load_metadata(&self, session_id: &str) -> SessionResult<SessionMetadata> {
        let session_dir = self.existing_session_dir(session_id)?;
        let path = session_dir.join("session.json");
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| SessionError::InvalidFormat {
            path,
            message: e.to_string(),
        })
    }

    fn load_messages(&self, session_id: &str) -> SessionResult<Vec<Message>> {
        self.existing_session_dir(session_id)?;
        let path = self.messages_path(session_id);

        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&path)?);

        let mut messages = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let message: Message =
                serde_json::from_str(&line).map_err(|e| SessionError::InvalidFormat {
                    path: path.clone(),
                    message: format!("line {}: {}", line_no + 1, e),
                })?;
            messages.push(message);
        }

        Ok(messages)
    }
}

/// In-process session store
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, ChatSession>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a session
    pub fn insert(&self, session: ChatSession) {
        self.sessions
            .write()
            .insert(session.id().to_string(), session);
    }

    pub fn with_session(self, session: ChatSession) -> Self {
        self.insert(session);
        self
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn load_metadata(&self, session_id: &str) -> SessionResult<SessionMetadata> {
        self.sessions
            .read()
            .get(session_id)
            .map(|s| s.metadata.clone())
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    fn load_messages(&self, session_id: &str) -> SessionResult<Vec<Message>> {
        self.sessions
            .read()
            .get(session_id)
            .map(|s| s.messages.clone())
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_session_creation() {
        let temp = tempdir().unwrap();
        let store = FileSessionStore::new(temp.path());

        let metadata = store
            .create_session(SessionMetadata::new("Weekly check-in"))
            .unwrap();
        let loaded = store.load_metadata(&metadata.id).unwrap();

        assert_eq!(metadata, loaded);
        assert!(store.load_messages(&metadata.id).unwrap().is_empty());
    }

    #[test]
    fn test_message_persistence() {
        let temp = tempdir().unwrap();
        let store = FileSessionStore::new(temp.path());
        let metadata = store.create_session(SessionMetadata::new("test")).unwrap();

        store
            .append_message(&metadata.id, &Message::user("Hello"))
            .unwrap();
        store
            .append_message(&metadata.id, &Message::assistant("Hi there!"))
            .unwrap();

        let messages = store.load_messages(&metadata.id).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "Hello");
        assert_eq!(messages[1].content, "Hi there!");
    }

    #[test]
    fn test_mark_saved() {
        let temp = tempdir().unwrap();
        let store = FileSessionStore::new(temp.path());
        let metadata = store.create_session(SessionMetadata::new("test")).unwrap();
        let msg = Message::user("Remember this");
        store.append_message(&metadata.id, &msg).unwrap();

        let updated = store
            .mark_saved(&metadata.id, &msg.id, Some("important".to_string()))
            .unwrap();
        assert!(updated.saved);

        let messages = store.load_messages(&metadata.id).unwrap();
        assert!(messages[0].saved);
        assert_eq!(messages[0].note.as_deref(), Some("important"));

        let missing = store.mark_saved(&metadata.id, "nope", None);
        assert!(matches!(missing, Err(SessionError::MessageNotFound { .. })));
    }

    #[test]
    fn test_missing_session() {
        let temp = tempdir().unwrap();
        let store = FileSessionStore::new(temp.path());

        assert!(matches!(
            store.load_metadata("does-not-exist"),
            Err(SessionError::NotFound(_))
        ));
        assert!(matches!(
            store.load_messages("../escape"),
            Err(SessionError::InvalidId(_))
        ));
    }

    #[test]
    fn test_corrupt_message_line() {
        let temp = tempdir().unwrap();
        let store = FileSessionStore::new(temp.path());
        let metadata = store.create_session(SessionMetadata::new("test")).unwrap();
        fs::write(store.messages_path(&metadata.id), "{not json}\n").unwrap();

        let err = store.load_messages(&metadata.id).unwrap_err();
        assert!(matches!(err, SessionError::InvalidFormat { .. }));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_memory_store() {
        let session = ChatSession::new(SessionMetadata::new("mem").with_id("s1"))
            .with_message(Message::user("hi"));
        let store = MemorySessionStore::new().with_session(session);

        assert_eq!(store.len(), 1);
        assert_eq!(store.load_messages("s1").unwrap().len(), 1);
        assert!(store.load_metadata("s2").is_err());
    }
}
