//! Integration tests for the filesystem session store.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use tempfile::tempdir;

use carechat_session::{
    ChatSession, FileSessionStore, Message, Participant, SessionError, SessionHandle,
    SessionMetadata, SessionStore,
};

fn sample_session(id: &str) -> ChatSession {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    ChatSession::new(
        SessionMetadata::new("Anxiety follow-up")
            .with_id(id)
            .with_description("Two-week check-in")
            .with_participant(Participant::patient("p-1", "Alex"))
            .with_participant(Participant::clinician("c-1", "Dr. Rivera"))
            .created(start),
    )
    .with_message(Message::user("I slept better this week.").at(start))
    .with_message(Message::assistant("That is good to hear.").at(start + Duration::seconds(4)))
}

/// Import, list, read through a handle, then delete.
#[test]
fn test_session_lifecycle() {
    let temp = tempdir().unwrap();
    let store = FileSessionStore::new(temp.path());

    store.import_session(&sample_session("alpha")).unwrap();
    store.import_session(&sample_session("beta")).unwrap();

    let sessions = store.list_sessions().unwrap();
    assert_eq!(sessions.len(), 2);
    assert!(sessions.iter().all(|s| s.message_count == 2));

    let handle = SessionHandle::new("alpha", Arc::new(store.clone()));
    let metadata = handle.metadata().unwrap();
    assert_eq!(metadata.title, "Anxiety follow-up");
    assert_eq!(metadata.participants.len(), 2);
    assert_eq!(handle.messages().unwrap().len(), 2);

    store.delete_session("alpha").unwrap();
    assert!(matches!(
        store.load_metadata("alpha"),
        Err(SessionError::NotFound(_))
    ));
    assert_eq!(store.list_sessions().unwrap().len(), 1);
}

/// Saving a message survives a reload and keeps the log order.
#[test]
fn test_saved_flag_round_trip() {
    let temp = tempdir().unwrap();
    let store = FileSessionStore::new(temp.path());
    let session = sample_session("gamma");
    store.import_session(&session).unwrap();

    let first_id = session.messages[0].id.clone();
    store.mark_saved("gamma", &first_id, None).unwrap();

    let reloaded = FileSessionStore::new(temp.path());
    let messages = reloaded.load_messages("gamma").unwrap();
    assert!(messages[0].saved);
    assert!(!messages[1].saved);
    assert_eq!(messages[0].content, "I slept better this week.");
}

#[test]
fn test_list_sessions_empty_workspace() {
    let temp = tempdir().unwrap();
    let store = FileSessionStore::new(temp.path());
    assert!(store.list_sessions().unwrap().is_empty());
}
