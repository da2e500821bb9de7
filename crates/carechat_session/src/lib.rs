//! # carechat_session
//!
//! Chat session model and persistence for CareChat.
//!
//! Report generation treats everything in this crate as read-only input:
//! a [`SessionHandle`] names one conversation and reads its metadata and
//! messages through a [`SessionStore`].
//!
//! # Storage layout
//!
//! ```text
//! <root>/.carechat/sessions/<sessionId>/
//! ├── session.json      # Session metadata
//! └── messages.jsonl    # Append-only message log
//! ```

pub mod error;
pub mod handle;
pub mod store;
pub mod types;

pub use error::{SessionError, SessionResult};
pub use handle::SessionHandle;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use types::{
    ChatSession, Message, MessageRole, Participant, ParticipantKind, SessionId, SessionMetadata,
    SessionSummary,
};
