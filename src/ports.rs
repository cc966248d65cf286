//! Host collaborator ports.
//!
//! Everything the dashboard needs from its host (the vault, the network,
//! user prompts, the persisted blob) comes in through these narrow
//! traits so the core stays testable against in-memory fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{FeedError, HostError, StoreError};
use crate::types::{FeedObject, NoteRecord};

/// The host vault: note snapshots plus the file primitives quick-create
/// actions need.
pub trait NoteHost: Send + Sync {
    /// Fresh point-in-time snapshot of every note the host knows about.
    fn list_notes(&self) -> Vec<NoteRecord>;

    fn note_exists(&self, path: &str) -> bool;

    fn read_note(&self, path: &str) -> Result<String, HostError>;

    /// Create a new note. Fails with [`HostError::AlreadyExists`] rather
    /// than overwriting; callers that want idempotence check first.
    fn create_note(&self, path: &str, content: &str) -> Result<(), HostError>;

    fn folder_exists(&self, path: &str) -> bool;

    /// Create a single folder whose parent already exists.
    fn create_folder(&self, path: &str) -> Result<(), HostError>;

    /// Bring a note into view in the host UI.
    fn reveal_note(&self, path: &str) -> Result<(), HostError>;
}

/// Optional accelerated creation-time range query.
///
/// Capability detection, not error handling: `None` means "unavailable or
/// failed, use the fallback scan". Implementations must never panic
/// through this call.
pub trait NoteIndex: Send + Sync {
    fn try_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Option<Vec<NoteRecord>>;
}

/// Fetch and parse one calendar feed URL into raw components.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedObject>, FeedError>;
}

/// Request for a free-text prompt.
#[derive(Debug, Clone)]
pub struct TextPrompt {
    pub title: String,
    pub placeholder: Option<String>,
}

/// Request for a single choice from a fixed list.
#[derive(Debug, Clone)]
pub struct ChoicePrompt {
    pub title: String,
    pub options: Vec<String>,
}

/// Modal user prompts, injected so flows run headless in tests.
///
/// `None` is cancellation; the requesting action aborts silently.
pub trait PromptProvider: Send + Sync {
    fn prompt_text(&self, request: &TextPrompt) -> Option<String>;

    /// Returns the index of the selected option.
    fn prompt_choice(&self, request: &ChoicePrompt) -> Option<usize>;
}

/// Load/save of the single persisted JSON document.
pub trait DataStore: Send + Sync {
    /// `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> Result<Option<String>, StoreError>;

    fn save(&self, json: &str) -> Result<(), StoreError>;
}
