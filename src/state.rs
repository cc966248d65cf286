//! Application state and persistence.
//!
//! All long-lived dashboard data (settings, goal/task lists, the last
//! committed view) hangs off an explicit [`AppState`] rather than module
//! globals, with persistence going through the injected [`DataStore`]
//! port. Mutations are visible in memory immediately; the flush that
//! follows is best-effort and a crash before it completes loses only the
//! most recent user action.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;

use crate::error::StoreError;
use crate::ports::DataStore;
use crate::types::{DashboardSettings, DashboardView, GoalItem};

/// The persisted document: settings plus both item lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDoc {
    #[serde(default)]
    settings: DashboardSettings,
    #[serde(default)]
    goals: Vec<GoalItem>,
    #[serde(default)]
    tasks: Vec<GoalItem>,
}

/// Rewrite a pre-multi-folder document in place: the old singular
/// `noteFolder` value becomes the sole entry of `noteFolders`.
fn migrate_legacy(mut doc: Value) -> Value {
    if let Some(settings) = doc.get_mut("settings").and_then(|s| s.as_object_mut()) {
        if !settings.contains_key("noteFolders") {
            if let Some(old) = settings.get("noteFolder").and_then(|v| v.as_str()) {
                let wrapped = Value::Array(vec![Value::String(old.to_string())]);
                settings.insert("noteFolders".to_string(), wrapped);
                log::info!("migrated legacy single note folder setting");
            }
        }
        settings.remove("noteFolder");
    }
    doc
}

/// Dashboard state shared by the composer, the stores, and any views.
pub struct AppState {
    store: Box<dyn DataStore>,
    pub settings: RwLock<DashboardSettings>,
    pub goals: Mutex<Vec<GoalItem>>,
    pub tasks: Mutex<Vec<GoalItem>>,
    /// Output slot of the most recent committed render.
    pub view: RwLock<Option<DashboardView>>,
    /// Sequence of the most recently started render.
    render_seq: AtomicU64,
    refresh_tx: watch::Sender<u64>,
}

impl AppState {
    /// Load state through the store, applying defaults for a missing
    /// document and the legacy single-folder migration. An unreadable
    /// document degrades to defaults rather than failing startup.
    pub fn load(store: Box<dyn DataStore>) -> Self {
        let doc = match store.load() {
            Ok(Some(text)) => match serde_json::from_str::<Value>(&text) {
                Ok(value) => Some(migrate_legacy(value)),
                Err(e) => {
                    log::warn!("stored dashboard data is not valid JSON, using defaults: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("could not read dashboard data, using defaults: {}", e);
                None
            }
        };

        let stored: StoredDoc = doc
            .and_then(|value| match serde_json::from_value(value) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    log::warn!("stored dashboard data has unexpected shape, using defaults: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        let (refresh_tx, _) = watch::channel(0);
        Self {
            store,
            settings: RwLock::new(stored.settings.normalized()),
            goals: Mutex::new(stored.goals),
            tasks: Mutex::new(stored.tasks),
            view: RwLock::new(None),
            render_seq: AtomicU64::new(0),
            refresh_tx,
        }
    }

    /// Serialize the current settings and lists through the store.
    pub fn persist(&self) -> Result<(), String> {
        let doc = StoredDoc {
            settings: self.settings.read().map_err(|_| "Lock poisoned")?.clone(),
            goals: self.goals.lock().map_err(|_| "Lock poisoned")?.clone(),
            tasks: self.tasks.lock().map_err(|_| "Lock poisoned")?.clone(),
        };
        let content = serde_json::to_string_pretty(&doc)
            .map_err(|e| format!("Serialize error: {}", e))?;
        self.store
            .save(&content)
            .map_err(|e| format!("Write error: {}", e))
    }

    /// Replace the settings, re-establishing invariants, then persist and
    /// notify views.
    pub fn update_settings(&self, settings: DashboardSettings) -> Result<(), String> {
        {
            let mut guard = self.settings.write().map_err(|_| "Lock poisoned")?;
            *guard = settings.normalized();
        }
        let result = self.persist();
        self.signal_refresh();
        result
    }

    pub fn settings_snapshot(&self) -> DashboardSettings {
        self.settings
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Tell any active view its data changed.
    pub fn signal_refresh(&self) {
        self.refresh_tx.send_modify(|n| *n += 1);
    }

    /// Subscribe to data-changed signals.
    pub fn subscribe_refresh(&self) -> watch::Receiver<u64> {
        self.refresh_tx.subscribe()
    }

    /// Start a render pass, returning its generation token.
    pub fn begin_render(&self) -> u64 {
        self.render_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Commit a finished render. Returns false (and drops the view) when
    /// a newer render started in the meantime. A slow, stale completion
    /// must not clobber a newer one's output.
    pub fn commit_view(&self, generation: u64, view: DashboardView) -> bool {
        if generation != self.render_seq.load(Ordering::SeqCst) {
            log::debug!("discarding stale render (generation {})", generation);
            return false;
        }
        if let Ok(mut guard) = self.view.write() {
            *guard = Some(view);
            true
        } else {
            false
        }
    }
}

/// Data store backed by a single JSON file.
pub struct FileDataStore {
    path: PathBuf,
}

impl FileDataStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The canonical location, `~/.noteboard/data.json`.
    pub fn default_path() -> Result<PathBuf, String> {
        let home = dirs::home_dir().ok_or("Could not find home directory")?;
        Ok(home.join(".noteboard").join("data.json"))
    }
}

impl DataStore for FileDataStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(content))
    }

    fn save(&self, json: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory store for tests and headless embedding.
#[derive(Default)]
pub struct MemoryDataStore {
    doc: Mutex<Option<String>>,
}

impl MemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc(doc: &str) -> Self {
        Self {
            doc: Mutex::new(Some(doc.to_string())),
        }
    }
}

impl DataStore for MemoryDataStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.doc.lock().map_err(|_| StoreError::Io("lock poisoned".to_string()))?.clone())
    }

    fn save(&self, json: &str) -> Result<(), StoreError> {
        *self
            .doc
            .lock()
            .map_err(|_| StoreError::Io("lock poisoned".to_string()))? = Some(json.to_string());
        Ok(())
    }
}
