//! Core data model shared across the dashboard.
//!
//! Wire names are camelCase to match the persisted document and the
//! view layer's expectations.

use std::str::FromStr;

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of one note, supplied by the host vault.
///
/// The dashboard only reads these; creation and deletion happen entirely
/// on the host side. A fresh snapshot must be taken before each query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    /// Vault-relative path, unique per note.
    pub path: String,
    /// Display name (file name without extension).
    pub basename: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// A single calendar event derived from a remote feed.
///
/// Ephemeral: recomputed on every query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Event title; feeds may omit it, in which case this is empty.
    pub summary: String,
    pub start: DateTime<Utc>,
}

/// Kind of a parsed calendar feed component.
///
/// Only `Event` entries feed the dashboard; todos, journal entries and
/// anything else a feed carries are ignored by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedObjectKind {
    Event,
    Todo,
    Journal,
    Other,
}

/// One raw component from a fetched calendar feed, before range filtering.
#[derive(Debug, Clone)]
pub struct FeedObject {
    pub kind: FeedObjectKind,
    pub summary: String,
    /// Missing when the component carries no parseable start time.
    pub start: Option<DateTime<Utc>>,
}

/// Generate a stable identity for a new goal/task entry.
pub fn new_item_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// One goal or task entry.
///
/// `id` is the stable identity used by toggle/remove; the position in the
/// containing list is display order only. Entries persisted before ids
/// existed get one assigned on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalItem {
    #[serde(default = "new_item_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    /// Carried in the schema for forward compatibility; no logic reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
}

impl GoalItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_item_id(),
            text: text.into(),
            done: false,
            due: None,
        }
    }
}

fn default_note_folders() -> Vec<String> {
    vec!["Notes".to_string()]
}

fn default_daily_note_folder() -> String {
    "Daily".to_string()
}

fn default_week_start() -> String {
    "monday".to_string()
}

/// User-facing dashboard configuration, persisted as part of the data blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSettings {
    /// Folders whose notes appear on the dashboard. Never empty after load.
    #[serde(default = "default_note_folders")]
    pub note_folders: Vec<String>,
    /// Folder daily notes are created in.
    #[serde(default = "default_daily_note_folder")]
    pub daily_note_folder: String,
    /// Comma-separated feed URLs, kept as raw text to keep the persisted
    /// schema simple. Parsed on demand via [`DashboardSettings::calendar_url_list`].
    #[serde(default)]
    pub calendar_urls: String,
    /// First day of the calendar week ("monday", "sunday", ...).
    #[serde(default = "default_week_start")]
    pub week_start: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            note_folders: default_note_folders(),
            daily_note_folder: default_daily_note_folder(),
            calendar_urls: String::new(),
            week_start: default_week_start(),
        }
    }
}

impl DashboardSettings {
    /// Feed URLs with whitespace trimmed and empty entries dropped.
    pub fn calendar_url_list(&self) -> Vec<String> {
        self.calendar_urls
            .split(',')
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .map(|u| u.to_string())
            .collect()
    }

    /// Week-start policy, falling back to Monday on an unrecognized value.
    pub fn week_start_day(&self) -> Weekday {
        Weekday::from_str(self.week_start.trim()).unwrap_or(Weekday::Mon)
    }

    /// Re-establish invariants after load or update: blank folder entries
    /// are dropped, and an empty folder list falls back to the default.
    pub fn normalized(mut self) -> Self {
        self.note_folders = self
            .note_folders
            .into_iter()
            .map(|f| f.trim().trim_matches('/').to_string())
            .filter(|f| !f.is_empty())
            .collect();
        if self.note_folders.is_empty() {
            self.note_folders = default_note_folders();
        }
        self
    }
}

/// Per-range note counts shown as dashboard stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub today: usize,
    pub week: usize,
    pub month: usize,
}

/// The assembled data for a single dashboard render pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Selected date, `YYYY-MM-DD`.
    pub date: String,
    pub today_notes: Vec<NoteRecord>,
    pub week_notes: Vec<NoteRecord>,
    pub month_notes: Vec<NoteRecord>,
    pub stats: DashboardStats,
    /// Consecutive days ending today with a daily note.
    pub streak_days: u32,
    pub last_edited: Option<NoteRecord>,
    pub goals: Vec<GoalItem>,
    pub tasks: Vec<GoalItem>,
    /// Events for the week containing the selected date, ascending by start.
    pub events: Vec<CalendarEvent>,
}
