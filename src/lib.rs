//! Dashboard core for a markdown note vault.
//!
//! Aggregates recently created notes, goal/task lists, a daily-note
//! streak, and events from subscribed calendar feeds into a single
//! view-model per render pass, and provides the quick-create note
//! actions around it. The host application's capabilities come in
//! through the narrow traits in [`ports`], so the whole core runs
//! headless.

pub mod dates;
pub mod error;
pub mod feeds;
pub mod goals;
pub mod notes;
pub mod ports;
pub mod services;
pub mod state;
pub mod streak;
pub mod types;
pub mod vault;
