//! Goal/task mutations against the shared state.
//!
//! Each successful mutation is applied in memory first, then flushed
//! through the data store and signalled to active views. A failed flush
//! is logged, not surfaced: the in-memory change already happened and
//! only survives until the next successful save.

use crate::goals;
use crate::state::AppState;
use crate::types::GoalItem;

/// Which of the two ordered lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalList {
    Goals,
    Tasks,
}

fn list_of(state: &AppState, list: GoalList) -> &std::sync::Mutex<Vec<GoalItem>> {
    match list {
        GoalList::Goals => &state.goals,
        GoalList::Tasks => &state.tasks,
    }
}

fn flush(state: &AppState) {
    if let Err(e) = state.persist() {
        log::warn!("goal list change not persisted: {}", e);
    }
    state.signal_refresh();
}

/// Append an entry. Whitespace-only text is a silent no-op; otherwise the
/// new entry's id is returned.
pub fn add_item(state: &AppState, list: GoalList, text: &str) -> Result<Option<String>, String> {
    let added = {
        let mut guard = list_of(state, list).lock().map_err(|_| "Lock poisoned")?;
        goals::add(&mut guard, text)
    };
    if added.is_some() {
        flush(state);
    }
    Ok(added)
}

/// Flip an entry's done flag. A stale id is a silent no-op.
pub fn toggle_item(state: &AppState, list: GoalList, id: &str) -> Result<(), String> {
    let changed = {
        let mut guard = list_of(state, list).lock().map_err(|_| "Lock poisoned")?;
        goals::toggle(&mut guard, id)
    };
    if changed {
        flush(state);
    }
    Ok(())
}

/// Remove an entry. A stale id is a silent no-op.
pub fn remove_item(state: &AppState, list: GoalList, id: &str) -> Result<(), String> {
    let changed = {
        let mut guard = list_of(state, list).lock().map_err(|_| "Lock poisoned")?;
        goals::remove(&mut guard, id)
    };
    if changed {
        flush(state);
    }
    Ok(())
}

/// Current entries in display order.
pub fn items_snapshot(state: &AppState, list: GoalList) -> Vec<GoalItem> {
    list_of(state, list)
        .lock()
        .map(|guard| guard.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppState, MemoryDataStore};

    fn fresh_state() -> AppState {
        AppState::load(Box::new(MemoryDataStore::new()))
    }

    #[test]
    fn test_add_is_visible_before_any_reload() {
        let state = fresh_state();
        let id = add_item(&state, GoalList::Goals, "Buy milk")
            .unwrap()
            .expect("added");
        let items = items_snapshot(&state, GoalList::Goals);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, id);
    }

    #[test]
    fn test_goals_and_tasks_are_independent() {
        let state = fresh_state();
        add_item(&state, GoalList::Goals, "goal").unwrap();
        add_item(&state, GoalList::Tasks, "task").unwrap();
        assert_eq!(items_snapshot(&state, GoalList::Goals)[0].text, "goal");
        assert_eq!(items_snapshot(&state, GoalList::Tasks)[0].text, "task");
        assert_eq!(items_snapshot(&state, GoalList::Goals).len(), 1);
    }

    #[test]
    fn test_blank_add_does_not_signal_views() {
        let state = fresh_state();
        let rx = state.subscribe_refresh();
        let before = *rx.borrow();
        assert!(add_item(&state, GoalList::Goals, "   ").unwrap().is_none());
        assert_eq!(*rx.borrow(), before);
    }

    #[test]
    fn test_mutation_signals_views() {
        let state = fresh_state();
        let rx = state.subscribe_refresh();
        let before = *rx.borrow();
        add_item(&state, GoalList::Tasks, "task").unwrap();
        assert!(*rx.borrow() > before);
    }

    #[test]
    fn test_toggle_and_remove_by_id() {
        let state = fresh_state();
        let id = add_item(&state, GoalList::Goals, "goal").unwrap().unwrap();
        toggle_item(&state, GoalList::Goals, &id).unwrap();
        assert!(items_snapshot(&state, GoalList::Goals)[0].done);
        remove_item(&state, GoalList::Goals, &id).unwrap();
        assert!(items_snapshot(&state, GoalList::Goals).is_empty());
    }

    #[test]
    fn test_stale_id_is_silent_noop() {
        let state = fresh_state();
        add_item(&state, GoalList::Goals, "goal").unwrap();
        toggle_item(&state, GoalList::Goals, "gone").unwrap();
        remove_item(&state, GoalList::Goals, "gone").unwrap();
        let items = items_snapshot(&state, GoalList::Goals);
        assert_eq!(items.len(), 1);
        assert!(!items[0].done);
    }

    #[test]
    fn test_mutations_survive_reload_through_store() {
        let state = AppState::load(Box::new(MemoryDataStore::new()));
        add_item(&state, GoalList::Goals, "persisted").unwrap();
        let written = serde_json::to_string(&serde_json::json!({
            "settings": state.settings_snapshot(),
            "goals": items_snapshot(&state, GoalList::Goals),
            "tasks": [],
        }))
        .unwrap();

        let reloaded = AppState::load(Box::new(MemoryDataStore::with_doc(&written)));
        assert_eq!(
            items_snapshot(&reloaded, GoalList::Goals)[0].text,
            "persisted"
        );
    }
}
