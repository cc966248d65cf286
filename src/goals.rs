//! Goal and task list operations.
//!
//! Pure, synchronous mutations over an in-memory list. Persistence and
//! view refresh happen in the service layer after each successful change.
//! Entries are addressed by their stable id: a reference that no longer
//! resolves (the entry was deleted from another view) is a silent no-op.

use crate::types::GoalItem;

/// Append a new entry. Whitespace-only text is rejected and nothing
/// changes; otherwise returns the new entry's id.
pub fn add(list: &mut Vec<GoalItem>, text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let item = GoalItem::new(text);
    let id = item.id.clone();
    list.push(item);
    Some(id)
}

/// Flip the `done` flag of the entry with the given id.
/// Returns whether anything changed.
pub fn toggle(list: &mut [GoalItem], id: &str) -> bool {
    match list.iter_mut().find(|item| item.id == id) {
        Some(item) => {
            item.done = !item.done;
            true
        }
        None => false,
    }
}

/// Remove the entry with the given id, keeping the order of the rest.
/// Returns whether anything changed.
pub fn remove(list: &mut Vec<GoalItem>, id: &str) -> bool {
    let before = list.len();
    list.retain(|item| item.id != id);
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_appends_pending_entry() {
        let mut list = Vec::new();
        let id = add(&mut list, "Buy milk").expect("added");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, id);
        assert_eq!(list[0].text, "Buy milk");
        assert!(!list[0].done);
    }

    #[test]
    fn test_add_trims_text() {
        let mut list = Vec::new();
        add(&mut list, "  Water plants  ").expect("added");
        assert_eq!(list[0].text, "Water plants");
    }

    #[test]
    fn test_add_rejects_empty_and_whitespace() {
        let mut list = vec![GoalItem::new("existing")];
        assert!(add(&mut list, "").is_none());
        assert!(add(&mut list, "   \t").is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_toggle_flips_done() {
        let mut list = Vec::new();
        let id = add(&mut list, "Buy milk").unwrap();
        assert!(toggle(&mut list, &id));
        assert!(list[0].done);
        assert!(toggle(&mut list, &id));
        assert!(!list[0].done);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut list = vec![GoalItem::new("a"), GoalItem::new("b")];
        assert!(!toggle(&mut list, "no-such-id"));
        assert!(list.iter().all(|item| !item.done));
    }

    #[test]
    fn test_remove_single_entry_empties_list() {
        let mut list = vec![GoalItem::new("only")];
        let id = list[0].id.clone();
        assert!(remove(&mut list, &id));
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_keeps_order_of_rest() {
        let mut list = vec![GoalItem::new("a"), GoalItem::new("b"), GoalItem::new("c")];
        let middle = list[1].id.clone();
        assert!(remove(&mut list, &middle));
        let texts: Vec<&str> = list.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_stale_id_is_noop() {
        let mut list = vec![GoalItem::new("a")];
        let id = list[0].id.clone();
        assert!(remove(&mut list, &id));
        // A second delete from a stale view finds nothing to do.
        assert!(!remove(&mut list, &id));
    }
}
