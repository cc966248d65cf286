//! Range and recency queries over a note snapshot.
//!
//! Pure functions over the host-supplied list, plus the composition with
//! the host's optional accelerated index.

use chrono::{DateTime, Utc};

use crate::ports::{NoteHost, NoteIndex};
use crate::types::NoteRecord;

/// Notes whose creation time lies in `[start, end]`, inclusive of both
/// ends, in the order the host supplied them.
pub fn created_between(
    notes: &[NoteRecord],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<NoteRecord> {
    notes
        .iter()
        .filter(|n| n.created_at >= start && n.created_at <= end)
        .cloned()
        .collect()
}

/// The note with the greatest modification time; first maximum wins on
/// ties. `None` for an empty snapshot.
pub fn most_recently_modified(notes: &[NoteRecord]) -> Option<&NoteRecord> {
    let mut best: Option<&NoteRecord> = None;
    for note in notes {
        match best {
            Some(current) if note.modified_at <= current.modified_at => {}
            _ => best = Some(note),
        }
    }
    best
}

/// Range query that tries the host's accelerated index first.
///
/// The index result is used only when the probe succeeds and returns
/// hits; otherwise the snapshot scan runs. Either path yields the same
/// contract, so callers never observe which one executed.
pub fn created_between_indexed(
    index: Option<&dyn NoteIndex>,
    host: &dyn NoteHost,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<NoteRecord> {
    if let Some(index) = index {
        match index.try_created_between(start, end) {
            Some(hits) if !hits.is_empty() => return hits,
            Some(_) => log::debug!("note index returned no hits, rescanning snapshot"),
            None => log::debug!("note index unavailable, scanning snapshot"),
        }
    }
    created_between(&host.list_notes(), start, end)
}
