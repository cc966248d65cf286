//! Daily note streak calculation.

use chrono::NaiveDate;

use crate::dates::date_key;

/// Count consecutive days ending at `today` for which a daily note exists.
///
/// Walks backward one day at a time, probing `exists` with the canonical
/// `YYYY-MM-DD` date string, and stops at the first miss. Returns 0 when
/// today itself has no note. Pure over the injected predicate.
pub fn current_streak(today: NaiveDate, exists: impl Fn(&str) -> bool) -> u32 {
    let mut days = 0u32;
    let mut cursor = today;
    loop {
        if !exists(&date_key(cursor)) {
            break;
        }
        days += 1;
        cursor = match cursor.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
    }
    days
}
