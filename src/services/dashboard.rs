//! Dashboard composition.
//!
//! Pulls note ranges, goal/task lists, the daily streak, and the week's
//! calendar events together into one view-model for a selected date.

use chrono::NaiveDate;

use crate::dates::{date_key, day_bounds, month_bounds, week_bounds};
use crate::feeds;
use crate::notes;
use crate::ports::{FeedFetcher, NoteHost, NoteIndex};
use crate::services::capture::daily_note_path;
use crate::services::goals::{items_snapshot, GoalList};
use crate::state::AppState;
use crate::streak::current_streak;
use crate::types::{DashboardStats, DashboardView};

/// The host-side collaborators one render pass reads from.
pub struct RenderSources<'a> {
    pub host: &'a dyn NoteHost,
    /// Accelerated range query, when the host offers one.
    pub index: Option<&'a dyn NoteIndex>,
    pub fetcher: &'a dyn FeedFetcher,
}

/// Assemble the view-model for `selected`.
///
/// Week and month are the calendar week/month containing the selected
/// date; the streak is always anchored at the current day. Feed failures
/// degrade to partial event lists and never fail the render.
pub async fn render(
    state: &AppState,
    sources: &RenderSources<'_>,
    selected: NaiveDate,
) -> DashboardView {
    let settings = state.settings_snapshot();

    let (today_start, today_end) = day_bounds(selected);
    let (week_start, week_end) = week_bounds(selected, settings.week_start_day());
    let (month_start, month_end) = month_bounds(selected);

    let today_notes =
        notes::created_between_indexed(sources.index, sources.host, today_start, today_end);
    let week_notes =
        notes::created_between_indexed(sources.index, sources.host, week_start, week_end);
    let month_notes =
        notes::created_between_indexed(sources.index, sources.host, month_start, month_end);

    let last_edited = {
        let snapshot = sources.host.list_notes();
        notes::most_recently_modified(&snapshot).cloned()
    };

    let today = chrono::Local::now().date_naive();
    let streak_days = current_streak(today, |key| {
        sources.host.note_exists(&daily_note_path(&settings, key))
    });

    let events = feeds::events_between(
        sources.fetcher,
        &settings.calendar_url_list(),
        week_start,
        week_end,
    )
    .await;

    let stats = DashboardStats {
        today: today_notes.len(),
        week: week_notes.len(),
        month: month_notes.len(),
    };

    DashboardView {
        date: date_key(selected),
        today_notes,
        week_notes,
        month_notes,
        stats,
        streak_days,
        last_edited,
        goals: items_snapshot(state, GoalList::Goals),
        tasks: items_snapshot(state, GoalList::Tasks),
        events,
    }
}

/// Render for `selected` and publish the result into the shared view
/// slot. Returns `None` when a newer render started meanwhile; that
/// newer pass owns the slot, and this result is discarded.
pub async fn render_and_commit(
    state: &AppState,
    sources: &RenderSources<'_>,
    selected: NaiveDate,
) -> Option<DashboardView> {
    let generation = state.begin_render();
    let view = render(state, sources, selected).await;
    if state.commit_view(generation, view.clone()) {
        Some(view)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Local, Utc};

    use crate::error::{FeedError, HostError};
    use crate::state::{AppState, MemoryDataStore};
    use crate::types::{FeedObject, FeedObjectKind, NoteRecord};

    struct FakeVault {
        notes: Vec<NoteRecord>,
        existing: HashSet<String>,
    }

    impl FakeVault {
        fn new(notes: Vec<NoteRecord>) -> Self {
            Self {
                notes,
                existing: HashSet::new(),
            }
        }

        fn with_daily_notes(mut self, keys: &[String]) -> Self {
            for key in keys {
                self.existing.insert(format!("Daily/{}.md", key));
            }
            self
        }
    }

    impl NoteHost for FakeVault {
        fn list_notes(&self) -> Vec<NoteRecord> {
            self.notes.clone()
        }
        fn note_exists(&self, path: &str) -> bool {
            self.existing.contains(path)
        }
        fn read_note(&self, path: &str) -> Result<String, HostError> {
            Err(HostError::NotFound(path.to_string()))
        }
        fn create_note(&self, _path: &str, _content: &str) -> Result<(), HostError> {
            Ok(())
        }
        fn folder_exists(&self, _path: &str) -> bool {
            true
        }
        fn create_folder(&self, _path: &str) -> Result<(), HostError> {
            Ok(())
        }
        fn reveal_note(&self, _path: &str) -> Result<(), HostError> {
            Ok(())
        }
    }

    struct FixedFetcher {
        objects: Vec<FeedObject>,
    }

    #[async_trait]
    impl FeedFetcher for FixedFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<FeedObject>, FeedError> {
            Ok(self.objects.clone())
        }
    }

    struct EmptyFetcher;

    #[async_trait]
    impl FeedFetcher for EmptyFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<FeedObject>, FeedError> {
            Ok(Vec::new())
        }
    }

    fn make_note(path: &str, created: DateTime<Utc>) -> NoteRecord {
        NoteRecord {
            path: path.to_string(),
            basename: path.trim_end_matches(".md").to_string(),
            created_at: created,
            modified_at: created,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    /// Noon (UTC) of the given day; inside every range containing the day.
    fn mid_day(date: chrono::NaiveDate) -> DateTime<Utc> {
        crate::dates::day_bounds(date).0 + Duration::hours(12)
    }

    fn fresh_state() -> AppState {
        AppState::load(Box::new(MemoryDataStore::new()))
    }

    #[tokio::test]
    async fn test_render_counts_note_ranges() {
        // Anchored at the real today so every range contains the new note.
        let today = Local::now().date_naive();
        let vault = FakeVault::new(vec![
            make_note("fresh.md", mid_day(today)),
            make_note("ancient.md", mid_day(today) - Duration::days(400)),
        ]);
        let state = fresh_state();
        let sources = RenderSources {
            host: &vault,
            index: None,
            fetcher: &EmptyFetcher,
        };

        let view = render(&state, &sources, today).await;
        assert_eq!(view.stats.today, 1);
        assert_eq!(view.stats.week, 1);
        assert_eq!(view.stats.month, 1);
        assert_eq!(view.today_notes[0].path, "fresh.md");
        assert_eq!(view.date, date_key(today));
    }

    #[tokio::test]
    async fn test_render_streak_from_daily_notes() {
        let today = Local::now().date_naive();
        let keys: Vec<String> = (0..3)
            .filter_map(|back| today.checked_sub_days(chrono::Days::new(back)))
            .map(date_key)
            .collect();
        let vault = FakeVault::new(Vec::new()).with_daily_notes(&keys);
        let state = fresh_state();
        let sources = RenderSources {
            host: &vault,
            index: None,
            fetcher: &EmptyFetcher,
        };

        let view = render(&state, &sources, today).await;
        assert_eq!(view.streak_days, 3);
    }

    #[tokio::test]
    async fn test_render_includes_week_events_sorted() {
        let today = Local::now().date_naive();
        let (week_start, _) = week_bounds(today, chrono::Weekday::Mon);
        let vault = FakeVault::new(Vec::new());
        let fetcher = FixedFetcher {
            objects: vec![
                FeedObject {
                    kind: FeedObjectKind::Event,
                    summary: "later".to_string(),
                    start: Some(week_start + Duration::hours(20)),
                },
                FeedObject {
                    kind: FeedObjectKind::Event,
                    summary: "earlier".to_string(),
                    start: Some(week_start + Duration::hours(9)),
                },
            ],
        };
        let state = fresh_state();
        state
            .update_settings(crate::types::DashboardSettings {
                calendar_urls: "https://cal.example/team.ics".to_string(),
                ..Default::default()
            })
            .unwrap();
        let sources = RenderSources {
            host: &vault,
            index: None,
            fetcher: &fetcher,
        };

        let view = render(&state, &sources, today).await;
        let summaries: Vec<&str> = view.events.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, vec!["earlier", "later"]);
    }

    #[tokio::test]
    async fn test_render_without_feed_urls_fetches_nothing() {
        let today = Local::now().date_naive();
        let vault = FakeVault::new(Vec::new());
        let state = fresh_state();
        let sources = RenderSources {
            host: &vault,
            index: None,
            fetcher: &EmptyFetcher,
        };
        let view = render(&state, &sources, today).await;
        assert!(view.events.is_empty());
    }

    #[tokio::test]
    async fn test_render_carries_goal_and_task_lists() {
        use crate::services::goals::{add_item, GoalList};

        let today = Local::now().date_naive();
        let vault = FakeVault::new(Vec::new());
        let state = fresh_state();
        add_item(&state, GoalList::Goals, "Ship it").unwrap();
        add_item(&state, GoalList::Tasks, "Review PR").unwrap();
        let sources = RenderSources {
            host: &vault,
            index: None,
            fetcher: &EmptyFetcher,
        };

        let view = render(&state, &sources, today).await;
        assert_eq!(view.goals[0].text, "Ship it");
        assert_eq!(view.tasks[0].text, "Review PR");
    }

    #[tokio::test]
    async fn test_render_and_commit_publishes_view() {
        let today = Local::now().date_naive();
        let vault = FakeVault::new(vec![make_note("fresh.md", now())]);
        let state = fresh_state();
        let sources = RenderSources {
            host: &vault,
            index: None,
            fetcher: &EmptyFetcher,
        };

        let view = render_and_commit(&state, &sources, today).await;
        assert!(view.is_some());
        let slot = state.view.read().unwrap();
        assert_eq!(slot.as_ref().unwrap().date, date_key(today));
    }

    #[tokio::test]
    async fn test_render_last_edited_picks_latest_modification() {
        let today = Local::now().date_naive();
        let mut older = make_note("older.md", now() - Duration::days(3));
        older.modified_at = now() - Duration::days(2);
        let mut newer = make_note("newer.md", now() - Duration::days(3));
        newer.modified_at = now() - Duration::hours(1);
        let vault = FakeVault::new(vec![older, newer]);
        let state = fresh_state();
        let sources = RenderSources {
            host: &vault,
            index: None,
            fetcher: &EmptyFetcher,
        };

        let view = render(&state, &sources, today).await;
        assert_eq!(view.last_edited.unwrap().path, "newer.md");
    }
}
