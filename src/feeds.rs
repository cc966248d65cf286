//! Calendar feed aggregation.
//!
//! Fetches each configured feed URL, keeps the event components, filters
//! them to a date range, and merges everything into one ascending list.
//! A failing source is logged and skipped so the remaining feeds still
//! produce a partial result. Every call re-fetches: one attempt per URL,
//! no retry, no caching.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::parser::{read_calendar, unfold};
use icalendar::{CalendarDateTime, DatePerhapsTime};
use url::Url;

use crate::error::FeedError;
use crate::ports::FeedFetcher;
use crate::types::{CalendarEvent, FeedObject, FeedObjectKind};

/// Merge events from all `urls` whose start lies in `[start, end]`,
/// inclusive of both ends, sorted ascending by start time. The sort is
/// stable: equal starts keep their discovery order.
pub async fn events_between(
    fetcher: &dyn FeedFetcher,
    urls: &[String],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = Vec::new();

    for url in urls {
        let objects = match fetcher.fetch(url).await {
            Ok(objects) => objects,
            Err(e) => {
                log::warn!("calendar feed {} skipped: {}", url, e);
                continue;
            }
        };

        events.extend(
            objects
                .into_iter()
                .filter(|o| o.kind == FeedObjectKind::Event)
                .filter_map(|o| {
                    let event_start = o.start?;
                    Some(CalendarEvent {
                        summary: o.summary,
                        start: event_start,
                    })
                })
                .filter(|e| e.start >= start && e.start <= end),
        );
    }

    events.sort_by_key(|e| e.start);
    events
}

/// Parse raw ICS text into feed objects, one per top-level component.
pub fn parse_feed(content: &str) -> Result<Vec<FeedObject>, FeedError> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| FeedError::Malformed(e.to_string()))?;

    Ok(calendar
        .components
        .iter()
        .map(|component| {
            let summary = component
                .find_prop("SUMMARY")
                .map(|p| p.val.to_string())
                .unwrap_or_default();
            let start = component
                .find_prop("DTSTART")
                .and_then(|p| DatePerhapsTime::try_from(p).ok())
                .and_then(resolve_start);
            FeedObject {
                kind: component_kind(component.name.as_ref()),
                summary,
                start,
            }
        })
        .collect())
}

fn component_kind(name: &str) -> FeedObjectKind {
    match name {
        "VEVENT" => FeedObjectKind::Event,
        "VTODO" => FeedObjectKind::Todo,
        "VJOURNAL" => FeedObjectKind::Journal,
        _ => FeedObjectKind::Other,
    }
}

/// Resolve a DTSTART into UTC. All-day dates map to midnight; floating
/// times and unknown TZIDs are taken as UTC.
fn resolve_start(dpt: DatePerhapsTime) -> Option<DateTime<Utc>> {
    match dpt {
        DatePerhapsTime::Date(date) => Some(date.and_hms_opt(0, 0, 0)?.and_utc()),
        DatePerhapsTime::DateTime(dt) => match dt {
            CalendarDateTime::Utc(utc) => Some(utc),
            CalendarDateTime::Floating(naive) => Some(naive.and_utc()),
            CalendarDateTime::WithTimezone { date_time, tzid } => match tzid.parse::<Tz>() {
                Ok(tz) => tz
                    .from_local_datetime(&date_time)
                    .earliest()
                    .map(|zoned| zoned.with_timezone(&Utc)),
                Err(_) => {
                    log::debug!("unknown feed timezone {}, treating as UTC", tzid);
                    Some(date_time.and_utc())
                }
            },
        },
    }
}

/// Rewrite `webcal://` subscription URLs to HTTPS and validate the rest.
fn normalize_feed_url(raw: &str) -> Result<Url, FeedError> {
    let trimmed = raw.trim();
    let rewritten = trimmed
        .strip_prefix("webcal://")
        .map(|rest| format!("https://{}", rest));
    let candidate = rewritten.as_deref().unwrap_or(trimmed);
    Url::parse(candidate).map_err(|e| FeedError::InvalidUrl(format!("{}: {}", trimmed, e)))
}

/// Feed fetcher backed by an HTTP client. One GET per call.
pub struct HttpFeedFetcher {
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFeedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedObject>, FeedError> {
        let url = normalize_feed_url(url)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        parse_feed(&body)
    }
}
