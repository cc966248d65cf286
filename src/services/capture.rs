//! Quick-create note actions.
//!
//! Daily and ad-hoc note creation, driven by injected prompts so the
//! flows run headless. Cancelling any prompt aborts the single requested
//! action with nothing created and nothing persisted.

use chrono::{Days, NaiveDate};

use crate::dates::date_key;
use crate::error::HostError;
use crate::ports::{ChoicePrompt, NoteHost, PromptProvider, TextPrompt};
use crate::types::DashboardSettings;

/// How far the date picker reaches around today, in days.
const DATE_PICK_SPAN: i64 = 7;

/// Vault path of the daily note for a date key.
pub fn daily_note_path(settings: &DashboardSettings, key: &str) -> String {
    let folder = settings.daily_note_folder.trim_matches('/');
    if folder.is_empty() {
        format!("{}.md", key)
    } else {
        format!("{}/{}.md", folder, key)
    }
}

/// Create every missing segment of a folder path, segment by segment.
/// Blank segments are skipped.
pub fn ensure_folder(host: &dyn NoteHost, path: &str) -> Result<(), String> {
    let mut prefix = String::new();
    for segment in path.split('/') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);
        if !host.folder_exists(&prefix) {
            host.create_folder(&prefix)
                .map_err(|e| format!("Failed to create folder {}: {}", prefix, e))?;
        }
    }
    Ok(())
}

fn reveal_best_effort(host: &dyn NoteHost, path: &str) {
    if let Err(e) = host.reveal_note(path) {
        log::warn!("could not reveal {}: {}", path, e);
    }
}

/// Create the daily note for `date` and reveal it.
///
/// Idempotent: an existing note for that date is revealed untouched, so
/// repeated calls never lose data.
pub fn create_daily_note(
    host: &dyn NoteHost,
    settings: &DashboardSettings,
    date: NaiveDate,
) -> Result<String, String> {
    let key = date_key(date);
    let path = daily_note_path(settings, &key);

    if host.note_exists(&path) {
        log::debug!("daily note {} already exists", path);
        reveal_best_effort(host, &path);
        return Ok(path);
    }

    ensure_folder(host, &settings.daily_note_folder)?;
    match host.create_note(&path, &format!("# {}\n", key)) {
        Ok(()) => {}
        // Lost a race with the host creating it; the note is there either way.
        Err(HostError::AlreadyExists(_)) => {}
        Err(e) => return Err(format!("Failed to create {}: {}", path, e)),
    }
    reveal_best_effort(host, &path);
    Ok(path)
}

/// Ask the user for a date within a week of today, either direction.
/// `None` when the prompt is cancelled.
pub fn pick_daily_date(prompts: &dyn PromptProvider, today: NaiveDate) -> Option<NaiveDate> {
    let mut dates = Vec::new();
    let mut options = Vec::new();
    for offset in -DATE_PICK_SPAN..=DATE_PICK_SPAN {
        let date = if offset < 0 {
            today.checked_sub_days(Days::new(offset.unsigned_abs()))
        } else {
            today.checked_add_days(Days::new(offset as u64))
        }?;
        options.push(if offset == 0 {
            format!("{} (today)", date_key(date))
        } else {
            date_key(date)
        });
        dates.push(date);
    }

    let request = ChoicePrompt {
        title: "Create daily note for".to_string(),
        options,
    };
    let picked = prompts.prompt_choice(&request)?;
    dates.get(picked).copied()
}

/// Prompt for a date, then create that day's daily note.
/// `Ok(None)` when the user cancels.
pub fn create_daily_note_prompted(
    host: &dyn NoteHost,
    prompts: &dyn PromptProvider,
    settings: &DashboardSettings,
    today: NaiveDate,
) -> Result<Option<String>, String> {
    match pick_daily_date(prompts, today) {
        Some(date) => create_daily_note(host, settings, date).map(Some),
        None => Ok(None),
    }
}

/// Prompt for a name (and a folder when several are configured), then
/// create an ad-hoc note there. `Ok(None)` when any prompt is cancelled
/// or the name is blank.
pub fn create_note_prompted(
    host: &dyn NoteHost,
    prompts: &dyn PromptProvider,
    settings: &DashboardSettings,
) -> Result<Option<String>, String> {
    let request = TextPrompt {
        title: "Note name".to_string(),
        placeholder: Some("Untitled".to_string()),
    };
    let name = match prompts.prompt_text(&request) {
        Some(name) => name.trim().to_string(),
        None => return Ok(None),
    };
    if name.is_empty() {
        return Ok(None);
    }

    let folders = &settings.note_folders;
    let folder = if folders.len() == 1 {
        folders[0].clone()
    } else {
        let request = ChoicePrompt {
            title: "Create note in".to_string(),
            options: folders.clone(),
        };
        match prompts.prompt_choice(&request).and_then(|i| folders.get(i)) {
            Some(folder) => folder.clone(),
            None => return Ok(None),
        }
    };

    let path = format!("{}/{}.md", folder, name);
    if host.note_exists(&path) {
        reveal_best_effort(host, &path);
        return Ok(Some(path));
    }

    ensure_folder(host, &folder)?;
    host.create_note(&path, "")
        .map_err(|e| format!("Failed to create {}: {}", path, e))?;
    reveal_best_effort(host, &path);
    Ok(Some(path))
}
