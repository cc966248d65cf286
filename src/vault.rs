//! Filesystem-backed note host.
//!
//! Treats a directory tree of markdown files as the vault. Paths handed
//! through the port are vault-relative with `/` separators, matching the
//! persisted settings.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use walkdir::WalkDir;

use crate::error::HostError;
use crate::ports::NoteHost;
use crate::types::NoteRecord;

pub struct FsNoteHost {
    root: PathBuf,
}

impl FsNoteHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, rel: &str) -> Result<PathBuf, HostError> {
        let rel_path = Path::new(rel);
        if rel.is_empty() || rel_path.is_absolute() {
            return Err(HostError::InvalidPath(rel.to_string()));
        }
        if rel_path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(HostError::InvalidPath(rel.to_string()));
        }
        Ok(self.root.join(rel_path))
    }
}

/// File creation time, falling back to mtime on filesystems that don't
/// track it.
fn file_times(meta: &fs::Metadata) -> (DateTime<Utc>, DateTime<Utc>) {
    let modified = meta
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());
    let created = meta
        .created()
        .map(DateTime::<Utc>::from)
        .unwrap_or(modified);
    (created, modified)
}

impl NoteHost for FsNoteHost {
    fn list_notes(&self) -> Vec<NoteRecord> {
        let mut records = Vec::new();
        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let rel = match path.strip_prefix(&self.root) {
                Ok(rel) => rel,
                Err(_) => continue,
            };
            let rel_str = rel
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect::<Vec<_>>()
                .join("/");
            let basename = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            let meta = match entry.metadata() {
                Ok(meta) => meta,
                Err(e) => {
                    log::debug!("skipping {}: {}", rel_str, e);
                    continue;
                }
            };
            let (created_at, modified_at) = file_times(&meta);
            records.push(NoteRecord {
                path: rel_str,
                basename,
                created_at,
                modified_at,
            });
        }
        records
    }

    fn note_exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn read_note(&self, path: &str) -> Result<String, HostError> {
        let abs = self.resolve(path)?;
        Ok(fs::read_to_string(abs)?)
    }

    fn create_note(&self, path: &str, content: &str) -> Result<(), HostError> {
        let abs = self.resolve(path)?;
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&abs)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    fn folder_exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_dir()).unwrap_or(false)
    }

    fn create_folder(&self, path: &str) -> Result<(), HostError> {
        let abs = self.resolve(path)?;
        fs::create_dir(abs)?;
        Ok(())
    }

    fn reveal_note(&self, path: &str) -> Result<(), HostError> {
        let abs = self.resolve(path)?;
        if !abs.is_file() {
            return Err(HostError::NotFound(path.to_string()));
        }
        // Headless host: announcing the path is as far as "bring into
        // view" goes. A UI embedding would focus the note here.
        log::info!("open {}", abs.display());
        Ok(())
    }
}
