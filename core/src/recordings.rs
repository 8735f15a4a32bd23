//! Recording directory index and watcher.
//!
//! The dumper writes one file per login session, named
//! `spec_YYYY-MM-DD_HH_MM_SS.log`. The index keeps lightweight metadata
//! for every recording in the configured directory; the watcher reports
//! files appearing, growing, and disappearing so the index and the active
//! replay can follow along.

use chrono::{NaiveDate, NaiveDateTime};
use hashbrown::HashMap;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::{self, Receiver};
use tokio::time::{Instant, sleep};

use crate::events::GameEvent;
use crate::replay::RecordingParser;

#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("failed to watch directory {path}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("failed to index directory {path}")]
    Index {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct RecordingMetaData {
    pub path: PathBuf,
    pub filename: String,
    pub date: NaiveDate,
    pub started_at: NaiveDateTime,
    pub player_name: Option<String>,
    pub session_number: u32,
    pub is_empty: bool,
    pub file_size: u64,
}

impl RecordingMetaData {
    /// Display name without date (date shown separately as title)
    pub fn display_name(&self) -> String {
        match &self.player_name {
            Some(name) => format!("{} Session {}", name, self.session_number),
            None => format!("Unknown Session {}", self.session_number),
        }
    }

    /// Formatted timestamp for display (date + time)
    pub fn formatted_datetime(&self) -> String {
        self.started_at.format("%Y-%m-%d %-H:%M").to_string()
    }
}

#[derive(Default)]
pub struct RecordingIndex {
    entries: HashMap<PathBuf, RecordingMetaData>,
    session_counts: HashMap<(String, NaiveDate), u32>,
}

impl RecordingIndex {
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    pub fn build_index(dir: &Path) -> Result<Self, WatcherError> {
        let mut index = Self::new();

        if !dir.exists() {
            return Ok(index);
        }
        let listing = fs::read_dir(dir).map_err(|source| WatcherError::Index {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut files: Vec<_> = listing
            .filter_map(|e| e.ok())
            .filter(|e| is_recording(&e.path()))
            .collect();
        // Filename order is chronological order, which keeps session
        // numbering stable across rebuilds.
        files.sort_by_key(|e| e.file_name());
        for entry in files {
            let path = entry.path();
            if let Some(recording) = index.create_entry(&path) {
                index.add_entry(recording);
            }
        }
        Ok(index)
    }

    pub fn create_entry(&mut self, path: &Path) -> Option<RecordingMetaData> {
        let filename = path.file_name()?.to_str()?.to_string();
        let (date, started_at) = parse_recording_filename(&filename)?;
        let metadata = fs::metadata(path).ok()?;
        let file_size = metadata.len();
        let is_empty = file_size == 0;

        let player_name = if !is_empty {
            extract_player_name(path, started_at).ok().flatten()
        } else {
            None
        };

        let session_number =
            self.compute_session_number(player_name.as_deref().unwrap_or("Unknown"), date);

        Some(RecordingMetaData {
            path: path.to_path_buf(),
            filename,
            date,
            started_at,
            player_name,
            session_number,
            is_empty,
            file_size,
        })
    }

    fn add_entry(&mut self, entry: RecordingMetaData) {
        self.entries.insert(entry.path.clone(), entry);
    }

    pub fn add_file(&mut self, path: &Path) -> Option<()> {
        let entry = self.create_entry(path)?;
        let path_key = entry.path.clone();
        self.entries.insert(path_key, entry);
        Some(())
    }

    /// Re-probe size and player metadata in place, keeping the session
    /// number. Used when a file indexed while empty starts growing.
    pub fn refresh_file(&mut self, path: &Path) -> Option<()> {
        let metadata = fs::metadata(path).ok()?;
        let entry = self.entries.get_mut(path)?;
        entry.file_size = metadata.len();
        entry.is_empty = entry.file_size == 0;
        if entry.player_name.is_none() && !entry.is_empty {
            entry.player_name = extract_player_name(path, entry.started_at).ok().flatten();
        }
        Some(())
    }

    pub fn remove_file(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    fn compute_session_number(&mut self, player: &str, date: NaiveDate) -> u32 {
        let key = (player.to_string(), date);
        let count = self.session_counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    // Accessor methods

    /// All entries, newest first.
    pub fn entries(&self) -> Vec<&RecordingMetaData> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        entries
    }

    pub fn newest_file(&self) -> Option<&RecordingMetaData> {
        self.entries.values().max_by_key(|e| e.started_at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn parse_recording_filename(filename: &str) -> Option<(NaiveDate, NaiveDateTime)> {
    let stem = filename.strip_suffix(".log").unwrap_or(filename);
    let stamp = stem.strip_prefix("spec_")?;

    let started_at = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d_%H_%M_%S").ok()?;

    Some((started_at.date(), started_at))
}

const CHECK_N_LINES: usize = 25;
/// Read only the first 8KB - recording lines are short, this covers 25 easily
const READ_LIMIT: usize = 8 * 1024;

/// Probe the head of a recording for the session-start line's player name.
pub fn extract_player_name(
    path: &Path,
    session_date: NaiveDateTime,
) -> std::io::Result<Option<String>> {
    let file = fs::File::open(path)?;
    let mut reader = std::io::BufReader::new(file);
    let mut buffer = vec![0u8; READ_LIMIT];
    let bytes_read = reader.read(&mut buffer)?;
    buffer.truncate(bytes_read);

    let content = String::from_utf8_lossy(&buffer);
    let parser = RecordingParser::new(session_date);

    // The start line is the first thing the dumper writes; if it is not in
    // the first 25 lines something is wrong with the file.
    for line in content.lines().take(CHECK_N_LINES) {
        if let Some(GameEvent::SessionStarted {
            player: Some(name), ..
        }) = parser.parse_line(line)
        {
            return Ok(Some(name));
        }
    }
    Ok(None)
}

pub enum RecordingEvent {
    NewFile(PathBuf),
    /// File grew; lets the index re-probe names on files that were empty
    FileModified(PathBuf),
    FileRemoved(PathBuf),
    Message(String),
    Error(String),
}

pub struct RecordingWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
}

impl RecordingWatcher {
    pub fn new(path: &Path) -> Result<Self, WatcherError> {
        let (tx, rx) = mpsc::channel(100);

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.blocking_send(res);
            },
            Config::default(),
        )
        .map_err(|source| WatcherError::Watch {
            path: path.to_path_buf(),
            source,
        })?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|source| WatcherError::Watch {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    pub async fn next_event(&mut self) -> Option<RecordingEvent> {
        while let Some(event_result) = self.rx.recv().await {
            match event_result {
                Ok(event) => {
                    if let Some(watcher_event) = self.process_event(event).await {
                        return Some(watcher_event);
                    }
                }
                Err(e) => {
                    return Some(RecordingEvent::Error(format!(
                        "Directory watcher error: {}",
                        e
                    )));
                }
            }
        }
        None
    }

    async fn process_event(&mut self, event: Event) -> Option<RecordingEvent> {
        match event.kind {
            EventKind::Create(_) => {
                for path in event.paths {
                    if is_recording(&path) {
                        return Some(self.handle_new_file(path).await);
                    }
                }
            }
            EventKind::Modify(_) => {
                for path in event.paths {
                    if is_recording(&path) {
                        tracing::debug!(path = %path.display(), "recording modified");
                        return Some(RecordingEvent::FileModified(path));
                    }
                }
            }
            EventKind::Remove(_) => {
                for path in event.paths {
                    if is_recording(&path) {
                        return Some(RecordingEvent::FileRemoved(path));
                    }
                }
            }
            _ => {}
        }
        None
    }

    async fn handle_new_file(&self, path: PathBuf) -> RecordingEvent {
        const NEW_FILE_TIMEOUT: Duration = Duration::from_secs(60);
        const NEW_FILE_POLL_INTERVAL: Duration = Duration::from_millis(500);

        // Wait for the dumper to write the session-start line; a zero-byte
        // file cannot be replayed or named yet.
        let start = Instant::now();
        let mut has_content = false;

        while start.elapsed() < NEW_FILE_TIMEOUT {
            if path.metadata().map(|m| m.len()).unwrap_or(0) > 0 {
                has_content = true;
                break;
            } else {
                sleep(NEW_FILE_POLL_INTERVAL).await;
            }
        }

        if !has_content {
            return RecordingEvent::Message(format!(
                "Warning: Timed out waiting for content in {}",
                path.display()
            ));
        }

        RecordingEvent::NewFile(path)
    }
}

fn is_recording(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with("spec_") && n.ends_with(".log"))
        .unwrap_or(false)
}

pub fn build_index(dir: &Path) -> Result<(RecordingIndex, Option<PathBuf>), WatcherError> {
    let index = RecordingIndex::build_index(dir)?;
    let newest = index.newest_file().map(|f| f.path.clone());
    Ok((index, newest))
}
