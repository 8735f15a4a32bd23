use std::fs;
use std::io::SeekFrom;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDateTime;
use memchr::memchr_iter;
use memmap2::Mmap;
use rayon::prelude::*;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::sync::RwLock;
use tokio::time::{Duration, sleep};
use tracing::debug;

use super::{RecordingParser, ReplayError, ReplaySession};
use crate::events::GameEvent;
use crate::session::SessionState;

const TAIL_SLEEP_DURATION: Duration = Duration::from_millis(100);

pub struct Reader {
    path: PathBuf,
    session: Arc<RwLock<ReplaySession>>,
}

impl Reader {
    pub fn from(path: PathBuf, session: Arc<RwLock<ReplaySession>>) -> Self {
        Reader { path, session }
    }

    /// Parse the whole recording in one pass.
    ///
    /// Line splitting and parsing run in parallel; the collect keeps line
    /// order, so applying the result replays the stream faithfully.
    /// Returns the events plus the byte offset the tail resumes from.
    pub async fn read_recording(&self) -> Result<(Vec<GameEvent>, u64), ReplayError> {
        let session_date = self.session_date().await?;

        let file = fs::File::open(&self.path).map_err(|source| ReplayError::OpenFile {
            path: self.path.clone(),
            source,
        })?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(|source| ReplayError::MemoryMap {
            path: self.path.clone(),
            source,
        })?;
        let bytes = mmap.as_ref();
        let end_pos = bytes.len() as u64;

        // Find all line boundaries
        let mut line_ranges: Vec<(usize, usize)> = Vec::new();
        let mut start = 0;
        for end in memchr_iter(b'\n', bytes) {
            if end > start {
                line_ranges.push((start, end));
            }
            start = end + 1;
        }
        if start < bytes.len() {
            line_ranges.push((start, bytes.len()));
        }

        let parser = RecordingParser::new(session_date);
        let events: Vec<GameEvent> = line_ranges
            .par_iter()
            .filter_map(|&(start, end)| {
                let line = String::from_utf8_lossy(&bytes[start..end]);
                parser.parse_line(&line)
            })
            .collect();

        debug!(
            lines = line_ranges.len(),
            events = events.len(),
            "recording parsed"
        );
        Ok((events, end_pos))
    }

    /// Follow the live recording from the stored offset, applying each
    /// complete line as it lands. Partial lines wait for their remaining
    /// bytes; end of file is polled, not terminal.
    pub async fn tail_recording(self) -> Result<(), ReplayError> {
        let session_date = self.session_date().await?;
        let file = File::open(&self.path)
            .await
            .map_err(|source| ReplayError::OpenFile {
                path: self.path.clone(),
                source,
            })?;
        let mut reader = BufReader::new(file);
        let pos = self.session.read().await.current_byte.unwrap_or(0);
        reader
            .seek(SeekFrom::Start(pos))
            .await
            .map_err(|source| ReplayError::Seek {
                path: self.path.clone(),
                source,
            })?;

        let parser = RecordingParser::new(session_date);
        let mut line_number = 0u64;
        let mut buf = Vec::new();

        loop {
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => {
                    sleep(TAIL_SLEEP_DURATION).await;
                }
                Ok(_) => {
                    // Only process complete lines; a partial tail keeps its
                    // bytes for the next read to extend.
                    if buf.ends_with(b"\n") {
                        let line = String::from_utf8_lossy(&buf);
                        match parser.parse_line(&line) {
                            Some(event) => {
                                self.session.write().await.process_event(&event);
                            }
                            None => debug!(line_number, "skipping malformed recording line"),
                        }
                        buf.clear();
                        line_number += 1;
                    }
                }
                Err(source) => {
                    return Err(ReplayError::ReadFile {
                        path: self.path.clone(),
                        source,
                    });
                }
            }
        }
    }

    async fn session_date(&self) -> Result<NaiveDateTime, ReplayError> {
        self.session
            .read()
            .await
            .session_date
            .ok_or_else(|| ReplayError::MissingSessionDate {
                path: self.path.clone(),
            })
    }
}

/// What a full-file load produced, for the caller to report.
pub struct LoadSummary {
    pub events: usize,
    pub elapsed: std::time::Duration,
}

/// Replay a recording from the top.
///
/// Parses the whole file, rebuilds the session state from scratch, and
/// leaves the byte offset set so a subsequent [`Reader::tail_recording`]
/// picks up exactly where the load stopped.
pub async fn load_recording(
    path: PathBuf,
    session: Arc<RwLock<ReplaySession>>,
) -> Result<(Reader, LoadSummary), ReplayError> {
    let started = Instant::now();
    let reader = Reader::from(path, session.clone());
    let (events, end_pos) = reader.read_recording().await?;

    let mut guard = session.write().await;
    guard.current_byte = Some(end_pos);
    guard.state = SessionState::new();
    guard.process_events(&events);
    drop(guard);

    Ok((
        reader,
        LoadSummary {
            events: events.len(),
            elapsed: started.elapsed(),
        },
    ))
}
