use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::events::GameEvent;
use crate::processor::apply_event;
use crate::recordings::parse_recording_filename;
use crate::session::SessionState;

/// One loaded recording and the state replayed from it.
///
/// `current_byte` is where the full read stopped; the tail resumes there
/// so no line applies twice. The session date comes from the recording's
/// filename and anchors every in-file timestamp.
#[derive(Debug, Default)]
pub struct ReplaySession {
    pub current_byte: Option<u64>,
    pub active_file: Option<PathBuf>,
    pub session_date: Option<NaiveDateTime>,
    pub state: SessionState,
}

impl ReplaySession {
    pub fn new(path: PathBuf) -> Self {
        let session_date = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(parse_recording_filename)
            .map(|(_, started_at)| started_at);
        Self {
            current_byte: None,
            active_file: Some(path),
            session_date,
            state: SessionState::new(),
        }
    }

    pub fn process_event(&mut self, event: &GameEvent) {
        apply_event(&mut self.state, event);
    }

    pub fn process_events(&mut self, events: &[GameEvent]) {
        for event in events {
            apply_event(&mut self.state, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn session_date_comes_from_the_filename() {
        let session = ReplaySession::new(PathBuf::from(
            "/recordings/spec_2025-06-01_23_50_00.log",
        ));
        assert_eq!(
            session.session_date,
            Some(
                NaiveDate::from_ymd_opt(2025, 6, 1)
                    .unwrap()
                    .and_hms_opt(23, 50, 0)
                    .unwrap()
            )
        );
        assert!(session.current_byte.is_none());
    }

    #[test]
    fn unparseable_filename_leaves_no_date() {
        let session = ReplaySession::new(PathBuf::from("/recordings/notes.txt"));
        assert_eq!(session.session_date, None);
    }
}
