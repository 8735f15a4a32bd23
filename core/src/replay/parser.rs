//! Recording line parser.
//!
//! Recordings are plain text, one event per line:
//!
//! ```text
//! [12:01:05.400] [tick] [745] [1023] [13125:3308,4448]
//! [12:01:06.600] [chat] [game] [Wave: 3]
//! [12:01:10.200] [session] [start] [PlayerName]
//! ```
//!
//! Timestamps carry no date; the recording's filename supplies the session
//! start and times that run past midnight roll into the next day. Lines
//! that do not parse are skipped, never fatal.

use chrono::{Days, NaiveDateTime, NaiveTime};
use memchr::memchr_iter;

use crate::events::{ChatChannel, GameEvent, WorldPosition};
use crate::processor::strip_tags;

#[cfg(test)]
mod tests;

pub struct RecordingParser {
    session_date: NaiveDateTime,
}

impl RecordingParser {
    pub fn new(session_date: NaiveDateTime) -> Self {
        Self { session_date }
    }

    /// Parse one recording line into an event.
    ///
    /// Every line is a timestamp segment, a kind segment, then the kind's
    /// fields, all bracket-delimited. A field containing brackets of its
    /// own breaks the segment count and the line is dropped; no live
    /// message the tracker matches on contains one.
    pub fn parse_line(&self, line: &str) -> Option<GameEvent> {
        let b = line.as_bytes();
        let opens: Vec<usize> = memchr_iter(b'[', b).collect();
        let closes: Vec<usize> = memchr_iter(b']', b).collect();

        if opens.len() != closes.len() || opens.len() < 3 {
            return None;
        }
        // Segments must interleave as [..] [..]; anything else is junk.
        if opens.iter().zip(&closes).any(|(open, close)| open > close) {
            return None;
        }

        let seg = |i: usize| &line[opens[i] + 1..closes[i]];
        let segments = opens.len();
        let timestamp = self.parse_timestamp(seg(0))?;

        match seg(1) {
            "tick" if segments == 5 => Some(GameEvent::Tick {
                timestamp,
                energy: seg(2).parse().ok()?,
                tick: seg(3).parse().ok()?,
                position: parse_position(seg(4))?,
            }),
            "chat" if segments == 4 => Some(GameEvent::Chat {
                timestamp,
                channel: parse_channel(seg(2)),
                text: strip_tags(seg(3)).into_owned(),
            }),
            "npc" if segments == 4 => Some(GameEvent::NpcSpawned {
                timestamp,
                npc_id: seg(2).parse().ok()?,
                name: seg(3).to_string(),
            }),
            "equip" if segments == 3 => Some(GameEvent::EquipmentChanged {
                timestamp,
                lightbearer: match seg(2) {
                    "lightbearer=1" => true,
                    "lightbearer=0" => false,
                    _ => return None,
                },
            }),
            "status" if segments == 3 => Some(GameEvent::TheatreStatus {
                timestamp,
                value: seg(2).strip_prefix("theatre=")?.parse().ok()?,
            }),
            "menu" if segments == 3 => Some(GameEvent::MenuOption {
                timestamp,
                option: seg(2).to_string(),
            }),
            "session" => match seg(2) {
                "start" if segments == 3 => Some(GameEvent::SessionStarted {
                    timestamp,
                    player: None,
                }),
                "start" if segments == 4 => Some(GameEvent::SessionStarted {
                    timestamp,
                    player: Some(seg(3).to_string()),
                }),
                "end" if segments == 3 => Some(GameEvent::SessionEnded { timestamp }),
                _ => None,
            },
            _ => None,
        }
    }

    // parse HH:MM:SS.mmm
    fn parse_timestamp(&self, segment: &str) -> Option<NaiveDateTime> {
        let b = segment.as_bytes();
        if b.len() != 12 || b[2] != b':' || b[5] != b':' || b[8] != b'.' {
            return None;
        }

        let digit = |i: usize| (b[i] as char).to_digit(10);
        let hour = digit(0)? * 10 + digit(1)?;
        let minute = digit(3)? * 10 + digit(4)?;
        let second = digit(6)? * 10 + digit(7)?;
        let millis = digit(9)? * 100 + digit(10)? * 10 + digit(11)?;

        let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;

        // A time earlier than the session start belongs to the next day.
        if time
            .signed_duration_since(self.session_date.time())
            .num_milliseconds()
            < 0
        {
            self.session_date
                .date()
                .and_time(time)
                .checked_add_days(Days::new(1))
        } else {
            Some(self.session_date.date().and_time(time))
        }
    }
}

fn parse_channel(segment: &str) -> ChatChannel {
    match segment {
        "game" => ChatChannel::Game,
        "spam" => ChatChannel::Spam,
        _ => ChatChannel::Other,
    }
}

/// `region:x,y`, or `-` when the dumper could not resolve a position.
fn parse_position(segment: &str) -> Option<Option<WorldPosition>> {
    if segment == "-" {
        return Some(None);
    }
    let (region, coords) = segment.split_once(':')?;
    let (x, y) = coords.split_once(',')?;
    Some(Some(WorldPosition {
        region: region.parse().ok()?,
        x: x.parse().ok()?,
        y: y.parse().ok()?,
    }))
}
