//! Inbound event model.
//!
//! Everything the tracker reacts to arrives as a [`GameEvent`], whether live
//! from the game client or replayed from a recording. Events carry their own
//! timestamps and the core never reads a system clock, so replaying a stream
//! reproduces state exactly.

use chrono::NaiveDateTime;

/// Player position in template (de-instanced) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldPosition {
    pub region: i32,
    pub x: i32,
    pub y: i32,
}

/// Chat channel a message arrived on.
///
/// Only game messages and spam carry the announcements the tracker reacts
/// to; everything else is dropped at dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatChannel {
    Game,
    Spam,
    Other,
}

/// A single inbound event.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Per-tick sample: current spec energy, the client's monotonic tick
    /// index, and the player position when it could be resolved.
    Tick {
        timestamp: NaiveDateTime,
        energy: i32,
        tick: i32,
        position: Option<WorldPosition>,
    },
    Chat {
        timestamp: NaiveDateTime,
        channel: ChatChannel,
        text: String,
    },
    NpcSpawned {
        timestamp: NaiveDateTime,
        npc_id: i32,
        name: String,
    },
    /// Equipment container changed; carries whether a Lightbearer is worn.
    EquipmentChanged {
        timestamp: NaiveDateTime,
        lightbearer: bool,
    },
    /// Raw Theatre of Blood status varbit (2 or 3 while inside).
    TheatreStatus {
        timestamp: NaiveDateTime,
        value: i32,
    },
    /// A dialogue or menu option the player clicked.
    MenuOption {
        timestamp: NaiveDateTime,
        option: String,
    },
    SessionStarted {
        timestamp: NaiveDateTime,
        player: Option<String>,
    },
    SessionEnded {
        timestamp: NaiveDateTime,
    },
}

impl GameEvent {
    /// Get the timestamp from any event variant
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            Self::Tick { timestamp, .. }
            | Self::Chat { timestamp, .. }
            | Self::NpcSpawned { timestamp, .. }
            | Self::EquipmentChanged { timestamp, .. }
            | Self::TheatreStatus { timestamp, .. }
            | Self::MenuOption { timestamp, .. }
            | Self::SessionStarted { timestamp, .. }
            | Self::SessionEnded { timestamp } => *timestamp,
        }
    }
}
