pub mod config;
pub mod cooldown;
pub mod encounter;
pub mod events;
pub mod game_data;
pub mod processor;
pub mod recordings;
pub mod regen;
pub mod replay;
pub mod session;
pub mod triggers;

// Re-exports for convenience
pub use config::{AppConfig, ConfigError, DisplayFormat};
pub use cooldown::SurgeCooldown;
pub use events::{ChatChannel, GameEvent, WorldPosition};
pub use game_data::*;
pub use processor::{apply_event, strip_tags};
pub use recordings::{
    RecordingEvent, RecordingIndex, RecordingMetaData, RecordingWatcher, WatcherError,
};
pub use regen::RegenTimer;
pub use replay::{LoadSummary, Reader, RecordingParser, ReplayError, ReplaySession, load_recording};
pub use session::{SessionState, TimerSnapshot};
pub use triggers::ChatTrigger;
