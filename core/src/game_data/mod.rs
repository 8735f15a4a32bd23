//! Static game data: energy constants, trigger messages, and Theatre of
//! Blood geometry.

mod chat;
pub mod theatre;

pub use chat::*;

use std::time::Duration;

/// Maximum special attack energy (displayed as 100%, stored as 1000 internally).
pub const MAX_SPEC_ENERGY: i32 = 1000;

/// Special attack regenerates 10% every 30 seconds (50 game ticks).
pub const SPEC_REGEN_TICKS: i32 = 50;

/// With a Lightbearer equipped, spec regenerates twice as fast.
pub const LIGHTBEARER_REGEN_TICKS: i32 = SPEC_REGEN_TICKS / 2;

/// One game tick in milliseconds.
pub const GAME_TICK_MILLIS: i64 = 600;

/// One game tick in seconds.
pub const GAME_TICK_SECS: f64 = 0.6;

/// Energy restored by one surge potion dose (25% = 250 internal units).
pub const SURGE_POTION_RESTORE: i32 = 250;

/// Energy restored by a Death Charge proc (15% = 150 internal units).
pub const DEATH_CHARGE_RESTORE: i32 = 150;

/// Surge potion cooldown in game ticks (5 minutes).
pub const SURGE_COOLDOWN_TICKS: i64 = 500;

/// Surge potion cooldown as a wall-clock duration.
pub const SURGE_COOLDOWN: Duration =
    Duration::from_millis((SURGE_COOLDOWN_TICKS * GAME_TICK_MILLIS) as u64);

/// Ticks of grace after a restore message during which an energy jump is
/// attributed to the effect, not natural regen. Absorbs the ordering jitter
/// between the tick event and the chat event reporting the restore.
pub const RESTORE_GRACE_TICKS: i32 = 2;

/// The game's internal regen cycle is already this far along by the time the
/// Doom boss spawn event fires.
pub const DOOM_SPAWN_LAG_TICKS: i32 = 2;
