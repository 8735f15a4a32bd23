//! Doom of Mokhaiotl delve phases.
//!
//! Doom reuses the Colosseum's wave-downtime flag: the gap between one
//! delve level and the boss respawning on the next behaves exactly like
//! the gap between waves. The respawn itself is the regen anchor.

use chrono::NaiveDateTime;

use crate::game_data::DOOM_SPAWN_LAG_TICKS;
use crate::session::SessionState;

/// Delve level cleared; downtime until the boss spawns on the next level.
pub fn delve_completed(state: &mut SessionState, now: NaiveDateTime) {
    state.between_waves = true;
    state.sync_surge_pause(now);
}

/// Doom spawned on the next level. The spawn reaches the client a couple
/// of ticks after the server restarts the regen cycle, so the reseed is
/// backdated by that lag.
pub fn boss_spawned(state: &mut SessionState, now: NaiveDateTime) {
    state.between_waves = false;
    state.regen.reseed_with_lag(DOOM_SPAWN_LAG_TICKS);
    state.sync_surge_pause(now);
}
