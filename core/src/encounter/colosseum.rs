//! Fortis Colosseum wave phases.
//!
//! Wave downtime is announced entirely through chat: a completion line
//! opens the lull, the next wave banner closes it, and the reward chest
//! line ends the run.

use chrono::NaiveDateTime;

use crate::session::SessionState;

/// Wave cleared; the lull begins and both timers freeze accordingly.
pub fn wave_completed(state: &mut SessionState, wave: u32, now: NaiveDateTime) {
    state.between_waves = true;
    state.current_wave = Some(wave);
    state.sync_surge_pause(now);
}

/// Next wave announced. Combat is live again and the wave start doubles as
/// a regen anchor, so the countdown reseeds from the top.
pub fn wave_started(state: &mut SessionState, wave: u32, now: NaiveDateTime) {
    state.between_waves = false;
    state.current_wave = Some(wave);
    state.regen.reseed();
    state.sync_surge_pause(now);
}

/// Reward chest is up; the run is over and wave rules stop applying.
pub fn rewards_claimable(state: &mut SessionState, now: NaiveDateTime) {
    state.between_waves = false;
    state.current_wave = None;
    state.sync_surge_pause(now);
}
