//! Per-login tracking state.
//!
//! One [`SessionState`] holds both timers plus the encounter-phase flags
//! that pause them. It is a plain value mutated by the event processor;
//! shared access (live tail + CLI queries) wraps it in a lock at the edge.

use chrono::NaiveDateTime;

use crate::cooldown::SurgeCooldown;
use crate::regen::RegenTimer;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub(crate) logged_in: bool,
    pub(crate) player: Option<String>,

    pub(crate) regen: RegenTimer,
    pub(crate) surge: SurgeCooldown,

    // ─── Encounter Phase ───────────────────────────────────────────────────
    /// Colosseum/Doom downtime: holds the regen countdown and freezes the
    /// surge cooldown.
    pub(crate) between_waves: bool,
    /// Current Colosseum wave, while a run is underway.
    pub(crate) current_wave: Option<u32>,
    /// Theatre of Blood status, tracked so varbit updates edge-detect.
    pub(crate) inside_theatre: bool,
    /// Theatre downtime: freezes the surge cooldown only.
    pub(crate) between_rooms: bool,
    /// Set once the current Theatre room's combat area has been entered,
    /// so barrier checks stop re-firing inside the room.
    pub(crate) combat_area_entered: bool,

    // ─── Position ──────────────────────────────────────────────────────────
    pub(crate) last_region: Option<i32>,

    // ─── Clock ─────────────────────────────────────────────────────────────
    /// Tick index of the most recent tick event; anchors restore grace
    /// windows for chat that arrives between ticks.
    pub(crate) current_tick: i32,
    /// Timestamp of the last processed event. This is the tracker's only
    /// clock; wall-clock queries use it so replays stay deterministic.
    pub(crate) last_event_at: Option<NaiveDateTime>,
}

/// Flattened flags for change detection. Callers keep the previous
/// snapshot and compare to announce transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerSnapshot {
    pub logged_in: bool,
    pub between_waves: bool,
    pub current_wave: Option<u32>,
    pub inside_theatre: bool,
    pub between_rooms: bool,
    pub lightbearer: bool,
    pub surge_active: bool,
    pub surge_paused: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear timers and phase flags back to their logged-out baseline.
    /// The tick counter and event clock survive so replays stay monotone
    /// across hops.
    pub fn reset(&mut self) {
        self.regen.reset();
        self.surge.clear();
        self.between_waves = false;
        self.current_wave = None;
        self.inside_theatre = false;
        self.between_rooms = false;
        self.combat_area_entered = false;
        self.last_region = None;
    }

    /// Whether the surge cooldown should currently be frozen.
    pub fn should_pause_surge(&self) -> bool {
        self.between_waves || self.between_rooms
    }

    pub(crate) fn sync_surge_pause(&mut self, now: NaiveDateTime) {
        let paused = self.should_pause_surge();
        self.surge.sync_pause(now, paused);
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    pub fn regen(&self) -> &RegenTimer {
        &self.regen
    }

    pub fn surge(&self) -> &SurgeCooldown {
        &self.surge
    }

    pub fn is_between_waves(&self) -> bool {
        self.between_waves
    }

    pub fn current_wave(&self) -> Option<u32> {
        self.current_wave
    }

    pub fn is_inside_theatre(&self) -> bool {
        self.inside_theatre
    }

    pub fn is_between_rooms(&self) -> bool {
        self.between_rooms
    }

    pub fn is_combat_area_entered(&self) -> bool {
        self.combat_area_entered
    }

    pub fn last_region(&self) -> Option<i32> {
        self.last_region
    }

    pub fn current_tick(&self) -> i32 {
        self.current_tick
    }

    pub fn last_event_at(&self) -> Option<NaiveDateTime> {
        self.last_event_at
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            logged_in: self.logged_in,
            between_waves: self.between_waves,
            current_wave: self.current_wave,
            inside_theatre: self.inside_theatre,
            between_rooms: self.between_rooms,
            lightbearer: self.regen.is_lightbearer(),
            surge_active: self
                .last_event_at
                .is_some_and(|now| self.surge.is_active(now)),
            surge_paused: self.surge.is_paused(),
        }
    }
}
