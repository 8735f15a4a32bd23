//! Surge potion cooldown.
//!
//! Unlike the regen countdown this runs on wall-clock time, because the
//! cooldown keeps draining while logged out. It still freezes during wave
//! and room downtime: the remaining duration is snapshotted when a pause
//! begins and re-anchored to the clock when combat resumes. All clock
//! reads come from event timestamps, never from the system clock.

use std::time::Duration;

use chrono::NaiveDateTime;

use crate::game_data::{GAME_TICK_MILLIS, SURGE_COOLDOWN};

/// Wall-clock cooldown with a freezable remainder.
///
/// Exactly one of the two fields is set while the cooldown is live; both
/// clear when it expires or the session resets.
#[derive(Debug, Clone, Default)]
pub struct SurgeCooldown {
    ends_at: Option<NaiveDateTime>,
    paused_remaining: Option<Duration>,
}

impl SurgeCooldown {
    /// Start (or restart) the full cooldown at `now`.
    ///
    /// A sip during downtime starts the cooldown already frozen, holding
    /// the full duration until combat resumes.
    pub fn start(&mut self, now: NaiveDateTime, paused: bool) {
        if paused {
            self.paused_remaining = Some(SURGE_COOLDOWN);
            self.ends_at = None;
        } else {
            self.ends_at = Some(now + SURGE_COOLDOWN);
            self.paused_remaining = None;
        }
    }

    /// Reconcile the frozen/running state with the encounter phase.
    /// Transitions snapshot or re-anchor the remainder; matching states
    /// are a no-op, so this is safe to call on every phase change.
    pub fn sync_pause(&mut self, now: NaiveDateTime, should_pause: bool) {
        if should_pause && let Some(end) = self.ends_at {
            self.paused_remaining = Some((end - now).to_std().unwrap_or(Duration::ZERO));
            self.ends_at = None;
        } else if !should_pause && let Some(remaining) = self.paused_remaining {
            self.ends_at = Some(now + remaining);
            self.paused_remaining = None;
        }
    }

    /// Time left on the cooldown, zero once elapsed. Never negative.
    pub fn remaining(&self, now: NaiveDateTime) -> Duration {
        if let Some(remaining) = self.paused_remaining {
            return remaining;
        }
        match self.ends_at {
            Some(end) => (end - now).to_std().unwrap_or(Duration::ZERO),
            None => Duration::ZERO,
        }
    }

    /// Remaining time expressed in whole game ticks, rounded down.
    pub fn remaining_ticks(&self, now: NaiveDateTime) -> i64 {
        self.remaining(now).as_millis() as i64 / GAME_TICK_MILLIS
    }

    pub fn is_paused(&self) -> bool {
        self.paused_remaining.is_some()
    }

    /// Whether there is cooldown time left to show.
    pub fn is_active(&self, now: NaiveDateTime) -> bool {
        !self.remaining(now).is_zero()
    }

    /// Drop the cooldown entirely (expiry message or session reset).
    pub fn clear(&mut self) {
        self.ends_at = None;
        self.paused_remaining = None;
    }
}
