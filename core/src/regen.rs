//! Special attack energy regeneration countdown.
//!
//! Energy regenerates 10% on a fixed game-tick cadence (halved by a worn
//! Lightbearer), but the client only exposes the current energy value, not
//! the cycle position. The timer infers the cycle by counting ticks and
//! resynchronizes whenever energy rises on its own. Announced restores
//! (surge potion, Death Charge) open a short grace window so the jump they
//! cause is not mistaken for a natural pulse.

use crate::game_data::{LIGHTBEARER_REGEN_TICKS, MAX_SPEC_ENERGY, SPEC_REGEN_TICKS};

/// Restore announced via chat; energy jumps arriving within the window are
/// ignored unless they exceed the announced amount.
#[derive(Debug, Clone, Copy)]
struct IgnoreWindow {
    expires_at_tick: i32,
    expected_delta: i32,
}

/// Tick countdown to the next passive energy pulse.
#[derive(Debug, Clone)]
pub struct RegenTimer {
    ticks_until_regen: i32,
    last_energy: Option<i32>,
    lightbearer: bool,
    ignore: Option<IgnoreWindow>,
}

impl RegenTimer {
    pub fn new() -> Self {
        Self {
            ticks_until_regen: SPEC_REGEN_TICKS,
            last_energy: None,
            lightbearer: false,
            ignore: None,
        }
    }

    /// Full cycle length under the current equipment.
    pub fn max_regen_ticks(&self) -> i32 {
        if self.lightbearer {
            LIGHTBEARER_REGEN_TICKS
        } else {
            SPEC_REGEN_TICKS
        }
    }

    pub fn ticks_until_regen(&self) -> i32 {
        self.ticks_until_regen
    }

    /// Countdown value for display: a freshly reseeded cycle reads 0, not
    /// the full cycle length, so the counter runs max-1 down to 0.
    pub fn display_ticks(&self) -> i32 {
        if self.ticks_until_regen == self.max_regen_ticks() {
            0
        } else {
            self.ticks_until_regen
        }
    }

    pub fn seconds_until_regen(&self) -> f64 {
        self.display_ticks() as f64 * crate::game_data::GAME_TICK_SECS
    }

    pub fn is_lightbearer(&self) -> bool {
        self.lightbearer
    }

    pub fn last_energy(&self) -> Option<i32> {
        self.last_energy
    }

    /// Latest energy reading as the in-game percentage.
    pub fn energy_percent(&self) -> Option<i32> {
        self.last_energy.map(|e| e / 10)
    }

    pub fn is_energy_full(&self) -> bool {
        self.last_energy == Some(MAX_SPEC_ENERGY)
    }

    /// Advance one game tick with the current energy reading.
    ///
    /// `paused` holds the countdown in place (between Colosseum waves or
    /// Theatre rooms); full energy pins it at the cycle length so the
    /// counter restarts cleanly on the first spend.
    pub fn on_tick(&mut self, energy: i32, tick: i32, paused: bool) {
        let energy = energy.clamp(0, MAX_SPEC_ENERGY);

        if let Some(last) = self.last_energy
            && energy > last
        {
            let actual_increase = energy - last;
            let max_possible_increase = MAX_SPEC_ENERGY - last;
            let grace = self.ignore.filter(|w| tick <= w.expires_at_tick);
            // A jump past the announced restore (that the cap cannot
            // explain away) means a natural pulse landed inside the grace
            // window too.
            let natural_pulse_in_window = grace.is_some_and(|w| {
                actual_increase > w.expected_delta && actual_increase <= max_possible_increase
            });
            if grace.is_none() || natural_pulse_in_window {
                self.ticks_until_regen = self.max_regen_ticks();
            }
        }
        self.last_energy = Some(energy);

        if energy >= MAX_SPEC_ENERGY {
            self.ticks_until_regen = self.max_regen_ticks();
        } else if !paused {
            self.ticks_until_regen -= 1;
            if self.ticks_until_regen <= 0 {
                self.ticks_until_regen = self.max_regen_ticks();
            }
        }
    }

    /// Equipment changed; only transitions adjust the countdown.
    ///
    /// Donning a Lightbearer clamps the remaining wait into the shorter
    /// cycle. Removing it restarts the slow cycle from the top, since the
    /// ring resets the regen position on removal in-game.
    pub fn set_lightbearer(&mut self, worn: bool) {
        if worn == self.lightbearer {
            return;
        }
        self.lightbearer = worn;
        if worn {
            self.ticks_until_regen = self.ticks_until_regen.min(LIGHTBEARER_REGEN_TICKS);
        } else {
            self.ticks_until_regen = SPEC_REGEN_TICKS;
        }
    }

    /// Restart the countdown from the top of the cycle.
    pub fn reseed(&mut self) {
        self.ticks_until_regen = self.max_regen_ticks();
    }

    /// Restart the countdown as if the cycle began `lag_ticks` ago. Used
    /// when the anchor event reaches the client late.
    pub fn reseed_with_lag(&mut self, lag_ticks: i32) {
        self.ticks_until_regen = self.max_regen_ticks() - lag_ticks;
    }

    /// Record an announced restore of `amount` arriving around `tick`.
    pub fn note_external_restore(&mut self, tick: i32, amount: i32) {
        self.ignore = Some(IgnoreWindow {
            expires_at_tick: tick + crate::game_data::RESTORE_GRACE_TICKS,
            expected_delta: amount,
        });
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for RegenTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run `n` quiet ticks at the same energy, unpaused.
    fn run_ticks(timer: &mut RegenTimer, from_tick: i32, n: i32, energy: i32) {
        for t in from_tick..from_tick + n {
            timer.on_tick(energy, t, false);
        }
    }

    #[test]
    fn countdown_wraps_at_zero() {
        let mut timer = RegenTimer::new();
        run_ticks(&mut timer, 1, 49, 500);
        assert_eq!(timer.ticks_until_regen(), 1);

        // The wrap tick restarts the cycle instead of reading 0.
        timer.on_tick(500, 50, false);
        assert_eq!(timer.ticks_until_regen(), SPEC_REGEN_TICKS);
        assert_eq!(timer.display_ticks(), 0);
    }

    #[test]
    fn full_energy_pins_even_while_paused() {
        let mut timer = RegenTimer::new();
        run_ticks(&mut timer, 1, 5, 500);
        timer.on_tick(1000, 6, true);
        assert_eq!(timer.ticks_until_regen(), SPEC_REGEN_TICKS);
        assert!(timer.is_energy_full());
    }

    #[test]
    fn pause_holds_the_countdown_in_place() {
        let mut timer = RegenTimer::new();
        run_ticks(&mut timer, 1, 10, 500);
        assert_eq!(timer.ticks_until_regen(), SPEC_REGEN_TICKS - 10);

        for t in 11..=20 {
            timer.on_tick(500, t, true);
        }
        assert_eq!(timer.ticks_until_regen(), SPEC_REGEN_TICKS - 10);
    }

    #[test]
    fn energy_rise_while_paused_still_resynchronizes() {
        let mut timer = RegenTimer::new();
        run_ticks(&mut timer, 1, 10, 500);

        // A pulse lands during a lull; the cycle anchor moves even though
        // the countdown is not advancing.
        timer.on_tick(600, 11, true);
        assert_eq!(timer.ticks_until_regen(), SPEC_REGEN_TICKS);
    }

    #[test]
    fn readings_above_max_are_clamped() {
        let mut timer = RegenTimer::new();
        timer.on_tick(1200, 1, false);
        assert_eq!(timer.last_energy(), Some(MAX_SPEC_ENERGY));
        assert_eq!(timer.ticks_until_regen(), SPEC_REGEN_TICKS);
    }

    #[test]
    fn lightbearer_clamp_keeps_shorter_remainder() {
        let mut timer = RegenTimer::new();
        run_ticks(&mut timer, 1, 40, 500);
        assert_eq!(timer.ticks_until_regen(), 10);

        // Already below the short cycle; donning the ring must not extend it.
        timer.set_lightbearer(true);
        assert_eq!(timer.ticks_until_regen(), 10);

        timer.set_lightbearer(false);
        assert_eq!(timer.ticks_until_regen(), SPEC_REGEN_TICKS);
    }

    #[test]
    fn reseed_with_lag_backdates_the_cycle() {
        let mut timer = RegenTimer::new();
        timer.reseed_with_lag(2);
        assert_eq!(timer.ticks_until_regen(), SPEC_REGEN_TICKS - 2);
        assert_eq!(timer.display_ticks(), SPEC_REGEN_TICKS - 2);
    }

    #[test]
    fn grace_window_is_anchored_to_ticks_not_calls() {
        let mut timer = RegenTimer::new();
        run_ticks(&mut timer, 1, 2, 500);
        timer.note_external_restore(2, 250);

        // Exactly the announced amount inside the window: suppressed.
        timer.on_tick(750, 3, false);
        assert_eq!(timer.ticks_until_regen(), SPEC_REGEN_TICKS - 3);

        // Window closed at tick 4; the next rise is natural again.
        timer.on_tick(750, 4, false);
        timer.on_tick(850, 5, false);
        assert_eq!(timer.ticks_until_regen(), SPEC_REGEN_TICKS - 1);
    }

    #[test]
    fn energy_percent_tracks_last_reading() {
        let mut timer = RegenTimer::new();
        assert_eq!(timer.energy_percent(), None);
        timer.on_tick(745, 1, false);
        assert_eq!(timer.energy_percent(), Some(74));
        assert!(!timer.is_energy_full());
    }
}
