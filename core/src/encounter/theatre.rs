//! Theatre of Blood room phases.
//!
//! The theatre only freezes the surge cooldown; the regen countdown keeps
//! running between rooms. Downtime opens when a room-completion line lands
//! and closes when the next room's combat area is entered. Entry shows up
//! differently per room: Maiden and the Sotetseg maze count as entered the
//! moment their region is observed, the four barrier rooms need a barrier
//! crossing, and Verzik starts on her spawn or a dialogue confirmation.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::events::WorldPosition;
use crate::game_data::theatre::{self, region};
use crate::session::SessionState;

/// Status values reported while the player is in a theatre party that has
/// entered the raid (2) or is spectating one (3).
const STATUS_INSIDE: [i32; 2] = [2, 3];

/// Raw theatre status changed. Only edges matter; repeats are no-ops.
pub fn status_changed(state: &mut SessionState, value: i32, now: NaiveDateTime) {
    let inside = STATUS_INSIDE.contains(&value);
    if inside == state.inside_theatre {
        return;
    }
    state.inside_theatre = inside;
    if inside {
        // Entering from the lobby lands in downtime. A mid-raid login can
        // fire this while already standing in a boss room; in that case
        // combat is live and nothing should freeze.
        state.between_rooms = !state.last_region.is_some_and(theatre::is_boss_room);
    } else {
        state.between_rooms = false;
    }
    debug!(inside, between_rooms = state.between_rooms, "theatre status edge");
    state.sync_surge_pause(now);
}

/// Room cleared; downtime until the next room's combat area is entered.
///
/// The completion line is also proof of being inside the theatre, covering
/// sessions that started mid-raid and missed the status edge. The entry
/// flag is left alone here: it stays set until the next region change, so
/// the barrier of the room just cleared cannot re-fire.
pub fn room_completed(state: &mut SessionState, now: NaiveDateTime) {
    state.inside_theatre = true;
    state.between_rooms = true;
    debug!("theatre room completed");
    state.sync_surge_pause(now);
}

/// Run finished; room rules stop applying until the next raid.
pub fn run_completed(state: &mut SessionState, now: NaiveDateTime) {
    state.between_rooms = false;
    debug!("theatre run completed");
    state.sync_surge_pause(now);
}

/// Verzik's combat form spawning is the entry signal for her room.
pub fn npc_spawned(state: &mut SessionState, npc_id: i32, now: NaiveDateTime) {
    if npc_id == theatre::VERZIK_FIGHT_START_NPC_ID
        && state.between_rooms
        && !state.combat_area_entered
    {
        state.between_rooms = false;
        state.combat_area_entered = true;
        debug!("verzik spawned, room entered");
        state.sync_surge_pause(now);
    }
}

/// Dialogue confirmations that start a room without a trackable barrier
/// crossing: confirming a barrier pass, or clicking through Verzik's
/// pre-fight dialogue.
pub fn menu_option(state: &mut SessionState, option: &str, now: NaiveDateTime) {
    if !state.inside_theatre || !state.between_rooms {
        return;
    }
    let begin = option.contains("Yes, let's begin");
    let verzik_continue = option == "Continue" && state.last_region == Some(region::VERZIK);
    if begin || verzik_continue {
        state.between_rooms = false;
        debug!(option, "room started via dialogue");
        state.sync_surge_pause(now);
    }
}

/// Per-tick entry scan on the player's resolved position.
///
/// A region change re-arms the one-shot entry flag and, for rooms whose
/// region alone implies combat, ends the downtime outright. Inside barrier
/// rooms the crossing check runs every tick until the entry flag latches.
pub fn position_tick(state: &mut SessionState, position: WorldPosition, now: NaiveDateTime) {
    let region = position.region;

    if state.last_region != Some(region) {
        state.combat_area_entered = false;

        if state.between_rooms
            && theatre::is_boss_room(region)
            && !theatre::uses_entry_detection(region)
        {
            state.between_rooms = false;
            state.combat_area_entered = true;
            debug!(region, "room entered by region");
            state.sync_surge_pause(now);
        }
        state.last_region = Some(region);
    }

    if state.between_rooms
        && !state.combat_area_entered
        && theatre::barrier_crossed(region, position.x, position.y)
    {
        state.between_rooms = false;
        state.combat_area_entered = true;
        debug!(region, x = position.x, y = position.y, "barrier crossed");
        state.sync_surge_pause(now);
    }
}
