//! Event dispatch.
//!
//! [`apply_event`] is the single entry point of the tracker: every inbound
//! event runs through it in arrival order and mutates one
//! [`SessionState`]. Because all clock and tick reads come from the events
//! themselves, feeding the same stream twice produces the same state.

use std::borrow::Cow;

use chrono::NaiveDateTime;
use memchr::memchr;
use tracing::debug;

use crate::encounter::{colosseum, doom, theatre};
use crate::events::{ChatChannel, GameEvent};
use crate::game_data::{DEATH_CHARGE_RESTORE, DOOM_NPC_NAME, SURGE_POTION_RESTORE};
use crate::session::SessionState;
use crate::triggers::ChatTrigger;


/// Apply one event to the session.
pub fn apply_event(state: &mut SessionState, event: &GameEvent) {
    let now = event.timestamp();
    state.last_event_at = Some(now);

    match event {
        GameEvent::Tick {
            energy,
            tick,
            position,
            ..
        } => {
            if !state.logged_in {
                return;
            }
            state.current_tick = *tick;
            state.regen.on_tick(*energy, *tick, state.between_waves);
            if let Some(pos) = position {
                theatre::position_tick(state, *pos, now);
            }
        }
        GameEvent::Chat { channel, text, .. } => {
            if !state.logged_in || *channel == ChatChannel::Other {
                return;
            }
            let text = strip_tags(text);
            if let Some(trigger) = ChatTrigger::from_message(&text) {
                apply_chat_trigger(state, trigger, now);
            }
        }
        GameEvent::NpcSpawned { npc_id, name, .. } => {
            if name.contains(DOOM_NPC_NAME) {
                doom::boss_spawned(state, now);
            }
            theatre::npc_spawned(state, *npc_id, now);
        }
        GameEvent::EquipmentChanged { lightbearer, .. } => {
            state.regen.set_lightbearer(*lightbearer);
        }
        GameEvent::TheatreStatus { value, .. } => {
            theatre::status_changed(state, *value, now);
        }
        GameEvent::MenuOption { option, .. } => {
            theatre::menu_option(state, option, now);
        }
        GameEvent::SessionStarted { player, .. } => {
            debug!(player = player.as_deref(), "session started");
            state.logged_in = true;
            state.player = player.clone();
        }
        GameEvent::SessionEnded { .. } => {
            debug!("session ended");
            state.logged_in = false;
            state.player = None;
            state.reset();
        }
    }
}

fn apply_chat_trigger(state: &mut SessionState, trigger: ChatTrigger, now: NaiveDateTime) {
    debug!(?trigger, "chat trigger");
    match trigger {
        ChatTrigger::WaveCompleted(wave) => colosseum::wave_completed(state, wave, now),
        ChatTrigger::WaveStarted(wave) => colosseum::wave_started(state, wave, now),
        ChatTrigger::RewardsClaimable => colosseum::rewards_claimable(state, now),
        ChatTrigger::DelveCompleted => doom::delve_completed(state, now),
        ChatTrigger::TheatreRoomCompleted => theatre::room_completed(state, now),
        ChatTrigger::TheatreRunCompleted => theatre::run_completed(state, now),
        ChatTrigger::SurgePotionDrunk => {
            state
                .regen
                .note_external_restore(state.current_tick, SURGE_POTION_RESTORE);
            let paused = state.should_pause_surge();
            state.surge.start(now, paused);
        }
        ChatTrigger::DeathChargeRestore => {
            state
                .regen
                .note_external_restore(state.current_tick, DEATH_CHARGE_RESTORE);
        }
        ChatTrigger::SurgeCooldownExpired => state.surge.clear(),
    }
}

/// Strip `<col=...>`-style markup from a chat line.
///
/// Live messages arrive with color tags around the interesting parts;
/// trigger matching runs on the bare text. Borrows when there is nothing
/// to strip, which is the common case.
pub fn strip_tags(text: &str) -> Cow<'_, str> {
    if memchr(b'<', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    Cow::Owned(out)
}
