//! Chat-line matching.
//!
//! The game announces phase changes and restores through chat, so most of
//! the tracker's state machine is driven from here. Matching runs on
//! tag-stripped text and in a fixed priority order, wave traffic first.

use crate::game_data::{
    CLAIM_REWARDS_MESSAGE, DEATH_CHARGE_MESSAGE, MAX_COLOSSEUM_WAVE, SURGE_COOLDOWN_EXPIRED_MESSAGE,
    SURGE_POTION_MESSAGE, THEATRE_COMPLETION_PREFIX,
};

/// A chat line the tracker reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTrigger {
    /// Colosseum wave cleared; the lull before the next wave begins.
    WaveCompleted(u32),
    /// Next Colosseum wave announced; combat is live again.
    WaveStarted(u32),
    /// Reward chest is up; the Colosseum run is over.
    RewardsClaimable,
    /// Doom of Mokhaiotl delve level cleared.
    DelveCompleted,
    /// Theatre of Blood room cleared.
    TheatreRoomCompleted,
    /// Theatre of Blood run finished.
    TheatreRunCompleted,
    /// Surge potion sipped; restores energy and starts the shared cooldown.
    SurgePotionDrunk,
    /// Death Charge proc restored spec energy.
    DeathChargeRestore,
    /// Surge potion cooldown has worn off.
    SurgeCooldownExpired,
}

impl ChatTrigger {
    /// Match a tag-stripped chat line against the known announcements.
    pub fn from_message(text: &str) -> Option<Self> {
        if let Some(wave) = wave_completed_number(text) {
            return Some(Self::WaveCompleted(wave));
        }
        if let Some(wave) = wave_started_number(text) {
            return Some(Self::WaveStarted(wave));
        }
        if text.contains(CLAIM_REWARDS_MESSAGE) {
            return Some(Self::RewardsClaimable);
        }
        if is_delve_completed(text) {
            return Some(Self::DelveCompleted);
        }
        if is_theatre_room_completed(text) {
            return Some(Self::TheatreRoomCompleted);
        }
        if text.starts_with(THEATRE_COMPLETION_PREFIX) {
            return Some(Self::TheatreRunCompleted);
        }
        if text == SURGE_POTION_MESSAGE {
            return Some(Self::SurgePotionDrunk);
        }
        if text.contains(DEATH_CHARGE_MESSAGE) {
            return Some(Self::DeathChargeRestore);
        }
        if text == SURGE_COOLDOWN_EXPIRED_MESSAGE {
            return Some(Self::SurgeCooldownExpired);
        }
        None
    }
}

/// Parse a bare Colosseum wave number: one or two digits, no leading zero,
/// within the arena's wave range.
fn parse_wave_number(digits: &str) -> Option<u32> {
    if digits.is_empty()
        || digits.len() > 2
        || digits.starts_with('0')
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let wave = digits.parse().ok()?;
    (1..=MAX_COLOSSEUM_WAVE).contains(&wave).then_some(wave)
}

/// `Wave <n> completed!` with optional duration text after it.
fn wave_completed_number(text: &str) -> Option<u32> {
    let rest = text.strip_prefix("Wave ")?;
    let marker = rest.find(" completed!")?;
    parse_wave_number(&rest[..marker])
}

/// `Wave: <n>` exactly, nothing trailing.
fn wave_started_number(text: &str) -> Option<u32> {
    parse_wave_number(text.strip_prefix("Wave: ")?)
}

/// `Delve level: <n> duration:` with any tail.
fn is_delve_completed(text: &str) -> bool {
    let Some(rest) = text.strip_prefix("Delve level: ") else {
        return false;
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && rest[digits..].starts_with(" duration:")
}

/// `Wave '<room>' (<difficulty>) complete!` with any tail. The Theatre
/// reuses "wave" wording for its rooms, hence the quoted-name shape.
fn is_theatre_room_completed(text: &str) -> bool {
    let Some(rest) = text.strip_prefix("Wave '") else {
        return false;
    };
    let Some(name_end) = rest.find("' (") else {
        return false;
    };
    rest[name_end..].contains(") complete!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_completed_accepts_full_range() {
        for wave in 1..=12 {
            let text = format!("Wave {wave} completed! Wave duration: 1:23");
            assert_eq!(
                ChatTrigger::from_message(&text),
                Some(ChatTrigger::WaveCompleted(wave)),
                "wave {wave} should match"
            );
        }
    }

    #[test]
    fn wave_completed_rejects_out_of_range_numbers() {
        for text in [
            "Wave 0 completed!",
            "Wave 13 completed!",
            "Wave 01 completed!",
            "Wave 100 completed!",
            "Wave x completed!",
        ] {
            assert_eq!(ChatTrigger::from_message(text), None, "{text:?}");
        }
    }

    #[test]
    fn wave_started_requires_exact_line() {
        assert_eq!(
            ChatTrigger::from_message("Wave: 7"),
            Some(ChatTrigger::WaveStarted(7))
        );
        assert_eq!(
            ChatTrigger::from_message("Wave: 12"),
            Some(ChatTrigger::WaveStarted(12))
        );
        assert_eq!(ChatTrigger::from_message("Wave: 7 "), None);
        assert_eq!(ChatTrigger::from_message("Wave: 13"), None);
        assert_eq!(ChatTrigger::from_message("Next Wave: 7"), None);
    }

    #[test]
    fn rewards_message_matches_anywhere_in_line() {
        assert_eq!(
            ChatTrigger::from_message("Colosseum victory! Search the chest nearby."),
            Some(ChatTrigger::RewardsClaimable)
        );
    }

    #[test]
    fn wave_completion_outranks_rewards_on_one_line() {
        // Both patterns hit; the earlier matcher wins.
        assert_eq!(
            ChatTrigger::from_message("Wave 12 completed! Search the chest nearby."),
            Some(ChatTrigger::WaveCompleted(12))
        );
    }

    #[test]
    fn delve_completed_requires_level_and_duration() {
        assert_eq!(
            ChatTrigger::from_message("Delve level: 3 duration: 2:51. Total: 11:02"),
            Some(ChatTrigger::DelveCompleted)
        );
        assert_eq!(ChatTrigger::from_message("Delve level: duration: 2:51"), None);
        assert_eq!(ChatTrigger::from_message("Delve level: 3"), None);
    }

    #[test]
    fn theatre_room_completed_matches_quoted_room_name() {
        assert_eq!(
            ChatTrigger::from_message(
                "Wave 'The Maiden of Sugadinti' (Normal Mode) complete!Duration: 2:31"
            ),
            Some(ChatTrigger::TheatreRoomCompleted)
        );
        // Not mistaken for a Colosseum wave line.
        assert_eq!(ChatTrigger::from_message("Wave 'Xarpus' complete!"), None);
    }

    #[test]
    fn theatre_run_completed_is_prefix_match() {
        assert_eq!(
            ChatTrigger::from_message("Theatre of Blood total completion time: 18:45"),
            Some(ChatTrigger::TheatreRunCompleted)
        );
    }

    #[test]
    fn restore_messages_match_expected_shapes() {
        assert_eq!(
            ChatTrigger::from_message("You drink some of your surge potion."),
            Some(ChatTrigger::SurgePotionDrunk)
        );
        // Exact match only; a paraphrase must not start a cooldown.
        assert_eq!(
            ChatTrigger::from_message("You drink some of your surge potion. (3)"),
            None
        );
        assert_eq!(
            ChatTrigger::from_message(
                "Some of your special attack energy has been restored."
            ),
            Some(ChatTrigger::DeathChargeRestore)
        );
        assert_eq!(
            ChatTrigger::from_message(
                "You now feel capable of drinking another dose of surge potion."
            ),
            Some(ChatTrigger::SurgeCooldownExpired)
        );
    }
}
