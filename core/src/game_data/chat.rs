//! Chat messages the tracker keys off.
//!
//! Wording is load-bearing: some messages are compared by equality, the rest
//! by prefix or substring. Matching logic lives in `triggers`.

/// Chest message once a Colosseum run is over (rewards claimable).
pub const CLAIM_REWARDS_MESSAGE: &str = "Search the chest nearby";

/// Exact message for drinking a surge potion dose.
pub const SURGE_POTION_MESSAGE: &str = "You drink some of your surge potion.";

/// Exact message when the surge potion cooldown wears off.
pub const SURGE_COOLDOWN_EXPIRED_MESSAGE: &str =
    "You now feel capable of drinking another dose of surge potion.";

/// Substring of the Death Charge proc message.
pub const DEATH_CHARGE_MESSAGE: &str = "Some of your special attack energy has been restored";

/// Substring of Doom of Mokhaiotl boss names; any spawn containing it marks
/// the start of the next delve.
pub const DOOM_NPC_NAME: &str = "Doom";

/// Prefix of the Theatre of Blood run-completion message.
pub const THEATRE_COMPLETION_PREFIX: &str = "Theatre of Blood total completion time:";

/// Colosseum waves run 1 through 12.
pub const MAX_COLOSSEUM_WAVE: u32 = 12;
