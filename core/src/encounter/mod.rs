//! Encounter-phase state machines.
//!
//! Three venues gate the timers: the Fortis Colosseum and Doom of
//! Mokhaiotl share the wave-downtime flag, while the Theatre of Blood
//! tracks room downtime with its own entry detection. Handlers mutate
//! [`SessionState`](crate::session::SessionState) directly and re-sync the
//! surge pause after every phase change.

pub mod colosseum;
pub mod doom;
pub mod theatre;
