//! Theatre of Blood geometry.
//!
//! The theatre is instanced; everything here is expressed in template
//! (de-instanced) region ids and coordinates. Region ids follow the layout
//! documented by the tob-qol plugin.

use phf::phf_set;

/// Template region ids for the theatre.
pub mod region {
    /// The Maiden of Sugadinti.
    pub const MAIDEN: i32 = 12613;
    /// Pestilent Bloat. Region includes the entry hallway.
    pub const BLOAT: i32 = 13125;
    /// Nylocas. Region includes the entry hallway.
    pub const NYLOCAS: i32 = 13122;
    /// Sotetseg boss room.
    pub const SOTETSEG: i32 = 13123;
    /// Sotetseg shadow maze.
    pub const SOTETSEG_MAZE: i32 = 13379;
    /// Xarpus.
    pub const XARPUS: i32 = 12612;
    /// Verzik Vitur.
    pub const VERZIK: i32 = 12611;
    /// Entrance lobby.
    pub const LOBBY: i32 = 12869;
}

/// Verzik's NPC id once her fight begins (transforms from 14796 to 8370).
pub const VERZIK_FIGHT_START_NPC_ID: i32 = 8370;

/// Template regions of the boss rooms.
pub static BOSS_ROOM_REGIONS: phf::Set<i32> = phf_set! {
    12613i32, // Maiden
    13125i32, // Bloat
    13122i32, // Nylocas
    13123i32, // Sotetseg (boss room)
    13379i32, // Sotetseg (maze)
    12612i32, // Xarpus
    12611i32, // Verzik
};

pub fn is_boss_room(region: i32) -> bool {
    BOSS_ROOM_REGIONS.contains(&region)
}

/// Rooms whose entry cannot be inferred from the region id alone: the four
/// barrier rooms plus Verzik (NPC spawn / dialogue). The remaining rooms
/// (Maiden, the Sotetseg maze) count as entered as soon as the region is
/// observed.
pub fn uses_entry_detection(region: i32) -> bool {
    matches!(
        region,
        region::BLOAT | region::NYLOCAS | region::SOTETSEG | region::XARPUS | region::VERZIK
    )
}

/// True once the given template coordinates are on or past the barrier line
/// for the room's combat area. Regions without a barrier never match.
pub fn barrier_crossed(region: i32, x: i32, y: i32) -> bool {
    match region {
        // Bloat: barrier at x = 3303, y 4446..=4449
        region::BLOAT => x <= 3303 && (4446..=4449).contains(&y),
        // Nylocas: barrier at x 3295..=3296, y = 4254
        region::NYLOCAS => (3295..=3296).contains(&x) && y == 4254,
        // Sotetseg: barrier at x 3278..=3281, y = 4308
        region::SOTETSEG => (3278..=3281).contains(&x) && y == 4308,
        // Xarpus: barrier at x 3169..=3171, y = 4380
        region::XARPUS => (3169..=3171).contains(&x) && y == 4380,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boss_rooms_cover_all_theatre_regions_but_the_lobby() {
        for r in [
            region::MAIDEN,
            region::BLOAT,
            region::NYLOCAS,
            region::SOTETSEG,
            region::SOTETSEG_MAZE,
            region::XARPUS,
            region::VERZIK,
        ] {
            assert!(is_boss_room(r), "region {r} should be a boss room");
        }
        assert!(!is_boss_room(region::LOBBY));
    }

    #[test]
    fn bloat_barrier_is_a_line_segment_not_a_point() {
        assert!(barrier_crossed(region::BLOAT, 3303, 4446));
        assert!(barrier_crossed(region::BLOAT, 3300, 4449));
        assert!(
            !barrier_crossed(region::BLOAT, 3304, 4447),
            "one tile short of the barrier"
        );
        assert!(!barrier_crossed(region::BLOAT, 3303, 4445));
        assert!(!barrier_crossed(region::BLOAT, 3303, 4450));
    }

    #[test]
    fn nylocas_barrier_requires_exact_y() {
        assert!(barrier_crossed(region::NYLOCAS, 3295, 4254));
        assert!(barrier_crossed(region::NYLOCAS, 3296, 4254));
        assert!(!barrier_crossed(region::NYLOCAS, 3294, 4254));
        assert!(!barrier_crossed(region::NYLOCAS, 3295, 4255));
    }

    #[test]
    fn barrier_coordinates_only_count_in_their_own_region() {
        // Sotetseg's line must not fire from the maze region.
        assert!(barrier_crossed(region::SOTETSEG, 3278, 4308));
        assert!(!barrier_crossed(region::SOTETSEG_MAZE, 3278, 4308));
        assert!(!barrier_crossed(region::MAIDEN, 3278, 4308));
    }

    #[test]
    fn xarpus_barrier_edges() {
        assert!(barrier_crossed(region::XARPUS, 3169, 4380));
        assert!(barrier_crossed(region::XARPUS, 3171, 4380));
        assert!(!barrier_crossed(region::XARPUS, 3172, 4380));
        assert!(!barrier_crossed(region::XARPUS, 3170, 4379));
    }
}
