use chrono::{NaiveDate, NaiveDateTime};

use super::RecordingParser;
use crate::events::{ChatChannel, GameEvent, WorldPosition};

/// Session that started late in the evening, so rollover is reachable.
fn session_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(23, 50, 0)
        .unwrap()
}

fn parser() -> RecordingParser {
    RecordingParser::new(session_date())
}

fn expect_timestamp(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_milli_opt(h, m, s, ms)
        .unwrap()
}

#[test]
fn parses_tick_with_position() {
    let event = parser()
        .parse_line("[23:55:01.200] [tick] [745] [1023] [13125:3308,4448]")
        .expect("tick line should parse");

    match event {
        GameEvent::Tick {
            timestamp,
            energy,
            tick,
            position,
        } => {
            assert_eq!(timestamp, expect_timestamp(23, 55, 1, 200));
            assert_eq!(energy, 745);
            assert_eq!(tick, 1023);
            assert_eq!(
                position,
                Some(WorldPosition {
                    region: 13125,
                    x: 3308,
                    y: 4448
                })
            );
        }
        other => panic!("expected tick, got {other:?}"),
    }
}

#[test]
fn parses_tick_without_position() {
    let event = parser()
        .parse_line("[23:55:01.800] [tick] [745] [1024] [-]")
        .expect("tick line should parse");

    match event {
        GameEvent::Tick { position, .. } => assert_eq!(position, None),
        other => panic!("expected tick, got {other:?}"),
    }
}

#[test]
fn unparseable_position_drops_the_line() {
    assert!(
        parser()
            .parse_line("[23:55:01.200] [tick] [745] [1023] [13125:3308]")
            .is_none()
    );
}

#[test]
fn parses_chat_channels() {
    let cases = [
        ("game", ChatChannel::Game),
        ("spam", ChatChannel::Spam),
        ("public", ChatChannel::Other),
    ];
    for (token, expected) in cases {
        let line = format!("[23:55:02.400] [chat] [{token}] [Wave: 3]");
        match parser().parse_line(&line) {
            Some(GameEvent::Chat { channel, text, .. }) => {
                assert_eq!(channel, expected, "channel token {token:?}");
                assert_eq!(text, "Wave: 3");
            }
            other => panic!("expected chat, got {other:?}"),
        }
    }
}

#[test]
fn chat_text_is_tag_stripped() {
    match parser().parse_line("[23:55:02.400] [chat] [game] [<col=ef1020>Wave: 3</col>]") {
        Some(GameEvent::Chat { text, .. }) => assert_eq!(text, "Wave: 3"),
        other => panic!("expected chat, got {other:?}"),
    }
}

#[test]
fn parses_npc_spawn() {
    match parser().parse_line("[23:55:03.000] [npc] [8370] [Verzik Vitur]") {
        Some(GameEvent::NpcSpawned { npc_id, name, .. }) => {
            assert_eq!(npc_id, 8370);
            assert_eq!(name, "Verzik Vitur");
        }
        other => panic!("expected npc, got {other:?}"),
    }
}

#[test]
fn parses_equipment_flag() {
    match parser().parse_line("[23:55:03.600] [equip] [lightbearer=1]") {
        Some(GameEvent::EquipmentChanged { lightbearer, .. }) => assert!(lightbearer),
        other => panic!("expected equip, got {other:?}"),
    }
    match parser().parse_line("[23:55:03.600] [equip] [lightbearer=0]") {
        Some(GameEvent::EquipmentChanged { lightbearer, .. }) => assert!(!lightbearer),
        other => panic!("expected equip, got {other:?}"),
    }
    assert!(
        parser()
            .parse_line("[23:55:03.600] [equip] [lightbearer=2]")
            .is_none()
    );
}

#[test]
fn parses_theatre_status() {
    match parser().parse_line("[23:55:04.200] [status] [theatre=2]") {
        Some(GameEvent::TheatreStatus { value, .. }) => assert_eq!(value, 2),
        other => panic!("expected status, got {other:?}"),
    }
}

#[test]
fn parses_menu_option() {
    match parser().parse_line("[23:55:04.800] [menu] [Yes, let's begin.]") {
        Some(GameEvent::MenuOption { option, .. }) => assert_eq!(option, "Yes, let's begin."),
        other => panic!("expected menu, got {other:?}"),
    }
}

#[test]
fn parses_session_boundaries() {
    match parser().parse_line("[23:55:00.000] [session] [start] [PlayerName]") {
        Some(GameEvent::SessionStarted { player, .. }) => {
            assert_eq!(player.as_deref(), Some("PlayerName"));
        }
        other => panic!("expected session start, got {other:?}"),
    }
    match parser().parse_line("[23:55:00.000] [session] [start]") {
        Some(GameEvent::SessionStarted { player, .. }) => assert_eq!(player, None),
        other => panic!("expected session start, got {other:?}"),
    }
    assert!(matches!(
        parser().parse_line("[23:59:59.999] [session] [end]"),
        Some(GameEvent::SessionEnded { .. })
    ));
}

#[test]
fn timestamps_roll_past_midnight() {
    let event = parser()
        .parse_line("[00:01:00.000] [tick] [745] [2000] [-]")
        .expect("tick line should parse");

    let expected = NaiveDate::from_ymd_opt(2025, 6, 2)
        .unwrap()
        .and_hms_opt(0, 1, 0)
        .unwrap();
    assert_eq!(event.timestamp(), expected);
}

#[test]
fn trailing_carriage_return_is_harmless() {
    assert!(matches!(
        parser().parse_line("[23:55:00.000] [session] [end]\r"),
        Some(GameEvent::SessionEnded { .. })
    ));
}

#[test]
fn malformed_lines_are_skipped() {
    let lines = [
        "",
        "no brackets at all",
        "[23:55:01.200] [tick] [745]",
        "[23:55:01.200] [tick] [745] [1023] [13125:3308,4448] [extra]",
        "[invalid] [tick] [745] [1023] [-]",
        "[2x:55:01.200] [tick] [745] [1023] [-]",
        "[24:00:00.000] [tick] [745] [1023] [-]",
        "[23:55:01.200] [jump] [745]",
        "[23:55:01.200] [tick] [seven] [1023] [-]",
        "[23:55:04.200] [status] [raid=2]",
        "] [ ] [ ] [ ] [ ] [",
    ];
    for line in lines {
        assert!(parser().parse_line(line).is_none(), "{line:?}");
    }
}
