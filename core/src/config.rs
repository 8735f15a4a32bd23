//! Application configuration
//!
//! Persisted with confy under the `specwatch` app name. Display formats
//! apply at render time only; the timers themselves always run in ticks
//! and durations.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game_data::{GAME_TICK_MILLIS, GAME_TICK_SECS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}

#[derive(Debug, Error)]
#[error("unknown display format {0:?}, expected ticks, seconds, or decimals")]
pub struct ParseDisplayFormatError(String);

/// How a timer value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    #[default]
    Ticks,
    Seconds,
    Decimals,
}

impl DisplayFormat {
    /// Render a regen countdown given in game ticks.
    pub fn render_regen(&self, ticks: i32) -> String {
        match self {
            // Whole seconds round up so the reader knows when the pulse lands.
            Self::Seconds => ((ticks as f64 * GAME_TICK_SECS).ceil() as i64).to_string(),
            Self::Decimals => format!("{:.1}s", ticks as f64 * GAME_TICK_SECS),
            Self::Ticks => ticks.to_string(),
        }
    }

    /// Render a surge cooldown remainder.
    pub fn render_surge(&self, remaining: Duration) -> String {
        let total_millis = remaining.as_millis() as i64;
        match self {
            Self::Seconds => {
                let total_seconds = total_millis / 1000;
                format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
            }
            Self::Decimals => {
                let total_seconds = total_millis as f64 / 1000.0;
                let minutes = (total_seconds / 60.0) as i64;
                let seconds = total_seconds % 60.0;
                format!("{}:{:04.1}", minutes, seconds)
            }
            Self::Ticks => (total_millis / GAME_TICK_MILLIS).to_string(),
        }
    }
}

impl std::fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ticks => "ticks",
            Self::Seconds => "seconds",
            Self::Decimals => "decimals",
        };
        f.write_str(name)
    }
}

impl FromStr for DisplayFormat {
    type Err = ParseDisplayFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ticks" => Ok(Self::Ticks),
            "seconds" => Ok(Self::Seconds),
            "decimals" => Ok(Self::Decimals),
            other => Err(ParseDisplayFormatError(other.to_string())),
        }
    }
}

fn default_recording_directory() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("specwatch").join("recordings"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_default()
}

fn default_surge_format() -> DisplayFormat {
    DisplayFormat::Seconds
}

fn default_announce() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub recording_directory: String,
    #[serde(default)]
    pub regen_format: DisplayFormat,
    #[serde(default = "default_surge_format")]
    pub surge_format: DisplayFormat,
    /// Print phase transitions (waves, rooms, cooldown expiry) while tailing.
    #[serde(default = "default_announce")]
    pub announce_transitions: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recording_directory: default_recording_directory(),
            regen_format: DisplayFormat::default(),
            surge_format: default_surge_format(),
            announce_transitions: true,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        confy::load("specwatch", "config").unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store("specwatch", "config", self).map_err(ConfigError::Save)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regen_renders_in_all_formats() {
        assert_eq!(DisplayFormat::Ticks.render_regen(49), "49");
        assert_eq!(DisplayFormat::Ticks.render_regen(0), "0");
        // 49 ticks = 29.4s, whole seconds round up.
        assert_eq!(DisplayFormat::Seconds.render_regen(49), "30");
        assert_eq!(DisplayFormat::Seconds.render_regen(0), "0");
        assert_eq!(DisplayFormat::Decimals.render_regen(49), "29.4s");
    }

    #[test]
    fn surge_renders_in_all_formats() {
        let remaining = Duration::from_secs(270);
        assert_eq!(DisplayFormat::Ticks.render_surge(remaining), "450");
        assert_eq!(DisplayFormat::Seconds.render_surge(remaining), "4:30");
        assert_eq!(DisplayFormat::Decimals.render_surge(remaining), "4:30.0");

        let short = Duration::from_millis(9400);
        assert_eq!(DisplayFormat::Seconds.render_surge(short), "0:09");
        assert_eq!(DisplayFormat::Decimals.render_surge(short), "0:09.4");
        assert_eq!(DisplayFormat::Ticks.render_surge(Duration::ZERO), "0");
    }

    #[test]
    fn format_names_round_trip() {
        for format in [
            DisplayFormat::Ticks,
            DisplayFormat::Seconds,
            DisplayFormat::Decimals,
        ] {
            assert_eq!(format.to_string().parse::<DisplayFormat>().unwrap(), format);
        }
        assert!("minutes".parse::<DisplayFormat>().is_err());
    }

    #[test]
    fn defaults_favor_ticks_for_regen_and_clock_for_surge() {
        let config = AppConfig::default();
        assert_eq!(config.regen_format, DisplayFormat::Ticks);
        assert_eq!(config.surge_format, DisplayFormat::Seconds);
        assert!(config.announce_transitions);
    }
}
