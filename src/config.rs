use std::env;
use std::path::PathBuf;

use crate::timer::DEFAULT_LIMIT_MINUTES;

const DEFAULT_ROSTER_PATH: &str = "./data/all_players.csv";
const DEFAULT_SUMMARY_PATH: &str = "summary.xlsx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub roster_path: PathBuf,
    pub timer_minutes: u32,
    pub summary_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from(DEFAULT_ROSTER_PATH),
            timer_minutes: DEFAULT_LIMIT_MINUTES,
            summary_path: PathBuf::from(DEFAULT_SUMMARY_PATH),
        }
    }
}

impl Settings {
    /// Load `.env.local` then `.env` (missing files are fine) and read the environment.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Settings::default();
        let roster_path = non_empty(lookup("ATHLETE_ROSTER_PATH"))
            .map(PathBuf::from)
            .unwrap_or(defaults.roster_path);
        let timer_minutes = non_empty(lookup("ATHLETE_TIMER_MINUTES"))
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(defaults.timer_minutes)
            .min(crate::timer::MAX_LIMIT_MINUTES);
        let summary_path = non_empty(lookup("ATHLETE_SUMMARY_PATH"))
            .map(PathBuf::from)
            .unwrap_or(defaults.summary_path);
        Self {
            roster_path,
            timer_minutes,
            summary_path,
        }
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let settings = Settings::from_lookup(|key| match key {
            "ATHLETE_ROSTER_PATH" => Some("   ".to_string()),
            "ATHLETE_TIMER_MINUTES" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn timer_minutes_are_capped() {
        let settings = Settings::from_lookup(|key| {
            (key == "ATHLETE_TIMER_MINUTES").then(|| "500".to_string())
        });
        assert_eq!(settings.timer_minutes, 120);
    }
}
