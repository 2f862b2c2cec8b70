use std::ops::RangeInclusive;

pub const DEFAULT_DATABASE_PATH: &str = "tournaments.db";

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATABASE_PATH.to_string(),
        }
    }
}

/// Bounds enforced by the setup forms.
#[derive(Debug, Clone)]
pub struct SetupLimits {
    pub tournament_name_chars: RangeInclusive<usize>,
    pub player_name_chars: RangeInclusive<usize>,
    pub planned_players: RangeInclusive<i64>,
    pub groups: RangeInclusive<i64>,
    /// Pairing needs at least two players.
    pub min_players_to_start: usize,
    /// Scores are accepted in `0..=max_score`.
    pub max_score: i64,
}

impl Default for SetupLimits {
    fn default() -> Self {
        Self {
            tournament_name_chars: 2..=100,
            player_name_chars: 1..=64,
            planned_players: 4..=32,
            groups: 1..=16,
            min_players_to_start: 2,
            max_score: 999,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub limits: SetupLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            database: DatabaseSettings::default(),
            limits: SetupLimits::default(),
        }
    }

    /// `DATABASE_PATH` overrides the database file.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(path) = std::env::var("DATABASE_PATH") {
            config.database.path = path;
        }
        config
    }
}
