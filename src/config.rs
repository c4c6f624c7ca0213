use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use crate::point::Field;

pub const CELL_SIZE: i32 = 15;
pub const COLUMNS: i32 = 60;
pub const ROWS: i32 = 40;
pub const TICK_INTERVAL_MS: u64 = 100;
pub const INITIAL_TRAIL_LENGTH: usize = 4;
pub const GROWTH_PER_TICK: usize = 1;
pub const GROWTH_ROLL_SIDES: u32 = 50;
pub const GROWTH_SENTINEL: u32 = 25;
pub const GROWTH_AMOUNT: usize = 2;

pub const MIN_FIELD_CELLS: i32 = 10;
const TICK_RANGE_MS: std::ops::RangeInclusive<u64> = 10..=2000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
    #[error("cell size must be positive, got {0}")]
    CellSize(i32),
    #[error("field must be at least {min}x{min} cells, got {columns}x{rows}")]
    FieldTooSmall { columns: i32, rows: i32, min: i32 },
    #[error("tick interval must be between {min} and {max} ms, got {actual}")]
    TickInterval { actual: u64, min: u64, max: u64 },
    #[error("growth sentinel {sentinel} can never be rolled on a {sides}-sided roll")]
    GrowthSentinel { sentinel: u32, sides: u32 },
    #[error("{columns}x{rows} cells of size {cell_size} do not fit in pixel coordinates")]
    FieldOverflow { cell_size: i32, columns: i32, rows: i32 },
    #[error("terminal of {width}x{height} cannot hold a {min}x{min} field")]
    TerminalTooSmall { width: u16, height: u16, min: i32 },
    #[error("initial trail length must be between 1 and {max}, got {length}")]
    TrailLength { length: usize, max: usize },
    #[error("key '{0}' is bound more than once")]
    DuplicateKey(char),
}

/// Four keys steering one player's trail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct ControlScheme {
    pub left: char,
    pub right: char,
    pub up: char,
    pub down: char,
}

impl ControlScheme {
    pub const PLAYER_ONE: ControlScheme = ControlScheme { left: 'a', right: 'd', up: 'w', down: 's' };
    pub const PLAYER_TWO: ControlScheme = ControlScheme { left: 'j', right: 'l', up: 'i', down: 'k' };

    pub fn keys(&self) -> [char; 4] {
        [self.left, self.right, self.up, self.down]
    }

    /// Key presses arrive lowercased, so bindings are stored that way too.
    pub fn lowercased(self) -> Self {
        ControlScheme {
            left: self.left.to_ascii_lowercase(),
            right: self.right.to_ascii_lowercase(),
            up: self.up.to_ascii_lowercase(),
            down: self.down.to_ascii_lowercase(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cell_size: i32,
    pub columns: i32,
    pub rows: i32,
    pub tick_interval_ms: u64,
    pub initial_trail_length: usize,
    pub growth_per_tick: usize,
    pub growth_roll_sides: u32,
    pub growth_sentinel: u32,
    pub growth_amount: usize,
    pub self_collision: bool,
    pub seed: Option<u64>,
    pub player_one: ControlScheme,
    pub player_two: ControlScheme,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            cell_size: CELL_SIZE,
            columns: COLUMNS,
            rows: ROWS,
            tick_interval_ms: TICK_INTERVAL_MS,
            initial_trail_length: INITIAL_TRAIL_LENGTH,
            growth_per_tick: GROWTH_PER_TICK,
            growth_roll_sides: GROWTH_ROLL_SIDES,
            growth_sentinel: GROWTH_SENTINEL,
            growth_amount: GROWTH_AMOUNT,
            self_collision: false,
            seed: None,
            player_one: ControlScheme::PLAYER_ONE,
            player_two: ControlScheme::PLAYER_TWO,
        }
    }
}

impl Settings {
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_yaml_ng::from_str(content)?;
        settings.player_one = settings.player_one.lowercased();
        settings.player_two = settings.player_two.lowercased();
        Ok(settings)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        if self.columns < MIN_FIELD_CELLS || self.rows < MIN_FIELD_CELLS {
            return Err(ConfigError::FieldTooSmall { columns: self.columns, rows: self.rows, min: MIN_FIELD_CELLS });
        }
        // One spare cell each way so a head stepping past the edge still fits before wrapping.
        let extent = |cells: i32| cells.checked_add(1).and_then(|n| n.checked_mul(self.cell_size));
        if extent(self.columns).is_none() || extent(self.rows).is_none() {
            return Err(ConfigError::FieldOverflow { cell_size: self.cell_size, columns: self.columns, rows: self.rows });
        }
        if !TICK_RANGE_MS.contains(&self.tick_interval_ms) {
            return Err(ConfigError::TickInterval {
                actual: self.tick_interval_ms,
                min: *TICK_RANGE_MS.start(),
                max: *TICK_RANGE_MS.end(),
            });
        }
        if self.growth_sentinel >= self.growth_roll_sides {
            return Err(ConfigError::GrowthSentinel { sentinel: self.growth_sentinel, sides: self.growth_roll_sides });
        }
        check_trail_length(self.initial_trail_length, self.columns)?;

        let mut seen = vec![];
        for key in self.player_one.keys().iter().chain(self.player_two.keys().iter()) {
            let key = key.to_ascii_lowercase();
            if seen.contains(&key) {
                return Err(ConfigError::DuplicateKey(key));
            }
            seen.push(key);
        }

        Ok(())
    }

    pub fn field(&self) -> Field {
        Field::new(self.cell_size, self.columns, self.rows)
    }
}

/// Trails start a quarter of the way in from either side, so a longer body
/// would begin off the field.
pub fn check_trail_length(length: usize, columns: i32) -> Result<(), ConfigError> {
    let max = (columns / 4).max(0) as usize;
    if length == 0 || length > max {
        return Err(ConfigError::TrailLength { length, max });
    }
    Ok(())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "lightcycle", about = "Two-player light-cycle duel in the terminal")]
pub struct Args {
    /// YAML file with game settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the bonus-growth roll
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds between ticks
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// A trail also dies when it runs into itself
    #[arg(long)]
    pub self_collision: bool,

    #[arg(long, default_value = "lightcycle.log")]
    pub log_file: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// Reads the config file if one was given, then applies the flag overrides.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_yaml_file(path)?,
            None => Settings::default(),
        };

        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(tick_ms) = self.tick_ms {
            settings.tick_interval_ms = tick_ms;
        }
        if self.self_collision {
            settings.self_collision = true;
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
        assert_eq!(Settings::default().field().max_x, 900);
    }

    #[test]
    fn yaml_overrides_only_given_keys() {
        let settings = Settings::from_yaml("cell_size: 10\nself_collision: true\nplayer_two:\n  left: h\n  right: l\n  up: k\n  down: j\n").unwrap();
        assert_eq!(settings.cell_size, 10);
        assert!(settings.self_collision);
        assert_eq!(settings.player_two.left, 'h');
        assert_eq!(settings.rows, ROWS);
        assert_eq!(settings.player_one, ControlScheme::PLAYER_ONE);
    }

    #[test]
    fn malformed_yaml_is_reported() {
        assert!(matches!(Settings::from_yaml("cell_size: [1, 2"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.cell_size = 0;
        assert!(matches!(settings.validate(), Err(ConfigError::CellSize(0))));

        let mut settings = Settings::default();
        settings.rows = 5;
        assert!(matches!(settings.validate(), Err(ConfigError::FieldTooSmall { .. })));

        let mut settings = Settings::default();
        settings.tick_interval_ms = 5;
        assert!(matches!(settings.validate(), Err(ConfigError::TickInterval { .. })));

        let mut settings = Settings::default();
        settings.growth_sentinel = 50;
        assert!(matches!(settings.validate(), Err(ConfigError::GrowthSentinel { .. })));
    }

    #[test]
    fn validate_rejects_shared_keys() {
        let mut settings = Settings::default();
        settings.player_two.down = 'w';
        assert!(matches!(settings.validate(), Err(ConfigError::DuplicateKey('w'))));
    }

    #[test]
    fn validate_rejects_overflowing_field() {
        let mut settings = Settings::default();
        settings.cell_size = 100_000_000;
        assert!(matches!(settings.validate(), Err(ConfigError::FieldOverflow { .. })));

        let mut settings = Settings::default();
        settings.columns = i32::MAX;
        assert!(matches!(settings.validate(), Err(ConfigError::FieldOverflow { .. })));
    }

    #[test]
    fn validate_bounds_trail_length_by_field_width() {
        let mut settings = Settings::default();
        settings.initial_trail_length = 0;
        assert!(matches!(settings.validate(), Err(ConfigError::TrailLength { length: 0, .. })));

        settings.initial_trail_length = 15;
        assert!(settings.validate().is_ok());

        settings.initial_trail_length = 16;
        assert!(matches!(settings.validate(), Err(ConfigError::TrailLength { length: 16, max: 15 })));

        settings.initial_trail_length = usize::MAX;
        assert!(matches!(settings.validate(), Err(ConfigError::TrailLength { .. })));
    }

    #[test]
    fn uppercase_bindings_are_lowercased_on_load() {
        let settings = Settings::from_yaml("player_one: {left: A, right: D, up: W, down: S}\n").unwrap();
        assert_eq!(settings.player_one, ControlScheme::PLAYER_ONE);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn shared_keys_are_caught_regardless_of_case() {
        let mut settings = Settings::default();
        settings.player_two.down = 'W';
        assert!(matches!(settings.validate(), Err(ConfigError::DuplicateKey('w'))));
    }

    #[test]
    fn flags_override_settings() {
        let args = Args::parse_from(vec!["lightcycle", "--seed", "7", "--tick-ms", "50", "--self-collision"]);
        let settings = args.settings().unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tick_interval_ms, 50);
        assert!(settings.self_collision);
        assert_eq!(args.log_level, LogLevel::Info);
    }
}
