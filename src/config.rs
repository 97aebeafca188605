//! Runtime game configuration.
//!
//! [`GameConfig`] mirrors every tunable in [`crate::constants`].  Without a
//! config file the game runs on the compile-time defaults; with `--config`
//! the given TOML overrides any subset of keys and the rest fall back to the
//! defaults.  Example:
//!
//! ```toml
//! alien_rows = 3
//! bomb_probability = 0.01
//! starting_lives = 5
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::*;
use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Window ───────────────────────────────────────────────────────────────
    pub window_width: i32,
    pub window_height: i32,

    // ── Formation ────────────────────────────────────────────────────────────
    pub alien_rows: usize,
    pub alien_cols: usize,
    pub alien_start_x: i32,
    pub alien_start_y: i32,
    pub alien_size: i32,
    pub alien_col_gap: i32,
    pub alien_row_spacing: i32,
    pub alien_step: i32,
    pub alien_descent: i32,

    // ── Projectiles ──────────────────────────────────────────────────────────
    pub bomb_probability: f64,
    pub bomb_speed: i32,
    pub beam_speed: i32,

    // ── Cannon ───────────────────────────────────────────────────────────────
    pub cannon_speed: i32,
    pub cannon_vertical_speed: i32,
    pub cannon_start_x: i32,
    pub cannon_home_y: i32,
    pub cannon_min_y: i32,

    // ── Barriers ─────────────────────────────────────────────────────────────
    pub barrier_y: i32,
    pub barrier_count: usize,
    pub barrier_hit_points: u8,

    // ── Rules ────────────────────────────────────────────────────────────────
    pub starting_lives: u32,
    pub max_high_scores: usize,
    pub frame_millis: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            alien_rows: ALIEN_ROWS,
            alien_cols: ALIEN_COLS,
            alien_start_x: ALIEN_START_X,
            alien_start_y: ALIEN_START_Y,
            alien_size: ALIEN_SIZE,
            alien_col_gap: ALIEN_COL_GAP,
            alien_row_spacing: ALIEN_ROW_SPACING,
            alien_step: ALIEN_STEP,
            alien_descent: ALIEN_DESCENT,
            bomb_probability: BOMB_PROBABILITY,
            bomb_speed: BOMB_SPEED,
            beam_speed: BEAM_SPEED,
            cannon_speed: CANNON_SPEED,
            cannon_vertical_speed: CANNON_VERTICAL_SPEED,
            cannon_start_x: CANNON_START_X,
            cannon_home_y: CANNON_HOME_Y,
            cannon_min_y: CANNON_MIN_Y,
            barrier_y: BARRIER_Y,
            barrier_count: BARRIER_COUNT,
            barrier_hit_points: BARRIER_HIT_POINTS,
            starting_lives: STARTING_LIVES,
            max_high_scores: MAX_HIGH_SCORES,
            frame_millis: FRAME_MILLIS,
        }
    }
}

impl GameConfig {
    /// Read a TOML file, fill missing keys from the defaults, and validate.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        fn check(ok: bool, name: &'static str, expected: &'static str) -> ConfigResult<()> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::OutOfRange { name, expected })
            }
        }

        check(self.window_width > 0, "window_width", "> 0")?;
        check(self.window_height > 0, "window_height", "> 0")?;
        check(self.alien_rows > 0, "alien_rows", "> 0")?;
        check(self.alien_cols > 0, "alien_cols", "> 0")?;
        check(self.alien_size > 0, "alien_size", "> 0")?;
        check(self.alien_step > 0, "alien_step", "> 0")?;
        check(self.alien_descent >= 0, "alien_descent", ">= 0")?;
        check(
            (0.0..=1.0).contains(&self.bomb_probability),
            "bomb_probability",
            "within [0.0, 1.0]",
        )?;
        check(self.bomb_speed > 0, "bomb_speed", "> 0")?;
        check(self.beam_speed > 0, "beam_speed", "> 0")?;
        check(self.cannon_speed > 0, "cannon_speed", "> 0")?;
        check(
            self.cannon_min_y < self.window_height - INVASION_MARGIN,
            "cannon_min_y",
            "below window_height - 50",
        )?;
        check(self.barrier_hit_points > 0, "barrier_hit_points", "> 0")?;
        check(
            (1..=MAX_STARTING_LIVES).contains(&self.starting_lives),
            "starting_lives",
            "within [1, 9]",
        )?;
        check(self.max_high_scores > 0, "max_high_scores", "> 0")?;
        check(self.frame_millis > 0, "frame_millis", "> 0")?;
        Ok(())
    }

    /// Lowest Y the cannon may be nudged down to.
    pub fn cannon_max_y(&self) -> i32 {
        self.window_height - INVASION_MARGIN
    }
}
