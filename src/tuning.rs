//! Data-driven game balance
//!
//! Defaults reproduce the classic arcade feel. A JSON document can override
//! any subset of fields; missing fields keep their default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Stars created on every reset
    pub star_count: usize,
    /// Enemies alive at all times
    pub enemy_count: usize,
    /// Player movement per tick
    pub player_speed: f32,
    /// Bullet movement per tick
    pub bullet_speed: f32,
    /// Minimum time between shots (milliseconds)
    pub shoot_interval_ms: f64,
    /// Draw the FPS readout in the bottom-left corner
    pub show_fps: bool,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT,
            enemy_count: ENEMY_COUNT,
            player_speed: PLAYER_SPEED,
            bullet_speed: BULLET_SPEED,
            shoot_interval_ms: SHOOT_INTERVAL_MS,
            show_fps: false,
            seed: None,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<()> {
        if self.enemy_count == 0 {
            return Err(Error::InvalidTuning("enemy_count must be at least 1"));
        }
        if self.enemy_count > MAX_ENEMIES {
            return Err(Error::InvalidTuning("enemy_count exceeds MAX_ENEMIES"));
        }
        if self.star_count > MAX_STARS {
            return Err(Error::InvalidTuning("star_count exceeds MAX_STARS"));
        }
        if !(self.player_speed.is_finite() && self.player_speed > 0.0) {
            return Err(Error::InvalidTuning("player_speed must be positive"));
        }
        if !(self.bullet_speed.is_finite() && self.bullet_speed > 0.0) {
            return Err(Error::InvalidTuning("bullet_speed must be positive"));
        }
        if !(self.shoot_interval_ms.is_finite() && self.shoot_interval_ms > 0.0) {
            return Err(Error::InvalidTuning("shoot_interval_ms must be positive"));
        }
        Ok(())
    }
}
