//! Space Shooter - A single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, world state)
//! - `renderer`: 2D canvas rendering behind a drawing-surface trait
//! - `driver`: Frame loop state machine (Idle / Running / Over)
//! - `platform`: Browser input mapping
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use driver::{DriverPhase, FrameDriver, FrameOutcome, FrameScheduler, ManualScheduler};
pub use error::{Error, Result};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Render surface dimensions (logical units)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Nominal frame rate, used by the headless runner
    pub const FPS: f64 = 60.0;

    /// Entity batch sizes created on every reset
    pub const STAR_COUNT: usize = 100;
    pub const ENEMY_COUNT: usize = 8;
    /// Upper bounds accepted from tuning data
    pub const MAX_STARS: usize = 5000;
    pub const MAX_ENEMIES: usize = 1000;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Gap between the player's bottom edge and the bottom of the screen at spawn
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Minimum time between shots (milliseconds)
    pub const SHOOT_INTERVAL_MS: f64 = 150.0;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 15.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 30.0;
    pub const ENEMY_HEIGHT: f32 = 30.0;
    /// Spawn band above the top edge: y in (SPAWN_Y_MIN, SPAWN_Y_MAX]
    pub const ENEMY_SPAWN_Y_MIN: f32 = -140.0;
    pub const ENEMY_SPAWN_Y_MAX: f32 = -40.0;

    /// Restart button (game over overlay)
    pub const RESTART_BUTTON_X: f32 = SCREEN_WIDTH / 2.0 - 100.0;
    pub const RESTART_BUTTON_Y: f32 = SCREEN_HEIGHT / 2.0 + 50.0;
    pub const RESTART_BUTTON_WIDTH: f32 = 200.0;
    pub const RESTART_BUTTON_HEIGHT: f32 = 40.0;
}

/// CSS color strings used by the renderer
pub mod colors {
    pub const WHITE: &str = "rgb(255, 255, 255)";
    pub const BLACK: &str = "rgb(0, 0, 0)";
    pub const RED: &str = "rgb(255, 0, 0)";
    pub const GREEN: &str = "rgb(0, 255, 0)";
    pub const LIGHT_BLUE: &str = "rgb(100, 100, 255)";
}
