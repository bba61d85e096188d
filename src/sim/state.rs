//! World state
//!
//! The single mutable aggregate the frame driver owns. Every entity lives in
//! one of its collections; nothing is shared.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entities::{Bullet, Enemy, Player, Star};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player was hit; the world is frozen until restart
    Over,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct World {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Enemies destroyed this game
    pub score: u32,
    /// Best score this session (never decreases)
    pub high_score: u32,
    pub player: Player,
    pub stars: Vec<Star>,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Create a running world with fresh entity batches
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut world = Self {
            seed,
            player: Player::new(tuning.player_speed, tuning.shoot_interval_ms),
            tuning,
            phase: GamePhase::Running,
            score: 0,
            high_score: 0,
            stars: Vec::new(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        world.populate();
        world
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Fold the current score into the high score.
    /// Returns true if a new record was set.
    pub fn commit_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            return true;
        }
        false
    }

    /// Transition Running -> Over and record the high score
    pub fn end_game(&mut self) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::Over;
        let record = self.commit_high_score();
        log::info!(
            "Game over: score {} (high score {}{})",
            self.score,
            self.high_score,
            if record { ", new record" } else { "" }
        );
    }

    /// Start a new game. The high score survives; everything else is rebuilt.
    pub fn reset(&mut self) {
        if self.commit_high_score() {
            log::info!("New high score: {}", self.high_score);
        }
        self.score = 0;
        self.bullets.clear();
        self.enemies.clear();
        self.stars.clear();
        self.player = Player::new(self.tuning.player_speed, self.tuning.shoot_interval_ms);
        self.populate();
        self.phase = GamePhase::Running;
    }

    fn populate(&mut self) {
        let rng = &mut self.rng;
        self.stars
            .extend((0..self.tuning.star_count).map(|_| Star::new(rng)));
        self.enemies
            .extend((0..self.tuning.enemy_count).map(|_| Enemy::spawn(rng)));
    }

    /// Append a freshly constructed enemy (replacement for a destroyed one)
    pub fn spawn_enemy(&mut self) {
        let enemy = Enemy::spawn(&mut self.rng);
        self.enemies.push(enemy);
    }
}
