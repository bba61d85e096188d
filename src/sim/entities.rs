//! Game entities
//!
//! Every entity owns its rectangle and velocity and advances itself by a
//! fixed amount per tick. Removal from the world's collections is decided
//! by the simulation step, never by the entity.

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use super::tick::{Control, InputState};
use crate::consts::*;

/// Screen bounds as a vector, for clamping
pub const SCREEN: Vec2 = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);

/// A background star. Purely decorative, never collides.
#[derive(Debug, Clone)]
pub struct Star {
    pub rect: Rect,
    /// Gray level 150..=254
    pub brightness: u8,
    /// CSS color derived from brightness
    pub color: String,
    /// Fall speed per tick
    pub speed: f32,
}

impl Star {
    /// Create a star at a random position anywhere on screen
    pub fn new(rng: &mut impl Rng) -> Self {
        let size = rng.random_range(1..=3) as f32;
        let brightness: u8 = rng.random_range(150..=254);
        let x = rng.random_range(0.0..SCREEN_WIDTH);
        let y = rng.random_range(0.0..SCREEN_HEIGHT);
        Self {
            rect: Rect::new(x, y, size, size),
            brightness,
            color: format!("rgb({brightness}, {brightness}, {brightness})"),
            speed: rng.random_range(1..=2) as f32,
        }
    }

    /// Fall by `speed`; wrap to the top at a new random column once past the bottom
    pub fn update(&mut self, rng: &mut impl Rng) {
        self.rect.pos.y += self.speed;
        if self.rect.pos.y > SCREEN_HEIGHT {
            self.rect.pos.y = 0.0;
            self.rect.pos.x = rng.random_range(0.0..SCREEN_WIDTH);
        }
    }
}

/// A player bullet travelling straight up
#[derive(Debug, Clone)]
pub struct Bullet {
    pub rect: Rect,
    /// Upward speed per tick (positive)
    pub speed: f32,
}

impl Bullet {
    /// Create a bullet whose horizontal center is `center_x` and whose top edge is `top`
    pub fn new(center_x: f32, top: f32, speed: f32) -> Self {
        Self {
            rect: Rect::new(center_x - BULLET_WIDTH / 2.0, top, BULLET_WIDTH, BULLET_HEIGHT),
            speed,
        }
    }

    pub fn update(&mut self) {
        self.rect.pos.y -= self.speed;
    }

    /// True once the bullet is entirely above the top edge
    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() < 0.0
    }

    pub fn collides_with(&self, enemy: &Enemy) -> bool {
        self.rect.intersects(&enemy.rect)
    }
}

/// A descending enemy ship
#[derive(Debug, Clone)]
pub struct Enemy {
    pub rect: Rect,
    /// Per-tick velocity. y is always positive (1..=4), x is in -2..=1.
    pub vel: Vec2,
}

impl Enemy {
    /// Create a fresh enemy above the top edge
    pub fn spawn(rng: &mut impl Rng) -> Self {
        let mut enemy = Self {
            rect: Rect::new(0.0, 0.0, ENEMY_WIDTH, ENEMY_HEIGHT),
            vel: Vec2::ZERO,
        };
        enemy.respawn(rng);
        enemy
    }

    /// Reinitialize in place with spawn-equivalent position and velocity
    pub fn respawn(&mut self, rng: &mut impl Rng) {
        self.rect.pos.x = rng.random_range(0.0..SCREEN_WIDTH - ENEMY_WIDTH);
        // (-140, -40]
        self.rect.pos.y = -rng.random_range(-ENEMY_SPAWN_Y_MAX..-ENEMY_SPAWN_Y_MIN);
        self.vel.y = rng.random_range(1..=4) as f32;
        self.vel.x = rng.random_range(-2..=1) as f32;
    }

    /// Left the screen through the bottom, left or right side.
    /// The top is excluded since enemies spawn above it.
    pub fn is_off_screen(&self) -> bool {
        self.rect.top() > SCREEN_HEIGHT
            || self.rect.left() < -self.rect.size.x
            || self.rect.left() > SCREEN_WIDTH
    }

    /// Advance by velocity, respawning when off screen.
    /// Returns true if the enemy respawned this tick.
    pub fn update(&mut self, rng: &mut impl Rng) -> bool {
        self.rect.pos += self.vel;
        if self.is_off_screen() {
            self.respawn(rng);
            return true;
        }
        false
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    /// Movement per tick while a direction is held
    pub speed: f32,
    /// Minimum time between shots (milliseconds)
    pub shoot_interval_ms: f64,
    /// Timestamp of the last shot (milliseconds)
    pub last_shot_ms: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_SPEED, SHOOT_INTERVAL_MS)
    }
}

impl Player {
    /// Create the player centered horizontally near the bottom of the screen
    pub fn new(speed: f32, shoot_interval_ms: f64) -> Self {
        Self {
            rect: Rect::new(
                SCREEN_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                SCREEN_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            speed,
            shoot_interval_ms,
            last_shot_ms: 0.0,
        }
    }

    /// Move from held directions, clamp to the screen, and fire if the
    /// cooldown has elapsed. New bullets are appended to `bullets`.
    pub fn update(
        &mut self,
        input: &InputState,
        now_ms: f64,
        bullets: &mut Vec<Bullet>,
        bullet_speed: f32,
    ) {
        if input.is_held(Control::Left) {
            self.rect.pos.x -= self.speed;
        }
        if input.is_held(Control::Right) {
            self.rect.pos.x += self.speed;
        }
        if input.is_held(Control::Up) {
            self.rect.pos.y -= self.speed;
        }
        if input.is_held(Control::Down) {
            self.rect.pos.y += self.speed;
        }

        self.rect.clamp_within(SCREEN);

        if input.is_held(Control::Shoot) && self.can_shoot(now_ms) {
            bullets.push(self.shoot(bullet_speed));
            self.last_shot_ms = now_ms;
        }
    }

    /// Cooldown check: strictly more than the interval must have passed
    pub fn can_shoot(&self, now_ms: f64) -> bool {
        now_ms - self.last_shot_ms > self.shoot_interval_ms
    }

    /// Build a bullet centered on the top edge
    pub fn shoot(&self, bullet_speed: f32) -> Bullet {
        let center_x = self.rect.left() + self.rect.size.x / 2.0;
        Bullet::new(center_x, self.rect.top(), bullet_speed)
    }

    pub fn collides_with(&self, enemy: &Enemy) -> bool {
        self.rect.intersects(&enemy.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    fn held(controls: &[Control]) -> InputState {
        let mut input = InputState::default();
        for &c in controls {
            input.press(c);
        }
        input
    }

    #[test]
    fn test_player_spawn_position() {
        let p = Player::default();
        assert_eq!(p.rect.pos, Vec2::new(375.0, 540.0));
        assert_eq!(p.rect.size, Vec2::new(50.0, 50.0));
        assert_eq!(p.last_shot_ms, 0.0);
    }

    #[test]
    fn test_player_moves_per_held_direction() {
        let mut p = Player::default();
        let mut bullets = Vec::new();
        p.update(&held(&[Control::Left, Control::Up]), 0.0, &mut bullets, BULLET_SPEED);
        assert_eq!(p.rect.pos, Vec2::new(367.0, 532.0));

        // Opposite directions cancel
        p.update(&held(&[Control::Left, Control::Right]), 0.0, &mut bullets, BULLET_SPEED);
        assert_eq!(p.rect.pos, Vec2::new(367.0, 532.0));
    }

    #[test]
    fn test_player_clamps_to_screen() {
        let mut p = Player::default();
        let mut bullets = Vec::new();
        let input = held(&[Control::Right, Control::Down]);
        for _ in 0..200 {
            p.update(&input, 0.0, &mut bullets, BULLET_SPEED);
        }
        assert_eq!(p.rect.pos, Vec2::new(750.0, 550.0));

        let input = held(&[Control::Left, Control::Up]);
        for _ in 0..200 {
            p.update(&input, 0.0, &mut bullets, BULLET_SPEED);
        }
        assert_eq!(p.rect.pos, Vec2::ZERO);
    }

    #[test]
    fn test_player_shoot_respects_cooldown() {
        let mut p = Player::default();
        let mut bullets = Vec::new();
        let input = held(&[Control::Shoot]);

        // Exactly the interval is not enough
        p.update(&input, 150.0, &mut bullets, BULLET_SPEED);
        assert!(bullets.is_empty());

        p.update(&input, 151.0, &mut bullets, BULLET_SPEED);
        assert_eq!(bullets.len(), 1);
        assert_eq!(p.last_shot_ms, 151.0);

        p.update(&input, 200.0, &mut bullets, BULLET_SPEED);
        assert_eq!(bullets.len(), 1);
    }

    #[test]
    fn test_bullet_centered_on_player_top() {
        let p = Player::default();
        let b = p.shoot(BULLET_SPEED);
        assert_eq!(b.rect.pos, Vec2::new(400.0 - 2.5, 540.0));
        assert_eq!(b.rect.size, Vec2::new(5.0, 10.0));
    }

    #[test]
    fn test_bullet_moves_up_and_leaves() {
        let mut b = Bullet::new(100.0, 12.0, BULLET_SPEED);
        b.update();
        assert_eq!(b.rect.top(), -3.0);
        // Bottom edge at 7, still visible
        assert!(!b.is_off_screen());
        b.update();
        assert!(b.is_off_screen());
    }

    #[test]
    fn test_enemy_spawn_ranges() {
        let mut rng = rng();
        for _ in 0..500 {
            let e = Enemy::spawn(&mut rng);
            assert!(e.rect.left() >= 0.0 && e.rect.left() < 770.0);
            assert!(e.rect.top() > -140.0 && e.rect.top() <= -40.0);
            assert!((1.0..=4.0).contains(&e.vel.y));
            assert!((-2.0..=1.0).contains(&e.vel.x));
            assert_eq!(e.vel.x.fract(), 0.0);
        }
    }

    #[test]
    fn test_enemy_respawns_past_bottom() {
        let mut rng = rng();
        let mut e = Enemy::spawn(&mut rng);
        e.rect.pos = Vec2::new(100.0, 599.0);
        e.vel = Vec2::new(0.0, 2.0);
        assert!(e.update(&mut rng));
        assert!(e.rect.top() < 0.0);
    }

    #[test]
    fn test_enemy_respawns_past_sides() {
        let mut rng = rng();
        let mut e = Enemy::spawn(&mut rng);
        e.rect.pos = Vec2::new(-29.0, 100.0);
        e.vel = Vec2::new(-2.0, 1.0);
        assert!(e.update(&mut rng));

        e.rect.pos = Vec2::new(799.0, 100.0);
        e.vel = Vec2::new(1.0, 1.0);
        // x = 800 is not yet past the right edge
        assert!(!e.update(&mut rng));
        assert!(e.update(&mut rng));
    }

    #[test]
    fn test_enemy_above_top_is_kept() {
        let mut rng = rng();
        let mut e = Enemy::spawn(&mut rng);
        e.rect.pos = Vec2::new(100.0, -130.0);
        e.vel = Vec2::new(0.0, 1.0);
        assert!(!e.update(&mut rng));
        assert_eq!(e.rect.top(), -129.0);
    }

    #[test]
    fn test_star_wraps_to_top() {
        let mut rng = rng();
        let mut s = Star::new(&mut rng);
        s.rect.pos.y = 599.5;
        s.speed = 1.0;
        s.update(&mut rng);
        assert_eq!(s.rect.top(), 0.0);
        assert!(s.rect.left() >= 0.0 && s.rect.left() < 800.0);
    }

    #[test]
    fn test_star_never_exceeds_bottom() {
        let mut rng = rng();
        let mut stars: Vec<Star> = (0..50).map(|_| Star::new(&mut rng)).collect();
        for _ in 0..1000 {
            for s in &mut stars {
                s.update(&mut rng);
                assert!(s.rect.top() <= SCREEN_HEIGHT);
            }
        }
    }

    #[test]
    fn test_star_color_from_brightness() {
        let mut rng = rng();
        let s = Star::new(&mut rng);
        assert!((150..=254).contains(&s.brightness));
        let b = s.brightness;
        assert_eq!(s.color, format!("rgb({b}, {b}, {b})"));
    }
}
