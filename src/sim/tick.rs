//! Per-frame simulation step
//!
//! Motion is a fixed amount per tick. The elapsed time is accepted for
//! bookkeeping but never scales displacement, so the game runs faster on
//! high refresh rate displays, matching the classic arcade behaviour.

use super::collision::{CollisionOutcome, resolve_collisions};
use super::state::World;

/// Logical controls the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    Shoot,
    Restart,
}

impl Control {
    #[cfg(test)]
    pub const ALL: [Control; 6] = [
        Control::Left,
        Control::Right,
        Control::Up,
        Control::Down,
        Control::Shoot,
        Control::Restart,
    ];

    fn index(self) -> usize {
        match self {
            Control::Left => 0,
            Control::Right => 1,
            Control::Up => 2,
            Control::Down => 3,
            Control::Shoot => 4,
            Control::Restart => 5,
        }
    }
}

/// Pressed/released state per control.
/// Mutated only by input handlers, read by the simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; 6],
}

impl InputState {
    pub fn press(&mut self, control: Control) {
        self.held[control.index()] = true;
    }

    pub fn release(&mut self, control: Control) {
        self.held[control.index()] = false;
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    /// Release everything (window lost focus)
    pub fn clear(&mut self) {
        self.held = [false; 6];
    }
}

/// Timing for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Frame callback timestamp (milliseconds); drives the shoot cooldown
    pub now_ms: f64,
    /// Time since the previous frame (milliseconds)
    pub elapsed_ms: f64,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Enemies that drifted off screen and were recycled
    pub respawns: u32,
    pub collisions: CollisionOutcome,
}

/// Advance the world by one tick
pub fn step(world: &mut World, input: &InputState, time: FrameTime) -> TickEvents {
    // Frozen once the game is over
    if !world.is_running() {
        return TickEvents::default();
    }

    log::trace!("tick: now={:.1}ms elapsed={:.1}ms", time.now_ms, time.elapsed_ms);

    let bullet_speed = world.tuning.bullet_speed;
    world
        .player
        .update(input, time.now_ms, &mut world.bullets, bullet_speed);
    debug_assert!(world.player.rect.left() >= 0.0 && world.player.rect.top() >= 0.0);

    for star in &mut world.stars {
        star.update(&mut world.rng);
    }

    for bullet in &mut world.bullets {
        bullet.update();
    }
    world.bullets.retain(|b| !b.is_off_screen());

    let mut respawns = 0;
    for enemy in &mut world.enemies {
        if enemy.update(&mut world.rng) {
            respawns += 1;
        }
    }

    let collisions = resolve_collisions(world);
    if respawns > 0 || collisions.kills > 0 {
        log::trace!("tick: {} kill(s), {} respawn(s)", collisions.kills, respawns);
    }

    TickEvents {
        respawns,
        collisions,
    }
}
