//! Collision resolution
//!
//! Two passes run after every entity has moved:
//!
//! 1. Bullets vs enemies. Bullets are scanned from the last to the first and,
//!    for each bullet, enemies are scanned from the last to the first. The
//!    first hit wins, so a bullet overlapping several enemies destroys the one
//!    with the highest index. Each hit removes both entities (order-preserving)
//!    and appends a replacement enemy, keeping the enemy count constant.
//! 2. Player vs enemies, in collection order. The first overlap ends the game.

use super::state::World;

/// What happened during one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Enemies destroyed by bullets
    pub kills: u32,
    /// Index of the enemy that hit the player, if any
    pub player_hit_by: Option<usize>,
}

/// Resolve all collisions for the current tick
pub fn resolve_collisions(world: &mut World) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    let enemy_count = world.enemies.len();

    let mut i = world.bullets.len();
    while i > 0 {
        i -= 1;
        let bullet = &world.bullets[i];
        let hit = (0..world.enemies.len())
            .rev()
            .find(|&j| bullet.collides_with(&world.enemies[j]));

        if let Some(j) = hit {
            world.bullets.remove(i);
            world.enemies.remove(j);
            world.spawn_enemy();
            world.score += 1;
            outcome.kills += 1;
        }
    }
    debug_assert_eq!(world.enemies.len(), enemy_count);

    let player = &world.player;
    outcome.player_hit_by = world.enemies.iter().position(|e| player.collides_with(e));
    if outcome.player_hit_by.is_some() {
        world.end_game();
    }

    outcome
}
