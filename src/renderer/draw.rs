//! Frame composition
//!
//! Z-order is fixed: background, stars, bullets, enemies, player, HUD,
//! then the game over overlay.

use super::{Surface, TextAlign};
use crate::colors::*;
use crate::consts::*;
use crate::sim::{Rect, World};

const HUD_FONT_PX: u32 = 24;
const HUD_MARGIN: f32 = 10.0;
const HUD_BASELINE: f32 = 30.0;

fn fill(surface: &mut impl Surface, rect: &Rect, color: &str) {
    surface.fill_rect(rect.pos.x, rect.pos.y, rect.size.x, rect.size.y, color);
}

/// Draw one complete frame. `fps` is shown in the corner when present.
pub fn render(world: &World, fps: Option<u32>, surface: &mut impl Surface) {
    surface.fill_rect(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT, BLACK);

    for star in &world.stars {
        fill(surface, &star.rect, &star.color);
    }
    for bullet in &world.bullets {
        fill(surface, &bullet.rect, LIGHT_BLUE);
    }
    for enemy in &world.enemies {
        fill(surface, &enemy.rect, RED);
    }

    // The ship disappears once it has been hit
    if world.is_running() {
        fill(surface, &world.player.rect, GREEN);
    }

    draw_hud(world, surface);

    if let Some(fps) = fps {
        surface.fill_text(
            &format!("FPS: {fps}"),
            HUD_MARGIN,
            SCREEN_HEIGHT - HUD_MARGIN,
            14,
            TextAlign::Left,
            WHITE,
        );
    }

    if world.is_over() {
        draw_game_over(world, surface);
    }
}

fn draw_hud(world: &World, surface: &mut impl Surface) {
    surface.fill_text(
        &format!("Score: {}", world.score),
        HUD_MARGIN,
        HUD_BASELINE,
        HUD_FONT_PX,
        TextAlign::Left,
        WHITE,
    );
    surface.fill_text(
        &format!("High Score: {}", world.high_score),
        SCREEN_WIDTH - HUD_MARGIN,
        HUD_BASELINE,
        HUD_FONT_PX,
        TextAlign::Right,
        WHITE,
    );
}

fn draw_game_over(world: &World, surface: &mut impl Surface) {
    let cx = SCREEN_WIDTH / 2.0;
    let cy = SCREEN_HEIGHT / 2.0;

    surface.fill_text("GAME OVER", cx, cy, 72, TextAlign::Center, RED);

    surface.fill_rect(
        RESTART_BUTTON_X,
        RESTART_BUTTON_Y,
        RESTART_BUTTON_WIDTH,
        RESTART_BUTTON_HEIGHT,
        GREEN,
    );
    surface.fill_text("RESTART (R)", cx, cy + 75.0, 24, TextAlign::Center, WHITE);

    surface.fill_text(
        &format!("Final Score: {}", world.score),
        cx,
        cy - 80.0,
        36,
        TextAlign::Center,
        WHITE,
    );
}
