//! Platform abstraction layer
//!
//! Maps browser input onto game controls:
//! - Keyboard `key` values to [`Control`]s
//! - Which keys must not scroll the page
//! - Pointer hit-testing against the restart button

use glam::Vec2;

use crate::consts::{
    RESTART_BUTTON_HEIGHT, RESTART_BUTTON_WIDTH, RESTART_BUTTON_X, RESTART_BUTTON_Y,
};
use crate::sim::{Control, Rect};

/// Translate a `KeyboardEvent.key` value into a control
pub fn control_for_key(key: &str) -> Option<Control> {
    match key {
        "ArrowLeft" => Some(Control::Left),
        "ArrowRight" => Some(Control::Right),
        "ArrowUp" => Some(Control::Up),
        "ArrowDown" => Some(Control::Down),
        " " => Some(Control::Shoot),
        "r" | "R" => Some(Control::Restart),
        _ => None,
    }
}

/// Keys whose default browser action (scrolling) is suppressed
pub fn prevents_default(key: &str) -> bool {
    matches!(key, "ArrowUp" | "ArrowDown" | " ")
}

/// Restart button area on the game over overlay
pub fn restart_button() -> Rect {
    Rect::new(
        RESTART_BUTTON_X,
        RESTART_BUTTON_Y,
        RESTART_BUTTON_WIDTH,
        RESTART_BUTTON_HEIGHT,
    )
}

/// Whether a point in logical screen coordinates lands on the restart button (edges included)
pub fn hits_restart_button(x: f32, y: f32) -> bool {
    restart_button().contains_point(Vec2::new(x, y))
}
