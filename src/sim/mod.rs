//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick motion only
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, resolve_collisions};
pub use entities::{Bullet, Enemy, Player, Star};
pub use rect::Rect;
pub use state::{GamePhase, World};
pub use tick::{Control, FrameTime, InputState, TickEvents, step};
