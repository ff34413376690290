//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Single pass per external tick, fixed update order
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies
//! - Side effects surface as [`GameEvent`]s for collaborators

pub mod boss;
pub mod bullets;
pub mod collision;
pub mod enemy;
pub mod spawn;
pub mod state;
pub mod tick;

pub use boss::{AttackPhase, Boss};
pub use bullets::{Bullet, BulletId, BulletPool};
pub use collision::{Rect, drop_for_roll};
pub use enemy::{Enemy, MovementKind};
pub use spawn::{Difficulty, next_wave};
pub use state::{
    Explosion, GameEvent, GameState, HudSnapshot, Player, PowerUp, PowerUpKind, SfxKind,
};
pub use tick::{TickInput, tick};
