//! Galaxy Blitz - a wave-based arcade shoot-'em-up simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves, game state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: High score persistence
//!
//! Rendering, audio playback and input polling live outside this crate; the
//! sim consumes a [`sim::TickInput`] each tick and raises [`sim::GameEvent`]s
//! for those collaborators to consume.

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Virtual playfield size (origin bottom-left, +y up)
    pub const PLAYFIELD_W: f32 = 800.0;
    pub const PLAYFIELD_H: f32 = 480.0;

    /// Maximum simultaneous enemy-owned bullets (boss backpressure)
    pub const ENEMY_BULLET_CAP: usize = 60;
    /// Bullet hitboxes are a centered fraction of the visual rectangle
    pub const BULLET_HITBOX_SCALE: f32 = 0.60;
    /// Aim jitter on boss aimed volleys, degrees either side
    pub const BOSS_AIM_JITTER_DEG: f32 = 10.0;
    /// Boss cooldowns never shrink below this ratio of their base
    pub const BOSS_COOLDOWN_FLOOR: f32 = 1.5;

    /// Scoring
    pub const BOSS_HIT_SCORE: u64 = 10;
    pub const BOSS_KILL_SCORE: u64 = 1000;
    pub const BOSS_HIT_DROP_CHANCE: f32 = 0.20;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 36.0;
    pub const PLAYER_SPEED: f32 = 320.0;
    pub const PLAYER_COOLDOWN: f32 = 0.22;
    pub const PLAYER_RAPID_COOLDOWN: f32 = 0.07;
    pub const PLAYER_SIDE_MARGIN: f32 = 6.0;
    pub const PLAYER_SPAWN_Y: f32 = 40.0;
    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Power-up grant durations (seconds)
    pub const RAPID_DURATION: f32 = 8.0;
    pub const SPREAD_DURATION: f32 = 8.0;
    pub const SHIELD_DURATION: f32 = 10.0;

    /// Bullet kinematics
    pub const PLAYER_BULLET_SIZE: f32 = 7.0;
    pub const PLAYER_BULLET_SPEED: f32 = 420.0;
    pub const SPREAD_BULLET_VX: f32 = 120.0;
    pub const ENEMY_BULLET_SIZE: f32 = 8.0;
    pub const ENEMY_BULLET_SPEED: f32 = 260.0;
    /// Pool slots: the enemy cap plus headroom for in-flight player bullets
    pub const BULLET_POOL_CAPACITY: usize = 192;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 28.0;

    /// Boss geometry and sweep
    pub const BOSS_W: f32 = 140.0;
    pub const BOSS_H: f32 = 70.0;
    pub const BOSS_BASE_HP: f32 = 150.0;
    pub const BOSS_SWEEP_SPEED: f32 = 100.0;
    pub const BOSS_SIDE_MARGIN: f32 = 20.0;
    /// Re-check interval while the boss is held at the bullet cap
    pub const BOSS_CAP_RECHECK: f32 = 0.15;

    /// Power-up pickups
    pub const POWERUP_FALL_SPEED: f32 = 65.0;
    pub const POWERUP_HALF_SIZE: f32 = 14.0;

    /// Slow-motion after a boss kill
    pub const SLOWMO_DURATION: f32 = 1.2;
    pub const SLOWMO_SCALE: f32 = 0.25;

    /// Cosmetic timers
    pub const HIT_FLASH_DURATION: f32 = 0.12;
    pub const PLAYER_BLINK_DURATION: f32 = 1.2;
    pub const BOSS_KILL_FLASH: f32 = 0.4;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
