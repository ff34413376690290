//! Data-driven game balance
//!
//! The handful of top-level gameplay knobs, overridable from a JSON file.
//! Defaults match the documented balance; a missing or malformed file falls
//! back to defaults with a log line, never an error.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay knobs consulted by the simulation at run time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Maximum simultaneous enemy-owned bullets
    pub enemy_bullet_cap: usize,
    /// Fraction of a bullet's visual box used as hitbox
    pub bullet_hitbox_scale: f32,
    /// Aim jitter on boss aimed volleys, degrees either side
    pub boss_aim_jitter_deg: f32,
    /// Boss cooldown scale numerator; cooldowns never shrink below
    /// `base * floor / fire_difficulty` with the divisor floored at 1
    pub boss_cooldown_floor: f32,
    /// Score awarded per boss chip hit
    pub boss_hit_score: u64,
    /// Pickup-drop roll chance on a boss chip hit
    pub boss_hit_drop_chance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            enemy_bullet_cap: ENEMY_BULLET_CAP,
            bullet_hitbox_scale: BULLET_HITBOX_SCALE,
            boss_aim_jitter_deg: BOSS_AIM_JITTER_DEG,
            boss_cooldown_floor: BOSS_COOLDOWN_FLOOR,
            boss_hit_score: BOSS_HIT_SCORE,
            boss_hit_drop_chance: BOSS_HIT_DROP_CHANCE,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No tuning file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the current tuning as pretty JSON
    pub fn save(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
