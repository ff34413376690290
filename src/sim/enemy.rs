//! Enemy variants and per-wave stat derivation
//!
//! Three movement variants are picked uniformly at spawn. Movement is a pure
//! function of the variant, elapsed time and the player's center, so each
//! variant can be tested in isolation.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::collision::Rect;
use super::spawn::Difficulty;

/// Movement variant, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    /// Descends while weaving on a sine
    Sine,
    /// Slower descent, gentler drift; gains a second hit point on late waves
    Shooter,
    /// Homes horizontally toward the player while descending fast
    Chaser,
}

impl MovementKind {
    /// Uniform random pick through the injected RNG
    pub fn pick(rng: &mut impl Rng) -> Self {
        match rng.random_range(0..3) {
            0 => MovementKind::Sine,
            1 => MovementKind::Shooter,
            _ => MovementKind::Chaser,
        }
    }
}

/// A hostile ship. All per-wave stats are derived once at spawn.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: MovementKind,
    pub hp: i32,
    /// Elapsed time since spawn, drives the sine weave
    t: f32,
    speed: f32,
    reload: f32,
    fire_chance: f32,
    pub score_value: u64,
    shoot_timer: f32,
    /// Cosmetic red-flash timer, no gameplay effect
    pub hit_timer: f32,
}

impl Enemy {
    /// Derive an enemy for `wave` at horizontal center `cx`, bottom edge `y`
    pub fn spawn(
        rng: &mut impl Rng,
        kind: MovementKind,
        cx: f32,
        y: f32,
        wave: u32,
        diff: &Difficulty,
    ) -> Self {
        let size = Vec2::splat(ENEMY_SIZE);
        let w = wave as f32;
        let mut reload = (1.1 - (w * 0.02).min(0.5)) / diff.enemy_fire.max(0.6);
        if kind == MovementKind::Chaser {
            reload *= 0.85;
        }
        Self {
            pos: Vec2::new(cx - size.x / 2.0, y),
            size,
            kind,
            hp: if kind == MovementKind::Shooter && wave > 6 { 2 } else { 1 },
            t: 0.0,
            speed: (45.0 + w * 3.0) * diff.enemy_speed,
            reload,
            fire_chance: (0.03 + w * 0.0015) * diff.enemy_fire,
            score_value: 20 + wave as u64 * 3,
            shoot_timer: rng.random_range(0.3..=2.0),
            hit_timer: 0.0,
        }
    }

    /// Advance timers and move one step, clamped to the playfield
    pub fn update(&mut self, player_cx: f32, dt: f32) {
        self.t += dt;
        self.shoot_timer -= dt;
        if self.hit_timer > 0.0 {
            self.hit_timer -= dt;
        }
        self.pos = self.next_position(player_cx, dt);
        self.pos.x = self.pos.x.clamp(0.0, PLAYFIELD_W - self.size.x);
    }

    /// Pure per-variant step: the position after `dt`, before clamping
    pub fn next_position(&self, player_cx: f32, dt: f32) -> Vec2 {
        let mut p = self.pos;
        match self.kind {
            MovementKind::Sine => {
                p.y -= self.speed * dt;
                p.x += (self.t * 2.4).sin() * 80.0 * dt;
            }
            MovementKind::Shooter => {
                p.y -= self.speed * 0.8 * dt;
                p.x += (self.t * 1.6).sin() * 50.0 * dt;
            }
            MovementKind::Chaser => {
                let delta = player_cx - (p.x + self.size.x / 2.0);
                p.x += delta.signum() * (self.speed * 1.3) * dt;
                p.y -= self.speed * 1.1 * dt;
            }
        }
        p
    }

    pub fn ready_to_shoot(&self) -> bool {
        self.shoot_timer <= 0.0
    }

    pub fn reset_shoot_timer(&mut self) {
        self.shoot_timer = self.reload;
    }

    /// Per-tick probability that a ready enemy actually fires
    pub fn fire_chance(&self) -> f32 {
        self.fire_chance
    }

    pub fn damage(&mut self, d: i32) {
        self.hp -= d;
        self.hit_timer = HIT_FLASH_DURATION;
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}
