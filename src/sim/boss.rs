//! Boss behavior: horizontal sweep plus a phase-driven attack machine
//!
//! The attack phase is a function of remaining hit-point percentage, not
//! elapsed time. Each phase prefers one bullet pattern and falls back to
//! cheaper ones when the boss level has not unlocked it yet. Every single
//! bullet emission re-checks the global enemy-bullet cap and stops early
//! rather than overshooting it.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::lerp;

use super::collision::Rect;
use super::spawn::Difficulty;
use super::state::GameState;

/// Attack phase, selected from the remaining HP fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPhase {
    /// Above 66%: aimed volleys at the player
    Opening,
    /// 33-66%: evenly spread fans
    Midgame,
    /// Below 33%: rotating spirals
    Desperate,
}

impl AttackPhase {
    pub fn for_hp_pct(pct: f32) -> Self {
        if pct > 0.66 {
            AttackPhase::Opening
        } else if pct > 0.33 {
            AttackPhase::Midgame
        } else {
            AttackPhase::Desperate
        }
    }
}

/// A boss encounter. Exactly one exists during a boss wave.
#[derive(Debug, Clone)]
pub struct Boss {
    pub pos: Vec2,
    pub size: Vec2,
    /// 1-based; increases once per defeat
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    /// Horizontal sweep direction, +1 or -1
    dir: f32,
    /// Elapsed time, drives the spiral rotation
    t: f32,
    fire_timer: f32,
    /// Cosmetic red-flash timer
    pub hit_timer: f32,
    /// Fire-difficulty scalar captured at spawn
    boss_fire: f32,
}

impl Boss {
    pub fn spawn(level: u32, diff: &Difficulty) -> Self {
        let hp = ((BOSS_BASE_HP / 2.0) * diff.boss_hp).round().max(1.0) as i32;
        Self {
            pos: Vec2::new(PLAYFIELD_W / 2.0 - 60.0, PLAYFIELD_H - 120.0),
            size: Vec2::new(BOSS_W, BOSS_H),
            level,
            hp,
            max_hp: hp,
            dir: 1.0,
            t: 0.0,
            fire_timer: 0.0,
            hit_timer: 0.0,
            boss_fire: diff.boss_fire,
        }
    }

    /// Patterns unlocked at this level: aimed+fan at level 1, spiral from 2
    pub fn pattern_slots(&self) -> u32 {
        (2 + (self.level - 1)).min(3)
    }

    /// One boss step: sweep, then fire unless held at the bullet cap
    pub fn update(&mut self, world: &mut GameState, dt: f32) {
        self.t += dt;
        if self.hit_timer > 0.0 {
            self.hit_timer -= dt;
        }

        // Sweep is independent of firing
        self.pos.x += self.dir * BOSS_SWEEP_SPEED * dt;
        if self.pos.x < BOSS_SIDE_MARGIN || self.pos.x + self.size.x > PLAYFIELD_W - BOSS_SIDE_MARGIN
        {
            self.dir = -self.dir;
        }

        // While at the cap: no pattern selection, just decay toward a
        // short re-check interval.
        if world.enemy_bullet_cap_reached() {
            self.fire_timer = self.fire_timer.max(BOSS_CAP_RECHECK);
            self.fire_timer -= dt;
            return;
        }

        let slots = self.pattern_slots();
        let allow_aimed = slots >= 1;
        let allow_fan = slots >= 2;
        let allow_spiral = slots >= 3;

        // Projectile counts; the first boss stays gentle
        let early = if self.level == 1 { 2 } else { (2 + self.level).min(6) };
        let mid = if self.level == 1 { 5 } else { (5 + self.level - 1).min(10) };
        let late = if self.level == 1 { 5 } else { (6 + self.level - 1).min(12) };

        let interval_scale = world.tuning.boss_cooldown_floor / self.boss_fire.max(1.0);
        let hp_pct = self.hp as f32 / self.max_hp as f32;

        self.fire_timer -= dt;
        if self.fire_timer <= 0.0 {
            match AttackPhase::for_hp_pct(hp_pct) {
                AttackPhase::Opening => {
                    if allow_aimed {
                        self.aimed_volley(world, early, 140.0);
                    } else if allow_fan {
                        self.fan(world, -45.0, 45.0, early, 160.0);
                    }
                    self.fire_timer = 1.4 * interval_scale;
                }
                AttackPhase::Midgame => {
                    if allow_fan {
                        self.fan(world, -45.0, 45.0, mid, 180.0);
                    } else if allow_aimed {
                        self.aimed_volley(world, (mid / 2).max(2), 150.0);
                    }
                    self.fire_timer = 1.2 * interval_scale;
                }
                AttackPhase::Desperate => {
                    if allow_spiral {
                        self.spiral(world, late, 160.0);
                    } else if allow_fan {
                        self.fan(world, -50.0, 50.0, late.max(5), 170.0);
                    } else if allow_aimed {
                        self.aimed_volley(world, (early + 1).max(3), 160.0);
                    }
                    self.fire_timer = 1.0 * interval_scale;
                }
            }
        }
    }

    /// Volley aimed at the player's current center with per-bullet jitter
    fn aimed_volley(&self, world: &mut GameState, count: u32, speed: f32) {
        let muzzle = Vec2::new(self.center().x, self.pos.y);
        let jitter = world.tuning.boss_aim_jitter_deg;
        for _ in 0..count {
            if world.enemy_bullet_cap_reached() {
                break;
            }
            let target = world.player.center();
            let ang = (target.y - muzzle.y).atan2(target.x - muzzle.x)
                + world.rng.random_range(-jitter..=jitter).to_radians();
            world.spawn_enemy_bullet(muzzle, Vec2::new(ang.cos() * 120.0, -speed));
        }
    }

    /// Bullets evenly spread across the [a0, a1] degree arc
    fn fan(&self, world: &mut GameState, a0: f32, a1: f32, count: u32, speed: f32) {
        let muzzle = Vec2::new(self.center().x, self.pos.y);
        for i in 0..count {
            if world.enemy_bullet_cap_reached() {
                break;
            }
            let frac = if count > 1 { i as f32 / (count - 1) as f32 } else { 0.5 };
            let rad = (lerp(a0, a1, frac) + 90.0).to_radians();
            world.spawn_enemy_bullet(muzzle, Vec2::new(rad.cos() * 160.0, -speed));
        }
    }

    /// Rotating multi-arm pattern: angle follows elapsed boss time plus an
    /// even per-bullet offset.
    fn spiral(&self, world: &mut GameState, count: u32, speed: f32) {
        let muzzle = Vec2::new(self.center().x, self.pos.y);
        for i in 0..count {
            if world.enemy_bullet_cap_reached() {
                break;
            }
            let rad = (self.t * 180.0 + i as f32 * (360.0 / count as f32)).to_radians();
            world.spawn_enemy_bullet(muzzle, Vec2::new(rad.cos() * 150.0, -speed));
        }
    }

    pub fn damage(&mut self, d: i32) {
        self.hp -= d;
        self.hit_timer = HIT_FLASH_DURATION;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn boss(level: u32) -> Boss {
        Boss::spawn(level, &Difficulty::for_defeated(level - 1))
    }

    #[test]
    fn test_spawn_hp_uses_level_independent_formula() {
        let b = boss(1);
        // max(1, round(75 * 0.70))
        assert_eq!(b.max_hp, 53);
        assert_eq!(b.hp, b.max_hp);
    }

    #[test]
    fn test_pattern_slots_per_level() {
        assert_eq!(boss(1).pattern_slots(), 2);
        assert_eq!(boss(2).pattern_slots(), 3);
        assert_eq!(boss(9).pattern_slots(), 3);
    }

    #[test]
    fn test_phase_from_hp_pct() {
        assert_eq!(AttackPhase::for_hp_pct(0.9), AttackPhase::Opening);
        assert_eq!(AttackPhase::for_hp_pct(0.67), AttackPhase::Opening);
        assert_eq!(AttackPhase::for_hp_pct(0.5), AttackPhase::Midgame);
        assert_eq!(AttackPhase::for_hp_pct(0.34), AttackPhase::Midgame);
        assert_eq!(AttackPhase::for_hp_pct(0.2), AttackPhase::Desperate);
    }

    #[test]
    fn test_level_one_opening_volley_count_and_cooldown() {
        let mut world = GameState::new(1);
        let mut b = boss(1);
        b.update(&mut world, DT);
        assert_eq!(world.enemy_bullets.len(), 2);
        // 1.4 * (1.5 / max(1, 0.8))
        assert!((b.fire_timer - 2.1).abs() < 1e-4);
    }

    #[test]
    fn test_level_one_never_spirals() {
        let mut world = GameState::new(2);
        let mut b = boss(1);
        b.hp = (b.max_hp as f32 * 0.2) as i32;
        b.update(&mut world, DT);
        // Desperate phase falls back to the wide fan: max(5, 5) bullets
        assert_eq!(world.enemy_bullets.len(), 5);
    }

    #[test]
    fn test_spiral_unlocked_at_level_two() {
        let mut world = GameState::new(3);
        let mut b = boss(2);
        b.hp = 1;
        b.update(&mut world, DT);
        // min(6 + 1, 12) spiral arms
        assert_eq!(world.enemy_bullets.len(), 7);
    }

    #[test]
    fn test_cap_blocks_pattern_selection() {
        let mut world = GameState::new(4);
        for _ in 0..world.tuning.enemy_bullet_cap {
            world.fire_enemy(Vec2::new(400.0, 400.0));
        }
        let mut b = boss(1);
        b.update(&mut world, DT);
        assert_eq!(world.enemy_bullets.len(), world.tuning.enemy_bullet_cap);
        // Timer held at the re-check interval instead of a pattern cooldown
        assert!(b.fire_timer <= BOSS_CAP_RECHECK);
        assert!(b.fire_timer > 0.0);
    }

    #[test]
    fn test_pattern_emission_stops_at_cap() {
        let mut world = GameState::new(5);
        for _ in 0..world.tuning.enemy_bullet_cap - 2 {
            world.fire_enemy(Vec2::new(400.0, 400.0));
        }
        let mut b = boss(2);
        b.hp = 1; // spiral wants 7 bullets, only 2 slots remain under the cap
        b.update(&mut world, DT);
        assert_eq!(world.enemy_bullets.len(), world.tuning.enemy_bullet_cap);
    }

    #[test]
    fn test_sweep_reverses_at_margins() {
        let mut world = GameState::new(6);
        // Park the world at the cap so update only sweeps
        for _ in 0..world.tuning.enemy_bullet_cap {
            world.fire_enemy(Vec2::new(400.0, 400.0));
        }
        let mut b = boss(1);
        let mut seen_left = false;
        for _ in 0..3000 {
            b.update(&mut world, DT);
            assert!(b.pos.x > 0.0 && b.pos.x + b.size.x < PLAYFIELD_W);
            if b.dir < 0.0 {
                seen_left = true;
            }
        }
        assert!(seen_left);
    }

    #[test]
    fn test_aimed_volley_descends_toward_player() {
        let mut world = GameState::new(7);
        let mut b = boss(1);
        b.update(&mut world, DT);
        for &id in &world.enemy_bullets {
            assert!(world.bullets.get(id).vel.y < 0.0);
        }
    }
}
