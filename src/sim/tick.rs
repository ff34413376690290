//! Fixed-order world update
//!
//! One synchronous pass per external tick. The order is load-bearing:
//! player before enemies and boss, then bullet integration and collision
//! resolution, then pickups, so a bullet fired this tick cannot collide
//! until the next tick's integration and kill scores are visible before
//! the HUD is read. Wave and boss transitions only ever happen at tick
//! boundaries.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::spawn::{Difficulty, next_wave};
use super::state::{GameState, SfxKind};

/// Abstracted per-tick input from the excluded input layer
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Horizontal movement axis in [-1, 1]
    pub move_axis: f32,
    /// Held-fire flag, not edge-triggered
    pub fire: bool,
    /// Freezes the tick without resetting any timer
    pub paused: bool,
}

/// Advance the world by one tick of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.game_over {
        return;
    }
    // Pause freezes time entirely; timers keep their values and no
    // stochastic roll advances while frozen.
    if input.paused {
        return;
    }
    let dt = dt * state.time_scale();

    // Feedback timers decay in scaled time, slow-motion included
    if state.slowmo > 0.0 {
        state.slowmo -= dt;
    }
    if state.shake_time > 0.0 {
        state.shake_time -= dt;
        if state.shake_time <= 0.0 {
            state.shake_strength = 0.0;
        }
    }
    if state.flash_time > 0.0 {
        state.flash_time -= dt;
    }

    if let Some(shot) = state.player.update(input.move_axis, input.fire, dt) {
        state.fire_player_shot(shot);
    }

    if state.boss.is_none() && state.enemies.is_empty() {
        next_wave(state);
    }

    update_boss(state, dt);
    update_enemies(state, dt);
    update_player_bullets(state, dt);
    update_enemy_bullets(state, dt);
    update_powerups(state, dt);

    // Cosmetic explosion animations run to completion then disappear
    state.explosions.retain_mut(|ex| !ex.tick(dt));
}

/// Boss step plus defeat resolution. Defeat is detected on the tick after
/// the killing hit, matching the bullet-pass-then-boss-pass order.
fn update_boss(state: &mut GameState, dt: f32) {
    let Some(mut boss) = state.boss.take() else {
        return;
    };
    boss.update(state, dt);
    if boss.hp <= 0 {
        state.add_score(BOSS_KILL_SCORE);
        state.bosses_defeated += 1;
        state.difficulty = Difficulty::for_defeated(state.bosses_defeated);
        state.flash(BOSS_KILL_FLASH);
        state.slowmo = SLOWMO_DURATION;
        state.shake(0.4, 8.0);
        // The kill explosion is staged at the player's position
        let pos = state.player.pos;
        state.spawn_explosion_with(pos, 0.04, 1.0);
        log::info!(
            "boss defeated ({} total), difficulty recomputed",
            state.bosses_defeated
        );
    } else {
        state.boss = Some(boss);
    }
}

/// Move, cull, roll fire checks and resolve player contact for all enemies
fn update_enemies(state: &mut GameState, dt: f32) {
    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;
        let player_cx = state.player.center().x;
        state.enemies[i].update(player_cx, dt);

        let e = &state.enemies[i];
        // Gone below the playfield
        if e.pos.y + e.size.y < 0.0 {
            state.enemies.remove(i);
            continue;
        }
        let ready = e.ready_to_shoot();
        let chance = f64::from(e.fire_chance().min(1.0));
        let muzzle = Vec2::new(e.center().x, e.pos.y);
        let center = e.center();
        let touches_player = e.rect().overlaps(&state.player.rect());

        if ready && state.rng.random_bool(chance) {
            state.enemies[i].reset_shoot_timer();
            state.fire_enemy(muzzle);
        }
        if touches_player {
            state.enemies.remove(i);
            state.spawn_explosion(center);
            state.hit_player();
        }
    }
}

/// Integrate player bullets and resolve them against enemies, then the boss
fn update_player_bullets(state: &mut GameState, dt: f32) {
    let hitbox_scale = state.tuning.bullet_hitbox_scale;
    let mut i = state.player_bullets.len();
    while i > 0 {
        i -= 1;
        let id = state.player_bullets[i];
        {
            let b = state.bullets.get_mut(id);
            b.pos += b.vel * dt;
        }
        let b = *state.bullets.get(id);
        if b.pos.y > PLAYFIELD_H {
            state.release_player_bullet_at(i);
            continue;
        }
        let hb = b.hitbox(hitbox_scale);

        // Enemies take priority; one bullet damages at most one enemy
        let mut hit = false;
        let mut j = state.enemies.len();
        while j > 0 {
            j -= 1;
            if hb.overlaps(&state.enemies[j].rect()) {
                state.enemies[j].damage(1);
                state.release_player_bullet_at(i);
                state.play_sfx(SfxKind::Hit, 0.45);
                if state.enemies[j].is_dead() {
                    let center = state.enemies[j].center();
                    let value = state.enemies[j].score_value;
                    state.maybe_drop(center);
                    state.add_score(value);
                    state.spawn_explosion(center);
                    state.enemies.remove(j);
                    state.shake(0.08, 2.2);
                }
                hit = true;
                break;
            }
        }

        // The boss is only tested when no enemy matched this tick
        if !hit {
            let boss_center = match state.boss.as_mut() {
                Some(boss) if hb.overlaps(&boss.rect()) => {
                    boss.damage(1);
                    Some(boss.center())
                }
                _ => None,
            };
            if let Some(center) = boss_center {
                state.add_score(state.tuning.boss_hit_score);
                state.play_sfx(SfxKind::Hit, 0.55);
                if state.rng.random::<f32>() < state.tuning.boss_hit_drop_chance {
                    state.maybe_drop(center);
                }
                state.release_player_bullet_at(i);
                state.shake(0.02, 1.2);
                state.spawn_explosion_with(center, 0.03, 0.25);
            }
        }
    }
}

/// Integrate enemy bullets and resolve them against the player
fn update_enemy_bullets(state: &mut GameState, dt: f32) {
    let hitbox_scale = state.tuning.bullet_hitbox_scale;
    let mut i = state.enemy_bullets.len();
    while i > 0 {
        i -= 1;
        let id = state.enemy_bullets[i];
        {
            let b = state.bullets.get_mut(id);
            b.pos += b.vel * dt;
        }
        let b = *state.bullets.get(id);
        if b.pos.y + b.size.y < 0.0 {
            state.release_enemy_bullet_at(i);
            continue;
        }
        if b.hitbox(hitbox_scale).overlaps(&state.player.rect()) {
            state.release_enemy_bullet_at(i);
            let center = state.player.center();
            state.spawn_explosion(center);
            state.play_sfx(SfxKind::Hit, 0.8);
            state.hit_player();
        }
    }
}

/// Fall, cull and apply pickups
fn update_powerups(state: &mut GameState, dt: f32) {
    let mut i = state.powerups.len();
    while i > 0 {
        i -= 1;
        state.powerups[i].update(dt);
        let p = state.powerups[i];
        if p.pos.y + POWERUP_HALF_SIZE < 0.0 {
            state.powerups.remove(i);
            continue;
        }
        if p.rect().overlaps(&state.player.rect()) {
            state.powerups.remove(i);
            state.apply_powerup(p.kind);
            state.play_sfx(SfxKind::Pickup, 0.9);
        }
    }
}
