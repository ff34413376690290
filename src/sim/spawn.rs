//! Wave spawning and the difficulty controller
//!
//! The wave counter increments before each spawn decision. Every fifth wave
//! is a boss encounter; all other waves spawn a roster of enemies above the
//! top edge. Difficulty is a pure, clamped function of the bosses-defeated
//! counter, recomputed at world construction and after every boss defeat.

use rand::Rng;

use crate::consts::*;

use super::boss::Boss;
use super::enemy::{Enemy, MovementKind};
use super::state::{GameEvent, GameState};

/// The five difficulty scalars. Always inside their documented clamp
/// ranges, for any number of defeated bosses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub enemy_speed: f32,
    pub enemy_fire: f32,
    pub spawn: f32,
    pub boss_hp: f32,
    pub boss_fire: f32,
}

impl Difficulty {
    /// Recompute all scalars from the bosses-defeated counter
    pub fn for_defeated(bosses_defeated: u32) -> Self {
        let tier = 1.0 + bosses_defeated as f32 * 0.35;
        Self {
            enemy_speed: (0.80 * tier).clamp(0.80, 3.0),
            enemy_fire: (0.75 * tier).clamp(0.60, 3.0),
            spawn: (0.75 * tier).clamp(0.60, 2.5),
            boss_hp: (0.70 * tier).clamp(0.70, 3.0),
            boss_fire: (0.80 * tier).clamp(0.70, 3.0),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::for_defeated(0)
    }
}

/// Advance the wave counter and spawn the next encounter
pub fn next_wave(state: &mut GameState) {
    state.wave += 1;
    state.push_event(GameEvent::WaveChanged {
        wave: state.wave,
        bosses_defeated: state.bosses_defeated,
    });

    if state.wave % 5 == 0 {
        let level = state.bosses_defeated + 1;
        log::debug!("wave {}: boss level {}", state.wave, level);
        state.boss = Some(Boss::spawn(level, &state.difficulty));
        return;
    }

    let base = 4 + ((state.wave.min(6) as f32) * 0.6).round() as i32;
    let count = ((base as f32 * state.difficulty.spawn).round() as i32).max(4);
    log::debug!("wave {}: spawning {} enemies", state.wave, count);
    spawn_enemies(state, count as usize);
}

/// Place `count` enemies at random horizontal positions, staggered above
/// the top edge, each with an independently random movement variant.
fn spawn_enemies(state: &mut GameState, count: usize) {
    for _ in 0..count {
        let kind = MovementKind::pick(&mut state.rng);
        let cx = state.rng.random_range(40.0..=PLAYFIELD_W - 80.0);
        let y = PLAYFIELD_H + state.rng.random_range(30.0..=200.0);
        let enemy = Enemy::spawn(&mut state.rng, kind, cx, y, state.wave, &state.difficulty);
        state.enemies.push(enemy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_difficulty_matches_tier_one() {
        let d = Difficulty::for_defeated(0);
        assert!((d.enemy_speed - 0.80).abs() < 1e-6);
        assert!((d.enemy_fire - 0.75).abs() < 1e-6);
        assert!((d.spawn - 0.75).abs() < 1e-6);
        assert!((d.boss_hp - 0.70).abs() < 1e-6);
        assert!((d.boss_fire - 0.80).abs() < 1e-6);
    }

    #[test]
    fn test_difficulty_saturates() {
        let d = Difficulty::for_defeated(1000);
        assert_eq!(d.enemy_speed, 3.0);
        assert_eq!(d.enemy_fire, 3.0);
        assert_eq!(d.spawn, 2.5);
        assert_eq!(d.boss_hp, 3.0);
        assert_eq!(d.boss_fire, 3.0);
    }

    #[test]
    fn test_first_wave_spawns_four_enemies() {
        let mut state = GameState::new(1);
        next_wave(&mut state);
        assert_eq!(state.wave, 1);
        // max(4, round((4 + round(0.6)) * 0.75)) = max(4, 4)
        assert_eq!(state.enemies.len(), 4);
        assert!(state.boss.is_none());
    }

    #[test]
    fn test_every_fifth_wave_is_a_boss() {
        let mut state = GameState::new(2);
        for _ in 0..5 {
            state.enemies.clear();
            next_wave(&mut state);
        }
        assert_eq!(state.wave, 5);
        assert!(state.boss.is_some());
        assert!(state.enemies.is_empty());
        let boss = state.boss.as_ref().unwrap();
        assert_eq!(boss.level, 1);
    }

    #[test]
    fn test_wave_counter_increments_by_one() {
        let mut state = GameState::new(3);
        for expected in 1..=12u32 {
            state.enemies.clear();
            state.boss = None;
            next_wave(&mut state);
            assert_eq!(state.wave, expected);
        }
    }

    #[test]
    fn test_roster_never_below_four() {
        let mut state = GameState::new(4);
        next_wave(&mut state);
        state.enemies.clear();
        next_wave(&mut state);
        assert!(state.enemies.len() >= 4);
    }

    #[test]
    fn test_spawns_land_above_playfield() {
        let mut state = GameState::new(5);
        next_wave(&mut state);
        for e in &state.enemies {
            assert!(e.pos.y >= PLAYFIELD_H);
            assert!(e.pos.x >= 0.0 && e.pos.x <= PLAYFIELD_W);
        }
    }

    proptest! {
        #[test]
        fn prop_difficulty_stays_clamped(defeated in 0u32..100_000) {
            let d = Difficulty::for_defeated(defeated);
            prop_assert!((0.80..=3.0).contains(&d.enemy_speed));
            prop_assert!((0.60..=3.0).contains(&d.enemy_fire));
            prop_assert!((0.60..=2.5).contains(&d.spawn));
            prop_assert!((0.70..=3.0).contains(&d.boss_hp));
            prop_assert!((0.70..=3.0).contains(&d.boss_fire));
        }

        #[test]
        fn prop_difficulty_is_monotonic(defeated in 0u32..10_000) {
            let a = Difficulty::for_defeated(defeated);
            let b = Difficulty::for_defeated(defeated + 1);
            prop_assert!(b.enemy_speed >= a.enemy_speed);
            prop_assert!(b.enemy_fire >= a.enemy_fire);
            prop_assert!(b.spawn >= a.spawn);
            prop_assert!(b.boss_hp >= a.boss_hp);
            prop_assert!(b.boss_fire >= a.boss_fire);
        }
    }
}
