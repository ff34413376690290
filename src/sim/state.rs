//! Game state and core simulation types
//!
//! The world is one owned context value passed explicitly to every
//! subsystem call; there is no ambient global state. All randomness flows
//! through the seeded RNG owned here so runs are reproducible.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::tuning::Tuning;

use super::boss::Boss;
use super::bullets::{BulletId, BulletPool};
use super::collision::{Rect, drop_for_roll};
use super::enemy::Enemy;
use super::spawn::Difficulty;

/// Sound effect categories raised for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SfxKind {
    Pickup,
    Hit,
}

/// Discrete events raised during a tick, drained by collaborators.
///
/// The sim never acts on these itself; they exist so rendering, audio and
/// persistence stay outside the core.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u8),
    WaveChanged { wave: u32, bosses_defeated: u32 },
    /// Raised once at game-over for the high-score collaborator
    HighScoreCandidate(u64),
    PlaySfx { kind: SfxKind, volume: f32 },
    CameraShake { duration: f32, strength: f32 },
    ScreenFlash { duration: f32 },
    GameOver,
}

/// Power-up categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Rapid,
    Spread,
    Shield,
    Life,
}

/// A falling pickup. `pos` is its center.
#[derive(Debug, Clone, Copy)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self { kind, pos }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.y -= POWERUP_FALL_SPEED * dt;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(POWERUP_HALF_SIZE))
    }
}

/// Frames in an explosion animation; the renderer maps indices to assets
pub const EXPLOSION_FRAMES: u32 = 16;

/// A cosmetic explosion animation record. The sim only advances its clock;
/// the renderer owns the pixels.
#[derive(Debug, Clone, Copy)]
pub struct Explosion {
    pub pos: Vec2,
    pub frame_duration: f32,
    pub scale: f32,
    t: f32,
}

impl Explosion {
    pub fn new(pos: Vec2, frame_duration: f32, scale: f32) -> Self {
        Self { pos, frame_duration, scale, t: 0.0 }
    }

    /// Advance the animation; returns true once the last frame has elapsed
    pub fn tick(&mut self, dt: f32) -> bool {
        self.t += dt;
        self.frame_index() >= EXPLOSION_FRAMES
    }

    pub fn frame_index(&self) -> u32 {
        (self.t / self.frame_duration) as u32
    }
}

/// The outcome of a player update that decided to shoot
#[derive(Debug, Clone, Copy)]
pub struct PlayerShot {
    /// Spread-shot was active at the moment of firing
    pub spread: bool,
}

/// The player ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Bottom-left corner of the ship box
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    cd_timer: f32,
    pub lives: u8,
    pub rapid_timer: f32,
    pub spread_timer: f32,
    pub shield_timer: f32,
    /// Cosmetic post-hit blink, no gameplay effect
    pub blink_timer: f32,
}

impl Player {
    pub fn new() -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        Self {
            pos: Vec2::new(PLAYFIELD_W / 2.0 - size.x / 2.0, PLAYER_SPAWN_Y),
            size,
            speed: PLAYER_SPEED,
            cd_timer: 0.0,
            lives: START_LIVES,
            rapid_timer: 0.0,
            spread_timer: 0.0,
            shield_timer: 0.0,
            blink_timer: 0.0,
        }
    }

    /// One player step: movement, cooldown, fire decision, timer decay.
    /// Returns the shot to emit, if any; bullet spawning is the world's job.
    pub fn update(&mut self, move_axis: f32, fire_held: bool, dt: f32) -> Option<PlayerShot> {
        let axis = move_axis.clamp(-1.0, 1.0);
        self.pos.x += axis * self.speed * dt;
        self.pos.x = self
            .pos
            .x
            .clamp(PLAYER_SIDE_MARGIN, PLAYFIELD_W - self.size.x - PLAYER_SIDE_MARGIN);

        self.cd_timer -= dt;
        // Rapid fire doubles as auto-fire
        let want_fire = fire_held || self.rapid_timer > 0.0;
        let shot = if want_fire && self.cd_timer <= 0.0 {
            self.cd_timer = if self.rapid_timer > 0.0 {
                PLAYER_RAPID_COOLDOWN
            } else {
                PLAYER_COOLDOWN
            };
            Some(PlayerShot { spread: self.spread_timer > 0.0 })
        } else {
            None
        };

        if self.rapid_timer > 0.0 {
            self.rapid_timer -= dt;
        }
        if self.spread_timer > 0.0 {
            self.spread_timer -= dt;
        }
        if self.shield_timer > 0.0 {
            self.shield_timer -= dt;
        }
        if self.blink_timer > 0.0 {
            self.blink_timer -= dt;
        }
        shot
    }

    /// Grants refresh to the maximum of current and grant duration; they
    /// never stack additively. The life grant is instantaneous and capped.
    pub fn apply_power(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Rapid => self.rapid_timer = self.rapid_timer.max(RAPID_DURATION),
            PowerUpKind::Spread => self.spread_timer = self.spread_timer.max(SPREAD_DURATION),
            PowerUpKind::Shield => self.shield_timer = self.shield_timer.max(SHIELD_DURATION),
            PowerUpKind::Life => self.lives = (self.lives + 1).min(MAX_LIVES),
        }
    }

    /// An active shield absorbs exactly one hit and is cleared regardless
    /// of remaining duration.
    pub fn consume_shield(&mut self) -> bool {
        if self.shield_timer > 0.0 {
            self.shield_timer = 0.0;
            true
        } else {
            false
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only HUD snapshot pulled by the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    pub score: u64,
    pub lives: u8,
    pub wave: u32,
    pub bosses_defeated: u32,
    pub rapid_active: bool,
    pub spread_active: bool,
    pub shield_active: bool,
    /// Current boss HP fraction, when a boss is on screen
    pub boss_hp_pct: Option<f32>,
}

/// Complete world state for one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The single injectable random source for every stochastic decision
    pub rng: Pcg32,
    pub tuning: Tuning,

    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub bullets: BulletPool,
    /// Pool slots currently owned by the player side
    pub player_bullets: Vec<BulletId>,
    /// Pool slots currently owned by the enemy side
    pub enemy_bullets: Vec<BulletId>,
    pub powerups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,

    pub score: u64,
    /// Incremented before each spawn decision; 0 until the first wave
    pub wave: u32,
    pub bosses_defeated: u32,
    pub difficulty: Difficulty,

    // Transient feedback, pulled by the renderer and mirrored as events
    pub shake_time: f32,
    pub shake_strength: f32,
    pub flash_time: f32,
    pub slowmo: f32,

    /// One-way terminal flag; ticks are no-ops once set
    pub game_over: bool,

    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh world with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            player: Player::new(),
            enemies: Vec::new(),
            boss: None,
            bullets: BulletPool::with_capacity(BULLET_POOL_CAPACITY),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            powerups: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            wave: 0,
            bosses_defeated: 0,
            difficulty: Difficulty::for_defeated(0),
            shake_time: 0.0,
            shake_strength: 0.0,
            flash_time: 0.0,
            slowmo: 0.0,
            game_over: false,
            events: Vec::new(),
        }
    }

    /// Global time scale: slow-motion after a boss kill, otherwise 1
    pub fn time_scale(&self) -> f32 {
        if self.slowmo > 0.0 { SLOWMO_SCALE } else { 1.0 }
    }

    /// Read-only HUD counters and power-up booleans
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            lives: self.player.lives,
            wave: self.wave,
            bosses_defeated: self.bosses_defeated,
            rapid_active: self.player.rapid_timer > 0.0,
            spread_active: self.player.spread_timer > 0.0,
            shield_active: self.player.shield_timer > 0.0,
            boss_hp_pct: self
                .boss
                .as_ref()
                .map(|b| (b.hp.max(0) as f32 / b.max_hp as f32).clamp(0.0, 1.0)),
        }
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn add_score(&mut self, points: u64) {
        self.score += points;
        self.push_event(GameEvent::ScoreChanged(self.score));
    }

    pub(crate) fn play_sfx(&mut self, kind: SfxKind, volume: f32) {
        self.push_event(GameEvent::PlaySfx { kind, volume });
    }

    /// Camera shake keeps the strongest pending request
    pub(crate) fn shake(&mut self, duration: f32, strength: f32) {
        self.shake_time = self.shake_time.max(duration);
        self.shake_strength = self.shake_strength.max(strength);
        self.push_event(GameEvent::CameraShake { duration, strength });
    }

    pub(crate) fn flash(&mut self, duration: f32) {
        self.flash_time = self.flash_time.max(duration);
        self.push_event(GameEvent::ScreenFlash { duration });
    }

    /// One incoming hit on the player: an active shield absorbs it,
    /// otherwise a life is lost and the run may end.
    pub(crate) fn hit_player(&mut self) {
        if self.game_over {
            return;
        }
        if self.player.consume_shield() {
            self.shake(0.15, 4.0);
            return;
        }
        self.player.lives = self.player.lives.saturating_sub(1);
        self.push_event(GameEvent::LivesChanged(self.player.lives));
        self.shake(0.25, 6.0);
        if self.player.lives == 0 {
            self.game_over = true;
            log::info!("game over at wave {} with score {}", self.wave, self.score);
            self.push_event(GameEvent::HighScoreCandidate(self.score));
            self.push_event(GameEvent::GameOver);
        } else {
            self.player.blink_timer = PLAYER_BLINK_DURATION;
        }
    }

    /// Apply a picked-up power-up and surface the life change if any
    pub(crate) fn apply_powerup(&mut self, kind: PowerUpKind) {
        self.player.apply_power(kind);
        if kind == PowerUpKind::Life {
            self.push_event(GameEvent::LivesChanged(self.player.lives));
        }
    }

    /// Roll the drop bands once; a winning band spawns a pickup at `center`
    pub(crate) fn maybe_drop(&mut self, center: Vec2) {
        let roll: f32 = self.rng.random();
        if let Some(kind) = drop_for_roll(roll) {
            self.powerups.push(PowerUp::new(kind, center));
        }
    }

    pub(crate) fn spawn_explosion(&mut self, center: Vec2) {
        self.spawn_explosion_with(center, 0.05, 0.7);
    }

    pub(crate) fn spawn_explosion_with(&mut self, center: Vec2, frame_duration: f32, scale: f32) {
        self.explosions.push(Explosion::new(center, frame_duration, scale));
    }

    /// Emit the lead bullet, plus the two angled side bullets while
    /// spread-shot is active.
    pub(crate) fn fire_player_shot(&mut self, shot: PlayerShot) {
        let center = self.player.center();
        let muzzle = Vec2::new(center.x, self.player.pos.y + self.player.size.y);
        self.spawn_player_bullet(muzzle, Vec2::new(0.0, PLAYER_BULLET_SPEED));
        if shot.spread {
            self.spawn_player_bullet(muzzle, Vec2::new(-SPREAD_BULLET_VX, PLAYER_BULLET_SPEED));
            self.spawn_player_bullet(muzzle, Vec2::new(SPREAD_BULLET_VX, PLAYER_BULLET_SPEED));
        }
    }

    fn spawn_player_bullet(&mut self, muzzle: Vec2, vel: Vec2) {
        let size = Vec2::splat(PLAYER_BULLET_SIZE);
        let pos = Vec2::new(muzzle.x - size.x / 2.0, muzzle.y);
        match self.bullets.alloc(pos, size, vel) {
            Some(id) => self.player_bullets.push(id),
            None => log::debug!("bullet pool exhausted, player shot dropped"),
        }
    }

    /// Straight-down shot from a regular enemy's muzzle point
    pub(crate) fn fire_enemy(&mut self, muzzle: Vec2) {
        self.spawn_enemy_bullet(muzzle, Vec2::new(0.0, -ENEMY_BULLET_SPEED));
    }

    /// Enemy-side bullet centered on `muzzle` with an arbitrary velocity
    pub(crate) fn spawn_enemy_bullet(&mut self, muzzle: Vec2, vel: Vec2) {
        let size = Vec2::splat(ENEMY_BULLET_SIZE);
        match self.bullets.alloc(muzzle - size / 2.0, size, vel) {
            Some(id) => self.enemy_bullets.push(id),
            None => log::debug!("bullet pool exhausted, enemy shot dropped"),
        }
    }

    /// Soft backpressure gate consulted by boss pattern generation
    pub(crate) fn enemy_bullet_cap_reached(&self) -> bool {
        self.enemy_bullets.len() >= self.tuning.enemy_bullet_cap
    }

    /// Remove the bullet at `index` of the player-side set and return its
    /// slot to the pool.
    pub(crate) fn release_player_bullet_at(&mut self, index: usize) {
        let id = self.player_bullets.remove(index);
        self.bullets.release(id);
    }

    pub(crate) fn release_enemy_bullet_at(&mut self, index: usize) {
        let id = self.enemy_bullets.remove(index);
        self.bullets.release(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_powerup_refresh_is_max_not_additive() {
        let mut p = Player::new();
        p.rapid_timer = 3.0;
        p.apply_power(PowerUpKind::Rapid);
        assert_eq!(p.rapid_timer, 8.0);
        // Already above the grant: unchanged
        p.rapid_timer = 9.0;
        p.apply_power(PowerUpKind::Rapid);
        assert_eq!(p.rapid_timer, 9.0);
    }

    #[test]
    fn test_life_grant_caps_at_five() {
        let mut p = Player::new();
        for _ in 0..10 {
            p.apply_power(PowerUpKind::Life);
        }
        assert_eq!(p.lives, MAX_LIVES);
    }

    #[test]
    fn test_shield_absorbs_exactly_one_hit() {
        let mut state = GameState::new(1);
        state.player.shield_timer = 5.0;
        let lives = state.player.lives;
        state.hit_player();
        assert_eq!(state.player.lives, lives);
        assert_eq!(state.player.shield_timer, 0.0);
        // Next hit goes through
        state.hit_player();
        assert_eq!(state.player.lives, lives - 1);
    }

    #[test]
    fn test_final_hit_sets_game_over_and_raises_candidate() {
        let mut state = GameState::new(2);
        state.player.lives = 1;
        state.score = 777;
        state.hit_player();
        assert!(state.game_over);
        let events = state.drain_events();
        let candidates: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::HighScoreCandidate(777)))
            .collect();
        assert_eq!(candidates.len(), 1);
        assert!(events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_player_clamped_inside_margins() {
        let mut p = Player::new();
        for _ in 0..600 {
            p.update(-1.0, false, 1.0 / 60.0);
        }
        assert_eq!(p.pos.x, PLAYER_SIDE_MARGIN);
        for _ in 0..600 {
            p.update(1.0, false, 1.0 / 60.0);
        }
        assert_eq!(p.pos.x, PLAYFIELD_W - p.size.x - PLAYER_SIDE_MARGIN);
    }

    #[test]
    fn test_fire_gated_by_cooldown() {
        let mut p = Player::new();
        assert!(p.update(0.0, true, 1.0 / 60.0).is_some());
        // Cooldown still running on the immediate next tick
        assert!(p.update(0.0, true, 1.0 / 60.0).is_none());
    }

    #[test]
    fn test_rapid_fire_is_auto_fire() {
        let mut p = Player::new();
        p.rapid_timer = 8.0;
        assert!(p.update(0.0, false, 1.0 / 60.0).is_some());
    }

    #[test]
    fn test_spread_captured_at_fire_time() {
        let mut p = Player::new();
        p.spread_timer = 4.0;
        let shot = p.update(0.0, true, 1.0 / 60.0).unwrap();
        assert!(shot.spread);
    }

    #[test]
    fn test_explosion_completes() {
        let mut ex = Explosion::new(Vec2::ZERO, 0.05, 0.7);
        let mut done = false;
        for _ in 0..100 {
            if ex.tick(1.0 / 60.0) {
                done = true;
                break;
            }
        }
        assert!(done);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(3);
        state.add_score(10);
        assert!(!state.drain_events().is_empty());
        assert!(state.drain_events().is_empty());
    }

    proptest! {
        #[test]
        fn prop_powerup_refresh_never_exceeds_grant_or_current(current in 0.0f32..20.0) {
            let mut p = Player::new();
            p.shield_timer = current;
            p.apply_power(PowerUpKind::Shield);
            prop_assert_eq!(p.shield_timer, current.max(SHIELD_DURATION));
        }
    }
}
