//! Galaxy Blitz entry point
//!
//! Headless demo runner: advances the simulation at a fixed timestep with a
//! small autopilot, logs the events a front end would consume, and records
//! high scores. Rendering and audio collaborators plug in the same way.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use galaxy_blitz::consts::*;
use galaxy_blitz::sim::{GameEvent, GameState, TickInput, tick};
use galaxy_blitz::{HighScores, Tuning};

/// Fixed simulation timestep (60 Hz)
const SIM_DT: f32 = 1.0 / 60.0;
/// Safety stop for the demo run (ten minutes of sim time)
const MAX_TICKS: u64 = 60 * 600;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(unix_now);

    let tuning = Tuning::load(&PathBuf::from("tuning.json"));
    let mut state = GameState::with_tuning(seed, tuning);
    log::info!("Game initialized with seed: {seed}");

    let highscore_path = PathBuf::from("highscores.json");
    let mut highscores = HighScores::load(&highscore_path);

    let mut input = TickInput::default();
    for _ in 0..MAX_TICKS {
        autopilot(&state, &mut input);
        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::WaveChanged { wave, bosses_defeated } => {
                    log::info!("wave {wave} (bosses defeated: {bosses_defeated})");
                }
                GameEvent::LivesChanged(lives) => log::info!("lives: {lives}"),
                GameEvent::HighScoreCandidate(score) => {
                    if let Some(rank) = highscores.add_score(score, state.wave, unix_now()) {
                        log::info!("new high score: {score} (rank {rank})");
                        if let Err(e) = highscores.save(&highscore_path) {
                            log::warn!("failed to save high scores: {e}");
                        }
                    }
                }
                GameEvent::GameOver => log::info!("game over"),
                _ => {}
            }
        }

        if state.game_over {
            break;
        }
    }

    let hud = state.hud();
    log::info!(
        "run finished: score {} wave {} bosses {}",
        hud.score,
        hud.wave,
        hud.bosses_defeated
    );
}

/// Keep the demo pilot busy: grab pickups when it is safe to want them,
/// sidestep the nearest incoming bullet, otherwise drift back to center.
fn autopilot(state: &GameState, input: &mut TickInput) {
    input.fire = true;
    input.paused = false;
    let center = state.player.center();

    if let Some(p) = state.powerups.iter().min_by(|a, b| {
        let da = (a.pos - center).length();
        let db = (b.pos - center).length();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    }) {
        input.move_axis = (p.pos.x - center.x).signum() * 0.8;
        return;
    }

    let threat = state
        .enemy_bullets
        .iter()
        .map(|&id| state.bullets.get(id))
        .filter(|b| b.pos.y < center.y + 160.0)
        .min_by(|a, b| {
            let da = (a.pos.y - center.y).abs();
            let db = (b.pos.y - center.y).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
    if let Some(b) = threat {
        let dx = b.pos.x + b.size.x / 2.0 - center.x;
        if dx.abs() < 40.0 {
            input.move_axis = if dx >= 0.0 { -1.0 } else { 1.0 };
            return;
        }
    }

    let home = PLAYFIELD_W / 2.0;
    input.move_axis = ((home - center.x) / 200.0).clamp(-1.0, 1.0);
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
