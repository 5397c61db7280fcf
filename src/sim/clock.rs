//! Shot clock and game-mode state machine
//!
//! Modes change only through [`set_mode`] / [`start_challenge_round`] or when
//! a challenge round expires. Every mode entry runs the same reset cascade:
//! stats, ball, clock, power.

use super::event::GameEvent;
use super::state::{ChallengePhase, GameMode, GameState};
use crate::consts::*;
use crate::highscores::{Leaderboard, LeaderboardEntry};
use crate::persistence::Storage;

/// What the clock did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockOutcome {
    /// Clock not running (free mode or round over)
    Idle,
    Running,
    /// Regular clock expired: ball and clock were reset
    Violation,
    /// Challenge clock expired with this combined score
    ChallengeEnded(u32),
}

impl ClockOutcome {
    /// The rest of the tick is skipped after a violation or round end
    pub fn ends_tick(&self) -> bool {
        matches!(self, ClockOutcome::Violation | ClockOutcome::ChallengeEnded(_))
    }
}

/// Count the clock down by one frame and apply mode-specific expiry
pub fn advance_clock(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) -> ClockOutcome {
    match state.mode {
        GameMode::Free => ClockOutcome::Idle,
        GameMode::Challenge => {
            if state.challenge.is_ended() {
                return ClockOutcome::Idle;
            }
            state.shot_clock = (state.shot_clock - dt).max(0.0);
            if state.shot_clock == 0.0 {
                match end_challenge(state, events) {
                    Some(score) => ClockOutcome::ChallengeEnded(score),
                    None => ClockOutcome::Idle,
                }
            } else {
                ClockOutcome::Running
            }
        }
        GameMode::Regular => {
            state.shot_clock -= dt;
            if state.shot_clock <= 0.0 {
                state.reset_ball();
                state.shot_clock = SHOT_CLOCK_SECS;
                events.push(GameEvent::ShotClockViolation);
                events.push(GameEvent::BallReset);
                log::info!("Shot clock violation");
                ClockOutcome::Violation
            } else {
                ClockOutcome::Running
            }
        }
    }
}

/// Finish the challenge round. Fires once; later calls return `None`.
pub fn end_challenge(state: &mut GameState, events: &mut Vec<GameEvent>) -> Option<u32> {
    if state.mode != GameMode::Challenge || state.challenge.is_ended() {
        return None;
    }
    let final_score = state.combined_score();
    state.challenge = ChallengePhase::AwaitingName { final_score };
    state.shot_clock = 0.0;
    state.home.score = 0;
    state.guest.score = 0;
    state.reset_ball();
    events.push(GameEvent::ChallengeEnded { final_score });
    log::info!("Challenge over: final score {}", final_score);
    Some(final_score)
}

/// Live rim/backboard contact keeps the offense's clock alive
pub fn refresh_on_contact(state: &mut GameState) {
    if state.mode == GameMode::Regular {
        state.shot_clock = SHOT_CLOCK_SECS;
    }
}

/// Reset stats, ball, clock and power for the current mode
pub fn reset_for_mode(state: &mut GameState) {
    state.shot_clock = state.mode.clock_start();
    state.challenge = ChallengePhase::Running;
    state.reset_stats();
    state.reset_ball();
}

/// Switch mode and run the reset cascade
pub fn set_mode(state: &mut GameState, mode: GameMode, events: &mut Vec<GameEvent>) {
    state.mode = mode;
    reset_for_mode(state);
    events.push(GameEvent::ModeChanged { mode });
    events.push(GameEvent::BallReset);
    log::info!("Mode set to {}", mode.as_str());
}

/// Parse-and-switch; unknown names are ignored. Returns whether a switch happened.
pub fn set_mode_named(state: &mut GameState, name: &str, events: &mut Vec<GameEvent>) -> bool {
    match GameMode::from_str(name) {
        Some(mode) => {
            set_mode(state, mode, events);
            true
        }
        None => {
            log::warn!("Ignoring unknown mode {:?}", name);
            false
        }
    }
}

/// Begin a fresh 60 s challenge round
pub fn start_challenge_round(state: &mut GameState, events: &mut Vec<GameEvent>) {
    set_mode(state, GameMode::Challenge, events);
}

/// Record the finished round under `name` and show the ranked list.
///
/// Only valid while the round is waiting for a name; returns `None` otherwise.
/// Storage failures are logged and the in-memory list is still returned.
pub fn submit_challenge_score(
    state: &mut GameState,
    leaderboard: &mut Leaderboard,
    storage: &mut dyn Storage,
    name: &str,
    timestamp: u64,
) -> Option<Vec<LeaderboardEntry>> {
    let ChallengePhase::AwaitingName { final_score } = state.challenge else {
        return None;
    };
    leaderboard.add_score(name, final_score, timestamp);
    if let Err(e) = leaderboard.save(storage) {
        log::warn!("Leaderboard not saved: {}", e);
    }
    state.challenge = ChallengePhase::ShowingLeaderboard;
    Some(leaderboard.entries.clone())
}

/// Dismiss the leaderboard view, which starts the next round
pub fn close_leaderboard(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if state.mode != GameMode::Challenge || state.challenge != ChallengePhase::ShowingLeaderboard {
        return false;
    }
    start_challenge_round(state, events);
    true
}

/// Clock text: `MM:SS` from whole seconds rounded up, `00:00` in free mode
pub fn format_clock(mode: GameMode, seconds: f32) -> String {
    if mode == GameMode::Free {
        return "00:00".to_string();
    }
    let secs = seconds.max(0.0).ceil() as u32;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
