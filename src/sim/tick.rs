//! Fixed timestep simulation tick
//!
//! One call per rendered frame. Order within a tick:
//! 1. player input (mode, reset, power, wind, nudge, shoot)
//! 2. clock (a violation or round end finishes the tick early)
//! 3. physics substeps: integrate, then the collision pipeline
//! 4. make detection against the previous frame's height
//! 5. trail, court bounds, effects

use glam::Vec2;

use super::clock::{self, ClockOutcome};
use super::collision::{self, ResolveContext};
use super::event::GameEvent;
use super::integrator::integrate;
use super::scoring;
use super::shot;
use super::state::{GameMode, GameState, WindDirection};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Release the ball
    pub shoot: bool,
    /// Return the ball to its resting spot
    pub reset: bool,
    /// Power steps (+1 / -1 per key press)
    pub power_delta: i32,
    /// Move a resting ball along the floor (x, z)
    pub nudge: Option<Vec2>,
    /// Flip wind on/off
    pub toggle_wind: bool,
    /// Wind intensity steps
    pub wind_delta: i32,
    pub wind_direction: Option<WindDirection>,
    /// Switch game mode (full reset)
    pub mode: Option<GameMode>,
}

/// Advance the game by one frame of `dt` seconds. Returns the events
/// produced, in order.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let start_ms = state.time_ms();
    state.time_ticks += 1;

    apply_input(state, input, &mut events);

    let outcome = clock::advance_clock(state, dt, &mut events);
    if !outcome.ends_tick() {
        step_physics(state, dt, start_ms, &mut events);
    } else if let ClockOutcome::ChallengeEnded(score) = outcome {
        log::debug!("Round ended at tick {} with {}", state.time_ticks, score);
    }

    finish_tick(state, dt);
    events
}

fn apply_input(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if let Some(mode) = input.mode {
        clock::set_mode(state, mode, events);
    }

    // The name prompt / leaderboard owns the player's input
    if state.round_ended() {
        return;
    }

    if input.reset {
        state.reset_ball();
        events.push(GameEvent::BallReset);
    }

    if input.power_delta != 0 {
        shot::adjust_power(state, input.power_delta);
    }

    if input.toggle_wind {
        state.wind.enabled = !state.wind.enabled;
    }
    if input.wind_delta != 0 {
        let next = (state.wind.intensity as i32)
            .saturating_add(input.wind_delta)
            .clamp(0, 100);
        state.wind.intensity = next as u8;
    }
    if let Some(dir) = input.wind_direction {
        state.wind.direction = dir;
    }

    if let Some(dir) = input.nudge {
        shot::nudge_ball(state, dir.x, dir.y);
    }

    if input.shoot {
        shot::shoot(state, events);
    }
}

fn step_physics(state: &mut GameState, dt: f32, start_ms: f64, events: &mut Vec<GameEvent>) {
    if !state.ball.flying {
        return;
    }

    let last_y = state.trial.last_y;
    let substep_dt = dt / PHYSICS_SUBSTEPS as f32;
    let wind = state.wind.acceleration();

    for i in 0..PHYSICS_SUBSTEPS {
        integrate(&mut state.ball, GRAVITY, wind, substep_dt);

        let ctx = ResolveContext {
            mode: state.mode,
            shooter: state.last_shot_side,
            time_ms: start_ms + (i as f64) * substep_dt as f64 * 1000.0,
        };
        let report = collision::resolve(&mut state.ball, &mut state.trial, &state.court, &ctx, events);

        if report.live_contact {
            clock::refresh_on_contact(state);
        }
        if let Some(side) = report.missed {
            scoring::register_miss(state, side);
        }
        if report.halted {
            break;
        }
    }

    scoring::check_score(state, last_y, events);

    if state.ball.flying {
        state.ball.record_trail();
    } else {
        state.ball.clear_trail();
    }
    state.ball.clamp_to_court();
}

fn finish_tick(state: &mut GameState, dt: f32) {
    state.trial.last_y = state.ball.pos.y;
    state.trial.suppress_miss = false;
    for fx in &mut state.rim_fire {
        fx.update(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;
    use glam::Vec3;

    fn run(state: &mut GameState, frames: usize) -> Vec<GameEvent> {
        let mut all = Vec::new();
        for _ in 0..frames {
            all.extend(tick(state, &TickInput::default(), FRAME_DT));
        }
        all
    }

    #[test]
    fn test_resting_ball_stays_put() {
        let mut state = GameState::new(GameMode::Free);
        let before = state.ball.pos;
        run(&mut state, 120);
        assert_eq!(state.ball.pos, before);
        assert_eq!(state.ball.vel, Vec3::ZERO);
    }

    #[test]
    fn test_shot_lands_and_misses() {
        let mut state = GameState::new(GameMode::Regular);
        state.power = 10;
        let shoot = TickInput {
            shoot: true,
            ..Default::default()
        };
        let mut events = tick(&mut state, &shoot, FRAME_DT);
        assert!(state.ball.flying);
        events.extend(run(&mut state, 600));

        assert!(!state.ball.flying);
        assert_eq!(state.home.attempts, 1);
        assert_eq!(state.home.made, 0);
        assert!(events.contains(&GameEvent::Missed { side: Side::Home }));
        assert!(events.iter().any(|e| matches!(e, GameEvent::GroundHit { .. })));
    }

    #[test]
    fn test_drop_through_rim_scores_once() {
        let mut state = GameState::new(GameMode::Challenge);
        let mut events = Vec::new();
        shot::shoot(&mut state, &mut events);
        // Hang the ball directly above the left rim and let it fall
        let rim = state.court.rims[0];
        state.ball.pos = rim.center + Vec3::new(0.0, 0.6, 0.0);
        state.ball.vel = Vec3::ZERO;
        state.trial.last_y = state.ball.pos.y;

        let events = run(&mut state, 300);

        let scores: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Scored { .. }))
            .collect();
        assert_eq!(scores.len(), 1);
        assert_eq!(state.home.made, 1);
        assert_eq!(state.home.score, 3);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Missed { .. })));
    }

    #[test]
    fn test_violation_skips_physics() {
        let mut state = GameState::new(GameMode::Regular);
        state.shot_clock = 0.001;
        let events = tick(
            &mut state,
            &TickInput {
                shoot: true,
                ..Default::default()
            },
            FRAME_DT,
        );
        assert!(events.contains(&GameEvent::ShotClockViolation));
        assert!(!state.ball.flying);
        assert_eq!(state.ball.pos, BALL_HOME);
        assert_eq!(state.shot_clock, SHOT_CLOCK_SECS);
    }

    #[test]
    fn test_input_ignored_after_round_end() {
        let mut state = GameState::new(GameMode::Challenge);
        state.shot_clock = 0.001;
        run(&mut state, 1);
        assert!(state.round_ended());

        let events = tick(
            &mut state,
            &TickInput {
                shoot: true,
                power_delta: 5,
                ..Default::default()
            },
            FRAME_DT,
        );
        assert!(events.is_empty());
        assert!(!state.ball.flying);
        assert_eq!(state.power, POWER_DEFAULT);
    }

    #[test]
    fn test_free_throw_cycle() {
        let mut state = GameState::new(GameMode::Free);
        let start = state.ball.pos;
        let events = {
            let mut ev = tick(
                &mut state,
                &TickInput {
                    shoot: true,
                    ..Default::default()
                },
                FRAME_DT,
            );
            ev.extend(run(&mut state, 600));
            ev
        };
        assert!(!state.ball.flying);
        assert_eq!(state.ball.pos, start);
        assert!(events.contains(&GameEvent::FreeThrowReset { side: Side::Guest }));
        assert_eq!(state.shot_clock, 0.0);
    }

    #[test]
    fn test_wind_controls() {
        let mut state = GameState::new(GameMode::Regular);
        tick(
            &mut state,
            &TickInput {
                toggle_wind: true,
                wind_delta: 30,
                wind_direction: Some(WindDirection::South),
                ..Default::default()
            },
            FRAME_DT,
        );
        assert!(state.wind.enabled);
        assert_eq!(state.wind.intensity, 30);
        assert_eq!(state.wind.direction, WindDirection::South);
    }

    #[test]
    fn test_extreme_deltas_clamp() {
        let mut state = GameState::new(GameMode::Regular);
        let max = TickInput {
            power_delta: i32::MAX,
            wind_delta: i32::MAX,
            ..Default::default()
        };
        tick(&mut state, &max, FRAME_DT);
        tick(&mut state, &max, FRAME_DT);
        assert_eq!(state.power, POWER_MAX);
        assert_eq!(state.wind.intensity, 100);

        let min = TickInput {
            power_delta: i32::MIN,
            wind_delta: i32::MIN,
            ..Default::default()
        };
        tick(&mut state, &min, FRAME_DT);
        assert_eq!(state.power, 0);
        assert_eq!(state.wind.intensity, 0);
    }

    #[test]
    fn test_non_finite_nudge_leaves_ball() {
        let mut state = GameState::new(GameMode::Regular);
        tick(
            &mut state,
            &TickInput {
                nudge: Some(Vec2::new(f32::NAN, 1.0)),
                ..Default::default()
            },
            FRAME_DT,
        );
        assert_eq!(state.ball.pos, BALL_HOME);
    }

    /// Launch the ball from `pos` with `vel` as if mid-shot
    fn throw(state: &mut GameState, pos: Vec3, vel: Vec3) {
        state.ball.pos = pos;
        state.ball.vel = vel;
        state.ball.flying = true;
        state.trial.last_y = pos.y;
    }

    fn tick_until_board_hit(state: &mut GameState) -> bool {
        for _ in 0..30 {
            let events = tick(state, &TickInput::default(), FRAME_DT);
            if events.iter().any(|e| matches!(e, GameEvent::BackboardHit { .. })) {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_board_strike_refreshes_regular_clock() {
        let mut state = GameState::new(GameMode::Regular);
        state.shot_clock = 5.0;
        throw(&mut state, Vec3::new(13.0, 3.5, 0.0), Vec3::new(6.0, 0.0, 0.0));

        assert!(tick_until_board_hit(&mut state));
        assert_eq!(state.shot_clock, SHOT_CLOCK_SECS);
        assert!(state.ball.vel.x < 0.0);
    }

    #[test]
    fn test_board_strike_leaves_challenge_clock() {
        let mut state = GameState::new(GameMode::Challenge);
        state.shot_clock = 30.0;
        throw(&mut state, Vec3::new(13.0, 3.5, 0.0), Vec3::new(6.0, 0.0, 0.0));

        assert!(tick_until_board_hit(&mut state));
        assert!(state.shot_clock < 30.0);
    }

    #[test]
    fn test_low_ball_hits_pole() {
        let mut state = GameState::new(GameMode::Regular);
        throw(&mut state, Vec3::new(13.4, 1.5, 0.0), Vec3::new(5.0, 0.0, 0.0));

        let mut events = Vec::new();
        for _ in 0..10 {
            events.extend(tick(&mut state, &TickInput::default(), FRAME_DT));
        }
        assert!(events.iter().any(|e| matches!(e, GameEvent::PoleHit { .. })));
        assert!(state.ball.vel.x < 0.0);
        assert!(state.ball.pos.x <= POLE_X - POLE_RADIUS - BALL_RADIUS + 1e-4);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(GameMode::Regular);
        let mut b = GameState::new(GameMode::Regular);
        let inputs = [
            TickInput {
                power_delta: 23,
                ..Default::default()
            },
            TickInput {
                shoot: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..50 {
            for input in &inputs {
                let ea = tick(&mut a, input, FRAME_DT);
                let eb = tick(&mut b, input, FRAME_DT);
                assert_eq!(ea, eb);
            }
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.home, b.home);
    }
}
