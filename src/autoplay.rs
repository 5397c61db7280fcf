//! Scripted player for headless runs
//!
//! A small state machine that produces one [`TickInput`] per frame:
//! - waits a random number of frames after the ball comes to rest
//! - optionally walks the ball a few steps along the floor
//! - steps power toward an estimated value (plus some human error)
//! - shoots

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::shot::{launch_velocity, nearest_hoop};
use crate::sim::{GameMode, GameState, TickInput};

/// Frames to wait between shots (min, max)
const IDLE_FRAMES: (u32, u32) = (10, 45);
/// Maximum power error added to the estimate
const POWER_JITTER: i32 = 4;

#[derive(Debug, Clone)]
struct ShotPlan {
    nudge: Vec2,
    nudge_frames: u32,
    target_power: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    rng: Pcg32,
    idle: u32,
    plan: Option<ShotPlan>,
    /// Shots released so far
    pub shots: u32,
}

impl AutoPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            idle: 0,
            plan: None,
            shots: 0,
        }
    }

    /// Input for the next frame
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        if state.round_ended() || state.ball.flying {
            return TickInput::default();
        }
        if self.idle > 0 {
            self.idle -= 1;
            return TickInput::default();
        }

        let plan = match self.plan.take() {
            Some(plan) => plan,
            None => self.new_plan(state.mode),
        };
        let (input, plan) = self.advance_plan(state, plan);
        self.plan = plan;
        input
    }

    fn new_plan(&mut self, mode: GameMode) -> ShotPlan {
        // Free throws are taken from the line
        let nudge_frames = if mode == GameMode::Free || self.rng.random_bool(0.5) {
            0
        } else {
            self.rng.random_range(5..40)
        };
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        ShotPlan {
            nudge: Vec2::from_angle(angle),
            nudge_frames,
            target_power: None,
        }
    }

    fn advance_plan(&mut self, state: &GameState, mut plan: ShotPlan) -> (TickInput, Option<ShotPlan>) {
        if plan.nudge_frames > 0 {
            plan.nudge_frames -= 1;
            let input = TickInput {
                nudge: Some(plan.nudge),
                ..Default::default()
            };
            return (input, Some(plan));
        }

        let target = match plan.target_power {
            Some(p) => p,
            None => {
                let jitter = self.rng.random_range(-POWER_JITTER..=POWER_JITTER);
                let p = (estimate_power(state) as i32 + jitter).clamp(0, POWER_MAX as i32) as u8;
                plan.target_power = Some(p);
                p
            }
        };

        if state.power != target {
            let input = TickInput {
                power_delta: (target as i32 - state.power as i32).signum(),
                ..Default::default()
            };
            return (input, Some(plan));
        }

        self.shots += 1;
        self.idle = self.rng.random_range(IDLE_FRAMES.0..=IDLE_FRAMES.1);
        let input = TickInput {
            shoot: true,
            ..Default::default()
        };
        (input, None)
    }
}

/// Power whose drag-free arc comes down through rim height closest to the
/// center of the nearer rim
pub fn estimate_power(state: &GameState) -> u8 {
    let from = state.ball.pos;
    let rim = state.court.rims[nearest_hoop(state, from).hoop_index()];
    let dist = crate::horizontal_distance(from, rim.center);
    let rise = rim.height() - from.y;
    let g = -GRAVITY.y;

    let range_at = |power: u8| -> Option<f32> {
        let v = launch_velocity(from, rim.center, power);
        let disc = v.y * v.y - 2.0 * g * rise;
        if disc < 0.0 {
            return None;
        }
        let t = (v.y + disc.sqrt()) / g;
        Some(Vec2::new(v.x, v.z).length() * t)
    };

    (0..=POWER_MAX)
        .filter_map(|p| range_at(p).map(|r| (p, (r - dist).abs())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(p, _)| p)
        .unwrap_or(POWER_DEFAULT)
}
