//! Shot release and pre-shot controls (power, nudging)

use glam::Vec3;

use super::event::GameEvent;
use super::state::{GameMode, GameState, ShotTrial, Side};
use crate::consts::*;

/// Hoop nearest to `pos`. An exact tie goes to the left (home) hoop.
pub fn nearest_hoop(state: &GameState, pos: Vec3) -> Side {
    let dist_left = pos.distance(state.court.rims[0].center);
    let dist_right = pos.distance(state.court.rims[1].center);
    if dist_left <= dist_right {
        Side::Home
    } else {
        Side::Guest
    }
}

/// Launch velocity for a shot from `from` toward `target` at `power` percent
pub fn launch_velocity(from: Vec3, target: Vec3, power: u8) -> Vec3 {
    let scale = power.min(POWER_MAX) as f32 / 100.0;
    let dir = crate::horizontal_offset(from, target).normalize_or_zero();
    let mut vel = dir * (SHOT_HORIZONTAL_SPEED * scale);
    vel.y = SHOT_BASE_LIFT + SHOT_POWER_LIFT * scale;
    vel
}

/// Release the ball toward the nearer hoop. No-op while the ball is in the air.
///
/// Returns the side that shot, if a shot was taken.
pub fn shoot(state: &mut GameState, events: &mut Vec<GameEvent>) -> Option<Side> {
    if state.ball.flying {
        return None;
    }

    let side = nearest_hoop(state, state.ball.pos);
    state.last_shot_side = Some(side);
    state.trial = ShotTrial::begin(state.ball.pos.y, state.mode == GameMode::Free);

    let target = state.court.rims[side.hoop_index()].center;
    state.ball.vel = launch_velocity(state.ball.pos, target, state.power);
    state.ball.flying = true;
    state.ball.clear_trail();
    state.ball.record_trail();

    state.stats_mut(side).attempts += 1;
    events.push(GameEvent::ShotReleased {
        side,
        power: state.power,
    });
    log::debug!(
        "{} shoots at power {} from ({:.2}, {:.2})",
        side.as_str(),
        state.power,
        state.ball.pos.x,
        state.ball.pos.z
    );
    Some(side)
}

/// Step power by `delta`, clamped to 0..=100
pub fn adjust_power(state: &mut GameState, delta: i32) {
    let next = (state.power as i32).saturating_add(delta).clamp(0, POWER_MAX as i32);
    state.power = next as u8;
}

/// Slide a resting ball along the floor. Ignored in free mode, mid-flight,
/// or for a non-finite direction.
pub fn nudge_ball(state: &mut GameState, dx: f32, dz: f32) {
    let dir = glam::Vec2::new(dx, dz);
    if state.ball.flying || state.mode == GameMode::Free || !dir.is_finite() {
        return;
    }
    let step = dir.clamp_length_max(1.0) * BALL_NUDGE_STEP;
    state.ball.pos.x += step.x;
    state.ball.pos.z += step.y;
    state.ball.clamp_to_court();
    state.trial.last_y = state.ball.pos.y;
}
