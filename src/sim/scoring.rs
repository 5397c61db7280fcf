//! Make detection and point awards

use super::event::GameEvent;
use super::state::{GameState, Side};
use crate::consts::*;

/// Points for a make: base, +swish when untouched, +1 per consecutive make
/// beyond the first. `combo` already includes this make.
pub fn shot_points(swish: bool, combo: u32) -> u32 {
    let mut points = BASE_POINTS;
    if swish {
        points += SWISH_BONUS;
    }
    if combo > 1 {
        points += (combo - 1) * COMBO_BONUS;
    }
    points
}

/// Hoop the ball just dropped through, if any.
///
/// A make is a downward crossing of the rim plane inside the ring: above
/// the rim last frame, below it now, falling, and horizontally within the
/// ring radius.
pub fn detect_make(state: &GameState, last_y: f32) -> Option<Side> {
    let ball = &state.ball;
    if ball.vel.y >= 0.0 {
        return None;
    }
    state
        .court
        .rims
        .iter()
        .position(|rim| {
            crate::horizontal_distance(ball.pos, rim.center) <= rim.major_radius
                && last_y > rim.height()
                && ball.pos.y < rim.height()
        })
        .map(Side::from_hoop_index)
}

/// Credit at most one make per trial. Returns points awarded.
pub fn check_score(state: &mut GameState, last_y: f32, events: &mut Vec<GameEvent>) -> Option<u32> {
    if state.trial.scored {
        return None;
    }
    let side = detect_make(state, last_y)?;

    state.trial.scored = true;
    let swish = state.trial.is_clean();
    let stats = state.stats_mut(side);
    stats.combo += 1;
    let combo = stats.combo;
    let points = shot_points(swish, combo);
    stats.score += points;
    stats.made += 1;

    state.rim_fire[side.hoop_index()].start(RIM_FIRE_MS);
    events.push(GameEvent::Scored {
        side,
        points,
        swish,
        combo,
    });
    log::debug!(
        "{} scores +{} (swish: {}, combo: {})",
        side.as_str(),
        points,
        swish,
        combo
    );
    Some(points)
}

/// A shot came to rest without a make: the shooter's combo is broken
pub fn register_miss(state: &mut GameState, side: Side) {
    state.stats_mut(side).combo = 0;
}
