//! Hoopsim - A deterministic basketball shooting simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, collisions, scoring, clock)
//! - `highscores`: Challenge leaderboard
//! - `persistence`: Key/value storage backends
//! - `settings`: Player preferences
//! - `audio`: Sound cue selection from simulation events
//! - `ui`: HUD text and shot messages
//! - `renderer`: Per-frame snapshot handed to whatever draws the court
//! - `autoplay`: Seeded demo player

pub mod audio;
pub mod autoplay;
pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::{Leaderboard, LeaderboardEntry};
pub use settings::Settings;

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Nominal frame duration (seconds)
    pub const FRAME_DT: f32 = 0.016;
    /// Physics substeps per frame
    pub const PHYSICS_SUBSTEPS: u32 = 3;
    /// Substep duration
    pub const SUBSTEP_DT: f32 = FRAME_DT / PHYSICS_SUBSTEPS as f32;

    pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.8, 0.0);
    /// Wind acceleration at 100% intensity (units/s²)
    pub const MAX_WIND_ACCEL: f32 = 5.0;

    /// Ball
    pub const BALL_RADIUS: f32 = 0.25;
    /// Floor height for the ball center
    pub const GROUND_HEIGHT: f32 = 0.58;
    /// Canonical resting spot (center court)
    pub const BALL_HOME: Vec3 = Vec3::new(0.0, GROUND_HEIGHT, 0.0);
    /// Distance moved per frame by a nudge input
    pub const BALL_NUDGE_STEP: f32 = 0.1;

    /// Court bounds (ball center)
    pub const COURT_X_MIN: f32 = -14.0;
    pub const COURT_X_MAX: f32 = 14.0;
    pub const COURT_Z_MIN: f32 = -7.0;
    pub const COURT_Z_MAX: f32 = 7.0;
    /// Free-throw spots sit at ±FT_LINE_X
    pub const FT_LINE_X: f32 = 10.0;

    /// Rim (torus)
    pub const RIM_HEIGHT: f32 = 3.05;
    pub const RIM_CENTER_X: f32 = 13.35;
    pub const RIM_RADIUS: f32 = 0.45;
    pub const RIM_TUBE_RADIUS: f32 = 0.03;
    pub const RIM_RESTITUTION: f32 = 0.85;
    /// Minimum outward speed after a rim hit (prevents sticking)
    pub const RIM_MIN_BOUNCE_SPEED: f32 = 1.6;
    pub const RIM_TANGENTIAL_DAMPING: f32 = 0.90;
    pub const RIM_SLOP: f32 = 0.001;
    /// Baumgarte positional correction fraction
    pub const RIM_POSITION_CORRECTION: f32 = 0.8;

    /// Net drag zone
    pub const NET_DEPTH: f32 = 0.9;
    pub const NET_MARGIN: f32 = 0.15;
    pub const NET_DAMPING: f32 = 0.96;
    pub const NET_DOWNWARD_PULL: f32 = 0.2;

    /// Backboard
    pub const BOARD_X: f32 = 13.8;
    pub const BOARD_THICKNESS: f32 = 0.02;
    pub const BOARD_HALF_WIDTH: f32 = 1.82 / 2.0;
    pub const BOARD_HALF_HEIGHT: f32 = 1.06 / 2.0;
    /// Board center sits this far above the rim
    pub const BOARD_RISE: f32 = BOARD_HALF_HEIGHT - 0.1;
    pub const BOARD_RESTITUTION: f32 = 0.5;

    /// Support poles stand on the court edge just behind each backboard, so
    /// a low ball pinned at the end line still reaches them
    pub const POLE_X: f32 = COURT_X_MAX;
    pub const POLE_RADIUS: f32 = 0.1;

    /// Floor
    pub const GROUND_RESTITUTION: f32 = 0.6;
    pub const GROUND_FRICTION: f32 = 0.8;
    /// Below this speed after a floor bounce the ball comes to rest
    pub const BALL_STOP_SPEED: f32 = 0.2;

    /// Shot power
    pub const POWER_DEFAULT: u8 = 50;
    pub const POWER_MAX: u8 = 100;
    pub const SHOT_HORIZONTAL_SPEED: f32 = 12.0;
    pub const SHOT_BASE_LIFT: f32 = 6.0;
    pub const SHOT_POWER_LIFT: f32 = 4.0;

    /// Scoring
    pub const BASE_POINTS: u32 = 2;
    pub const SWISH_BONUS: u32 = 1;
    pub const COMBO_BONUS: u32 = 1;

    /// Clocks (seconds)
    pub const SHOT_CLOCK_SECS: f32 = 24.0;
    pub const CHALLENGE_SECS: f32 = 60.0;

    /// Rim fire effect duration after a make (ms)
    pub const RIM_FIRE_MS: f32 = 2000.0;
    /// Max trail points kept for rendering
    pub const TRAIL_LENGTH: usize = 80;

    /// Lengths below this are treated as zero
    pub const GEOM_EPSILON: f32 = 1e-6;
}

/// Horizontal (xz-plane) offset from `from` to `to`
#[inline]
pub fn horizontal_offset(from: Vec3, to: Vec3) -> Vec3 {
    Vec3::new(to.x - from.x, 0.0, to.z - from.z)
}

/// Horizontal (xz-plane) distance between two points
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    horizontal_offset(a, b).length()
}

/// Lift a ground-plane direction (x, z) into 3D with zero height
#[inline]
pub fn ground_to_world(dir: Vec2) -> Vec3 {
    Vec3::new(dir.x, 0.0, dir.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Vec3::new(0.0, 10.0, 0.0);
        let b = Vec3::new(3.0, -5.0, 4.0);
        assert!((horizontal_distance(a, b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_substep_dt() {
        assert!((consts::SUBSTEP_DT * 3.0 - consts::FRAME_DT).abs() < 1e-7);
    }
}
