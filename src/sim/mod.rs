//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep and fixed substep count
//! - Fixed collision resolution order
//! - No rendering, audio or storage dependencies (side effects are events)

pub mod clock;
pub mod collision;
pub mod event;
pub mod geometry;
pub mod integrator;
pub mod scoring;
pub mod shot;
pub mod state;
pub mod tick;

pub use clock::{
    ClockOutcome, close_leaderboard, end_challenge, format_clock, set_mode, start_challenge_round,
    submit_challenge_score,
};
pub use collision::{ContactReport, PIPELINE, ResolveContext, Stage, resolve};
pub use event::GameEvent;
pub use geometry::{Backboard, Court, HoopRim, Pole};
pub use state::{
    Ball, ChallengePhase, GameMode, GameState, RimFire, ShotTrial, Side, TeamStats, TrailPoint,
    Wind, WindDirection,
};
pub use tick::{TickInput, tick};
