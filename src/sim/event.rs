//! Domain events emitted by a tick
//!
//! The simulation never talks to audio, HUD or storage directly. Each tick
//! appends events in the order they happened; sinks consume them afterwards.

use serde::{Deserialize, Serialize};

use super::state::{GameMode, Side};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball released toward `side`'s hoop
    ShotReleased { side: Side, power: u8 },
    /// Inbound rim contact (at most one per resolver pass)
    RimHit { hoop: Side, impact_speed: f32 },
    /// Inbound backboard contact
    BackboardHit {
        hoop: Side,
        impact_speed: f32,
        /// Sim time of the contact substep
        time_ms: f64,
    },
    /// Floor bounce; `speed` is the rebound vertical speed
    GroundHit { speed: f32, bounces: u32 },
    /// Contact with a support pole
    PoleHit { impact_speed: f32 },
    /// A make credited to `side`
    Scored {
        side: Side,
        points: u32,
        swish: bool,
        combo: u32,
    },
    /// Ball came to rest without scoring
    Missed { side: Side },
    /// Free mode: ball returned to the free-throw line
    FreeThrowReset { side: Side },
    /// Regular mode clock expired
    ShotClockViolation,
    /// Challenge clock expired
    ChallengeEnded { final_score: u32 },
    /// Ball returned to its resting spot
    BallReset,
    /// Mode switched (always followed by a full reset)
    ModeChanged { mode: GameMode },
}
