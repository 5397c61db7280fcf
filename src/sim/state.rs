//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one `GameState` context that is
//! passed explicitly to every operation.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::geometry::Court;
use crate::consts::*;

/// Which team / hoop. Home shoots at the left hoop, Guest at the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Guest,
}

impl Side {
    pub fn from_hoop_index(idx: usize) -> Self {
        if idx == 0 { Side::Home } else { Side::Guest }
    }

    pub fn hoop_index(self) -> usize {
        match self {
            Side::Home => 0,
            Side::Guest => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Guest => "guest",
        }
    }

    /// Free-throw spot for this side's hoop
    pub fn free_throw_spot(self) -> Vec3 {
        let x = match self {
            Side::Home => -FT_LINE_X,
            Side::Guest => FT_LINE_X,
        };
        Vec3::new(x, GROUND_HEIGHT, 0.0)
    }
}

/// Game mode, each with its own shot-clock semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// 24 s shot clock, refreshed by rim/backboard contact
    #[default]
    Regular,
    /// 60 s timed round ending in a leaderboard entry
    Challenge,
    /// No clock; the ball returns to the free-throw line after each shot
    Free,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Regular => "regular",
            GameMode::Challenge => "challenge",
            GameMode::Free => "free",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Some(GameMode::Regular),
            "challenge" => Some(GameMode::Challenge),
            "free" | "freethrow" | "free-throw" => Some(GameMode::Free),
            _ => None,
        }
    }

    /// Clock value after a reset into this mode
    pub fn clock_start(&self) -> f32 {
        match self {
            GameMode::Regular => SHOT_CLOCK_SECS,
            GameMode::Challenge => CHALLENGE_SECS,
            GameMode::Free => 0.0,
        }
    }
}

/// Challenge round sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChallengePhase {
    /// Clock running (also the idle value outside challenge mode)
    #[default]
    Running,
    /// Round over, waiting for the player's name
    AwaitingName { final_score: u32 },
    /// Name submitted, ranked list on display
    ShowingLeaderboard,
}

impl ChallengePhase {
    pub fn is_ended(&self) -> bool {
        !matches!(self, ChallengePhase::Running)
    }
}

/// Per-team counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub score: u32,
    pub attempts: u32,
    pub made: u32,
    /// Consecutive makes; zeroed by a miss
    pub combo: u32,
}

impl TeamStats {
    /// Make percentage in [0, 100]
    pub fn make_pct(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            self.made as f32 / self.attempts as f32 * 100.0
        }
    }
}

/// Per-shot bookkeeping. Created at release, replaced at the next shot or reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotTrial {
    pub rim_hits: u32,
    pub backboard_hit: bool,
    pub scored: bool,
    /// Ball height at the end of the previous frame (plane-crossing test)
    pub last_y: f32,
    /// Free mode: send the ball to the free-throw line when it lands
    pub awaiting_free_throw_reset: bool,
    /// Swallows the miss event until the end of the tick after a reset
    pub suppress_miss: bool,
    /// Floor bounces this trial (audio pitch)
    pub ground_bounces: u32,
}

impl ShotTrial {
    /// Fresh trial at release
    pub fn begin(start_y: f32, free_throw: bool) -> Self {
        Self {
            last_y: start_y,
            awaiting_free_throw_reset: free_throw,
            ..Default::default()
        }
    }

    /// Trial state right after a ball reset
    pub fn after_reset(start_y: f32) -> Self {
        Self {
            last_y: start_y,
            suppress_miss: true,
            ..Default::default()
        }
    }

    /// No rim and no board contact
    pub fn is_clean(&self) -> bool {
        self.rim_hits == 0 && !self.backboard_hit
    }
}

/// Cardinal wind direction on the court plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindDirection {
    /// Toward -z
    North,
    /// Toward +z
    South,
    /// Toward -x
    West,
    /// Toward +x
    #[default]
    East,
}

impl WindDirection {
    pub fn unit(&self) -> Vec2 {
        match self {
            WindDirection::North => Vec2::new(0.0, -1.0),
            WindDirection::South => Vec2::new(0.0, 1.0),
            WindDirection::West => Vec2::new(-1.0, 0.0),
            WindDirection::East => Vec2::new(1.0, 0.0),
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            WindDirection::North => "↑",
            WindDirection::South => "↓",
            WindDirection::West => "←",
            WindDirection::East => "→",
        }
    }
}

/// Optional constant wind while the ball is airborne
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub enabled: bool,
    /// Percent of MAX_WIND_ACCEL, 0..=100
    pub intensity: u8,
    pub direction: WindDirection,
}

impl Wind {
    /// Current wind acceleration (zero when disabled)
    pub fn acceleration(&self) -> Vec3 {
        if !self.enabled {
            return Vec3::ZERO;
        }
        let frac = self.intensity.min(100) as f32 / 100.0;
        crate::ground_to_world(self.direction.unit()) * MAX_WIND_ACCEL * frac
    }
}

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec3,
    pub speed: f32,
}

/// Ball state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
    pub radius: f32,
    pub flying: bool,
    /// Trail history for rendering (oldest first)
    #[serde(skip)]
    pub trail: Vec<TrailPoint>,
}

impl Default for Ball {
    fn default() -> Self {
        Self::at_rest(BALL_HOME)
    }
}

impl Ball {
    pub fn at_rest(pos: Vec3) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            radius: BALL_RADIUS,
            flying: false,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Stop in place
    pub fn halt(&mut self) {
        self.vel = Vec3::ZERO;
        self.flying = false;
    }

    /// Record current position to trail (call once per frame while flying)
    pub fn record_trail(&mut self) {
        self.trail.push(TrailPoint {
            pos: self.pos,
            speed: self.vel.length(),
        });
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    /// Clamp to the court; a flying ball keeps its whole body inside
    pub fn clamp_to_court(&mut self) {
        let inset = if self.flying { self.radius } else { 0.0 };
        self.pos.x = self.pos.x.clamp(COURT_X_MIN + inset, COURT_X_MAX - inset);
        self.pos.z = self.pos.z.clamp(COURT_Z_MIN + inset, COURT_Z_MAX - inset);
    }
}

/// Celebration effect on a hoop after a make
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RimFire {
    pub active: bool,
    pub ttl_ms: f32,
    /// Seconds since start (drives the flame animation)
    pub elapsed: f32,
}

impl RimFire {
    pub fn start(&mut self, ms: f32) {
        self.active = true;
        self.ttl_ms = ms;
        self.elapsed = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.elapsed += dt;
        self.ttl_ms -= dt * 1000.0;
        if self.ttl_ms <= 0.0 {
            *self = RimFire::default();
        }
    }
}

/// Complete simulation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub court: Court,
    pub ball: Ball,
    pub trial: ShotTrial,
    pub home: TeamStats,
    pub guest: TeamStats,
    pub mode: GameMode,
    /// Seconds remaining
    pub shot_clock: f32,
    pub challenge: ChallengePhase,
    /// Shot power, 0..=100
    pub power: u8,
    pub wind: Wind,
    /// Side of the most recent shot
    pub last_shot_side: Option<Side>,
    pub rim_fire: [RimFire; 2],
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameMode::Regular)
    }
}

impl GameState {
    pub fn new(mode: GameMode) -> Self {
        let mut state = Self {
            court: Court::standard(),
            ball: Ball::default(),
            trial: ShotTrial::default(),
            home: TeamStats::default(),
            guest: TeamStats::default(),
            mode,
            shot_clock: mode.clock_start(),
            challenge: ChallengePhase::Running,
            power: POWER_DEFAULT,
            wind: Wind::default(),
            last_shot_side: None,
            rim_fire: [RimFire::default(); 2],
            time_ticks: 0,
        };
        state.reset_ball();
        state
    }

    pub fn stats(&self, side: Side) -> &TeamStats {
        match side {
            Side::Home => &self.home,
            Side::Guest => &self.guest,
        }
    }

    pub fn stats_mut(&mut self, side: Side) -> &mut TeamStats {
        match side {
            Side::Home => &mut self.home,
            Side::Guest => &mut self.guest,
        }
    }

    /// Combined score of both sides
    pub fn combined_score(&self) -> u32 {
        self.home.score + self.guest.score
    }

    /// Sim time in milliseconds at the start of the current tick
    pub fn time_ms(&self) -> f64 {
        self.time_ticks as f64 * FRAME_DT as f64 * 1000.0
    }

    /// Whether the challenge round is over (always false outside challenge mode)
    pub fn round_ended(&self) -> bool {
        self.mode == GameMode::Challenge && self.challenge.is_ended()
    }

    /// Put the ball back to its resting spot and clear per-shot state.
    ///
    /// Free mode rests at the last shooter's free-throw line, every other
    /// mode at center court. Also restores default power and calms the wind.
    pub fn reset_ball(&mut self) {
        let pos = match self.mode {
            GameMode::Free => self.last_shot_side.unwrap_or(Side::Guest).free_throw_spot(),
            _ => BALL_HOME,
        };
        self.ball.pos = pos;
        self.ball.halt();
        self.ball.clear_trail();
        self.power = POWER_DEFAULT;
        self.trial = ShotTrial::after_reset(pos.y);
        self.wind.enabled = false;
        self.wind.intensity = 0;
    }

    /// Zero both teams' counters
    pub fn reset_stats(&mut self) {
        self.home = TeamStats::default();
        self.guest = TeamStats::default();
    }
}
