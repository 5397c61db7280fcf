//! HUD text model
//!
//! Builds the strings a scoreboard shows from [`GameState`] and turns
//! events into timed shot messages. Drawing is up to a [`HudSink`].

use crate::sim::{GameEvent, GameMode, GameState, Side, TeamStats, format_clock};

/// How long a shot message stays up
pub const MESSAGE_SECS: f32 = 4.0;

/// One team's scoreboard line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamLine {
    /// Zero-padded to two digits
    pub score: String,
    pub attempts: u32,
    pub made: u32,
    /// Make percentage with one decimal
    pub pct: String,
    pub combo: u32,
}

impl TeamLine {
    pub fn from_stats(stats: &TeamStats) -> Self {
        Self {
            score: format!("{:02}", stats.score),
            attempts: stats.attempts,
            made: stats.made,
            pct: format!("{:.1}", stats.make_pct()),
            combo: stats.combo,
        }
    }
}

/// Everything the scoreboard shows for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudSnapshot {
    pub mode: GameMode,
    pub clock: String,
    pub home: TeamLine,
    pub guest: TeamLine,
    pub power: u8,
    /// e.g. "40% →" or "0% (off)"
    pub wind: String,
}

impl HudSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let wind = if state.wind.enabled {
            format!("{}% {}", state.wind.intensity, state.wind.direction.arrow())
        } else {
            format!("{}% (off)", state.wind.intensity)
        };
        Self {
            mode: state.mode,
            clock: format_clock(state.mode, state.shot_clock),
            home: TeamLine::from_stats(&state.home),
            guest: TeamLine::from_stats(&state.guest),
            power: state.power,
            wind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageColor {
    Green,
    Red,
}

impl MessageColor {
    pub fn hex(&self) -> &'static str {
        match self {
            MessageColor::Green => "#2ecc71",
            MessageColor::Red => "#e74c3c",
        }
    }
}

/// Where a message is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAnchor {
    /// Under that team's score
    Team(Side),
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShotMessage {
    pub text: String,
    pub anchor: MessageAnchor,
    pub color: MessageColor,
    /// Seconds left on screen
    pub remaining: f32,
}

impl ShotMessage {
    /// Message for an event, if it has one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        let (text, anchor, color) = match *event {
            GameEvent::Scored { side, points, .. } => (
                format!("SHOT MADE! (+{})", points),
                MessageAnchor::Team(side),
                MessageColor::Green,
            ),
            GameEvent::Missed { side } => (
                "MISSED SHOT".to_string(),
                MessageAnchor::Team(side),
                MessageColor::Red,
            ),
            GameEvent::ShotClockViolation => (
                "SHOT CLOCK VIOLATION IS CALLED!".to_string(),
                MessageAnchor::Center,
                MessageColor::Red,
            ),
            _ => return None,
        };
        Some(Self {
            text,
            anchor,
            color,
            remaining: MESSAGE_SECS,
        })
    }
}

/// Active messages, at most one per anchor. A newer message replaces an
/// older one in the same place.
#[derive(Debug, Clone, Default)]
pub struct MessageBoard {
    messages: Vec<ShotMessage>,
}

impl MessageBoard {
    pub fn push_events(&mut self, events: &[GameEvent]) {
        for msg in events.iter().filter_map(ShotMessage::from_event) {
            self.messages.retain(|m| m.anchor != msg.anchor);
            self.messages.push(msg);
        }
    }

    /// Age messages by `dt` and drop expired ones
    pub fn update(&mut self, dt: f32) {
        for msg in &mut self.messages {
            msg.remaining -= dt;
        }
        self.messages.retain(|m| m.remaining > 0.0);
    }

    pub fn active(&self) -> &[ShotMessage] {
        &self.messages
    }
}

/// Scoreboard output
pub trait HudSink {
    fn draw(&mut self, hud: &HudSnapshot, messages: &[ShotMessage]);
}

/// Logs the scoreboard whenever it changes
#[derive(Debug, Default)]
pub struct LogHudSink {
    last: Option<HudSnapshot>,
    last_messages: Vec<String>,
}

impl HudSink for LogHudSink {
    fn draw(&mut self, hud: &HudSnapshot, messages: &[ShotMessage]) {
        let texts: Vec<String> = messages.iter().map(|m| m.text.clone()).collect();
        if self.last.as_ref() == Some(hud) && texts == self.last_messages {
            return;
        }
        log::trace!(
            "[{}] {} HOME {} ({}/{} {}%) GUEST {} ({}/{} {}%) power {} wind {}",
            hud.mode.as_str(),
            hud.clock,
            hud.home.score,
            hud.home.made,
            hud.home.attempts,
            hud.home.pct,
            hud.guest.score,
            hud.guest.made,
            hud.guest.attempts,
            hud.guest.pct,
            hud.power,
            hud.wind
        );
        for text in texts.iter().filter(|t| !self.last_messages.contains(t)) {
            log::info!("{}", text);
        }
        self.last = Some(hud.clone());
        self.last_messages = texts;
    }
}
