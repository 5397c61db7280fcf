//! Sound cues derived from simulation events
//!
//! The director turns [`GameEvent`]s into named cues with a volume and a
//! playback rate. Playback itself is a sink; failures there are logged and
//! never reach the simulation.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Ground impact speed that maps to full ground-hit volume
const GROUND_FULL_SPEED: f32 = 3.0;
/// Backboard impact speed that maps to full volume
const BOARD_FULL_SPEED: f32 = 8.0;
/// Minimum sim time between backboard cues
pub const BACKBOARD_COOLDOWN_MS: f64 = 80.0;

/// Named sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKind {
    RimHit,
    GroundHit,
    BackboardHit,
    Score,
}

impl SoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKind::RimHit => "rim",
            SoundKind::GroundHit => "ground",
            SoundKind::BackboardHit => "backboard",
            SoundKind::Score => "score",
        }
    }
}

/// A single triggered sound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundCue {
    pub kind: SoundKind,
    /// Gain after settings are applied (0.0 - 1.0)
    pub volume: f32,
    /// Playback rate multiplier (1.0 = recorded pitch)
    pub rate: f32,
}

/// Something that can play cues (speakers, a log, a test recorder)
pub trait AudioSink {
    fn play(&mut self, cue: &SoundCue) -> Result<(), String>;
}

/// Sink that only logs what would be played
#[derive(Debug, Default)]
pub struct LogAudioSink;

impl AudioSink for LogAudioSink {
    fn play(&mut self, cue: &SoundCue) -> Result<(), String> {
        log::debug!(
            "sfx {} vol={:.2} rate={:.2}",
            cue.kind.as_str(),
            cue.volume,
            cue.rate
        );
        Ok(())
    }
}

/// Maps events to cues
#[derive(Debug, Clone)]
pub struct AudioDirector {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Sim time of the last backboard cue
    last_backboard_ms: Option<f64>,
}

impl Default for AudioDirector {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AudioDirector {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            last_backboard_ms: None,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cue for one event, if it has a sound. Updates the backboard rate limiter.
    pub fn cue_for(&mut self, event: &GameEvent) -> Option<SoundCue> {
        let (kind, volume, rate) = match *event {
            GameEvent::RimHit { .. } => (SoundKind::RimHit, 1.0, 1.0),
            GameEvent::Scored { .. } => (SoundKind::Score, 1.0, 1.0),
            GameEvent::GroundHit { speed, bounces } => {
                let (volume, rate) = ground_hit_shape(speed, bounces);
                (SoundKind::GroundHit, volume, rate)
            }
            GameEvent::BackboardHit {
                impact_speed,
                time_ms,
                ..
            } => {
                if let Some(last) = self.last_backboard_ms {
                    if time_ms - last < BACKBOARD_COOLDOWN_MS {
                        return None;
                    }
                }
                self.last_backboard_ms = Some(time_ms);
                let (volume, rate) = backboard_hit_shape(impact_speed);
                (SoundKind::BackboardHit, volume, rate)
            }
            _ => return None,
        };

        let volume = volume * self.effective_volume();
        if volume <= 0.0 {
            return None;
        }
        Some(SoundCue { kind, volume, rate })
    }

    /// Play every cue the events produce. Sink errors are logged and skipped.
    pub fn dispatch(&mut self, events: &[GameEvent], sink: &mut dyn AudioSink) -> usize {
        let mut played = 0;
        for event in events {
            let Some(cue) = self.cue_for(event) else {
                continue;
            };
            match sink.play(&cue) {
                Ok(()) => played += 1,
                Err(e) => log::warn!("Failed to play {}: {}", cue.kind.as_str(), e),
            }
        }
        played
    }
}

/// Volume and rate for a floor bounce. Harder bounces are louder; repeated
/// bounces climb in pitch.
pub fn ground_hit_shape(speed: f32, bounces: u32) -> (f32, f32) {
    let norm = (speed / GROUND_FULL_SPEED).min(1.0);
    let volume = norm.powf(0.7);
    let rate = 1.0 + 0.3 * (speed / GROUND_FULL_SPEED) + 0.2 * (1.0 - (-(bounces as f32) / 5.0).exp());
    (volume, rate)
}

/// Volume and rate for a backboard impact
pub fn backboard_hit_shape(impact_speed: f32) -> (f32, f32) {
    let norm = (impact_speed / BOARD_FULL_SPEED).min(1.0);
    (norm.powf(0.75), 0.95 + 0.25 * norm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Side;

    #[derive(Default)]
    struct Recorder {
        cues: Vec<SoundCue>,
        fail: bool,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: &SoundCue) -> Result<(), String> {
            if self.fail {
                return Err("device lost".into());
            }
            self.cues.push(*cue);
            Ok(())
        }
    }

    fn unity() -> AudioDirector {
        let mut director = AudioDirector::default();
        director.set_master_volume(1.0);
        director.set_sfx_volume(1.0);
        director
    }

    fn board(time_ms: f64) -> GameEvent {
        GameEvent::BackboardHit {
            hoop: Side::Home,
            impact_speed: 8.0,
            time_ms,
        }
    }

    #[test]
    fn test_ground_shape() {
        let (vol, rate) = ground_hit_shape(3.0, 0);
        assert!((vol - 1.0).abs() < 1e-6);
        assert!((rate - 1.3).abs() < 1e-6);

        let (soft, _) = ground_hit_shape(0.75, 0);
        assert!(soft < 1.0 && soft > 0.0);

        // Pitch climbs with bounce count
        let (_, r1) = ground_hit_shape(1.0, 1);
        let (_, r5) = ground_hit_shape(1.0, 5);
        assert!(r5 > r1);
    }

    #[test]
    fn test_backboard_rate_limited() {
        let mut director = unity();
        assert!(director.cue_for(&board(0.0)).is_some());
        assert!(director.cue_for(&board(50.0)).is_none());
        assert!(director.cue_for(&board(79.9)).is_none());
        assert!(director.cue_for(&board(80.0)).is_some());
    }

    #[test]
    fn test_full_volume_cues() {
        let mut director = unity();
        let cue = director
            .cue_for(&GameEvent::RimHit {
                hoop: Side::Guest,
                impact_speed: 0.3,
            })
            .unwrap();
        assert_eq!(cue.kind, SoundKind::RimHit);
        assert_eq!(cue.volume, 1.0);
        assert!(director.cue_for(&GameEvent::BallReset).is_none());
    }

    #[test]
    fn test_settings_scale_volume() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Default::default()
        };
        let rim = GameEvent::RimHit {
            hoop: Side::Home,
            impact_speed: 2.0,
        };
        let cue = AudioDirector::from_settings(&settings).cue_for(&rim).unwrap();
        assert!((cue.volume - 0.25).abs() < 1e-6);

        let muted = Settings {
            muted: true,
            ..settings
        };
        assert!(AudioDirector::from_settings(&muted).cue_for(&rim).is_none());
    }

    #[test]
    fn test_mute_silences() {
        let mut director = unity();
        director.set_muted(true);
        let events = [board(0.0), GameEvent::RimHit {
            hoop: Side::Home,
            impact_speed: 2.0,
        }];
        let mut sink = Recorder::default();
        assert_eq!(director.dispatch(&events, &mut sink), 0);
        assert!(sink.cues.is_empty());
    }

    #[test]
    fn test_sink_failure_swallowed() {
        let mut director = unity();
        let mut sink = Recorder {
            fail: true,
            ..Default::default()
        };
        let events = [GameEvent::Scored {
            side: Side::Home,
            points: 2,
            swish: false,
            combo: 1,
        }];
        assert_eq!(director.dispatch(&events, &mut sink), 0);
    }
}
