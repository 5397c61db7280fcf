//! Per-frame render data
//!
//! The simulation hands a [`FrameSnapshot`] to a [`RenderSink`] once per
//! tick. Nothing flows back.

use glam::Vec3;

use crate::settings::Settings;
use crate::sim::state::TrailPoint;
use crate::sim::{GameState, RimFire, Side};

/// Speed that maps to the hot end of the trail gradient
const TRAIL_HOT_SPEED: f32 = 16.0;

/// A trail vertex ready to draw (newest first)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSample {
    pub pos: Vec3,
    pub width: f32,
    pub color: [f32; 4],
}

/// Rim fire state for one hoop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RimFireView {
    pub hoop: Side,
    /// 1.0 at ignition, falling to 0.0 at expiry
    pub intensity: f32,
    /// Seconds since ignition (flame animation phase)
    pub elapsed: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub ball_pos: Vec3,
    pub ball_radius: f32,
    pub ball_flying: bool,
    pub trail: Vec<TrailSample>,
    pub rim_fire: Vec<RimFireView>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, settings: &Settings) -> Self {
        let trail = if settings.trails {
            trail_samples(&state.ball.trail, state.ball.radius)
        } else {
            Vec::new()
        };
        let rim_fire = if settings.rim_fire_effects {
            state
                .rim_fire
                .iter()
                .enumerate()
                .filter(|(_, fx)| fx.active)
                .map(|(idx, fx)| rim_fire_view(Side::from_hoop_index(idx), fx))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            ball_pos: state.ball.pos,
            ball_radius: state.ball.radius,
            ball_flying: state.ball.flying,
            trail,
            rim_fire,
        }
    }
}

fn rim_fire_view(hoop: Side, fx: &RimFire) -> RimFireView {
    RimFireView {
        hoop,
        intensity: (fx.ttl_ms / crate::consts::RIM_FIRE_MS).clamp(0.0, 1.0),
        elapsed: fx.elapsed,
    }
}

/// Speed-tinted color: orange (slow) through yellow to white (fast)
fn speed_color(speed: f32, alpha: f32) -> [f32; 4] {
    let t = (speed / TRAIL_HOT_SPEED).clamp(0.0, 1.0);
    let (r, g, b) = if t < 0.5 {
        let u = t / 0.5;
        (1.0, 0.45 + 0.4 * u, 0.1)
    } else {
        let u = (t - 0.5) / 0.5;
        (1.0, 0.85 + 0.15 * u, 0.1 + 0.9 * u)
    };
    [r, g, b, alpha]
}

/// Trail points with fading alpha and narrowing width, newest first
pub fn trail_samples(trail: &[TrailPoint], ball_radius: f32) -> Vec<TrailSample> {
    let len = trail.len().max(1) as f32;
    trail
        .iter()
        .rev()
        .enumerate()
        .map(|(i, p)| {
            let t = i as f32 / len;
            TrailSample {
                pos: p.pos,
                width: ball_radius * (1.0 - t * 0.7),
                color: speed_color(p.speed, (1.0 - t) * 0.8),
            }
        })
        .collect()
}

/// Frame output
pub trait RenderSink {
    fn present(&mut self, frame: &FrameSnapshot);
}

/// Counts frames and logs ball pose at trace level
#[derive(Debug, Default)]
pub struct LogRenderSink {
    pub frames: u64,
}

impl RenderSink for LogRenderSink {
    fn present(&mut self, frame: &FrameSnapshot) {
        self.frames += 1;
        if frame.ball_flying {
            log::trace!(
                "frame {} ball ({:.2}, {:.2}, {:.2}) trail {}",
                self.frames,
                frame.ball_pos.x,
                frame.ball_pos.y,
                frame.ball_pos.z,
                frame.trail.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_RADIUS;
    use crate::sim::GameMode;

    #[test]
    fn test_trail_fades_newest_first() {
        let trail: Vec<TrailPoint> = (0..4)
            .map(|i| TrailPoint {
                pos: Vec3::new(i as f32, 1.0, 0.0),
                speed: 5.0,
            })
            .collect();
        let samples = trail_samples(&trail, BALL_RADIUS);
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0].pos.x, 3.0);
        assert!(samples[0].color[3] > samples[3].color[3]);
        assert!(samples[0].width > samples[3].width);
    }

    #[test]
    fn test_settings_gate_effects() {
        let mut state = GameState::new(GameMode::Regular);
        state.rim_fire[1].start(crate::consts::RIM_FIRE_MS);
        state.ball.flying = true;
        state.ball.record_trail();

        let on = FrameSnapshot::capture(&state, &Settings::default());
        assert_eq!(on.trail.len(), 1);
        assert_eq!(on.rim_fire.len(), 1);
        assert_eq!(on.rim_fire[0].hoop, Side::Guest);
        assert_eq!(on.rim_fire[0].intensity, 1.0);

        let off = Settings {
            trails: false,
            rim_fire_effects: false,
            ..Default::default()
        };
        let frame = FrameSnapshot::capture(&state, &off);
        assert!(frame.trail.is_empty());
        assert!(frame.rim_fire.is_empty());
    }
}
