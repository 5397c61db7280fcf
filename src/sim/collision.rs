//! Collision detection and response for the ball
//!
//! Runs once per physics substep, after integration. Contacts are resolved in
//! a fixed order given by [`PIPELINE`]: rim, net, backboard, poles, floor.
//! Moving a stage changes behavior (e.g. a rim bounce can carry the ball into
//! the board in the same substep), so the order is part of the contract.
//!
//! Every rigid response only fires on inbound velocity, so running a stage
//! again on an already-resolved, non-penetrating state leaves it unchanged.

use glam::Vec3;

use super::event::GameEvent;
use super::geometry::{Backboard, Court, HoopRim, Pole};
use super::state::{Ball, GameMode, ShotTrial, Side};
use crate::consts::*;

/// A resolution stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Rim,
    Net,
    Backboard,
    Pole,
    Floor,
}

/// Resolution order applied every substep
pub const PIPELINE: [Stage; 5] = [
    Stage::Rim,
    Stage::Net,
    Stage::Backboard,
    Stage::Pole,
    Stage::Floor,
];

/// Read-only inputs a substep needs besides the ball
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext {
    pub mode: GameMode,
    /// Side that took the current shot
    pub shooter: Option<Side>,
    /// Sim time of this substep (ms)
    pub time_ms: f64,
}

/// What happened during one resolver pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactReport {
    /// Inbound rim or backboard contact (refreshes the regular shot clock)
    pub live_contact: bool,
    /// Ball stopped or was teleported; remaining substeps are skipped
    pub halted: bool,
    /// Ball came to rest without a make
    pub missed: Option<Side>,
}

/// Run the full pipeline for one substep
pub fn resolve(
    ball: &mut Ball,
    trial: &mut ShotTrial,
    court: &Court,
    ctx: &ResolveContext,
    events: &mut Vec<GameEvent>,
) -> ContactReport {
    let mut report = ContactReport::default();
    for stage in PIPELINE {
        match stage {
            Stage::Rim => resolve_rims(ball, trial, &court.rims, &mut report, events),
            Stage::Net => apply_net_drag(ball, &court.rims),
            Stage::Backboard => {
                resolve_backboards(ball, trial, &court.boards, ctx, &mut report, events)
            }
            Stage::Pole => resolve_poles(ball, &court.poles, BOARD_RESTITUTION, events),
            Stage::Floor => {
                resolve_floor(ball, trial, court.ground_height, ctx, &mut report, events)
            }
        }
        if report.halted {
            break;
        }
    }
    report
}

/// Torus contact against both rims.
///
/// The rim is reduced to the closest point on its centerline circle, which
/// is then treated as a sphere of radius `ball + tube`.
pub fn resolve_rims(
    ball: &mut Ball,
    trial: &mut ShotTrial,
    rims: &[HoopRim; 2],
    report: &mut ContactReport,
    events: &mut Vec<GameEvent>,
) {
    // One rim cue per pass, even if both rims (or the same rim twice) register
    let mut cue_sent = false;

    for (idx, rim) in rims.iter().enumerate() {
        let circle_point = rim.closest_centerline_point(ball.pos);
        let d = ball.pos - circle_point;
        let dist = d.length();
        let penetration = rim.contact_radius(ball.radius) - dist;
        if penetration <= 0.0 {
            continue;
        }

        let n = if dist > GEOM_EPSILON { d / dist } else { Vec3::Y };
        let v_dot_n = ball.vel.dot(n);

        if v_dot_n < 0.0 {
            trial.rim_hits += 1;
            report.live_contact = true;
            if !cue_sent {
                events.push(GameEvent::RimHit {
                    hoop: Side::from_hoop_index(idx),
                    impact_speed: -v_dot_n,
                });
                cue_sent = true;
            }

            let v_n = n * v_dot_n;
            let v_t = ball.vel - v_n;
            let out_speed = (-RIM_RESTITUTION * v_dot_n).max(RIM_MIN_BOUNCE_SPEED);
            ball.vel = n * out_speed + v_t * RIM_TANGENTIAL_DAMPING;
            log::debug!(
                "rim {} hit: in {:.2} out {:.2}",
                Side::from_hoop_index(idx).as_str(),
                -v_dot_n,
                out_speed
            );
        }

        let correction = (penetration - RIM_SLOP).max(0.0) * RIM_POSITION_CORRECTION;
        if correction > 0.0 {
            ball.pos += n * correction;
        }
    }
}

/// Soft drag inside the net below each rim. Not a rigid contact: it nudges
/// the ball down and bleeds speed every substep it spends in the net.
pub fn apply_net_drag(ball: &mut Ball, rims: &[HoopRim; 2]) {
    for rim in rims {
        let below_rim = ball.pos.y < rim.height() && ball.pos.y > rim.height() - NET_DEPTH;
        if !below_rim {
            continue;
        }
        if crate::horizontal_distance(ball.pos, rim.center) < rim.major_radius + NET_MARGIN {
            ball.vel *= NET_DAMPING;
            ball.vel.y -= NET_DOWNWARD_PULL;
        }
    }
}

/// Plane contact against both backboards
pub fn resolve_backboards(
    ball: &mut Ball,
    trial: &mut ShotTrial,
    boards: &[Backboard; 2],
    ctx: &ResolveContext,
    report: &mut ContactReport,
    events: &mut Vec<GameEvent>,
) {
    for (idx, board) in boards.iter().enumerate() {
        if !board.edge_crossed(ball.pos, ball.radius) || !board.within_envelope(ball.pos, ball.radius)
        {
            continue;
        }
        let n = board.normal();
        let v_dot_n = ball.vel.dot(n);
        if v_dot_n >= 0.0 {
            continue;
        }

        ball.vel += n * (-(1.0 + BOARD_RESTITUTION) * v_dot_n);
        ball.vel.y *= BOARD_RESTITUTION;
        ball.vel.z *= BOARD_RESTITUTION;
        ball.pos.x = board.front_x() + board.facing * ball.radius;

        trial.backboard_hit = true;
        report.live_contact = true;
        events.push(GameEvent::BackboardHit {
            hoop: Side::from_hoop_index(idx),
            impact_speed: -v_dot_n,
            time_ms: ctx.time_ms,
        });
    }
}

/// Vertical cylinder contact. Reflects inbound horizontal velocity with
/// `restitution` and pushes the ball out of the pole.
pub fn resolve_poles(ball: &mut Ball, poles: &[Pole], restitution: f32, events: &mut Vec<GameEvent>) {
    for pole in poles {
        let to_ball = Vec3::new(ball.pos.x - pole.x, 0.0, ball.pos.z - pole.z);
        let dist = to_ball.length();
        let reach = ball.radius + pole.radius;
        if dist >= reach {
            continue;
        }

        let n = if dist > GEOM_EPSILON { to_ball / dist } else { Vec3::X };
        let v_dot_n = ball.vel.dot(n);
        if v_dot_n < 0.0 {
            ball.vel += n * (-(1.0 + restitution) * v_dot_n);
            events.push(GameEvent::PoleHit {
                impact_speed: -v_dot_n,
            });
        }
        ball.pos += n * (reach - dist);
    }
}

/// Floor contact, rest detection and the free-throw return
pub fn resolve_floor(
    ball: &mut Ball,
    trial: &mut ShotTrial,
    ground: f32,
    ctx: &ResolveContext,
    report: &mut ContactReport,
    events: &mut Vec<GameEvent>,
) {
    if ball.pos.y > ground {
        return;
    }

    if ctx.mode == GameMode::Free && trial.awaiting_free_throw_reset {
        let side = ctx.shooter.unwrap_or(Side::Guest);
        ball.pos = side.free_throw_spot();
        ball.halt();
        ball.clear_trail();
        trial.scored = false;
        trial.awaiting_free_throw_reset = false;
        trial.last_y = ball.pos.y;
        report.halted = true;
        events.push(GameEvent::FreeThrowReset { side });
        return;
    }

    ball.pos.y = ground;
    if ball.vel.y >= 0.0 {
        return;
    }

    ball.vel.y *= -GROUND_RESTITUTION;
    ball.vel.x *= GROUND_FRICTION;
    ball.vel.z *= GROUND_FRICTION;
    trial.ground_bounces += 1;
    events.push(GameEvent::GroundHit {
        speed: ball.vel.y.abs(),
        bounces: trial.ground_bounces,
    });

    if ball.vel.length() < BALL_STOP_SPEED {
        ball.halt();
        report.halted = true;
        if !trial.scored && !trial.suppress_miss {
            report.missed = ctx.shooter;
            if let Some(side) = ctx.shooter {
                events.push(GameEvent::Missed { side });
            }
        }
    }
}
