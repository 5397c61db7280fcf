//! Semi-implicit Euler integration of the ball
//!
//! Velocity is updated first, then position uses the new velocity:
//!
//! ```text
//! v += (g + wind) * dt
//! x += v * dt
//! ```

use glam::Vec3;

use super::state::Ball;

/// Advance a flying ball by one substep. A resting ball is left untouched.
pub fn integrate(ball: &mut Ball, gravity: Vec3, wind: Vec3, dt: f32) {
    if !ball.flying {
        return;
    }
    ball.vel += (gravity + wind) * dt;
    ball.pos += ball.vel * dt;
}
