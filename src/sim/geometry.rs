//! Fixed court geometry: rims, backboards, poles
//!
//! Everything here is immutable for the lifetime of a session. Index 0 is
//! the left (home) hoop, index 1 the right (guest) hoop.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A hoop rim modelled as a horizontal torus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoopRim {
    /// Center of the ring (its y is the rim height)
    pub center: Vec3,
    /// Ring radius
    pub major_radius: f32,
    /// Tube radius
    pub minor_radius: f32,
}

impl HoopRim {
    pub fn new(center_x: f32) -> Self {
        Self {
            center: Vec3::new(center_x, RIM_HEIGHT, 0.0),
            major_radius: RIM_RADIUS,
            minor_radius: RIM_TUBE_RADIUS,
        }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.center.y
    }

    /// Contact distance between the ball center and the tube centerline
    #[inline]
    pub fn contact_radius(&self, ball_radius: f32) -> f32 {
        ball_radius + self.minor_radius
    }

    /// Closest point on the ring centerline to `p` (horizontal projection).
    ///
    /// A point directly above/below the center has no preferred direction;
    /// below epsilon radial length the +x point of the ring is used.
    pub fn closest_centerline_point(&self, p: Vec3) -> Vec3 {
        let radial = crate::horizontal_offset(self.center, p);
        let len = radial.length();
        let dir = if len > GEOM_EPSILON { radial / len } else { Vec3::X };
        self.center + dir * self.major_radius
    }
}

/// A planar backboard facing the court
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Backboard {
    /// Plane x of the board's middle
    pub x: f32,
    /// +1 when the board faces +x (left hoop), -1 when it faces -x
    pub facing: f32,
    pub center_y: f32,
    pub center_z: f32,
    pub half_width: f32,
    pub half_height: f32,
    pub thickness: f32,
}

impl Backboard {
    pub fn new(x: f32, facing: f32) -> Self {
        Self {
            x,
            facing,
            center_y: RIM_HEIGHT + BOARD_RISE,
            center_z: 0.0,
            half_width: BOARD_HALF_WIDTH,
            half_height: BOARD_HALF_HEIGHT,
            thickness: BOARD_THICKNESS,
        }
    }

    /// Inward (court-facing) normal
    #[inline]
    pub fn normal(&self) -> Vec3 {
        Vec3::new(self.facing, 0.0, 0.0)
    }

    /// x of the court-facing surface
    #[inline]
    pub fn front_x(&self) -> f32 {
        self.x + self.facing * (self.thickness / 2.0)
    }

    /// Whether a ball of `radius` at `p` has its leading edge at or past the front plane
    pub fn edge_crossed(&self, p: Vec3, radius: f32) -> bool {
        let front = self.front_x();
        if self.facing > 0.0 {
            p.x - radius <= front
        } else {
            p.x + radius >= front
        }
    }

    /// Whether `p` is inside the board's height/width envelope (grown by `radius`)
    pub fn within_envelope(&self, p: Vec3, radius: f32) -> bool {
        (p.y - self.center_y).abs() <= self.half_height + radius
            && (p.z - self.center_z).abs() <= self.half_width + radius
    }
}

/// A vertical cylindrical support pole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pole {
    pub x: f32,
    pub z: f32,
    pub radius: f32,
}

/// The full set of static colliders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub rims: [HoopRim; 2],
    pub boards: [Backboard; 2],
    pub poles: Vec<Pole>,
    pub ground_height: f32,
}

impl Default for Court {
    fn default() -> Self {
        Self::standard()
    }
}

impl Court {
    pub fn standard() -> Self {
        Self {
            rims: [HoopRim::new(-RIM_CENTER_X), HoopRim::new(RIM_CENTER_X)],
            boards: [Backboard::new(-BOARD_X, 1.0), Backboard::new(BOARD_X, -1.0)],
            poles: vec![
                Pole {
                    x: -POLE_X,
                    z: 0.0,
                    radius: POLE_RADIUS,
                },
                Pole {
                    x: POLE_X,
                    z: 0.0,
                    radius: POLE_RADIUS,
                },
            ],
            ground_height: GROUND_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_point_on_ring() {
        let rim = HoopRim::new(0.0);
        let p = Vec3::new(2.0, 1.0, 0.0);
        let c = rim.closest_centerline_point(p);
        assert!((c - Vec3::new(RIM_RADIUS, RIM_HEIGHT, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_closest_point_degenerate_center() {
        let rim = HoopRim::new(0.0);
        let c = rim.closest_centerline_point(Vec3::new(0.0, 5.0, 0.0));
        assert!(c.is_finite());
        assert!((crate::horizontal_distance(c, rim.center) - RIM_RADIUS).abs() < 1e-6);
    }

    #[test]
    fn test_board_faces_court() {
        let court = Court::standard();
        assert!(court.boards[0].front_x() > court.boards[0].x);
        assert!(court.boards[1].front_x() < court.boards[1].x);
        // Rims hang in front of their boards
        assert!(court.rims[0].center.x > court.boards[0].x);
        assert!(court.rims[1].center.x < court.boards[1].x);
    }

    #[test]
    fn test_board_envelope() {
        let board = Backboard::new(-BOARD_X, 1.0);
        let p = Vec3::new(-13.6, board.center_y, 0.0);
        assert!(board.within_envelope(p, BALL_RADIUS));
        assert!(board.edge_crossed(p, BALL_RADIUS));
        let high = Vec3::new(-13.6, board.center_y + 2.0, 0.0);
        assert!(!board.within_envelope(high, BALL_RADIUS));
    }
}
