//! Turtle state for plant interpretation.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The interpreter's cursor: where the next segment starts and how it is
/// oriented, plus the radius and age of the segment most recently drawn.
///
/// A stack of these models nested branch scopes. Pushing on `[` and popping
/// on `]` must restore the cursor exactly, which is why the whole tuple is a
/// plain `Copy` value.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current world-space position of the cursor.
    pub position: Vec3,

    /// Current world-space orientation. The growth direction is the local
    /// +Y axis rotated by this.
    pub rotation: Quat,

    /// Radius of the last segment drawn, for branch tapering context.
    pub radius: f32,

    /// Age of the last segment drawn.
    pub age: u32,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            radius: 0.0,
            age: 0,
        }
    }
}

impl TurtleState {
    /// The growth direction: the local up axis (+Y) in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Rotates about the local X axis by `angle` radians (pitch).
    pub fn rotate_local_x(&mut self, angle: f32) {
        self.rotation *= Quat::from_rotation_x(angle);
    }

    /// Rotates about the local Y axis by `angle` radians (yaw).
    ///
    /// Local Y is also the growth axis, so a yaw alone leaves the heading
    /// unchanged and only re-orients the lateral plane that later pitches
    /// tilt into.
    pub fn rotate_local_y(&mut self, angle: f32) {
        self.rotation *= Quat::from_rotation_y(angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn nearly_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn default_cursor_points_straight_up() {
        let turtle = TurtleState::default();
        assert_eq!(turtle.position, Vec3::ZERO);
        assert!(nearly_vec(turtle.up(), Vec3::Y));
    }

    #[test]
    fn pitch_tilts_the_heading_by_the_given_angle() {
        let mut turtle = TurtleState::default();
        turtle.rotate_local_x(FRAC_PI_2);
        assert!(nearly_vec(turtle.up(), Vec3::Z));

        let mut back = TurtleState::default();
        back.rotate_local_x(-FRAC_PI_2);
        assert!(nearly_vec(back.up(), -Vec3::Z));
    }

    #[test]
    fn yaw_preserves_the_heading_but_turns_the_lateral_plane() {
        let mut turtle = TurtleState::default();
        turtle.rotate_local_y(FRAC_PI_2);
        assert!(nearly_vec(turtle.up(), Vec3::Y));

        // After a quarter yaw, a pitch tilts toward +X instead of +Z.
        turtle.rotate_local_x(FRAC_PI_2);
        assert!(nearly_vec(turtle.up(), Vec3::X));
    }
}
