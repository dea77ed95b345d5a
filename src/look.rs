//! Maps the pointer position to look angles for tracking joints
use crate::types::Viewport;

/// Looking up only goes this fraction of the way that looking down does, so
/// the neck doesn't crane back as far as it can bend forward
pub const UP_FACTOR: f32 = 0.5;

/// Look angles in degrees. `dx` turns about the vertical axis (negative is
/// toward the left of the screen), `dy` tilts (negative is up).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LookAngles {
    pub dx: f32,
    pub dy: f32,
}

impl LookAngles {
    /// Returns the (yaw, pitch) pair in radians
    #[must_use]
    pub fn to_radians(self) -> (f32, f32) {
        (self.dx.to_radians(), self.dy.to_radians())
    }
}

/// Distance from the centre of a span as a fraction of half the span.
/// Positions outside the span are held to the edge.
fn fraction(distance: f32, half: f32) -> f32 {
    (distance / half).clamp(0.0, 1.0)
}

/// Converts a pointer position to look angles in degrees.
///
/// Each axis splits the viewport at its midpoint. The horizontal angle
/// reaches `degree_limit` at either edge. The vertical angle reaches
/// `degree_limit` at the bottom but only `degree_limit * UP_FACTOR` at the
/// top. At the exact midpoint both halves apply and both give zero.
///
/// The viewport must be valid, see `Viewport::is_valid`.
#[must_use]
pub fn mouse_degrees(
    x: f32,
    y: f32,
    degree_limit: f32,
    viewport: Viewport,
) -> LookAngles {
    let half_x = viewport.width / 2.0;
    let half_y = viewport.height / 2.0;
    let mut angles = LookAngles::default();

    // Left
    if x <= half_x {
        angles.dx = -(degree_limit * fraction(half_x - x, half_x));
    }
    // Right
    if x >= half_x {
        angles.dx = degree_limit * fraction(x - half_x, half_x);
    }
    // Up
    if y <= half_y {
        angles.dy =
            -(degree_limit * UP_FACTOR * fraction(half_y - y, half_y));
    }
    // Down
    if y >= half_y {
        angles.dy = degree_limit * fraction(y - half_y, half_y);
    }
    angles
}
