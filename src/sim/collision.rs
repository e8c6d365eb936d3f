//! Collision detection and response for axis-aligned boxes
//!
//! Two strategies live here:
//! - `box_collision`: a separating-axis resolver that reports the minimum
//!   push-out for box A along a single axis.
//! - `ball_block_face`: the gameplay face test that decides which side of a
//!   block the ball struck, since each face reflects velocity differently.
//!
//! Every face the face test reports implies the boxes overlap, so the
//! resolver doubles as a cheap broad-phase for it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::{Axis, AxisBox};

/// Result of a box-vs-box check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether the boxes overlap
    pub hit: bool,
    /// Unit axis along which box A should move
    pub normal: Vec2,
    /// Signed distance to move box A along `normal`
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// Offset that separates box A from box B
    #[inline]
    pub fn push_out(&self) -> Vec2 {
        self.normal * self.penetration
    }
}

/// Check two boxes for overlap and compute the minimum separation for `a`
///
/// Corners are projected onto the x and y axes. Touching edges count as an
/// overlap. On each axis the candidate push with the smaller magnitude is
/// kept (the first, positive candidate on ties), then the axis with the smaller
/// magnitude wins, x on ties.
pub fn box_collision(a: &AxisBox, b: &AxisBox) -> CollisionResult {
    let x_axis = Axis::X.unit();
    let y_axis = Axis::Y.unit();

    let (a_min_x, a_max_x) = a.project(x_axis);
    let (a_min_y, a_max_y) = a.project(y_axis);
    let (b_min_x, b_max_x) = b.project(x_axis);
    let (b_min_y, b_max_y) = b.project(y_axis);

    if a_max_x < b_min_x || a_min_x > b_max_x || a_max_y < b_min_y || a_min_y > b_max_y {
        return CollisionResult::miss();
    }

    let pen_x = smaller_magnitude(b_max_x - a_min_x, b_min_x - a_max_x);
    let pen_y = smaller_magnitude(b_max_y - a_min_y, b_min_y - a_max_y);

    let (normal, penetration) = if pen_y.abs() < pen_x.abs() {
        (y_axis, pen_y)
    } else {
        (x_axis, pen_x)
    };

    CollisionResult {
        hit: true,
        normal,
        penetration,
    }
}

#[inline]
fn smaller_magnitude(a: f32, b: f32) -> f32 {
    if b.abs() < a.abs() { b } else { a }
}

/// Side of a block struck by the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockFace {
    Bottom,
    Top,
    Left,
    Right,
}

/// Decide which face of `block` the ball overlaps, if any
///
/// Faces are tested bottom, top, left, right with open intervals on the
/// ball's top-left corner. The bottom test claims every ball whose corner is
/// inside the block, and the left test accepts any ball straddling either
/// vertical edge, so the right face is never reported: balls entering from
/// the right bounce off as bottom or left hits.
pub fn ball_block_face(ball: &AxisBox, block: &AxisBox) -> Option<BlockFace> {
    let corner_inside_x = ball.left() > block.left() && ball.left() < block.right();
    let corner_inside_y = ball.top() > block.top() && ball.top() < block.bottom();

    if corner_inside_x && corner_inside_y {
        Some(BlockFace::Bottom)
    } else if ball.bottom() > block.top() && ball.top() < block.bottom() && corner_inside_x {
        Some(BlockFace::Top)
    } else if ball.right() > block.left() && ball.left() < block.right() && corner_inside_y {
        Some(BlockFace::Left)
    } else if ball.left() < block.right() && ball.right() > block.right() && corner_inside_y {
        Some(BlockFace::Right)
    } else {
        None
    }
}

/// Position and velocity component after snapping the ball flush against a face
///
/// Returns the new ball top-left and velocity.
pub fn snap_to_face(face: BlockFace, ball: &AxisBox, block: &AxisBox, vel: Vec2, max_vel: Vec2) -> (Vec2, Vec2) {
    let mut pos = ball.pos;
    let mut vel = vel;
    match face {
        BlockFace::Bottom => {
            pos.y = block.bottom();
            vel.y = max_vel.y;
        }
        BlockFace::Top => {
            pos.y = block.top() - ball.size.y;
            vel.y = -max_vel.y;
        }
        BlockFace::Left => {
            pos.x = block.left() - ball.size.x;
            vel.x = -max_vel.x;
        }
        BlockFace::Right => {
            pos.x = block.right();
            vel.x = max_vel.x;
        }
    }
    (pos, vel)
}

/// Whether the ball has dropped onto the paddle
pub fn ball_paddle_contact(ball: &AxisBox, paddle: &AxisBox) -> bool {
    ball.bottom() > paddle.top() && paddle.left() < ball.right() && paddle.right() > ball.left()
}

/// Reflection factor from where the ball struck across the paddle width
///
/// The raw offset runs from 0.5 at the paddle's left end to -0.5 at its
/// right end. Offsets in [-0.1, 0.1] snap to 0; anything else is pushed a
/// full unit toward the struck side, so the result jumps from 0 to about
/// +-0.9 rather than falling off smoothly.
pub fn paddle_bounce_angle(paddle: &AxisBox, ball: &AxisBox) -> f32 {
    let from_right = paddle.right() - ball.center().x;
    let offset = from_right / paddle.size.x - 0.5;

    if (-0.1..=0.1).contains(&offset) {
        0.0
    } else if offset > 0.1 {
        offset - 1.0
    } else {
        offset + 1.0
    }
}
