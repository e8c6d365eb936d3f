//! Fixed timestep play update
//!
//! Advances one session by a single tick and reports what happened as
//! events. Phase changes and sounds are left to the game machine.

use super::collision::{ball_block_face, ball_paddle_contact, box_collision, paddle_bounce_angle, snap_to_face};
use super::state::{BlockHit, BlockKind, Session};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// A direction key is held
    pub move_requested: bool,
    /// -1 left, 1 right; kept on the paddle after release so it glides
    pub direction: i8,
    /// Fire the ball upward
    pub launch: bool,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BlockDamaged { index: usize },
    BlockDestroyed { index: usize },
    PaddleHit,
    /// Ball dropped past the bottom of the window
    BallLost,
    /// Descending blocks crossed the danger line
    BlocksReachedPaddle,
    BlocksCleared,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.launch {
        session.ball.launch();
    }

    // Paddle
    if input.move_requested {
        session.paddle.dir = input.direction.signum();
    }
    session.paddle.integrate_velocity(input.move_requested);
    session.paddle.integrate_position();

    // Ball
    if session.ball.is_held() {
        session.ball.follow(&session.paddle);
    } else {
        session.ball.pos += session.ball.vel;
    }

    collide_blocks(session, &mut events);
    collide_paddle(session, &mut events);
    collide_walls(session, &mut events);

    for block in &mut session.blocks {
        block.update_effects(dt);
    }

    apply_level_rules(session, dt, &mut events);

    events
}

/// First block the ball strikes reflects it; at most one block per tick
fn collide_blocks(session: &mut Session, events: &mut Vec<GameEvent>) {
    let ball = &mut session.ball;
    let ball_box = ball.bounds();

    for (index, block) in session.blocks.iter_mut().enumerate() {
        if block.is_destroyed() {
            continue;
        }
        let block_box = block.bounds();
        if !box_collision(&ball_box, &block_box).hit {
            continue;
        }
        let Some(face) = ball_block_face(&ball_box, &block_box) else {
            continue;
        };

        let (pos, vel) = snap_to_face(face, &ball_box, &block_box, ball.vel, ball.max_vel);
        ball.pos = pos;
        ball.vel = vel;

        if block.kind == BlockKind::Energized {
            if ball.vel.x > 0.0 {
                ball.vel.x *= 2.0;
            } else {
                ball.vel.y *= 2.0;
            }
        }

        match block.hit() {
            BlockHit::Damaged => events.push(GameEvent::BlockDamaged { index }),
            BlockHit::Destroyed => {
                debug_assert!(session.active_blocks > 0, "destroyed more blocks than exist");
                session.score.points += 1;
                session.paddle.grow();
                session.active_blocks = session.active_blocks.saturating_sub(1);
                if session.score.level == LAST_LEVEL {
                    session.time_since_block_destroyed = 0.0;
                }
                log::debug!(
                    "Block {index} destroyed ({:?}), {} left",
                    block.kind,
                    session.active_blocks
                );
                events.push(GameEvent::BlockDestroyed { index });
                if session.active_blocks == 0 {
                    events.push(GameEvent::BlocksCleared);
                }
            }
        }
        break;
    }
}

fn collide_paddle(session: &mut Session, events: &mut Vec<GameEvent>) {
    let paddle_box = session.paddle.bounds();
    let ball_box = session.ball.bounds();
    if !ball_paddle_contact(&ball_box, &paddle_box) {
        return;
    }
    let angle = paddle_bounce_angle(&paddle_box, &ball_box);
    session.paddle.angle = angle;
    let max = session.ball.max_vel;
    session.ball.vel = glam::Vec2::new(max.x * angle, -max.y);
    events.push(GameEvent::PaddleHit);
}

fn collide_walls(session: &mut Session, events: &mut Vec<GameEvent>) {
    let ball = &mut session.ball;
    let bounds = ball.bounds();
    let side_vel = -ball.max_vel.x * session.paddle.angle;

    if bounds.bottom() > WINDOW_HEIGHT {
        events.push(GameEvent::BallLost);
    } else if bounds.top() < 0.0 {
        ball.vel.y = ball.max_vel.y;
        ball.pos.y = 0.0;
    } else if bounds.right() > WINDOW_WIDTH {
        ball.vel.x = side_vel;
        ball.pos.x = WINDOW_WIDTH - ball.size.x;
    } else if bounds.left() < 0.0 {
        ball.vel.x = side_vel;
        ball.pos.x = 0.0;
    }
}

/// Block descent from level 2 on, faster on the last level when idle
fn apply_level_rules(session: &mut Session, dt: f32, events: &mut Vec<GameEvent>) {
    if session.score.level <= FIRST_LEVEL {
        return;
    }

    session.score.accumulator += dt;
    if session.score.accumulator > BLOCK_DESCENT_INTERVAL_MS {
        session.score.accumulator = 0.0;

        let danger_line = session.paddle.pos.y - DANGER_LINE_PADDLE_HEIGHTS * session.paddle.size.y;
        let lowest = session.blocks.last().map_or(f32::MIN, |b| b.pos.y);
        if lowest > danger_line {
            events.push(GameEvent::BlocksReachedPaddle);
        } else {
            for block in &mut session.blocks {
                block.pos.y += BLOCK_DESCENT_STEP;
            }
        }
    }

    // Idle on the last level: time counts double toward the next descent
    if session.score.level == LAST_LEVEL {
        session.time_since_block_destroyed += dt;
        if session.time_since_block_destroyed > IDLE_SPEEDUP_AFTER_MS {
            session.score.accumulator += dt;
        }
    }
}
