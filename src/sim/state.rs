//! Session state and entity types
//!
//! Everything a round of play owns lives in `Session`; the game machine
//! creates one on New Game and drops it when the run ends.

use glam::{UVec2, Vec2};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::AxisBox;
use crate::consts::*;

/// Player paddle at the bottom of the window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub max_width: f32,
    /// Horizontal speed, always >= 0; `dir` supplies the sign
    pub vel: f32,
    pub max_vel: f32,
    /// Last reflection factor applied to the ball
    pub angle: f32,
    /// -1 left, 0 idle, 1 right
    pub dir: i8,
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new()
    }
}

impl Paddle {
    /// Starting paddle, centred horizontally and resting on the window bottom
    pub fn new() -> Self {
        let size = Vec2::new(PADDLE_START_WIDTH, PADDLE_START_HEIGHT);
        Self {
            pos: Vec2::new(WINDOW_WIDTH / 2.0 - size.x / 2.0, WINDOW_HEIGHT - size.y),
            size,
            max_width: PADDLE_MAX_WIDTH,
            vel: 0.0,
            max_vel: PADDLE_MAX_VELOCITY,
            angle: 0.0,
            dir: 0,
        }
    }

    pub fn bounds(&self) -> AxisBox {
        AxisBox::new(self.pos, self.size)
    }

    /// Ramp speed up while a direction is held, bleed it off otherwise
    pub fn integrate_velocity(&mut self, move_requested: bool) {
        self.vel = if move_requested {
            (self.vel + PADDLE_ACCELERATION).min(self.max_vel)
        } else {
            (self.vel - PADDLE_DECELERATION).max(0.0)
        };
    }

    /// Move along `dir` and stop dead at either window edge
    pub fn integrate_position(&mut self) {
        self.pos.x += self.vel * f32::from(self.dir);
        if self.clamp_to_window() {
            self.vel = 0.0;
        }
    }

    /// Widen by one tile up to `max_width`, keeping the paddle centred
    pub fn grow(&mut self) {
        let width = (self.size.x + PADDLE_GROWTH).min(self.max_width);
        let grown = width - self.size.x;
        self.pos.x -= grown / 2.0;
        self.size.x = width;
        self.clamp_to_window();
    }

    /// Returns true when the paddle had to be pushed back inside
    fn clamp_to_window(&mut self) -> bool {
        let max_x = WINDOW_WIDTH - self.size.x;
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            true
        } else if self.pos.x > max_x {
            self.pos.x = max_x;
            true
        } else {
            false
        }
    }
}

/// The ball; a zero velocity means it is held on the paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub max_vel: Vec2,
}

impl Ball {
    pub fn new(paddle: &Paddle) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(BALL_WIDTH, BALL_HEIGHT),
            vel: Vec2::ZERO,
            max_vel: BALL_MAX_VELOCITY,
        };
        ball.follow(paddle);
        ball
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.vel == Vec2::ZERO
    }

    /// Sit centred on top of the paddle
    pub fn follow(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(
            paddle.pos.x + paddle.size.x / 2.0 - self.size.x / 2.0,
            paddle.pos.y - self.size.y,
        );
    }

    /// Fire straight up at full vertical speed
    pub fn launch(&mut self) {
        self.vel = Vec2::new(0.0, -self.max_vel.y);
    }

    pub fn bounds(&self) -> AxisBox {
        AxisBox::new(self.pos, self.size)
    }
}

/// Block colour variant; also selects the sprite sheet column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Doubles ball speed on contact
    Energized,
    Violet,
    Peach,
    Crimson,
}

impl BlockKind {
    pub const ALL: [BlockKind; BLOCK_KINDS] = [
        BlockKind::Energized,
        BlockKind::Violet,
        BlockKind::Peach,
        BlockKind::Crimson,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % BLOCK_KINDS]
    }

    pub fn index(self) -> usize {
        match self {
            BlockKind::Energized => 0,
            BlockKind::Violet => 1,
            BlockKind::Peach => 2,
            BlockKind::Crimson => 3,
        }
    }

    /// RGBA tint for this kind's debris
    pub fn debris_color(self) -> [u8; 4] {
        match self {
            BlockKind::Energized => [135, 255, 255, 255],
            BlockKind::Violet => [135, 63, 255, 255],
            BlockKind::Peach => [255, 201, 165, 25],
            BlockKind::Crimson => [255, 30, 81, 255],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebrisState {
    Active,
    /// Left the window; no longer simulated or drawn
    Frozen,
}

/// A falling chip knocked off a damaged block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Debris {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub color: [u8; 4],
    pub state: DebrisState,
}

impl Debris {
    /// Random launch parameters from the block's top-left corner
    pub fn seeded(origin: Vec2, color: [u8; 4], rng: &mut Pcg32) -> Self {
        Self {
            pos: origin,
            size: Vec2::splat(DEBRIS_SIZE),
            vel: Vec2::new(rng.random_range(-0.1..=0.3), rng.random_range(-6.0..=-4.0)),
            acc: Vec2::new(rng.random_range(-0.8..=0.8), rng.random_range(-0.8..=0.8)),
            color,
            state: DebrisState::Active,
        }
    }

    pub fn bounds(&self) -> AxisBox {
        AxisBox::new(self.pos, self.size)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == DebrisState::Active
    }

    /// Ballistic step under gravity; freezes once outside the window
    pub fn step(&mut self, dt: f32) {
        if !self.is_active() {
            return;
        }
        if !self.bounds().inside_area(WINDOW_WIDTH, WINDOW_HEIGHT) {
            self.state = DebrisState::Frozen;
            return;
        }
        let dv = dt * GRAVITY / 1000.0;
        self.pos.y += self.vel.y + dv / 2.0 * dt * self.acc.y;
        self.pos.x += self.vel.x + dv / 2.0 * dt * self.acc.x;
        self.vel.y += dv;
    }
}

/// Sprite-sheet explosion played where a block was destroyed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    /// Top-left of the 128px frame
    pub pos: Vec2,
    /// Sheet cell as (column, row)
    pub frame: UVec2,
    pub time_to_next_frame: f32,
}

impl Default for Explosion {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            frame: UVec2::ZERO,
            time_to_next_frame: EXPLOSION_FRAME_MS,
        }
    }
}

impl Explosion {
    /// Fresh animation centred on a block
    pub fn centered_on(block: &AxisBox) -> Self {
        Self {
            pos: block.center() - Vec2::new(EXPLOSION_WIDTH, EXPLOSION_HEIGHT) / 2.0,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.frame.y >= EXPLOSION_ROWS
    }

    /// Advance the animation clock; returns false once the last row has played
    pub fn step(&mut self, dt: f32) -> bool {
        self.time_to_next_frame -= dt;
        if self.time_to_next_frame <= 0.0 {
            self.time_to_next_frame = EXPLOSION_FRAME_MS;
            if self.frame.x == EXPLOSION_LAST_COLUMN {
                self.frame.x = 0;
                self.frame.y += 1;
            } else {
                self.frame.x += 1;
            }
        }
        !self.is_finished()
    }
}

/// Outcome of the ball striking a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockHit {
    Damaged,
    Destroyed,
}

/// A breakable block with its debris and explosion effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Top-left corner
    pub pos: Vec2,
    /// 2 intact, 1 damaged, 0 destroyed
    pub health: u8,
    pub kind: BlockKind,
    pub debris: [Debris; DEBRIS_PER_BLOCK],
    pub debris_active: bool,
    pub explosion: Explosion,
    pub explosion_active: bool,
}

impl Block {
    pub fn new(pos: Vec2, kind: BlockKind, rng: &mut Pcg32) -> Self {
        let color = kind.debris_color();
        Self {
            pos,
            health: BLOCK_START_HEALTH,
            kind,
            debris: std::array::from_fn(|_| Debris::seeded(pos, color, rng)),
            debris_active: false,
            explosion: Explosion::default(),
            explosion_active: false,
        }
    }

    pub fn bounds(&self) -> AxisBox {
        AxisBox::new(self.pos, Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT))
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    #[inline]
    pub fn is_damaged(&self) -> bool {
        self.health == 1
    }

    /// Take one point of damage and start the matching effect
    pub fn hit(&mut self) -> BlockHit {
        debug_assert!(!self.is_destroyed(), "hit on a destroyed block");
        if self.health <= 1 {
            self.health = 0;
            self.explosion = Explosion::centered_on(&self.bounds());
            self.explosion_active = true;
            BlockHit::Destroyed
        } else {
            self.health -= 1;
            // Blocks may have descended since the debris was seeded
            for chip in &mut self.debris {
                chip.pos = self.pos;
            }
            self.debris_active = true;
            BlockHit::Damaged
        }
    }

    /// Step debris and explosion if they are running
    pub fn update_effects(&mut self, dt: f32) {
        if self.debris_active {
            for chip in &mut self.debris {
                chip.step(dt);
            }
        }
        if self.explosion_active {
            self.explosion_active = self.explosion.step(dt);
        }
    }
}

/// Per-session scoring and difficulty clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub level: u8,
    pub points: u32,
    /// Time toward the next block descent
    pub accumulator: f32,
}

impl Score {
    pub fn new(level: u8) -> Self {
        Self {
            level,
            points: 0,
            accumulator: 0.0,
        }
    }
}

/// Everything one round of play owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub paddle: Paddle,
    pub ball: Ball,
    pub blocks: Vec<Block>,
    pub active_blocks: usize,
    pub score: Score,
    /// Level 3 speeds up descent when no block has been destroyed for a while
    pub time_since_block_destroyed: f32,
}

impl Session {
    pub fn new(level: u8, rng: &mut Pcg32) -> Self {
        debug_assert!((FIRST_LEVEL..=LAST_LEVEL).contains(&level), "level {level} out of range");
        let paddle = Paddle::new();
        let ball = Ball::new(&paddle);
        let blocks = block_grid(rng);
        let active_blocks = blocks.len();
        log::info!("New session: level {level}, {active_blocks} blocks");
        Self {
            paddle,
            ball,
            blocks,
            active_blocks,
            score: Score::new(level),
            time_since_block_destroyed: 0.0,
        }
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.score.level
    }
}

/// Number of blocks laid out per session
pub fn block_count() -> usize {
    let cells = (BLOCK_COLUMNS * BLOCK_ROWS - BLOCK_OFFSET_X) as usize;
    cells - cells % BLOCK_ROWS as usize
}

/// Lay out the block grid row by row with random kinds
pub fn block_grid(rng: &mut Pcg32) -> Vec<Block> {
    let count = block_count();
    let mut blocks = Vec::with_capacity(count);
    let mut cell = UVec2::new(BLOCK_OFFSET_X, BLOCK_OFFSET_Y);
    for _ in 0..count {
        let pos = Vec2::new(cell.x as f32 * BLOCK_WIDTH, cell.y as f32 * BLOCK_HEIGHT);
        let kind = BlockKind::from_index(rng.random_range(0..BLOCK_KINDS));
        blocks.push(Block::new(pos, kind, rng));
        cell.x += 1;
        if cell.x == BLOCK_COLUMNS {
            cell.x = BLOCK_OFFSET_X;
            cell.y += 1;
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_paddle_starts_centered_on_floor() {
        let paddle = Paddle::new();
        assert_eq!(paddle.pos, Vec2::new(516.0, 704.0));
        assert_eq!(paddle.size, Vec2::new(48.0, 16.0));
    }

    #[test]
    fn test_paddle_velocity_ramps_and_decays() {
        let mut paddle = Paddle::new();
        for _ in 0..100 {
            paddle.integrate_velocity(true);
        }
        assert_eq!(paddle.vel, PADDLE_MAX_VELOCITY);

        paddle.integrate_velocity(false);
        assert!((paddle.vel - 9.1).abs() < 1e-5);
        for _ in 0..100 {
            paddle.integrate_velocity(false);
        }
        assert_eq!(paddle.vel, 0.0);
    }

    #[test]
    fn test_paddle_clamps_at_edges() {
        let mut paddle = Paddle::new();
        paddle.pos.x = 5.0;
        paddle.vel = 10.0;
        paddle.dir = -1;
        paddle.integrate_position();
        assert_eq!(paddle.pos.x, 0.0);
        assert_eq!(paddle.vel, 0.0);

        paddle.pos.x = WINDOW_WIDTH - paddle.size.x - 3.0;
        paddle.vel = 10.0;
        paddle.dir = 1;
        paddle.integrate_position();
        assert_eq!(paddle.pos.x, WINDOW_WIDTH - paddle.size.x);
        assert_eq!(paddle.vel, 0.0);
    }

    #[test]
    fn test_paddle_growth_caps_and_stays_inside() {
        let mut paddle = Paddle::new();
        let center = paddle.bounds().center().x;
        paddle.grow();
        assert_eq!(paddle.size.x, 64.0);
        assert_eq!(paddle.bounds().center().x, center);

        for _ in 0..20 {
            paddle.grow();
        }
        assert_eq!(paddle.size.x, PADDLE_MAX_WIDTH);

        paddle.size.x = 200.0;
        paddle.pos.x = WINDOW_WIDTH - 200.0;
        paddle.grow();
        assert_eq!(paddle.size.x, PADDLE_MAX_WIDTH);
        assert!(paddle.pos.x + paddle.size.x <= WINDOW_WIDTH);
    }

    #[test]
    fn test_ball_follows_paddle_while_held() {
        let paddle = Paddle::new();
        let mut ball = Ball::new(&paddle);
        assert!(ball.is_held());
        assert_eq!(ball.pos, Vec2::new(536.0, 696.0));

        ball.launch();
        assert!(!ball.is_held());
        assert_eq!(ball.vel, Vec2::new(0.0, -5.0));
    }

    #[test]
    fn test_block_hit_sequence() {
        let mut rng = rng();
        let mut block = Block::new(Vec2::new(320.0, 48.0), BlockKind::Violet, &mut rng);
        assert_eq!(block.health, 2);

        block.pos.y += 20.0;
        assert_eq!(block.hit(), BlockHit::Damaged);
        assert!(block.is_damaged());
        assert!(block.debris_active);
        assert!(block.debris.iter().all(|d| d.pos == block.pos));

        assert_eq!(block.hit(), BlockHit::Destroyed);
        assert!(block.is_destroyed());
        assert!(block.explosion_active);
        assert_eq!(block.explosion.pos, block.bounds().center() - Vec2::splat(64.0));
    }

    #[test]
    fn test_debris_falls_then_freezes() {
        let mut rng = rng();
        let mut chip = Debris::seeded(Vec2::new(500.0, 300.0), [1, 2, 3, 4], &mut rng);
        assert!(chip.vel.y <= -4.0 && chip.vel.y >= -6.0);
        assert!(chip.vel.x >= -0.1 && chip.vel.x <= 0.3);

        let vy = chip.vel.y;
        chip.step(TIME_STEP_MS);
        assert!(chip.vel.y > vy);

        for _ in 0..10_000 {
            chip.step(TIME_STEP_MS);
            if !chip.is_active() {
                break;
            }
        }
        assert_eq!(chip.state, DebrisState::Frozen);

        let frozen = chip;
        chip.step(TIME_STEP_MS);
        assert_eq!(chip, frozen);
    }

    #[test]
    fn test_explosion_walks_sheet_then_stops() {
        let mut explosion = Explosion::default();
        let mut frames = vec![explosion.frame];
        let mut steps = 0;
        while explosion.step(TIME_STEP_MS) {
            if frames.last() != Some(&explosion.frame) {
                frames.push(explosion.frame);
            }
            steps += 1;
            assert!(steps < 1000);
        }
        assert_eq!(explosion.frame, UVec2::new(0, EXPLOSION_ROWS));
        assert_eq!(frames.len(), 20);
        assert_eq!(frames[4], UVec2::new(0, 1));
        assert!(frames.iter().all(|f| f.x <= EXPLOSION_LAST_COLUMN));
    }

    #[test]
    fn test_block_grid_layout() {
        let blocks = block_grid(&mut rng());
        assert_eq!(blocks.len(), 84);
        assert_eq!(blocks[0].pos, Vec2::new(320.0, 48.0));
        assert_eq!(blocks[13].pos, Vec2::new(736.0, 48.0));
        assert_eq!(blocks[14].pos, Vec2::new(320.0, 64.0));
        assert_eq!(blocks[83].pos, Vec2::new(736.0, 128.0));
        assert!(blocks.iter().all(|b| b.health == BLOCK_START_HEALTH && !b.debris_active));
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = Session::new(1, &mut rng());
        let b = Session::new(1, &mut rng());
        assert_eq!(a, b);
        assert_eq!(a.active_blocks, 84);
        assert_eq!(a.score, Score::new(1));
    }
}
