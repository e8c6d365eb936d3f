//! Breakout - a fixed-timestep brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game and menu state machines)
//! - `game`: Fixed-timestep driver tying input, simulation and collaborators together
//! - `renderer`: Read-only sprite list built from simulation state
//! - `audio`: Sound requests and play policies
//! - `platform`: Input events and frame clock
//! - `settings`: Runner preferences

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
///
/// Times are in milliseconds; distances in pixels; velocities in pixels per tick.
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const TIME_STEP_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame fed to the accumulator
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 1080.0;
    pub const WINDOW_HEIGHT: f32 = 720.0;

    /// Paddle is built from 16px sprite tiles
    pub const PADDLE_FRAME_SIZE: f32 = 16.0;
    pub const PADDLE_START_WIDTH: f32 = PADDLE_FRAME_SIZE * 3.0;
    pub const PADDLE_START_HEIGHT: f32 = PADDLE_FRAME_SIZE;
    pub const PADDLE_MAX_WIDTH: f32 = PADDLE_FRAME_SIZE * 13.0;
    /// Width gained per destroyed block
    pub const PADDLE_GROWTH: f32 = PADDLE_FRAME_SIZE;
    pub const PADDLE_MAX_VELOCITY: f32 = 10.0;
    pub const PADDLE_ACCELERATION: f32 = 0.7;
    pub const PADDLE_DECELERATION: f32 = 0.9;

    /// Ball defaults
    pub const BALL_WIDTH: f32 = 8.0;
    pub const BALL_HEIGHT: f32 = 8.0;
    pub const BALL_MAX_VELOCITY: Vec2 = Vec2::new(1.0, 5.0);

    /// Block defaults
    pub const BLOCK_WIDTH: f32 = 32.0;
    pub const BLOCK_HEIGHT: f32 = 16.0;
    pub const BLOCK_KINDS: usize = 4;
    pub const BLOCK_START_HEALTH: u8 = 2;
    /// Grid columns come from the window width modulo the block width (24)
    pub const BLOCK_COLUMNS: u32 = (WINDOW_WIDTH as u32) % (BLOCK_WIDTH as u32);
    pub const BLOCK_ROWS: u32 = 4;
    /// First column / row of the grid, in block cells
    pub const BLOCK_OFFSET_X: u32 = 10;
    pub const BLOCK_OFFSET_Y: u32 = 3;

    /// Level 2+ descent
    pub const BLOCK_DESCENT_INTERVAL_MS: f32 = 2000.0;
    pub const BLOCK_DESCENT_STEP: f32 = 10.0;
    /// Danger line sits this many paddle heights above the paddle
    pub const DANGER_LINE_PADDLE_HEIGHTS: f32 = 6.0;
    /// Last level descends twice as fast once no block has fallen for this long
    pub const IDLE_SPEEDUP_AFTER_MS: f32 = 4000.0;

    /// Debris
    pub const DEBRIS_PER_BLOCK: usize = 12;
    pub const DEBRIS_SIZE: f32 = 2.0;
    pub const GRAVITY: f32 = 9.80;

    /// Explosion sprite sheet: 4 columns x 5 rows of 128px frames
    pub const EXPLOSION_WIDTH: f32 = 128.0;
    pub const EXPLOSION_HEIGHT: f32 = 128.0;
    pub const EXPLOSION_LAST_COLUMN: u32 = 3;
    pub const EXPLOSION_ROWS: u32 = 5;
    pub const EXPLOSION_FRAME_MS: f32 = TIME_STEP_MS * 3.0;
    pub const EXPLOSION_SOUND_FADE_MS: f32 = 1500.0;

    /// Phase display durations
    pub const GAME_OVER_SHOW_MS: f32 = 4000.0;
    pub const NEXT_LEVEL_SHOW_MS: f32 = 2000.0;
    pub const COMPLETED_GAME_SHOW_MS: f32 = 4000.0;

    pub const FIRST_LEVEL: u8 = 1;
    pub const LAST_LEVEL: u8 = 3;

    /// Menu click debounce
    pub const CLICK_COOLDOWN_MS: f32 = TIME_STEP_MS * 10.0;
    /// Vertical gap between stacked menu items
    pub const MENU_OFFSET_Y: f32 = 40.0;
    /// Hover outline grows the item rectangle by this much
    pub const MENU_HOVER_BORDER: f32 = 10.0;
    pub const MENU_HOVER_COLOR: [u8; 4] = [196, 170, 139, 255];

    /// Level backdrops are 1920x1080; play shows a fixed window of them
    pub const LEVEL_BACKGROUND_WIDTH: f32 = 1920.0;
    pub const LEVEL_BACKGROUND_HEIGHT: f32 = 1080.0;

    /// Sprite sheet cells
    pub const PADDLE_SHEET_ROW: f32 = PADDLE_FRAME_SIZE * 2.0;
    pub const BALL_SHEET_X: f32 = 0.0;
    pub const BALL_SHEET_Y: f32 = 48.0;

    /// Menu background scroll
    pub const MENU_BACKGROUND_WIDTH: f32 = 1920.0;
    pub const MENU_BACKGROUND_HEIGHT: f32 = 1080.0;
    pub const MENU_BACKGROUND_PIXELS_PER_FRAME: f32 = 1.0;
    pub const MENU_BACKGROUND_FRAME_MS: f32 = TIME_STEP_MS * 2.0;
}

/// Round half away from zero and convert to a pixel coordinate
#[inline]
pub fn round_to_i32(v: f32) -> i32 {
    if v > 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_i32(1.4), 1);
        assert_eq!(round_to_i32(1.5), 2);
        assert_eq!(round_to_i32(-1.5), -2);
        assert_eq!(round_to_i32(-0.2), 0);
    }

    #[test]
    fn test_grid_constants() {
        assert_eq!(consts::BLOCK_COLUMNS, 24);
        assert_eq!(consts::PADDLE_MAX_WIDTH, 208.0);
    }
}
