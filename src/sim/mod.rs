//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (blocks in grid order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod command;
pub mod menu;
pub mod phase;
pub mod state;
pub mod tick;

pub use aabb::{Axis, AxisBox};
pub use collision::{BlockFace, CollisionResult, ball_block_face, box_collision, paddle_bounce_angle};
pub use command::{Background, Command};
pub use menu::{MenuItem, MenuLayout, MenuLayoutProvider, MenuMachine, MenuState, Pointer, StackedMenuLayout};
pub use phase::{GameMachine, GamePhase, MachineInput, PhaseTimers, Transition, Trigger, transition};
pub use state::{Ball, Block, BlockKind, Debris, DebrisState, Explosion, Paddle, Score, Session};
pub use tick::{GameEvent, TickInput, tick};
