//! Window input folded into per-tick machine input

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{MachineInput, Pointer, TickInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    /// Launch
    Up,
    /// Pause to menu
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseMove(Vec2),
    MouseDown,
    MouseUp,
    Quit,
}

/// Held keys and pending one-shot requests
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub move_requested: bool,
    pub direction: i8,
    pub pointer: Pointer,
    /// One-shot: cleared after the tick that sees it
    pub launch: bool,
    /// One-shot: cleared after the tick that sees it
    pub pause: bool,
    pub quit: bool,
}

impl InputState {
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(Key::Left) => {
                self.direction = -1;
                self.move_requested = true;
            }
            InputEvent::KeyDown(Key::Right) => {
                self.direction = 1;
                self.move_requested = true;
            }
            InputEvent::KeyDown(Key::Up) => self.launch = true,
            InputEvent::KeyDown(Key::Escape) => self.pause = true,
            // Releasing either arrow stops the paddle, even if the other is still held
            InputEvent::KeyUp(Key::Left | Key::Right) => self.move_requested = false,
            InputEvent::KeyUp(Key::Up | Key::Escape) => {}
            InputEvent::MouseMove(pos) => self.pointer.pos = pos,
            InputEvent::MouseDown => self.pointer.pressed = true,
            InputEvent::MouseUp => self.pointer.pressed = false,
            InputEvent::Quit => self.quit = true,
        }
    }

    pub fn snapshot(&self) -> MachineInput {
        MachineInput {
            tick: TickInput {
                move_requested: self.move_requested,
                direction: self.direction,
                launch: self.launch,
            },
            pointer: self.pointer,
            pause: self.pause,
            quit: self.quit,
        }
    }

    /// Clear one-shot inputs after processing
    pub fn clear_one_shots(&mut self) {
        self.launch = false;
        self.pause = false;
    }
}
