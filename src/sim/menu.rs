//! Menu state machine
//!
//! Hit-tests the pointer against rectangles supplied by a layout provider.
//! Choices that start or resume play are left in `MenuMachine::state` for
//! the game machine to consume.

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::aabb::AxisBox;
use super::command::Command;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MenuState {
    /// Root menu
    #[default]
    None,
    NewGame,
    Continue,
    /// Instructions were picked; shown from the next update
    Instruction,
    Instructions,
    /// Leaving the instructions; root menu from the next update
    Back,
    Exit,
}

/// A clickable menu entry
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuItem {
    pub rect: AxisBox,
    pub hovering: bool,
}

impl MenuItem {
    pub fn new(rect: AxisBox) -> Self {
        Self { rect, hovering: false }
    }
}

/// Rectangles for every menu entry, filled in by a `MenuLayoutProvider`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuLayout {
    pub new_game: MenuItem,
    pub continue_game: MenuItem,
    pub exit_game: MenuItem,
    pub instruction: MenuItem,
    /// "Go back" on the instructions screen
    pub back: MenuItem,
}

impl MenuLayout {
    /// Root entries in hit-test order
    fn root_items_mut(&mut self) -> [(MenuState, &mut MenuItem); 4] {
        [
            (MenuState::NewGame, &mut self.new_game),
            (MenuState::Continue, &mut self.continue_game),
            (MenuState::Exit, &mut self.exit_game),
            (MenuState::Instruction, &mut self.instruction),
        ]
    }

    pub fn clear_hover(&mut self) {
        for (_, item) in self.root_items_mut() {
            item.hovering = false;
        }
        self.back.hovering = false;
    }
}

/// Computes menu geometry; the core only reads rectangles and writes hover flags
pub trait MenuLayoutProvider {
    fn relayout(&mut self, layout: &mut MenuLayout, session_active: bool);
}

/// Entries of one size stacked down the centre of the window
///
/// "Continue" is only placed while a session is live; otherwise it keeps its
/// last rectangle and is skipped by the hit test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedMenuLayout {
    pub title_height: f32,
    pub item_size: Vec2,
    /// Top of the "go back" entry on the instructions screen
    pub back_top: f32,
}

impl Default for StackedMenuLayout {
    fn default() -> Self {
        Self {
            title_height: 64.0,
            item_size: Vec2::new(160.0, 32.0),
            back_top: 520.0,
        }
    }
}

impl StackedMenuLayout {
    fn centered(&self, top: f32) -> AxisBox {
        AxisBox::new(Vec2::new(WINDOW_WIDTH / 2.0 - self.item_size.x / 2.0, top), self.item_size)
    }
}

impl MenuLayoutProvider for StackedMenuLayout {
    fn relayout(&mut self, layout: &mut MenuLayout, session_active: bool) {
        let gap = self.item_size.y + MENU_OFFSET_Y;
        let new_game_top = MENU_OFFSET_Y + self.title_height + MENU_OFFSET_Y * 2.0;
        layout.new_game.rect = self.centered(new_game_top);

        let mut exit_top = new_game_top + gap;
        if session_active {
            layout.continue_game.rect = self.centered(exit_top);
            exit_top += gap;
        }
        layout.exit_game.rect = self.centered(exit_top);
        layout.instruction.rect = self.centered(exit_top + self.item_size.y + MENU_OFFSET_Y * 2.0);
        layout.back.rect = self.centered(self.back_top);
    }
}

/// Pointer position and left button state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pointer {
    pub pos: Vec2,
    pub pressed: bool,
}

/// Slow pan around the edges of the oversized menu backdrop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MenuBackground {
    /// Pan offset in steps of `MENU_BACKGROUND_PIXELS_PER_FRAME`
    pub frame: UVec2,
    pub time_to_next_frame: f32,
}

impl Default for MenuBackground {
    fn default() -> Self {
        Self {
            frame: UVec2::ZERO,
            time_to_next_frame: MENU_BACKGROUND_FRAME_MS,
        }
    }
}

impl MenuBackground {
    /// Source offset into the backdrop image
    pub fn offset(&self) -> Vec2 {
        self.frame.as_vec2() * MENU_BACKGROUND_PIXELS_PER_FRAME
    }

    /// Right along the top, down the right, left along the bottom, up the left
    pub fn step(&mut self, dt: f32) {
        self.time_to_next_frame -= dt;
        if self.time_to_next_frame > 0.0 {
            return;
        }
        self.time_to_next_frame = MENU_BACKGROUND_FRAME_MS;

        let offset = self.offset();
        if offset.y > MENU_BACKGROUND_HEIGHT - WINDOW_HEIGHT && self.frame.x != 0 {
            self.frame.x -= 1;
        } else if offset.x > MENU_BACKGROUND_WIDTH - WINDOW_WIDTH {
            self.frame.y += 1;
        } else if self.frame.y == 0 {
            self.frame.x += 1;
        } else if self.frame.x == 0 {
            self.frame.y -= 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuMachine {
    pub state: MenuState,
    /// Clicks are ignored until this drains
    pub cooldown_ms: f32,
    pub background: MenuBackground,
}

impl MenuMachine {
    /// Run one menu tick; returns external commands (sounds, quit)
    ///
    /// `NewGame`, `Continue` and `Exit` are left in place for the caller.
    pub fn update(
        &mut self,
        layout: &mut MenuLayout,
        pointer: &Pointer,
        session_active: bool,
        dt: f32,
    ) -> Vec<Command> {
        let mut out = Vec::new();
        match self.state {
            MenuState::None => {
                self.background.step(dt);
                if self.cooldown_ms > 0.0 {
                    self.cooldown_ms -= dt;
                } else {
                    self.update_root(layout, pointer, session_active, &mut out);
                }
            }
            MenuState::Instruction => self.state = MenuState::Instructions,
            MenuState::Instructions => {
                self.background.step(dt);
                self.update_instructions(layout, pointer, &mut out);
            }
            MenuState::Back => self.state = MenuState::None,
            MenuState::NewGame | MenuState::Continue | MenuState::Exit => {}
        }
        out
    }

    fn update_root(
        &mut self,
        layout: &mut MenuLayout,
        pointer: &Pointer,
        session_active: bool,
        out: &mut Vec<Command>,
    ) {
        let mut items = layout.root_items_mut();
        let hit = items.iter().position(|(target, item)| {
            (session_active || *target != MenuState::Continue) && item.rect.contains_point(pointer.pos)
        });

        match hit {
            Some(i) if pointer.pressed => {
                self.state = items[i].0;
                log::debug!("Menu selected {:?}", self.state);
                if self.state == MenuState::Exit {
                    out.push(Command::Quit);
                }
            }
            Some(i) => {
                let was_hovering = items[i].1.hovering;
                for (_, item) in items.iter_mut() {
                    item.hovering = false;
                }
                items[i].1.hovering = true;
                if !was_hovering {
                    out.push(Command::menu_hover_sound());
                }
            }
            None => {
                for (_, item) in items.iter_mut() {
                    item.hovering = false;
                }
            }
        }
    }

    fn update_instructions(&mut self, layout: &mut MenuLayout, pointer: &Pointer, out: &mut Vec<Command>) {
        let back = &mut layout.back;
        if !back.rect.contains_point(pointer.pos) {
            back.hovering = false;
        } else if pointer.pressed {
            self.state = MenuState::Back;
            self.cooldown_ms = CLICK_COOLDOWN_MS;
        } else if !back.hovering {
            back.hovering = true;
            out.push(Command::menu_hover_sound());
        }
    }

    /// Quit request from the window
    pub fn exit(&mut self) {
        self.state = MenuState::Exit;
    }

    pub fn is_exiting(&self) -> bool {
        self.state == MenuState::Exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(session_active: bool) -> MenuLayout {
        let mut layout = MenuLayout::default();
        StackedMenuLayout::default().relayout(&mut layout, session_active);
        layout
    }

    fn at(item: &MenuItem, pressed: bool) -> Pointer {
        Pointer {
            pos: item.rect.center(),
            pressed,
        }
    }

    #[test]
    fn test_stacked_layout_order() {
        let without = layout(false);
        assert!(without.new_game.rect.bottom() < without.exit_game.rect.top());
        assert!(without.exit_game.rect.bottom() < without.instruction.rect.top());

        let with = layout(true);
        assert!(with.new_game.rect.bottom() < with.continue_game.rect.top());
        assert!(with.continue_game.rect.bottom() < with.exit_game.rect.top());
        assert_eq!(with.continue_game.rect.top(), without.exit_game.rect.top());
    }

    #[test]
    fn test_hover_plays_sound_once() {
        let mut menu = MenuMachine::default();
        let mut layout = layout(false);
        let pointer = at(&layout.new_game, false);

        let out = menu.update(&mut layout, &pointer, false, TIME_STEP_MS);
        assert_eq!(out, vec![Command::menu_hover_sound()]);
        assert!(layout.new_game.hovering);

        let out = menu.update(&mut layout, &pointer, false, TIME_STEP_MS);
        assert!(out.is_empty());

        let pointer = at(&layout.exit_game, false);
        let out = menu.update(&mut layout, &pointer, false, TIME_STEP_MS);
        assert_eq!(out.len(), 1);
        assert!(!layout.new_game.hovering);
        assert!(layout.exit_game.hovering);

        let away = Pointer::default();
        menu.update(&mut layout, &away, false, TIME_STEP_MS);
        assert!(!layout.exit_game.hovering);
        assert_eq!(menu.state, MenuState::None);
    }

    #[test]
    fn test_click_selects_item() {
        let mut menu = MenuMachine::default();
        let mut layout = layout(false);
        let pointer = at(&layout.new_game, true);
        menu.update(&mut layout, &pointer, false, TIME_STEP_MS);
        assert_eq!(menu.state, MenuState::NewGame);
    }

    #[test]
    fn test_continue_needs_session() {
        let mut layout = layout(true);
        let pointer = at(&layout.continue_game, true);

        let mut menu = MenuMachine::default();
        menu.update(&mut layout, &pointer, false, TIME_STEP_MS);
        assert_eq!(menu.state, MenuState::None);

        menu.update(&mut layout, &pointer, true, TIME_STEP_MS);
        assert_eq!(menu.state, MenuState::Continue);
    }

    #[test]
    fn test_exit_click_requests_quit() {
        let mut menu = MenuMachine::default();
        let mut layout = layout(false);
        let pointer = at(&layout.exit_game, true);
        let out = menu.update(&mut layout, &pointer, false, TIME_STEP_MS);
        assert_eq!(out, vec![Command::Quit]);
        assert!(menu.is_exiting());
    }

    #[test]
    fn test_instructions_round_trip_with_cooldown() {
        let mut menu = MenuMachine::default();
        let mut layout = layout(false);

        let instruction = at(&layout.instruction, true);
        menu.update(&mut layout, &instruction, false, TIME_STEP_MS);
        assert_eq!(menu.state, MenuState::Instruction);
        menu.update(&mut layout, &Pointer::default(), false, TIME_STEP_MS);
        assert_eq!(menu.state, MenuState::Instructions);

        let hover_back = at(&layout.back, false);
        let out = menu.update(&mut layout, &hover_back, false, TIME_STEP_MS);
        assert_eq!(out, vec![Command::menu_hover_sound()]);
        assert!(layout.back.hovering);

        let click_back = at(&layout.back, true);
        menu.update(&mut layout, &click_back, false, TIME_STEP_MS);
        assert_eq!(menu.state, MenuState::Back);
        assert_eq!(menu.cooldown_ms, CLICK_COOLDOWN_MS);
        menu.update(&mut layout, &Pointer::default(), false, TIME_STEP_MS);
        assert_eq!(menu.state, MenuState::None);

        // Held button over "new game" is ignored until the cooldown drains
        let held = at(&layout.new_game, true);
        let mut ticks = 0;
        while menu.state == MenuState::None {
            menu.update(&mut layout, &held, false, TIME_STEP_MS);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(menu.state, MenuState::NewGame);
        assert!(ticks >= 10);
    }

    #[test]
    fn test_background_walks_perimeter() {
        let mut bg = MenuBackground::default();
        let mut max = UVec2::ZERO;
        let mut back_home = false;
        for _ in 0..20_000 {
            bg.step(MENU_BACKGROUND_FRAME_MS);
            max = max.max(bg.frame);
            if bg.frame == UVec2::ZERO {
                back_home = true;
                break;
            }
        }
        assert!(back_home);
        assert_eq!(max, UVec2::new(841, 361));
    }
}
