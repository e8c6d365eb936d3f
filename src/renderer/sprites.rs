//! Sprite list built from simulation state
//!
//! Read-only over the game machine; draw order is back to front.

use glam::Vec2;

use super::instance::{Sheet, SpriteInstance};
use crate::consts::*;
use crate::sim::{Background, GameMachine, GamePhase, MenuItem, MenuLayout, MenuState, Session};

/// Build every sprite for the current frame
pub fn build_sprites(machine: &GameMachine, layout: &MenuLayout, background: Background) -> Vec<SpriteInstance> {
    let mut sprites = vec![background_sprite(machine, background)];

    match machine.phase {
        GamePhase::Play => {
            if let Some(session) = &machine.session {
                push_session(&mut sprites, session);
            }
        }
        GamePhase::Menu => push_menu_hover(&mut sprites, machine, layout),
        GamePhase::GameOver | GamePhase::NextLevel | GamePhase::CompletedGame => {}
    }
    sprites
}

fn background_sprite(machine: &GameMachine, background: Background) -> SpriteInstance {
    let window = Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let (sheet, src) = match background {
        Background::Level(level) => (
            Sheet::LevelBackground(level),
            Vec2::new(LEVEL_BACKGROUND_WIDTH / 6.0, (LEVEL_BACKGROUND_HEIGHT - WINDOW_HEIGHT).abs()),
        ),
        Background::NextLevel => (Sheet::NextLevelBackground, window / 2.0),
        Background::GameOver => (Sheet::GameOverBackground, window / 4.0),
        Background::Completed => (Sheet::CompletedBackground, Vec2::ZERO),
        Background::Menu => (Sheet::MenuBackground, machine.menu.background.offset()),
    };
    SpriteInstance::textured(sheet, Vec2::ZERO, window, src)
}

fn push_session(sprites: &mut Vec<SpriteInstance>, session: &Session) {
    // Paddle: left cap, stretchable middle tiles, right cap
    let paddle = &session.paddle;
    let tile = Vec2::splat(PADDLE_FRAME_SIZE);
    let cap = PADDLE_START_WIDTH / 3.0;
    let middle = paddle.size.x - cap * 2.0;
    sprites.push(SpriteInstance::textured(
        Sheet::Sprites,
        paddle.pos,
        tile,
        Vec2::new(0.0, PADDLE_SHEET_ROW),
    ));
    let tiles = (middle / PADDLE_FRAME_SIZE) as u32;
    for i in 1..=tiles {
        sprites.push(SpriteInstance::textured(
            Sheet::Sprites,
            paddle.pos + Vec2::new(cap * i as f32, 0.0),
            tile,
            Vec2::new(PADDLE_FRAME_SIZE, PADDLE_SHEET_ROW),
        ));
    }
    sprites.push(SpriteInstance::textured(
        Sheet::Sprites,
        paddle.pos + Vec2::new(cap + middle, 0.0),
        tile,
        Vec2::new(PADDLE_FRAME_SIZE * 2.0, PADDLE_SHEET_ROW),
    ));

    let ball = &session.ball;
    sprites.push(SpriteInstance::textured(
        Sheet::Sprites,
        ball.pos,
        ball.size,
        Vec2::new(BALL_SHEET_X, BALL_SHEET_Y),
    ));

    let block_size = Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT);
    let explosion_size = Vec2::new(EXPLOSION_WIDTH, EXPLOSION_HEIGHT);
    for block in &session.blocks {
        if !block.is_destroyed() {
            let row = if block.is_damaged() { BLOCK_HEIGHT } else { 0.0 };
            sprites.push(SpriteInstance::textured(
                Sheet::Sprites,
                block.pos,
                block_size,
                Vec2::new(BLOCK_WIDTH * block.kind.index() as f32, row),
            ));
        }

        if block.debris_active {
            for chip in block.debris.iter().filter(|d| d.is_active()) {
                if chip.bounds().inside_area(WINDOW_WIDTH, WINDOW_HEIGHT) {
                    sprites.push(SpriteInstance::solid(chip.pos, chip.size, chip.color));
                }
            }
        }

        if block.explosion_active {
            let frame = block.explosion.frame.as_vec2() * explosion_size;
            sprites.push(SpriteInstance::textured(
                Sheet::Explosion,
                block.explosion.pos,
                explosion_size,
                frame,
            ));
        }
    }
}

fn push_menu_hover(sprites: &mut Vec<SpriteInstance>, machine: &GameMachine, layout: &MenuLayout) {
    let hovered = match machine.menu.state {
        MenuState::None => {
            let continue_game = machine.session.is_some().then_some(&layout.continue_game);
            [Some(&layout.new_game), continue_game, Some(&layout.exit_game), Some(&layout.instruction)]
                .into_iter()
                .flatten()
                .find(|item| item.hovering)
        }
        MenuState::Instructions => Some(&layout.back).filter(|item| item.hovering),
        _ => None,
    };
    if let Some(item) = hovered {
        sprites.push(hover_outline(item));
    }
}

fn hover_outline(item: &MenuItem) -> SpriteInstance {
    let border = Vec2::splat(MENU_HOVER_BORDER);
    SpriteInstance::outline(item.rect.pos - border / 2.0, item.rect.size + border, MENU_HOVER_COLOR)
}
