//! End-to-end flow through the driver using only window input

use breakout::audio::LogBackend;
use breakout::consts::*;
use breakout::platform::{InputEvent, Key};
use breakout::sim::{Background, GamePhase, MenuState, StackedMenuLayout};
use breakout::{Game, Settings};
use glam::Vec2;

type TestGame = Game<LogBackend, StackedMenuLayout>;

fn game() -> TestGame {
    let settings = Settings {
        seed: 42,
        ..Default::default()
    };
    Game::new(&settings, LogBackend, StackedMenuLayout::default())
}

fn click(game: &mut TestGame, pos: Vec2) {
    game.frame(&[InputEvent::MouseMove(pos), InputEvent::MouseDown], TIME_STEP_MS);
    game.frame(&[InputEvent::MouseUp], TIME_STEP_MS);
}

/// Run idle frames until `done` holds, up to `max` frames
fn run_until(game: &mut TestGame, max: u32, done: impl Fn(&TestGame) -> bool) -> bool {
    for _ in 0..max {
        if done(game) {
            return true;
        }
        game.frame(&[], TIME_STEP_MS);
    }
    done(game)
}

fn start(game: &mut TestGame) {
    let new_game = game.layout().new_game.rect.center();
    click(game, new_game);
    assert!(run_until(game, 5, |g| g.machine().phase == GamePhase::Play));
}

#[test]
fn test_ball_lost_returns_to_menu() {
    let mut game = game();
    start(&mut game);
    assert_eq!(game.background(), Background::Level(1));
    assert_eq!(game.sprites().len(), 1 + 3 + 1 + 84);

    // Launch straight up, then park the paddle against the left wall
    game.frame(&[InputEvent::KeyDown(Key::Up), InputEvent::KeyDown(Key::Left)], TIME_STEP_MS);
    let session = game.machine().session.as_ref().unwrap();
    assert!(!session.ball.is_held());

    assert!(run_until(&mut game, 2000, |g| g.machine().phase == GamePhase::GameOver));
    assert_eq!(game.background(), Background::GameOver);
    // Banner shows only the backdrop
    assert_eq!(game.sprites().len(), 1);

    let banner_frames = (GAME_OVER_SHOW_MS / TIME_STEP_MS) as u32 + 2;
    assert!(run_until(&mut game, banner_frames, |g| g.machine().phase == GamePhase::Menu));
    assert!(game.machine().session.is_none());
    assert_eq!(game.machine().level, FIRST_LEVEL);
    assert_eq!(game.background(), Background::Menu);
}

#[test]
fn test_pause_and_continue_keeps_session() {
    let mut game = game();
    start(&mut game);
    game.frame(&[InputEvent::KeyDown(Key::Right)], TIME_STEP_MS * 10.0);
    game.frame(&[InputEvent::KeyUp(Key::Right)], TIME_STEP_MS);
    let paddle_x = game.machine().session.as_ref().unwrap().paddle.pos.x;
    assert!(paddle_x > 516.0);

    game.frame(&[InputEvent::KeyDown(Key::Escape)], TIME_STEP_MS);
    assert_eq!(game.machine().phase, GamePhase::Menu);
    assert_eq!(game.background(), Background::Menu);

    // Paused session holds still while the menu runs
    run_until(&mut game, 30, |_| false);
    assert_eq!(game.machine().session.as_ref().unwrap().paddle.pos.x, paddle_x);

    let continue_game = game.layout().continue_game.rect.center();
    click(&mut game, continue_game);
    assert!(run_until(&mut game, 5, |g| g.machine().phase == GamePhase::Play));
    assert_eq!(game.machine().menu.state, MenuState::None);
    assert_eq!(game.machine().session.as_ref().unwrap().paddle.pos.x, paddle_x);
    assert_eq!(game.background(), Background::Level(1));
}

#[test]
fn test_exit_item_quits() {
    let mut game = game();
    let exit = game.layout().exit_game.rect.center();
    game.frame(&[InputEvent::MouseMove(exit), InputEvent::MouseDown], TIME_STEP_MS);
    assert!(!game.is_running());
    // Nothing advances once quitting
    assert_eq!(game.frame(&[InputEvent::MouseUp], TIME_STEP_MS), 1);
    assert_eq!(game.machine().phase, GamePhase::Menu);
}

#[test]
fn test_instructions_and_back() {
    let mut game = game();
    let instruction = game.layout().instruction.rect.center();
    click(&mut game, instruction);
    assert!(run_until(&mut game, 5, |g| g.machine().menu.state == MenuState::Instructions));

    let back = game.layout().back.rect.center();
    game.frame(&[InputEvent::MouseMove(back)], TIME_STEP_MS);
    assert!(game.layout().back.hovering);
    assert_eq!(game.sprites().len(), 2);

    click(&mut game, back);
    assert!(run_until(&mut game, 5, |g| g.machine().menu.state == MenuState::None));
    assert!(game.is_running());
}
