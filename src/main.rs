//! Breakout headless runner
//!
//! Drives the game at a fixed frame rate with a scripted player: clicks New
//! Game from the menu, keeps the paddle under the ball and launches it.
//! Prints a JSON summary when the demo time runs out or the game quits.

use serde::Serialize;

use breakout::audio::LogBackend;
use breakout::consts::*;
use breakout::platform::{InputEvent, Key};
use breakout::sim::{GameMachine, GamePhase, MenuLayout, MenuState, StackedMenuLayout};
use breakout::{Game, Settings};

/// Paddle centre may drift this far from the ball before steering
const STEER_DEADBAND: f32 = 6.0;

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    simulated_seconds: f32,
    games_started: u32,
    game_overs: u32,
    highest_level: u8,
    best_points: u32,
    sprites_last_frame: usize,
    final_phase: GamePhase,
}

/// Scripted player
#[derive(Debug, Default)]
struct Autopilot {
    pointer_down: bool,
    steering: Option<Key>,
}

impl Autopilot {
    fn events(&mut self, machine: &GameMachine, layout: &MenuLayout) -> Vec<InputEvent> {
        let mut events = Vec::new();
        match machine.phase {
            GamePhase::Menu if machine.menu.state == MenuState::None => {
                if self.pointer_down {
                    events.push(InputEvent::MouseUp);
                } else {
                    events.push(InputEvent::MouseMove(layout.new_game.rect.center()));
                    events.push(InputEvent::MouseDown);
                }
                self.pointer_down = !self.pointer_down;
            }
            GamePhase::Play => {
                if let Some(session) = &machine.session {
                    if session.ball.is_held() {
                        events.push(InputEvent::KeyDown(Key::Up));
                    }
                    let offset = session.ball.bounds().center().x - session.paddle.bounds().center().x;
                    let wanted = if offset > STEER_DEADBAND {
                        Some(Key::Right)
                    } else if offset < -STEER_DEADBAND {
                        Some(Key::Left)
                    } else {
                        None
                    };
                    self.steer(wanted, &mut events);
                }
            }
            _ => self.steer(None, &mut events),
        }
        events
    }

    fn steer(&mut self, wanted: Option<Key>, events: &mut Vec<InputEvent>) {
        if wanted == self.steering {
            return;
        }
        if let Some(key) = self.steering {
            events.push(InputEvent::KeyUp(key));
        }
        if let Some(key) = wanted {
            events.push(InputEvent::KeyDown(key));
        }
        self.steering = wanted;
    }
}

fn main() {
    env_logger::init();
    log::info!("Breakout (headless) starting...");

    let settings = Settings::load();
    log::info!("Seed: {:#x}, demo: {}s, autopilot: {}", settings.seed, settings.demo_seconds, settings.autopilot);

    let mut game = Game::new(&settings, LogBackend, StackedMenuLayout::default());
    let mut pilot = Autopilot::default();
    let mut summary = RunSummary {
        seed: settings.seed,
        highest_level: FIRST_LEVEL,
        ..Default::default()
    };

    let total_ms = settings.demo_seconds.max(0.0) * 1000.0;
    let mut elapsed_ms = 0.0;
    let mut last_phase = game.machine().phase;

    while game.is_running() && elapsed_ms < total_ms {
        let events = if settings.autopilot {
            pilot.events(game.machine(), game.layout())
        } else {
            Vec::new()
        };

        summary.ticks += u64::from(game.frame(&events, TIME_STEP_MS));
        elapsed_ms += TIME_STEP_MS;

        let machine = game.machine();
        if let Some(session) = &machine.session {
            summary.best_points = summary.best_points.max(session.score.points);
            summary.highest_level = summary.highest_level.max(session.level());
        }
        if machine.phase != last_phase {
            log::info!("Phase {:?} -> {:?}", last_phase, machine.phase);
            match machine.phase {
                GamePhase::Play if last_phase == GamePhase::Menu => summary.games_started += 1,
                GamePhase::GameOver => summary.game_overs += 1,
                _ => {}
            }
            last_phase = machine.phase;
        }
    }

    summary.simulated_seconds = elapsed_ms / 1000.0;
    summary.sprites_last_frame = game.sprites().len();
    summary.final_phase = game.machine().phase;

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize run summary: {err}"),
    }
}
