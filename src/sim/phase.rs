//! Game phase machine
//!
//! `transition` is the whole phase table: given the current phase and a
//! trigger it returns the next phase and the commands that set it up.
//! `GameMachine` owns the session and runs play, phase timers and the menu
//! once per fixed tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::command::{Background, Command};
use super::menu::{MenuLayout, MenuMachine, MenuState, Pointer};
use super::state::Session;
use super::tick::{GameEvent, TickInput, tick};
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Play,
    GameOver,
    NextLevel,
    CompletedGame,
}

/// Something that may move the game to another phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    NewGameRequested,
    ContinueRequested,
    PauseRequested,
    BallLost,
    BlocksReachedPaddle,
    BlocksCleared,
    /// The current phase's banner has been shown long enough
    DisplayElapsed,
}

impl Trigger {
    /// Play events that end the round
    pub fn from_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::BallLost => Some(Trigger::BallLost),
            GameEvent::BlocksReachedPaddle => Some(Trigger::BlocksReachedPaddle),
            GameEvent::BlocksCleared => Some(Trigger::BlocksCleared),
            GameEvent::BlockDamaged { .. } | GameEvent::BlockDestroyed { .. } | GameEvent::PaddleHit => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: GamePhase,
    pub commands: Vec<Command>,
}

/// Phase table; `None` means the trigger does not apply in `phase`
pub fn transition(phase: GamePhase, trigger: Trigger, level: u8) -> Option<Transition> {
    use GamePhase::*;
    use Trigger::*;

    let (next, commands) = match (phase, trigger) {
        (Menu, NewGameRequested) => (
            Play,
            vec![
                Command::ResetPhaseTimers,
                Command::StartSession { level },
                Command::SelectBackground(Background::Level(level)),
                Command::RelayoutMenu { session_active: true },
            ],
        ),
        (Menu, ContinueRequested) => (Play, vec![Command::SelectBackground(Background::Level(level))]),
        (Play, PauseRequested) => (Menu, vec![Command::SelectBackground(Background::Menu)]),
        (Play, BallLost | BlocksReachedPaddle) => (GameOver, vec![Command::SelectBackground(Background::GameOver)]),
        (Play, BlocksCleared) if level >= LAST_LEVEL => {
            (CompletedGame, vec![Command::SelectBackground(Background::Completed)])
        }
        (Play, BlocksCleared) => (NextLevel, vec![Command::SelectBackground(Background::NextLevel)]),
        (NextLevel, DisplayElapsed) => (Menu, vec![Command::SetLevel(level + 1), Command::QueueNewGame]),
        (GameOver | CompletedGame, DisplayElapsed) => (
            Menu,
            vec![
                Command::SetLevel(FIRST_LEVEL),
                Command::EndSession,
                Command::RelayoutMenu { session_active: false },
                Command::SelectBackground(Background::Menu),
            ],
        ),
        _ => return None,
    };
    Some(Transition { next, commands })
}

/// How long each banner phase has been showing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhaseTimers {
    pub game_over: f32,
    pub next_level: f32,
    pub completed_game: f32,
}

impl PhaseTimers {
    /// Accumulate time for a banner phase; true once its display time has passed
    pub fn advance(&mut self, phase: GamePhase, dt: f32) -> bool {
        let (timer, limit) = match phase {
            GamePhase::GameOver => (&mut self.game_over, GAME_OVER_SHOW_MS),
            GamePhase::NextLevel => (&mut self.next_level, NEXT_LEVEL_SHOW_MS),
            GamePhase::CompletedGame => (&mut self.completed_game, COMPLETED_GAME_SHOW_MS),
            GamePhase::Menu | GamePhase::Play => return false,
        };
        *timer += dt;
        *timer > limit
    }
}

/// Per-tick input for the whole machine
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MachineInput {
    pub tick: TickInput,
    pub pointer: Pointer,
    /// Escape: leave play for the menu
    pub pause: bool,
    /// Window closed
    pub quit: bool,
}

/// Owns the session and sequences menu, play and banner phases
#[derive(Debug, Clone)]
pub struct GameMachine {
    pub phase: GamePhase,
    /// Level the next new game starts at
    pub level: u8,
    pub session: Option<Session>,
    pub timers: PhaseTimers,
    pub menu: MenuMachine,
    rng: Pcg32,
}

impl GameMachine {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::Menu,
            level: FIRST_LEVEL,
            session: None,
            timers: PhaseTimers::default(),
            menu: MenuMachine::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.menu.is_exiting()
    }

    /// Advance one fixed tick; returns the commands for the driver
    pub fn update(&mut self, input: &MachineInput, layout: &mut MenuLayout, dt: f32) -> Vec<Command> {
        let mut out = Vec::new();
        if !self.is_running() {
            return out;
        }
        if input.quit {
            self.menu.exit();
            out.push(Command::Quit);
            return out;
        }

        if self.phase == GamePhase::Play && input.pause {
            self.fire(Trigger::PauseRequested, &mut out);
        }

        if self.phase == GamePhase::Play {
            self.update_play(&input.tick, dt, &mut out);
        }

        if self.timers.advance(self.phase, dt) {
            self.fire(Trigger::DisplayElapsed, &mut out);
        }

        if self.phase == GamePhase::Menu {
            self.update_menu(input, layout, dt, &mut out);
        }

        out
    }

    fn update_play(&mut self, input: &TickInput, dt: f32, out: &mut Vec<Command>) {
        debug_assert!(self.session.is_some(), "play phase without a session");
        let Some(session) = self.session.as_mut() else {
            log::error!("Play phase without a session");
            return;
        };

        let mut ending = None;
        for event in tick(session, input, dt) {
            match event {
                GameEvent::BlockDamaged { .. } => out.push(Command::block_hit_sound()),
                GameEvent::BlockDestroyed { .. } => out.push(Command::explosion_sound()),
                GameEvent::PaddleHit => out.push(Command::paddle_hit_sound()),
                // Events arrive in tick order; a later ending overrides an
                // earlier one, so losing beats clearing the last block
                GameEvent::BallLost | GameEvent::BlocksReachedPaddle | GameEvent::BlocksCleared => {
                    ending = Trigger::from_event(event);
                }
            }
        }
        if let Some(trigger) = ending {
            self.fire(trigger, out);
        }
    }

    fn update_menu(&mut self, input: &MachineInput, layout: &mut MenuLayout, dt: f32, out: &mut Vec<Command>) {
        match self.menu.state {
            MenuState::NewGame => {
                self.menu.state = MenuState::None;
                layout.clear_hover();
                self.fire(Trigger::NewGameRequested, out);
            }
            MenuState::Continue => {
                self.menu.state = MenuState::None;
                layout.clear_hover();
                if self.session.is_some() {
                    self.fire(Trigger::ContinueRequested, out);
                } else {
                    log::warn!("Continue requested without a session");
                }
            }
            _ => {
                let session_active = self.session.is_some();
                out.extend(self.menu.update(layout, &input.pointer, session_active, dt));
            }
        }
    }

    /// Apply a trigger if the phase table has an entry for it
    pub fn fire(&mut self, trigger: Trigger, out: &mut Vec<Command>) -> bool {
        let Some(Transition { next, commands }) = transition(self.phase, trigger, self.level) else {
            return false;
        };
        log::info!("Phase {:?} -> {:?} ({trigger:?}, level {})", self.phase, next, self.level);
        self.phase = next;
        for command in commands {
            self.apply(command, out);
        }
        true
    }

    fn apply(&mut self, command: Command, out: &mut Vec<Command>) {
        match command {
            Command::StartSession { level } => {
                self.session = Some(Session::new(level, &mut self.rng));
            }
            Command::EndSession => self.session = None,
            Command::SetLevel(level) => {
                log::info!("Level set to {level}");
                self.level = level;
            }
            Command::QueueNewGame => self.menu.state = MenuState::NewGame,
            Command::ResetPhaseTimers => self.timers = PhaseTimers::default(),
            external => {
                debug_assert!(external.is_external());
                out.push(external);
            }
        }
    }
}
