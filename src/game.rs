//! Fixed-timestep driver
//!
//! Folds window input into the simulation, runs as many fixed ticks as the
//! frame time allows, and routes the machine's commands to audio, the menu
//! layout provider and the backdrop selection.

use crate::audio::{AudioBackend, AudioManager};
use crate::platform::{FixedTimestep, InputEvent, InputState};
use crate::renderer::{SpriteInstance, build_sprites};
use crate::settings::Settings;
use crate::sim::{Background, Command, GameMachine, MenuLayout, MenuLayoutProvider};

pub struct Game<B: AudioBackend, L: MenuLayoutProvider> {
    machine: GameMachine,
    input: InputState,
    clock: FixedTimestep,
    audio: AudioManager<B>,
    layout: MenuLayout,
    layout_provider: L,
    background: Background,
}

impl<B: AudioBackend, L: MenuLayoutProvider> Game<B, L> {
    pub fn new(settings: &Settings, backend: B, mut layout_provider: L) -> Self {
        let mut audio = AudioManager::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(settings.muted);

        let mut layout = MenuLayout::default();
        layout_provider.relayout(&mut layout, false);

        Self {
            machine: GameMachine::new(settings.seed),
            input: InputState::default(),
            clock: FixedTimestep::default(),
            audio,
            layout,
            layout_provider,
            background: Background::Menu,
        }
    }

    /// Apply a frame's events and run the fixed ticks it pays for
    ///
    /// Returns the number of ticks run.
    pub fn frame(&mut self, events: &[InputEvent], elapsed_ms: f32) -> u32 {
        for event in events {
            self.input.apply(event);
        }

        let ticks = self.clock.advance(elapsed_ms);
        for _ in 0..ticks {
            if !self.step() {
                break;
            }
        }
        ticks
    }

    /// Run a single fixed tick with the current input; false once quitting
    pub fn step(&mut self) -> bool {
        let input = self.input.snapshot();
        let commands = self.machine.update(&input, &mut self.layout, self.clock.step());
        self.input.clear_one_shots();

        for command in commands {
            self.dispatch(command);
        }
        self.is_running()
    }

    fn dispatch(&mut self, command: Command) {
        match command {
            Command::PlaySound(request) => {
                self.audio.handle(request);
            }
            Command::SelectBackground(background) => self.background = background,
            Command::RelayoutMenu { session_active } => {
                self.layout_provider.relayout(&mut self.layout, session_active);
            }
            Command::Quit => log::info!("Quit requested"),
            internal => log::warn!("Internal command reached the driver: {internal:?}"),
        }
    }

    pub fn is_running(&self) -> bool {
        self.machine.is_running()
    }

    pub fn machine(&self) -> &GameMachine {
        &self.machine
    }

    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn audio(&self) -> &AudioManager<B> {
        &self.audio
    }

    /// Sprite list for the current state
    pub fn sprites(&self) -> Vec<SpriteInstance> {
        build_sprites(&self.machine, &self.layout, self.background)
    }
}
