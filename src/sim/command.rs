//! Side effects requested by the state machines
//!
//! Transitions describe what should happen as a list of commands. Internal
//! commands are applied to the game machine itself; external ones are
//! handed to the driver for audio, menu layout and background selection.

use serde::{Deserialize, Serialize};

use crate::audio::{PlayPolicy, SoundEffect, SoundRequest};
use crate::consts::EXPLOSION_SOUND_FADE_MS;

/// Backdrop drawn behind the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Background {
    Level(u8),
    NextLevel,
    GameOver,
    Completed,
    Menu,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    // Internal
    StartSession { level: u8 },
    EndSession,
    SetLevel(u8),
    /// Start a new game on the next menu update
    QueueNewGame,
    ResetPhaseTimers,

    // External
    PlaySound(SoundRequest),
    SelectBackground(Background),
    RelayoutMenu { session_active: bool },
    Quit,
}

impl Command {
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Command::PlaySound(_) | Command::SelectBackground(_) | Command::RelayoutMenu { .. } | Command::Quit
        )
    }

    pub fn sound(effect: SoundEffect, policy: PlayPolicy) -> Self {
        Command::PlaySound(SoundRequest::new(effect, policy))
    }

    pub fn block_hit_sound() -> Self {
        Self::sound(SoundEffect::BlockHit, PlayPolicy::IfIdle)
    }

    pub fn explosion_sound() -> Self {
        Self::sound(
            SoundEffect::Explosion,
            PlayPolicy::InterruptWithFade(EXPLOSION_SOUND_FADE_MS),
        )
    }

    pub fn paddle_hit_sound() -> Self {
        Self::sound(SoundEffect::PaddleHit, PlayPolicy::Interrupt)
    }

    pub fn menu_hover_sound() -> Self {
        Self::sound(SoundEffect::MenuHover, PlayPolicy::IfIdle)
    }
}
