//! Sound requests and playback policy
//!
//! The simulation only asks for sounds; an `AudioBackend` does the playing.
//! Like a single music channel, one sound plays at a time, and each request
//! says what to do if something is already playing.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Block destroyed
    Explosion,
    /// Pointer moved onto a menu item
    MenuHover,
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits block (doesn't break)
    BlockHit,
}

/// What to do when a sound is already playing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayPolicy {
    /// Skip the request
    IfIdle,
    /// Stop the current sound and play
    Interrupt,
    /// Fade the current sound out over the given milliseconds, then play
    InterruptWithFade(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundRequest {
    pub effect: SoundEffect,
    pub policy: PlayPolicy,
}

impl SoundRequest {
    pub fn new(effect: SoundEffect, policy: PlayPolicy) -> Self {
        Self { effect, policy }
    }
}

/// Playback device
pub trait AudioBackend {
    fn is_playing(&self) -> bool;
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn halt(&mut self);
    fn fade_out(&mut self, ms: f32);
}

/// Backend that only logs; nothing ever keeps playing
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn is_playing(&self) -> bool {
        false
    }

    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("Play {effect:?} at volume {volume:.2}");
    }

    fn halt(&mut self) {
        log::debug!("Halt audio");
    }

    fn fade_out(&mut self, ms: f32) {
        log::debug!("Fade out audio over {ms}ms");
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Apply a request's policy against the backend
    ///
    /// Returns whether the sound was started.
    pub fn handle(&mut self, request: SoundRequest) -> bool {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return false;
        }

        if self.backend.is_playing() {
            match request.policy {
                PlayPolicy::IfIdle => return false,
                PlayPolicy::Interrupt => self.backend.halt(),
                PlayPolicy::InterruptWithFade(ms) => self.backend.fade_out(ms),
            }
        }
        self.backend.play(request.effect, vol);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        playing: bool,
        log: Vec<String>,
    }

    impl AudioBackend for Recorder {
        fn is_playing(&self) -> bool {
            self.playing
        }

        fn play(&mut self, effect: SoundEffect, _volume: f32) {
            self.log.push(format!("play {effect:?}"));
            self.playing = true;
        }

        fn halt(&mut self) {
            self.log.push("halt".into());
            self.playing = false;
        }

        fn fade_out(&mut self, ms: f32) {
            self.log.push(format!("fade {ms}"));
            self.playing = false;
        }
    }

    #[test]
    fn test_if_idle_skips_while_playing() {
        let mut audio = AudioManager::new(Recorder::default());
        assert!(audio.handle(SoundRequest::new(SoundEffect::BlockHit, PlayPolicy::IfIdle)));
        assert!(!audio.handle(SoundRequest::new(SoundEffect::MenuHover, PlayPolicy::IfIdle)));
        assert_eq!(audio.backend().log, vec!["play BlockHit"]);
    }

    #[test]
    fn test_interrupt_policies() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.handle(SoundRequest::new(SoundEffect::BlockHit, PlayPolicy::IfIdle));
        audio.handle(SoundRequest::new(SoundEffect::PaddleHit, PlayPolicy::Interrupt));
        audio.handle(SoundRequest::new(SoundEffect::Explosion, PlayPolicy::InterruptWithFade(1500.0)));
        assert_eq!(
            audio.backend().log,
            vec!["play BlockHit", "halt", "play PaddleHit", "fade 1500", "play Explosion"]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        assert!(!audio.handle(SoundRequest::new(SoundEffect::PaddleHit, PlayPolicy::Interrupt)));
        audio.set_muted(false);
        audio.set_master_volume(0.0);
        assert!(!audio.handle(SoundRequest::new(SoundEffect::PaddleHit, PlayPolicy::Interrupt)));
        assert!(audio.backend().log.is_empty());
    }
}
