//! Sound effect queue
//!
//! The sim emits effects into a queue; the platform layer drains and plays
//! them. Volume and mute are applied at queue time so the sim stays free of
//! audio-device concerns.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Answer button pressed
    ButtonPress,
    /// Memory card flipped face-up
    CardFlip,
    /// Memory pair matched
    CardMatch,
    /// Memory pair mismatched, flipping back
    CardMismatch,
    /// Sliding-puzzle tile starts moving
    TileSlide,
    /// Color pad flashes
    PadFlash,
    /// Color sequence entered wrong
    SequenceFail,
    /// A minigame was won
    MinigameWon,
    /// Puzzle piece starts its collect fade
    PieceCollected,
    /// All four pieces collected
    LevelComplete,
}

/// Queue of pending sound effects with their effective volumes
#[derive(Debug)]
pub struct SoundQueue {
    queued: Vec<(SoundEffect, f32)>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for SoundQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundQueue {
    pub fn new() -> Self {
        Self {
            queued: Vec::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Queue a sound effect at the current effective volume.
    /// Muted effects are dropped, not queued silent.
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.queued.push((effect, vol));
    }

    /// Hand all queued effects to the audio collaborator
    pub fn drain(&mut self) -> Vec<(SoundEffect, f32)> {
        std::mem::take(&mut self.queued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_queues_with_effective_volume() {
        let mut q = SoundQueue::new();
        q.set_master_volume(0.5);
        q.set_sfx_volume(0.5);
        q.play(SoundEffect::CardFlip);
        let drained = q.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].0, SoundEffect::CardFlip);
        assert!((drained[0].1 - 0.25).abs() < 1e-6);
        assert!(q.drain().is_empty());
    }

    #[test]
    fn test_muted_effects_are_dropped() {
        let mut q = SoundQueue::new();
        q.set_muted(true);
        q.play(SoundEffect::LevelComplete);
        assert!(q.drain().is_empty());
    }
}
