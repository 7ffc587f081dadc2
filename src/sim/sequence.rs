//! Color sequence memory minigame
//!
//! The one variant whose progression is an explicit state machine:
//! Waiting -> Showing -> Input -> Finished, falling back to Waiting on any
//! wrong entry. Playback timing is wall-clock: first flash 0.5 s after the
//! start press, then one flash every 0.7 s, each lit for 0.35 s.

use std::rc::Rc;

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::assets::{AssetBundle, ImageId};
use crate::audio::{SoundEffect, SoundQueue};
use crate::consts::{
    BUTTON_MARGIN, SEQUENCE_FLASH_SECS, SEQUENCE_GAP_SECS, SEQUENCE_LEAD_SECS,
};
use crate::gfx::Surface;
use crate::{Color, Rect};

use super::button::Button;
use super::event::GameEvent;

/// Radius of a color pad
const PAD_RADIUS: f32 = 70.0;
/// Distance from boundary center to each pad center
const RING_RADIUS: f32 = 150.0;

/// The four pad colors, in ring order (top, right, bottom, left)
pub const PAD_COLORS: [Color; 4] = [
    Color::rgb(220, 50, 50),
    Color::rgb(50, 180, 50),
    Color::rgb(60, 90, 220),
    Color::rgb(230, 200, 40),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencePhase {
    /// Start button shown, no sequence yet
    Waiting,
    /// Replaying the generated sequence
    Showing,
    /// Player echoes the sequence
    Input,
    /// Full sequence entered correctly
    Finished,
}

#[derive(Debug, Clone)]
pub struct ColorSequenceMemory {
    length: usize,
    phase: SequencePhase,
    sequence: Vec<usize>,
    entered: Vec<usize>,
    /// Pad centers, ring around the boundary center (set at layout)
    pads: [Vec2; 4],
    start_button: Button,
    /// When the start button was pressed, anchoring the playback schedule
    show_start: f64,
    /// Currently lit pad and when it goes dark
    flash: Option<(usize, f64)>,
    /// Show the try-again message after a mistake
    failed: bool,
    rng: Pcg32,
    assets: Rc<AssetBundle>,
}

impl ColorSequenceMemory {
    pub fn new(length: usize, seed: u64, assets: Rc<AssetBundle>) -> Self {
        assert!(length > 0, "sequence length must be positive");
        Self {
            length,
            phase: SequencePhase::Waiting,
            sequence: Vec::new(),
            entered: Vec::new(),
            pads: [Vec2::ZERO; 4],
            start_button: Button::new(Rect::default(), "Start"),
            show_start: 0.0,
            flash: None,
            failed: false,
            rng: Pcg32::seed_from_u64(seed),
            assets,
        }
    }

    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    pub fn entered(&self) -> &[usize] {
        &self.entered
    }

    pub fn pad_center(&self, pad: usize) -> Vec2 {
        self.pads[pad]
    }

    pub fn start_button(&self) -> &Button {
        &self.start_button
    }

    /// Place the pad ring and the start button
    pub fn layout(&mut self, bounds: Rect) {
        let center = bounds.center();
        self.pads = [
            center + Vec2::new(0.0, -RING_RADIUS),
            center + Vec2::new(RING_RADIUS, 0.0),
            center + Vec2::new(0.0, RING_RADIUS),
            center + Vec2::new(-RING_RADIUS, 0.0),
        ];
        let size = self.assets.size(ImageId::ButtonUp);
        self.start_button = Button::new(
            Rect::new(
                bounds.center().x - size.x / 2.0,
                bounds.bottom() - size.y - BUTTON_MARGIN,
                size.x,
                size.y,
            ),
            "Start",
        );
    }

    fn pad_under(&self, pos: Vec2) -> Option<usize> {
        self.pads
            .iter()
            .position(|&c| c.distance(pos) <= PAD_RADIUS)
    }

    /// When flash `i` of the playback lights up
    fn flash_start(&self, i: usize) -> f64 {
        self.show_start + SEQUENCE_LEAD_SECS + i as f64 * SEQUENCE_GAP_SECS
    }

    /// Drive playback/flash timing; report whether the sequence is done
    pub fn update(&mut self, now: f64) -> bool {
        if let Some((_, until)) = self.flash
            && now >= until
        {
            self.flash = None;
        }

        if self.phase == SequencePhase::Showing {
            // Light whichever scheduled flash covers `now`
            for (i, &pad) in self.sequence.iter().enumerate() {
                let start = self.flash_start(i);
                if now >= start && now < start + SEQUENCE_FLASH_SECS {
                    self.flash = Some((pad, start + SEQUENCE_FLASH_SECS));
                }
            }
            let last_end = self.flash_start(self.length - 1) + SEQUENCE_FLASH_SECS;
            if now >= last_end {
                self.phase = SequencePhase::Input;
            }
        }

        self.phase == SequencePhase::Finished
    }

    pub fn handle_event(&mut self, event: &GameEvent, now: f64, sounds: &mut SoundQueue) {
        match self.phase {
            SequencePhase::Waiting => {
                if self.start_button.handle_event(event, now, sounds) {
                    self.sequence = (0..self.length)
                        .map(|_| self.rng.random_range(0..PAD_COLORS.len()))
                        .collect();
                    self.entered.clear();
                    self.failed = false;
                    self.show_start = now;
                    self.phase = SequencePhase::Showing;
                }
            }
            SequencePhase::Input => {
                let GameEvent::PrimaryAction { pos } = event else {
                    return;
                };
                let Some(pad) = self.pad_under(*pos) else {
                    return;
                };
                self.flash = Some((pad, now + SEQUENCE_FLASH_SECS));

                if self.sequence[self.entered.len()] == pad {
                    self.entered.push(pad);
                    sounds.play(SoundEffect::PadFlash);
                    if self.entered.len() == self.length {
                        self.phase = SequencePhase::Finished;
                    }
                } else {
                    // Wrong pad: discard everything and start over
                    self.sequence.clear();
                    self.entered.clear();
                    self.failed = true;
                    self.start_button.reset();
                    self.phase = SequencePhase::Waiting;
                    sounds.play(SoundEffect::SequenceFail);
                }
            }
            SequencePhase::Showing | SequencePhase::Finished => {}
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for (i, &center) in self.pads.iter().enumerate() {
            let lit = matches!(self.flash, Some((pad, _)) if pad == i);
            let alpha = if lit { 255 } else { 100 };
            surface.fill_circle(center, PAD_RADIUS, PAD_COLORS[i], alpha);
        }

        match self.phase {
            SequencePhase::Waiting => {
                self.start_button.draw(surface);
                if self.failed {
                    let msg_center = self.start_button.rect.center() - Vec2::new(0.0, 120.0);
                    surface.text("Wrong sequence, try again!", msg_center, 36.0, Color::WHITE);
                }
            }
            SequencePhase::Showing => {
                let center = (self.pads[0] + self.pads[2]) / 2.0;
                surface.text("Watch...", center, 36.0, Color::WHITE);
            }
            SequencePhase::Input => {
                let center = (self.pads[0] + self.pads[2]) / 2.0;
                surface.text("Your turn!", center, 36.0, Color::WHITE);
            }
            SequencePhase::Finished => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: Rect = Rect { x: 960.0, y: 540.0, w: 960.0, h: 540.0 };

    fn game(length: usize, seed: u64) -> ColorSequenceMemory {
        let assets = Rc::new(AssetBundle::standard());
        let mut s = ColorSequenceMemory::new(length, seed, assets);
        s.layout(BOUNDS);
        s
    }

    fn press_start(s: &mut ColorSequenceMemory, now: f64, sounds: &mut SoundQueue) {
        let pos = s.start_button().rect.center();
        s.handle_event(&GameEvent::PrimaryAction { pos }, now, sounds);
    }

    fn press_pad(s: &mut ColorSequenceMemory, pad: usize, now: f64, sounds: &mut SoundQueue) {
        let pos = s.pad_center(pad);
        s.handle_event(&GameEvent::PrimaryAction { pos }, now, sounds);
    }

    /// Step updates at 60 Hz until `now` passes `until`
    fn run_until(s: &mut ColorSequenceMemory, now: &mut f64, until: f64) {
        while *now < until {
            *now += 1.0 / 60.0;
            s.update(*now);
        }
    }

    #[test]
    fn test_start_press_samples_sequence_and_shows() {
        let mut s = game(4, 9);
        let mut sounds = SoundQueue::new();
        assert_eq!(s.phase(), SequencePhase::Waiting);

        press_start(&mut s, 1.0, &mut sounds);
        assert_eq!(s.phase(), SequencePhase::Showing);
        assert_eq!(s.sequence().len(), 4);
        assert!(s.sequence().iter().all(|&p| p < 4));
    }

    #[test]
    fn test_playback_reaches_input_after_all_flashes() {
        let mut s = game(3, 9);
        let mut sounds = SoundQueue::new();
        press_start(&mut s, 0.0, &mut sounds);

        // Last flash starts at 0.5 + 2*0.7 = 1.9 and ends at 2.25
        let mut now = 0.0;
        run_until(&mut s, &mut now, 2.2);
        assert_eq!(s.phase(), SequencePhase::Showing);
        run_until(&mut s, &mut now, 2.3);
        assert_eq!(s.phase(), SequencePhase::Input);
    }

    #[test]
    fn test_pad_presses_ignored_during_showing() {
        let mut s = game(3, 9);
        let mut sounds = SoundQueue::new();
        press_start(&mut s, 0.0, &mut sounds);
        let pad0 = s.sequence()[0];
        press_pad(&mut s, pad0, 0.6, &mut sounds);
        assert!(s.entered().is_empty());
    }

    #[test]
    fn test_full_correct_entry_finishes() {
        let mut s = game(4, 11);
        let mut sounds = SoundQueue::new();
        press_start(&mut s, 0.0, &mut sounds);
        let mut now = 0.0;
        run_until(&mut s, &mut now, 4.0);
        assert_eq!(s.phase(), SequencePhase::Input);

        let seq = s.sequence().to_vec();
        for pad in seq {
            press_pad(&mut s, pad, now, &mut sounds);
            now += 0.2;
        }
        assert_eq!(s.phase(), SequencePhase::Finished);
        assert!(s.update(now));
    }

    #[test]
    fn test_mistake_resets_to_waiting_and_discards() {
        let mut s = game(4, 11);
        let mut sounds = SoundQueue::new();
        press_start(&mut s, 0.0, &mut sounds);
        let mut now = 0.0;
        run_until(&mut s, &mut now, 4.0);

        let seq = s.sequence().to_vec();
        press_pad(&mut s, seq[0], now, &mut sounds);
        let wrong = (seq[1] + 1) % 4;
        press_pad(&mut s, wrong, now + 0.2, &mut sounds);

        assert_eq!(s.phase(), SequencePhase::Waiting);
        assert!(s.sequence().is_empty());
        assert!(s.entered().is_empty());
        assert!(!s.start_button().is_down());
    }

    proptest! {
        /// Entering exactly the generated sequence always finishes, for any
        /// length and seed
        #[test]
        fn prop_correct_entry_always_finishes(
            length in 1usize..10,
            seed in any::<u64>(),
        ) {
            let mut s = game(length, seed);
            let mut sounds = SoundQueue::new();
            press_start(&mut s, 0.0, &mut sounds);
            let mut now = 0.0;
            let playback = SEQUENCE_LEAD_SECS
                + (length - 1) as f64 * SEQUENCE_GAP_SECS
                + SEQUENCE_FLASH_SECS;
            run_until(&mut s, &mut now, playback + 0.1);
            prop_assert_eq!(s.phase(), SequencePhase::Input);

            let seq = s.sequence().to_vec();
            for pad in seq {
                press_pad(&mut s, pad, now, &mut sounds);
                now += 0.1;
            }
            prop_assert_eq!(s.phase(), SequencePhase::Finished);
        }
    }
}
