//! Minigame lifecycle shell
//!
//! The four variants differ in everything except their lifecycle: placed
//! into a boundary, laid out lazily on the first update after placement,
//! played until won, then a one-second countdown, then a fade-out of the
//! frozen final frame. That shared shell lives here, composed around the
//! variant payload rather than inherited by it.
//!
//! Win sequencing: the variant reporting a win arms the countdown. From
//! that moment input is over and the variant no longer updates - the next
//! draw freezes the variant's final frame into a snapshot, which is then
//! replayed with alpha stepping down 5 per frame. `completed` flips when
//! the countdown expires or the fade reaches zero, whichever comes first;
//! an armed countdown is never cancelled.

use crate::audio::{SoundEffect, SoundQueue};
use crate::consts::{FADE_STEP, WIN_COUNTDOWN_SECS};
use crate::gfx::{Frame, Surface};
use crate::Rect;

use super::event::GameEvent;
use super::memory::MemoryMatch;
use super::quiz::Quiz;
use super::sequence::ColorSequenceMemory;
use super::sliding::SlidingPuzzle;

/// The four minigame kinds and their state payloads
#[derive(Debug, Clone)]
pub enum Variant {
    Quiz(Quiz),
    Memory(MemoryMatch),
    Sliding(SlidingPuzzle),
    Sequence(ColorSequenceMemory),
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Quiz(_) => "Quiz",
            Variant::Memory(_) => "MemoryMatch",
            Variant::Sliding(_) => "SlidingPuzzle",
            Variant::Sequence(_) => "ColorSequenceMemory",
        }
    }

    fn layout(&mut self, bounds: Rect) {
        match self {
            Variant::Quiz(q) => q.layout(bounds),
            Variant::Memory(m) => m.layout(bounds),
            Variant::Sliding(s) => s.layout(bounds),
            Variant::Sequence(s) => s.layout(bounds),
        }
    }

    /// Run one frame of variant logic; true means the game is won
    fn update(&mut self, now: f64, sounds: &mut SoundQueue) -> bool {
        match self {
            Variant::Quiz(q) => q.update(now),
            Variant::Memory(m) => m.update(now, sounds),
            Variant::Sliding(s) => s.update(),
            Variant::Sequence(s) => s.update(now),
        }
    }

    fn handle_event(&mut self, event: &GameEvent, now: f64, sounds: &mut SoundQueue) {
        match self {
            Variant::Quiz(q) => q.handle_event(event, now, sounds),
            Variant::Memory(m) => m.handle_event(event, now, sounds),
            Variant::Sliding(s) => s.handle_event(event, sounds),
            Variant::Sequence(s) => s.handle_event(event, now, sounds),
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Variant::Quiz(q) => q.draw(surface),
            Variant::Memory(m) => m.draw(surface),
            Variant::Sliding(s) => s.draw(surface),
            Variant::Sequence(s) => s.draw(surface),
        }
    }
}

/// Win transition state: countdown deadline plus the fading frozen frame
#[derive(Debug, Clone)]
struct WinFx {
    deadline: f64,
    fade_alpha: u8,
    snapshot: Frame,
}

/// A minigame: lifecycle shell around a variant payload
#[derive(Debug, Clone)]
pub struct Minigame {
    bounds: Option<Rect>,
    laid_out: bool,
    completed: bool,
    win_fx: Option<WinFx>,
    variant: Variant,
}

impl Minigame {
    pub fn new(variant: Variant) -> Self {
        Self {
            bounds: None,
            laid_out: false,
            completed: false,
            win_fx: None,
            variant,
        }
    }

    /// Assign the screen region this minigame lives in. Layout happens
    /// lazily on the next update.
    pub fn place(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Won already, countdown or fade possibly still running
    pub fn is_won(&self) -> bool {
        self.completed || self.win_fx.is_some()
    }

    pub fn update(&mut self, now: f64, sounds: &mut SoundQueue) {
        if self.completed {
            return;
        }
        // Once armed, the countdown runs to completion; the variant is
        // frozen and only the deadline matters
        if let Some(fx) = &self.win_fx {
            if now >= fx.deadline {
                self.completed = true;
            }
            return;
        }
        // Inert until the manager places us
        let Some(bounds) = self.bounds else {
            return;
        };
        if !self.laid_out {
            self.variant.layout(bounds);
            self.laid_out = true;
        }
        if self.variant.update(now, sounds) {
            log::info!("{} won", self.variant.name());
            self.win_fx = Some(WinFx {
                deadline: now + WIN_COUNTDOWN_SECS,
                fade_alpha: 255,
                snapshot: Frame::new(),
            });
            sounds.play(SoundEffect::MinigameWon);
        }
    }

    pub fn handle_event(&mut self, event: &GameEvent, now: f64, sounds: &mut SoundQueue) {
        // No input once won, and none before layout
        if self.is_won() || !self.laid_out {
            return;
        }
        self.variant.handle_event(event, now, sounds);
    }

    /// Draw the minigame, or its fading final frame once won.
    /// Draws nothing before placement or after completion.
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        if self.completed || !self.laid_out {
            return;
        }
        match &mut self.win_fx {
            None => self.variant.draw(surface),
            Some(fx) => {
                if fx.snapshot.is_empty() {
                    // First draw since the win: freeze the final frame
                    self.variant.draw(&mut fx.snapshot);
                }
                fx.snapshot.replay(surface, fx.fade_alpha);
                fx.fade_alpha = fx.fade_alpha.saturating_sub(FADE_STEP);
                if fx.fade_alpha == 0 {
                    self.completed = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetBundle;
    use crate::consts::FRAME_DT;
    use glam::Vec2;
    use std::rc::Rc;

    const BOUNDS: Rect = Rect { x: 0.0, y: 0.0, w: 960.0, h: 540.0 };

    fn quiz_game() -> Minigame {
        let assets = Rc::new(AssetBundle::standard());
        Minigame::new(Variant::Quiz(Quiz::new(
            "Pick B",
            vec!["A".into(), "B".into()],
            1,
            None,
            assets,
        )))
    }

    fn press_button(game: &mut Minigame, label: &str, now: f64, sounds: &mut SoundQueue) {
        let Variant::Quiz(q) = game.variant() else {
            panic!("not a quiz")
        };
        let pos = q
            .buttons()
            .iter()
            .find(|b| b.label == label)
            .expect("button exists")
            .rect
            .center();
        game.handle_event(&GameEvent::PrimaryAction { pos }, now, sounds);
    }

    #[test]
    fn test_unplaced_minigame_is_inert() {
        let mut game = quiz_game();
        let mut sounds = SoundQueue::new();
        let mut frame = Frame::new();
        game.update(0.0, &mut sounds);
        game.draw(&mut frame);
        assert!(frame.is_empty());
        assert!(!game.is_completed());
    }

    #[test]
    fn test_right_answer_arms_countdown_then_completes() {
        let mut game = quiz_game();
        let mut sounds = SoundQueue::new();
        game.place(BOUNDS);
        game.update(0.0, &mut sounds); // lazy layout

        press_button(&mut game, "B", 0.1, &mut sounds);
        game.update(0.1, &mut sounds);
        assert!(game.is_won());
        assert!(!game.is_completed());

        // The countdown runs a full second regardless of further updates
        game.update(1.0, &mut sounds);
        assert!(!game.is_completed());
        game.update(1.1, &mut sounds);
        assert!(game.is_completed());
    }

    #[test]
    fn test_wrong_answer_does_not_win() {
        let mut game = quiz_game();
        let mut sounds = SoundQueue::new();
        game.place(BOUNDS);
        game.update(0.0, &mut sounds);

        press_button(&mut game, "A", 0.1, &mut sounds);
        game.update(0.1, &mut sounds);
        assert!(!game.is_won());
    }

    #[test]
    fn test_fade_replays_frozen_frame_then_completes() {
        let mut game = quiz_game();
        let mut sounds = SoundQueue::new();
        game.place(BOUNDS);
        game.update(0.0, &mut sounds);
        press_button(&mut game, "B", 0.1, &mut sounds);
        game.update(0.1, &mut sounds);

        // 255 alpha stepping down 5 per draw: the 51st draw hits zero
        let mut frame = Frame::new();
        for i in 0..51 {
            frame.clear();
            game.draw(&mut frame);
            assert!(!frame.is_empty(), "fade draw {i} drew nothing");
        }
        assert!(game.is_completed());

        frame.clear();
        game.draw(&mut frame);
        assert!(frame.is_empty());
    }

    #[test]
    fn test_no_input_once_won() {
        let mut game = quiz_game();
        let mut sounds = SoundQueue::new();
        game.place(BOUNDS);
        game.update(0.0, &mut sounds);
        press_button(&mut game, "B", 0.1, &mut sounds);
        game.update(0.1, &mut sounds);
        assert!(game.is_won());

        // Pressing the other button now must not register
        sounds.drain();
        press_button(&mut game, "A", 0.2, &mut sounds);
        assert!(sounds.drain().is_empty());
        let Variant::Quiz(q) = game.variant() else {
            panic!("not a quiz")
        };
        assert!(!q.buttons().iter().any(|b| b.label == "A" && b.is_down()));
    }

    #[test]
    fn test_quiz_win_runs_full_sequence_at_sixty_hz() {
        let mut game = quiz_game();
        let mut sounds = SoundQueue::new();
        game.place(BOUNDS);

        let mut now = 0.0;
        game.update(now, &mut sounds);
        press_button(&mut game, "B", now, &mut sounds);

        let mut frame = Frame::new();
        for _ in 0..70 {
            now += FRAME_DT;
            game.update(now, &mut sounds);
            frame.clear();
            game.draw(&mut frame);
        }
        assert!(game.is_completed());
        assert!(frame.is_empty());
    }

    #[test]
    fn test_event_before_placement_is_ignored() {
        let mut game = quiz_game();
        let mut sounds = SoundQueue::new();
        game.handle_event(
            &GameEvent::PrimaryAction { pos: Vec2::new(100.0, 100.0) },
            0.0,
            &mut sounds,
        );
        assert!(sounds.drain().is_empty());
    }
}
