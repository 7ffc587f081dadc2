//! Quiz minigame
//!
//! A question, an optional caption image and a centered row of answer
//! buttons. Pressing the button with the right answer wins; wrong presses
//! just spring back up after a second.

use std::rc::Rc;

use glam::Vec2;

use crate::assets::{AssetBundle, ImageId};
use crate::audio::SoundQueue;
use crate::consts::{BUTTON_MARGIN, BUTTON_SPACING};
use crate::gfx::{BlitParams, Surface};
use crate::{scale_to_fit, Color, Rect};

use super::button::Button;
use super::event::GameEvent;

#[derive(Debug, Clone)]
pub struct Quiz {
    question: String,
    answers: Vec<String>,
    correct: usize,
    caption: Option<ImageId>,
    buttons: Vec<Button>,
    /// Caption placement, computed at layout
    caption_rect: Option<Rect>,
    question_center: Vec2,
    assets: Rc<AssetBundle>,
}

impl Quiz {
    pub fn new(
        question: impl Into<String>,
        answers: Vec<String>,
        correct: usize,
        caption: Option<ImageId>,
        assets: Rc<AssetBundle>,
    ) -> Self {
        assert!(!answers.is_empty(), "quiz needs at least one answer");
        assert!(correct < answers.len(), "correct answer index out of range");
        Self {
            question: question.into(),
            answers,
            correct,
            caption,
            buttons: Vec::new(),
            caption_rect: None,
            question_center: Vec2::ZERO,
            assets,
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct]
    }

    /// Build the centered button row and place question/caption
    pub fn layout(&mut self, bounds: Rect) {
        let button_size = self.assets.size(ImageId::ButtonUp);
        let n = self.answers.len() as f32;
        let total_width = n * button_size.x + (n - 1.0) * BUTTON_SPACING;
        let start_x = bounds.center().x - total_width / 2.0;
        let y = bounds.bottom() - button_size.y - BUTTON_MARGIN;

        self.buttons = self
            .answers
            .iter()
            .enumerate()
            .map(|(i, answer)| {
                let rect = Rect::new(
                    start_x + i as f32 * (button_size.x + BUTTON_SPACING),
                    y,
                    button_size.x,
                    button_size.y,
                );
                Button::new(rect, answer.clone())
            })
            .collect();

        // Caption scales down to a third of the boundary height at most,
        // keeping aspect ratio, and sits above the question
        self.caption_rect = self.caption.map(|image| {
            let max = Vec2::new(bounds.w - 2.0 * BUTTON_MARGIN, bounds.h / 3.0);
            let size = scale_to_fit(self.assets.size(image), max);
            Rect::from_center(
                Vec2::new(bounds.center().x, bounds.y + BUTTON_MARGIN + size.y / 2.0),
                size,
            )
        });

        self.question_center = match self.caption_rect {
            Some(rect) => Vec2::new(bounds.center().x, rect.bottom() + 50.0),
            None => Vec2::new(bounds.center().x, bounds.y + 60.0),
        };
    }

    /// Auto-reset pressed buttons; report whether the right answer is down
    pub fn update(&mut self, now: f64) -> bool {
        for button in &mut self.buttons {
            button.update(now);
        }
        self.buttons
            .iter()
            .any(|b| b.is_down() && b.label == self.answers[self.correct])
    }

    pub fn handle_event(&mut self, event: &GameEvent, now: f64, sounds: &mut SoundQueue) {
        for button in &mut self.buttons {
            button.handle_event(event, now, sounds);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.text(&self.question, self.question_center, 48.0, Color::WHITE);
        if let (Some(image), Some(rect)) = (self.caption, self.caption_rect) {
            surface.blit(image, rect, BlitParams::default());
        }
        for button in &self.buttons {
            button.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(answers: &[&str], correct: usize) -> Quiz {
        let assets = Rc::new(AssetBundle::standard());
        let answers = answers.iter().map(|s| s.to_string()).collect();
        Quiz::new("Which one?", answers, correct, None, assets)
    }

    #[test]
    fn test_layout_centers_button_row() {
        let bounds = Rect::new(0.0, 0.0, 960.0, 540.0);
        let mut q = quiz(&["A", "B"], 0);
        q.layout(bounds);

        let first = q.buttons()[0].rect;
        let last = q.buttons()[1].rect;
        assert!((last.x - first.right() - BUTTON_SPACING).abs() < 0.01);
        // Row is centered: left margin equals right margin
        let left = first.x - bounds.x;
        let right = bounds.right() - last.right();
        assert!((left - right).abs() < 0.01);
        assert!((bounds.bottom() - first.bottom() - BUTTON_MARGIN).abs() < 0.01);
    }

    #[test]
    fn test_correct_press_wins_wrong_press_does_not() {
        let mut q = quiz(&["A", "B"], 1);
        q.layout(Rect::new(0.0, 0.0, 960.0, 540.0));
        let mut sounds = SoundQueue::new();

        let wrong = GameEvent::PrimaryAction { pos: q.buttons()[0].rect.center() };
        q.handle_event(&wrong, 0.0, &mut sounds);
        assert!(!q.update(0.0));

        let right = GameEvent::PrimaryAction { pos: q.buttons()[1].rect.center() };
        q.handle_event(&right, 0.1, &mut sounds);
        assert!(q.update(0.1));
    }

    #[test]
    fn test_wrong_press_recovers_after_a_second() {
        let mut q = quiz(&["A", "B"], 1);
        q.layout(Rect::new(0.0, 0.0, 960.0, 540.0));
        let mut sounds = SoundQueue::new();

        let wrong = GameEvent::PrimaryAction { pos: q.buttons()[0].rect.center() };
        q.handle_event(&wrong, 5.0, &mut sounds);
        assert!(q.buttons()[0].is_down());

        q.update(6.0);
        assert!(!q.buttons()[0].is_down());
    }

    #[test]
    #[should_panic(expected = "correct answer index out of range")]
    fn test_out_of_range_correct_index_is_fatal() {
        quiz(&["A"], 1);
    }

    #[test]
    fn test_caption_fits_boundary() {
        let assets = Rc::new(AssetBundle::standard());
        let mut q = Quiz::new(
            "Who is this?",
            vec!["A".into(), "B".into()],
            0,
            Some(ImageId::Photo(0)),
            assets,
        );
        let bounds = Rect::new(0.0, 0.0, 960.0, 540.0);
        q.layout(bounds);
        let rect = q.caption_rect.unwrap();
        assert!(rect.w <= bounds.w - 2.0 * BUTTON_MARGIN);
        assert!(rect.h <= bounds.h / 3.0 + 0.01);
        // Aspect ratio preserved (source photo is square)
        assert!((rect.w - rect.h).abs() < 0.01);
        // Caption sits above the question
        assert!(rect.bottom() < q.question_center.y);
    }
}
