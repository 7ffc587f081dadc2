//! Latching sprite button
//!
//! A button shows the up sprite until pressed, then the down sprite until it
//! resets. A pressed button springs back up on its own one second later, so
//! wrong quiz answers recover without outside help. The label sits 50 px
//! above the sprite center, where the art leaves room for it.

use glam::Vec2;

use crate::assets::ImageId;
use crate::audio::{SoundEffect, SoundQueue};
use crate::consts::{BUTTON_AUTO_RESET_SECS, BUTTON_LABEL_RAISE};
use crate::gfx::{BlitParams, Surface};
use crate::{Color, Rect};

use super::event::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Up,
    Down,
}

/// A clickable button with a text label
#[derive(Debug, Clone)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    state: ButtonState,
    /// When to spring back up, set on press
    reset_deadline: Option<f64>,
    label_color: Color,
    label_size: f32,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>) -> Self {
        Self {
            rect,
            label: label.into(),
            state: ButtonState::Up,
            reset_deadline: None,
            label_color: Color::WHITE,
            label_size: 36.0,
        }
    }

    pub fn is_down(&self) -> bool {
        self.state == ButtonState::Down
    }

    /// Latch the button down and schedule its auto-reset
    pub fn press(&mut self, now: f64, sounds: &mut SoundQueue) {
        self.state = ButtonState::Down;
        self.reset_deadline = Some(now + BUTTON_AUTO_RESET_SECS);
        sounds.play(SoundEffect::ButtonPress);
    }

    pub fn reset(&mut self) {
        self.state = ButtonState::Up;
        self.reset_deadline = None;
    }

    /// Spring back up once the reset deadline passes
    pub fn update(&mut self, now: f64) {
        if let Some(deadline) = self.reset_deadline
            && now >= deadline
        {
            self.reset();
        }
    }

    /// Returns true if this event newly pressed the button
    pub fn handle_event(&mut self, event: &GameEvent, now: f64, sounds: &mut SoundQueue) -> bool {
        match event {
            GameEvent::PrimaryAction { pos } => {
                if self.state == ButtonState::Up && self.rect.contains(*pos) {
                    self.press(now, sounds);
                    return true;
                }
            }
            GameEvent::ResetButtons => self.reset(),
        }
        false
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let sprite = match self.state {
            ButtonState::Up => ImageId::ButtonUp,
            ButtonState::Down => ImageId::ButtonDown,
        };
        surface.blit(sprite, self.rect, BlitParams::default());
        let label_center = self.rect.center() - Vec2::new(0.0, BUTTON_LABEL_RAISE);
        surface.text(&self.label, label_center, self.label_size, self.label_color);
    }
}
