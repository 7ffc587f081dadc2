//! Collectible puzzle piece
//!
//! A piece sits in the scene until its minigame is won, then plays a
//! shrink-and-fade animation and flips `collected` once the fade finishes.
//! The fade advances in `draw`, one step per frame, matching the rest of
//! the game's draw-driven animations.

use std::rc::Rc;

use glam::Vec2;

use crate::assets::{AssetBundle, ImageId};
use crate::audio::{SoundEffect, SoundQueue};
use crate::consts::{FADE_STEP, PIECE_SHRINK_STEP};
use crate::gfx::{BlitParams, Surface};
use crate::{Color, Rect};

#[derive(Debug, Clone, Copy)]
struct FadeState {
    alpha: u8,
    size: Vec2,
}

/// A tinted, rotated puzzle piece with a collect animation
#[derive(Debug, Clone)]
pub struct PuzzlePiece {
    rect: Rect,
    tint: Color,
    quarter_turns: u8,
    collected: bool,
    fade: Option<FadeState>,
}

impl PuzzlePiece {
    pub fn new(pos: Vec2, tint: Color, quarter_turns: u8, assets: &Rc<AssetBundle>) -> Self {
        let size = assets.size(ImageId::PuzzlePiece);
        Self {
            rect: Rect::new(pos.x, pos.y, size.x, size.y),
            tint,
            quarter_turns: quarter_turns % 4,
            collected: false,
            fade: None,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// A piece takes part in gameplay only while untouched by collection
    pub fn is_interactable(&self) -> bool {
        !self.collected && self.fade.is_none()
    }

    /// Start the collect fade. Called exactly once per piece.
    pub fn collect(&mut self, sounds: &mut SoundQueue) {
        debug_assert!(self.is_interactable(), "collect() called twice");
        self.fade = Some(FadeState {
            alpha: 255,
            size: self.rect.size(),
        });
        sounds.play(SoundEffect::PieceCollected);
    }

    /// Draw the piece; while fading this also advances the animation.
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        let params = BlitParams {
            tint: Some(self.tint),
            quarter_turns: self.quarter_turns,
            ..Default::default()
        };

        match &mut self.fade {
            None => {
                if !self.collected {
                    surface.blit(ImageId::PuzzlePiece, self.rect, params);
                }
            }
            Some(fade) => {
                fade.alpha = fade.alpha.saturating_sub(FADE_STEP);
                fade.size = (fade.size - Vec2::splat(PIECE_SHRINK_STEP)).max(Vec2::ZERO);

                let dest = Rect::from_center(self.rect.center(), fade.size);
                surface.blit(
                    ImageId::PuzzlePiece,
                    dest,
                    BlitParams { alpha: fade.alpha, ..params },
                );

                if fade.alpha == 0 {
                    self.fade = None;
                    self.collected = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::Frame;

    fn piece() -> PuzzlePiece {
        let assets = Rc::new(AssetBundle::standard());
        PuzzlePiece::new(Vec2::new(410.0, 0.0), Color::rgb(55, 0, 0), 0, &assets)
    }

    #[test]
    fn test_collect_starts_fade_not_collected() {
        let mut p = piece();
        let mut sounds = SoundQueue::new();
        p.collect(&mut sounds);
        assert!(p.is_fading());
        assert!(!p.is_collected());
        assert!(!p.is_interactable());
        assert_eq!(sounds.drain().len(), 1);
    }

    #[test]
    fn test_fade_finishes_after_fixed_draw_count() {
        let mut p = piece();
        let mut sounds = SoundQueue::new();
        p.collect(&mut sounds);

        // 255 alpha at 5 per draw: 50 draws leave 5, the 51st reaches 0
        let mut frame = Frame::new();
        for _ in 0..50 {
            p.draw(&mut frame);
            assert!(!p.is_collected());
        }
        p.draw(&mut frame);
        assert!(p.is_collected());
        assert!(!p.is_fading());
    }

    #[test]
    fn test_collected_piece_draws_nothing() {
        let mut p = piece();
        let mut sounds = SoundQueue::new();
        p.collect(&mut sounds);
        let mut frame = Frame::new();
        for _ in 0..60 {
            p.draw(&mut frame);
        }
        frame.clear();
        p.draw(&mut frame);
        assert!(frame.is_empty());
    }
}
