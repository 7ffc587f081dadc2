//! Star Pieces - a 2D puzzle-adventure core
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (minigames, puzzle pieces, level orchestration)
//! - `gfx`: Abstract draw-command surface consumed by the rendering collaborator
//! - `assets`: Read-only image handle table
//! - `audio`: Sound effect queue drained by the audio collaborator

pub mod assets;
pub mod audio;
pub mod gfx;
pub mod sim;

pub use assets::{AssetBundle, ImageId};
pub use audio::{SoundEffect, SoundQueue};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Target frame rate the external loop drives us at
    pub const TARGET_FPS: u32 = 60;
    /// Frame duration at the target rate (seconds)
    pub const FRAME_DT: f64 = 1.0 / TARGET_FPS as f64;

    /// Logical screen dimensions
    pub const SCREEN_WIDTH: f32 = 1920.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;

    /// Puzzle pieces per level - the manager asserts exactly this many
    pub const PIECE_COUNT: usize = 4;
    /// Puzzle piece body side length, excluding the interlocking tab
    pub const PIECE_BODY: f32 = 550.0;
    /// Interlocking tab extent of a puzzle piece
    pub const PIECE_TAB: f32 = 88.0;
    /// Top-left corner of the assembled four-piece jigsaw
    pub const PIECE_ORIGIN: (f32, f32) = (410.0, 0.0);

    /// Pause between winning a minigame and it being marked completed
    pub const WIN_COUNTDOWN_SECS: f64 = 1.0;
    /// Alpha decrement per draw for fade-outs (pieces and won minigames)
    pub const FADE_STEP: u8 = 5;
    /// Pixels a collected piece shrinks per draw on each axis
    pub const PIECE_SHRINK_STEP: f32 = 5.0;

    /// Horizontal gap between answer buttons
    pub const BUTTON_SPACING: f32 = 40.0;
    /// Margin between the button row and the boundary bottom
    pub const BUTTON_MARGIN: f32 = 40.0;
    /// Label offset above a button's center
    pub const BUTTON_LABEL_RAISE: f32 = 50.0;
    /// A pressed button springs back up after this long
    pub const BUTTON_AUTO_RESET_SECS: f64 = 1.0;

    /// How long a flipped memory pair stays revealed before resolving
    pub const REVEAL_DELAY_SECS: f64 = 1.0;

    /// Frames a sliding-puzzle tile takes to glide into the empty cell
    pub const SLIDE_FRAMES: u32 = 10;

    /// Delay before the first flash of a color sequence playback
    pub const SEQUENCE_LEAD_SECS: f64 = 0.5;
    /// Flash-to-flash interval during sequence playback
    pub const SEQUENCE_GAP_SECS: f64 = 0.7;
    /// How long each pad stays lit per flash
    pub const SEQUENCE_FLASH_SECS: f64 = 0.35;
}

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rect of the given size centered on a point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Point-in-rect test (edges inclusive)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// An opaque RGB color; alpha travels separately through draw calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

/// Shrink `size` to fit within `max`, preserving aspect ratio.
/// Never enlarges.
pub fn scale_to_fit(size: Vec2, max: Vec2) -> Vec2 {
    let scale = (max.x / size.x).min(max.y / size.y).min(1.0);
    size * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(r.contains(Vec2::new(60.0, 45.0)));
        assert!(r.contains(Vec2::new(110.0, 70.0)));
        assert!(!r.contains(Vec2::new(9.9, 45.0)));
        assert!(!r.contains(Vec2::new(60.0, 70.1)));
    }

    #[test]
    fn test_rect_from_center() {
        let r = Rect::from_center(Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(r, Rect::new(40.0, 45.0, 20.0, 10.0));
        assert_eq!(r.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_scale_to_fit_shrinks_wide_image() {
        let scaled = scale_to_fit(Vec2::new(800.0, 400.0), Vec2::new(400.0, 400.0));
        assert_eq!(scaled, Vec2::new(400.0, 200.0));
    }

    #[test]
    fn test_scale_to_fit_never_enlarges() {
        let scaled = scale_to_fit(Vec2::new(100.0, 50.0), Vec2::new(400.0, 400.0));
        assert_eq!(scaled, Vec2::new(100.0, 50.0));
    }
}
