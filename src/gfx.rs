//! Abstract drawing surface
//!
//! The sim describes what to draw; pixels are somebody else's problem. A
//! `Surface` accepts rectangle/circle fills, image blits and text. `Frame`
//! records those calls into a command list, which serves two masters: the
//! headless driver inspects it, and a won minigame freezes its final frame
//! into one and replays it with decaying alpha.

use glam::Vec2;

use crate::assets::ImageId;
use crate::{Color, Rect};

/// Blit modifiers. `Default` is an untinted, opaque, unrotated blit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlitParams {
    /// Multiply tint applied to the image
    pub tint: Option<Color>,
    /// Per-blit alpha (255 = opaque)
    pub alpha: u8,
    /// Counter-clockwise quarter turns (0-3)
    pub quarter_turns: u8,
}

impl Default for BlitParams {
    fn default() -> Self {
        Self {
            tint: None,
            alpha: 255,
            quarter_turns: 0,
        }
    }
}

/// Immediate-mode draw target
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: u8);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: u8);
    /// Blit an image scaled into `dest`
    fn blit(&mut self, image: ImageId, dest: Rect, params: BlitParams);
    /// Blit a sub-region of an image (in source pixels) scaled into `dest`
    fn blit_region(&mut self, image: ImageId, src: Rect, dest: Rect, params: BlitParams);
    /// Draw text centered on a point
    fn text(&mut self, text: &str, center: Vec2, size: f32, color: Color);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect {
        rect: Rect,
        color: Color,
        alpha: u8,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: u8,
    },
    Blit {
        image: ImageId,
        src: Option<Rect>,
        dest: Rect,
        params: BlitParams,
    },
    Text {
        text: String,
        center: Vec2,
        size: f32,
        color: Color,
    },
}

/// Recording surface: stores draw calls instead of rasterizing them
#[derive(Debug, Default, Clone)]
pub struct Frame {
    cmds: Vec<DrawCmd>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// Replay every recorded command onto `target`, modulating alpha.
    /// Text fades by dropping out entirely below half opacity.
    pub fn replay(&self, target: &mut dyn Surface, alpha: u8) {
        for cmd in &self.cmds {
            match cmd {
                DrawCmd::FillRect { rect, color, alpha: a } => {
                    target.fill_rect(*rect, *color, mul_alpha(*a, alpha));
                }
                DrawCmd::FillCircle { center, radius, color, alpha: a } => {
                    target.fill_circle(*center, *radius, *color, mul_alpha(*a, alpha));
                }
                DrawCmd::Blit { image, src, dest, params } => {
                    let params = BlitParams {
                        alpha: mul_alpha(params.alpha, alpha),
                        ..*params
                    };
                    match src {
                        Some(src) => target.blit_region(*image, *src, *dest, params),
                        None => target.blit(*image, *dest, params),
                    }
                }
                DrawCmd::Text { text, center, size, color } => {
                    if alpha >= 128 {
                        target.text(text, *center, *size, *color);
                    }
                }
            }
        }
    }
}

impl Surface for Frame {
    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        self.cmds.push(DrawCmd::FillRect { rect, color, alpha });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: u8) {
        self.cmds.push(DrawCmd::FillCircle { center, radius, color, alpha });
    }

    fn blit(&mut self, image: ImageId, dest: Rect, params: BlitParams) {
        self.cmds.push(DrawCmd::Blit { image, src: None, dest, params });
    }

    fn blit_region(&mut self, image: ImageId, src: Rect, dest: Rect, params: BlitParams) {
        self.cmds.push(DrawCmd::Blit { image, src: Some(src), dest, params });
    }

    fn text(&mut self, text: &str, center: Vec2, size: f32, color: Color) {
        self.cmds.push(DrawCmd::Text {
            text: text.to_string(),
            center,
            size,
            color,
        });
    }
}

/// Multiply two alpha values in 0-255 space
#[inline]
pub fn mul_alpha(a: u8, b: u8) -> u8 {
    ((a as u16 * b as u16) / 255) as u8
}
