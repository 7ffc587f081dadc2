//! Sliding puzzle minigame
//!
//! A photo sliced into rows*cols - 1 tiles, scrambled by a random walk of
//! the empty cell. The walk never immediately undoes its previous swap, and
//! its trace is kept: replaying it in reverse solves the board, which the
//! demo auto-player exploits. Scrambling by legal moves only means the board
//! is always solvable, with no parity check needed.

use std::rc::Rc;

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::assets::{AssetBundle, ImageId};
use crate::audio::{SoundEffect, SoundQueue};
use crate::consts::SLIDE_FRAMES;
use crate::gfx::{BlitParams, Surface};
use crate::{Color, Rect};

use super::event::GameEvent;

/// Margin between the board and its boundary
const BOARD_MARGIN: f32 = 40.0;

/// Grid cell as (col, row)
pub type Cell = (u32, u32);

#[derive(Debug, Clone, Copy)]
pub struct Tile {
    /// Where this tile belongs
    pub home: Cell,
    /// Where it currently sits
    pub cell: Cell,
}

#[derive(Debug, Clone, Copy)]
struct Slide {
    tile_idx: usize,
    from: Cell,
    frame: u32,
}

#[derive(Debug, Clone)]
pub struct SlidingPuzzle {
    rows: u32,
    cols: u32,
    image: ImageId,
    tiles: Vec<Tile>,
    empty: Cell,
    slide: Option<Slide>,
    /// Empty-cell history of the scramble walk, oldest first
    trace: Vec<Cell>,
    board: Rect,
    tile_px: f32,
    assets: Rc<AssetBundle>,
}

impl SlidingPuzzle {
    pub fn new(rows: u32, cols: u32, image: ImageId, seed: u64, assets: Rc<AssetBundle>) -> Self {
        assert!(rows * cols > 1, "sliding grid needs more than one cell");
        let mut puzzle = Self {
            rows,
            cols,
            image,
            tiles: (0..rows * cols - 1)
                .map(|i| {
                    let cell = (i % cols, i / cols);
                    Tile { home: cell, cell }
                })
                .collect(),
            empty: (cols - 1, rows - 1),
            slide: None,
            trace: Vec::new(),
            board: Rect::default(),
            tile_px: 0.0,
            assets,
        };
        puzzle.scramble(&mut Pcg32::seed_from_u64(seed));
        puzzle
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn empty_cell(&self) -> Cell {
        self.empty
    }

    pub fn is_sliding(&self) -> bool {
        self.slide.is_some()
    }

    /// The scramble walk's empty-cell history; reversed, it is a solution
    pub fn scramble_trace(&self) -> &[Cell] {
        &self.trace
    }

    pub fn is_solved(&self) -> bool {
        self.tiles.iter().all(|t| t.cell == t.home)
    }

    /// Random walk of legal swaps, never immediately undoing the last one
    fn scramble(&mut self, rng: &mut Pcg32) {
        let steps = (self.rows * self.cols * 10) as usize;
        self.trace.push(self.empty);
        let mut prev: Option<Cell> = None;
        for _ in 0..steps {
            self.walk_step(rng, &mut prev);
        }
        // A walk can wander back onto the solved board; one more step
        // always displaces a tile again
        while self.is_solved() {
            self.walk_step(rng, &mut prev);
        }
    }

    fn walk_step(&mut self, rng: &mut Pcg32, prev: &mut Option<Cell>) {
        let mut candidates: Vec<Cell> = self
            .neighbors(self.empty)
            .into_iter()
            .filter(|&c| Some(c) != *prev)
            .collect();
        // Cornered on 1xN grids: backtracking is the only legal move
        if candidates.is_empty() {
            candidates = self.neighbors(self.empty);
        }
        let target = candidates[rng.random_range(0..candidates.len())];
        if let Some(idx) = self.tile_at(target) {
            self.tiles[idx].cell = self.empty;
            *prev = Some(self.empty);
            self.empty = target;
            self.trace.push(target);
        }
    }

    fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        let (c, r) = cell;
        let mut out = Vec::with_capacity(4);
        if c > 0 {
            out.push((c - 1, r));
        }
        if c + 1 < self.cols {
            out.push((c + 1, r));
        }
        if r > 0 {
            out.push((c, r - 1));
        }
        if r + 1 < self.rows {
            out.push((c, r + 1));
        }
        out
    }

    fn tile_at(&self, cell: Cell) -> Option<usize> {
        self.tiles.iter().position(|t| t.cell == cell)
    }

    fn adjacent(a: Cell, b: Cell) -> bool {
        let dc = a.0.abs_diff(b.0);
        let dr = a.1.abs_diff(b.1);
        dc + dr == 1
    }

    /// Fit a square board centered in the boundary
    pub fn layout(&mut self, bounds: Rect) {
        let side = (bounds.w.min(bounds.h) - 2.0 * BOARD_MARGIN).max(0.0);
        self.tile_px = side / self.cols.max(self.rows) as f32;
        let w = self.tile_px * self.cols as f32;
        let h = self.tile_px * self.rows as f32;
        self.board = Rect::from_center(bounds.center(), Vec2::new(w, h));
    }

    /// Screen rect of a grid cell
    pub fn cell_rect(&self, cell: Cell) -> Rect {
        Rect::new(
            self.board.x + cell.0 as f32 * self.tile_px,
            self.board.y + cell.1 as f32 * self.tile_px,
            self.tile_px,
            self.tile_px,
        )
    }

    fn cell_under(&self, pos: Vec2) -> Option<Cell> {
        if !self.board.contains(pos) {
            return None;
        }
        let col = ((pos.x - self.board.x) / self.tile_px) as u32;
        let row = ((pos.y - self.board.y) / self.tile_px) as u32;
        Some((col.min(self.cols - 1), row.min(self.rows - 1)))
    }

    /// Advance an in-flight slide; report whether the board is solved
    pub fn update(&mut self) -> bool {
        if let Some(slide) = &mut self.slide {
            slide.frame += 1;
            if slide.frame >= SLIDE_FRAMES {
                let Slide { tile_idx, from, .. } = *slide;
                self.tiles[tile_idx].cell = self.empty;
                self.empty = from;
                self.slide = None;
            }
        }
        self.slide.is_none() && self.is_solved()
    }

    pub fn handle_event(&mut self, event: &GameEvent, sounds: &mut SoundQueue) {
        let GameEvent::PrimaryAction { pos } = event else {
            return;
        };
        // One slide at a time
        if self.slide.is_some() {
            return;
        }
        let Some(cell) = self.cell_under(*pos) else {
            return;
        };
        if !Self::adjacent(cell, self.empty) {
            return;
        }
        if let Some(tile_idx) = self.tile_at(cell) {
            self.slide = Some(Slide { tile_idx, from: cell, frame: 0 });
            sounds.play(SoundEffect::TileSlide);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.board, Color::rgb(20, 20, 30), 255);

        let src_size = self.assets.size(self.image);
        let src_w = src_size.x / self.cols as f32;
        let src_h = src_size.y / self.rows as f32;

        for (i, tile) in self.tiles.iter().enumerate() {
            let src = Rect::new(
                tile.home.0 as f32 * src_w,
                tile.home.1 as f32 * src_h,
                src_w,
                src_h,
            );
            let dest = match self.slide {
                Some(slide) if slide.tile_idx == i => {
                    let t = slide.frame as f32 / SLIDE_FRAMES as f32;
                    let from = self.cell_rect(slide.from);
                    let to = self.cell_rect(self.empty);
                    Rect::new(
                        from.x + (to.x - from.x) * t,
                        from.y + (to.y - from.y) * t,
                        self.tile_px,
                        self.tile_px,
                    )
                }
                _ => self.cell_rect(tile.cell),
            };
            surface.blit_region(self.image, src, dest, BlitParams::default());
        }
    }
}
