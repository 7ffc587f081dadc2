//! Memory match minigame
//!
//! Cards match by pair id, not by face image: the face pool is cycled over
//! the pairs, so two visually identical cards from different pairs never
//! match by accident. The pair-id sequence is shuffled across the grid with
//! the minigame's own seeded RNG.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::assets::ImageId;
use crate::audio::{SoundEffect, SoundQueue};
use crate::consts::REVEAL_DELAY_SECS;
use crate::gfx::{BlitParams, Surface};
use crate::Rect;

use super::event::GameEvent;

/// Gap between cards in the grid
const CARD_GAP: f32 = 12.0;

#[derive(Debug, Clone)]
pub struct Card {
    pub face: ImageId,
    pub pair: u32,
    pub rect: Rect,
    pub flipped: bool,
    pub matched: bool,
}

#[derive(Debug, Clone)]
pub struct MemoryMatch {
    rows: u32,
    cols: u32,
    faces: Vec<ImageId>,
    cards: Vec<Card>,
    /// While set, the two flipped cards are waiting to be resolved
    reveal_deadline: Option<f64>,
    rng: Pcg32,
}

impl MemoryMatch {
    pub fn new(rows: u32, cols: u32, faces: Vec<ImageId>, seed: u64) -> Self {
        assert!((rows * cols) % 2 == 0, "memory grid needs an even cell count");
        assert!(!faces.is_empty(), "memory grid needs at least one face image");
        Self {
            rows,
            cols,
            faces,
            cards: Vec::new(),
            reveal_deadline: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Input is locked while a flipped pair waits to resolve
    pub fn is_locked(&self) -> bool {
        self.reveal_deadline.is_some()
    }

    /// Shuffle pair ids across the grid and lay the cards out in `bounds`
    pub fn layout(&mut self, bounds: Rect) {
        let cells = self.rows * self.cols;

        // Each pair id appears exactly twice; the faces just follow along
        let mut pairs: Vec<u32> = (0..cells / 2).flat_map(|p| [p, p]).collect();
        pairs.shuffle(&mut self.rng);

        let cell_w = (bounds.w - (self.cols + 1) as f32 * CARD_GAP) / self.cols as f32;
        let cell_h = (bounds.h - (self.rows + 1) as f32 * CARD_GAP) / self.rows as f32;
        let card = cell_w.min(cell_h);
        // Center the grid inside the boundary
        let grid_w = self.cols as f32 * card + (self.cols - 1) as f32 * CARD_GAP;
        let grid_h = self.rows as f32 * card + (self.rows - 1) as f32 * CARD_GAP;
        let x0 = bounds.x + (bounds.w - grid_w) / 2.0;
        let y0 = bounds.y + (bounds.h - grid_h) / 2.0;

        self.cards = pairs
            .into_iter()
            .enumerate()
            .map(|(i, pair)| {
                let row = i as u32 / self.cols;
                let col = i as u32 % self.cols;
                Card {
                    face: self.faces[pair as usize % self.faces.len()],
                    pair,
                    rect: Rect::new(
                        x0 + col as f32 * (card + CARD_GAP),
                        y0 + row as f32 * (card + CARD_GAP),
                        card,
                        card,
                    ),
                    flipped: false,
                    matched: false,
                }
            })
            .collect();
    }

    /// Resolve a due reveal; report whether every card is matched
    pub fn update(&mut self, now: f64, sounds: &mut SoundQueue) -> bool {
        if let Some(deadline) = self.reveal_deadline
            && now >= deadline
        {
            self.reveal_deadline = None;
            let flipped: Vec<usize> = self
                .cards
                .iter()
                .enumerate()
                .filter(|(_, c)| c.flipped && !c.matched)
                .map(|(i, _)| i)
                .collect();
            if let [a, b] = flipped[..] {
                if self.cards[a].pair == self.cards[b].pair {
                    self.cards[a].matched = true;
                    self.cards[b].matched = true;
                    sounds.play(SoundEffect::CardMatch);
                } else {
                    self.cards[a].flipped = false;
                    self.cards[b].flipped = false;
                    sounds.play(SoundEffect::CardMismatch);
                }
            }
        }
        !self.cards.is_empty() && self.cards.iter().all(|c| c.matched)
    }

    pub fn handle_event(&mut self, event: &GameEvent, now: f64, sounds: &mut SoundQueue) {
        let GameEvent::PrimaryAction { pos } = event else {
            return;
        };
        if self.is_locked() {
            return;
        }
        let Some(idx) = self
            .cards
            .iter()
            .position(|c| !c.flipped && !c.matched && c.rect.contains(*pos))
        else {
            return;
        };

        self.cards[idx].flipped = true;
        sounds.play(SoundEffect::CardFlip);

        let face_up = self.cards.iter().filter(|c| c.flipped && !c.matched).count();
        if face_up == 2 {
            self.reveal_deadline = Some(now + REVEAL_DELAY_SECS);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for card in &self.cards {
            let image = if card.flipped || card.matched {
                card.face
            } else {
                ImageId::CardBack
            };
            surface.blit(image, card.rect, BlitParams::default());
        }
    }
}
