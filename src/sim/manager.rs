//! Puzzle piece / minigame orchestration
//!
//! Exactly four slots, each pairing a puzzle piece with at most one
//! minigame, positionally in piece order. The manager is the only thing
//! that drives minigames: it forwards frame ticks and input events while a
//! slot is live, collects the piece when its minigame completes, and
//! reports level completion once every piece has been collected.
//!
//! Events go to every live minigame, not just one "active" one: the
//! minigames occupy disjoint screen regions and self-filter by hit-testing.

use crate::audio::{SoundEffect, SoundQueue};
use crate::consts::PIECE_COUNT;
use crate::gfx::Surface;
use crate::Rect;

use super::event::GameEvent;
use super::minigame::Minigame;
use super::piece::PuzzlePiece;

#[derive(Debug)]
struct Slot {
    piece: PuzzlePiece,
    minigame: Option<Minigame>,
}

/// Per-level orchestrator of the four (piece, minigame) pairings
#[derive(Debug)]
pub struct PuzzleManager {
    slots: Vec<Slot>,
    complete_latched: bool,
}

impl PuzzleManager {
    /// Pair pieces with minigames in order and place each minigame into
    /// its boundary. Fewer minigames than pieces leaves trailing slots
    /// minigame-less; more is a configuration bug.
    pub fn new(
        pieces: Vec<PuzzlePiece>,
        minigames: Vec<Minigame>,
        boundaries: Vec<Rect>,
    ) -> Self {
        assert!(
            pieces.len() == PIECE_COUNT,
            "there must be exactly {PIECE_COUNT} puzzle pieces"
        );
        assert!(
            boundaries.len() == PIECE_COUNT,
            "there must be exactly {PIECE_COUNT} minigame boundaries"
        );
        assert!(
            minigames.len() <= PIECE_COUNT,
            "more minigames than puzzle pieces"
        );

        let mut minigames = minigames.into_iter();
        let slots = pieces
            .into_iter()
            .zip(boundaries)
            .map(|(piece, bounds)| {
                let minigame = minigames.next().map(|mut mg| {
                    mg.place(bounds);
                    mg
                });
                Slot { piece, minigame }
            })
            .collect();

        Self {
            slots,
            complete_latched: false,
        }
    }

    pub fn slot(&self, i: usize) -> (&PuzzlePiece, Option<&Minigame>) {
        let slot = &self.slots[i];
        (&slot.piece, slot.minigame.as_ref())
    }

    /// The sole level-completion signal
    pub fn is_all_pieces_collected(&self) -> bool {
        self.slots.iter().all(|s| s.piece.is_collected())
    }

    pub fn collected_count(&self) -> usize {
        self.slots.iter().filter(|s| s.piece.is_collected()).count()
    }

    pub fn update(&mut self, now: f64, sounds: &mut SoundQueue) {
        for slot in &mut self.slots {
            let Some(mg) = &mut slot.minigame else {
                continue;
            };
            if mg.is_completed() {
                if slot.piece.is_interactable() {
                    log::info!("{} done, collecting its piece", mg.variant().name());
                    slot.piece.collect(sounds);
                }
            } else if slot.piece.is_interactable() {
                mg.update(now, sounds);
            }
        }

        if !self.complete_latched && self.is_all_pieces_collected() {
            self.complete_latched = true;
            sounds.play(SoundEffect::LevelComplete);
            log::info!("level complete, all {PIECE_COUNT} pieces collected");
        }
    }

    pub fn handle_event(&mut self, event: &GameEvent, now: f64, sounds: &mut SoundQueue) {
        for slot in &mut self.slots {
            if !slot.piece.is_interactable() {
                continue;
            }
            if let Some(mg) = &mut slot.minigame {
                mg.handle_event(event, now, sounds);
            }
        }
    }

    /// Draw all pieces, then every still-relevant minigame overlay
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        for slot in &mut self.slots {
            slot.piece.draw(surface);
        }
        for slot in &mut self.slots {
            if !slot.piece.is_interactable() {
                continue;
            }
            if let Some(mg) = &mut slot.minigame {
                mg.draw(surface);
            }
        }
    }
}
