//! Deterministic gameplay module
//!
//! All game logic lives here. This module must be pure and deterministic:
//! - Frame-stepped only, driven by an external clock (`now` in seconds)
//! - Seeded RNG only
//! - All waiting is deadline comparison, never sleeping
//! - No rendering or platform dependencies

pub mod button;
pub mod event;
pub mod level;
pub mod manager;
pub mod memory;
pub mod minigame;
pub mod piece;
pub mod quiz;
pub mod sequence;
pub mod sliding;

pub use button::{Button, ButtonState};
pub use event::GameEvent;
pub use level::{campaign, load_levels, standard_boundaries, standard_pieces, LevelConfig, MinigameSpec};
pub use manager::PuzzleManager;
pub use memory::{Card, MemoryMatch};
pub use minigame::{Minigame, Variant};
pub use piece::PuzzlePiece;
pub use quiz::Quiz;
pub use sequence::{ColorSequenceMemory, SequencePhase, PAD_COLORS};
pub use sliding::{Cell, SlidingPuzzle, Tile};
