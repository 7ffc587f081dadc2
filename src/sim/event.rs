//! Synthetic input events
//!
//! The input layer translates raw device input into these before the sim
//! ever sees it. Minigames occupy disjoint screen regions and self-filter
//! by hit-testing the event position against their own geometry.

use glam::Vec2;

/// The only input the sim reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Player performed the primary action (click/interact) at a position
    PrimaryAction { pos: Vec2 },
    /// Externally-driven reset of all latched buttons
    ResetButtons,
}
