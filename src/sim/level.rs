//! Level configuration
//!
//! A level is four minigame specs in piece order plus a background. Specs
//! are declarative and serde-serializable so custom level lists can be
//! loaded from JSON; `instantiate` turns them into live minigames, mixing
//! a per-slot seed out of the level seed so every minigame shuffles
//! independently but reproducibly.

use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::{AssetBundle, ImageId};
use crate::consts::{
    PIECE_BODY, PIECE_ORIGIN, PIECE_TAB, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::{Color, Rect};

use super::memory::MemoryMatch;
use super::minigame::{Minigame, Variant};
use super::piece::PuzzlePiece;
use super::quiz::Quiz;
use super::sequence::ColorSequenceMemory;
use super::sliding::SlidingPuzzle;

/// Declarative minigame configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MinigameSpec {
    Quiz {
        question: String,
        answers: Vec<String>,
        correct: usize,
        #[serde(default)]
        caption: Option<ImageId>,
    },
    Memory {
        rows: u32,
        cols: u32,
        faces: Vec<ImageId>,
    },
    Sliding {
        rows: u32,
        cols: u32,
        image: ImageId,
    },
    Sequence {
        length: usize,
    },
}

impl MinigameSpec {
    /// Build a live minigame from this spec
    pub fn instantiate(&self, seed: u64, assets: &Rc<AssetBundle>) -> Minigame {
        let variant = match self {
            MinigameSpec::Quiz { question, answers, correct, caption } => {
                Variant::Quiz(Quiz::new(
                    question.clone(),
                    answers.clone(),
                    *correct,
                    *caption,
                    assets.clone(),
                ))
            }
            MinigameSpec::Memory { rows, cols, faces } => {
                Variant::Memory(MemoryMatch::new(*rows, *cols, faces.clone(), seed))
            }
            MinigameSpec::Sliding { rows, cols, image } => {
                Variant::Sliding(SlidingPuzzle::new(*rows, *cols, *image, seed, assets.clone()))
            }
            MinigameSpec::Sequence { length } => {
                Variant::Sequence(ColorSequenceMemory::new(*length, seed, assets.clone()))
            }
        };
        Minigame::new(variant)
    }

    /// Every image this spec references
    pub fn images(&self) -> Vec<ImageId> {
        match self {
            MinigameSpec::Quiz { caption, .. } => caption.iter().copied().collect(),
            MinigameSpec::Memory { faces, .. } => faces.clone(),
            MinigameSpec::Sliding { image, .. } => vec![*image],
            MinigameSpec::Sequence { .. } => Vec::new(),
        }
    }
}

/// One level: minigames in piece order plus a background
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    pub minigames: Vec<MinigameSpec>,
    pub background: ImageId,
}

impl LevelConfig {
    /// Instantiate all minigames, one slot seed each mixed from the level
    /// seed with a Knuth multiplicative hash
    pub fn instantiate(&self, level_seed: u64, assets: &Rc<AssetBundle>) -> Vec<Minigame> {
        self.minigames
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let slot_seed = (i as u64)
                    .wrapping_mul(2654435761)
                    .wrapping_add(level_seed);
                spec.instantiate(slot_seed, assets)
            })
            .collect()
    }

    /// Images referenced by this level but absent from the bundle
    pub fn missing_images(&self, assets: &AssetBundle) -> Vec<ImageId> {
        let mut missing = Vec::new();
        let referenced =
            std::iter::once(self.background).chain(self.minigames.iter().flat_map(|m| m.images()));
        for id in referenced {
            if !assets.contains(id) && !missing.contains(&id) {
                missing.push(id);
            }
        }
        missing
    }
}

/// The four-piece jigsaw layout: two plain corners and two offset by the
/// interlocking tab, each quarter-turned into place
pub fn standard_pieces(assets: &Rc<AssetBundle>) -> Vec<PuzzlePiece> {
    let (ox, oy) = PIECE_ORIGIN;
    vec![
        PuzzlePiece::new(Vec2::new(ox, oy), Color::rgb(55, 0, 0), 0, assets),
        PuzzlePiece::new(
            Vec2::new(ox + PIECE_BODY, oy),
            Color::rgb(0, 55, 0),
            3,
            assets,
        ),
        PuzzlePiece::new(
            Vec2::new(ox, oy + PIECE_BODY - PIECE_TAB),
            Color::rgb(0, 0, 55),
            1,
            assets,
        ),
        PuzzlePiece::new(
            Vec2::new(ox + PIECE_BODY - PIECE_TAB, oy + PIECE_BODY),
            Color::rgb(55, 55, 0),
            2,
            assets,
        ),
    ]
}

/// Screen quadrants, one minigame boundary per piece
pub fn standard_boundaries() -> Vec<Rect> {
    let w = SCREEN_WIDTH / 2.0;
    let h = SCREEN_HEIGHT / 2.0;
    vec![
        Rect::new(0.0, 0.0, w, h),
        Rect::new(w, 0.0, w, h),
        Rect::new(0.0, h, w, h),
        Rect::new(w, h, w, h),
    ]
}

/// The built-in campaign
pub fn campaign() -> Vec<LevelConfig> {
    let quiz = |question: &str, answers: &[&str], correct: usize| MinigameSpec::Quiz {
        question: question.to_string(),
        answers: answers.iter().map(|s| s.to_string()).collect(),
        correct,
        caption: None,
    };

    vec![
        // Warm-up: quizzes only
        LevelConfig {
            minigames: vec![
                quiz("What orbits the Earth?", &["The Moon", "The Sun"], 0),
                quiz("How many legs has a spider?", &["Six", "Eight"], 1),
                quiz("Which is a primary color?", &["Green", "Blue"], 1),
                quiz("What melts in the sun?", &["Ice", "Stone"], 0),
            ],
            background: ImageId::Level(0),
        },
        // One of each
        LevelConfig {
            minigames: vec![
                quiz("Which planet is red?", &["Mars", "Venus", "Neptune"], 0),
                MinigameSpec::Memory {
                    rows: 4,
                    cols: 4,
                    faces: (0..8).map(ImageId::Face).collect(),
                },
                MinigameSpec::Sliding { rows: 3, cols: 3, image: ImageId::Photo(0) },
                MinigameSpec::Sequence { length: 4 },
            ],
            background: ImageId::Level(1),
        },
        // Harder variants, plus a captioned quiz
        LevelConfig {
            minigames: vec![
                MinigameSpec::Quiz {
                    question: "Who is in this photo?".to_string(),
                    answers: vec!["Grandma".to_string(), "Grandpa".to_string(), "The cat".to_string()],
                    correct: 2,
                    caption: Some(ImageId::Photo(2)),
                },
                MinigameSpec::Memory {
                    rows: 4,
                    cols: 6,
                    faces: (0..8).map(ImageId::Face).collect(),
                },
                MinigameSpec::Sliding { rows: 4, cols: 4, image: ImageId::Photo(1) },
                MinigameSpec::Sequence { length: 6 },
            ],
            background: ImageId::Level(2),
        },
    ]
}

/// Parse a custom level list from JSON
pub fn load_levels(json: &str) -> Result<Vec<LevelConfig>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PIECE_COUNT;

    #[test]
    fn test_campaign_levels_are_well_formed() {
        let assets = AssetBundle::standard();
        for (i, level) in campaign().iter().enumerate() {
            assert_eq!(level.minigames.len(), PIECE_COUNT, "level {i}");
            assert!(level.missing_images(&assets).is_empty(), "level {i}");
            for spec in &level.minigames {
                if let MinigameSpec::Memory { rows, cols, .. } = spec {
                    assert_eq!((rows * cols) % 2, 0, "level {i} memory grid");
                }
            }
        }
    }

    #[test]
    fn test_instantiate_is_deterministic_per_seed() {
        let assets = Rc::new(AssetBundle::standard());
        let level = &campaign()[1];
        let a = level.instantiate(77, &assets);
        let b = level.instantiate(77, &assets);

        let (Variant::Sliding(sa), Variant::Sliding(sb)) =
            (a[2].variant(), b[2].variant())
        else {
            panic!("slot 2 is the sliding puzzle")
        };
        assert_eq!(sa.scramble_trace(), sb.scramble_trace());

        // A different seed walks differently
        let c = level.instantiate(78, &assets);
        let Variant::Sliding(sc) = c[2].variant() else {
            panic!("slot 2 is the sliding puzzle")
        };
        assert_ne!(sa.scramble_trace(), sc.scramble_trace());
    }

    #[test]
    fn test_levels_round_trip_through_json() {
        let levels = campaign();
        let json = serde_json::to_string(&levels).unwrap();
        let parsed = load_levels(&json).unwrap();
        assert_eq!(parsed.len(), levels.len());
        assert_eq!(parsed[0].minigames.len(), PIECE_COUNT);
    }

    #[test]
    fn test_missing_images_reported() {
        let level = &campaign()[1];
        let empty = AssetBundle::new();
        let missing = level.missing_images(&empty);
        assert!(missing.contains(&ImageId::Level(1)));
        assert!(missing.contains(&ImageId::Photo(0)));
    }

    #[test]
    fn test_standard_pieces_form_the_jigsaw() {
        let assets = Rc::new(AssetBundle::standard());
        let pieces = standard_pieces(&assets);
        assert_eq!(pieces.len(), PIECE_COUNT);
        // Top-left piece sits at the origin
        assert_eq!(pieces[0].rect().pos(), Vec2::new(410.0, 0.0));
        // Bottom-left piece is raised by the tab
        assert_eq!(
            pieces[2].rect().pos(),
            Vec2::new(410.0, PIECE_BODY - PIECE_TAB)
        );
    }
}
