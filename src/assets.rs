//! Image handle table
//!
//! The sim never touches pixels. It refers to images by `ImageId` and only
//! needs their dimensions for layout; decoding and blitting stay in the
//! platform layer. One read-only `AssetBundle` is shared by everything in a
//! level via `Rc`.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Handle to an image owned by the asset collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageId {
    /// The tintable puzzle piece sprite
    PuzzlePiece,
    /// Answer button, released
    ButtonUp,
    /// Answer button, pressed
    ButtonDown,
    /// Face-down memory card
    CardBack,
    /// Memory card face, by index into the face pool
    Face(u8),
    /// Sliding-puzzle source photo
    Photo(u8),
    /// Level background
    Level(u8),
}

/// Read-only image-size table handed to the sim at construction
#[derive(Debug, Clone, Default)]
pub struct AssetBundle {
    sizes: HashMap<ImageId, Vec2>,
}

impl AssetBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image's dimensions
    pub fn insert(&mut self, id: ImageId, w: f32, h: f32) {
        self.sizes.insert(id, Vec2::new(w, h));
    }

    pub fn contains(&self, id: ImageId) -> bool {
        self.sizes.contains_key(&id)
    }

    /// Dimensions of an image. Panics on an unregistered id: a level that
    /// references a missing image cannot be played.
    pub fn size(&self, id: ImageId) -> Vec2 {
        match self.sizes.get(&id) {
            Some(&size) => size,
            None => panic!("unknown image id {id:?}"),
        }
    }

    /// The bundle shipped with the built-in campaign: 8 card faces,
    /// 3 photos, 3 level backgrounds, plus the shared sprites.
    pub fn standard() -> Self {
        let mut bundle = Self::new();
        bundle.insert(ImageId::PuzzlePiece, 638.0, 638.0);
        bundle.insert(ImageId::ButtonUp, 180.0, 110.0);
        bundle.insert(ImageId::ButtonDown, 180.0, 110.0);
        bundle.insert(ImageId::CardBack, 140.0, 140.0);
        for i in 0..8 {
            bundle.insert(ImageId::Face(i), 128.0, 128.0);
        }
        for i in 0..3 {
            bundle.insert(ImageId::Photo(i), 900.0, 900.0);
            bundle.insert(ImageId::Level(i), 1100.0, 1100.0);
        }
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_bundle_has_shared_sprites() {
        let bundle = AssetBundle::standard();
        assert!(bundle.contains(ImageId::PuzzlePiece));
        assert_eq!(bundle.size(ImageId::ButtonUp), bundle.size(ImageId::ButtonDown));
        assert!(bundle.contains(ImageId::Face(7)));
        assert!(!bundle.contains(ImageId::Face(8)));
    }

    #[test]
    #[should_panic(expected = "unknown image id")]
    fn test_unknown_id_is_fatal() {
        AssetBundle::new().size(ImageId::CardBack);
    }
}
