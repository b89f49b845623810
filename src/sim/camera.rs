//! Horizontal camera tracking
//!
//! The camera keeps the player centered and stops at the world edges.

use serde::{Deserialize, Serialize};

/// Horizontal viewport offset into world space, recomputed every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Convert a world x coordinate to a screen x coordinate
    #[inline]
    pub fn to_screen_x(&self, world_x: f32) -> f32 {
        world_x - self.x
    }

    /// Whether a horizontal span overlaps the viewport
    pub fn sees(&self, left: f32, right: f32, viewport_width: f32) -> bool {
        right > self.x && left < self.x + viewport_width
    }
}

/// `clamp(center_x - viewport/2, 0, world - viewport)`
///
/// A world narrower than the viewport pins the camera at zero.
pub fn camera_offset(player_center_x: f32, viewport_width: f32, world_width: f32) -> f32 {
    let max = (world_width - viewport_width).max(0.0);
    (player_center_x - viewport_width / 2.0).clamp(0.0, max)
}

/// Which level a world x coordinate falls in, clamped to valid indices
pub fn level_index_at(x: f32, level_width: f32, level_count: usize) -> usize {
    if level_count == 0 || level_width <= 0.0 {
        return 0;
    }
    let index = (x / level_width).floor();
    if index <= 0.0 {
        0
    } else {
        (index as usize).min(level_count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_camera_centers_player() {
        assert_eq!(camera_offset(1000.0, 800.0, 6400.0), 600.0);
    }

    #[test]
    fn test_camera_clamps_at_edges() {
        assert_eq!(camera_offset(25.0, 800.0, 6400.0), 0.0);
        assert_eq!(camera_offset(6390.0, 800.0, 6400.0), 5600.0);
        assert_eq!(camera_offset(9000.0, 800.0, 6400.0), 5600.0);
    }

    #[test]
    fn test_narrow_world_pins_camera() {
        assert_eq!(camera_offset(500.0, 800.0, 400.0), 0.0);
    }

    #[test]
    fn test_level_index() {
        assert_eq!(level_index_at(0.0, 800.0, 8), 0);
        assert_eq!(level_index_at(799.0, 800.0, 8), 0);
        assert_eq!(level_index_at(800.0, 800.0, 8), 1);
        assert_eq!(level_index_at(5600.0, 800.0, 8), 7);
        assert_eq!(level_index_at(99999.0, 800.0, 8), 7);
        assert_eq!(level_index_at(-50.0, 800.0, 8), 0);
    }

    #[test]
    fn test_visibility() {
        let cam = Camera { x: 800.0 };
        assert!(cam.sees(790.0, 820.0, 800.0));
        assert!(!cam.sees(700.0, 800.0, 800.0));
        assert!(!cam.sees(1600.0, 1640.0, 800.0));
        assert_eq!(cam.to_screen_x(850.0), 50.0);
    }

    proptest! {
        #[test]
        fn prop_camera_always_in_bounds(x in -20000.0f32..20000.0) {
            let cam = camera_offset(x, 800.0, 6400.0);
            prop_assert!((0.0..=5600.0).contains(&cam));
        }
    }
}
