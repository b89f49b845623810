//! Sprite catalog and image loading
//!
//! Every sprite the renderer can ask for has a path, a nominal size and a
//! solid fallback colour. A sprite whose image cannot be loaded is replaced
//! by a solid-colour bitmap of the nominal size; the run never fails over a
//! missing picture.

use std::collections::HashMap;

use glam::Vec2;
use thiserror::Error;

use crate::sim::{CollectibleKind, EnemyKind, LevelInfo, PowerUpKind, ProjectileKind};
use crate::tuning::Tuning;

/// Image loading failure
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("cannot decode {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Everything the renderer can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    /// Full-screen background of a level
    Background(usize),
    Platform,
    Enemy(EnemyKind),
    Projectile(ProjectileKind),
    PowerUp(PowerUpKind),
    Collectible(CollectibleKind),
    Player,
    Helmet,
    GuitarOverlay,
    LaptopOverlay,
}

impl SpriteId {
    /// Stable numeric id for GPU instance data. Backgrounds occupy 1000+.
    pub fn code(&self) -> u32 {
        match self {
            SpriteId::Background(index) => 1000 + *index as u32,
            SpriteId::Platform => 1,
            SpriteId::Enemy(EnemyKind::Walker) => 10,
            SpriteId::Enemy(EnemyKind::Shooter) => 11,
            SpriteId::Projectile(ProjectileKind::Puck) => 20,
            SpriteId::Projectile(ProjectileKind::Note) => 21,
            SpriteId::PowerUp(PowerUpKind::Hockey) => 30,
            SpriteId::PowerUp(PowerUpKind::Guitar) => 31,
            SpriteId::PowerUp(PowerUpKind::Dumbbell) => 32,
            SpriteId::PowerUp(PowerUpKind::Laptop) => 33,
            SpriteId::PowerUp(PowerUpKind::Heart) => 34,
            SpriteId::Collectible(CollectibleKind::Coin) => 40,
            SpriteId::Collectible(CollectibleKind::Sushi) => 41,
            SpriteId::Collectible(CollectibleKind::Beer) => 42,
            SpriteId::Player => 50,
            SpriteId::Helmet => 51,
            SpriteId::GuitarOverlay => 52,
            SpriteId::LaptopOverlay => 53,
        }
    }

    fn file_stem(&self) -> &'static str {
        match self {
            SpriteId::Background(_) => "background",
            SpriteId::Platform => "platform",
            SpriteId::Enemy(EnemyKind::Walker) => "enemy",
            SpriteId::Enemy(EnemyKind::Shooter) => "hockey_enemy",
            SpriteId::Projectile(ProjectileKind::Puck) => "puck",
            SpriteId::Projectile(ProjectileKind::Note) => "note",
            SpriteId::PowerUp(PowerUpKind::Hockey) => "hockey_powerup",
            SpriteId::PowerUp(PowerUpKind::Guitar) => "guitar_powerup",
            SpriteId::PowerUp(PowerUpKind::Dumbbell) => "dumbbell",
            SpriteId::PowerUp(PowerUpKind::Laptop) => "laptop",
            SpriteId::PowerUp(PowerUpKind::Heart) => "heart",
            SpriteId::Collectible(CollectibleKind::Coin) => "coin",
            SpriteId::Collectible(CollectibleKind::Sushi) => "sushi",
            SpriteId::Collectible(CollectibleKind::Beer) => "beer",
            SpriteId::Player => "player",
            SpriteId::Helmet => "helmet",
            SpriteId::GuitarOverlay => "guitar",
            SpriteId::LaptopOverlay => "laptop_overlay",
        }
    }

    fn fallback_color(&self) -> [u8; 3] {
        match self {
            SpriteId::Background(_) => [0, 0, 0],
            SpriteId::Platform => [0, 200, 0],
            SpriteId::Enemy(EnemyKind::Walker) => [255, 255, 255],
            SpriteId::Enemy(EnemyKind::Shooter) => [200, 200, 255],
            SpriteId::Projectile(_) => [0, 0, 0],
            SpriteId::PowerUp(PowerUpKind::Hockey) => [255, 255, 255],
            SpriteId::PowerUp(PowerUpKind::Guitar) => [160, 82, 45],
            SpriteId::PowerUp(PowerUpKind::Dumbbell) => [80, 80, 80],
            SpriteId::PowerUp(PowerUpKind::Laptop) => [120, 120, 140],
            SpriteId::PowerUp(PowerUpKind::Heart) => [220, 20, 60],
            SpriteId::Collectible(CollectibleKind::Coin) => [255, 223, 0],
            SpriteId::Collectible(CollectibleKind::Sushi) => [255, 248, 220],
            SpriteId::Collectible(CollectibleKind::Beer) => [255, 215, 0],
            SpriteId::Player => [0, 0, 255],
            SpriteId::Helmet => [200, 200, 0],
            SpriteId::GuitarOverlay => [139, 69, 19],
            SpriteId::LaptopOverlay => [120, 120, 140],
        }
    }
}

/// RGBA8 image
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl Bitmap {
    /// Opaque single-colour placeholder
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb;
        Self {
            width,
            height,
            pixels: vec![[r, g, b, 255]; (width * height) as usize],
        }
    }

    /// Raw bytes, ready for a texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Source of decoded images
pub trait AssetLoader {
    fn load_image(&mut self, path: &str) -> Result<Bitmap, AssetError>;
}

/// Loader for headless runs: every lookup misses
#[derive(Debug, Default)]
pub struct NoAssets;

impl AssetLoader for NoAssets {
    fn load_image(&mut self, path: &str) -> Result<Bitmap, AssetError> {
        Err(AssetError::NotFound(path.to_string()))
    }
}

/// Bitmaps for every sprite, loaded once up front
#[derive(Debug, Clone)]
pub struct SpriteAtlas {
    bitmaps: HashMap<SpriteId, Bitmap>,
    /// How many sprites fell back to a placeholder
    pub placeholders: usize,
}

impl SpriteAtlas {
    /// Load every sprite used by `levels`, substituting placeholders for
    /// anything the loader cannot provide
    pub fn load(
        loader: &mut dyn AssetLoader,
        levels: &[LevelInfo],
        tuning: &Tuning,
        viewport: Vec2,
    ) -> Self {
        let mut atlas = Self {
            bitmaps: HashMap::new(),
            placeholders: 0,
        };

        for level in levels {
            let path = format!("Images/{}.png", level.background);
            atlas.insert(
                loader,
                SpriteId::Background(level.index),
                &path,
                viewport,
                level.fallback_color,
            );
        }

        let player = Vec2::new(tuning.player_width, tuning.player_height);
        let projectile = |kind: ProjectileKind| Vec2::splat(tuning.weapon(kind).size);
        let mut fixed = vec![
            (SpriteId::Platform, Vec2::ONE),
            (SpriteId::Enemy(EnemyKind::Walker), Vec2::splat(tuning.enemy_size)),
            (SpriteId::Enemy(EnemyKind::Shooter), Vec2::splat(tuning.enemy_size)),
            (SpriteId::Projectile(ProjectileKind::Puck), projectile(ProjectileKind::Puck)),
            (SpriteId::Projectile(ProjectileKind::Note), projectile(ProjectileKind::Note)),
            (SpriteId::Player, player),
            (SpriteId::Helmet, player),
            (SpriteId::GuitarOverlay, player),
            (SpriteId::LaptopOverlay, player),
        ];
        for kind in [
            PowerUpKind::Hockey,
            PowerUpKind::Guitar,
            PowerUpKind::Dumbbell,
            PowerUpKind::Laptop,
            PowerUpKind::Heart,
        ] {
            fixed.push((SpriteId::PowerUp(kind), kind.size()));
        }
        for kind in [CollectibleKind::Coin, CollectibleKind::Sushi, CollectibleKind::Beer] {
            fixed.push((SpriteId::Collectible(kind), kind.size()));
        }

        for (id, size) in fixed {
            let path = format!("Images/{}.png", id.file_stem());
            atlas.insert(loader, id, &path, size, id.fallback_color());
        }

        log::info!(
            "Loaded {} sprites ({} placeholders, {} texture bytes)",
            atlas.bitmaps.len(),
            atlas.placeholders,
            atlas.texture_bytes()
        );
        atlas
    }

    fn insert(
        &mut self,
        loader: &mut dyn AssetLoader,
        id: SpriteId,
        path: &str,
        size: Vec2,
        fallback: [u8; 3],
    ) {
        let bitmap = match loader.load_image(path) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                log::warn!("{e}; using placeholder");
                self.placeholders += 1;
                Bitmap::solid(size.x.round() as u32, size.y.round() as u32, fallback)
            }
        };
        self.bitmaps.insert(id, bitmap);
    }

    pub fn get(&self, id: SpriteId) -> Option<&Bitmap> {
        self.bitmaps.get(&id)
    }

    /// Total upload size of every bitmap
    pub fn texture_bytes(&self) -> usize {
        self.bitmaps.values().map(|b| b.as_bytes().len()).sum()
    }

    pub fn len(&self) -> usize {
        self.bitmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bitmaps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::campaign_world;
    use crate::settings::Settings;

    /// Serves only the player sprite
    struct OnlyPlayer;

    impl AssetLoader for OnlyPlayer {
        fn load_image(&mut self, path: &str) -> Result<Bitmap, AssetError> {
            if path == "Images/player.png" {
                Ok(Bitmap::solid(30, 50, [1, 2, 3]))
            } else {
                Err(AssetError::NotFound(path.to_string()))
            }
        }
    }

    fn atlas(loader: &mut dyn AssetLoader) -> SpriteAtlas {
        let state = campaign_world(Tuning::default(), Settings::default()).unwrap();
        SpriteAtlas::load(loader, &state.levels, &state.tuning, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_missing_assets_become_placeholders() {
        let atlas = atlas(&mut NoAssets);
        assert_eq!(atlas.placeholders, atlas.len());

        let bg = atlas.get(SpriteId::Background(1)).unwrap();
        assert_eq!((bg.width, bg.height), (800, 600));
        assert_eq!(bg.pixels[0], [180, 50, 50, 255]);

        let coin = atlas.get(SpriteId::Collectible(CollectibleKind::Coin)).unwrap();
        assert_eq!((coin.width, coin.height), (15, 15));
    }

    #[test]
    fn test_loaded_assets_are_kept() {
        let atlas = atlas(&mut OnlyPlayer);
        assert_eq!(atlas.placeholders, atlas.len() - 1);
        assert_eq!(atlas.get(SpriteId::Player).unwrap().pixels[0], [1, 2, 3, 255]);
    }

    #[test]
    fn test_placeholder_is_deterministic() {
        assert_eq!(atlas(&mut NoAssets).bitmaps, atlas(&mut NoAssets).bitmaps);
    }

    #[test]
    fn test_bitmap_bytes() {
        let bmp = Bitmap::solid(2, 1, [10, 20, 30]);
        assert_eq!(bmp.as_bytes(), &[10, 20, 30, 255, 10, 20, 30, 255]);
    }

    #[test]
    fn test_projectile_placeholders_follow_tuning() {
        let mut tuning = Tuning::default();
        tuning.puck.size = 12.0;
        tuning.note.size = 7.0;
        let state = campaign_world(tuning, Settings::default()).unwrap();
        let atlas = SpriteAtlas::load(
            &mut NoAssets,
            &state.levels,
            &state.tuning,
            Vec2::new(800.0, 600.0),
        );

        let puck = atlas.get(SpriteId::Projectile(ProjectileKind::Puck)).unwrap();
        assert_eq!((puck.width, puck.height), (12, 12));
        let note = atlas.get(SpriteId::Projectile(ProjectileKind::Note)).unwrap();
        assert_eq!((note.width, note.height), (7, 7));
    }

    #[test]
    fn test_texture_bytes_cover_every_bitmap() {
        let atlas = atlas(&mut NoAssets);
        let pixels: usize = atlas.bitmaps.values().map(|b| b.pixels.len()).sum();
        assert_eq!(atlas.texture_bytes(), pixels * 4);
    }

    #[test]
    fn test_sprite_codes_unique() {
        let ids = [
            SpriteId::Platform,
            SpriteId::Enemy(EnemyKind::Walker),
            SpriteId::Enemy(EnemyKind::Shooter),
            SpriteId::Projectile(ProjectileKind::Puck),
            SpriteId::Projectile(ProjectileKind::Note),
            SpriteId::Player,
            SpriteId::Helmet,
            SpriteId::GuitarOverlay,
            SpriteId::LaptopOverlay,
            SpriteId::Background(0),
        ];
        let mut codes: Vec<u32> = ids.iter().map(SpriteId::code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), ids.len());
    }
}
