//! Sprite instance type handed to the renderer

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::round_to_i32;

/// Texture a sprite samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    /// Flat colour fill, no texture
    Solid,
    /// Rectangle outline in `color`
    Outline,
    /// Paddle, ball and block tiles
    Sprites,
    Explosion,
    MenuBackground,
    NextLevelBackground,
    GameOverBackground,
    CompletedBackground,
    LevelBackground(u8),
}

impl Sheet {
    pub fn id(self) -> u32 {
        match self {
            Sheet::Solid => 0,
            Sheet::Outline => 1,
            Sheet::Sprites => 2,
            Sheet::Explosion => 3,
            Sheet::MenuBackground => 4,
            Sheet::NextLevelBackground => 5,
            Sheet::GameOverBackground => 6,
            Sheet::CompletedBackground => 7,
            Sheet::LevelBackground(level) => 10 + u32::from(level),
        }
    }
}

/// One quad: where it goes, where it samples, and a tint
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Destination x, y, width, height in window pixels
    pub dest: [f32; 4],
    /// Source x, y, width, height in sheet pixels
    pub src: [f32; 4],
    /// RGBA, 0.0 - 1.0
    pub color: [f32; 4],
    pub sheet: u32,
    pub _pad: [u32; 3],
}

impl SpriteInstance {
    /// Unscaled copy of a `size` cell at `src` drawn at `pos`
    pub fn textured(sheet: Sheet, pos: Vec2, size: Vec2, src: Vec2) -> Self {
        Self {
            dest: dest_rect(pos, size),
            src: [src.x, src.y, size.x, size.y],
            color: [1.0; 4],
            sheet: sheet.id(),
            _pad: [0; 3],
        }
    }

    pub fn solid(pos: Vec2, size: Vec2, color: [u8; 4]) -> Self {
        Self {
            dest: dest_rect(pos, size),
            src: [0.0; 4],
            color: normalize_color(color),
            sheet: Sheet::Solid.id(),
            _pad: [0; 3],
        }
    }

    pub fn outline(pos: Vec2, size: Vec2, color: [u8; 4]) -> Self {
        Self {
            sheet: Sheet::Outline.id(),
            ..Self::solid(pos, size, color)
        }
    }
}

/// Snap to whole pixels
fn dest_rect(pos: Vec2, size: Vec2) -> [f32; 4] {
    [round_to_i32(pos.x) as f32, round_to_i32(pos.y) as f32, size.x, size.y]
}

pub fn normalize_color(color: [u8; 4]) -> [f32; 4] {
    color.map(|c| f32::from(c) / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_is_gpu_sized() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 64);
        let sprites = [SpriteInstance::solid(Vec2::ZERO, Vec2::ONE, [255, 0, 0, 255]); 3];
        assert_eq!(bytemuck::cast_slice::<SpriteInstance, u8>(&sprites).len(), 192);
    }

    #[test]
    fn test_dest_snaps_to_pixels() {
        let s = SpriteInstance::textured(
            Sheet::Sprites,
            Vec2::new(10.6, 3.2),
            Vec2::new(8.0, 8.0),
            Vec2::new(0.0, 48.0),
        );
        assert_eq!(s.dest, [11.0, 3.0, 8.0, 8.0]);
        assert_eq!(s.src, [0.0, 48.0, 8.0, 8.0]);
        assert_eq!(s.sheet, Sheet::Sprites.id());
    }

    #[test]
    fn test_colors_normalized() {
        let s = SpriteInstance::outline(Vec2::ZERO, Vec2::ONE, [255, 0, 51, 255]);
        assert_eq!(s.color, [1.0, 0.0, 0.2, 1.0]);
        assert_eq!(s.sheet, Sheet::Outline.id());
    }
}
