//! Axis-aligned collision geometry
//!
//! Every entity in the playfield collides as an axis-aligned rectangle.
//! Bullets use a centered sub-rectangle of their visual box; everything
//! else uses its full bounding box. The multi-way resolution order lives
//! in `tick`; this module is the geometry it is built on.

use glam::Vec2;

use super::state::PowerUpKind;

/// Axis-aligned rectangle, origin at the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle spanning `size` with its bottom-left corner at `pos`
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Rectangle of `half` extents centered on `center`
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self::new(center.x - half.x, center.y - half.y, half.x * 2.0, half.y * 2.0)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Open-interval overlap test, matching the classic rectangle check:
    /// touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Centered sub-rectangle used for bullet collision.
///
/// `scale` is the fraction of the visual box kept as hitbox; see
/// [`crate::consts::BULLET_HITBOX_SCALE`], configurable through tuning.
pub fn bullet_hitbox(pos: Vec2, size: Vec2, scale: f32) -> Rect {
    let hit = size * scale;
    let offset = (size - hit) / 2.0;
    Rect::from_pos_size(pos + offset, hit)
}

/// Partition a single uniform roll in [0, 1) into the pickup-drop bands.
///
/// Exclusive bands: rapid, spread, shield, life, then nothing. Kept as a
/// pure function of the roll so the bands are testable without an RNG.
pub fn drop_for_roll(roll: f32) -> Option<PowerUpKind> {
    if roll < 0.10 {
        Some(PowerUpKind::Rapid)
    } else if roll < 0.18 {
        Some(PowerUpKind::Spread)
    } else if roll < 0.24 {
        Some(PowerUpKind::Shield)
    } else if roll < 0.28 {
        Some(PowerUpKind::Life)
    } else {
        None
    }
}
