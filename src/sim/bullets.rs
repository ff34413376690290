//! Pooled projectile storage
//!
//! Bullets live in a fixed-capacity arena indexed by a free-list. Allocation
//! pops a free slot, release pushes it back; the world tracks which side owns
//! a live slot by keeping its id in exactly one of two index vectors
//! (player-side or enemy-side). A released id must never be used again until
//! it is re-allocated.

use glam::Vec2;

use super::collision::{Rect, bullet_hitbox};

/// Index of a bullet slot inside the pool
pub type BulletId = usize;

/// A projectile slot. Position is the bottom-left corner of the visual box.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl Bullet {
    /// Collision rectangle: a centered sub-rectangle of the visual box
    pub fn hitbox(&self, scale: f32) -> Rect {
        bullet_hitbox(self.pos, self.size, scale)
    }
}

/// Fixed-capacity bullet arena with free-list reuse
#[derive(Debug, Clone)]
pub struct BulletPool {
    slots: Vec<Bullet>,
    free: Vec<BulletId>,
}

impl BulletPool {
    /// Create a pool with `capacity` slots, all free
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Bullet::default(); capacity],
            // Popping from the back hands out low ids first
            free: (0..capacity).rev().collect(),
        }
    }

    /// Pop a free slot and initialize it. Returns `None` when the arena is
    /// exhausted; callers drop the shot rather than grow the pool.
    pub fn alloc(&mut self, pos: Vec2, size: Vec2, vel: Vec2) -> Option<BulletId> {
        let id = self.free.pop()?;
        self.slots[id] = Bullet { pos, size, vel };
        Some(id)
    }

    /// Return a slot to the free-list. The caller must have removed `id`
    /// from its owning side first.
    pub fn release(&mut self, id: BulletId) {
        debug_assert!(!self.free.contains(&id), "double release of bullet slot");
        self.free.push(id);
    }

    pub fn get(&self, id: BulletId) -> &Bullet {
        &self.slots[id]
    }

    pub fn get_mut(&mut self, id: BulletId) -> &mut Bullet {
        &mut self.slots[id]
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_release_reuse() {
        let mut pool = BulletPool::with_capacity(4);
        let a = pool
            .alloc(Vec2::new(1.0, 2.0), Vec2::splat(7.0), Vec2::new(0.0, 420.0))
            .unwrap();
        assert_eq!(pool.live_count(), 1);
        assert_eq!(pool.get(a).vel.y, 420.0);

        pool.release(a);
        assert_eq!(pool.live_count(), 0);

        // Free-list is LIFO: the released slot comes straight back
        let b = pool
            .alloc(Vec2::ZERO, Vec2::splat(8.0), Vec2::new(0.0, -260.0))
            .unwrap();
        assert_eq!(b, a);
        assert_eq!(pool.get(b).size.x, 8.0);
    }

    #[test]
    fn test_exhaustion_returns_none() {
        let mut pool = BulletPool::with_capacity(2);
        assert!(pool.alloc(Vec2::ZERO, Vec2::ONE, Vec2::ZERO).is_some());
        assert!(pool.alloc(Vec2::ZERO, Vec2::ONE, Vec2::ZERO).is_some());
        assert!(pool.alloc(Vec2::ZERO, Vec2::ONE, Vec2::ZERO).is_none());
        assert_eq!(pool.live_count(), 2);
    }

    #[test]
    fn test_all_ids_distinct_at_capacity() {
        let mut pool = BulletPool::with_capacity(8);
        let mut ids: Vec<BulletId> = (0..8)
            .map(|_| pool.alloc(Vec2::ZERO, Vec2::ONE, Vec2::ZERO).unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }
}
