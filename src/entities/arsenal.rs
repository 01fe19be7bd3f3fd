use super::projectile::Projectile;
use super::rect::Rect;

/// Bounded pool of the ship's shots in flight.
#[derive(Debug, Clone)]
pub struct Arsenal {
    projectiles: Vec<Projectile>,
    capacity: usize,
    bullet_w: i32,
    bullet_h: i32,
}

impl Arsenal {
    pub fn new(capacity: usize, bullet_w: i32, bullet_h: i32) -> Self {
        Self {
            projectiles: Vec::with_capacity(capacity),
            capacity,
            bullet_w,
            bullet_h,
        }
    }

    /// Fires a new bolt from `muzzle` if there is room in the pool.
    /// Returns false (and does nothing) when the pool is full.
    pub fn fire(&mut self, muzzle: (f32, f32)) -> bool {
        if self.projectiles.len() >= self.capacity {
            return false;
        }
        self.projectiles
            .push(Projectile::from_muzzle(muzzle, self.bullet_w, self.bullet_h));
        true
    }

    /// Moves every bolt and drops the ones that left the play area.
    pub fn update(&mut self, speed: f32, area: &Rect) {
        for projectile in &mut self.projectiles {
            projectile.update(speed);
        }
        self.projectiles.retain(|p| !p.is_out_of_bounds(area));
    }

    /// Removes the bolts at the given indices. Indices may repeat.
    pub fn remove_indices(&mut self, mut indices: Vec<usize>) {
        indices.sort_unstable();
        indices.dedup();
        for idx in indices.into_iter().rev() {
            if idx < self.projectiles.len() {
                self.projectiles.swap_remove(idx);
            }
        }
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(0, 0, 1200, 800)
    }

    #[test]
    fn test_fire_below_capacity_adds_one() {
        let mut arsenal = Arsenal::new(5, 80, 25);
        assert!(arsenal.fire((1080.0, 400.0)));
        assert_eq!(arsenal.len(), 1);
        assert_eq!(arsenal.projectiles()[0].x, 1000.0);
    }

    #[test]
    fn test_fire_at_capacity_is_noop() {
        let mut arsenal = Arsenal::new(2, 80, 25);
        assert!(arsenal.fire((1080.0, 400.0)));
        assert!(arsenal.fire((1080.0, 400.0)));
        assert!(!arsenal.fire((1080.0, 400.0)));
        assert_eq!(arsenal.len(), 2);
    }

    #[test]
    fn test_zero_capacity_never_fires() {
        let mut arsenal = Arsenal::new(0, 80, 25);
        assert!(!arsenal.fire((1080.0, 400.0)));
        assert!(arsenal.is_empty());
    }

    #[test]
    fn test_update_prunes_departed_bolts() {
        let mut arsenal = Arsenal::new(5, 80, 25);
        arsenal.fire((1080.0, 400.0));
        // right edge starts at x=10
        arsenal.fire((10.0, 400.0));
        arsenal.update(7.0, &area());
        assert_eq!(arsenal.len(), 2);

        arsenal.update(7.0, &area());
        assert_eq!(arsenal.len(), 1);
        assert_eq!(arsenal.projectiles()[0].x, 986.0);
    }

    #[test]
    fn test_pruning_frees_capacity() {
        let mut arsenal = Arsenal::new(1, 80, 25);
        assert!(arsenal.fire((0.0, 400.0)));
        assert!(!arsenal.fire((1080.0, 400.0)));
        arsenal.update(1.0, &area());
        assert!(arsenal.is_empty());
        assert!(arsenal.fire((1080.0, 400.0)));
    }

    #[test]
    fn test_remove_indices_handles_duplicates() {
        let mut arsenal = Arsenal::new(5, 80, 25);
        for y in [100.0, 200.0, 300.0] {
            arsenal.fire((1080.0, y));
        }
        arsenal.remove_indices(vec![2, 0, 2, 9]);
        assert_eq!(arsenal.len(), 1);
        assert_eq!(arsenal.projectiles()[0].y, 187.5);
    }

    #[test]
    fn test_clear_empties_pool() {
        let mut arsenal = Arsenal::new(5, 80, 25);
        arsenal.fire((1080.0, 400.0));
        arsenal.fire((1080.0, 300.0));
        arsenal.clear();
        assert!(arsenal.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_arsenal_never_exceeds_capacity(
                capacity in 0usize..8,
                commands in prop::collection::vec(prop::bool::ANY, 0..100)
            ) {
                let area = Rect::new(0, 0, 1200, 800);
                let mut arsenal = Arsenal::new(capacity, 80, 25);
                for fire in commands {
                    if fire {
                        let before = arsenal.len();
                        let fired = arsenal.fire((1080.0, 400.0));
                        prop_assert_eq!(fired, before < capacity);
                        prop_assert_eq!(arsenal.len(), before + usize::from(fired));
                    } else {
                        arsenal.update(50.0, &area);
                    }
                    prop_assert!(arsenal.len() <= capacity);
                }
            }
        }
    }
}
