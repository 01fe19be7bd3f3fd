use tracing::{debug, warn};

use super::alien::Alien;
use super::arsenal::Arsenal;
use super::rect::{Bounded, Rect};

/// Grid the fleet is laid out on. Counts are always odd or zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetLayout {
    pub columns: usize,
    pub rows: usize,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl FleetLayout {
    pub fn new(alien_w: i32, alien_h: i32, area: &Rect) -> Self {
        let (columns, rows) = calculate_fleet_size(alien_w, area.width, alien_h, area.height);
        let (x_offset, y_offset) = calculate_offsets(alien_h, rows, area.height);
        Self {
            columns,
            rows,
            x_offset,
            y_offset,
        }
    }

    /// Grid cells, as `(x index, y index)`, that actually receive an alien:
    /// both indices odd.
    ///
    /// The x index runs over the row count and the y index over the column
    /// count, so the block stands narrow and tall against the left edge.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let columns = self.columns;
        (0..self.rows)
            .flat_map(move |xi| (0..columns).map(move |yi| (xi, yi)))
            .filter(|(xi, yi)| xi % 2 == 1 && yi % 2 == 1)
    }

    pub fn alien_count(&self) -> usize {
        (self.columns / 2) * (self.rows / 2)
    }
}

/// Number of columns and rows in the fleet.
///
/// The fleet fills two thirds of the width and half the height, then each
/// count is knocked down to the next odd number below it (one for even
/// counts, two for odd ones). Counts that end up below one mean no fleet.
pub fn calculate_fleet_size(
    alien_w: i32,
    screen_w: i32,
    alien_h: i32,
    screen_h: i32,
) -> (usize, usize) {
    if alien_w <= 0 || alien_h <= 0 {
        return (0, 0);
    }
    let columns = ((screen_w as f64 / 1.5) / alien_w as f64).floor() as i64;
    let rows = ((screen_h as f64 / 2.0) / alien_h as f64).floor() as i64;
    (odd_count(columns), odd_count(rows))
}

fn odd_count(raw: i64) -> usize {
    let count = if raw % 2 == 0 { raw - 1 } else { raw - 2 };
    count.max(0) as usize
}

/// Vertical offset from the height of `rows` aliens measured against the
/// top half of the play area. The fleet always starts flush left.
pub fn calculate_offsets(alien_h: i32, rows: usize, screen_h: i32) -> (i32, i32) {
    let half_screen = screen_h.div_euclid(2);
    let fleet_vertical_space = rows as i32 * alien_h;
    let y_offset = (half_screen - fleet_vertical_space).div_euclid(2);
    (0, y_offset)
}

/// The invading formation. Every member moves in lockstep.
#[derive(Debug, Clone)]
pub struct AlienFleet {
    aliens: Vec<Alien>,
    /// +1 sweeps down, -1 sweeps up
    direction: f32,
    area: Rect,
    alien_w: i32,
    alien_h: i32,
    layout: FleetLayout,
}

impl AlienFleet {
    /// Creates an empty fleet; call [`AlienFleet::create_fleet`] to populate it.
    pub fn new(alien_w: i32, alien_h: i32, area: Rect) -> Self {
        Self {
            aliens: Vec::new(),
            direction: 1.0,
            area,
            alien_w,
            alien_h,
            layout: FleetLayout::new(alien_w, alien_h, &area),
        }
    }

    /// Replaces the current members with a fresh fleet at the starting layout.
    pub fn create_fleet(&mut self) {
        self.aliens.clear();
        for (xi, yi) in self.layout.cells() {
            let x = self.alien_w * xi as i32 + self.layout.x_offset;
            let y = self.alien_h * yi as i32 + self.layout.y_offset;
            self.aliens
                .push(Alien::new(x as f32, y as f32, self.alien_w, self.alien_h));
        }

        if self.aliens.is_empty() {
            warn!(
                columns = self.layout.columns,
                rows = self.layout.rows,
                "fleet layout has no room for aliens"
            );
        } else {
            debug!(
                columns = self.layout.columns,
                rows = self.layout.rows,
                y_offset = self.layout.y_offset,
                aliens = self.aliens.len(),
                "fleet created"
            );
        }
    }

    /// One tick of fleet movement: check the edges first, then move.
    /// Returns true if the fleet turned around this tick.
    pub fn update_fleet(&mut self, speed: f32, drop_speed: f32) -> bool {
        let flipped = self.check_fleet_edges(drop_speed);
        for alien in &mut self.aliens {
            alien.update(speed, self.direction);
        }
        flipped
    }

    /// If any member touches the top or bottom, drops the whole fleet and
    /// reverses its direction. Fires at most once per call.
    fn check_fleet_edges(&mut self, drop_speed: f32) -> bool {
        let area = self.area;
        if self.aliens.iter().any(|alien| alien.check_edges(&area)) {
            self.drop_alien_fleet(drop_speed);
            self.direction = -self.direction;
            return true;
        }
        false
    }

    fn drop_alien_fleet(&mut self, drop_speed: f32) {
        for alien in &mut self.aliens {
            alien.drop_by(drop_speed);
        }
    }

    /// True if anything in the fleet overlaps `other`.
    pub fn collides_with<T: Bounded>(&self, other: &T) -> bool {
        self.aliens.iter().any(|alien| alien.collides_with(other))
    }

    /// Destroys every alien touched by a bolt, along with every bolt
    /// touching it. A bolt spent on one alien cannot take a second one.
    /// Returns how many aliens were destroyed.
    pub fn check_collisions(&mut self, arsenal: &mut Arsenal) -> usize {
        let projectiles = arsenal.projectiles();
        let mut spent = vec![false; projectiles.len()];
        let mut destroyed = 0;

        self.aliens.retain(|alien| {
            let mut hit = false;
            for (p_idx, projectile) in projectiles.iter().enumerate() {
                if !spent[p_idx] && alien.collides_with(projectile) {
                    spent[p_idx] = true;
                    hit = true;
                }
            }
            if hit {
                destroyed += 1;
            }
            !hit
        });

        if destroyed > 0 {
            let spent_indices = spent
                .iter()
                .enumerate()
                .filter_map(|(p_idx, &used)| used.then_some(p_idx))
                .collect();
            arsenal.remove_indices(spent_indices);
        }
        destroyed
    }

    /// True once any member reaches the right edge of the play area.
    pub fn check_fleet_right(&self) -> bool {
        self.aliens
            .iter()
            .any(|alien| alien.rect().right() >= self.area.right())
    }

    /// True when every alien of a real fleet has been shot down. A layout
    /// with no cells never counts as destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.aliens.is_empty() && self.layout.alien_count() > 0
    }

    pub fn reset_direction(&mut self) {
        self.direction = 1.0;
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn layout(&self) -> &FleetLayout {
        &self.layout
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    /// Adds a single alien outside the normal layout.
    pub fn spawn(&mut self, alien: Alien) {
        self.aliens.push(alien);
    }

    pub fn clear(&mut self) {
        self.aliens.clear();
    }

    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    fn area() -> Rect {
        Rect::new(0, 0, 1200, 800)
    }

    fn fleet() -> AlienFleet {
        let mut fleet = AlienFleet::new(40, 40, area());
        fleet.create_fleet();
        fleet
    }

    #[test]
    fn test_fleet_size_default_screen() {
        // 800 / 40 = 20 columns -> 19, 400 / 40 = 10 rows -> 9
        assert_eq!(calculate_fleet_size(40, 1200, 40, 800), (19, 9));
    }

    #[test]
    fn test_fleet_size_odd_raw_counts_drop_by_two() {
        // 630 / 1.5 = 420 / 40 = 10.5 -> 10 -> 9; 300 / 2 / 50 = 3 -> 1
        assert_eq!(calculate_fleet_size(40, 630, 50, 300), (9, 1));
        // 21 raw columns -> 19
        assert_eq!(calculate_fleet_size(10, 315, 10, 100), (19, 3));
    }

    #[test]
    fn test_fleet_size_degenerate() {
        assert_eq!(calculate_fleet_size(40, 50, 40, 50), (0, 0));
        assert_eq!(calculate_fleet_size(0, 1200, 40, 800), (0, 0));
        assert_eq!(calculate_fleet_size(40, 1200, -1, 800), (0, 0));
    }

    #[test]
    fn test_offsets_center_rows_in_top_half() {
        assert_eq!(calculate_offsets(40, 9, 800), (0, 20));
        // block taller than the top half floors toward negative infinity
        assert_eq!(calculate_offsets(40, 11, 800), (0, -20));
        assert_eq!(calculate_offsets(3, 1, 10), (0, 1));
        assert_eq!(calculate_offsets(7, 1, 10), (0, -1));
    }

    #[test]
    fn test_sparse_placement_five_by_three() {
        let layout = FleetLayout {
            columns: 5,
            rows: 3,
            x_offset: 0,
            y_offset: 0,
        };
        let cells: HashSet<(usize, usize)> = layout.cells().collect();
        // x indices come from the 3 rows, y indices from the 5 columns
        let expected: HashSet<(usize, usize)> = [(1, 1), (1, 3)].into_iter().collect();
        assert_eq!(cells, expected);
        assert_eq!(layout.alien_count(), 2);
    }

    #[test]
    fn test_create_fleet_default_screen() {
        let fleet = fleet();
        assert_eq!(fleet.len(), 9 * 4);

        let positions: HashSet<(i32, i32)> = fleet
            .aliens()
            .iter()
            .map(|a| (a.rect().x, a.rect().y))
            .collect();
        assert!(positions.contains(&(40, 60)));
        assert!(positions.contains(&(280, 700)));
        assert!(!positions.contains(&(680, 300)));
        assert!(!positions.contains(&(0, 20)));
        assert!(!positions.contains(&(80, 60)));

        let xs: BTreeSet<i32> = positions.iter().map(|&(x, _)| x).collect();
        let ys: BTreeSet<i32> = positions.iter().map(|&(_, y)| y).collect();
        assert_eq!(xs, BTreeSet::from([40, 120, 200, 280]));
        assert_eq!(ys, (0..9).map(|i| 60 + 80 * i).collect::<BTreeSet<i32>>());
    }

    #[test]
    fn test_default_fleet_bounces_early() {
        let mut fleet = fleet();
        // lowest alien starts at y 700 and needs 15 ticks to touch the bottom
        let first_flip = (1..=200).find(|_| fleet.update_fleet(4.0, 15.0));
        assert_eq!(first_flip, Some(16));
    }

    #[test]
    fn test_create_fleet_replaces_members() {
        let mut fleet = fleet();
        fleet.clear();
        fleet.spawn(Alien::new(500.0, 500.0, 40, 40));
        fleet.create_fleet();
        assert_eq!(fleet.len(), 36);
        assert!(fleet.aliens().iter().all(|a| a.x != 500.0));
    }

    #[test]
    fn test_degenerate_fleet_is_never_destroyed() {
        let mut fleet = AlienFleet::new(40, 40, Rect::new(0, 0, 50, 50));
        fleet.create_fleet();
        assert!(fleet.is_empty());
        assert!(!fleet.is_destroyed());
    }

    #[test]
    fn test_real_fleet_destroyed_when_empty() {
        let mut fleet = fleet();
        assert!(!fleet.is_destroyed());
        fleet.clear();
        assert!(fleet.is_destroyed());
    }

    #[test]
    fn test_update_moves_down_without_edge() {
        let mut fleet = fleet();
        let before: Vec<(f32, f32)> = fleet.aliens().iter().map(|a| (a.x, a.y)).collect();
        assert!(!fleet.update_fleet(4.0, 15.0));
        for (alien, (x, y)) in fleet.aliens().iter().zip(before) {
            assert_eq!(alien.x, x);
            assert_eq!(alien.y, y + 4.0);
        }
    }

    #[test]
    fn test_single_flip_when_many_members_at_edge() {
        let mut fleet = AlienFleet::new(40, 40, area());
        fleet.spawn(Alien::new(100.0, 760.0, 40, 40));
        fleet.spawn(Alien::new(200.0, 770.0, 40, 40));
        fleet.spawn(Alien::new(300.0, 400.0, 40, 40));

        assert!(fleet.update_fleet(4.0, 15.0));
        assert_eq!(fleet.direction(), -1.0);

        let xs: Vec<f32> = fleet.aliens().iter().map(|a| a.x).collect();
        assert_eq!(xs, vec![115.0, 215.0, 315.0]);
    }

    #[test]
    fn test_flip_applies_to_same_tick_movement() {
        let mut fleet = AlienFleet::new(40, 40, area());
        fleet.spawn(Alien::new(100.0, 760.0, 40, 40));
        fleet.update_fleet(4.0, 15.0);
        // check happens before movement, so this tick already moves up
        assert_eq!(fleet.aliens()[0].y, 756.0);
        assert!(!fleet.update_fleet(4.0, 15.0));
        assert_eq!(fleet.aliens()[0].y, 752.0);
    }

    // Characterization: the fleet sweeps vertically and creeps rightward only
    // when it bounces off the top or bottom.
    #[test]
    fn test_characterization_fleet_sweep_creeps_right() {
        let mut fleet = fleet();
        let start_x: Vec<f32> = fleet.aliens().iter().map(|a| a.x).collect();
        let mut flips = 0;
        for _ in 0..400 {
            if fleet.update_fleet(4.0, 15.0) {
                flips += 1;
            }
        }
        assert!(flips >= 2);
        for (alien, x) in fleet.aliens().iter().zip(start_x) {
            assert_eq!(alien.x, x + 15.0 * flips as f32);
        }
    }

    #[test]
    fn test_fleet_right_edge() {
        let mut fleet = AlienFleet::new(40, 40, area());
        fleet.spawn(Alien::new(1159.0, 400.0, 40, 40));
        assert!(!fleet.check_fleet_right());
        fleet.spawn(Alien::new(1160.0, 100.0, 40, 40));
        assert!(fleet.check_fleet_right());
    }

    #[test]
    fn test_projectile_collisions_remove_both_sides() {
        let mut fleet = AlienFleet::new(40, 40, area());
        fleet.spawn(Alien::new(100.0, 100.0, 40, 40));
        fleet.spawn(Alien::new(100.0, 300.0, 40, 40));
        fleet.spawn(Alien::new(600.0, 600.0, 40, 40));

        let mut arsenal = Arsenal::new(5, 80, 25);
        // bolt over the first alien
        arsenal.fire((180.0, 120.0));
        // bolt over the second alien
        arsenal.fire((180.0, 320.0));
        // bolt hitting nothing
        arsenal.fire((1000.0, 50.0));

        let destroyed = fleet.check_collisions(&mut arsenal);
        assert_eq!(destroyed, 2);
        assert_eq!(fleet.len(), 1);
        assert_eq!(fleet.aliens()[0].y, 600.0);
        assert_eq!(arsenal.len(), 1);
    }

    #[test]
    fn test_one_bolt_destroys_at_most_one_alien() {
        let mut fleet = AlienFleet::new(40, 40, area());
        fleet.spawn(Alien::new(100.0, 100.0, 40, 40));
        fleet.spawn(Alien::new(130.0, 100.0, 40, 40));

        let mut arsenal = Arsenal::new(5, 80, 25);
        arsenal.fire((200.0, 120.0));

        assert_eq!(fleet.check_collisions(&mut arsenal), 1);
        assert_eq!(fleet.len(), 1);
        assert!(arsenal.is_empty());
    }

    #[test]
    fn test_all_bolts_on_one_alien_are_spent() {
        let mut fleet = AlienFleet::new(40, 40, area());
        fleet.spawn(Alien::new(100.0, 100.0, 40, 40));

        let mut arsenal = Arsenal::new(5, 80, 25);
        arsenal.fire((180.0, 110.0));
        arsenal.fire((180.0, 130.0));
        // clear of the alien
        arsenal.fire((900.0, 500.0));

        assert_eq!(fleet.check_collisions(&mut arsenal), 1);
        assert!(fleet.is_empty());
        assert_eq!(arsenal.len(), 1);
        assert_eq!(arsenal.projectiles()[0].x, 820.0);
    }

    #[test]
    fn test_spent_bolt_cannot_take_second_alien() {
        let mut fleet = AlienFleet::new(40, 40, area());
        fleet.spawn(Alien::new(100.0, 100.0, 40, 40));
        fleet.spawn(Alien::new(130.0, 100.0, 40, 40));

        let mut arsenal = Arsenal::new(5, 80, 25);
        // first bolt touches both aliens, second bolt only the second alien
        arsenal.fire((200.0, 110.0));
        arsenal.fire((240.0, 110.0));

        assert_eq!(fleet.check_collisions(&mut arsenal), 2);
        assert!(fleet.is_empty());
        assert!(arsenal.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_fleet_counts_odd_or_empty(
                alien_w in 1i32..200,
                alien_h in 1i32..200,
                screen_w in 0i32..3000,
                screen_h in 0i32..3000
            ) {
                let (columns, rows) = calculate_fleet_size(alien_w, screen_w, alien_h, screen_h);
                prop_assert!(columns == 0 || columns % 2 == 1);
                prop_assert!(rows == 0 || rows % 2 == 1);
            }

            #[test]
            fn test_fleet_population_matches_layout(
                alien_w in 5i32..120,
                alien_h in 5i32..120,
                screen_w in 0i32..1600,
                screen_h in 0i32..1200
            ) {
                let area = Rect::new(0, 0, screen_w, screen_h);
                let mut fleet = AlienFleet::new(alien_w, alien_h, area);
                fleet.create_fleet();
                let layout = *fleet.layout();
                prop_assert_eq!(fleet.len(), (layout.columns / 2) * (layout.rows / 2));
                prop_assert_eq!(fleet.len(), layout.cells().count());
            }

            #[test]
            fn test_all_members_shift_together(
                ys in prop::collection::vec(0.0f32..760.0, 1..12),
                speed in 0.5f32..10.0,
                drop in 1.0f32..30.0
            ) {
                let mut fleet = AlienFleet::new(40, 40, Rect::new(0, 0, 1200, 800));
                for (i, y) in ys.iter().enumerate() {
                    fleet.spawn(Alien::new(50.0 * i as f32, *y, 40, 40));
                }
                let before: Vec<f32> = fleet.aliens().iter().map(|a| a.x).collect();
                let flipped = fleet.update_fleet(speed, drop);
                let shift = if flipped { drop } else { 0.0 };
                for (alien, x) in fleet.aliens().iter().zip(before) {
                    prop_assert_eq!(alien.x, x + shift);
                }
            }
        }
    }
}
