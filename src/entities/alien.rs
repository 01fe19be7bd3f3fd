use super::rect::{Bounded, Rect};

/// A single invader. Position is authoritative; the rectangle follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    width: i32,
    height: i32,
}

impl Alien {
    pub fn new(x: f32, y: f32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Moves along the sweep axis. Aliens sweep vertically; the fleet
    /// direction only picks up or down.
    pub fn update(&mut self, speed: f32, direction: f32) {
        self.y += speed * direction;
    }

    /// Pushes the alien toward the far (right) edge after a sweep ends.
    pub fn drop_by(&mut self, distance: f32) {
        self.x += distance;
    }

    /// True when the alien touches the top or bottom of the play area.
    pub fn check_edges(&self, area: &Rect) -> bool {
        let rect = self.rect();
        rect.bottom() >= area.bottom() || rect.top() <= area.top()
    }
}

impl Bounded for Alien {
    fn rect(&self) -> Rect {
        Rect::from_position(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(0, 0, 1200, 800)
    }

    #[test]
    fn test_alien_rect_follows_position() {
        let mut alien = Alien::new(40.0, 60.0, 40, 40);
        alien.update(2.5, 1.0);
        assert_eq!(alien.y, 62.5);
        assert_eq!(alien.rect(), Rect::new(40, 62, 40, 40));
    }

    // Characterization: aliens sweep on the vertical axis and never move
    // horizontally on their own.
    #[test]
    fn test_characterization_update_moves_vertically_only() {
        let mut alien = Alien::new(40.0, 60.0, 40, 40);
        alien.update(4.0, 1.0);
        assert_eq!((alien.x, alien.y), (40.0, 64.0));

        alien.update(4.0, -1.0);
        assert_eq!((alien.x, alien.y), (40.0, 60.0));
    }

    #[test]
    fn test_drop_moves_right() {
        let mut alien = Alien::new(40.0, 60.0, 40, 40);
        alien.drop_by(15.0);
        assert_eq!(alien.x, 55.0);
        assert_eq!(alien.y, 60.0);
    }

    #[test]
    fn test_check_edges_top_and_bottom() {
        assert!(Alien::new(40.0, 0.0, 40, 40).check_edges(&area()));
        assert!(Alien::new(40.0, 760.0, 40, 40).check_edges(&area()));
        assert!(Alien::new(40.0, 790.0, 40, 40).check_edges(&area()));
        assert!(!Alien::new(40.0, 1.0, 40, 40).check_edges(&area()));
        assert!(!Alien::new(40.0, 400.0, 40, 40).check_edges(&area()));
    }

    #[test]
    fn test_check_edges_ignores_horizontal_position() {
        assert!(!Alien::new(1190.0, 400.0, 40, 40).check_edges(&area()));
        assert!(!Alien::new(-30.0, 400.0, 40, 40).check_edges(&area()));
    }
}
