use super::rect::{Bounded, Rect};

/// The player's ship. It hugs the right edge of the play area and only
/// moves up and down.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    width: i32,
    height: i32,
    pub moving_up: bool,
    pub moving_down: bool,
}

impl Ship {
    /// Creates a ship centred on the right edge of `area`.
    pub fn new(width: i32, height: i32, area: &Rect) -> Self {
        let mut ship = Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            moving_up: false,
            moving_down: false,
        };
        ship.center_ship(area);
        ship
    }

    pub fn center_ship(&mut self, area: &Rect) {
        self.x = (area.right() - self.width) as f32;
        self.y = (area.top() + (area.height - self.height) / 2) as f32;
    }

    /// Applies the held movement flags, then keeps the ship inside `area`.
    pub fn update(&mut self, speed: f32, area: &Rect) {
        if self.moving_up {
            self.y -= speed;
        }
        if self.moving_down {
            self.y += speed;
        }

        let min_y = area.top() as f32;
        let max_y = (area.bottom() - self.height).max(area.top()) as f32;
        self.y = self.y.clamp(min_y, max_y);
    }

    pub fn stop(&mut self) {
        self.moving_up = false;
        self.moving_down = false;
    }

    /// Point projectiles leave from: the middle of the ship's left side.
    pub fn muzzle(&self) -> (f32, f32) {
        (self.x, self.y + self.height as f32 / 2.0)
    }
}

impl Bounded for Ship {
    fn rect(&self) -> Rect {
        Rect::from_position(self.x, self.y, self.width, self.height)
    }
}
