use super::rect::{Bounded, Rect};

/// A laser bolt fired by the ship. Bolts travel leftward across the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    width: i32,
    height: i32,
}

impl Projectile {
    pub fn new(x: f32, y: f32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a bolt whose right edge sits at the muzzle, vertically
    /// centred on it.
    pub fn from_muzzle(muzzle: (f32, f32), width: i32, height: i32) -> Self {
        let (muzzle_x, muzzle_y) = muzzle;
        Self::new(
            muzzle_x - width as f32,
            muzzle_y - height as f32 / 2.0,
            width,
            height,
        )
    }

    pub fn update(&mut self, speed: f32) {
        self.x -= speed;
    }

    /// True once the bolt has fully left the play area on the firing side.
    pub fn is_out_of_bounds(&self, area: &Rect) -> bool {
        self.rect().right() <= area.left()
    }
}

impl Bounded for Projectile {
    fn rect(&self) -> Rect {
        Rect::from_position(self.x, self.y, self.width, self.height)
    }
}
