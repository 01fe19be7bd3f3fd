/// Integer rectangle used for drawing and collision.
///
/// Entities keep a floating position and derive one of these on demand, so
/// the rectangle is always the truncation of the true position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from a floating position, truncating toward zero.
    pub fn from_position(x: f32, y: f32, width: i32, height: i32) -> Self {
        Self::new(x as i32, y as i32, width, height)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True when the two rectangles overlap. Shared edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Anything that occupies space on the play field.
pub trait Bounded {
    fn rect(&self) -> Rect;

    fn collides_with<T: Bounded>(&self, other: &T) -> bool
    where
        Self: Sized,
    {
        self.rect().intersects(&other.rect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.left(), 10);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.top(), 20);
        assert_eq!(rect.bottom(), 60);
    }

    #[test]
    fn test_from_position_truncates() {
        let rect = Rect::from_position(10.9, 5.2, 4, 4);
        assert_eq!(rect.x, 10);
        assert_eq!(rect.y, 5);

        let rect = Rect::from_position(-0.7, -3.9, 4, 4);
        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, -3);
    }

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let right = Rect::new(10, 0, 10, 10);
        let below = Rect::new(0, 10, 10, 10);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_intersection_is_symmetric(
                ax in -50i32..50, ay in -50i32..50, aw in 1i32..40, ah in 1i32..40,
                bx in -50i32..50, by in -50i32..50, bw in 1i32..40, bh in 1i32..40,
            ) {
                let a = Rect::new(ax, ay, aw, ah);
                let b = Rect::new(bx, by, bw, bh);
                prop_assert_eq!(a.intersects(&b), b.intersects(&a));
            }
        }
    }
}
