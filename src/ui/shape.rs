//! Hit areas for widgets the shell paints itself.

use crate::prelude::*;

/// A region that can be tested against the pointer and repositioned.
pub trait HitShape {
    fn hit_test(&self, point: Pos2) -> bool;
    /// Moves the shape so its anchor lands on `point`.
    fn move_to(&mut self, point: Pos2);
    /// Top-left corner of the bounding box.
    fn anchor_point(&self) -> Pos2;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectShape {
    rect: Rect,
}

impl RectShape {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }
}

impl HitShape for RectShape {
    // Right and bottom edges are outside.
    fn hit_test(&self, point: Pos2) -> bool {
        point.x >= self.rect.min.x
            && point.x < self.rect.max.x
            && point.y >= self.rect.min.y
            && point.y < self.rect.max.y
    }

    fn move_to(&mut self, point: Pos2) {
        self.rect = Rect::from_min_size(point, self.rect.size());
    }

    fn anchor_point(&self) -> Pos2 {
        self.rect.min
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    center: Pos2,
    radius: f32,
}

impl CircleShape {
    pub fn new(center: Pos2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl HitShape for CircleShape {
    fn hit_test(&self, point: Pos2) -> bool {
        self.center.distance(point) < self.radius
    }

    fn move_to(&mut self, point: Pos2) {
        self.center = point + Vec2::splat(self.radius);
    }

    fn anchor_point(&self) -> Pos2 {
        self.center - Vec2::splat(self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_half_open() {
        let r = RectShape::new(Rect::from_min_size(pos2(10.0, 10.0), vec2(20.0, 5.0)));
        assert!(r.hit_test(pos2(10.0, 10.0)));
        assert!(r.hit_test(pos2(29.9, 14.9)));
        assert!(!r.hit_test(pos2(30.0, 12.0)));
        assert!(!r.hit_test(pos2(15.0, 15.0)));
    }

    #[test]
    fn circle_excludes_bounding_box_corners() {
        let c = CircleShape::new(pos2(50.0, 50.0), 10.0);
        assert!(c.hit_test(pos2(55.0, 55.0)));
        assert!(!c.hit_test(pos2(41.0, 41.0)));
        assert!(!c.hit_test(pos2(60.0, 50.0)));
        assert_eq!(c.anchor_point(), pos2(40.0, 40.0));
    }

    #[test]
    fn moving_keeps_size_and_anchors_top_left() {
        let mut shapes: Vec<Box<dyn HitShape>> = vec![
            Box::new(RectShape::new(Rect::from_min_size(Pos2::ZERO, vec2(10.0, 10.0)))),
            Box::new(CircleShape::new(pos2(5.0, 5.0), 5.0)),
        ];
        for shape in &mut shapes {
            shape.move_to(pos2(100.0, 200.0));
            assert_eq!(shape.anchor_point(), pos2(100.0, 200.0));
            assert!(shape.hit_test(pos2(105.0, 205.0)));
            assert!(!shape.hit_test(pos2(5.0, 5.0)));
        }
    }
}
