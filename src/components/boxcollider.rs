use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Axis-aligned collision box relative to an entity's
/// [`MapPosition`](super::mapposition::MapPosition).
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector2,
    pub offset: Vector2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
            offset: Vector2::zero(),
        }
    }

    /// Modify BoxCollider with given size and offset
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vector2) -> (Vector2, Vector2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        let min = Vector2::new(p0.x.min(p1.x), p0.y.min(p1.y));
        let max = Vector2::new(p0.x.max(p1.x), p0.y.max(p1.y));
        (min, max)
    }
}

/// Strict AABB overlap; boxes that only share an edge do not overlap.
pub fn aabb_overlap(min_a: Vector2, max_a: Vector2, min_b: Vector2, max_b: Vector2) -> bool {
    min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_shifts_the_box() {
        let c = BoxCollider::new(10.0, 20.0).with_offset(Vector2::new(2.0, 3.0));
        let (min, max) = c.aabb(Vector2::new(100.0, 100.0));
        assert_eq!((min.x, min.y), (102.0, 103.0));
        assert_eq!((max.x, max.y), (112.0, 123.0));
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let c = BoxCollider::new(10.0, 10.0);
        let (min_a, max_a) = c.aabb(Vector2::new(0.0, 0.0));
        let (min_b, max_b) = c.aabb(Vector2::new(10.0, 0.0));
        assert!(!aabb_overlap(min_a, max_a, min_b, max_b));
        let (min_c, max_c) = c.aabb(Vector2::new(9.5, 9.5));
        assert!(aabb_overlap(min_a, max_a, min_c, max_c));
    }
}
