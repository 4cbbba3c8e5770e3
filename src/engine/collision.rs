// Overlap detection between axis-aligned entity boxes
//
// Entities only react to collisions; finding the overlapping pairs happens
// here, outside the entity code.

use glam::Vec2;
use parry2d::bounding_volume::{Aabb, BoundingVolume};
use parry2d::na::Point2;

/// Axis-aligned box for an entity with its top-left corner at `position`
pub fn bounds(position: Vec2, size: Vec2) -> Aabb {
    Aabb::new(
        Point2::new(position.x, position.y),
        Point2::new(position.x + size.x, position.y + size.y),
    )
}

/// All pairs of overlapping boxes, reported once each as `(a, b)` with `a < b`
/// in slice order. Touching edges count as overlap.
pub fn overlapping_pairs<K: Copy>(boxes: &[(K, Aabb)]) -> Vec<(K, K)> {
    let mut pairs = Vec::new();

    for (i, (key_a, box_a)) in boxes.iter().enumerate() {
        for (key_b, box_b) in &boxes[i + 1..] {
            if box_a.intersects(box_b) {
                pairs.push((*key_a, *key_b));
            }
        }
    }

    pairs
}
