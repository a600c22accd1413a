//! Spatial query helpers
//!
//! The boss core only ever asks two geometric questions: "what is the distance
//! and direction to a point" and "is a point within radius R of a center".
//! Both operate on plain positions pulled out of ECS queries; no physics
//! engine is involved.

use bevy::prelude::*;

/// Distance and unit direction from `from` to `to`.
///
/// Coincident points report zero distance and a zero direction rather than a
/// NaN vector.
pub fn distance_and_direction(from: Vec2, to: Vec2) -> (f32, Vec2) {
    let delta = to - from;
    let distance = delta.length();
    if distance <= f32::EPSILON {
        (0.0, Vec2::ZERO)
    } else {
        (distance, delta / distance)
    }
}

/// Radial overlap test against a circle centered at `center`.
pub fn within_radius(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance_squared(point) <= radius * radius
}

/// 2D position of an entity's transform.
pub fn position_of(transform: &Transform) -> Vec2 {
    transform.translation.truncate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_unit_length() {
        let (distance, direction) = distance_and_direction(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((distance - 5.0).abs() < 1e-5);
        assert!((direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn coincident_points_do_not_produce_nan() {
        let (distance, direction) = distance_and_direction(Vec2::ONE, Vec2::ONE);
        assert_eq!(distance, 0.0);
        assert_eq!(direction, Vec2::ZERO);
    }

    #[test]
    fn radius_test_is_inclusive() {
        assert!(within_radius(Vec2::ZERO, 4.0, Vec2::new(4.0, 0.0)));
        assert!(!within_radius(Vec2::ZERO, 4.0, Vec2::new(4.01, 0.0)));
    }
}
