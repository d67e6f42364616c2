//! Collision and wrap-around geometry
//!
//! Everything here is a plain circle/point test in field coordinates.

use glam::Vec2;

/// Teleport a body that drifted more than `radius` past an edge to the opposite side.
///
/// Each axis is corrected independently, so a body leaving through a corner
/// reappears in the opposite corner.
pub fn wrap_position(pos: Vec2, radius: f32, field: Vec2) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, radius, field.x),
        wrap_axis(pos.y, radius, field.y),
    )
}

#[inline]
fn wrap_axis(mut v: f32, radius: f32, extent: f32) -> f32 {
    if v < -radius {
        v = extent + radius;
    }
    if v > extent + radius {
        v = -radius;
    }
    v
}

/// Point inside a circle (strict)
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}

/// Two circles overlap (strict, touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIELD: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_wrap_left_to_right() {
        let p = wrap_position(Vec2::new(-21.0, 300.0), 20.0, FIELD);
        assert_eq!(p, Vec2::new(820.0, 300.0));
    }

    #[test]
    fn test_wrap_right_to_left() {
        let p = wrap_position(Vec2::new(821.0, 300.0), 20.0, FIELD);
        assert_eq!(p, Vec2::new(-20.0, 300.0));
    }

    #[test]
    fn test_wrap_both_axes() {
        let p = wrap_position(Vec2::new(-30.0, 650.0), 20.0, FIELD);
        assert_eq!(p, Vec2::new(820.0, -20.0));
    }

    #[test]
    fn test_inside_margin_untouched() {
        let p = Vec2::new(-20.0, 620.0);
        assert_eq!(wrap_position(p, 20.0, FIELD), p);
    }

    #[test]
    fn test_point_in_circle_strict() {
        let c = Vec2::new(100.0, 100.0);
        assert!(point_in_circle(Vec2::new(119.0, 100.0), c, 20.0));
        assert!(!point_in_circle(Vec2::new(120.0, 100.0), c, 20.0));
    }

    #[test]
    fn test_circles_overlap_strict() {
        let a = Vec2::new(100.0, 100.0);
        assert!(circles_overlap(a, 20.0, Vec2::new(110.0, 100.0), 20.0));
        assert!(!circles_overlap(a, 20.0, Vec2::new(140.0, 100.0), 20.0));
    }

    proptest! {
        #[test]
        fn prop_wrap_lands_in_expanded_field(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            radius in 0.0f32..60.0,
        ) {
            let p = wrap_position(Vec2::new(x, y), radius, FIELD);
            prop_assert!(p.x >= -radius && p.x <= FIELD.x + radius);
            prop_assert!(p.y >= -radius && p.y <= FIELD.y + radius);
        }

        #[test]
        fn prop_wrap_is_idempotent(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            radius in 0.0f32..60.0,
        ) {
            let once = wrap_position(Vec2::new(x, y), radius, FIELD);
            let twice = wrap_position(once, radius, FIELD);
            prop_assert_eq!(once, twice);
        }
    }
}
