//! Ball-versus-boundary collision math
//!
//! The boundary is a circle the ball lives *inside*, so the contact normal
//! points outward from the center toward the ball.

use glam::Vec2;

/// Outward unit normal from `center` toward `pos`.
///
/// When the ball sits exactly on the center the direction is undefined;
/// `(1, 0)` is returned so the caller never divides by zero.
pub fn outward_normal(center: Vec2, pos: Vec2) -> Vec2 {
    let delta = pos - center;
    let dist = delta.length();
    if dist > 0.0 {
        delta / dist
    } else {
        Vec2::X
    }
}

/// Reflect velocity about a surface normal
#[inline]
pub fn reflect(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// True when the ball touches or penetrates the boundary from inside
#[inline]
pub fn hits_boundary(pos: Vec2, ball_radius: f32, center: Vec2, boundary_radius: f32) -> bool {
    (pos - center).length() + ball_radius >= boundary_radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_points_from_center_to_ball() {
        let n = outward_normal(Vec2::new(10.0, 10.0), Vec2::new(10.0, 30.0));
        assert!((n - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn normal_at_zero_distance_defaults_to_x() {
        let center = Vec2::new(5.0, 5.0);
        assert_eq!(outward_normal(center, center), Vec2::X);
    }

    #[test]
    fn reflect_head_on() {
        // Moving straight up into a downward-facing surface
        let v = reflect(Vec2::new(0.0, -3.0), Vec2::new(0.0, -1.0));
        assert!((v - Vec2::new(0.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn reflect_preserves_tangential_component() {
        let v = reflect(Vec2::new(4.0, -3.0), Vec2::new(0.0, -1.0));
        assert!((v - Vec2::new(4.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn boundary_hit_threshold() {
        let center = Vec2::ZERO;
        // dist 330 + radius 20 == 350: touching counts
        assert!(hits_boundary(Vec2::new(330.0, 0.0), 20.0, center, 350.0));
        assert!(!hits_boundary(Vec2::new(329.0, 0.0), 20.0, center, 350.0));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Elastic identity: reflection never changes speed
            #[test]
            fn reflection_preserves_magnitude(
                vx in -500.0f32..500.0,
                vy in -500.0f32..500.0,
                px in -400.0f32..400.0,
                py in -400.0f32..400.0,
            ) {
                let v = Vec2::new(vx, vy);
                let n = outward_normal(Vec2::ZERO, Vec2::new(px, py));
                let reflected = reflect(v, n);
                let tolerance = v.length() * 1e-4 + 1e-3;
                prop_assert!((reflected.length() - v.length()).abs() <= tolerance);
            }

            /// Reflecting twice about the same normal is the identity
            #[test]
            fn reflection_is_involutive(
                vx in -500.0f32..500.0,
                vy in -500.0f32..500.0,
                px in -400.0f32..400.0,
                py in -400.0f32..400.0,
            ) {
                let v = Vec2::new(vx, vy);
                let n = outward_normal(Vec2::ZERO, Vec2::new(px, py));
                let twice = reflect(reflect(v, n), n);
                let tolerance = v.length() * 1e-4 + 1e-3;
                prop_assert!((twice - v).length() <= tolerance);
            }

            /// The normal is always unit length, even near the center
            #[test]
            fn normal_is_unit(px in -400.0f32..400.0, py in -400.0f32..400.0) {
                let n = outward_normal(Vec2::ZERO, Vec2::new(px, py));
                prop_assert!((n.length() - 1.0).abs() < 1e-4);
            }
        }
    }
}
