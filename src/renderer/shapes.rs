//! Shape generation for 2D primitives
//!
//! Everything is tessellated on the CPU into a single triangle list and
//! drawn in one alpha-blended pass, so emit order is paint order.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::consts::TRAIL_SCALE;
use crate::sim::TrailPoint;

/// Segment counts; trail discs are small and plentiful, so they get fewer
const CIRCLE_SEGMENTS: u32 = 48;
const TRAIL_SEGMENTS: u32 = 16;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + inner_radius * Vec2::new(theta1.cos(), theta1.sin());
        let outer1 = center + outer_radius * Vec2::new(theta1.cos(), theta1.sin());
        let inner2 = center + inner_radius * Vec2::new(theta2.cos(), theta2.sin());
        let outer2 = center + outer_radius * Vec2::new(theta2.cos(), theta2.sin());

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Filled circle at standard resolution
pub fn disc(center: Vec2, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    circle(center, radius, color, CIRCLE_SEGMENTS)
}

/// Outline ring of the given width, drawn just inside `radius`
pub fn outline(center: Vec2, radius: f32, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    ring(center, (radius - width).max(0.0), radius, color, CIRCLE_SEGMENTS)
}

/// Quadratic recency fade for visible trail discs: oldest fully
/// transparent, newest fully opaque.
pub fn trail_alpha(index: usize, visible: usize) -> f32 {
    if visible <= 1 {
        return 1.0;
    }
    let t = index as f32 / (visible - 1) as f32;
    t * t
}

/// Tessellate the currently visible part of the trail.
///
/// Storage is untouched: points that have fallen outside the shrunken
/// boundary are skipped here, not removed. The alpha ramp is computed over
/// the *visible* points only, so the fade always spans the full range.
pub fn trail(
    points: &[TrailPoint],
    boundary_center: Vec2,
    boundary_radius: f32,
    camera: Vec2,
    ball_radius: f32,
) -> Vec<Vertex> {
    let visible: Vec<&TrailPoint> = points
        .iter()
        .filter(|p| (p.pos - boundary_center).length() <= boundary_radius)
        .collect();

    let disc_radius = ball_radius * TRAIL_SCALE;
    let mut vertices = Vec::with_capacity(visible.len() * (TRAIL_SEGMENTS * 3) as usize);

    for (i, point) in visible.iter().enumerate() {
        let alpha = trail_alpha(i, visible.len());
        let color = [point.color[0], point.color[1], point.color[2], alpha];
        vertices.extend(circle(
            point.pos - camera,
            disc_radius,
            color,
            TRAIL_SEGMENTS,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 10.0, [1.0; 4], 12).len(), 36);
    }

    #[test]
    fn ring_vertex_count() {
        assert_eq!(ring(Vec2::ZERO, 8.0, 10.0, [1.0; 4], 12).len(), 72);
    }

    #[test]
    fn trail_alpha_is_monotonic_and_quadratic() {
        let n = 20;
        let mut last = -1.0f32;
        for i in 0..n {
            let a = trail_alpha(i, n);
            assert!(a >= last, "alpha must not decrease with recency");
            last = a;
        }
        assert_eq!(trail_alpha(0, n), 0.0);
        assert_eq!(trail_alpha(n - 1, n), 1.0);
        // Quadratic law: the midpoint sits at (1/2)^2
        let mid = trail_alpha((n - 1) / 2, n);
        let t = ((n - 1) / 2) as f32 / (n - 1) as f32;
        assert!((mid - t * t).abs() < 1e-6);
    }

    #[test]
    fn trail_alpha_single_point_is_opaque() {
        assert_eq!(trail_alpha(0, 1), 1.0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Alpha stays in range, never decreases with recency, and the
            /// newest visible point is always fully opaque
            #[test]
            fn alpha_law_holds_for_any_length(n in 1usize..400) {
                let mut last = 0.0f32;
                for i in 0..n {
                    let a = trail_alpha(i, n);
                    prop_assert!((0.0..=1.0).contains(&a));
                    prop_assert!(a >= last);
                    last = a;
                }
                prop_assert_eq!(trail_alpha(n - 1, n), 1.0);
            }
        }
    }

    #[test]
    fn trail_filters_points_outside_boundary() {
        let center = Vec2::new(100.0, 100.0);
        let points = vec![
            TrailPoint {
                pos: center + Vec2::new(5.0, 0.0),
                color: [1.0, 0.0, 0.0],
            },
            TrailPoint {
                pos: center + Vec2::new(500.0, 0.0),
                color: [0.0, 1.0, 0.0],
            },
        ];

        let verts = trail(&points, center, 50.0, Vec2::ZERO, 20.0);
        // Only the inside point got tessellated
        assert_eq!(verts.len(), (TRAIL_SEGMENTS * 3) as usize);
        // And it is fully opaque, being the only visible point
        assert_eq!(verts[0].color[3], 1.0);
    }
}
