//! Shape tessellation for 2D primitives
//!
//! Everything is flattened into triangles for a single TriangleList draw.
//! Coordinates are canvas pixels; the pipeline maps them to NDC.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    let segments = segments.max(3);
    for i in 0..segments {
        let t1 = i as f32 / segments as f32 * TAU;
        let t2 = (i + 1) as f32 / segments as f32 * TAU;
        out.push(Vertex::at(center, color));
        out.push(Vertex::at(center + Vec2::new(t1.cos(), t1.sin()) * radius, color));
        out.push(Vertex::at(center + Vec2::new(t2.cos(), t2.sin()) * radius, color));
    }
}

/// Hollow ring between two radii
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(3);
    for i in 0..segments {
        let t1 = i as f32 / segments as f32 * TAU;
        let t2 = (i + 1) as f32 / segments as f32 * TAU;
        let d1 = Vec2::new(t1.cos(), t1.sin());
        let d2 = Vec2::new(t2.cos(), t2.sin());

        let i1 = center + d1 * inner_radius;
        let o1 = center + d1 * outer_radius;
        let i2 = center + d2 * inner_radius;
        let o2 = center + d2 * outer_radius;

        out.push(Vertex::at(i1, color));
        out.push(Vertex::at(o1, color));
        out.push(Vertex::at(i2, color));

        out.push(Vertex::at(i2, color));
        out.push(Vertex::at(o1, color));
        out.push(Vertex::at(o2, color));
    }
}

/// Thick line segment as a quad
pub fn thick_segment(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    out.push(Vertex::at(a1, color));
    out.push(Vertex::at(a2, color));
    out.push(Vertex::at(b1, color));

    out.push(Vertex::at(b1, color));
    out.push(Vertex::at(a2, color));
    out.push(Vertex::at(b2, color));
}

/// Rotated rectangle centered on `center` (used for spoke fragments)
pub fn oriented_quad(
    out: &mut Vec<Vertex>,
    center: Vec2,
    half_extents: Vec2,
    rotation: f32,
    color: [f32; 4],
) {
    let (sin, cos) = rotation.sin_cos();
    let rot = |p: Vec2| Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos);

    let c1 = center + rot(Vec2::new(-half_extents.x, -half_extents.y));
    let c2 = center + rot(Vec2::new(half_extents.x, -half_extents.y));
    let c3 = center + rot(Vec2::new(half_extents.x, half_extents.y));
    let c4 = center + rot(Vec2::new(-half_extents.x, half_extents.y));

    out.push(Vertex::at(c1, color));
    out.push(Vertex::at(c2, color));
    out.push(Vertex::at(c3, color));

    out.push(Vertex::at(c1, color));
    out.push(Vertex::at(c3, color));
    out.push(Vertex::at(c4, color));
}

/// Quadratic bezier stroked as a chain of thick segments
pub fn bezier_strip(
    out: &mut Vec<Vertex>,
    a: Vec2,
    control: Vec2,
    b: Vec2,
    width: f32,
    color: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(1);
    let point = |t: f32| {
        let u = 1.0 - t;
        a * (u * u) + control * (2.0 * u * t) + b * (t * t)
    };
    let mut prev = a;
    for i in 1..=segments {
        let next = point(i as f32 / segments as f32);
        thick_segment(out, prev, next, width, color);
        prev = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    #[test]
    fn circle_emits_three_vertices_per_segment() {
        let mut out = Vec::new();
        circle(&mut out, Vec2::ZERO, 10.0, WHITE, 24);
        assert_eq!(out.len(), 24 * 3);
    }

    #[test]
    fn ring_emits_six_vertices_per_segment() {
        let mut out = Vec::new();
        ring(&mut out, Vec2::ZERO, 5.0, 10.0, WHITE, 16);
        assert_eq!(out.len(), 16 * 6);
    }

    #[test]
    fn bezier_strip_chains_segments() {
        let mut out = Vec::new();
        bezier_strip(
            &mut out,
            Vec2::ZERO,
            Vec2::new(50.0, 80.0),
            Vec2::new(100.0, 0.0),
            2.0,
            WHITE,
            12,
        );
        assert_eq!(out.len(), 12 * 6);
    }

    #[test]
    fn oriented_quad_spans_its_extents() {
        let mut out = Vec::new();
        oriented_quad(&mut out, Vec2::new(10.0, 10.0), Vec2::new(4.0, 1.0), 0.0, WHITE);
        assert_eq!(out.len(), 6);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let min = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!((min - 6.0).abs() < 1e-4);
        assert!((max - 14.0).abs() < 1e-4);
    }
}
