//! Debug rendering: the drawing capability controllers receive in `draw`.
//!
//! `DebugDraw` is the handle controllers draw through. `DebugLines` records
//! everything as a flat line list ready for upload (6 floats per vertex).

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Segments used when tessellating circles.
const CIRCLE_SEGMENTS: usize = 24;

/// RGBA color for debug geometry.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct DebugColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl DebugColor {
    pub const RED: Self = Self::rgb(1.0, 0.2, 0.2);
    pub const GREEN: Self = Self::rgb(0.3, 1.0, 0.3);
    pub const CYAN: Self = Self::rgb(0.3, 1.0, 1.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }
}

/// Drawing capability handed to `Controller::draw`.
///
/// Only `draw_segment` and `draw_point` are required; shapes default to
/// outlines built from segments.
pub trait DebugDraw {
    fn draw_segment(&mut self, a: Vec2, b: Vec2, color: DebugColor);

    fn draw_point(&mut self, p: Vec2, size: f32, color: DebugColor);

    /// Closed polygon outline. Two vertices draw a single segment.
    fn draw_polygon(&mut self, vertices: &[Vec2], color: DebugColor) {
        match vertices {
            [] | [_] => {}
            [a, b] => self.draw_segment(*a, *b, color),
            _ => {
                for (i, &a) in vertices.iter().enumerate() {
                    let b = vertices[(i + 1) % vertices.len()];
                    self.draw_segment(a, b, color);
                }
            }
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: DebugColor) {
        let outline = circle_outline(center, radius);
        self.draw_polygon(&outline, color);
    }
}

/// One line-list vertex: position + color.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct DebugVertex {
    pub x: f32,
    pub y: f32,
    pub color: DebugColor,
}

impl DebugVertex {
    pub const FLOATS: usize = 6;

    fn new(p: Vec2, color: DebugColor) -> Self {
        Self { x: p.x, y: p.y, color }
    }
}

/// Records debug geometry as a line list (two vertices per segment).
#[derive(Debug, Default)]
pub struct DebugLines {
    vertices: Vec<DebugVertex>,
}

impl DebugLines {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(1024),
        }
    }

    pub fn vertices(&self) -> &[DebugVertex] {
        &self.vertices
    }

    /// Raw vertex bytes for a GPU buffer write.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Drop everything recorded; call once per frame before drawing.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl DebugDraw for DebugLines {
    fn draw_segment(&mut self, a: Vec2, b: Vec2, color: DebugColor) {
        self.vertices.push(DebugVertex::new(a, color));
        self.vertices.push(DebugVertex::new(b, color));
    }

    // Cross of two segments.
    fn draw_point(&mut self, p: Vec2, size: f32, color: DebugColor) {
        let h = size * 0.5;
        self.draw_segment(p - Vec2::new(h, 0.0), p + Vec2::new(h, 0.0), color);
        self.draw_segment(p - Vec2::new(0.0, h), p + Vec2::new(0.0, h), color);
    }
}

/// Open loop of points around a circle (the polygon closes it).
fn circle_outline(center: Vec2, radius: f32) -> Vec<Vec2> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_vertex_is_6_floats() {
        assert_eq!(std::mem::size_of::<DebugVertex>(), DebugVertex::FLOATS * 4);
    }

    #[test]
    fn segment_records_two_vertices() {
        let mut lines = DebugLines::new();
        lines.draw_segment(Vec2::ZERO, Vec2::new(10.0, 0.0), DebugColor::RED);
        assert_eq!(lines.vertices().len(), 2);
        assert_eq!(lines.segment_count(), 1);
        assert_eq!(lines.vertices()[1].x, 10.0);
        assert_eq!(lines.as_bytes().len(), 2 * DebugVertex::FLOATS * 4);
    }

    #[test]
    fn polygon_is_closed() {
        let mut lines = DebugLines::new();
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        lines.draw_polygon(&square, DebugColor::WHITE);
        assert_eq!(lines.segment_count(), 4);
        let last = lines.vertices()[7];
        assert_eq!((last.x, last.y), (0.0, 0.0));
    }

    #[test]
    fn degenerate_polygon_draws_nothing() {
        let mut lines = DebugLines::new();
        lines.draw_polygon(&[Vec2::ONE], DebugColor::WHITE);
        assert_eq!(lines.segment_count(), 0);
    }

    #[test]
    fn two_point_polygon_is_one_segment() {
        let mut lines = DebugLines::new();
        lines.draw_polygon(&[Vec2::ZERO, Vec2::new(3.0, 4.0)], DebugColor::RED);
        assert_eq!(lines.segment_count(), 1);
        assert_eq!((lines.vertices()[1].x, lines.vertices()[1].y), (3.0, 4.0));
    }

    #[test]
    fn circle_points_lie_on_radius() {
        let mut lines = DebugLines::new();
        let center = Vec2::new(100.0, 200.0);
        lines.draw_circle(center, 20.0, DebugColor::CYAN);
        assert_eq!(lines.segment_count(), CIRCLE_SEGMENTS);
        for v in lines.vertices() {
            let d = Vec2::new(v.x, v.y).distance(center);
            assert!((d - 20.0).abs() < 0.01, "distance was {}", d);
        }
    }

    #[test]
    fn clear_empties_lines() {
        let mut lines = DebugLines::new();
        lines.draw_point(Vec2::ZERO, 2.0, DebugColor::GREEN.with_alpha(0.5));
        assert_eq!(lines.segment_count(), 2);
        assert_eq!(lines.vertices()[0].color.a, 0.5);
        lines.clear();
        assert!(lines.vertices().is_empty());
    }
}
