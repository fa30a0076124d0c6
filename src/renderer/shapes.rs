//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in canvas pixels.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::Rgba;
use crate::texture::Texture;

/// Edge of the sub-quads used to rasterize textured fills
pub const TEXEL_PX: f32 = 2.0;

/// Segments used for circles and ellipses
pub const ROUND_SEGMENTS: u32 = 24;

fn push_quad(vertices: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: Rgba) {
    vertices.push(Vertex::new(min.x, min.y, color));
    vertices.push(Vertex::new(max.x, min.y, color));
    vertices.push(Vertex::new(min.x, max.y, color));

    vertices.push(Vertex::new(min.x, max.y, color));
    vertices.push(Vertex::new(max.x, min.y, color));
    vertices.push(Vertex::new(max.x, max.y, color));
}

/// Solid axis-aligned rectangle from its top-left corner
pub fn rect(min: Vec2, size: Vec2, color: Rgba) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, min, min + size, color);
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), 0.0, color, segments)
}

/// Filled ellipse rotated by `rotation` radians around its center
pub fn ellipse(center: Vec2, radii: Vec2, rotation: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let rot = Vec2::from_angle(rotation);
    let point = |theta: f32| center + rot.rotate(Vec2::new(radii.x * theta.cos(), radii.y * theta.sin()));

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let p1 = point(theta1);
        let p2 = point(theta2);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Split a rectangle into texel-sized cells, calling `f` with each cell's
/// bounds and center
fn for_each_texel(min: Vec2, size: Vec2, mut f: impl FnMut(Vec2, Vec2, Vec2)) {
    let cols = (size.x / TEXEL_PX).ceil().max(1.0) as u32;
    let rows = (size.y / TEXEL_PX).ceil().max(1.0) as u32;
    let step = size / Vec2::new(cols as f32, rows as f32);
    for row in 0..rows {
        for col in 0..cols {
            let lo = min + step * Vec2::new(col as f32, row as f32);
            let hi = lo + step;
            f(lo, hi, (lo + hi) * 0.5);
        }
    }
}

/// Rectangle filled with a repeating texture.
///
/// `origin` is the canvas point where the texture's top-left pixel lands.
pub fn patterned_rect(min: Vec2, size: Vec2, texture: &Texture, origin: Vec2) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for_each_texel(min, size, |lo, hi, center| {
        let p = center - origin;
        let color = texture.sample_repeat(p.x, p.y);
        if color[3] > 0.0 {
            push_quad(&mut vertices, lo, hi, color);
        }
    });
    vertices
}

/// Circle filled with a repeating texture anchored at `origin`
pub fn patterned_circle(center: Vec2, radius: f32, texture: &Texture, origin: Vec2) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let min = center - Vec2::splat(radius);
    for_each_texel(min, Vec2::splat(radius * 2.0), |lo, hi, c| {
        if c.distance_squared(center) > radius * radius {
            return;
        }
        let p = c - origin;
        let color = texture.sample_repeat(p.x, p.y);
        if color[3] > 0.0 {
            push_quad(&mut vertices, lo, hi, color);
        }
    });
    vertices
}

/// Draw a whole texture stretched over a rectangle (image drawing)
pub fn image_rect(min: Vec2, size: Vec2, texture: &Texture) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for_each_texel(min, size, |lo, hi, center| {
        let uv = (center - min) / size;
        let color = texture.sample_stretched(uv.x, uv.y);
        if color[3] > 0.0 {
            push_quad(&mut vertices, lo, hi, color);
        }
    });
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{Layer, PatternRecipe, build_pattern};

    const RED: Rgba = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_rect_is_two_triangles() {
        let v = rect(Vec2::new(2.0, 3.0), Vec2::new(10.0, 5.0), RED);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [2.0, 3.0]);
        assert_eq!(v[5].position, [12.0, 8.0]);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(50.0, 50.0);
        let v = circle(center, 10.0, RED, ROUND_SEGMENTS);
        assert_eq!(v.len(), (ROUND_SEGMENTS * 3) as usize);
        for vertex in v {
            let p = Vec2::from(vertex.position);
            assert!(p.distance(center) <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_rotated_ellipse_extent() {
        let v = ellipse(Vec2::ZERO, Vec2::new(10.0, 2.0), PI / 2.0, RED, 4);
        // Rotated a quarter turn, the long axis is vertical
        let max_y = v.iter().map(|v| v.position[1].abs()).fold(0.0, f32::max);
        let max_x = v.iter().map(|v| v.position[0].abs()).fold(0.0, f32::max);
        assert!((max_y - 10.0).abs() < 1e-4);
        assert!(max_x <= 2.0 + 1e-4);
    }

    #[test]
    fn test_patterned_rect_samples_texture() {
        let tex = build_pattern(&PatternRecipe {
            size: 4,
            layers: vec![Layer::Fill(RED)],
        });
        let v = patterned_rect(Vec2::ZERO, Vec2::new(8.0, 8.0), &tex, Vec2::ZERO);
        assert_eq!(v.len(), 16 * 6);
        assert!(v.iter().all(|v| v.color == RED));
    }

    #[test]
    fn test_transparent_texels_skipped() {
        let tex = Texture::transparent(4, 4);
        assert!(image_rect(Vec2::ZERO, Vec2::new(8.0, 8.0), &tex).is_empty());
        assert!(patterned_circle(Vec2::splat(5.0), 4.0, &tex, Vec2::ZERO).is_empty());
    }
}
