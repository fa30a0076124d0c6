//! Snake board scene

use glam::{IVec2, Vec2};

use super::shapes::{ROUND_SEGMENTS, circle, ellipse, image_rect, patterned_circle, patterned_rect, rect};
use super::vertex::{Vertex, colors};
use crate::consts::TILE_COUNT;
use crate::snake::GameState;
use crate::texture::{SnakeArt, Texture};

/// Tile edge in pixels for a square canvas
pub fn tile_px(canvas_px: u32) -> f32 {
    (canvas_px as f32 / TILE_COUNT as f32).floor()
}

fn tile_origin(cell: IVec2, size: f32) -> Vec2 {
    cell.as_vec2() * size
}

/// Build the whole board. `food_image` is the decoded apple, if ready.
pub fn build_snake_scene(
    state: &GameState,
    art: &SnakeArt,
    food_image: Option<&Texture>,
    canvas_px: u32,
) -> Vec<Vertex> {
    let size = tile_px(canvas_px);
    let mut vertices = Vec::new();

    // Checkerboard over the background clear color
    for y in 0..TILE_COUNT {
        for x in 0..TILE_COUNT {
            if (x + y) % 2 == 0 {
                let min = tile_origin(IVec2::new(x, y), size);
                vertices.extend(rect(min, Vec2::splat(size), colors::CHECKER));
            }
        }
    }

    for &food in &state.food {
        let origin = tile_origin(food, size);
        match food_image {
            Some(image) => vertices.extend(image_rect(origin, Vec2::splat(size), image)),
            None => vertices.extend(fallback_food(origin, size, &art.apple)),
        }
    }

    for (i, &segment) in state.snake.iter().enumerate() {
        let origin = tile_origin(segment, size);
        let texture = if i == 0 { &art.head } else { &art.body };
        vertices.extend(patterned_rect(
            origin + Vec2::ONE,
            Vec2::splat(size - 2.0),
            texture,
            origin,
        ));
        if i == 0 {
            vertices.extend(eye(origin, size));
        }
    }

    if state.is_game_over() {
        let full = canvas_px as f32;
        vertices.extend(rect(Vec2::ZERO, Vec2::splat(full), colors::GAME_OVER_SHADE));
    }

    vertices
}

/// Patterned disc with a small glossy highlight. The apple pattern repeats
/// from the canvas origin.
fn fallback_food(origin: Vec2, size: f32, apple: &Texture) -> Vec<Vertex> {
    let half = (size / 2.0).round();
    let radius = (half - 2.0).max(4.0);
    let center = origin + Vec2::splat(half);
    let mut vertices = circle(center, radius, colors::FOOD_FALLBACK, ROUND_SEGMENTS);
    vertices.extend(patterned_circle(center, radius, apple, Vec2::ZERO));

    let third = (radius / 3.0).round().max(1.0);
    let fifth = (radius / 5.0).round().max(1.0);
    vertices.extend(ellipse(
        center - Vec2::splat(third),
        Vec2::new(third, fifth),
        -0.6,
        colors::FOOD_HIGHLIGHT,
        ROUND_SEGMENTS,
    ));
    vertices
}

fn eye(origin: Vec2, size: f32) -> Vec<Vertex> {
    let center = origin + Vec2::new((size * 0.65).round(), (size * 0.35).round());
    let radius = (size * 0.08).round().max(1.0);
    circle(center, radius, colors::SNAKE_EYE, 12)
}
