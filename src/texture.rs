//! Procedural textures
//!
//! Textures are plain RGBA buffers built once at startup from a declarative
//! [`PatternRecipe`]. Rendering samples them, it never generates them.

use glam::Vec2;

use crate::{Rgba, rgb, rgba};

/// One drawing step of a pattern, composited over the previous ones
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// Flood the whole texture
    Fill(Rgba),
    /// Parallel lines running down-right at 45°, `spacing` px apart
    DiagonalStripes {
        color: Rgba,
        spacing: f32,
        line_width: f32,
    },
    /// Rotated ellipse (rotation in radians)
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        color: Rgba,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    /// Axis-aligned rectangle from its top-left corner
    Rect { min: Vec2, size: Vec2, color: Rgba },
}

impl Layer {
    /// Coverage of the pixel centered at `p`
    fn covers(&self, p: Vec2) -> bool {
        match *self {
            Layer::Fill(_) => true,
            Layer::DiagonalStripes {
                spacing,
                line_width,
                ..
            } => {
                let diff = p.x - p.y;
                let nearest = (diff / spacing).round() * spacing;
                (diff - nearest).abs() / std::f32::consts::SQRT_2 <= line_width / 2.0
            }
            Layer::Ellipse {
                center,
                radii,
                rotation,
                ..
            } => {
                let d = Vec2::from_angle(-rotation).rotate(p - center);
                (d.x / radii.x).powi(2) + (d.y / radii.y).powi(2) <= 1.0
            }
            Layer::Circle { center, radius, .. } => p.distance_squared(center) <= radius * radius,
            Layer::Rect { min, size, .. } => {
                p.x >= min.x && p.y >= min.y && p.x < min.x + size.x && p.y < min.y + size.y
            }
        }
    }

    fn color(&self) -> Rgba {
        match *self {
            Layer::Fill(color)
            | Layer::DiagonalStripes { color, .. }
            | Layer::Ellipse { color, .. }
            | Layer::Circle { color, .. }
            | Layer::Rect { color, .. } => color,
        }
    }
}

/// Square pattern description
#[derive(Debug, Clone, PartialEq)]
pub struct PatternRecipe {
    pub size: u32,
    pub layers: Vec<Layer>,
}

/// RGBA pixel buffer, row-major, top row first
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgba>,
}

impl Texture {
    /// Fully transparent texture
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; (width * height) as usize],
        }
    }

    /// Build from 8-bit RGBA bytes (as returned by a 2D canvas)
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if width == 0 || height == 0 || bytes.len() != (width * height * 4) as usize {
            return None;
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| {
                [
                    c[0] as f32 / 255.0,
                    c[1] as f32 / 255.0,
                    c[2] as f32 / 255.0,
                    c[3] as f32 / 255.0,
                ]
            })
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Sample with the texture repeating in both directions (pixel units)
    pub fn sample_repeat(&self, x: f32, y: f32) -> Rgba {
        let ix = (x.floor() as i64).rem_euclid(self.width as i64) as u32;
        let iy = (y.floor() as i64).rem_euclid(self.height as i64) as u32;
        self.pixel(ix, iy)
    }

    /// Sample with normalized coordinates stretched over the whole texture
    pub fn sample_stretched(&self, u: f32, v: f32) -> Rgba {
        let ix = ((u * self.width as f32) as i64).clamp(0, self.width as i64 - 1) as u32;
        let iy = ((v * self.height as f32) as i64).clamp(0, self.height as i64 - 1) as u32;
        self.pixel(ix, iy)
    }
}

/// Source-over compositing
fn blend_over(dst: Rgba, src: Rgba) -> Rgba {
    let sa = src[3];
    let da = dst[3] * (1.0 - sa);
    let out_a = sa + da;
    if out_a <= f32::EPSILON {
        return [0.0; 4];
    }
    [
        (src[0] * sa + dst[0] * da) / out_a,
        (src[1] * sa + dst[1] * da) / out_a,
        (src[2] * sa + dst[2] * da) / out_a,
        out_a,
    ]
}

/// Rasterize a pattern description into a texture
pub fn build_pattern(recipe: &PatternRecipe) -> Texture {
    let mut texture = Texture::transparent(recipe.size, recipe.size);
    for y in 0..recipe.size {
        for x in 0..recipe.size {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let idx = (y * recipe.size + x) as usize;
            for layer in &recipe.layers {
                if layer.covers(p) {
                    texture.pixels[idx] = blend_over(texture.pixels[idx], layer.color());
                }
            }
        }
    }
    texture
}

/// Edge of the snake pattern tiles
pub const PATTERN_SIZE: u32 = 64;

pub fn snake_body_pattern() -> PatternRecipe {
    PatternRecipe {
        size: PATTERN_SIZE,
        layers: vec![
            Layer::Fill(rgb(0x66bb6a)),
            Layer::DiagonalStripes {
                color: rgba(0x28461e, 0.32),
                spacing: 12.0,
                line_width: 6.0,
            },
        ],
    }
}

pub fn snake_head_pattern() -> PatternRecipe {
    PatternRecipe {
        size: PATTERN_SIZE,
        layers: vec![
            Layer::Fill(rgb(0x76ff03)),
            Layer::Ellipse {
                center: Vec2::new(20.0, 16.0),
                radii: Vec2::new(14.0, 8.0),
                rotation: -0.4,
                color: rgba(0xffffff, 0.22),
            },
        ],
    }
}

pub fn apple_pattern() -> PatternRecipe {
    PatternRecipe {
        size: PATTERN_SIZE,
        layers: vec![
            Layer::Circle {
                center: Vec2::new(32.0, 32.0),
                radius: 20.0,
                color: rgb(0xe53935),
            },
            Layer::Ellipse {
                center: Vec2::new(40.0, 22.0),
                radii: Vec2::new(8.0, 6.0),
                rotation: -0.5,
                color: rgba(0xffffff, 0.7),
            },
            Layer::Rect {
                min: Vec2::new(30.0, 12.0),
                size: Vec2::new(6.0, 8.0),
                color: rgb(0x4e342e),
            },
        ],
    }
}

/// Snake textures, built once and shared by every frame
#[derive(Debug, Clone)]
pub struct SnakeArt {
    pub body: Texture,
    pub head: Texture,
    /// Fill for the procedural food fallback
    pub apple: Texture,
}

impl SnakeArt {
    pub fn build() -> Self {
        log::debug!("Building snake textures");
        Self {
            body: build_pattern(&snake_body_pattern()),
            head: build_pattern(&snake_head_pattern()),
            apple: build_pattern(&apple_pattern()),
        }
    }
}
