//! Tron arena scene and end-of-round explosion frames

use glam::Vec2;

use super::shapes::{circle, rect};
use super::vertex::Vertex;
use crate::consts::{TRON_CANVAS_MARGIN, TRON_GRID};
use crate::tron::{CellPhase, Explosion, ExplosionFrame, TronState};
use crate::with_alpha;

const PARTICLE_SEGMENTS: u32 = 12;

/// Canvas edge for a viewport: the smaller side minus a margin
pub fn canvas_px(viewport_w: u32, viewport_h: u32) -> u32 {
    viewport_w.min(viewport_h).saturating_sub(TRON_CANVAS_MARGIN).max(TRON_GRID as u32)
}

/// Cell edge in pixels for a canvas edge
pub fn cell_px(canvas_px: u32) -> f32 {
    canvas_px as f32 / TRON_GRID as f32
}

/// Trails and vehicles for a running round
pub fn build_tron_scene(state: &TronState, now_ms: f64, cell_px: f32) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let cell_size = Vec2::splat(cell_px);

    for (cell, trail, phase) in state.grid.occupied(now_ms) {
        let color = match phase {
            CellPhase::Solid => trail.color,
            CellPhase::Fading { opacity } => with_alpha(trail.color, opacity),
            CellPhase::Empty | CellPhase::Expired => continue,
        };
        vertices.extend(rect(cell.as_vec2() * cell_px, cell_size, color));
    }

    // Vehicles overhang their cell by a pixel on each side
    for player in state.players.iter().filter(|p| p.alive) {
        let min = (player.pos * cell_px).floor() - Vec2::ONE;
        vertices.extend(rect(min, cell_size + Vec2::splat(2.0), player.vehicle_color));
    }

    vertices
}

/// Snapshot trail fading out plus the particle burst
pub fn build_explosion_frame(explosion: &Explosion, frame: &ExplosionFrame, cell_px: f32) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let cell_size = Vec2::splat(cell_px);

    if frame.trail_opacity > 0.0 {
        for fading in &explosion.cells {
            let alpha = fading.base_opacity * frame.trail_opacity;
            vertices.extend(rect(
                fading.cell.as_vec2() * cell_px,
                cell_size,
                with_alpha(fading.color, alpha),
            ));
        }
    }

    let half_cell = Vec2::splat(cell_px * 0.5);
    for particle in &explosion.particles {
        let center = particle.pos * cell_px + half_cell;
        let color = with_alpha(explosion.color, particle.life.clamp(0.0, 1.0));
        vertices.extend(circle(center, particle.radius, color, PARTICLE_SEGMENTS));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::rgb;
    use crate::settings::TronSettings;
    use crate::tron::FadingCell;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_canvas_follows_smaller_viewport_side() {
        assert_eq!(canvas_px(1280, 720), 680);
        assert_eq!(canvas_px(500, 900), 460);
        assert_eq!(cell_px(500), 5.0);
    }

    #[test]
    fn test_fresh_round_draws_only_vehicles() {
        let state = TronState::new(1, TronSettings::default());
        let v = build_tron_scene(&state, 0.0, 5.0);
        assert_eq!(v.len(), 2 * 6);
        // Red starts at (2, 50): 10px, minus the overhang
        assert_eq!(v[0].position, [9.0, 249.0]);
        assert_eq!(v[5].position, [16.0, 256.0]);
        assert_eq!(v[0].color, state.players[0].vehicle_color);
    }

    #[test]
    fn test_fading_cell_uses_opacity() {
        let mut state = TronState::new(1, TronSettings::default());
        state.grid.mark(IVec2::new(10, 10), 0.0, RED);
        state.grid.mark(IVec2::new(11, 10), 4000.0, RED);

        // 5500 ms: first cell halfway through its fade, second still solid
        let v = build_tron_scene(&state, 5500.0, 5.0);
        let alphas: Vec<f32> = v.iter().step_by(6).map(|v| v.color[3]).collect();
        assert_eq!(alphas.len(), 4);
        assert!((alphas[0] - 0.5).abs() < 1e-4);
        assert_eq!(alphas[1], 1.0);
    }

    #[test]
    fn test_dead_player_not_drawn() {
        let mut state = TronState::new(1, TronSettings::default());
        state.players[1].alive = false;
        let v = build_tron_scene(&state, 0.0, 5.0);
        assert_eq!(v.len(), 6);
    }

    #[test]
    fn test_explosion_frame_fades_snapshot() {
        let mut rng = Pcg32::seed_from_u64(9);
        let cells = vec![FadingCell {
            cell: IVec2::new(3, 4),
            color: rgb(0x0000ff),
            base_opacity: 0.5,
        }];
        let mut explosion = Explosion::new(Vec2::new(20.0, 20.0), RED, 4, cells, 1000.0, &mut rng);
        explosion.advance(100.0);
        let frame = explosion.advance(600.0);

        let v = build_explosion_frame(&explosion, &frame, 5.0);
        assert_eq!(v.len(), 6 + 4 * (PARTICLE_SEGMENTS * 3) as usize);
        assert!((v[0].color[3] - 0.25).abs() < 1e-4);
        assert_eq!(v[0].position, [15.0, 20.0]);
    }

    #[test]
    fn test_finished_frame_drops_trail() {
        let mut rng = Pcg32::seed_from_u64(9);
        let cells = vec![FadingCell {
            cell: IVec2::new(3, 4),
            color: RED,
            base_opacity: 1.0,
        }];
        let mut explosion = Explosion::new(Vec2::ZERO, RED, 0, cells, 1000.0, &mut rng);
        explosion.advance(0.0);
        let frame = explosion.advance(1000.0);
        assert!(frame.finished);
        assert!(build_explosion_frame(&explosion, &frame, 5.0).is_empty());
    }
}
