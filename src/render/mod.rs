//! Drawing-sink boundary
//!
//! The sim never touches a real canvas. `render_frame` describes one
//! frame as calls against `DrawSurface`; the host owns the actual
//! surface (Canvas2D in the browser) and interprets the calls.

use glam::Vec2;

use crate::sim::{EnemyKind, GameState};

/// Low-opacity fill used to fade the previous frame (motion trails)
pub const TRAIL_FADE: &str = "rgba(12, 10, 24, 0.2)";
/// Projectile fill color
pub const PROJECTILE_COLOR: &str = "#ffeb3b";
/// Player sprite glyph
pub const PLAYER_GLYPH: &str = "🚀";

/// Opaque drawing sink the host implements
pub trait DrawSurface {
    /// Overwrite the whole viewport with the low-opacity fade fill
    fn fade(&mut self);
    /// Filled circle at `center`
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32);
    /// Centered text glyph at `center`
    fn glyph(&mut self, center: Vec2, text: &str);
}

/// Emit one frame. The fade lands before any entity draw (that timing
/// produces the trail effect); draw order fixes the stacking - player,
/// then debris, shots, enemies.
pub fn render_frame(state: &GameState, surface: &mut dyn DrawSurface) {
    surface.fade();

    if let Some(player) = &state.player {
        // Glyph baseline sits near the bottom of the bounding box
        surface.glyph(
            Vec2::new(
                player.pos.x + player.width / 2.0,
                player.pos.y + player.height - 5.0,
            ),
            PLAYER_GLYPH,
        );
    }

    for particle in &state.particles {
        surface.fill_circle(particle.pos, particle.radius, particle.color, particle.alpha);
    }

    for projectile in &state.projectiles {
        surface.fill_circle(projectile.pos, projectile.radius, PROJECTILE_COLOR, 1.0);
    }

    for enemy in &state.enemies {
        surface.glyph(enemy.pos, enemy_glyph(enemy.kind));
    }
}

/// Sprite for each enemy variant
pub fn enemy_glyph(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Invader => "👾",
        EnemyKind::Alien => "👽",
        EnemyKind::Saucer => "🛸",
    }
}
