//! Per-frame simulation advance
//!
//! One `tick` = one display frame. Ordering inside a tick is part of the
//! contract: player motion first, then particle and projectile pruning,
//! then enemy motion, then collision resolution.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::state::{Enemy, EnemyKind, GamePhase, GameState};
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move-left held
    pub move_left: bool,
    /// Move-right held
    pub move_right: bool,
    /// Horizontal touch/pointer position while a drag is active
    pub pointer_x: Option<f32>,
}

/// Advance the game by one frame. A tick that lands after the game has
/// ended (a frame already in flight when the resolver fired) does nothing.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.time_ticks += 1;

    let viewport = state.viewport;
    if let Some(player) = state.player.as_mut() {
        if input.move_left && player.pos.x > 0.0 {
            player.pos.x -= player.speed;
        }
        if input.move_right && player.pos.x < viewport.width - player.width {
            player.pos.x += player.speed;
        }
        if let Some(px) = input.pointer_x {
            player.pos.x = (px - player.width / 2.0).clamp(0.0, viewport.width - player.width);
        }
    }

    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.alpha -= state.tuning.particle_fade;
    }
    state.particles.retain(|p| !p.expired());

    for projectile in state.projectiles.iter_mut() {
        projectile.pos += projectile.vel;
    }
    state.projectiles.retain(|p| !p.past_top());

    // Enemies are never pruned here: leaving the bottom edge is a
    // game-over condition, not a silent despawn.
    for enemy in state.enemies.iter_mut() {
        enemy.pos.y += enemy.fall_speed;
    }

    collision::resolve(state);
}

/// Spawner entry point, driven by the host on its own wall-clock cadence
/// (independent of the frame rate). A firing that lands after the game
/// has stopped is a no-op.
pub fn spawn_enemy(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    // Degenerate viewports still get a valid spawn band
    let min_x = ENEMY_RADIUS;
    let max_x = (state.viewport.width - ENEMY_RADIUS).max(min_x + 1.0);
    let x = state.rng.random_range(min_x..max_x);
    let fall_speed = state
        .rng
        .random_range(state.tuning.enemy_fall_min..state.tuning.enemy_fall_max);
    let kind = match state.rng.random_range(0..3) {
        0 => EnemyKind::Invader,
        1 => EnemyKind::Alien,
        _ => EnemyKind::Saucer,
    };
    state.enemies.push(Enemy {
        pos: Vec2::new(x, ENEMY_SPAWN_Y),
        radius: ENEMY_RADIUS,
        fall_speed,
        kind,
    });
}
