//! Collision detection and lifecycle resolution
//!
//! Runs once per tick, after every entity has moved. Hit tests use an
//! epsilon threshold (`distance - r1 - r2 < epsilon`) so grazing contact
//! at discrete frame steps still registers instead of tunneling past the
//! exact moment of overlap.

use glam::Vec2;

use super::state::{GamePhase, GameState};

/// Epsilon circle/circle test. `epsilon` is a small positive slack, so
/// touching-exactly counts as a hit.
#[inline]
pub fn circles_hit(a: Vec2, ra: f32, b: Vec2, rb: f32, epsilon: f32) -> bool {
    a.distance(b) - ra - rb < epsilon
}

/// Resolve this tick's projectile/enemy pairings, then check for a fatal
/// enemy contact. Mutates collections and score; a fatal event flips the
/// phase to `GameOver`.
pub fn resolve(state: &mut GameState) {
    resolve_projectile_hits(state);
    resolve_fatal_contact(state);
}

/// Pair up projectiles and enemies. Each entity is consumed by at most
/// one pairing per pass; pairings are collected during the scan and
/// committed at the end, so the scan never observes its own removals.
fn resolve_projectile_hits(state: &mut GameState) {
    let epsilon = state.tuning.hit_epsilon;
    let mut spent = vec![false; state.projectiles.len()];
    let mut dead = vec![false; state.enemies.len()];
    let mut bursts: Vec<Vec2> = Vec::new();

    for (pi, projectile) in state.projectiles.iter().enumerate() {
        for (ei, enemy) in state.enemies.iter().enumerate() {
            if dead[ei] {
                continue;
            }
            if circles_hit(
                projectile.pos,
                projectile.radius,
                enemy.pos,
                enemy.radius,
                epsilon,
            ) {
                spent[pi] = true;
                dead[ei] = true;
                bursts.push(enemy.pos);
                break; // this projectile is consumed
            }
        }
    }

    if bursts.is_empty() {
        return;
    }

    // End-of-pass commit: removals, debris, score.
    let mut pi = 0;
    state.projectiles.retain(|_| {
        let keep = !spent[pi];
        pi += 1;
        keep
    });
    let mut ei = 0;
    state.enemies.retain(|_| {
        let keep = !dead[ei];
        ei += 1;
        keep
    });
    for pos in &bursts {
        state.spawn_burst(*pos);
    }
    state.score += bursts.len() as u32 * state.tuning.score_per_kill;
    log::debug!("{} destroyed, score {}", bursts.len(), state.score);
}

/// Check for a game-ending event: an enemy overlapping the player's box,
/// or one crossing the bottom edge. Short-circuits on the first offender;
/// the game is ending regardless of the rest.
fn resolve_fatal_contact(state: &mut GameState) {
    let Some(player) = &state.player else { return };
    let epsilon = state.tuning.hit_epsilon;
    let center = player.center();
    let half_width = player.width / 2.0;
    let floor = state.viewport.height;

    let fatal = state.enemies.iter().any(|enemy| {
        enemy.pos.y > floor || center.distance(enemy.pos) - enemy.radius - half_width < epsilon
    });
    if fatal {
        state.phase = GamePhase::GameOver;
        log::info!("game over, final score {}", state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Enemy, EnemyKind, Projectile};

    fn running_game() -> GameState {
        let mut g = GameState::new(800.0, 600.0, 7);
        g.start();
        g
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
            radius: ENEMY_RADIUS,
            fall_speed: 1.0,
            kind: EnemyKind::Invader,
        }
    }

    fn projectile_at(x: f32, y: f32) -> Projectile {
        Projectile::new(Vec2::new(x, y), PROJECTILE_SPEED)
    }

    #[test]
    fn test_grazing_contact_counts() {
        // Touching exactly: distance == r1 + r2. The epsilon keeps this a hit.
        assert!(circles_hit(Vec2::ZERO, 5.0, Vec2::new(30.0, 0.0), 25.0, 1.0));
        assert!(!circles_hit(Vec2::ZERO, 5.0, Vec2::new(31.5, 0.0), 25.0, 1.0));
    }

    #[test]
    fn test_kill_awards_score_and_debris() {
        let mut g = running_game();
        g.projectiles.push(projectile_at(0.0, 0.0));
        g.enemies.push(enemy_at(3.0, 4.0)); // distance 5, deep overlap

        resolve(&mut g);

        assert!(g.projectiles.is_empty());
        assert!(g.enemies.is_empty());
        assert_eq!(g.score, SCORE_PER_KILL);
        assert_eq!(g.particles.len(), PARTICLE_BURST);
        assert!(g.particles.iter().all(|p| p.pos == Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn test_one_projectile_consumes_one_enemy() {
        let mut g = running_game();
        g.projectiles.push(projectile_at(100.0, 100.0));
        g.enemies.push(enemy_at(101.0, 100.0));
        g.enemies.push(enemy_at(99.0, 100.0));

        resolve(&mut g);

        assert!(g.projectiles.is_empty());
        assert_eq!(g.enemies.len(), 1);
        assert_eq!(g.score, SCORE_PER_KILL);
    }

    #[test]
    fn test_one_enemy_consumes_one_projectile() {
        let mut g = running_game();
        g.projectiles.push(projectile_at(100.0, 100.0));
        g.projectiles.push(projectile_at(102.0, 100.0));
        g.enemies.push(enemy_at(101.0, 100.0));

        resolve(&mut g);

        // The second shot flies on
        assert_eq!(g.projectiles.len(), 1);
        assert!(g.enemies.is_empty());
        assert_eq!(g.score, SCORE_PER_KILL);
    }

    #[test]
    fn test_disjoint_pairs_resolve_in_one_pass() {
        let mut g = running_game();
        g.projectiles.push(projectile_at(100.0, 100.0));
        g.projectiles.push(projectile_at(400.0, 100.0));
        g.enemies.push(enemy_at(100.0, 110.0));
        g.enemies.push(enemy_at(400.0, 110.0));

        resolve(&mut g);

        assert!(g.projectiles.is_empty());
        assert!(g.enemies.is_empty());
        assert_eq!(g.score, 2 * SCORE_PER_KILL);
        assert_eq!(g.particles.len(), 2 * PARTICLE_BURST);
    }

    #[test]
    fn test_enemy_past_bottom_ends_game() {
        let mut g = running_game();
        // Far from the player horizontally - the floor alone is fatal
        g.enemies.push(enemy_at(700.0, 601.0));
        resolve(&mut g);
        assert_eq!(g.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_enemy_overlapping_player_ends_game() {
        let mut g = running_game();
        let center = g.player.as_ref().unwrap().center();
        g.enemies.push(enemy_at(center.x + 10.0, center.y));
        resolve(&mut g);
        assert_eq!(g.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_distant_enemy_is_harmless() {
        let mut g = running_game();
        g.enemies.push(enemy_at(400.0, 100.0));
        resolve(&mut g);
        assert_eq!(g.phase, GamePhase::Running);
        assert_eq!(g.enemies.len(), 1);
    }

    #[test]
    fn test_kill_and_fatal_event_same_tick() {
        // A kill does not mask another enemy reaching the floor
        let mut g = running_game();
        g.projectiles.push(projectile_at(0.0, 0.0));
        g.enemies.push(enemy_at(3.0, 4.0));
        g.enemies.push(enemy_at(400.0, 601.0));

        resolve(&mut g);

        assert_eq!(g.score, SCORE_PER_KILL);
        assert_eq!(g.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_no_player_skips_fatal_check() {
        // An idle board with a stray enemy below the floor must not panic
        let mut g = GameState::new(800.0, 600.0, 7);
        g.enemies.push(enemy_at(10.0, 700.0));
        resolve(&mut g);
        assert_eq!(g.phase, GamePhase::Idle);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn hit_test_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            ra in 0.0f32..50.0, rb in 0.0f32..50.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(
                circles_hit(a, ra, b, rb, 1.0),
                circles_hit(b, rb, a, ra, 1.0)
            );
        }

        #[test]
        fn overlapping_circles_always_hit(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            ra in 1.0f32..50.0, rb in 1.0f32..50.0,
        ) {
            // A circle centered inside another always registers
            let a = Vec2::new(ax, ay);
            prop_assert!(circles_hit(a, ra, a, rb, 1.0));
        }
    }
}
