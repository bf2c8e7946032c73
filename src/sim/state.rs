//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState` - there is no
//! ambient state, so several games can run side by side and tests can
//! replay a round from a seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::tuning::Tuning;

/// Lifecycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Nothing simulated yet, start UI shown
    Idle,
    /// Loop and spawner active
    Running,
    /// Loop stopped, final score frozen, restart available
    GameOver,
}

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// The player ship. `pos` is the top-left corner of the bounding box.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal movement per tick
    pub speed: f32,
}

impl Player {
    /// Fresh ship, centered horizontally and anchored above the bottom edge
    pub fn new(viewport: Viewport, speed: f32) -> Self {
        Self {
            pos: Vec2::new(
                viewport.width / 2.0 - PLAYER_WIDTH / 2.0,
                viewport.height - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
            ),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed,
        }
    }

    /// Center of the bounding box (collision reference point)
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Muzzle position: top edge, horizontal center
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.width / 2.0, self.pos.y)
    }
}

/// A shot travelling straight up at constant speed
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
}

impl Projectile {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            radius: PROJECTILE_RADIUS,
            vel: Vec2::new(0.0, -speed),
        }
    }

    /// Expiry predicate: fully above the top edge
    pub fn past_top(&self) -> bool {
        self.pos.y + self.radius < 0.0
    }
}

/// Cosmetic enemy variant, chosen uniformly at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Invader,
    Alien,
    Saucer,
}

/// A descending enemy. Falls at its own speed; leaving the bottom edge
/// is a game-over event, not a despawn.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    /// Downward travel per tick, drawn from the tuning range at spawn
    pub fall_speed: f32,
    pub kind: EnemyKind,
}

/// Explosion debris; purely visual, never collides
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: &'static str,
    /// Fades by a fixed decrement per tick; expired at zero
    pub alpha: f32,
}

impl Particle {
    pub fn expired(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Complete state of one game instance
#[derive(Debug, Clone)]
pub struct GameState {
    pub viewport: Viewport,
    pub phase: GamePhase,
    /// Present from the first `start` onward
    pub player: Option<Player>,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    /// Non-decreasing while running, reset by `start`
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create an idle game for the given viewport and seed
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self::with_tuning(width, height, seed, Tuning::default())
    }

    pub fn with_tuning(width: f32, height: f32, seed: u64, tuning: Tuning) -> Self {
        Self {
            viewport: Viewport { width, height },
            phase: GamePhase::Idle,
            player: None,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            score: 0,
            time_ticks: 0,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Begin a round. Valid from `Idle` (start) and `GameOver` (restart),
    /// with identical effect; a running game cannot be restarted mid-flight.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Running {
            return;
        }
        self.player = Some(Player::new(self.viewport, self.tuning.player_speed));
        self.projectiles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
        log::info!(
            "game started ({}x{})",
            self.viewport.width,
            self.viewport.height
        );
    }

    /// Fire one projectile from the player's muzzle. One call, one
    /// projectile - the host decides what counts as a trigger edge.
    /// No-op unless the game is running.
    pub fn fire(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        let Some(player) = &self.player else { return };
        self.projectiles.push(Projectile::new(
            player.top_center(),
            self.tuning.projectile_speed,
        ));
    }

    /// Apply a viewport change. The player keeps its x and is re-anchored
    /// to the new bottom edge; safe in any phase, including before the
    /// first round (no player yet).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport { width, height };
        if let Some(player) = self.player.as_mut() {
            player.pos.y = height - player.height - PLAYER_BOTTOM_MARGIN;
        }
    }

    /// Spawn the debris burst for a destroyed enemy
    pub(crate) fn spawn_burst(&mut self, pos: Vec2) {
        for _ in 0..self.tuning.particle_burst {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * (self.rng.random::<f32>() * PARTICLE_MAX_SPEED),
                (self.rng.random::<f32>() - 0.5) * (self.rng.random::<f32>() * PARTICLE_MAX_SPEED),
            );
            self.particles.push(Particle {
                pos,
                vel,
                radius: self.rng.random::<f32>() * PARTICLE_MAX_RADIUS,
                color: EXPLOSION_COLOR,
                alpha: 1.0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> GameState {
        GameState::new(800.0, 600.0, 7)
    }

    #[test]
    fn test_new_game_is_idle_and_empty() {
        let g = game();
        assert_eq!(g.phase, GamePhase::Idle);
        assert!(g.player.is_none());
        assert!(g.projectiles.is_empty());
        assert!(g.enemies.is_empty());
        assert!(g.particles.is_empty());
        assert_eq!(g.score, 0);
    }

    #[test]
    fn test_start_initial_conditions() {
        let mut g = game();
        g.start();
        assert_eq!(g.phase, GamePhase::Running);
        assert_eq!(g.score, 0);
        let player = g.player.as_ref().unwrap();
        // 800x600 viewport with a 50x50 box and a 20px bottom margin
        assert_eq!(player.pos, Vec2::new(375.0, 530.0));
    }

    #[test]
    fn test_restart_reproduces_start() {
        let mut g = game();
        g.start();
        g.fire();
        g.score = 700;
        g.player.as_mut().unwrap().pos.x = 12.0;
        g.phase = GamePhase::GameOver;

        g.start();
        assert_eq!(g.phase, GamePhase::Running);
        assert_eq!(g.score, 0);
        assert!(g.projectiles.is_empty());
        assert_eq!(g.player.as_ref().unwrap().pos, Vec2::new(375.0, 530.0));
    }

    #[test]
    fn test_start_is_rejected_while_running() {
        let mut g = game();
        g.start();
        g.fire();
        g.score = 300;
        g.start();
        // Still the same round
        assert_eq!(g.score, 300);
        assert_eq!(g.projectiles.len(), 1);
    }

    #[test]
    fn test_fire_only_while_running() {
        let mut g = game();
        g.fire();
        assert!(g.projectiles.is_empty());

        g.start();
        g.fire();
        g.fire();
        assert_eq!(g.projectiles.len(), 2);

        g.phase = GamePhase::GameOver;
        g.fire();
        assert_eq!(g.projectiles.len(), 2);
    }

    #[test]
    fn test_fire_spawns_at_top_center() {
        let mut g = game();
        g.start();
        g.fire();
        let shot = &g.projectiles[0];
        assert_eq!(shot.pos, Vec2::new(400.0, 530.0));
        assert_eq!(shot.vel, Vec2::new(0.0, -PROJECTILE_SPEED));
    }

    #[test]
    fn test_resize_before_first_round_is_safe() {
        let mut g = game();
        g.resize(1024.0, 768.0);
        assert_eq!(g.viewport.width, 1024.0);
        assert!(g.player.is_none());
    }

    #[test]
    fn test_resize_reanchors_player_y_only() {
        let mut g = game();
        g.start();
        g.player.as_mut().unwrap().pos.x = 123.0;
        g.resize(800.0, 900.0);
        let player = g.player.as_ref().unwrap();
        assert_eq!(player.pos.x, 123.0);
        assert_eq!(player.pos.y, 900.0 - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN);
    }

    #[test]
    fn test_burst_size_and_position() {
        let mut g = game();
        g.spawn_burst(Vec2::new(3.0, 4.0));
        assert_eq!(g.particles.len(), PARTICLE_BURST);
        assert!(g.particles.iter().all(|p| p.pos == Vec2::new(3.0, 4.0)));
        assert!(g.particles.iter().all(|p| p.alpha == 1.0));
        assert!(g.particles.iter().all(|p| p.radius < PARTICLE_MAX_RADIUS));
    }
}
