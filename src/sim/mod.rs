//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per display frame, no wall-clock reads
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::circles_hit;
pub use state::{Enemy, EnemyKind, GamePhase, GameState, Particle, Player, Projectile, Viewport};
pub use tick::{TickInput, spawn_enemy, tick};
