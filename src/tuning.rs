//! Data-driven game balance
//!
//! Every knob defaults to the values in `consts`; a host can hand the
//! game a JSON blob to override any subset before a round starts. Kept
//! in memory only, nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay balance knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player movement per tick
    pub player_speed: f32,
    /// Projectile upward travel per tick
    pub projectile_speed: f32,
    /// Enemy fall speed range (per-instance, drawn at spawn)
    pub enemy_fall_min: f32,
    pub enemy_fall_max: f32,
    /// Spawner cadence in wall-clock milliseconds
    pub spawn_interval_ms: u32,
    /// Debris particles per destroyed enemy
    pub particle_burst: usize,
    /// Debris alpha lost per tick
    pub particle_fade: f32,
    /// Points per destroyed enemy
    pub score_per_kill: u32,
    /// Collision slack (grazing contact counts)
    pub hit_epsilon: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            projectile_speed: PROJECTILE_SPEED,
            enemy_fall_min: ENEMY_FALL_MIN,
            enemy_fall_max: ENEMY_FALL_MAX,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            particle_burst: PARTICLE_BURST,
            particle_fade: PARTICLE_FADE,
            score_per_kill: SCORE_PER_KILL,
            hit_epsilon: HIT_EPSILON,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON. Missing fields keep their
    /// defaults, so a host can override a single knob.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
