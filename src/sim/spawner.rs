//! Time-gated spawning of falling characters

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{CharacterKind, FallingCharacter};
use crate::tuning::Tuning;

/// Tracks when the last character spawned
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    last_spawn_ms: Option<f64>,
}

impl SpawnTimer {
    /// Milliseconds since the last spawn. Unbounded before the first one, so
    /// a fresh game spawns on its first tick.
    pub fn elapsed(&self, now_ms: f64) -> f64 {
        match self.last_spawn_ms {
            Some(last) => now_ms - last,
            None => f64::INFINITY,
        }
    }

    pub fn mark(&mut self, now_ms: f64) {
        self.last_spawn_ms = Some(now_ms);
    }
}

/// Roll a new character if more than `interval_ms` has elapsed.
///
/// The returned character has `id == 0`; the caller assigns the real id when
/// inserting it and marks the timer.
pub fn maybe_spawn<R: Rng>(
    elapsed_ms: f64,
    interval_ms: f64,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<FallingCharacter> {
    // NaN on either side never spawns
    if elapsed_ms.is_nan() || interval_ms.is_nan() || elapsed_ms <= interval_ms {
        return None;
    }
    Some(spawn_character(tuning, rng))
}

/// Build a character just above the field with random kind, column and speed
pub fn spawn_character<R: Rng>(tuning: &Tuning, rng: &mut R) -> FallingCharacter {
    let kind = CharacterKind::ALL[rng.random_range(0..CharacterKind::ALL.len())];

    let max_x = tuning.character_max_x();
    let x = if max_x > 0.0 {
        rng.random_range(0.0..max_x)
    } else {
        0.0
    };
    let fall_speed = rng.random_range(tuning.fall_speed_min..tuning.fall_speed_max);

    FallingCharacter {
        id: 0,
        pos: Vec2::new(x, -tuning.character_size),
        size: Vec2::splat(tuning.character_size),
        fall_speed,
        kind,
    }
}
