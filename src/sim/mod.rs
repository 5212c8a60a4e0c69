//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, clock passed in by the driver
//! - Seeded RNG only
//! - Stable iteration order (by spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod feedback;
pub mod input;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::steer;
pub use collision::Rect;
pub use effects::{StateDelta, resolve};
pub use feedback::{ColorTag, FeedbackEvent, FeedbackQueue};
pub use input::{Action, InputState};
pub use spawner::{SpawnTimer, maybe_spawn, spawn_character};
pub use state::{
    CharacterKind, Facing, FallingCharacter, GameCore, GameEvent, GameState, Player, Pose,
};
pub use tick::tick;
