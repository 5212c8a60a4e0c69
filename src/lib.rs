//! Klent Catch - A falling-character catch arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, catches, game state)
//! - `renderer`: Canvas 2D drawing and palette
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Field dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Pixels per tick while a move key is held
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Distance from the player's top edge to the bottom of the field
    pub const PLAYER_BOTTOM_OFFSET: f32 = 80.0;

    /// Falling character defaults (square sprite)
    pub const CHARACTER_SIZE: f32 = 40.0;
    /// Fall speed range in pixels per tick, `[min, max)`
    pub const FALL_SPEED_MIN: f32 = 2.0;
    pub const FALL_SPEED_MAX: f32 = 5.0;

    /// Milliseconds between spawns
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;

    /// Lives at start, and the cap for healing
    pub const MAX_LIVES: u8 = 3;

    /// Score awarded per effect
    pub const HEAL_SCORE: u64 = 50;
    pub const POINTS_SCORE: u64 = 100;
    pub const LUCKY_SCORE: u64 = 25;

    /// Floating text lifetime (ticks) and rise rate (pixels per tick)
    pub const FEEDBACK_TICKS: u32 = 60;
    pub const FEEDBACK_RISE: f32 = 2.0;
    /// Feedback spawns this far above the player's top edge
    pub const FEEDBACK_OFFSET_Y: f32 = 20.0;

    /// Duration of the player's reaction pose after a catch
    pub const REACT_TICKS: u32 = 30;

    /// Nominal frame length used by headless drivers (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
