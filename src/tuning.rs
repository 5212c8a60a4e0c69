//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads goes through [`Tuning`] so a
//! page (or a native run) can override them with a JSON document. Missing
//! fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_bottom_offset: f32,

    // === Falling characters ===
    pub character_size: f32,
    pub fall_speed_min: f32,
    pub fall_speed_max: f32,
    pub spawn_interval_ms: f64,

    // === Feedback ===
    pub feedback_ticks: u32,
    pub feedback_rise: f32,
    pub react_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,

            character_size: CHARACTER_SIZE,
            fall_speed_min: FALL_SPEED_MIN,
            fall_speed_max: FALL_SPEED_MAX,
            spawn_interval_ms: SPAWN_INTERVAL_MS,

            feedback_ticks: FEEDBACK_TICKS,
            feedback_rise: FEEDBACK_RISE,
            react_ticks: REACT_TICKS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and repair out-of-range values
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Tuning with a different field size (everything else default)
    pub fn with_field(width: f32, height: f32) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Self::default()
        }
    }

    /// Clamp values the simulation cannot work with back into range.
    ///
    /// Every number must be finite, entities must fit inside the field, the
    /// player must stand fully inside it, speed ranges must be non-empty and
    /// feedback must live at least one tick.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(positive(self.field_width) && positive(self.field_height)) {
            log::warn!(
                "Invalid field size {}x{}, using defaults",
                self.field_width,
                self.field_height
            );
            self.field_width = defaults.field_width;
            self.field_height = defaults.field_height;
        }
        if !(positive(self.player_width) && self.player_width <= self.field_width) {
            log::warn!("Invalid player width {}, using default", self.player_width);
            self.player_width = defaults.player_width.min(self.field_width);
        }
        if !(positive(self.player_height) && self.player_height <= self.field_height) {
            log::warn!("Invalid player height {}, using default", self.player_height);
            self.player_height = defaults.player_height.min(self.field_height);
        }
        if !self.player_bottom_offset.is_finite() {
            self.player_bottom_offset = defaults.player_bottom_offset;
        }
        // Top edge within [0, field_height - player_height]
        let offset = self
            .player_bottom_offset
            .clamp(self.player_height, self.field_height);
        if offset != self.player_bottom_offset {
            log::warn!(
                "Player bottom offset {} leaves the field, clamped to {}",
                self.player_bottom_offset,
                offset
            );
            self.player_bottom_offset = offset;
        }
        if !(self.player_speed.is_finite() && self.player_speed >= 0.0) {
            log::warn!("Invalid player speed {}, using default", self.player_speed);
            self.player_speed = defaults.player_speed;
        }
        if !(positive(self.character_size) && self.character_size <= self.field_width) {
            log::warn!(
                "Invalid character size {}, using default",
                self.character_size
            );
            self.character_size = defaults.character_size.min(self.field_width);
        }
        if !(positive(self.fall_speed_min)
            && self.fall_speed_max.is_finite()
            && self.fall_speed_max > self.fall_speed_min)
        {
            log::warn!(
                "Invalid fall speed range {}..{}, using defaults",
                self.fall_speed_min,
                self.fall_speed_max
            );
            self.fall_speed_min = defaults.fall_speed_min;
            self.fall_speed_max = defaults.fall_speed_max;
        }
        if !(self.spawn_interval_ms.is_finite() && self.spawn_interval_ms >= 0.0) {
            log::warn!(
                "Invalid spawn interval {}, using default",
                self.spawn_interval_ms
            );
            self.spawn_interval_ms = defaults.spawn_interval_ms;
        }
        if !self.feedback_rise.is_finite() {
            self.feedback_rise = defaults.feedback_rise;
        }
        if self.feedback_ticks == 0 {
            self.feedback_ticks = 1;
        }

        self
    }

    /// Rightmost x the player may occupy
    pub fn player_max_x(&self) -> f32 {
        (self.field_width - self.player_width).max(0.0)
    }

    /// Fixed y of the player's top edge
    pub fn player_y(&self) -> f32 {
        self.field_height - self.player_bottom_offset
    }

    /// Rightmost x a falling character may spawn at
    pub fn character_max_x(&self) -> f32 {
        (self.field_width - self.character_size).max(0.0)
    }
}

/// Finite and strictly greater than zero
fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
